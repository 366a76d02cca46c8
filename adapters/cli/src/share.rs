#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use maze_race_core::Grid;

const SHARE_DOMAIN: &str = "maze";
const SHARE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded grid payload.
const SHARE_HEADER: &str = "maze:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Maze grid exchanged between players as a single-line share code.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MazeShareSnapshot {
    /// Grid carried by the share code.
    pub(crate) grid: Grid,
}

impl MazeShareSnapshot {
    /// Encodes the grid into a single-line string suitable for clipboard transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let json = serde_json::to_vec(&self.grid).expect("grid serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!(
            "{SHARE_HEADER}:{}x{}:{encoded}",
            self.grid.row_count(),
            self.grid.column_count()
        )
    }

    /// Decodes a share code back into a renderable grid.
    pub(crate) fn decode(value: &str) -> Result<Self, ShareCodeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ShareCodeError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(ShareCodeError::MissingPrefix)?;
        let version = parts.next().ok_or(ShareCodeError::MissingVersion)?;
        let dimensions = parts.next().ok_or(ShareCodeError::MissingDimensions)?;
        let payload = parts.next().ok_or(ShareCodeError::MissingPayload)?;

        if domain != SHARE_DOMAIN {
            return Err(ShareCodeError::InvalidPrefix(domain.to_owned()));
        }
        if version != SHARE_VERSION {
            return Err(ShareCodeError::UnsupportedVersion(version.to_owned()));
        }

        let (rows, columns) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(ShareCodeError::InvalidEncoding)?;
        let grid: Grid = serde_json::from_slice(&bytes).map_err(ShareCodeError::InvalidPayload)?;

        if grid.row_count() != rows as usize || grid.column_count() != columns as usize {
            return Err(ShareCodeError::DimensionMismatch {
                header_rows: rows,
                header_columns: columns,
            });
        }
        if !grid.is_valid() {
            return Err(ShareCodeError::InvalidGrid);
        }

        Ok(Self { grid })
    }
}

/// Errors that can occur while decoding maze share codes.
#[derive(Debug)]
pub(crate) enum ShareCodeError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the share code.
    MissingPrefix,
    /// The share code did not contain a version segment.
    MissingVersion,
    /// The share code did not include grid dimensions.
    MissingDimensions,
    /// The share code did not include the payload segment.
    MissingPayload,
    /// The share code used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The share code used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed from the share code.
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
    /// The decoded grid does not match the dimensions in the header.
    DimensionMismatch {
        /// Row count announced by the share code header.
        header_rows: u32,
        /// Column count announced by the share code header.
        header_columns: u32,
    },
    /// The decoded grid failed structural validation.
    InvalidGrid,
}

impl fmt::Display for ShareCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "share code was empty"),
            Self::MissingPrefix => write!(f, "share code is missing the prefix"),
            Self::MissingVersion => write!(f, "share code is missing the version"),
            Self::MissingDimensions => write!(f, "share code is missing the grid dimensions"),
            Self::MissingPayload => write!(f, "share code is missing the payload"),
            Self::InvalidPrefix(prefix) => {
                write!(f, "share code prefix '{prefix}' is not supported")
            }
            Self::UnsupportedVersion(version) => {
                write!(f, "share code version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse grid dimensions '{dimensions}'")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode share code payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse share code payload: {error}")
            }
            Self::DimensionMismatch {
                header_rows,
                header_columns,
            } => write!(
                f,
                "decoded grid does not match the announced {header_rows}x{header_columns} dimensions"
            ),
            Self::InvalidGrid => write!(f, "decoded grid failed structural validation"),
        }
    }
}

impl Error for ShareCodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), ShareCodeError> {
    let (rows, columns) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| ShareCodeError::InvalidDimensions(dimensions.to_owned()))?;

    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| ShareCodeError::InvalidDimensions(dimensions.to_owned()))?;
    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| ShareCodeError::InvalidDimensions(dimensions.to_owned()))?;

    if rows == 0 || columns == 0 {
        return Err(ShareCodeError::InvalidDimensions(dimensions.to_owned()));
    }

    Ok((rows, columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_race_core::{CellWalls, Grid};

    #[test]
    fn round_trip_sealed_grid() {
        let snapshot = MazeShareSnapshot {
            grid: Grid::fully_walled(4),
        };

        let encoded = snapshot.encode();
        assert!(encoded.starts_with(&format!("{SHARE_HEADER}:4x4:")));

        let decoded = MazeShareSnapshot::decode(&encoded).expect("share code decodes");
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn round_trip_carved_grid() {
        let snapshot = MazeShareSnapshot {
            grid: crate::fixtures::demo_maze(),
        };

        let encoded = snapshot.encode();
        let decoded = MazeShareSnapshot::decode(&encoded).expect("share code decodes");

        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn whitespace_around_the_code_is_tolerated() {
        let encoded = MazeShareSnapshot {
            grid: Grid::fully_walled(2),
        }
        .encode();

        let decoded =
            MazeShareSnapshot::decode(&format!("  {encoded}\n")).expect("share code decodes");
        assert_eq!(decoded.grid, Grid::fully_walled(2));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            MazeShareSnapshot::decode("   "),
            Err(ShareCodeError::EmptyPayload)
        ));
    }

    #[test]
    fn foreign_prefix_is_rejected() {
        assert!(matches!(
            MazeShareSnapshot::decode("labyrinth:v1:2x2:e30"),
            Err(ShareCodeError::InvalidPrefix(prefix)) if prefix == "labyrinth"
        ));
    }

    #[test]
    fn future_version_is_rejected() {
        assert!(matches!(
            MazeShareSnapshot::decode("maze:v2:2x2:e30"),
            Err(ShareCodeError::UnsupportedVersion(version)) if version == "v2"
        ));
    }

    #[test]
    fn malformed_dimensions_are_rejected() {
        assert!(matches!(
            MazeShareSnapshot::decode("maze:v1:2by2:e30"),
            Err(ShareCodeError::InvalidDimensions(_))
        ));
        assert!(matches!(
            MazeShareSnapshot::decode("maze:v1:0x4:e30"),
            Err(ShareCodeError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn missing_payload_is_rejected() {
        assert!(matches!(
            MazeShareSnapshot::decode("maze:v1:2x2"),
            Err(ShareCodeError::MissingPayload)
        ));
    }

    #[test]
    fn corrupted_base64_is_rejected() {
        assert!(matches!(
            MazeShareSnapshot::decode("maze:v1:2x2:!!!"),
            Err(ShareCodeError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn header_and_payload_dimensions_must_agree() {
        let encoded = MazeShareSnapshot {
            grid: Grid::fully_walled(3),
        }
        .encode();
        let payload = encoded
            .rsplit(FIELD_DELIMITER)
            .next()
            .expect("encoded code has a payload");

        let error = MazeShareSnapshot::decode(&format!("maze:v1:4x4:{payload}"))
            .expect_err("mismatched dimensions must be rejected");
        assert!(matches!(
            error,
            ShareCodeError::DimensionMismatch {
                header_rows: 4,
                header_columns: 4,
            }
        ));
    }

    #[test]
    fn non_square_payload_is_rejected() {
        let ragged = Grid::from_rows(vec![vec![CellWalls::all(); 3]; 2]);
        let json = serde_json::to_vec(&ragged).expect("grid serializes");
        let payload = STANDARD_NO_PAD.encode(json);

        let error = MazeShareSnapshot::decode(&format!("maze:v1:2x3:{payload}"))
            .expect_err("non-square grid must be rejected");
        assert!(matches!(error, ShareCodeError::InvalidGrid));
    }
}
