//! Optional TOML configuration for the Maze Race binary.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_WINDOW_TITLE: &str = "Maze Race";
const DEFAULT_FRAME_DELAY_MS: u64 = 50;

/// Settings controlling the window and playback pacing.
///
/// Every field is optional in the file; omitted fields fall back to the
/// defaults below, and running without a file uses the defaults wholesale.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CliConfig {
    /// Title of the created window.
    pub(crate) window_title: String,
    /// Whether presentation synchronises with the display refresh rate.
    pub(crate) vsync: bool,
    /// Whether the backend prints a frame rate line once per second.
    pub(crate) show_fps: bool,
    /// Suspension between playback frames, in milliseconds.
    pub(crate) frame_delay_ms: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            window_title: DEFAULT_WINDOW_TITLE.to_owned(),
            vsync: true,
            show_fps: false,
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        }
    }
}

impl CliConfig {
    /// Loads the configuration from the given path, or the defaults when no
    /// path was supplied.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        toml::from_str(&contents).context("failed to parse configuration toml contents")
    }

    /// The playback frame delay as a duration.
    pub(crate) fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}
