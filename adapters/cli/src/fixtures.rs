//! Hand-authored demo content for the Maze Race binary.

use maze_race_core::{CellWalls, Cord, Direction, Grid};

const DEMO_SIZE: usize = 5;

/// Carve order of the demo maze: each step opens the wall of the named cell
/// in the named direction, together with the matching wall of the neighbour
/// it reveals. The order snakes column by column so the playback demo sweeps
/// the whole grid.
const CARVE_STEPS: [(usize, usize, Direction); 24] = [
    (0, 0, Direction::Down),
    (1, 0, Direction::Down),
    (2, 0, Direction::Down),
    (3, 0, Direction::Down),
    (4, 0, Direction::Right),
    (4, 1, Direction::Top),
    (3, 1, Direction::Top),
    (2, 1, Direction::Top),
    (1, 1, Direction::Top),
    (0, 1, Direction::Right),
    (0, 2, Direction::Down),
    (1, 2, Direction::Down),
    (2, 2, Direction::Down),
    (3, 2, Direction::Down),
    (4, 2, Direction::Right),
    (4, 3, Direction::Top),
    (3, 3, Direction::Top),
    (2, 3, Direction::Top),
    (1, 3, Direction::Top),
    (0, 3, Direction::Right),
    (0, 4, Direction::Down),
    (1, 4, Direction::Down),
    (2, 4, Direction::Down),
    (3, 4, Direction::Down),
];

/// The maze the live-play window boots with when no share code is supplied.
pub(crate) fn demo_maze() -> Grid {
    let mut rows = sealed_rows();
    for (row, col, direction) in CARVE_STEPS {
        carve(&mut rows, row, col, direction);
    }

    Grid::from_rows(rows)
}

/// Snapshots replayed by the generation-playback demo.
///
/// Starts from the fully sealed grid and opens one passage per frame, with
/// the step indicator on the freshly revealed cell.
pub(crate) fn carve_sequence() -> Vec<(Grid, Cord)> {
    let mut rows = sealed_rows();
    let mut snapshots = Vec::with_capacity(CARVE_STEPS.len() + 1);
    snapshots.push((Grid::from_rows(rows.clone()), Cord::cell(0, 0)));

    for (row, col, direction) in CARVE_STEPS {
        carve(&mut rows, row, col, direction);
        let (revealed_row, revealed_col) = neighbour(row, col, direction);
        snapshots.push((
            Grid::from_rows(rows.clone()),
            Cord::cell(revealed_row, revealed_col),
        ));
    }

    snapshots
}

fn sealed_rows() -> Vec<Vec<CellWalls>> {
    vec![vec![CellWalls::all(); DEMO_SIZE]; DEMO_SIZE]
}

fn carve(rows: &mut [Vec<CellWalls>], row: usize, col: usize, direction: Direction) {
    let (to_row, to_col) = neighbour(row, col, direction);
    rows[row][col].remove(direction.wall());
    rows[to_row][to_col].remove(direction.opposite().wall());
}

fn neighbour(row: usize, col: usize, direction: Direction) -> (usize, usize) {
    match direction {
        Direction::Top => (row - 1, col),
        Direction::Right => (row, col + 1),
        Direction::Down => (row + 1, col),
        Direction::Left => (row, col - 1),
    }
}
