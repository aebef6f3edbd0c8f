//! Five-in-a-row detection.
//!
//! Only the most recently placed stone can complete a new run, so the check
//! walks outward from that stone along the four axes. Stone lookup is a linear
//! scan over the steps of one color; a 15x15 board keeps that cheap and the
//! check runs once per move.

use super::value_object::{BOARD_SIZE, Color, Step};

/// Fewest steps after which one color can own five stones (5 black + 4 white).
const MIN_STEPS_FOR_FIVE: usize = 9;

/// Run length that ends the game.
const FIVE: usize = 5;

/// Horizontal, vertical, diagonal and anti-diagonal. Each is walked in both
/// directions.
const AXES: [(i8, i8); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Returns the winning color if the last step completes a run of five or more.
pub fn check_five(steps: &[Step]) -> Option<Color> {
    if steps.len() < MIN_STEPS_FOR_FIVE {
        return None;
    }
    let last_index = steps.len() - 1;
    let color = Color::of_step(last_index);
    let last = steps[last_index];

    AXES.iter()
        .any(|&(di, dj)| run_length(last, color, di, dj, steps) >= FIVE)
        .then_some(color)
}

/// Whether `color` has a stone on `(i, j)`.
pub fn has_stone(i: u8, j: u8, color: Color, steps: &[Step]) -> bool {
    steps
        .iter()
        .skip(color.parity())
        .step_by(2)
        .any(|step| step.i == i && step.j == j)
}

/// Number of consecutive `color` stones through `origin` along `(di, dj)`,
/// counting the origin itself.
fn run_length(origin: Step, color: Color, di: i8, dj: i8, steps: &[Step]) -> usize {
    1 + walk(origin, color, -di, -dj, steps) + walk(origin, color, di, dj, steps)
}

fn walk(origin: Step, color: Color, di: i8, dj: i8, steps: &[Step]) -> usize {
    let mut count = 0;
    let (mut i, mut j) = (origin.i as i16 + di as i16, origin.j as i16 + dj as i16);
    while on_board(i) && on_board(j) && has_stone(i as u8, j as u8, color, steps) {
        count += 1;
        i += di as i16;
        j += dj as i16;
    }
    count
}

fn on_board(coord: i16) -> bool {
    (0..BOARD_SIZE as i16).contains(&coord)
}
