use unicode_segmentation::UnicodeSegmentation;

pub const CLOCK_WIDTH: u16 = 21;
pub const CLOCK_HEIGHT: u16 = 11;

const CLOCK_FACE: &str = "╭───────────────────╮
│                   │
│                   │
│                   │
│                   │
│                   │
│                   │
│                   │
│                   │
│                   │
╰───────────────────╯";

const WIDTH: usize = CLOCK_WIDTH as usize;
const HEIGHT: usize = CLOCK_HEIGHT as usize;
const N_RING_CELLS: usize = 2 * WIDTH + 2 * (HEIGHT - 2);

/// Border cells as `(row, column)`, starting at twelve o'clock and running counterclockwise,
/// so that erasing a prefix makes the ring shrink the way a clock hand would sweep it.
fn ring_path() -> impl Iterator<Item = (usize, usize)> {
    let top_left_half = (0..WIDTH / 2).rev().map(|col| (0, col));
    let left_side = (1..HEIGHT).map(|row| (row, 0));
    let bottom = (1..WIDTH).map(|col| (HEIGHT - 1, col));
    let right_side = (0..HEIGHT - 1).rev().map(|row| (row, WIDTH - 1));
    let top_right_half = (WIDTH / 2..WIDTH - 1).rev().map(|col| (0, col));

    top_left_half
        .chain(left_side)
        .chain(bottom)
        .chain(right_side)
        .chain(top_right_half)
}

/// Draws the clock face with only `remaining` (in `[0, 1]`) of its ring visible.
pub fn clock(remaining: f64) -> String {
    let remaining = remaining.clamp(0.0, 1.0);

    let n_visible = (N_RING_CELLS as f64 * remaining).ceil() as usize;
    let n_erased = N_RING_CELLS - n_visible;

    let mut cells: Vec<Vec<&str>> = CLOCK_FACE
        .lines()
        .map(|line| line.graphemes(true).collect())
        .collect();

    for (row, col) in ring_path().take(n_erased) {
        cells[row][col] = " ";
    }

    cells.iter().map(|row| row.concat() + "\n").collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn visible_ring_cells(clock: &str) -> usize {
        clock
            .graphemes(true)
            .filter(|g| !matches!(*g, " " | "\n"))
            .count()
    }

    #[test]
    fn ring_path_visits_every_border_cell_once() {
        let cells: HashSet<_> = ring_path().collect();

        assert_eq!(ring_path().count(), N_RING_CELLS);
        assert_eq!(cells.len(), N_RING_CELLS);
        assert!(cells.iter().all(|&(row, col)| {
            row == 0 || row == HEIGHT - 1 || col == 0 || col == WIDTH - 1
        }));
    }

    #[test]
    fn full_clock_is_the_whole_face() {
        assert_eq!(clock(1.0), format!("{CLOCK_FACE}\n"));
        assert_eq!(visible_ring_cells(&clock(1.0)), N_RING_CELLS);
    }

    #[test]
    fn empty_clock_has_no_ring() {
        assert_eq!(visible_ring_cells(&clock(0.0)), 0);
        assert_eq!(clock(0.0).lines().count(), HEIGHT);
    }

    #[test]
    fn half_clock_keeps_half_the_ring() {
        assert_eq!(visible_ring_cells(&clock(0.5)), N_RING_CELLS / 2);
    }

    #[test]
    fn out_of_range_fractions_are_clamped() {
        assert_eq!(clock(2.0), clock(1.0));
        assert_eq!(clock(-1.0), clock(0.0));
    }

    #[test]
    fn erasing_starts_at_twelve_o_clock() {
        let clock = clock(58.5 / 60.0);
        let first_line = clock.lines().next();

        let expected = format!("╭{} {}╮", "─".repeat(8), "─".repeat(10));
        assert_eq!(first_line, Some(expected.as_str()));
    }
}
