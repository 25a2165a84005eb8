use rand::rng;
use rand::seq::SliceRandom;

use crate::board::{SIZE, Solution};

/// Check a candidate row against the committed rows above it: at every column
/// the value must collide neither with the earlier columns of the candidate
/// itself nor with that column in any committed row.
fn row_fits(grid: &Solution, row: usize, candidate: &[u8; SIZE]) -> bool {
    for col in 0..SIZE {
        let val = candidate[col];
        if candidate[..col].contains(&val) {
            return false;
        }
        for r in 0..row {
            if grid[r][col] == val {
                return false;
            }
        }
    }
    true
}

/// Generate a complete 10×10 Latin square: every row and every column is a
/// permutation of 0..=9.
///
/// Rows are committed top to bottom. Each row is a fresh uniformly random
/// permutation, rejected wholesale and reshuffled on any column conflict
/// with the rows already committed. No incremental repair; for a 10-value
/// alphabet the retry loop terminates quickly in practice.
pub fn create_board() -> Solution {
    let mut rng = rng();
    let mut grid = [[0u8; SIZE]; SIZE];

    for row in 0..SIZE {
        let mut candidate: [u8; SIZE] = std::array::from_fn(|i| i as u8);
        let mut attempts = 0u32;
        loop {
            candidate.shuffle(&mut rng);
            attempts += 1;
            if row_fits(&grid, row, &candidate) {
                break;
            }
        }
        log::debug!("row {} committed after {} shuffle(s)", row, attempts);
        grid[row] = candidate;
    }

    grid
}
