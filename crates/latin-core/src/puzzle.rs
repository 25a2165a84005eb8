use rand::RngExt;
use rand::rng;
use thiserror::Error;

use crate::board::{CELL_COUNT, Cell, MAX_VALUE, Puzzle, SIZE, Solution};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MaskError {
    #[error("cannot hide {requested} cells, the board only has {}", CELL_COUNT)]
    CountOutOfRange { requested: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("value {value} is outside 0..={}", MAX_VALUE)]
    ValueOutOfRange { value: u8 },
    #[error("position {position} is outside the {}-cell board", CELL_COUNT)]
    PositionOutOfBounds { position: usize },
    #[error("cell {position} is a given and cannot be edited")]
    CellLocked { position: usize },
}

/// Flatten the solution into its row-major answer sequence.
pub fn flatten(solution: &Solution) -> [u8; CELL_COUNT] {
    let mut flat = [0u8; CELL_COUNT];
    for row in 0..SIZE {
        for col in 0..SIZE {
            flat[row * SIZE + col] = solution[row][col];
        }
    }
    flat
}

/// Rebuild a solution grid from its row-major sequence. Inverse of [`flatten`].
pub fn unflatten(flat: &[u8; CELL_COUNT]) -> Solution {
    let mut grid = [[0u8; SIZE]; SIZE];
    for row in 0..SIZE {
        for col in 0..SIZE {
            grid[row][col] = flat[row * SIZE + col];
        }
    }
    grid
}

/// Derive a puzzle from a solution by hiding exactly `squares_to_hide` cells
/// at distinct positions chosen uniformly at random.
///
/// Positions are picked by rejection sampling: draw an index, redraw while it
/// was already chosen. The count is validated up front so the redraw loop can
/// always terminate.
pub fn mask(solution: &Solution, squares_to_hide: usize) -> Result<Puzzle, MaskError> {
    if squares_to_hide > CELL_COUNT {
        return Err(MaskError::CountOutOfRange {
            requested: squares_to_hide,
        });
    }

    let flat = flatten(solution);
    let mut puzzle: Puzzle = std::array::from_fn(|i| Cell::Given(flat[i]));

    let mut rng = rng();
    let mut hidden: Vec<usize> = Vec::with_capacity(squares_to_hide);
    for _ in 0..squares_to_hide {
        let mut index = rng.random_range(0..CELL_COUNT);
        while hidden.contains(&index) {
            index = rng.random_range(0..CELL_COUNT);
        }
        puzzle[index] = Cell::Empty;
        hidden.push(index);
    }

    Ok(puzzle)
}

/// Record a user guess at `position`. Refuses out-of-range values, positions
/// past the board, and given cells; on any refusal the puzzle is untouched.
/// Overwriting an earlier guess is allowed and keeps the user-input tag.
pub fn apply_guess(puzzle: &mut Puzzle, position: usize, value: u8) -> Result<(), GuessError> {
    if value > MAX_VALUE {
        return Err(GuessError::ValueOutOfRange { value });
    }
    if position >= CELL_COUNT {
        return Err(GuessError::PositionOutOfBounds { position });
    }
    if !puzzle[position].can_edit() {
        return Err(GuessError::CellLocked { position });
    }
    puzzle[position] = Cell::UserInput(value);
    Ok(())
}

/// Compare the puzzle against the solution, element-wise in row-major order.
/// An `Empty` cell has no value and never matches, so an incomplete puzzle
/// is never solved.
pub fn check_solved(solution: &Solution, puzzle: &Puzzle) -> bool {
    let flat = flatten(solution);
    puzzle
        .iter()
        .zip(flat.iter())
        .all(|(cell, answer)| cell.value() == Some(*answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::create_board;

    fn fixed_board() -> Solution {
        // Cyclic Latin square, row r is 0..=9 rotated left by r.
        let mut grid = [[0u8; SIZE]; SIZE];
        for row in 0..SIZE {
            for col in 0..SIZE {
                grid[row][col] = ((row + col) % SIZE) as u8;
            }
        }
        grid
    }

    #[test]
    fn flatten_is_row_major() {
        let grid = fixed_board();
        let flat = flatten(&grid);
        assert_eq!(flat[0], grid[0][0]);
        assert_eq!(flat[9], grid[0][9]);
        assert_eq!(flat[10], grid[1][0]);
        assert_eq!(flat[99], grid[9][9]);
    }

    #[test]
    fn flatten_round_trips() {
        let grid = create_board();
        assert_eq!(unflatten(&flatten(&grid)), grid);
    }

    #[test]
    fn mask_hides_exactly_the_requested_count() {
        let grid = fixed_board();
        let flat = flatten(&grid);
        for k in [0usize, 30, 100] {
            let puzzle = mask(&grid, k).unwrap();
            let empties = puzzle.iter().filter(|c| c.is_empty()).count();
            assert_eq!(empties, k);
            for (i, cell) in puzzle.iter().enumerate() {
                if !cell.is_empty() {
                    assert_eq!(*cell, Cell::Given(flat[i]));
                }
            }
        }
    }

    #[test]
    fn mask_rejects_counts_past_the_board() {
        let grid = fixed_board();
        assert_eq!(
            mask(&grid, 101),
            Err(MaskError::CountOutOfRange { requested: 101 })
        );
    }

    #[test]
    fn unmasked_puzzle_is_solved_immediately() {
        let grid = fixed_board();
        let puzzle = mask(&grid, 0).unwrap();
        let flat = flatten(&grid);
        for (cell, answer) in puzzle.iter().zip(flat.iter()) {
            assert_eq!(cell.value(), Some(*answer));
        }
        assert!(check_solved(&grid, &puzzle));
    }

    #[test]
    fn incomplete_puzzle_is_never_solved() {
        let grid = fixed_board();
        let puzzle = mask(&grid, 1).unwrap();
        assert!(!check_solved(&grid, &puzzle));
    }

    #[test]
    fn fully_hidden_board_solves_after_all_guesses() {
        let grid = fixed_board();
        let mut puzzle = mask(&grid, CELL_COUNT).unwrap();
        let flat = flatten(&grid);

        // Fill back to front; order must not matter.
        for position in (0..CELL_COUNT).rev() {
            assert!(!check_solved(&grid, &puzzle));
            apply_guess(&mut puzzle, position, flat[position]).unwrap();
        }
        assert!(check_solved(&grid, &puzzle));
        assert!(puzzle.iter().all(|c| c.is_user_input()));
    }

    #[test]
    fn wrong_guess_is_recorded_but_not_solved() {
        let grid = fixed_board();
        let mut puzzle = mask(&grid, CELL_COUNT).unwrap();
        let flat = flatten(&grid);
        for position in 0..CELL_COUNT {
            apply_guess(&mut puzzle, position, flat[position]).unwrap();
        }
        let wrong = (flat[42] + 1) % SIZE as u8;
        apply_guess(&mut puzzle, 42, wrong).unwrap();
        assert!(!check_solved(&grid, &puzzle));
        // Correcting it is allowed; the tag survives the overwrite.
        apply_guess(&mut puzzle, 42, flat[42]).unwrap();
        assert!(puzzle[42].is_user_input());
        assert!(check_solved(&grid, &puzzle));
    }

    #[test]
    fn rejected_guesses_leave_the_puzzle_unchanged() {
        let grid = fixed_board();
        let mut puzzle = mask(&grid, 0).unwrap();
        let before = puzzle;

        assert_eq!(
            apply_guess(&mut puzzle, 0, 5),
            Err(GuessError::CellLocked { position: 0 })
        );
        assert_eq!(
            apply_guess(&mut puzzle, 3, 10),
            Err(GuessError::ValueOutOfRange { value: 10 })
        );
        assert_eq!(
            apply_guess(&mut puzzle, CELL_COUNT, 5),
            Err(GuessError::PositionOutOfBounds { position: CELL_COUNT })
        );
        assert_eq!(puzzle, before);
    }

    #[test]
    fn given_zero_is_locked() {
        let grid = fixed_board();
        // fixed_board has a 0 at (0,0).
        let mut puzzle = mask(&grid, 0).unwrap();
        assert_eq!(puzzle[0], Cell::Given(0));
        assert_eq!(
            apply_guess(&mut puzzle, 0, 1),
            Err(GuessError::CellLocked { position: 0 })
        );
    }
}
