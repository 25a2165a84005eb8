pub mod board;
pub mod generator;
pub mod puzzle;
pub mod session;

pub use board::{CELL_COUNT, Cell, MAX_VALUE, Puzzle, SIZE, Solution};
pub use generator::create_board;
pub use puzzle::{GuessError, MaskError, apply_guess, check_solved, flatten, mask, unflatten};
pub use session::{GenerationToken, Phase, Session};
