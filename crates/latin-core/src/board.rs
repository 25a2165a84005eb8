use serde::{Deserialize, Serialize};

/// Side length of the grid; rows and columns each hold a permutation of 0..=SIZE-1.
pub const SIZE: usize = 10;
/// Number of cells in the flattened row-major puzzle.
pub const CELL_COUNT: usize = SIZE * SIZE;
/// Largest value a cell can hold.
pub const MAX_VALUE: u8 = (SIZE - 1) as u8;

/// The fully solved answer key, immutable once generated.
pub type Solution = [[u8; SIZE]; SIZE];

/// The partially hidden, user-editable projection of a `Solution`,
/// flattened row-major.
pub type Puzzle = [Cell; CELL_COUNT];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Given(u8),
    UserInput(u8),
    Empty,
}

impl Cell {
    /// The displayable number, stripped of its tag. `None` only for `Empty`.
    pub fn value(&self) -> Option<u8> {
        match self {
            Cell::Given(v) | Cell::UserInput(v) => Some(*v),
            Cell::Empty => None,
        }
    }

    pub fn is_given(&self) -> bool {
        matches!(self, Cell::Given(_))
    }

    pub fn is_user_input(&self) -> bool {
        matches!(self, Cell::UserInput(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Editable iff not a given. The tag decides, never the number:
    /// `Given(0)` stays locked while `UserInput(0)` stays editable.
    pub fn can_edit(&self) -> bool {
        !self.is_given()
    }
}
