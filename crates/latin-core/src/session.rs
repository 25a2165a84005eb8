use serde::{Deserialize, Serialize};

use crate::board::{Puzzle, Solution};
use crate::puzzle::{GuessError, check_solved};

/// Where the game currently is. Transitions happen only through the named
/// methods on [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingStart,
    Generating,
    SelectingDifficulty,
    Playing,
}

/// Captured when deferred work (board generation, puzzle deal) is scheduled.
/// A result is applied only if its token still matches the session's current
/// counter, so work outlived by a newer game can never clobber it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationToken(u64);

/// One game session: the solved board, the puzzle in play, and the phase
/// machine driving them. All mutation goes through here; there is no
/// module-level state.
pub struct Session {
    phase: Phase,
    generation: u64,
    solution: Option<Solution>,
    puzzle: Option<Puzzle>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::AwaitingStart,
            generation: 0,
            solution: None,
            puzzle: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    fn is_current(&self, token: GenerationToken) -> bool {
        token.0 == self.generation
    }

    fn bump(&mut self) -> GenerationToken {
        self.generation += 1;
        GenerationToken(self.generation)
    }

    /// StartGame: discard any previous game and move to `Generating`.
    /// The returned token must accompany the generated board.
    pub fn start_game(&mut self) -> GenerationToken {
        self.solution = None;
        self.puzzle = None;
        self.phase = Phase::Generating;
        log::trace!("phase -> Generating (generation {})", self.generation + 1);
        self.bump()
    }

    /// GenerationComplete: accept a generated board, or discard it if a newer
    /// game has started since the work was scheduled. Returns whether the
    /// board was applied.
    pub fn generation_complete(&mut self, token: GenerationToken, solution: Solution) -> bool {
        if !self.is_current(token) {
            log::debug!("discarding stale generated board (token {:?})", token);
            return false;
        }
        self.solution = Some(solution);
        self.phase = Phase::SelectingDifficulty;
        log::trace!("phase -> SelectingDifficulty");
        true
    }

    /// Schedule the deal (deferred mask computation). The session stays in
    /// `SelectingDifficulty` until the matching [`deal_complete`] arrives.
    ///
    /// [`deal_complete`]: Session::deal_complete
    pub fn begin_deal(&mut self) -> Option<GenerationToken> {
        if self.phase != Phase::SelectingDifficulty || self.solution.is_none() {
            return None;
        }
        Some(self.bump())
    }

    /// Accept a dealt puzzle, or discard it if stale. Returns whether play
    /// started.
    pub fn deal_complete(&mut self, token: GenerationToken, puzzle: Puzzle) -> bool {
        if !self.is_current(token) || self.solution.is_none() {
            log::debug!("discarding stale dealt puzzle (token {:?})", token);
            return false;
        }
        self.puzzle = Some(puzzle);
        self.phase = Phase::Playing;
        log::trace!("phase -> Playing");
        true
    }

    /// SubmitGuess: record a value for an editable cell. Outside `Playing`
    /// the guess is refused as a locked-cell edit.
    pub fn submit_guess(&mut self, position: usize, value: u8) -> Result<(), GuessError> {
        match (self.phase, self.puzzle.as_mut()) {
            (Phase::Playing, Some(puzzle)) => crate::puzzle::apply_guess(puzzle, position, value),
            _ => Err(GuessError::CellLocked { position }),
        }
    }

    /// SubmitCheck: compare the puzzle against the solution. Anything short
    /// of a complete, correct fill is false.
    pub fn submit_check(&self) -> bool {
        match (self.phase, &self.solution, &self.puzzle) {
            (Phase::Playing, Some(solution), Some(puzzle)) => check_solved(solution, puzzle),
            _ => false,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CELL_COUNT;
    use crate::generator::create_board;
    use crate::puzzle::{flatten, mask};

    #[test]
    fn happy_path() {
        let mut session = Session::new();
        assert_eq!(session.phase(), Phase::AwaitingStart);

        let token = session.start_game();
        assert_eq!(session.phase(), Phase::Generating);

        let solution = create_board();
        assert!(session.generation_complete(token, solution));
        assert_eq!(session.phase(), Phase::SelectingDifficulty);

        let deal = session.begin_deal().unwrap();
        let puzzle = mask(session.solution().unwrap(), 3).unwrap();
        assert!(session.deal_complete(deal, puzzle));
        assert_eq!(session.phase(), Phase::Playing);
        assert!(!session.submit_check());

        let flat = flatten(&solution);
        for position in 0..CELL_COUNT {
            if session.puzzle().unwrap()[position].is_empty() {
                session.submit_guess(position, flat[position]).unwrap();
            }
        }
        assert!(session.submit_check());
    }

    #[test]
    fn stale_generated_board_is_discarded() {
        let mut session = Session::new();
        let first = session.start_game();
        let stale_board = create_board();

        // A second game starts before the first board arrives.
        let second = session.start_game();
        assert!(!session.generation_complete(first, stale_board));
        assert_eq!(session.phase(), Phase::Generating);
        assert!(session.solution().is_none());

        assert!(session.generation_complete(second, create_board()));
        assert_eq!(session.phase(), Phase::SelectingDifficulty);
    }

    #[test]
    fn stale_deal_is_discarded() {
        let mut session = Session::new();
        let token = session.start_game();
        session.generation_complete(token, create_board());

        let deal = session.begin_deal().unwrap();
        let puzzle = mask(session.solution().unwrap(), 10).unwrap();

        // New game invalidates the outstanding deal.
        session.start_game();
        assert!(!session.deal_complete(deal, puzzle));
        assert!(session.puzzle().is_none());
    }

    #[test]
    fn begin_deal_requires_a_board() {
        let mut session = Session::new();
        assert!(session.begin_deal().is_none());
        session.start_game();
        assert!(session.begin_deal().is_none());
    }

    #[test]
    fn guesses_outside_playing_are_refused() {
        let mut session = Session::new();
        assert!(session.submit_guess(0, 5).is_err());
        assert!(!session.submit_check());
    }
}
