use latin_core::{Phase, SIZE, Session};

/// Slider maximum for the number of hidden cells, matching the range the
/// difficulty selector exposes.
pub const MAX_DIFFICULTY: usize = 80;
pub const DEFAULT_DIFFICULTY: usize = 30;

/// Everything the TUI needs on top of the core session: cursor, difficulty
/// slider, and the transient popups (numeric entry, verdict, quit confirm).
pub struct Game {
    pub session: Session,
    pub selected_row: usize,
    pub selected_col: usize,
    pub squares_to_hide: usize,
    /// Position being edited while the numeric entry popup is open.
    pub editing: Option<usize>,
    /// Digit typed into the entry popup, not yet submitted.
    pub entry: Option<u8>,
    /// Result of the last answer check, shown as a popup until dismissed.
    pub verdict: Option<bool>,
    pub show_quit_confirm: bool,
}

impl Game {
    pub fn new() -> Self {
        Self {
            session: Session::new(),
            selected_row: 4,
            selected_col: 4,
            squares_to_hide: DEFAULT_DIFFICULTY,
            editing: None,
            entry: None,
            verdict: None,
            show_quit_confirm: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn move_cursor(&mut self, dr: i32, dc: i32) {
        self.selected_row = (self.selected_row as i32 + dr).rem_euclid(SIZE as i32) as usize;
        self.selected_col = (self.selected_col as i32 + dc).rem_euclid(SIZE as i32) as usize;
    }

    pub fn selected_position(&self) -> usize {
        self.selected_row * SIZE + self.selected_col
    }

    pub fn adjust_difficulty(&mut self, delta: i32) {
        let next = self.squares_to_hide as i32 + delta;
        self.squares_to_hide = next.clamp(0, MAX_DIFFICULTY as i32) as usize;
    }

    /// Open the numeric entry popup, but only on an editable cell.
    pub fn open_entry(&mut self) {
        if self.phase() != Phase::Playing {
            return;
        }
        let position = self.selected_position();
        if let Some(puzzle) = self.session.puzzle() {
            if puzzle[position].can_edit() {
                self.editing = Some(position);
                self.entry = None;
            }
        }
    }

    pub fn cancel_entry(&mut self) {
        self.editing = None;
        self.entry = None;
    }

    /// Submit the typed digit. The popup only ever holds 0..=9, so the core
    /// precondition is already met; a refusal (e.g. the cell was a given)
    /// just closes the popup without mutating anything.
    pub fn submit_entry(&mut self) {
        if let (Some(position), Some(value)) = (self.editing, self.entry) {
            if let Err(e) = self.session.submit_guess(position, value) {
                log::debug!("guess refused: {}", e);
            }
        }
        self.cancel_entry();
    }

    pub fn check_answers(&mut self) {
        if self.phase() == Phase::Playing {
            self.verdict = Some(self.session.submit_check());
        }
    }

    /// Number of cells still hidden on the board in play.
    pub fn remaining(&self) -> usize {
        self.session
            .puzzle()
            .map(|p| p.iter().filter(|c| c.is_empty()).count())
            .unwrap_or(0)
    }

    /// Number of cells the user has filled so far.
    pub fn filled_count(&self) -> usize {
        self.session
            .puzzle()
            .map(|p| p.iter().filter(|c| c.is_user_input()).count())
            .unwrap_or(0)
    }

    /// Leaving for a new game drops every popup along with the old boards.
    pub fn reset_ui(&mut self) {
        self.selected_row = 4;
        self.selected_col = 4;
        self.editing = None;
        self.entry = None;
        self.verdict = None;
        self.show_quit_confirm = false;
    }
}
