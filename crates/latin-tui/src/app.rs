use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures_util::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::game::Game;
use crate::ui;
use latin_core::{GenerationToken, Phase, Puzzle, Solution, create_board, mask};

/// Pause before a generated board is delivered, so the loading screen is
/// visible rather than a flicker.
const LOADING_DELAY: Duration = Duration::from_millis(500);
/// Shorter pause for the deal; it reads as the board "being laid out".
const DEAL_DELAY: Duration = Duration::from_millis(150);

/// Results of deferred core work, delivered back to the event loop with the
/// token captured when the work was scheduled. The session drops anything
/// whose token has gone stale.
enum CoreResult {
    Board(GenerationToken, Solution),
    Deal(GenerationToken, Puzzle),
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async_run())
}

async fn async_run() -> Result<(), Box<dyn std::error::Error>> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut event_stream = EventStream::new();
    let tick_rate = Duration::from_millis(250);

    let (tx, mut rx) = mpsc::unbounded_channel::<CoreResult>();

    let mut game = Game::new();
    spawn_generation(&mut game, &tx);

    loop {
        terminal.draw(|f| ui::draw(f, &game))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                if let Some(Ok(Event::Key(key))) = maybe_event {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key(&mut game, key, &tx) {
                        return Ok(());
                    }
                }
            }
            core_result = rx.recv() => {
                if let Some(result) = core_result {
                    handle_core_result(&mut game, result);
                }
            }
            _ = tokio::time::sleep(tick_rate) => {}
        }
    }
}

/// Kick off board generation for a fresh game. The artificial delay keeps
/// the loading screen on screen for a beat.
fn spawn_generation(game: &mut Game, tx: &mpsc::UnboundedSender<CoreResult>) {
    game.reset_ui();
    let token = game.session.start_game();
    let tx = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(LOADING_DELAY).await;
        let board = create_board();
        let _ = tx.send(CoreResult::Board(token, board));
    });
}

/// Kick off the deferred deal for the chosen difficulty.
fn spawn_deal(game: &mut Game, tx: &mpsc::UnboundedSender<CoreResult>) {
    let Some(token) = game.session.begin_deal() else {
        return;
    };
    let Some(&solution) = game.session.solution() else {
        return;
    };
    let squares_to_hide = game.squares_to_hide;
    let tx = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(DEAL_DELAY).await;
        match mask(&solution, squares_to_hide) {
            Ok(puzzle) => {
                let _ = tx.send(CoreResult::Deal(token, puzzle));
            }
            Err(e) => log::error!("deal failed: {}", e),
        }
    });
}

fn handle_core_result(game: &mut Game, result: CoreResult) {
    match result {
        CoreResult::Board(token, board) => {
            game.session.generation_complete(token, board);
        }
        CoreResult::Deal(token, puzzle) => {
            if game.session.deal_complete(token, puzzle) {
                game.reset_ui();
            }
        }
    }
}

/// Returns true when the app should exit.
fn handle_key(game: &mut Game, key: KeyEvent, tx: &mpsc::UnboundedSender<CoreResult>) -> bool {
    if game.show_quit_confirm {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return true,
            _ => game.show_quit_confirm = false,
        }
        return false;
    }

    match game.phase() {
        Phase::AwaitingStart | Phase::Generating => handle_loading_key(game, key),
        Phase::SelectingDifficulty => handle_difficulty_key(game, key, tx),
        Phase::Playing => handle_playing_key(game, key, tx),
    }
}

fn handle_loading_key(game: &mut Game, key: KeyEvent) -> bool {
    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
        game.show_quit_confirm = true;
    }
    false
}

fn handle_difficulty_key(
    game: &mut Game,
    key: KeyEvent,
    tx: &mpsc::UnboundedSender<CoreResult>,
) -> bool {
    match key.code {
        KeyCode::Left | KeyCode::Down => game.adjust_difficulty(-1),
        KeyCode::Right | KeyCode::Up => game.adjust_difficulty(1),
        KeyCode::PageDown => game.adjust_difficulty(-10),
        KeyCode::PageUp => game.adjust_difficulty(10),
        KeyCode::Enter => spawn_deal(game, tx),
        KeyCode::Char('q') | KeyCode::Esc => game.show_quit_confirm = true,
        _ => {}
    }
    false
}

fn handle_playing_key(
    game: &mut Game,
    key: KeyEvent,
    tx: &mpsc::UnboundedSender<CoreResult>,
) -> bool {
    // Verdict popup swallows the next key.
    if game.verdict.is_some() {
        game.verdict = None;
        return false;
    }

    if game.editing.is_some() {
        match key.code {
            KeyCode::Char(c @ '0'..='9') => game.entry = Some(c as u8 - b'0'),
            KeyCode::Backspace | KeyCode::Delete => game.entry = None,
            KeyCode::Enter => game.submit_entry(),
            KeyCode::Esc => game.cancel_entry(),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Up => game.move_cursor(-1, 0),
        KeyCode::Down => game.move_cursor(1, 0),
        KeyCode::Left => game.move_cursor(0, -1),
        KeyCode::Right => game.move_cursor(0, 1),
        KeyCode::Enter => game.open_entry(),
        KeyCode::Char(c @ '0'..='9') => {
            // Typing a digit on an editable cell opens the popup pre-filled.
            game.open_entry();
            if game.editing.is_some() {
                game.entry = Some(c as u8 - b'0');
            }
        }
        KeyCode::Char('c') | KeyCode::Char('C') => game.check_answers(),
        KeyCode::Char('n') | KeyCode::Char('N') => spawn_generation(game, tx),
        KeyCode::Char('q') | KeyCode::Esc => game.show_quit_confirm = true,
        _ => {}
    }
    false
}
