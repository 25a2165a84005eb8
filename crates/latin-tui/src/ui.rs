use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
};

use crate::game::{Game, MAX_DIFFICULTY};
use latin_core::{Cell, Phase, SIZE};

// ── Constants ────────────────────────────────────────────────────────────────

// 10 cells of width 5 plus 11 vertical borders.
const GRID_WIDTH: u16 = 61;
// 10 cell rows plus 11 horizontal borders.
const GRID_HEIGHT: u16 = 21;

const SLIDER_WIDTH: usize = 40;

// ── Public entry point ───────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, game: &Game) {
    match game.phase() {
        Phase::AwaitingStart | Phase::Generating => draw_loading(f),
        Phase::SelectingDifficulty => draw_difficulty(f, game),
        Phase::Playing => draw_playing(f, game),
    }

    if let Some(position) = game.editing {
        draw_entry_popup(f, game, position);
    }
    if let Some(won) = game.verdict {
        draw_verdict(f, won);
    }
    if game.show_quit_confirm {
        draw_quit_confirm(f);
    }
}

// ── Loading screen ───────────────────────────────────────────────────────────

fn draw_loading(f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(6),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(center_rect(60, 12, area));

    let title_lines = vec![
        Line::from(Span::styled(
            r" ██╗      █████╗ ████████╗██╗███╗   ██╗",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            r" ██║     ██╔══██╗╚══██╔══╝██║████╗  ██║",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            r" ██║     ███████║   ██║   ██║██╔██╗ ██║",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            r" ██║     ██╔══██║   ██║   ██║██║╚██╗██║",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            r" ███████╗██║  ██║   ██║   ██║██║ ╚████║",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            r" ╚══════╝╚═╝  ╚═╝   ╚═╝   ╚═╝╚═╝  ╚═══╝",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];

    let title = Paragraph::new(title_lines).alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let dots = match (std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        / 250)
        % 4
    {
        0 => ".",
        1 => "..",
        2 => "...",
        _ => "",
    };
    let spinner = Paragraph::new(Line::from(Span::styled(
        format!("Building board{}", dots),
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);
    f.render_widget(spinner, chunks[3]);
}

// ── Difficulty screen ────────────────────────────────────────────────────────

fn draw_difficulty(f: &mut Frame, game: &Game) {
    let area = f.area();

    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(5),
        Constraint::Min(0),
    ])
    .split(center_rect(64, 16, area));

    let title = Paragraph::new(Line::from(Span::styled(
        "Select your difficulty",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let color = difficulty_color(game.squares_to_hide);
    let filled = game.squares_to_hide * SLIDER_WIDTH / MAX_DIFFICULTY;
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(SLIDER_WIDTH - filled)
    );
    let slider = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("◄ ", Style::default().fg(Color::DarkGray)),
            Span::styled(bar, Style::default().fg(color)),
            Span::styled(" ►", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} hidden cells", game.squares_to_hide),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(slider, chunks[3]);

    let controls = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("←/→", Style::default().fg(Color::Yellow)),
            Span::styled("       Adjust", Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)),
            Span::styled(" Adjust by 10", Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::styled("     Start game", Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::styled("         Quit", Style::default().fg(Color::Gray)),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(controls, chunks[5]);
}

// ── Playing screen ───────────────────────────────────────────────────────────

fn draw_playing(f: &mut Frame, game: &Game) {
    let area = f.area();

    let outer = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
    let main_area = outer[0];
    let bottom_area = outer[1];

    let h_chunks = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(GRID_WIDTH + 2),
        Constraint::Length(2),
        Constraint::Length(24),
        Constraint::Min(0),
    ])
    .split(main_area);

    let grid_v = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(GRID_HEIGHT + 2),
        Constraint::Min(0),
    ])
    .split(h_chunks[1]);

    draw_grid(f, game, grid_v[1]);

    let panel_v = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(10),
        Constraint::Min(0),
    ])
    .split(h_chunks[3]);

    draw_info_panel(f, game, panel_v[1]);
    draw_key_hints(f, bottom_area);
}

fn draw_grid(f: &mut Frame, game: &Game, area: Rect) {
    let Some(puzzle) = game.session.puzzle() else {
        return;
    };

    let mut lines: Vec<Line> = Vec::with_capacity(GRID_HEIGHT as usize);
    lines.push(horizontal_border('╔', '╤', '╗', '═'));

    for row in 0..SIZE {
        if row > 0 {
            lines.push(horizontal_border('╟', '┼', '╢', '─'));
        }

        let mut spans: Vec<Span> = Vec::with_capacity(2 * SIZE + 1);
        for col in 0..SIZE {
            let edge = if col == 0 { "║" } else { "│" };
            let edge_color = if col == 0 { Color::White } else { Color::DarkGray };
            spans.push(Span::styled(edge, Style::default().fg(edge_color)));

            let cell = puzzle[row * SIZE + col];
            let is_selected = row == game.selected_row && col == game.selected_col;
            spans.push(render_cell(cell, is_selected));
        }
        spans.push(Span::styled("║", Style::default().fg(Color::White)));
        lines.push(Line::from(spans));
    }

    lines.push(horizontal_border('╚', '╧', '╝', '═'));

    let block = Block::bordered()
        .title(" Latin ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::White));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_cell(cell: Cell, is_selected: bool) -> Span<'static> {
    let bg = if is_selected { Color::Yellow } else { Color::Reset };

    match cell {
        Cell::Given(v) => Span::styled(
            format!("  {}  ", v),
            Style::default()
                .fg(if is_selected { Color::Black } else { Color::White })
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Cell::UserInput(v) => Span::styled(
            format!("  {}  ", v),
            Style::default()
                .fg(if is_selected { Color::Black } else { Color::Cyan })
                .bg(bg),
        ),
        Cell::Empty => {
            if is_selected {
                Span::styled("  ·  ", Style::default().fg(Color::Black).bg(bg))
            } else {
                Span::styled("     ", Style::default().bg(bg))
            }
        }
    }
}

fn horizontal_border(left: char, cross: char, right: char, fill: char) -> Line<'static> {
    let mut s = String::with_capacity(GRID_WIDTH as usize);
    s.push(left);
    for col in 0..SIZE {
        if col > 0 {
            s.push(cross);
        }
        for _ in 0..5 {
            s.push(fill);
        }
    }
    s.push(right);

    let color = if fill == '═' { Color::White } else { Color::DarkGray };
    Line::from(Span::styled(s, Style::default().fg(color)))
}

// ── Info panel ───────────────────────────────────────────────────────────────

fn draw_info_panel(f: &mut Frame, game: &Game, area: Rect) {
    let block = Block::bordered()
        .title(" Info ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::White));

    let lines = vec![
        Line::from(vec![
            Span::styled(" Hidden:    ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", game.squares_to_hide),
                Style::default()
                    .fg(difficulty_color(game.squares_to_hide))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Remaining: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", game.remaining()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Filled:    ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", game.filled_count()),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Popups ───────────────────────────────────────────────────────────────────

fn draw_entry_popup(f: &mut Frame, game: &Game, position: usize) {
    let area = f.area();
    let popup = center_rect(30, 9, area);
    f.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" Enter number ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Cyan));

    let shown = game
        .entry
        .map(|v| v.to_string())
        .unwrap_or_else(|| "_".to_string());

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("R{} C{}", position / SIZE + 1, position % SIZE + 1),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            shown,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "0-9 type · Enter OK · Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(block)
    .alignment(Alignment::Center);

    f.render_widget(text, popup);
}

fn draw_verdict(f: &mut Frame, won: bool) {
    let area = f.area();
    let popup = center_rect(36, 8, area);
    f.render_widget(Clear, popup);

    let (title, message, color) = if won {
        (" Victory! ", "You win!", Color::Green)
    } else {
        (" Keep going ", "Not quite. Try again.", Color::Yellow)
    };

    let block = Block::bordered()
        .title(title)
        .border_type(BorderType::Double)
        .style(Style::default().fg(color));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(block)
    .alignment(Alignment::Center);

    f.render_widget(text, popup);
}

fn draw_quit_confirm(f: &mut Frame) {
    let area = f.area();
    let popup = center_rect(36, 7, area);
    f.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" Quit? ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Red));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Are you sure you want to quit?",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Y/Enter", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(" Yes   ", Style::default().fg(Color::Gray)),
            Span::styled("Any key", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled(" No", Style::default().fg(Color::Gray)),
        ]),
    ])
    .block(block)
    .alignment(Alignment::Center);

    f.render_widget(text, popup);
}

// ── Key hints (bottom status bar) ────────────────────────────────────────────

fn draw_key_hints(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled(" ←↑↓→", Style::default().fg(Color::Yellow)),
        Span::styled(" Move  ", Style::default().fg(Color::Gray)),
        Span::styled("Enter/0-9", Style::default().fg(Color::Yellow)),
        Span::styled(" Fill  ", Style::default().fg(Color::Gray)),
        Span::styled("c", Style::default().fg(Color::Yellow)),
        Span::styled(" Check answers  ", Style::default().fg(Color::Gray)),
        Span::styled("n", Style::default().fg(Color::Yellow)),
        Span::styled(" New game  ", Style::default().fg(Color::Gray)),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::styled(" Quit", Style::default().fg(Color::Gray)),
    ]);

    let bar = Paragraph::new(hints).style(Style::default().bg(Color::DarkGray));
    f.render_widget(bar, area);
}

// ── Layout helpers ───────────────────────────────────────────────────────────

fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vert = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .split(area);

    let horiz = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .split(vert[1]);

    horiz[1]
}

/// Color band for the hidden-cell count, mirroring the difficulty ramp of
/// the slider: more hidden cells, hotter color.
fn difficulty_color(squares_to_hide: usize) -> Color {
    match squares_to_hide {
        0..20 => Color::Cyan,
        20..30 => Color::Blue,
        30..40 => Color::Green,
        40..50 => Color::Yellow,
        _ => Color::Red,
    }
}
