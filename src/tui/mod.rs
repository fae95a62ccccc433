// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Live editor shell (ratatui + crossterm): the DSL on the left, the rendered diagram on the right,
//! parse errors and layout warnings in a one-line notice bar.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, size as terminal_size, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{AppContext, DIAGRAM_PANE_PERCENT};

mod editor;

use editor::Editor;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const NOTICE_COLOR: Color = Color::Yellow;
const HELP_COLOR: Color = Color::Gray;
const FOCUS_COLOR: Color = Color::LightGreen;
const HELP_TEXT: &str = "Esc quit · A -> B: label · <- <= => arrows · /X ends X · X/ one-shot";

/// Runs the interactive editor, optionally seeded with `initial_text`.
pub fn run(initial_text: &str) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let (width, height) = terminal_size()?;
    let mut app = App::new(initial_text, width, height);

    while !app.should_quit {
        if app.context.debouncer().is_pending() {
            app.context.poll_parse(&app.editor.text(), Instant::now());
        }
        terminal.draw(|frame| draw(frame, &app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                }
                Event::Resize(width, height) => app.context.resize(width, height, Instant::now()),
                _ => {}
            }
        }
    }

    Ok(())
}

struct App {
    editor: Editor,
    context: AppContext,
    should_quit: bool,
}

impl App {
    fn new(initial_text: &str, width: u16, height: u16) -> Self {
        let editor = Editor::from_text(initial_text);
        let mut context = AppContext::new(width, height);
        context.run_parse(&editor.text());
        Self { editor, context, should_quit: false }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl_c =
            key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'));
        if key.code == KeyCode::Esc || ctrl_c {
            self.should_quit = true;
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }

        let changed = self.editor.apply(key.code);
        if changed {
            self.context.note_key(key.code, now);
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.size());
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100 - DIAGRAM_PANE_PERCENT),
            Constraint::Percentage(DIAGRAM_PANE_PERCENT),
        ])
        .split(rows[0]);

    draw_input(frame, app, panes[0]);

    let diagram = Paragraph::new(app.context.rendered().unwrap_or_default().to_owned())
        .block(Block::default().borders(Borders::ALL).title("Diagram"));
    frame.render_widget(diagram, panes[1]);

    let notice = match app.context.notice() {
        Some(notice) => Line::styled(notice.to_owned(), Style::default().fg(NOTICE_COLOR)),
        None => Line::styled(HELP_TEXT, Style::default().fg(HELP_COLOR)),
    };
    frame.render_widget(Paragraph::new(notice), rows[1]);
}

fn draw_input(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let (row, col) = app.editor.cursor();
    let inner_height = usize::from(area.height.saturating_sub(2)).max(1);
    let scroll_y = row.saturating_sub(inner_height - 1);

    let input = Paragraph::new(app.editor.text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Input")
                .border_style(Style::default().fg(FOCUS_COLOR)),
        )
        .scroll((u16::try_from(scroll_y).unwrap_or(u16::MAX), 0));
    frame.render_widget(input, area);

    if area.width > 2 && area.height > 2 {
        let x = area.x + 1 + u16::try_from(col).unwrap_or(u16::MAX).min(area.width - 3);
        let y = area.y + 1 + u16::try_from(row - scroll_y).unwrap_or(0);
        frame.set_cursor(x, y);
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
