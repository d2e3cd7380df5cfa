//! TUI event loop for the viewer.

use super::app::{App, Mode};
use super::external::TerminalGuard;
use super::frame::BoxChars;
use super::EVENT_POLL_MS;
use crate::pager::Pager;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use std::io;
use std::time::Duration;

pub(super) fn run_tui(pager: Pager, chars: BoxChars) -> Result<()> {
    let mut app = App::new(pager, chars);

    let guard = TerminalGuard::enter()?;
    let mut terminal = {
        let stdout = io::stdout();
        let backend = CrosstermBackend::new(stdout);
        ratatui::Terminal::new(backend).context("init terminal")?
    };
    let size = terminal.size().context("query terminal size")?;
    app.resize(size.height, size.width);

    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .context("draw viewer")?;

        if !event::poll(Duration::from_millis(EVENT_POLL_MS)).context("poll event")? {
            continue;
        }
        match event::read().context("read event")? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let Some(action) = action_from_key(key, &app.mode) else {
                    continue;
                };
                match action {
                    Action::Exit => break,
                    Action::Back => app.back(),
                    Action::Next => app.next(),
                    Action::Jump => app.start_jump(),
                    Action::Flow => app.start_flow(),
                    Action::ChooseFlow(key) => app.choose_flow(key),
                    Action::Input(ch) => app.push_input(ch),
                    Action::Erase => app.pop_input(),
                    Action::Submit => app.submit_jump(),
                    Action::Cancel => app.cancel(),
                }
            }
            Event::Resize(cols, rows) => app.resize(rows, cols),
            _ => {}
        }
    }

    drop(guard);
    terminal.show_cursor().ok();
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Back,
    Next,
    Jump,
    Flow,
    Exit,
    ChooseFlow(char),
    Input(char),
    Erase,
    Submit,
    Cancel,
}

fn action_from_key(key: KeyEvent, mode: &Mode) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Exit);
    }
    match mode {
        Mode::Reading => match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::PageUp => Some(Action::Back),
            KeyCode::Right | KeyCode::Down | KeyCode::PageDown => Some(Action::Next),
            KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
                'b' => Some(Action::Back),
                'n' | ' ' => Some(Action::Next),
                'j' => Some(Action::Jump),
                'f' => Some(Action::Flow),
                'x' | 'q' => Some(Action::Exit),
                _ => None,
            },
            _ => None,
        },
        // Any key picks; keys that name no mode fall back to detection.
        Mode::ChoosingFlow => match key.code {
            KeyCode::Char(ch) => Some(Action::ChooseFlow(ch)),
            _ => Some(Action::ChooseFlow('d')),
        },
        Mode::Jumping { .. } => match key.code {
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Backspace => Some(Action::Erase),
            KeyCode::Char(ch) => Some(Action::Input(ch)),
            _ => None,
        },
    }
}
