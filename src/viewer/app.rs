//! Viewer state: the pager, the page on display and what keys currently mean.
use super::commands::{build_commands, flow_choice, flow_commands, Command};
use super::frame::BoxChars;
use super::page_geometry;
use crate::pager::{Navigation, Pager};

pub(super) const JUMP_PROMPT: &str = "Jump to page";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Mode {
    Reading,
    /// Waiting for the key that picks a wrap mode.
    ChoosingFlow,
    /// Collecting a page number.
    Jumping { input: String },
}

pub(super) struct App {
    pub(super) pager: Pager,
    pub(super) nav: Navigation,
    pub(super) chars: BoxChars,
    pub(super) mode: Mode,
    /// Feedback from the last action, cleared by the next one.
    pub(super) message: Option<String>,
}

impl App {
    pub(super) fn new(pager: Pager, chars: BoxChars) -> Self {
        Self {
            pager,
            nav: Navigation::default(),
            chars,
            mode: Mode::Reading,
            message: None,
        }
    }

    /// Re-derive page geometry from the terminal size.
    pub(super) fn resize(&mut self, rows: u16, cols: u16) {
        let (height, width) = page_geometry(rows, cols);
        self.pager.set_geometry(height, width);
        self.nav.clamp(&self.pager);
        tracing::debug!(rows, cols, height, width, "terminal resized");
    }

    pub(super) fn back(&mut self) {
        self.message = None;
        self.nav.back();
    }

    pub(super) fn next(&mut self) {
        self.message = None;
        self.nav.next(&self.pager);
    }

    pub(super) fn start_jump(&mut self) {
        self.message = None;
        self.mode = Mode::Jumping {
            input: String::new(),
        };
    }

    pub(super) fn push_input(&mut self, ch: char) {
        if let Mode::Jumping { input } = &mut self.mode {
            input.push(ch);
        }
    }

    pub(super) fn pop_input(&mut self) {
        if let Mode::Jumping { input } = &mut self.mode {
            input.pop();
        }
    }

    pub(super) fn submit_jump(&mut self) {
        let Mode::Jumping { input } = std::mem::replace(&mut self.mode, Mode::Reading) else {
            return;
        };
        if let Err(err) = self.nav.jump_to_input(&input, &self.pager) {
            tracing::info!(error = %err, "jump rejected");
            self.message = Some(err.to_string());
        }
    }

    pub(super) fn cancel(&mut self) {
        self.mode = Mode::Reading;
    }

    pub(super) fn start_flow(&mut self) {
        self.message = None;
        self.mode = Mode::ChoosingFlow;
    }

    pub(super) fn choose_flow(&mut self, key: char) {
        let wrap_mode = flow_choice(key);
        tracing::info!(from = %self.pager.wrap_mode(), to = %wrap_mode, "reflowing document");
        self.nav.reflow(&mut self.pager, wrap_mode);
        self.mode = Mode::Reading;
    }

    pub(super) fn commands(&self) -> Vec<Command> {
        match self.mode {
            Mode::ChoosingFlow => flow_commands(),
            _ => build_commands(self.nav.current(), self.pager.page_count()),
        }
    }

    /// `current/count`, one-based.
    pub(super) fn status(&self) -> String {
        format!("{}/{}", self.nav.current() + 1, self.pager.page_count())
    }
}
