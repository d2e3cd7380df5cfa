//! Command hints shown on the bottom border.
use crate::reflow::WrapMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Command {
    pub key: char,
    pub name: &'static str,
}

impl Command {
    const fn new(key: char, name: &'static str) -> Self {
        Self { key, name }
    }

    /// The name with its key letter upper-cased, e.g. `Back`, `eXit`.
    pub fn label(&self) -> String {
        let mut upper_done = false;
        self.name
            .chars()
            .map(|ch| {
                if !upper_done && ch == self.key {
                    upper_done = true;
                    ch.to_ascii_uppercase()
                } else {
                    ch
                }
            })
            .collect()
    }
}

/// Commands available while reading `page` (zero-based) of `page_count`.
pub(super) fn build_commands(page: usize, page_count: usize) -> Vec<Command> {
    let mut commands = Vec::with_capacity(5);
    if page > 0 {
        commands.push(Command::new('b', "back"));
    }
    commands.push(Command::new('f', "flow"));
    commands.push(Command::new('j', "jump"));
    if page + 1 < page_count {
        commands.push(Command::new('n', "next"));
    }
    commands.push(Command::new('x', "exit"));
    commands
}

/// Choices offered after `flow`.
pub(super) fn flow_commands() -> Vec<Command> {
    vec![
        Command::new('n', "none"),
        Command::new('d', "detect"),
        Command::new('l', "long"),
        Command::new('m', "man"),
    ]
}

/// Wrap mode picked by a key pressed at the flow prompt. Unlisted keys
/// fall back to detection.
pub(super) fn flow_choice(key: char) -> WrapMode {
    match key.to_ascii_lowercase() {
        'n' => WrapMode::NoWrap,
        'l' => WrapMode::Long,
        'm' => WrapMode::Man,
        _ => WrapMode::Detect,
    }
}
