//! Turn raw document text into a flat sequence of display lines.
use crate::man::{render_document, Styles};
use crate::wrap::{truncate, visible_width, wrap, wrap_with, WrapOptions};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// How raw text is broken into display lines.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Undo hard wrapping, keep bullet lines, rewrap paragraphs
    #[default]
    Detect,
    /// Only wrap lines longer than the page
    Long,
    /// Render the man macro subset
    Man,
    /// Truncate every line at the page edge
    #[value(alias = "no_wrap", alias = "none")]
    NoWrap,
}

impl WrapMode {
    pub fn as_str(self) -> &'static str {
        match self {
            WrapMode::Detect => "detect",
            WrapMode::Long => "long",
            WrapMode::Man => "man",
            WrapMode::NoWrap => "no_wrap",
        }
    }
}

impl fmt::Display for WrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reflow `text` to `width` columns. `styles` only affects man documents.
pub fn reflow(text: &str, width: usize, mode: WrapMode, styles: &Styles) -> Vec<String> {
    let width = width.max(1);
    let lines = match mode {
        WrapMode::Detect => detect(text, width),
        WrapMode::Long => long(text, width),
        WrapMode::Man => render_document(text, Some(width), styles)
            .split('\n')
            .map(str::to_string)
            .collect(),
        WrapMode::NoWrap => no_wrap(text, width),
    };
    tracing::debug!(mode = %mode, width, lines = lines.len(), "reflowed text");
    lines
}

fn bullet_pattern() -> &'static Regex {
    static BULLET: OnceLock<Regex> = OnceLock::new();
    BULLET.get_or_init(|| Regex::new(r"^\s*[*]\s").expect("regex for bullet lines"))
}

/// Lines matching the bullet pattern are already broken correctly.
pub fn is_bullet(line: &str) -> bool {
    bullet_pattern().is_match(line)
}

/// Single newlines are hard wrapping and become spaces; blank lines end a
/// paragraph. Bullet lines stand alone untouched. Every paragraph is
/// followed by one blank line.
fn detect(text: &str, width: usize) -> Vec<String> {
    let mut paragraphs: Vec<Vec<String>> = Vec::new();
    let mut prose: Vec<&str> = Vec::new();

    let flush = |prose: &mut Vec<&str>, paragraphs: &mut Vec<Vec<String>>| {
        if prose.is_empty() {
            return;
        }
        let wrapped = wrap(&prose.join(" "), width);
        prose.clear();
        if !wrapped.is_empty() {
            paragraphs.push(wrapped);
        }
    };

    for line in text.split('\n') {
        if line.trim().is_empty() {
            flush(&mut prose, &mut paragraphs);
        } else if is_bullet(line) {
            flush(&mut prose, &mut paragraphs);
            paragraphs.push(vec![line.to_string()]);
        } else {
            prose.push(line);
        }
    }
    flush(&mut prose, &mut paragraphs);

    let mut lines = Vec::new();
    for paragraph in paragraphs {
        lines.extend(paragraph);
        lines.push(String::new());
    }
    lines
}

fn long(text: &str, width: usize) -> Vec<String> {
    let options = WrapOptions {
        break_long_words: true,
    };
    let mut lines = Vec::new();
    for line in text.split('\n') {
        if visible_width(line) <= width {
            lines.push(line.to_string());
        } else {
            lines.extend(wrap_with(line, width, options));
        }
    }
    lines
}

fn no_wrap(text: &str, width: usize) -> Vec<String> {
    text.split('\n')
        .map(|line| truncate(line, width).trim_end().to_string())
        .collect()
}
