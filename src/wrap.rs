//! Width-aware text primitives shared by the reflow engine and the man renderer.
//!
//! Widths are counted in code points. Terminal escape sequences (SGR styling,
//! charset selection, OSC hyperlinks) occupy no columns, so styled text wraps
//! and truncates the same way its plain form would.

const ESC: char = '\x1b';
/// Tab stops used when expanding leading tabs.
const TAB_WIDTH: usize = 8;

/// A piece of text: either one visible character or one whole escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Char(char),
    Escape(&'a str),
}

/// Iterator over the [`Segment`]s of a string.
pub struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let ch = self.rest.chars().next()?;
        if ch == ESC {
            let len = escape_len(self.rest);
            let (escape, rest) = self.rest.split_at(len);
            self.rest = rest;
            return Some(Segment::Escape(escape));
        }
        self.rest = &self.rest[ch.len_utf8()..];
        Some(Segment::Char(ch))
    }
}

pub fn segments(text: &str) -> Segments<'_> {
    Segments { rest: text }
}

/// Byte length of the escape sequence at the start of `text`.
fn escape_len(text: &str) -> usize {
    let mut chars = text.char_indices();
    chars.next();
    match chars.next() {
        Some((_, '[')) => {
            for (idx, ch) in chars {
                if ('@'..='~').contains(&ch) {
                    return idx + ch.len_utf8();
                }
            }
            text.len()
        }
        Some((_, ']')) => {
            let mut after_esc = false;
            for (idx, ch) in chars {
                if ch == '\x07' || (after_esc && ch == '\\') {
                    return idx + ch.len_utf8();
                }
                after_esc = ch == ESC;
            }
            text.len()
        }
        Some((_, '(')) | Some((_, ')')) => chars
            .next()
            .map(|(idx, ch)| idx + ch.len_utf8())
            .unwrap_or(text.len()),
        Some((idx, ch)) => idx + ch.len_utf8(),
        None => text.len(),
    }
}

/// Number of columns `text` occupies once escape sequences are ignored.
pub fn visible_width(text: &str) -> usize {
    segments(text)
        .filter(|segment| matches!(segment, Segment::Char(_)))
        .count()
}

/// Cut `text` down to `width` visible columns.
///
/// Escape sequences after the cut are kept so a style opened before it is
/// still closed.
pub fn truncate(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    for segment in segments(text) {
        match segment {
            Segment::Escape(escape) => out.push_str(escape),
            Segment::Char(ch) if used < width => {
                out.push(ch);
                used += 1;
            }
            Segment::Char(_) => {}
        }
    }
    out
}

/// Right-pad `text` with spaces to `width` visible columns.
pub fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(text));
    format!("{text}{}", " ".repeat(fill))
}

/// How the greedy filler treats words wider than a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WrapOptions {
    /// Split overlong words across lines instead of letting them overflow.
    pub break_long_words: bool,
}

/// Greedy word-wrap of `text` to `width` columns. Overlong words overflow.
///
/// Leading whitespace stays on the first line and counts toward its width.
/// Runs of whitespace between words collapse to one space.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    wrap_with(text, width, WrapOptions::default())
}

pub fn wrap_with(text: &str, width: usize, options: WrapOptions) -> Vec<String> {
    let (lead, body) = split_lead(text);
    fill(body.split_whitespace(), &lead, width, width, options)
}

/// Greedy fill of pre-split units where the first line and the continuation
/// lines have different widths. Units are never split or merged.
pub fn fill_hanging<'a, I>(units: I, first_width: usize, rest_width: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    fill(units, "", first_width, rest_width, WrapOptions::default())
}

/// Leading whitespace as spaces, tabs expanded to [`TAB_WIDTH`] stops, and
/// the text after it.
fn split_lead(text: &str) -> (String, &str) {
    let body = text.trim_start();
    let mut lead = String::new();
    for ch in text[..text.len() - body.len()].chars() {
        if ch == '\t' {
            lead.push_str(&" ".repeat(TAB_WIDTH - lead.len() % TAB_WIDTH));
        } else {
            lead.push(' ');
        }
    }
    (lead, body)
}

fn fill<'a, I>(
    words: I,
    lead: &str,
    first_width: usize,
    rest_width: usize,
    options: WrapOptions,
) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut filler = Filler::new(lead, first_width.max(1), rest_width.max(1));
    for word in words {
        let word_width = visible_width(word);
        if options.break_long_words && word_width > filler.width() {
            filler.push_breaking(word);
        } else {
            filler.push(word, word_width);
        }
    }
    filler.finish()
}

struct Filler {
    lines: Vec<String>,
    current: String,
    current_width: usize,
    /// Words on the current line; a line holding only the lead has none.
    words: usize,
    first_width: usize,
    rest_width: usize,
}

impl Filler {
    fn new(lead: &str, first_width: usize, rest_width: usize) -> Self {
        Self {
            lines: Vec::new(),
            current: lead.to_string(),
            current_width: lead.chars().count(),
            words: 0,
            first_width,
            rest_width,
        }
    }

    fn width(&self) -> usize {
        if self.lines.is_empty() {
            self.first_width
        } else {
            self.rest_width
        }
    }

    /// Columns still free on the current line, after the separating space.
    fn room(&self) -> usize {
        let used = self.current_width + usize::from(self.words > 0);
        self.width().saturating_sub(used)
    }

    fn push(&mut self, word: &str, word_width: usize) {
        if self.words > 0 && self.current_width + 1 + word_width > self.width() {
            self.flush();
        }
        if self.words == 0 && self.current_width + word_width > self.width() {
            // The lead is dropped rather than left alone on a line.
            self.current.clear();
            self.current_width = 0;
        }
        if self.words > 0 {
            self.current.push(' ');
            self.current_width += 1;
        }
        self.current.push_str(word);
        self.current_width += word_width;
        self.words += 1;
    }

    /// Fill what is left of the current line with the start of `word`, then
    /// carry the rest over as many lines as it takes.
    fn push_breaking(&mut self, word: &str) {
        let mut rest = word;
        while !rest.is_empty() {
            let room = self.room();
            if room == 0 {
                self.flush();
                continue;
            }
            let (head, tail) = split_visible_at(rest, room);
            self.push(head, visible_width(head));
            rest = tail;
        }
    }

    fn flush(&mut self) {
        if self.words > 0 {
            self.lines.push(std::mem::take(&mut self.current));
        }
        self.current.clear();
        self.current_width = 0;
        self.words = 0;
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.lines
    }
}

/// Split `word` after `width` visible columns. Escapes before the first
/// character past the cut stay with the head.
fn split_visible_at(word: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    let mut offset = 0;
    for segment in segments(word) {
        match segment {
            Segment::Escape(escape) => offset += escape.len(),
            Segment::Char(ch) => {
                if used == width {
                    break;
                }
                used += 1;
                offset += ch.len_utf8();
            }
        }
    }
    word.split_at(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOLD: &str = "\x1b[1m";
    const NORMAL: &str = "\x1b(B\x1b[m";

    #[test]
    fn width_ignores_style_escapes() {
        let styled = format!("{BOLD}spam{NORMAL} eggs");
        assert_eq!(visible_width(&styled), 9);
        assert_eq!(visible_width("\x1b]8;;https://example.org\x1b\\link\x1b]8;;\x1b\\"), 4);
    }

    #[test]
    fn wrap_is_greedy() {
        let lines = wrap("spam eggs bacon ham baked beans", 20);
        assert_eq!(lines, vec!["spam eggs bacon ham", "baked beans"]);
    }

    #[test]
    fn wrap_keeps_overlong_words_whole() {
        let lines = wrap("a supercalifragilistic word", 8);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "word"]);
    }

    #[test]
    fn wrap_can_break_overlong_words() {
        let options = WrapOptions {
            break_long_words: true,
        };
        let lines = wrap_with("abcdefghij", 4, options);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_of_blank_text_is_empty() {
        assert!(wrap("   ", 10).is_empty());
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn wrap_measures_visible_width() {
        let word = format!("{BOLD}spam{NORMAL}");
        let text = format!("{word} {word} {word}");
        let lines = wrap(&text, 9);
        assert_eq!(lines, vec![format!("{word} {word}"), word.clone()]);
    }

    #[test]
    fn wrap_keeps_first_line_indent() {
        assert_eq!(wrap("    spam eggs bacon", 12), vec!["    spam", "eggs bacon"]);
        assert_eq!(wrap("\tspam", 20), vec!["        spam"]);
    }

    #[test]
    fn indent_is_dropped_when_first_word_cannot_follow_it() {
        assert_eq!(wrap("      abcdefgh", 10), vec!["abcdefgh"]);
    }

    #[test]
    fn broken_words_fill_the_rest_of_the_line() {
        let options = WrapOptions {
            break_long_words: true,
        };
        let lines = wrap_with("a abcdefghijkl", 10, options);
        assert_eq!(lines, vec!["a abcdefgh", "ijkl"]);
    }

    #[test]
    fn hanging_fill_uses_narrower_continuation() {
        let units = ["spam", "[-s spam]", "[-e eggs]", "[-b bacon]"];
        let lines = fill_hanging(units, 24, 19);
        assert_eq!(lines, vec!["spam [-s spam] [-e eggs]", "[-b bacon]"]);
    }

    #[test]
    fn truncate_counts_visible_columns() {
        assert_eq!(truncate("spam eggs bacon", 6), "spam e");
        let styled = format!("{BOLD}spam eggs{NORMAL}");
        assert_eq!(truncate(&styled, 4), format!("{BOLD}spam{NORMAL}"));
    }

    #[test]
    fn pad_fills_to_width() {
        assert_eq!(pad("*", 4), "*   ");
        assert_eq!(pad("spam", 2), "spam");
    }
}
