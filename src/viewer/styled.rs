//! Convert page lines carrying terminal escapes into styled ratatui lines.
//!
//! Only the escapes the man renderer emits matter here: SGR bold, underline,
//! reverse and reset, and OSC 8 hyperlinks. Link targets are dropped and the
//! link text is underlined. Everything else is swallowed.
use crate::wrap::{segments, Segment};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

const TAB_STOP: usize = 8;

/// Styles persist across line breaks, matching how a terminal would show
/// the same text.
pub(super) fn page_lines(page: &[String]) -> Vec<Line<'static>> {
    let mut state = EscapeState::default();
    page.iter().map(|line| state.line(line)).collect()
}

#[derive(Debug, Default)]
struct EscapeState {
    sgr: Style,
    in_link: bool,
}

impl EscapeState {
    fn style(&self) -> Style {
        if self.in_link {
            self.sgr.add_modifier(Modifier::UNDERLINED)
        } else {
            self.sgr
        }
    }

    fn line(&mut self, text: &str) -> Line<'static> {
        let mut spans = Vec::new();
        let mut current = String::new();
        let mut column = 0;
        let mut style = self.style();
        for segment in segments(text) {
            match segment {
                Segment::Escape(escape) => {
                    self.apply(escape);
                    let next = self.style();
                    if next != style {
                        if !current.is_empty() {
                            spans.push(Span::styled(std::mem::take(&mut current), style));
                        }
                        style = next;
                    }
                }
                Segment::Char('\t') => {
                    let fill = TAB_STOP - column % TAB_STOP;
                    current.push_str(&" ".repeat(fill));
                    column += fill;
                }
                Segment::Char(ch) if ch.is_control() => {}
                Segment::Char(ch) => {
                    current.push(ch);
                    column += 1;
                }
            }
        }
        if !current.is_empty() {
            spans.push(Span::styled(current, style));
        }
        Line::from(spans)
    }

    fn apply(&mut self, escape: &str) {
        if let Some(params) = escape
            .strip_prefix("\x1b[")
            .and_then(|rest| rest.strip_suffix('m'))
        {
            self.apply_sgr(params);
        } else if let Some(rest) = escape.strip_prefix("\x1b]8;") {
            // `params;target` then ST or BEL; an empty target closes the link.
            let body = rest
                .trim_end_matches('\x07')
                .trim_end_matches("\x1b\\");
            let target = body.split_once(';').map(|(_, target)| target).unwrap_or("");
            self.in_link = !target.is_empty();
        }
    }

    fn apply_sgr(&mut self, params: &str) {
        if params.is_empty() {
            self.sgr = Style::default();
            return;
        }
        for param in params.split(';') {
            match param {
                "" | "0" => self.sgr = Style::default(),
                "1" => self.sgr = self.sgr.add_modifier(Modifier::BOLD),
                "4" => self.sgr = self.sgr.add_modifier(Modifier::UNDERLINED),
                "7" => self.sgr = self.sgr.add_modifier(Modifier::REVERSED),
                "22" => self.sgr = self.sgr.remove_modifier(Modifier::BOLD),
                "24" => self.sgr = self.sgr.remove_modifier(Modifier::UNDERLINED),
                "27" => self.sgr = self.sgr.remove_modifier(Modifier::REVERSED),
                _ => {}
            }
        }
    }
}
