//! Render lexed man tokens into formatted, wrapped text.
//!
//! The renderer threads a margin (moved only by `.RS`/`.RE`) and an ambient
//! body indent through the token sequence. Each token renders itself against
//! the width left after the margin; the margin is then added to every
//! non-blank line it produced.
use super::lexer::lex;
use super::style::Styles;
use super::token::{
    CommandOption, Font, Heading, Hyperlink, Synopsis, Title, Token, DEFAULT_INDENT,
};
use crate::wrap::{fill_hanging, pad, truncate, visible_width, wrap};

/// Width used when the caller does not supply one.
pub const DEFAULT_WIDTH: usize = 80;

/// Indent of section and subheading bodies.
const SECTION_INDENT: usize = 4;
/// Lead before a subheading's heading line.
const SUBHEADING_LEAD: usize = 2;

/// Output of rendering one token: its text and the indent that applies to
/// the paragraphs after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub indent: usize,
}

#[derive(Debug, Clone, Copy)]
struct RenderState {
    margin: usize,
    indent: usize,
}

/// Lex and render a man document.
pub fn render_document(text: &str, width: Option<usize>, styles: &Styles) -> String {
    render(&lex(text), width, styles)
}

/// Render a token sequence to a single string. The title footer, if any, is
/// appended after everything else.
pub fn render(tokens: &[Token], width: Option<usize>, styles: &Styles) -> String {
    let width = width.unwrap_or(DEFAULT_WIDTH).max(1);
    let mut state = RenderState {
        margin: 0,
        indent: DEFAULT_INDENT,
    };
    let mut out = String::new();
    let mut footer = None;

    for token in tokens {
        match token {
            Token::RelativeIndentStart(step) => {
                state.margin = state.margin.saturating_add(*step);
                continue;
            }
            Token::RelativeIndentEnd(step) => {
                if *step > state.margin {
                    tracing::debug!(
                        margin = state.margin,
                        step,
                        "relative indent end past the left edge; clamping to zero"
                    );
                }
                state.margin = state.margin.saturating_sub(*step);
                continue;
            }
            Token::Section(_) => state.margin = 0,
            Token::Title(title) => footer = Some(title.footer(width)),
            _ => {}
        }

        // At least one column is always left for the text itself.
        let margin = state.margin.min(width - 1);
        let rendered = token.parse(width - margin, state.indent, styles);
        push_with_margin(&mut out, &rendered.text, margin);
        if token.is_block() && !rendered.text.is_empty() {
            out.push('\n');
        }
        state.indent = rendered.indent;
    }

    if let Some(footer) = footer {
        out.push_str(&footer);
    }
    out
}

fn push_with_margin(out: &mut String, text: &str, margin: usize) {
    if margin == 0 {
        out.push_str(text);
        return;
    }
    let lead = " ".repeat(margin);
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            out.push_str(&lead);
        }
        out.push_str(line);
    }
}

impl Token {
    /// Render this token at `width` columns with `indent` as the ambient
    /// paragraph indent.
    pub fn parse(&self, width: usize, indent: usize, styles: &Styles) -> Rendered {
        let keep = |text: String| Rendered { text, indent };
        match self {
            Token::Text(text) | Token::Empty(text) => keep(format!("{text}\n")),
            Token::Title(title) => keep(title.header(width)),
            Token::Section(heading) => Rendered {
                text: heading.parse(styles.bold(&heading.heading), width, styles),
                indent: DEFAULT_INDENT,
            },
            Token::Subheading(heading) => {
                let line = format!(
                    "{}{}",
                    " ".repeat(SUBHEADING_LEAD),
                    styles.bold(&heading.heading)
                );
                Rendered {
                    text: heading.parse(line, width, styles),
                    indent: DEFAULT_INDENT,
                }
            }
            Token::Paragraph(contents) => Rendered {
                text: tagged_body(&[], contents, width, DEFAULT_INDENT, styles),
                indent: DEFAULT_INDENT,
            },
            Token::IndentedParagraph(paragraph) => {
                let indent = paragraph.indent.unwrap_or(indent);
                let tags: Vec<String> = paragraph.tag.iter().cloned().collect();
                Rendered {
                    text: tagged_body(&tags, &paragraph.contents, width, indent, styles),
                    indent,
                }
            }
            Token::TaggedParagraph(paragraph) => {
                let indent = paragraph.indent.unwrap_or(indent);
                let tags: Vec<String> = paragraph
                    .tags
                    .iter()
                    .map(|tag| inline(tag, width, styles))
                    .collect();
                Rendered {
                    text: tagged_body(&tags, &paragraph.contents, width, indent, styles),
                    indent,
                }
            }
            Token::Example(lines) => keep(
                lines
                    .iter()
                    .map(|line| format!("{}\n", truncate(&inline(line, width, styles), width)))
                    .collect(),
            ),
            Token::Synopsis(synopsis) => keep(synopsis.parse(width, styles)),
            Token::RelativeIndentStart(_) | Token::RelativeIndentEnd(_) => keep(String::new()),
            Token::Option(_) | Token::EmailAddress(_) | Token::Url(_) | Token::Font(..) => {
                keep(format!("{}\n", inline(self, width, styles)))
            }
        }
    }
}

/// Single-line rendering for tokens that sit inside running text.
fn inline(token: &Token, width: usize, styles: &Styles) -> String {
    match token {
        Token::Text(text) | Token::Empty(text) => text.clone(),
        Token::Font(font, text) => font.render(text, styles),
        Token::Option(option) => option.render(styles),
        Token::EmailAddress(link) => link.render("mailto:", width, styles),
        Token::Url(link) => link.render("", width, styles),
        other => other
            .parse(width, DEFAULT_INDENT, styles)
            .text
            .trim_end_matches('\n')
            .to_string(),
    }
}

fn inline_text(contents: &[Token], width: usize, styles: &Styles) -> String {
    contents
        .iter()
        .map(|token| inline(token, width, styles))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Paragraph body wrapped at `width - indent` and indented by `indent`.
///
/// Every tag but the last gets its own line. The last tag shares a line with
/// the first body line when it is narrower than the indent.
fn tagged_body(
    tags: &[String],
    contents: &[Token],
    width: usize,
    indent: usize,
    styles: &Styles,
) -> String {
    let indent = indent.min(width.saturating_sub(1));
    let lead = " ".repeat(indent);
    let mut lines = wrap(
        &inline_text(contents, width, styles),
        width.saturating_sub(indent),
    )
    .into_iter();
    let mut out = String::new();

    let tags: Vec<&String> = tags.iter().filter(|tag| !tag.trim().is_empty()).collect();
    if let Some((last, rest)) = tags.split_last() {
        for tag in rest {
            out.push_str(&format!("{tag}\n"));
        }
        match lines.next() {
            Some(first) if visible_width(last) < indent => {
                out.push_str(&format!("{}{first}\n", pad(last, indent)));
            }
            first => {
                out.push_str(&format!("{last}\n"));
                if let Some(first) = first {
                    out.push_str(&format!("{lead}{first}\n"));
                }
            }
        }
    }
    for line in lines {
        out.push_str(&format!("{lead}{line}\n"));
    }
    out
}

impl Heading {
    /// Heading line followed by the body at a fixed indent. Prose runs are
    /// joined and wrapped; synopsis children keep their own line layout.
    fn parse(&self, heading_line: String, width: usize, styles: &Styles) -> String {
        let lead = " ".repeat(SECTION_INDENT);
        let body_width = width.saturating_sub(SECTION_INDENT).max(1);
        let mut out = format!("{heading_line}\n");
        let mut prose: Vec<&Token> = Vec::new();

        let flush = |prose: &mut Vec<&Token>, out: &mut String| {
            if prose.is_empty() {
                return;
            }
            let text = prose
                .drain(..)
                .map(|token| inline(token, body_width, styles))
                .collect::<Vec<_>>()
                .join(" ");
            for line in wrap(&text, body_width) {
                out.push_str(&format!("{lead}{line}\n"));
            }
        };

        for token in &self.contents {
            if let Token::Synopsis(synopsis) = token {
                flush(&mut prose, &mut out);
                for line in synopsis.parse(body_width, styles).lines() {
                    out.push_str(&format!("{lead}{line}\n"));
                }
            } else {
                prose.push(token);
            }
        }
        flush(&mut prose, &mut out);
        out
    }
}

impl Synopsis {
    /// One block per command. Continuation lines align under the first
    /// option; nested commands start a fresh line.
    fn parse(&self, width: usize, styles: &Styles) -> String {
        let mut out = String::new();
        let mut command = self.command.as_str();
        let mut units: Vec<String> = Vec::new();

        for token in &self.contents {
            match token {
                Token::Synopsis(nested) => {
                    out.push_str(&command_lines(command, &units, width, styles));
                    command = nested.command.as_str();
                    units = nested
                        .contents
                        .iter()
                        .map(|child| inline(child, width, styles))
                        .collect();
                }
                other => units.push(inline(other, width, styles)),
            }
        }
        out.push_str(&command_lines(command, &units, width, styles));
        out
    }
}

fn command_lines(command: &str, units: &[String], width: usize, styles: &Styles) -> String {
    let name = styles.bold(command);
    let hang = visible_width(command) + 1;
    let all = std::iter::once(name.as_str()).chain(units.iter().map(String::as_str));
    let lead = " ".repeat(hang);
    fill_hanging(all, width, width.saturating_sub(hang))
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            if idx == 0 {
                format!("{line}\n")
            } else {
                format!("{lead}{line}\n")
            }
        })
        .collect()
}

impl CommandOption {
    /// `[name argument]` with the name bold and the argument underlined.
    pub fn render(&self, styles: &Styles) -> String {
        match &self.argument {
            Some(argument) => format!(
                "[{} {}]",
                styles.bold(&self.name),
                styles.underline(argument)
            ),
            None => format!("[{}]", styles.bold(&self.name)),
        }
    }
}

impl Hyperlink {
    fn render(&self, scheme: &str, width: usize, styles: &Styles) -> String {
        let text = inline_text(&self.contents, width, styles);
        let mut text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            text = self.address.clone();
        }
        let target = format!("{scheme}{}", self.address);
        format!("{}{}", styles.hyperlink(&target, &text), self.punctuation)
    }
}

#[derive(Debug, Clone, Copy)]
enum Emphasis {
    Bold,
    Underline,
    Roman,
}

impl Emphasis {
    fn apply(self, text: &str, styles: &Styles) -> String {
        match self {
            Emphasis::Bold => styles.bold(text),
            Emphasis::Underline => styles.underline(text),
            Emphasis::Roman => text.to_string(),
        }
    }
}

impl Font {
    fn alternation(self) -> Option<(Emphasis, Emphasis)> {
        use Emphasis::{Bold, Roman, Underline};
        match self {
            Font::BoldItalic => Some((Bold, Underline)),
            Font::BoldRoman => Some((Bold, Roman)),
            Font::ItalicBold => Some((Underline, Bold)),
            Font::ItalicRoman => Some((Underline, Roman)),
            Font::RomanBold => Some((Roman, Bold)),
            Font::RomanItalic => Some((Roman, Underline)),
            Font::Bold | Font::Italic | Font::Small | Font::SmallBold => None,
        }
    }

    pub fn render(self, text: &str, styles: &Styles) -> String {
        if let Some((even, odd)) = self.alternation() {
            return text
                .split(' ')
                .enumerate()
                .map(|(idx, word)| {
                    let emphasis = if idx % 2 == 0 { even } else { odd };
                    emphasis.apply(word, styles)
                })
                .collect::<Vec<_>>()
                .join(" ");
        }
        match self {
            Font::Bold | Font::SmallBold => styles.bold(text),
            Font::Italic => styles.underline(text),
            _ => text.to_string(),
        }
    }
}

impl Title {
    /// Uppercased `TITLE(SECTION)`, or just `TITLE` without a section.
    fn name(&self) -> String {
        let title = self.title.to_uppercase();
        if self.section.is_empty() {
            title
        } else {
            format!("{title}({})", self.section.to_uppercase())
        }
    }

    /// Header line followed by three blank lines.
    pub fn header(&self, width: usize) -> String {
        let name = self.name();
        format!("{}\n\n\n\n", spread(&name, &self.header_middle, &name, width))
    }

    /// Three blank lines followed by the footer line.
    pub fn footer(&self, width: usize) -> String {
        format!(
            "\n\n\n{}\n",
            spread(&self.footer_inside, &self.footer_middle, &self.name(), width)
        )
    }
}

/// Lay out three fields across `width`; the left gap takes the floor of the
/// spare columns and the right gap the ceiling.
fn spread(left: &str, middle: &str, right: &str, width: usize) -> String {
    let used = visible_width(left) + visible_width(middle) + visible_width(right);
    let spare = width.saturating_sub(used);
    let left_gap = spare / 2;
    let right_gap = spare - left_gap;
    format!(
        "{left}{}{middle}{}{right}",
        " ".repeat(left_gap),
        " ".repeat(right_gap)
    )
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
