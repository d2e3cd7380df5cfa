//! Line-oriented lexer for the man macro subset.
//!
//! At most one multi-line token is in progress at a time. Each input line is
//! first offered to that token; once it reports completion the token is
//! emitted, and the line is dispatched afresh when the token did not consume
//! it. Lexing never fails: unknown macros become [`Token::Empty`].
use super::token::{
    CommandOption, Font, Heading, Hyperlink, IndentedParagraph, Synopsis, TaggedParagraph, Title,
    Token,
};

/// `.RS`/`.RE` step when the macro carries no argument.
const DEFAULT_RELATIVE_INDENT: usize = 1;

/// Macros that end a paragraph-like container they appear in.
const STRUCTURAL_MACROS: [&str; 20] = [
    "TH", "SH", "SS", "P", "LP", "PP", "IP", "TP", "TQ", "RS", "RE", "EX", "EE", "SY", "YS", "OP",
    "MT", "ME", "UR", "UE",
];

/// Lex a whole document.
pub fn lex(text: &str) -> Vec<Token> {
    let mut lexer = Lexer::default();
    for line in text.lines() {
        lexer.feed(line);
    }
    lexer.finish()
}

#[derive(Default)]
struct Lexer {
    tokens: Vec<Token>,
    open: Option<Open>,
}

impl Lexer {
    fn feed(&mut self, line: &str) {
        if is_comment(line) {
            return;
        }
        if let Some(mut open) = self.open.take() {
            match open.process_next(line) {
                Progress::Continue => {
                    self.open = Some(open);
                    return;
                }
                Progress::Finished => {
                    self.tokens.push(open.finish());
                    return;
                }
                Progress::Interrupted => self.tokens.push(open.finish()),
            }
        }
        self.dispatch(line);
    }

    fn dispatch(&mut self, line: &str) {
        let Some(request) = MacroLine::parse(line) else {
            self.tokens.push(Token::text(line));
            return;
        };
        let args = request.args;
        match request.name {
            "TH" => self.tokens.push(Token::Title(Title::from_args(&args))),
            "SH" | "SS" => {
                self.open = Some(Open::Heading {
                    subheading: request.name == "SS",
                    heading: (!args.is_empty()).then(|| args.join(" ")),
                    body: Body::default(),
                    synopsis: None,
                })
            }
            "P" | "LP" | "PP" => self.open = Some(Open::Paragraph(Body::default())),
            "IP" => {
                self.open = Some(Open::Indented {
                    tag: args.first().cloned(),
                    indent: args.get(1).and_then(|arg| parse_indent(arg)),
                    body: Body::default(),
                })
            }
            "TP" | "TQ" => {
                self.open = Some(Open::Tagged {
                    indent: args.first().and_then(|arg| parse_indent(arg)),
                    tags: Body::default(),
                    awaiting_tag: true,
                    body: Body::default(),
                })
            }
            "RS" => self
                .tokens
                .push(Token::RelativeIndentStart(relative_indent(&args))),
            "RE" => self
                .tokens
                .push(Token::RelativeIndentEnd(relative_indent(&args))),
            "EX" => self.open = Some(Open::Example(Body::default())),
            "SY" => self.open = Some(Open::Synopsis(SynopsisBuilder::new(args.join(" ")))),
            "OP" => self.tokens.push(option_token(&args)),
            "MT" | "UR" => {
                self.open = Some(Open::Link {
                    email: request.name == "MT",
                    address: args.first().cloned().unwrap_or_default(),
                    body: Body::default(),
                    punctuation: String::new(),
                })
            }
            "EE" | "YS" | "ME" | "UE" => {
                tracing::debug!(name = request.name, "ignoring unmatched block terminator");
            }
            _ => match inline(line).into_token() {
                Ok(token) => self.tokens.push(token),
                Err(font) => self.open = Some(Open::Font(font, None)),
            },
        }
    }

    /// End of input closes whatever token is still open.
    fn finish(mut self) -> Vec<Token> {
        if let Some(open) = self.open.take() {
            self.tokens.push(open.finish());
        }
        self.tokens
    }
}

/// Result of offering a line to the open token.
#[derive(Debug, PartialEq, Eq)]
enum Progress {
    /// The line was absorbed; the token stays open.
    Continue,
    /// The line completed the token and was consumed by it.
    Finished,
    /// The token is complete but the line belongs to whatever comes next.
    Interrupted,
}

/// A multi-line token under construction.
enum Open {
    Heading {
        subheading: bool,
        heading: Option<String>,
        body: Body,
        synopsis: Option<SynopsisBuilder>,
    },
    Paragraph(Body),
    Indented {
        tag: Option<String>,
        indent: Option<usize>,
        body: Body,
    },
    Tagged {
        indent: Option<usize>,
        tags: Body,
        awaiting_tag: bool,
        body: Body,
    },
    Example(Body),
    Synopsis(SynopsisBuilder),
    Link {
        email: bool,
        address: String,
        body: Body,
        punctuation: String,
    },
    Font(Font, Option<String>),
}

impl Open {
    fn process_next(&mut self, line: &str) -> Progress {
        match self {
            Open::Heading {
                heading,
                body,
                synopsis,
                ..
            } => {
                if let Some(builder) = synopsis {
                    if builder.process_next(line) == Progress::Finished {
                        if let Some(done) = synopsis.take() {
                            body.tokens.push(Token::Synopsis(done.finish()));
                        }
                    }
                    return Progress::Continue;
                }
                if heading.is_none() {
                    if line.is_empty() {
                        return Progress::Continue;
                    }
                    if is_structural(line) {
                        return Progress::Interrupted;
                    }
                    match inline(line) {
                        Inline::Text(text) | Inline::Unknown(text) | Inline::Font(_, text) => {
                            *heading = Some(text)
                        }
                        Inline::AwaitingText(_) => {}
                    }
                    return Progress::Continue;
                }
                if line.is_empty() {
                    return Progress::Finished;
                }
                if let Some(request) = MacroLine::parse(line) {
                    if request.name == "SY" {
                        *synopsis = Some(SynopsisBuilder::new(request.args.join(" ")));
                        return Progress::Continue;
                    }
                }
                body.absorb(line)
            }
            Open::Paragraph(body) | Open::Indented { body, .. } => body.absorb(line),
            Open::Tagged {
                tags,
                awaiting_tag,
                body,
                ..
            } => {
                let is_tq = macro_name(line) == Some("TQ");
                if *awaiting_tag {
                    if line.is_empty() || is_tq {
                        return Progress::Continue;
                    }
                    if is_structural(line) {
                        return Progress::Interrupted;
                    }
                    tags.push_line(line);
                    *awaiting_tag = tags.pending_font.is_some();
                    return Progress::Continue;
                }
                if is_tq {
                    *awaiting_tag = true;
                    return Progress::Continue;
                }
                body.absorb(line)
            }
            Open::Example(body) => {
                if macro_name(line) == Some("EE") {
                    return Progress::Finished;
                }
                if is_structural(line) {
                    return Progress::Interrupted;
                }
                body.push_line(line);
                Progress::Continue
            }
            Open::Synopsis(builder) => builder.process_next(line),
            Open::Link {
                body, punctuation, ..
            } => {
                if let Some(request) = MacroLine::parse(line) {
                    if matches!(request.name, "ME" | "UE") {
                        *punctuation = request.args.join(" ");
                        return Progress::Finished;
                    }
                }
                if line.is_empty() {
                    return Progress::Continue;
                }
                if is_structural(line) {
                    return Progress::Interrupted;
                }
                body.push_line(line);
                Progress::Continue
            }
            Open::Font(_, text) => {
                *text = Some(line.to_string());
                Progress::Finished
            }
        }
    }

    fn finish(self) -> Token {
        match self {
            Open::Heading {
                subheading,
                heading,
                mut body,
                synopsis,
            } => {
                if let Some(builder) = synopsis {
                    body.tokens.push(Token::Synopsis(builder.finish()));
                }
                let heading = Heading::new(heading.unwrap_or_default(), body.into_tokens());
                if subheading {
                    Token::Subheading(heading)
                } else {
                    Token::Section(heading)
                }
            }
            Open::Paragraph(body) => Token::Paragraph(body.into_tokens()),
            Open::Indented { tag, indent, body } => Token::IndentedParagraph(IndentedParagraph {
                tag,
                indent,
                contents: body.into_tokens(),
            }),
            Open::Tagged {
                indent, tags, body, ..
            } => {
                let mut tags = tags.into_tokens();
                if tags.is_empty() {
                    tags.push(Token::text(""));
                }
                Token::TaggedParagraph(TaggedParagraph {
                    indent,
                    tags,
                    contents: body.into_tokens(),
                })
            }
            Open::Example(body) => Token::Example(body.into_tokens()),
            Open::Synopsis(builder) => Token::Synopsis(builder.finish()),
            Open::Link {
                email,
                address,
                body,
                punctuation,
            } => {
                let link = Hyperlink {
                    address,
                    contents: body.into_tokens(),
                    punctuation,
                };
                if email {
                    Token::EmailAddress(link)
                } else {
                    Token::Url(link)
                }
            }
            Open::Font(font, text) => Token::font(font, text.unwrap_or_default()),
        }
    }
}

/// `.SY` block. Closes only on `.YS`; nested `.SY` lines become empty
/// synopsis children that start a new command line when rendered.
struct SynopsisBuilder {
    command: String,
    body: Body,
}

impl SynopsisBuilder {
    fn new(command: String) -> Self {
        Self {
            command,
            body: Body::default(),
        }
    }

    fn process_next(&mut self, line: &str) -> Progress {
        if line.is_empty() {
            return Progress::Continue;
        }
        match MacroLine::parse(line) {
            Some(request) if request.name == "YS" => return Progress::Finished,
            Some(request) if request.name == "OP" => self.body.tokens.push(option_token(&request.args)),
            Some(request) if request.name == "SY" => self.body.tokens.push(Token::Synopsis(
                Synopsis::new(request.args.join(" "), Vec::new()),
            )),
            _ => self.body.push_line(line),
        }
        Progress::Continue
    }

    fn finish(self) -> Synopsis {
        Synopsis::new(self.command, self.body.into_tokens())
    }
}

/// Content lines of a container, with font macros resolved.
#[derive(Default)]
struct Body {
    tokens: Vec<Token>,
    /// A `.B`/`.I`/`.SB`/`.SM` with no argument, waiting for its text.
    pending_font: Option<Font>,
}

impl Body {
    fn push_line(&mut self, line: &str) {
        if let Some(font) = self.pending_font.take() {
            self.tokens.push(Token::font(font, line));
            return;
        }
        match inline(line).into_token() {
            Ok(token) => self.tokens.push(token),
            Err(font) => self.pending_font = Some(font),
        }
    }

    /// Paragraph-style handling: blank lines close, structural macros
    /// interrupt, anything else becomes content.
    fn absorb(&mut self, line: &str) -> Progress {
        if line.is_empty() {
            return Progress::Finished;
        }
        if self.pending_font.is_none() && is_structural(line) {
            return Progress::Interrupted;
        }
        self.push_line(line);
        Progress::Continue
    }

    fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

/// A content line once classified.
enum Inline {
    Text(String),
    /// An unknown macro, kept without its leading dot.
    Unknown(String),
    Font(Font, String),
    /// A font macro with no arguments; it styles the next line.
    AwaitingText(Font),
}

impl Inline {
    /// The finished token, or the font still waiting for its text line.
    fn into_token(self) -> Result<Token, Font> {
        match self {
            Inline::Text(text) => Ok(Token::Text(text)),
            Inline::Unknown(text) => Ok(Token::Empty(text)),
            Inline::Font(font, text) => Ok(Token::Font(font, text)),
            Inline::AwaitingText(font) => Err(font),
        }
    }
}

/// Classify a content line: plain text, a font macro, or an unknown macro.
fn inline(line: &str) -> Inline {
    let Some(request) = MacroLine::parse(line) else {
        return Inline::Text(line.to_string());
    };
    match Font::from_macro(request.name) {
        Some(font) if request.args.is_empty() && font.takes_next_line() => {
            Inline::AwaitingText(font)
        }
        Some(font) => Inline::Font(font, request.args.join(" ")),
        None => Inline::Unknown(line[1..].to_string()),
    }
}

/// A control line split into its macro name and arguments.
struct MacroLine<'a> {
    name: &'a str,
    args: Vec<String>,
}

impl<'a> MacroLine<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let body = line.strip_prefix('.')?;
        let (name, rest) = body
            .split_once(char::is_whitespace)
            .unwrap_or((body, ""));
        Some(Self {
            name,
            args: split_args(rest),
        })
    }
}

fn macro_name(line: &str) -> Option<&str> {
    MacroLine::parse(line).map(|request| request.name)
}

fn is_structural(line: &str) -> bool {
    macro_name(line).is_some_and(|name| STRUCTURAL_MACROS.contains(&name))
}

fn is_comment(line: &str) -> bool {
    line.starts_with(".\\\"") || line.starts_with("'\\\"")
}

/// Split macro arguments on whitespace; double quotes group words and `""`
/// inside quotes is a literal quote.
fn split_args(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut started = false;
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' if in_quotes => in_quotes = false,
            '"' if !started => {
                in_quotes = true;
                started = true;
            }
            ch if ch.is_whitespace() && !in_quotes => {
                if started {
                    args.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            ch => {
                current.push(ch);
                started = true;
            }
        }
    }
    if started {
        args.push(current);
    }
    args
}

/// Parse an indent argument, ignoring a trailing scale unit such as `4n`.
fn parse_indent(arg: &str) -> Option<usize> {
    arg.trim_end_matches(|ch: char| ch.is_ascii_alphabetic())
        .parse()
        .ok()
}

fn relative_indent(args: &[String]) -> usize {
    args.first()
        .and_then(|arg| parse_indent(arg))
        .unwrap_or(DEFAULT_RELATIVE_INDENT)
}

fn option_token(args: &[String]) -> Token {
    let name = args.first().cloned().unwrap_or_default();
    let argument = (args.len() > 1).then(|| args[1..].join(" "));
    Token::Option(CommandOption::new(name, argument.as_deref()))
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
