//! Token model produced by the lexer and consumed by the renderer.
//!
//! Every container owns its children outright; nothing is shared between
//! tokens, and tokens are not modified after the lexer emits them.

/// Default indent, in columns, for paragraph bodies.
pub const DEFAULT_INDENT: usize = 4;

/// One lexed unit of a man document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A plain text line.
    Text(String),
    /// An unrecognised macro line, stored without its leading dot.
    Empty(String),
    /// `.TH`
    Title(Title),
    /// `.SH`
    Section(Heading),
    /// `.SS`
    Subheading(Heading),
    /// `.P`, `.LP`, `.PP`
    Paragraph(Vec<Token>),
    /// `.IP`
    IndentedParagraph(IndentedParagraph),
    /// `.TP` plus any `.TQ` continuation tags.
    TaggedParagraph(TaggedParagraph),
    /// `.EX` ... `.EE`; lines are kept verbatim.
    Example(Vec<Token>),
    /// `.RS`
    RelativeIndentStart(usize),
    /// `.RE`
    RelativeIndentEnd(usize),
    /// `.SY` ... `.YS`
    Synopsis(Synopsis),
    /// `.OP`
    Option(CommandOption),
    /// `.MT` ... `.ME`
    EmailAddress(Hyperlink),
    /// `.UR` ... `.UE`
    Url(Hyperlink),
    /// Font macros: `.B .I .SM .SB .BI .BR .IB .IR .RB .RI`.
    Font(Font, String),
}

impl Token {
    /// Block tokens are separated from what follows by a blank line.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Token::Section(_)
                | Token::Subheading(_)
                | Token::Paragraph(_)
                | Token::IndentedParagraph(_)
                | Token::TaggedParagraph(_)
                | Token::Example(_)
                | Token::Synopsis(_)
        )
    }

    pub fn text(text: impl Into<String>) -> Self {
        Token::Text(text.into())
    }

    pub fn font(font: Font, text: impl Into<String>) -> Self {
        Token::Font(font, text.into())
    }
}

/// `.TH title [section [footer-middle [footer-inside [header-middle]]]]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Title {
    pub title: String,
    pub section: String,
    pub footer_middle: String,
    pub footer_inside: String,
    pub header_middle: String,
}

impl Title {
    /// Build from macro arguments in `.TH` order; missing ones stay empty.
    pub fn from_args(args: &[String]) -> Self {
        let arg = |idx: usize| args.get(idx).cloned().unwrap_or_default();
        Self {
            title: arg(0),
            section: arg(1),
            footer_middle: arg(2),
            footer_inside: arg(3),
            header_middle: arg(4),
        }
    }
}

/// Section or subheading: a heading line plus the body collected under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heading {
    pub heading: String,
    pub contents: Vec<Token>,
}

impl Heading {
    pub fn new(heading: impl Into<String>, contents: Vec<Token>) -> Self {
        Self {
            heading: heading.into(),
            contents,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndentedParagraph {
    pub tag: Option<String>,
    pub indent: Option<usize>,
    pub contents: Vec<Token>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedParagraph {
    pub indent: Option<usize>,
    /// Never empty once lexed.
    pub tags: Vec<Token>,
    pub contents: Vec<Token>,
}

/// A command synopsis. Nested synopses start further command lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Synopsis {
    pub command: String,
    pub contents: Vec<Token>,
}

impl Synopsis {
    pub fn new(command: impl Into<String>, contents: Vec<Token>) -> Self {
        Self {
            command: command.into(),
            contents,
        }
    }
}

/// `.OP name [argument]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOption {
    pub name: String,
    pub argument: Option<String>,
}

impl CommandOption {
    pub fn new(name: impl Into<String>, argument: Option<&str>) -> Self {
        Self {
            name: name.into(),
            argument: argument.map(str::to_string),
        }
    }
}

/// Link text plus its target, and punctuation that trails the link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hyperlink {
    pub address: String,
    pub contents: Vec<Token>,
    pub punctuation: String,
}

/// Emphasis applied by font macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Bold,
    Italic,
    Small,
    SmallBold,
    BoldItalic,
    BoldRoman,
    ItalicBold,
    ItalicRoman,
    RomanBold,
    RomanItalic,
}

impl Font {
    pub const ALL: [Font; 10] = [
        Font::Bold,
        Font::Italic,
        Font::Small,
        Font::SmallBold,
        Font::BoldItalic,
        Font::BoldRoman,
        Font::ItalicBold,
        Font::ItalicRoman,
        Font::RomanBold,
        Font::RomanItalic,
    ];

    pub fn macro_name(self) -> &'static str {
        match self {
            Font::Bold => "B",
            Font::Italic => "I",
            Font::Small => "SM",
            Font::SmallBold => "SB",
            Font::BoldItalic => "BI",
            Font::BoldRoman => "BR",
            Font::ItalicBold => "IB",
            Font::ItalicRoman => "IR",
            Font::RomanBold => "RB",
            Font::RomanItalic => "RI",
        }
    }

    /// Exact, case-sensitive lookup of a macro name.
    pub fn from_macro(name: &str) -> Option<Font> {
        Font::ALL
            .into_iter()
            .find(|font| font.macro_name() == name)
    }

    /// Single-style fonts take their text from the next line when the macro
    /// line carries no argument.
    pub fn takes_next_line(self) -> bool {
        matches!(
            self,
            Font::Bold | Font::Italic | Font::Small | Font::SmallBold
        )
    }
}
