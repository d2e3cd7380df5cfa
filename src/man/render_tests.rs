use super::*;
use crate::man::token::{IndentedParagraph, TaggedParagraph};

const WIDTH: usize = 24;
const B: &str = "\x1b[1m";
const N: &str = "\x1b(B\x1b[m";
const U: &str = "\x1b[4m";

fn styles() -> Styles {
    Styles::ansi()
}

fn text(value: &str) -> Token {
    Token::text(value)
}

fn long_contents() -> Vec<Token> {
    vec![
        text("spam eggs bacon ham baked beans"),
        text("spam"),
        text("spam eggs"),
        text("spam eggs bacon ham baked beans tomato"),
    ]
}

const LONG_BODY: &str = concat!(
    "    spam eggs bacon ham\n",
    "    baked beans spam\n",
    "    spam eggs spam eggs\n",
    "    bacon ham baked\n",
    "    beans tomato\n",
);

fn parse(token: &Token) -> String {
    token.parse(WIDTH, DEFAULT_INDENT, &styles()).text
}

#[test]
fn simplest_document() {
    assert_eq!(render(&[text("spam")], Some(WIDTH), &styles()), "spam\n");
}

#[test]
fn simple_title_wraps_document() {
    let tokens = [Token::Title(Title::from_args(&["spam".into()])), text("eggs")];
    let expected = concat!(
        "SPAM                SPAM\n",
        "\n\n\n",
        "eggs\n",
        "\n\n\n",
        "                    SPAM\n",
    );
    assert_eq!(render(&tokens, Some(WIDTH), &styles()), expected);
}

#[test]
fn complex_title_spreads_fields() {
    let args = ["spam", "1", "1/1/70", "ham", "bacon"].map(String::from);
    let tokens = [Token::Title(Title::from_args(&args)), text("eggs")];
    let expected = concat!(
        "SPAM(1)  bacon   SPAM(1)\n",
        "\n\n\n",
        "eggs\n",
        "\n\n\n",
        "ham    1/1/70    SPAM(1)\n",
    );
    assert_eq!(render(&tokens, Some(WIDTH), &styles()), expected);
}

#[test]
fn example_truncates_instead_of_wrapping() {
    let expected = concat!(
        "spam eggs bacon ham bake\n",
        "spam\n",
        "spam eggs\n",
        "spam eggs bacon ham bake\n",
    );
    assert_eq!(parse(&Token::Example(long_contents())), expected);
}

#[test]
fn section_wraps_body_under_bold_heading() {
    let token = Token::Section(Heading::new("spam", long_contents()));
    assert_eq!(parse(&token), format!("{B}spam{N}\n{LONG_BODY}"));
}

#[test]
fn subheading_indents_heading() {
    let token = Token::Subheading(Heading::new("spam", long_contents()));
    assert_eq!(parse(&token), format!("  {B}spam{N}\n{LONG_BODY}"));
}

#[test]
fn indented_paragraph_without_tag() {
    let token = Token::IndentedParagraph(IndentedParagraph {
        tag: None,
        indent: None,
        contents: long_contents(),
    });
    assert_eq!(parse(&token), LONG_BODY);
}

#[test]
fn indented_paragraph_with_wide_tag() {
    let token = Token::IndentedParagraph(IndentedParagraph {
        tag: Some("spam".into()),
        indent: Some(4),
        contents: long_contents(),
    });
    assert_eq!(parse(&token), format!("spam\n{LONG_BODY}"));
}

#[test]
fn paragraph_wraps_at_default_indent() {
    assert_eq!(parse(&Token::Paragraph(long_contents())), LONG_BODY);
}

#[test]
fn paragraph_resets_indent() {
    let rendered = Token::Paragraph(vec![text("spam")]).parse(WIDTH, 8, &styles());
    assert_eq!(rendered.text, "    spam\n");
    assert_eq!(rendered.indent, DEFAULT_INDENT);
}

#[test]
fn tagged_paragraph_with_wide_tag() {
    let token = Token::TaggedParagraph(TaggedParagraph {
        indent: Some(4),
        tags: vec![text("spam")],
        contents: long_contents(),
    });
    assert_eq!(parse(&token), format!("spam\n{LONG_BODY}"));
}

#[test]
fn tagged_paragraph_short_tag_shares_first_line() {
    let token = Token::TaggedParagraph(TaggedParagraph {
        indent: Some(4),
        tags: vec![text("*")],
        contents: vec![text("spam eggs bacon ham baked beans")],
    });
    assert_eq!(parse(&token), "*   spam eggs bacon ham\n    baked beans\n");
}

#[test]
fn tagged_paragraph_stacks_extra_tags() {
    let token = Token::TaggedParagraph(TaggedParagraph {
        indent: Some(6),
        tags: vec![text("-s"), text("-e")],
        contents: vec![text("spam")],
    });
    assert_eq!(parse(&token), "-s\n-e    spam\n");
}

#[test]
fn explicit_indent_becomes_ambient() {
    let token = Token::IndentedParagraph(IndentedParagraph {
        tag: None,
        indent: Some(8),
        contents: vec![text("spam")],
    });
    let rendered = token.parse(WIDTH, DEFAULT_INDENT, &styles());
    assert_eq!(rendered.text, "        spam\n");
    assert_eq!(rendered.indent, 8);
}

#[test]
fn option_styles_name_and_argument() {
    let option = CommandOption::new("-s", Some("spam"));
    assert_eq!(option.render(&styles()), format!("[{B}-s{N} {U}spam{N}]"));
    let flag = CommandOption::new("-v", None);
    assert_eq!(flag.render(&styles()), format!("[{B}-v{N}]"));
}

#[test]
fn synopsis_hangs_continuation_under_first_option() {
    let token = Token::Synopsis(Synopsis::new(
        "spam",
        vec![
            Token::Option(CommandOption::new("-s", Some("spam"))),
            Token::Option(CommandOption::new("-e", Some("eggs"))),
            Token::Option(CommandOption::new("-b", Some("bacon"))),
        ],
    ));
    let expected = format!(
        "{B}spam{N} [{B}-s{N} {U}spam{N}] [{B}-e{N} {U}eggs{N}]\n     [{B}-b{N} {U}bacon{N}]\n"
    );
    assert_eq!(parse(&token), expected);
}

#[test]
fn synopsis_with_multiple_commands() {
    let token = Token::Synopsis(Synopsis::new(
        "spam",
        vec![
            Token::Option(CommandOption::new("-s", Some("spam"))),
            Token::Option(CommandOption::new("-e", Some("eggs"))),
            Token::Option(CommandOption::new("-b", Some("bacon"))),
            Token::Synopsis(Synopsis::new("ham", Vec::new())),
            Token::Option(CommandOption::new("-f", Some("flapjack"))),
        ],
    ));
    let expected = format!(
        "{B}spam{N} [{B}-s{N} {U}spam{N}] [{B}-e{N} {U}eggs{N}]\n     [{B}-b{N} {U}bacon{N}]\n{B}ham{N} [{B}-f{N} {U}flapjack{N}]\n"
    );
    assert_eq!(parse(&token), expected);
}

#[test]
fn section_lays_out_synopsis_children() {
    let token = Token::Section(Heading::new(
        "SYNOPSIS",
        vec![Token::Synopsis(Synopsis::new(
            "spam",
            vec![Token::Option(CommandOption::new("-e", None))],
        ))],
    ));
    let rendered = token.parse(WIDTH, DEFAULT_INDENT, &Styles::plain()).text;
    assert_eq!(rendered, "SYNOPSIS\n    spam [-e]\n");
}

#[test]
fn single_fonts() {
    let styles = styles();
    assert_eq!(Font::Bold.render("spam", &styles), format!("{B}spam{N}"));
    assert_eq!(Font::SmallBold.render("spam", &styles), format!("{B}spam{N}"));
    assert_eq!(Font::Italic.render("spam", &styles), format!("{U}spam{N}"));
    assert_eq!(Font::Small.render("spam", &styles), "spam");
}

#[test]
fn alternating_fonts_switch_per_word() {
    let styles = styles();
    assert_eq!(
        Font::BoldRoman.render("spam (1), eggs", &styles),
        format!("{B}spam{N} (1), {B}eggs{N}")
    );
    assert_eq!(
        Font::ItalicBold.render("spam eggs", &styles),
        format!("{U}spam{N} {B}eggs{N}")
    );
}

#[test]
fn email_link_wraps_joined_text() {
    let token = Token::EmailAddress(Hyperlink {
        address: "fred.foonly@fubar.net".into(),
        contents: vec![text("Fred"), text("  Foonly")],
        punctuation: "!".into(),
    });
    assert_eq!(
        parse(&token),
        "\x1b]8;;mailto:fred.foonly@fubar.net\x1b\\Fred Foonly\x1b]8;;\x1b\\!\n"
    );
}

#[test]
fn url_without_text_shows_address_in_plain_mode() {
    let token = Token::Url(Hyperlink {
        address: "https://example.org".into(),
        contents: Vec::new(),
        punctuation: ".".into(),
    });
    let rendered = token.parse(WIDTH, DEFAULT_INDENT, &Styles::plain()).text;
    assert_eq!(rendered, "https://example.org.\n");
}

#[test]
fn relative_indent_accumulates_and_unwinds() {
    let tokens = [
        Token::RelativeIndentStart(4),
        Token::Paragraph(vec![text("spam eggs")]),
        Token::RelativeIndentEnd(4),
        Token::Paragraph(vec![text("ham")]),
    ];
    assert_eq!(
        render(&tokens, Some(WIDTH), &styles()),
        "        spam eggs\n\n    ham\n\n"
    );
}

#[test]
fn nested_relative_indents_add_up() {
    let tokens = [
        Token::RelativeIndentStart(2),
        Token::RelativeIndentStart(2),
        text("spam"),
    ];
    assert_eq!(render(&tokens, Some(WIDTH), &styles()), "    spam\n");
}

#[test]
fn unbalanced_relative_indent_end_clamps_at_zero() {
    let tokens = [
        Token::RelativeIndentStart(1),
        Token::RelativeIndentEnd(3),
        text("spam"),
    ];
    assert_eq!(render(&tokens, Some(WIDTH), &styles()), "spam\n");
}

#[test]
fn huge_relative_indent_leaves_one_column() {
    let source = ".RS 18446744073709551615\n.RS\nspam";
    let rendered = render_document(source, Some(WIDTH), &Styles::plain());
    assert_eq!(rendered, format!("{}spam\n", " ".repeat(WIDTH - 1)));
}

#[test]
fn huge_paragraph_indent_is_clamped_to_width() {
    let source = ".IP x 18446744073709551615\nspam";
    let rendered = render_document(source, Some(WIDTH), &Styles::plain());
    assert_eq!(rendered, format!("x{}spam\n\n", " ".repeat(WIDTH - 2)));
    let source = ".TP 18446744073709551615\n*\nspam";
    let rendered = render_document(source, Some(WIDTH), &Styles::plain());
    assert_eq!(rendered, format!("*{}spam\n\n", " ".repeat(WIDTH - 2)));
}

#[test]
fn section_resets_margin() {
    let tokens = [
        Token::RelativeIndentStart(4),
        Token::Section(Heading::new("spam", vec![text("eggs")])),
        text("ham"),
    ];
    assert_eq!(
        render(&tokens, Some(WIDTH), &Styles::plain()),
        "spam\n    eggs\n\nham\n"
    );
}

#[test]
fn render_document_lexes_first() {
    let source = ".TH spam 1\n.SH NAME\nspam \\- eggs\n.SH SYNOPSIS\n.SY spam\n.OP -e\n.YS\n";
    let rendered = render_document(source, Some(WIDTH), &Styles::plain());
    let expected = concat!(
        "SPAM(1)          SPAM(1)\n",
        "\n\n\n",
        "NAME\n",
        "    spam \\- eggs\n",
        "\n",
        "SYNOPSIS\n",
        "    spam [-e]\n",
        "\n",
        "\n\n\n",
        "                 SPAM(1)\n",
    );
    assert_eq!(rendered, expected);
}

#[test]
fn default_width_is_eighty() {
    let tokens = [Token::Title(Title::from_args(&["spam".into()]))];
    let rendered = render(&tokens, None, &styles());
    let first = rendered.lines().next().unwrap_or_default();
    assert_eq!(first.len(), DEFAULT_WIDTH);
}
