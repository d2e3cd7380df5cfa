//! CLI argument parsing for the reader.
//!
//! Every flag here overrides the matching config file value; nothing is
//! defaulted in two places.
use crate::reflow::WrapMode;
use crate::viewer::FrameKind;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "clireader",
    version,
    about = "Page through text files and man pages in the terminal",
    after_help = "Keys:\n  b / Left   previous page\n  n / Right  next page\n  j          jump to a page\n  f          change how text is wrapped\n  x          exit\n\nExamples:\n  clireader notes.txt\n  clireader --wrap man ls.1\n  clireader --print --width 60 README"
)]
pub struct RootArgs {
    /// Text or man file to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Initial wrap mode
    #[arg(long, value_enum, value_name = "MODE")]
    pub wrap: Option<WrapMode>,

    /// Frame drawn around the page
    #[arg(long, value_enum, value_name = "KIND", conflicts_with = "custom_frame")]
    pub frame: Option<FrameKind>,

    /// Fourteen frame characters: top bot side mhor mver ltop mtop rtop lside mid rside lbot mbot rbot
    #[arg(long, value_name = "CHARS")]
    pub custom_frame: Option<String>,

    /// JSON config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file (RUST_LOG sets the filter)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write the pages to stdout instead of opening the viewer
    #[arg(long)]
    pub print: bool,

    /// Lines per page
    #[arg(long, value_name = "N")]
    pub height: Option<usize>,

    /// Columns per line
    #[arg(long, value_name = "N")]
    pub width: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        RootArgs::command().debug_assert();
    }

    #[test]
    fn parses_modes_and_frames() {
        let args = RootArgs::try_parse_from([
            "clireader",
            "--wrap",
            "no-wrap",
            "--frame",
            "heavy-triple-dash",
            "spam.txt",
        ])
        .expect("parse args");
        assert_eq!(args.wrap, Some(WrapMode::NoWrap));
        assert_eq!(args.frame, Some(FrameKind::HeavyTripleDash));
        assert_eq!(args.file, PathBuf::from("spam.txt"));
        assert!(!args.print);
    }

    #[test]
    fn frame_and_custom_frame_conflict() {
        let result = RootArgs::try_parse_from([
            "clireader",
            "--frame",
            "heavy",
            "--custom-frame",
            "abcdefghijklmn",
            "spam.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn file_is_required() {
        assert!(RootArgs::try_parse_from(["clireader"]).is_err());
    }
}
