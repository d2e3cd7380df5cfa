mod cli;
mod config;
mod document;
mod man;
mod pager;
mod reflow;
mod viewer;
mod wrap;

use anyhow::{Context, Result};
use clap::Parser;
use cli::RootArgs;
use config::{box_chars, resolve_config, ReaderConfig, DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH};
use document::load_document;
use man::Styles;
use pager::Pager;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Line written between pages in printed output.
const PAGE_BREAK: &str = "\x0c";

fn main() -> Result<()> {
    let args = RootArgs::parse();
    let interactive = !args.print && io::stdout().is_terminal() && io::stdin().is_terminal();
    init_tracing(args.log_file.as_deref(), interactive)?;

    let config = resolve_config(&args)?;
    let chars = box_chars(&config)?;
    let document = load_document(&args.file)?;

    if !interactive {
        return print_pages(&document, &config);
    }
    let pager = Pager::new(
        document.text,
        document.title,
        DEFAULT_PAGE_HEIGHT,
        DEFAULT_PAGE_WIDTH,
        config.wrap_mode,
    );
    viewer::run(pager, chars)
}

/// Logs go to `log_file` when given. Without one they go to stderr, except
/// in the viewer, which owns the terminal and gets no logging at all.
fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if !interactive => builder.with_writer(io::stderr).init(),
        None => {}
    }
    Ok(())
}

/// Write every page to stdout, separated by form feeds. Styling is kept
/// only when stdout is a terminal.
fn print_pages(document: &document::Document, config: &ReaderConfig) -> Result<()> {
    let styles = if io::stdout().is_terminal() {
        Styles::ansi()
    } else {
        Styles::plain()
    };
    let pager = Pager::new(
        document.text.as_str(),
        document.title.as_str(),
        config.page_height.unwrap_or(DEFAULT_PAGE_HEIGHT),
        config.page_width.unwrap_or(DEFAULT_PAGE_WIDTH),
        config.wrap_mode,
    )
    .with_styles(styles);
    tracing::debug!(
        title = pager.title(),
        height = pager.height(),
        width = pager.width(),
        "printing pages"
    );

    let mut out = io::stdout().lock();
    for (index, page) in pager.pages().iter().enumerate() {
        if index > 0 {
            writeln!(out, "{PAGE_BREAK}").context("write page break")?;
        }
        for line in page {
            writeln!(out, "{line}").context("write page")?;
        }
    }
    out.flush().context("flush stdout")?;
    Ok(())
}
