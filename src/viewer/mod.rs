//! Full-screen viewer: one page at a time inside a box-drawn frame.
//!
//! The top border carries the document title and the page status, the
//! bottom border lists the keys that currently do something.
mod app;
mod commands;
mod external;
mod frame;
mod styled;
mod ui;
mod view;

pub use frame::{BoxChars, FrameKind};

use crate::pager::Pager;
use anyhow::Result;

const EVENT_POLL_MS: u64 = 200;
/// Columns taken by the frame and its padding.
const CHROME_COLS: u16 = 4;
/// Rows taken by the frame and its padding.
const CHROME_ROWS: u16 = 4;

/// Page height and width that fit a terminal of `rows` by `cols`.
fn page_geometry(rows: u16, cols: u16) -> (usize, usize) {
    (
        usize::from(rows.saturating_sub(CHROME_ROWS)),
        usize::from(cols.saturating_sub(CHROME_COLS)),
    )
}

/// Run the interactive viewer until the user exits.
pub fn run(pager: Pager, chars: BoxChars) -> Result<()> {
    tracing::info!(title = pager.title(), mode = %pager.wrap_mode(), "starting viewer");
    ui::run_tui(pager, chars)
}
