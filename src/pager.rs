//! Pagination of reflowed text and the page navigation state machine.
use crate::man::Styles;
use crate::reflow::{reflow, WrapMode};
use std::cell::OnceCell;
use std::fmt;

/// Group lines into pages of at most `height` lines.
///
/// A blank line that would open a page is dropped without using a slot, and
/// a blank line that would close the final page is trimmed.
pub fn paginate(lines: &[String], height: usize) -> Vec<Vec<String>> {
    let height = height.max(1);
    let mut pages = Vec::new();
    let mut page: Vec<String> = Vec::with_capacity(height);
    for line in lines {
        if page.len() == height {
            pages.push(std::mem::take(&mut page));
        }
        if page.is_empty() && line.is_empty() {
            continue;
        }
        page.push(line.clone());
    }
    if !page.is_empty() {
        if page.last().is_some_and(String::is_empty) {
            page.pop();
        }
        pages.push(page);
    }
    pages
}

/// Document text plus the geometry and wrap mode it is paged with.
///
/// Pages are computed on first use and cached until something they depend
/// on changes.
#[derive(Debug, Clone)]
pub struct Pager {
    text: String,
    title: String,
    height: usize,
    width: usize,
    wrap_mode: WrapMode,
    styles: Styles,
    pages: OnceCell<Vec<Vec<String>>>,
}

impl Pager {
    /// Height and width are clamped to at least one line and one column.
    pub fn new(
        text: impl Into<String>,
        title: impl Into<String>,
        height: usize,
        width: usize,
        wrap_mode: WrapMode,
    ) -> Self {
        Self {
            text: text.into(),
            title: title.into(),
            height: height.max(1),
            width: width.max(1),
            wrap_mode,
            styles: Styles::ansi(),
            pages: OnceCell::new(),
        }
    }

    /// Style table used when rendering man documents.
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self.pages = OnceCell::new();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn wrap_mode(&self) -> WrapMode {
        self.wrap_mode
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Always at least one page; an empty document has one empty page.
    pub fn pages(&self) -> &[Vec<String>] {
        self.pages.get_or_init(|| {
            let lines = reflow(&self.text, self.width, self.wrap_mode, &self.styles);
            let mut pages = paginate(&lines, self.height);
            if pages.is_empty() {
                pages.push(Vec::new());
            }
            tracing::debug!(
                mode = %self.wrap_mode,
                height = self.height,
                width = self.width,
                pages = pages.len(),
                "paginated document"
            );
            pages
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages().len()
    }

    pub fn page(&self, index: usize) -> &[String] {
        self.pages().get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Switch wrap mode and drop the cached pages.
    pub fn reflow(&mut self, wrap_mode: WrapMode) {
        self.wrap_mode = wrap_mode;
        self.pages = OnceCell::new();
    }

    /// Change page geometry; the cache is only dropped when it differs.
    pub fn set_geometry(&mut self, height: usize, width: usize) {
        let (height, width) = (height.max(1), width.max(1));
        if (height, width) != (self.height, self.width) {
            self.height = height;
            self.width = width;
            self.pages = OnceCell::new();
        }
    }

    #[cfg(test)]
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.pages = OnceCell::new();
    }
}

/// A rejected jump request. Recoverable: the caller reports it and keeps
/// the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    NotANumber(String),
    PageOutOfRange { target: usize, page_count: usize },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::NotANumber(input) => write!(f, "{input:?} is not a page number"),
            NavigationError::PageOutOfRange { target, page_count } => write!(
                f,
                "page {target} is out of range (pages 1-{page_count})"
            ),
        }
    }
}

impl std::error::Error for NavigationError {}

/// Zero-based index of the page on display. Stays within
/// `0..page_count`; moves past either end are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigation {
    current: usize,
}

impl Navigation {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_last(&self, pager: &Pager) -> bool {
        self.current + 1 >= pager.page_count()
    }

    pub fn next(&mut self, pager: &Pager) {
        if !self.is_last(pager) {
            self.current += 1;
        }
    }

    pub fn back(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Go to the one-based page `target`.
    pub fn jump(&mut self, target: usize, pager: &Pager) -> Result<(), NavigationError> {
        let page_count = pager.page_count();
        if target == 0 || target > page_count {
            return Err(NavigationError::PageOutOfRange { target, page_count });
        }
        self.current = target - 1;
        Ok(())
    }

    /// Parse user input as a one-based page number and jump to it.
    pub fn jump_to_input(&mut self, input: &str, pager: &Pager) -> Result<(), NavigationError> {
        let trimmed = input.trim();
        let target = trimmed
            .parse::<usize>()
            .map_err(|_| NavigationError::NotANumber(trimmed.to_string()))?;
        self.jump(target, pager)
    }

    /// Repaginate with `wrap_mode` and return to the first page.
    pub fn reflow(&mut self, pager: &mut Pager, wrap_mode: WrapMode) {
        pager.reflow(wrap_mode);
        self.current = 0;
    }

    /// Pull the index back inside the page range after a repagination.
    pub fn clamp(&mut self, pager: &Pager) {
        self.current = self.current.min(pager.page_count().saturating_sub(1));
    }
}
