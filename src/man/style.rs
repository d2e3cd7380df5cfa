//! Style table handed to the renderer once instead of being looked up per token.

/// Escape strings used to emphasise rendered man text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styles {
    pub bold: &'static str,
    pub underline: &'static str,
    pub normal: &'static str,
    /// Emit OSC 8 hyperlinks for `.MT`/`.UR` blocks.
    pub links: bool,
}

impl Styles {
    /// xterm-compatible SGR sequences.
    pub const fn ansi() -> Self {
        Self {
            bold: "\x1b[1m",
            underline: "\x1b[4m",
            normal: "\x1b(B\x1b[m",
            links: true,
        }
    }

    /// No escapes at all, for output that is not going to a terminal.
    pub const fn plain() -> Self {
        Self {
            bold: "",
            underline: "",
            normal: "",
            links: false,
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.wrap(self.bold, text)
    }

    pub fn underline(&self, text: &str) -> String {
        self.wrap(self.underline, text)
    }

    pub fn hyperlink(&self, target: &str, text: &str) -> String {
        if !self.links {
            return text.to_string();
        }
        format!("\x1b]8;;{target}\x1b\\{text}\x1b]8;;\x1b\\")
    }

    fn wrap(&self, open: &str, text: &str) -> String {
        if open.is_empty() || text.is_empty() {
            return text.to_string();
        }
        format!("{open}{text}{}", self.normal)
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::ansi()
    }
}
