//! Box-drawing characters for the viewer frame.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of parts in a frame definition.
pub const FRAME_PARTS: usize = 14;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    #[default]
    Light,
    Heavy,
    LightDoubleDash,
    HeavyDoubleDash,
    LightTripleDash,
    HeavyTripleDash,
    LightQuadrupleDash,
    HeavyQuadrupleDash,
}

impl FrameKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FrameKind::Light => "light",
            FrameKind::Heavy => "heavy",
            FrameKind::LightDoubleDash => "light_double_dash",
            FrameKind::HeavyDoubleDash => "heavy_double_dash",
            FrameKind::LightTripleDash => "light_triple_dash",
            FrameKind::HeavyTripleDash => "heavy_triple_dash",
            FrameKind::LightQuadrupleDash => "light_quadruple_dash",
            FrameKind::HeavyQuadrupleDash => "heavy_quadruple_dash",
        }
    }

    /// Parts in [`BoxChars`] field order. Dashed kinds only change the
    /// straight lines; joins and corners come from the solid kind.
    fn parts(self) -> &'static str {
        match self {
            FrameKind::Light => "──│─│┌┬┐├┼┤└┴┘",
            FrameKind::Heavy => "━━┃━┃┏┳┓┣╋┫┗┻┛",
            FrameKind::LightDoubleDash => "╌╌╎╌╎┌┬┐├┼┤└┴┘",
            FrameKind::HeavyDoubleDash => "╍╍╏╍╏┏┳┓┣╋┫┗┻┛",
            FrameKind::LightTripleDash => "┄┄┆┄┆┌┬┐├┼┤└┴┘",
            FrameKind::HeavyTripleDash => "┅┅┇┅┇┏┳┓┣╋┫┗┻┛",
            FrameKind::LightQuadrupleDash => "┈┈┊┈┊┌┬┐├┼┤└┴┘",
            FrameKind::HeavyQuadrupleDash => "┉┉┋┉┋┏┳┓┣╋┫┗┻┛",
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Problems building a frame from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// A custom frame string must hold exactly [`FRAME_PARTS`] characters.
    CustomLength(usize),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::CustomLength(len) => write!(
                f,
                "the custom frame string must be {FRAME_PARTS} characters (got {len})"
            ),
        }
    }
}

impl std::error::Error for FrameError {}

/// One character per frame part. The interior parts are part of the frame
/// definition but the single-pane viewer never draws them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxChars {
    pub top: char,
    pub bot: char,
    pub side: char,
    #[allow(dead_code)]
    pub mhor: char,
    #[allow(dead_code)]
    pub mver: char,
    pub ltop: char,
    #[allow(dead_code)]
    pub mtop: char,
    pub rtop: char,
    pub lside: char,
    #[allow(dead_code)]
    pub mid: char,
    pub rside: char,
    pub lbot: char,
    #[allow(dead_code)]
    pub mbot: char,
    pub rbot: char,
}

impl BoxChars {
    pub fn for_kind(kind: FrameKind) -> Self {
        let mut parts = [' '; FRAME_PARTS];
        for (slot, ch) in parts.iter_mut().zip(kind.parts().chars()) {
            *slot = ch;
        }
        Self::from_parts(parts)
    }

    /// Build from a user-supplied string listing the parts in field order.
    pub fn custom(parts: &str) -> Result<Self, FrameError> {
        let chars: Vec<char> = parts.chars().collect();
        let parts: [char; FRAME_PARTS] = chars
            .try_into()
            .map_err(|chars: Vec<char>| FrameError::CustomLength(chars.len()))?;
        Ok(Self::from_parts(parts))
    }

    fn from_parts(parts: [char; FRAME_PARTS]) -> Self {
        let [top, bot, side, mhor, mver, ltop, mtop, rtop, lside, mid, rside, lbot, mbot, rbot] =
            parts;
        Self {
            top,
            bot,
            side,
            mhor,
            mver,
            ltop,
            mtop,
            rtop,
            lside,
            mid,
            rside,
            lbot,
            mbot,
            rbot,
        }
    }

    /// Text set into the frame line: `┤text├`.
    pub fn field(&self, text: &str) -> String {
        format!("{}{text}{}", self.rside, self.lside)
    }
}

impl Default for BoxChars {
    fn default() -> Self {
        Self::for_kind(FrameKind::Light)
    }
}
