//! Reader configuration.
//!
//! An optional JSON file supplies defaults; command-line flags override it.
use crate::cli::RootArgs;
use crate::reflow::WrapMode;
use crate::viewer::{BoxChars, FrameKind};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
/// Page size used when there is no terminal to measure.
pub const DEFAULT_PAGE_HEIGHT: usize = 20;
pub const DEFAULT_PAGE_WIDTH: usize = 76;

fn default_schema_version() -> u32 {
    CONFIG_SCHEMA_VERSION
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReaderConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub wrap_mode: WrapMode,
    #[serde(default)]
    pub frame: FrameKind,
    /// Takes precedence over `frame` when set.
    #[serde(default)]
    pub custom_frame: Option<String>,
    /// Page size for printed output. The viewer sizes pages to the terminal.
    #[serde(default)]
    pub page_height: Option<usize>,
    #[serde(default)]
    pub page_width: Option<usize>,
}

pub fn default_config() -> ReaderConfig {
    ReaderConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        wrap_mode: WrapMode::default(),
        frame: FrameKind::default(),
        custom_frame: None,
        page_height: None,
        page_width: None,
    }
}

pub fn load_config(path: &Path) -> Result<ReaderConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: ReaderConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Reject settings the reader cannot honour before anything is drawn.
pub fn validate_config(config: &ReaderConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    if config.page_height == Some(0) {
        return Err(anyhow!("page_height must be at least 1"));
    }
    if config.page_width == Some(0) {
        return Err(anyhow!("page_width must be at least 1"));
    }
    if let Some(custom) = config.custom_frame.as_deref() {
        BoxChars::custom(custom).context("invalid custom_frame")?;
    }
    Ok(())
}

/// Fold command-line flags over the loaded config.
pub fn apply_overrides(config: &mut ReaderConfig, args: &RootArgs) {
    if let Some(wrap) = args.wrap {
        config.wrap_mode = wrap;
    }
    if let Some(frame) = args.frame {
        config.frame = frame;
        config.custom_frame = None;
    }
    if let Some(custom) = &args.custom_frame {
        config.custom_frame = Some(custom.clone());
    }
    if args.height.is_some() {
        config.page_height = args.height;
    }
    if args.width.is_some() {
        config.page_width = args.width;
    }
}

/// Config file (if any) plus flags, validated.
pub fn resolve_config(args: &RootArgs) -> Result<ReaderConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => default_config(),
    };
    apply_overrides(&mut config, args);
    validate_config(&config)?;
    tracing::debug!(
        wrap_mode = %config.wrap_mode,
        frame = %config.frame,
        custom_frame = config.custom_frame.is_some(),
        "resolved config"
    );
    Ok(config)
}

pub fn box_chars(config: &ReaderConfig) -> Result<BoxChars> {
    match config.custom_frame.as_deref() {
        Some(custom) => BoxChars::custom(custom).context("invalid custom_frame"),
        None => Ok(BoxChars::for_kind(config.frame)),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
