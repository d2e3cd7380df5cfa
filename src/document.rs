//! Loading the file being read.
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name shown in the frame.
    pub title: String,
    pub text: String,
}

pub fn load_document(path: &Path) -> Result<Document> {
    let name = path.display();
    if path.is_dir() {
        return Err(anyhow!("{name} is a directory."));
    }
    if !path.exists() {
        return Err(anyhow!("File {name} does not exist."));
    }
    let text = read_file(path)?;
    let title = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    tracing::info!(path = %name, bytes = text.len(), "loaded document");
    Ok(Document { title, text })
}

/// Read a file as text with line endings normalised to `\n`. Invalid UTF-8
/// is replaced rather than rejected.
pub fn read_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.replace("\r\n", "\n"))
}
