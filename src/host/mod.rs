pub mod fs;
pub mod memory;

use std::path::Path;

use regex::{NoExpand, Regex};

use crate::error::GrubStateError;

/// A text edit to one configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEdit {
    /// Append `text` as a new line, creating the file if needed.
    Append { text: String },
    /// Replace every match of the regex `pattern` with `replacement`, taken
    /// literally. The file must exist and contain at least one match.
    Replace { pattern: String, replacement: String },
}

impl ConfigEdit {
    /// Apply the edit to the current file contents (`None` when the file is
    /// missing) and return the new contents.
    pub fn apply_to(&self, current: Option<&str>) -> Result<String, GrubStateError> {
        match self {
            ConfigEdit::Append { text } => {
                let mut out = current.unwrap_or_default().to_owned();
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str(text);
                out.push('\n');
                Ok(out)
            }
            ConfigEdit::Replace {
                pattern,
                replacement,
            } => {
                let current = current.ok_or_else(|| {
                    GrubStateError::ConfigWrite("cannot replace in a missing file".to_owned())
                })?;
                let regex = Regex::new(pattern).map_err(|e| {
                    GrubStateError::ConfigWrite(format!("invalid pattern '{pattern}': {e}"))
                })?;
                if !regex.is_match(current) {
                    return Err(GrubStateError::ConfigWrite(format!(
                        "pattern '{pattern}' not found"
                    )));
                }
                Ok(regex
                    .replace_all(current, NoExpand(replacement))
                    .into_owned())
            }
        }
    }
}

/// Capability to read configuration text. `Ok(None)` means the file does
/// not exist.
pub trait ConfigReader {
    fn read(&self, path: &Path) -> Result<Option<String>, GrubStateError>;
}

/// Capability to edit configuration files.
pub trait ConfigWriter {
    fn apply(&self, path: &Path, edit: &ConfigEdit) -> Result<(), GrubStateError>;
}
