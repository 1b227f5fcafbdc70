use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use super::{ConfigEdit, ConfigReader, ConfigWriter};
use crate::error::GrubStateError;

/// Reads and edits configuration files on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsHost;

impl ConfigReader for FsHost {
    fn read(&self, path: &Path) -> Result<Option<String>, GrubStateError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!(path = %path.display(), bytes = content.len(), "read configuration");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "configuration file missing");
                Ok(None)
            }
            Err(e) => Err(GrubStateError::ConfigRead(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        }
    }
}

impl ConfigWriter for FsHost {
    fn apply(&self, path: &Path, edit: &ConfigEdit) -> Result<(), GrubStateError> {
        let current = self.read(path)?;
        let updated = edit.apply_to(current.as_deref())?;
        std::fs::write(path, updated).map_err(|e| {
            GrubStateError::ConfigWrite(format!("cannot write {}: {e}", path.display()))
        })?;
        info!(path = %path.display(), ?edit, "configuration updated");
        Ok(())
    }
}
