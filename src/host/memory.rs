use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{ConfigEdit, ConfigReader, ConfigWriter};
use crate::error::GrubStateError;

/// In-memory file set. Records every applied edit, which makes it the
/// natural fake for exercising state functions without touching the host.
#[derive(Debug, Default)]
pub struct MemoryHost {
    files: RefCell<HashMap<PathBuf, String>>,
    edits: RefCell<Vec<(PathBuf, ConfigEdit)>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.borrow_mut().insert(path.into(), content.to_owned());
        self
    }

    pub fn file(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Edits applied so far, oldest first.
    pub fn edits(&self) -> Vec<(PathBuf, ConfigEdit)> {
        self.edits.borrow().clone()
    }
}

impl ConfigReader for MemoryHost {
    fn read(&self, path: &Path) -> Result<Option<String>, GrubStateError> {
        Ok(self.file(path))
    }
}

impl ConfigWriter for MemoryHost {
    fn apply(&self, path: &Path, edit: &ConfigEdit) -> Result<(), GrubStateError> {
        let updated = edit.apply_to(self.file(path).as_deref())?;
        self.files.borrow_mut().insert(path.to_owned(), updated);
        self.edits
            .borrow_mut()
            .push((path.to_owned(), edit.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_edits() {
        let host = MemoryHost::new().with_file("/etc/default/grub", "A=1\n");
        let edit = ConfigEdit::Append {
            text: "B=2".to_owned(),
        };
        host.apply(Path::new("/etc/default/grub"), &edit).unwrap();

        assert_eq!(
            host.read(Path::new("/etc/default/grub")).unwrap().as_deref(),
            Some("A=1\nB=2\n")
        );
        assert_eq!(host.edits(), vec![(PathBuf::from("/etc/default/grub"), edit)]);
    }

    #[test]
    fn failed_edit_is_not_recorded() {
        let host = MemoryHost::new();
        let edit = ConfigEdit::Replace {
            pattern: "A".to_owned(),
            replacement: "B".to_owned(),
        };
        assert!(host.apply(Path::new("/missing"), &edit).is_err());
        assert!(host.edits().is_empty());
        assert_eq!(host.file(Path::new("/missing")), None);
    }
}
