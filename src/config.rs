use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::cmdline::param::{ParamName, ParamValue};
use crate::error::GrubStateError;

const MAX_STATE_FILE_SIZE: u64 = 64 * 1024; // 64 KiB

// --- TOML deserialization structs (private, map 1:1 to TOML schema) ---

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StateToml {
    #[serde(default)]
    paths: GrubPaths,
    default_entry: Option<DefaultEntryToml>,
    #[serde(default)]
    kernel_params: Vec<KernelParamToml>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DefaultEntryToml {
    name: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct KernelParamToml {
    name: String,
    value: Option<String>,
}

// --- Validated state ---

/// Locations of the GRUB files the state functions read and edit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrubPaths {
    /// `/etc/default/grub`
    pub defaults: PathBuf,
    /// Generated menu, `/boot/grub2/grub.cfg`
    pub grub_cfg: PathBuf,
}

impl Default for GrubPaths {
    fn default() -> Self {
        Self {
            defaults: PathBuf::from("/etc/default/grub"),
            grub_cfg: PathBuf::from("/boot/grub2/grub.cfg"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelParam {
    pub name: ParamName,
    pub value: ParamValue,
}

/// Declared GRUB state: where the files live, which entry to boot by
/// default and which kernel parameters to enforce (in file order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateFile {
    pub paths: GrubPaths,
    pub default_entry: Option<String>,
    pub kernel_params: Vec<KernelParam>,
}

impl FromStr for StateFile {
    type Err = GrubStateError;

    /// Parse and validate a state file from a TOML string.
    fn from_str(content: &str) -> Result<Self, GrubStateError> {
        let file: StateToml =
            toml::from_str(content).map_err(|e| GrubStateError::StateLoad(e.to_string()))?;

        let default_entry = match file.default_entry {
            Some(entry) if entry.name.is_empty() => {
                return Err(GrubStateError::StateValidation(
                    "default_entry.name must not be empty".to_owned(),
                ));
            }
            Some(entry) => Some(entry.name),
            None => None,
        };

        let mut seen = HashSet::new();
        let mut kernel_params = Vec::with_capacity(file.kernel_params.len());
        for (index, param) in file.kernel_params.into_iter().enumerate() {
            let name = ParamName::new(&param.name).map_err(|e| {
                GrubStateError::StateValidation(format!("kernel_params[{index}]: {e}"))
            })?;
            if !seen.insert(name.clone()) {
                return Err(GrubStateError::StateValidation(format!(
                    "kernel_params[{index}]: parameter '{name}' declared more than once"
                )));
            }
            let value = ParamValue::new(param.value.as_deref()).map_err(|e| {
                GrubStateError::StateValidation(format!("kernel_params[{index}]: {e}"))
            })?;
            kernel_params.push(KernelParam { name, value });
        }

        Ok(Self {
            paths: file.paths,
            default_entry,
            kernel_params,
        })
    }
}

impl StateFile {
    /// Load a state file from disk. Checks file size before reading.
    pub fn load(path: &Path) -> Result<Self, GrubStateError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            GrubStateError::StateLoad(format!("cannot read {}: {e}", path.display()))
        })?;

        if metadata.len() > MAX_STATE_FILE_SIZE {
            return Err(GrubStateError::StateLoad(format!(
                "state file exceeds {MAX_STATE_FILE_SIZE} byte limit"
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            GrubStateError::StateLoad(format!("cannot read {}: {e}", path.display()))
        })?;

        content.parse()
    }
}
