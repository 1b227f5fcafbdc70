//! State functions called by the orchestration runtime.
//!
//! Each function reads the current GRUB configuration through a
//! [`ConfigReader`], decides what needs to change, and performs the change
//! through a [`ConfigWriter`]. Collaborator errors are returned unchanged.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cmdline::param::{ParamName, ParamValue};
use crate::cmdline::reconcile;
use crate::config::{GrubPaths, StateFile};
use crate::defaults::{CMDLINE_PATTERN, cmdline_assignment, cmdline_default, default_assignment};
use crate::entry::{locate_default_entry, menu_entries};
use crate::error::GrubStateError;
use crate::host::{ConfigEdit, ConfigReader, ConfigWriter};

/// Result of one state function, in the shape the runtime reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateReport {
    pub name: String,
    pub result: bool,
    pub changes: BTreeMap<String, String>,
    pub comment: String,
}

impl StateReport {
    fn unchanged(name: &str, comment: impl Into<String>) -> Self {
        Self {
            name: name.to_owned(),
            result: true,
            changes: BTreeMap::new(),
            comment: comment.into(),
        }
    }

    fn changed(name: &str, changes: BTreeMap<String, String>, comment: impl Into<String>) -> Self {
        Self {
            name: name.to_owned(),
            result: true,
            changes,
            comment: comment.into(),
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Ensure kernel parameter `name` is in the desired `value` state in
/// `GRUB_CMDLINE_LINUX_DEFAULT`.
pub fn kernel_param(
    reader: &dyn ConfigReader,
    writer: &dyn ConfigWriter,
    paths: &GrubPaths,
    name: &ParamName,
    value: &ParamValue,
) -> Result<StateReport, GrubStateError> {
    let text = reader.read(&paths.defaults)?.unwrap_or_default();

    let Some(current) = cmdline_default(&text) else {
        let Some(token) = value.token(name) else {
            debug!(param = %name, "no command line configured, nothing to remove");
            return Ok(StateReport::unchanged(
                name.as_str(),
                format!("Kernel parameter {name} is already absent"),
            ));
        };
        let token = token.to_string();
        let edit = ConfigEdit::Append {
            text: cmdline_assignment(&token),
        };
        writer.apply(&paths.defaults, &edit)?;
        info!(param = %name, cmdline = %token, "added kernel command line");
        return Ok(StateReport::changed(
            name.as_str(),
            BTreeMap::from([("cmdline".to_owned(), token)]),
            "Added GRUB_CMDLINE_LINUX_DEFAULT",
        ));
    };

    let outcome = reconcile(&current, name, value);
    if !outcome.changed {
        debug!(param = %name, cmdline = %current, "kernel parameter already in desired state");
        return Ok(StateReport::unchanged(
            name.as_str(),
            format!("Kernel parameter {name} is already in the desired state"),
        ));
    }

    let edit = ConfigEdit::Replace {
        pattern: CMDLINE_PATTERN.to_owned(),
        replacement: cmdline_assignment(&outcome.command_line),
    };
    writer.apply(&paths.defaults, &edit)?;
    info!(param = %name, old = %current, new = %outcome.command_line, "updated kernel command line");
    Ok(StateReport::changed(
        name.as_str(),
        BTreeMap::from([
            ("old".to_owned(), current),
            ("new".to_owned(), outcome.command_line),
        ]),
        format!("Updated kernel parameter {name}"),
    ))
}

/// Make the first menu entry whose title contains `name` the default entry.
pub fn grub_set_default(
    reader: &dyn ConfigReader,
    writer: &dyn ConfigWriter,
    paths: &GrubPaths,
    name: &str,
) -> Result<StateReport, GrubStateError> {
    let grub_cfg = reader.read(&paths.grub_cfg)?.unwrap_or_default();
    let entries = menu_entries(&grub_cfg);

    let Some(entry) = locate_default_entry(&entries, name) else {
        warn!(query = name, entries = entries.len(), "no matching grub2 entry");
        return Ok(StateReport {
            name: name.to_owned(),
            result: false,
            changes: BTreeMap::new(),
            comment: "No matching grub2 entry in configuration".to_owned(),
        });
    };

    let line = default_assignment(entry);
    let defaults = reader.read(&paths.defaults)?.unwrap_or_default();
    if defaults.lines().any(|l| l == line) {
        debug!(query = name, entry, "default entry already set");
        return Ok(StateReport::unchanged(
            name,
            format!("Default entry is already {entry}"),
        ));
    }

    writer.apply(&paths.defaults, &ConfigEdit::Append { text: line })?;
    info!(query = name, entry, "set default boot entry");
    Ok(StateReport::changed(
        name,
        BTreeMap::from([("default".to_owned(), entry.to_owned())]),
        format!("Set default entry to {entry}"),
    ))
}

/// Apply a whole state file: the default entry first, then each kernel
/// parameter in declaration order. Stops at the first collaborator error.
pub fn apply(
    state: &StateFile,
    reader: &dyn ConfigReader,
    writer: &dyn ConfigWriter,
) -> Result<Vec<StateReport>, GrubStateError> {
    let mut reports = Vec::with_capacity(state.kernel_params.len() + 1);
    if let Some(entry) = &state.default_entry {
        reports.push(grub_set_default(reader, writer, &state.paths, entry)?);
    }
    for param in &state.kernel_params {
        reports.push(kernel_param(
            reader,
            writer,
            &state.paths,
            &param.name,
            &param.value,
        )?);
    }
    Ok(reports)
}
