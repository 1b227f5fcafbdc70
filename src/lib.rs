//! Declarative GRUB2 state: the default boot entry and the kernel
//! parameters in `GRUB_CMDLINE_LINUX_DEFAULT`.
//!
//! [`cmdline::reconcile`] is a pure function over the command-line text.
//! The [`state`] functions wrap it with explicit [`host::ConfigReader`] and
//! [`host::ConfigWriter`] capabilities, so nothing here depends on ambient
//! process state.

pub mod cmdline;
pub mod config;
pub mod defaults;
pub mod entry;
pub mod error;
pub mod host;
pub mod state;

pub use cmdline::param::{ParamName, ParamValue};
pub use cmdline::{ReconcileResult, reconcile};
pub use entry::locate_default_entry;
pub use error::GrubStateError;
