//! Host application surface consumed by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host application version, e.g. R21.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostVersion {
    pub major: u32,
    pub minor: u32,
}

impl HostVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}.{}", self.major, self.minor)
    }
}

/// Name and version of the application hosting the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    pub name: String,
    /// "unknown" when the host cannot report its version.
    pub version: String,
}

/// The host's active document, as reported by its document accessors.
///
/// An empty `directory` signals a fresh or untitled session with no file
/// associated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    pub directory: String,
    pub name: String,
}

impl DocumentInfo {
    pub fn untitled() -> Self {
        Self::default()
    }

    pub fn has_path(&self) -> bool {
        !self.directory.is_empty()
    }
}

/// Severity of a user-facing dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogSeverity {
    Info,
    Warning,
    Error,
}

/// The host application object, behind a trait so the engine never touches
/// host globals directly and tests can run against a fake.
pub trait HostApplication: Send + Sync {
    /// Host application name, e.g. "Cinema".
    fn name(&self) -> &str;

    fn version(&self) -> HostVersion;

    /// Name/version map describing the host, with an "unknown" version
    /// fallback left to implementations that cannot identify themselves.
    fn host_info(&self) -> HostInfo {
        HostInfo {
            name: self.name().to_string(),
            version: self.version().to_string(),
        }
    }

    /// The document currently active in the host.
    fn active_document(&self) -> DocumentInfo;

    /// Whether the host is running interactively. Menus and dialogs are
    /// skipped in batch mode.
    fn is_gui(&self) -> bool;

    /// Shows a modal message dialog to the user.
    fn show_dialog(&self, severity: DialogSeverity, message: &str);

    /// Writes a line to the host's script console.
    fn write_console(&self, line: &str);

    /// Schedules a callable to run on the host's main thread, asynchronously.
    ///
    /// The host UI is not safe to touch off the main thread; any collaborator
    /// invoking UI-affecting display functions from elsewhere must marshal
    /// through this.
    fn run_on_main_thread(&self, task: Box<dyn FnOnce() + Send>);
}
