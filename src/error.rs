//! Error types for the stagelink host integration engine.

use crate::host::SceneEvent;
use thiserror::Error;

/// Errors raised by the pipeline platform's resolution service.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("No project recognized for path: {0}")]
    UnknownProject(String),

    #[error("No template matches path: {0}")]
    UnmatchedPath(String),

    #[error("Entity not found: {kind} {name}")]
    EntityNotFound { kind: String, name: String },

    #[error("Platform backend error: {0}")]
    Backend(String),
}

/// Terminal resolution failure for one scene event.
///
/// Carries the platform error that defeated both direct resolution and the
/// entity-scope fallback, so diagnostics keep the original chain.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Cannot determine a pipeline context for {path}")]
    Unresolvable {
        path: String,
        #[source]
        source: PlatformError,
    },

    #[error("Cannot determine a pipeline context: the previous context has no entity scope")]
    NoFallbackScope(#[source] PlatformError),
}

/// Per-event hook installation failure. Logged and skipped, never fatal.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("Host does not expose a slot for event {0:?}")]
    MissingSlot(SceneEvent),

    #[error("Host rejected hook for event {event:?}: {reason}")]
    Rejected { event: SceneEvent, reason: String },
}

/// Failure while mutating the host menu tree.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Menu entry index {0} is out of range")]
    IndexOutOfRange(usize),

    #[error("Host menu resource rejected the update: {0}")]
    Rejected(String),
}

/// Engine-level errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(
        "The host version {found} is not supported. \
         The minimum supported version is {minimum}."
    )]
    UnsupportedHostVersion { found: u32, minimum: u32 },

    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Menu error: {0}")]
    Menu(#[from] MenuError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<crate::config::SettingsError> for EngineError {
    fn from(err: crate::config::SettingsError) -> Self {
        EngineError::Config(err.to_string())
    }
}
