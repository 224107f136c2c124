//! Pipeline platform service boundary.
//!
//! The platform's template and entity resolution engine is an external
//! collaborator. The engine consumes it through this trait and never looks
//! inside: "resolve path -> context" and "resolve entity -> context" are
//! opaque operations.

use crate::context::{Context, EntityRef};
use crate::error::PlatformError;

/// Context resolution services provided by the studio pipeline platform.
///
/// Implementations are expected to scope path resolution to the file's
/// containing project, which may differ from the project currently active in
/// the engine: a session is not assumed to stay within one project for its
/// whole lifetime.
pub trait PipelinePlatform: Send + Sync {
    /// Infers a context from a file path, seeded with a hint context to
    /// disambiguate partial template matches.
    fn context_from_path(
        &self,
        path: &str,
        hint: Option<&Context>,
    ) -> Result<Context, PlatformError>;

    /// Constructs a context from an entity reference alone, without task or
    /// step specificity.
    fn context_from_entity(&self, entity: &EntityRef) -> Result<Context, PlatformError>;
}
