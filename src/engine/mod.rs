//! Engine domain: lifecycle orchestration, command routing, and the
//! document-context surface for scene operations.

pub mod documents;
pub mod lifecycle;
pub mod registry;

pub use documents::{
    execute, DocumentContexts, DocumentOps, OperationOutcome, SceneOperation,
};
pub use lifecycle::{Engine, EngineStatus, HostBindings};
pub use registry::CommandRegistry;
