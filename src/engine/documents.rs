//! Document-context surface for the scene-operation collaborator.
//!
//! The thin hook that intercepts host open/save/save-as calls records which
//! context each file was touched under, and consults that record before
//! falling back to path inference. Operations are a typed enum dispatched
//! statically, not string-matched.

use crate::context::{path, Context, ContextCache};
use crate::error::PlatformError;
use crate::platform::PipelinePlatform;
use std::sync::Arc;
use tracing::debug;

/// Cache-first context lookups for document paths.
///
/// This is the only writer of the process-wide [`ContextCache`]; the
/// resolver reads it but never records.
#[derive(Clone)]
pub struct DocumentContexts {
    cache: Arc<ContextCache>,
    platform: Arc<dyn PipelinePlatform>,
}

impl DocumentContexts {
    pub fn new(cache: Arc<ContextCache>, platform: Arc<dyn PipelinePlatform>) -> Self {
        Self { cache, platform }
    }

    /// The context `path` belongs to: the recorded one when an open or save
    /// pinned it, platform resolution otherwise.
    pub fn get_document_context(&self, document_path: &str) -> Result<Context, PlatformError> {
        let absolute = path::absolute_key(document_path);
        if let Some(context) = self.cache.lookup(&absolute) {
            return Ok(context);
        }
        self.platform.context_from_path(&absolute, None)
    }

    /// Records that `path` was opened or saved under `context`.
    ///
    /// The path goes through the same canonical absolute form the resolver
    /// looks up under, so a record made through a symlinked spelling is still
    /// found on the next scene event.
    pub fn set_document_context(&self, document_path: &str, context: Context) {
        self.cache.record(&path::absolute_key(document_path), context);
    }
}

/// Scene file operations requested by pipeline apps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneOperation {
    /// Report the active document's path.
    CurrentPath,
    Open { path: String },
    Save { path: String },
    SaveAs { path: String },
    /// Reset the scene to an empty state.
    Reset,
}

/// Result of one scene operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    Path(String),
    Reset(bool),
    Done,
}

/// Host document manipulation used by scene operations.
pub trait DocumentOps: Send + Sync {
    fn current_path(&self) -> String;
    fn load(&self, path: &str) -> anyhow::Result<()>;
    fn save_as(&self, path: &str) -> anyhow::Result<()>;
    fn reset(&self) -> anyhow::Result<bool>;
}

/// Executes one scene operation, recording the operation's context against
/// the file it touches so later resolution takes the cache fast path.
pub fn execute(
    ops: &dyn DocumentOps,
    contexts: &DocumentContexts,
    operation: SceneOperation,
    context: Option<&Context>,
) -> anyhow::Result<OperationOutcome> {
    debug!(?operation, "scene operation");

    match operation {
        SceneOperation::CurrentPath => Ok(OperationOutcome::Path(ops.current_path())),
        SceneOperation::Open { path } => {
            ops.load(&path)?;
            if let Some(context) = context {
                contexts.set_document_context(&path, context.clone());
            }
            Ok(OperationOutcome::Done)
        }
        SceneOperation::Save { path } | SceneOperation::SaveAs { path } => {
            ops.save_as(&path)?;
            if let Some(context) = context {
                contexts.set_document_context(&path, context.clone());
            }
            Ok(OperationOutcome::Done)
        }
        SceneOperation::Reset => Ok(OperationOutcome::Reset(ops.reset()?)),
    }
}
