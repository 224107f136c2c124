//! Process-wide cache of contexts recorded against document paths.

use crate::context::path::normalize_key;
use crate::context::Context;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Maps normalized document paths to the context they were opened or saved
/// under.
///
/// The cache is a fast-path override for path-based context inference: when a
/// file was explicitly associated with a context by a scene operation, later
/// lookups return that context without re-running template matching. Entries
/// live for the host process lifetime; there is no eviction and no on-disk
/// persistence.
///
/// Writes come only from the scene-operation collaborator
/// ([`set_document_context`](crate::engine::DocumentContexts::set_document_context));
/// the resolver only reads.
#[derive(Debug, Default)]
pub struct ContextCache {
    entries: RwLock<HashMap<String, Context>>,
}

impl ContextCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the context a path was opened or saved under.
    /// Overwrites any previous entry for the same normalized path.
    pub fn record(&self, path: &str, context: Context) {
        self.entries.write().insert(normalize_key(path), context);
    }

    /// Looks up the context recorded for a path, if any.
    pub fn lookup(&self, path: &str) -> Option<Context> {
        self.entries.read().get(&normalize_key(path)).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
