//! Derives the active pipeline context for the document open in the host.

use crate::context::path;
use crate::context::{Context, ContextCache};
use crate::error::ResolveError;
use crate::platform::PipelinePlatform;
use std::sync::Arc;
use tracing::{debug, warn};

/// Computes the context a candidate document path belongs to.
///
/// Resolution order: empty path keeps the previous context, a cache hit
/// short-circuits template matching, direct platform resolution wins over
/// everything else, and an entity-scope fallback recovers a coarser context
/// as a last resort. The resolver only ever reads the cache.
pub struct ContextResolver {
    cache: Arc<ContextCache>,
    platform: Arc<dyn PipelinePlatform>,
}

impl ContextResolver {
    pub fn new(cache: Arc<ContextCache>, platform: Arc<dyn PipelinePlatform>) -> Self {
        Self { cache, platform }
    }

    /// Resolves the context for `candidate_path`.
    ///
    /// Fails with [`ResolveError`] only when neither direct resolution nor
    /// the entity-scope fallback can produce a context; the caller is then
    /// responsible for entering disabled state rather than retrying.
    pub fn resolve(
        &self,
        candidate_path: &str,
        previous: &Context,
    ) -> Result<Context, ResolveError> {
        // An untitled session carries no information to re-derive scope
        // from, so the prior scope is retained.
        if candidate_path.is_empty() {
            debug!("no active document, keeping context {previous}");
            return Ok(previous.clone());
        }

        let absolute = path::absolute_key(candidate_path);

        if let Some(cached) = self.cache.lookup(&absolute) {
            debug!(path = %absolute, context = %cached, "context cache hit");
            return Ok(cached);
        }

        match self.platform.context_from_path(&absolute, Some(previous)) {
            Ok(context) => {
                debug!(path = %absolute, context = %context, "resolved context from path");
                Ok(context)
            }
            Err(platform_err) => self.resolve_fallback(&absolute, previous, platform_err),
        }
    }

    /// Degraded fallback: rebuild a context from the entity portion of the
    /// previous context, dropping task specificity. Recovers a usable but
    /// coarser scope when the new file lives under the same entity without
    /// fully matching a template.
    fn resolve_fallback(
        &self,
        path: &str,
        previous: &Context,
        platform_err: crate::error::PlatformError,
    ) -> Result<Context, ResolveError> {
        let Some(entity) = previous.entity_scope() else {
            return Err(ResolveError::NoFallbackScope(platform_err));
        };

        match self.platform.context_from_entity(entity) {
            Ok(context) => {
                warn!(
                    path,
                    context = %context,
                    "path did not match a template, fell back to entity scope"
                );
                Ok(context)
            }
            Err(fallback_err) => {
                debug!(path, error = %fallback_err, "entity-scope fallback also failed");
                Err(ResolveError::Unresolvable {
                    path: path.to_string(),
                    source: platform_err,
                })
            }
        }
    }
}
