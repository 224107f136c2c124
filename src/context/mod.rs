//! Context domain: scope model, cache, path normalization, and resolution.
//! Owns how a document path maps to a pipeline scope; the engine and the
//! scene-operation surface consume it via explicit contracts.

pub mod cache;
pub mod path;
pub mod resolver;
pub mod types;

pub use cache::ContextCache;
pub use resolver::ContextResolver;
pub use types::{Context, EntityRef};
