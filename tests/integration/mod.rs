//! Integration tests for the stagelink host integration engine.

mod document_contexts;
mod lifecycle;
