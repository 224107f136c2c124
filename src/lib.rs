//! Stagelink: pipeline context tracking for a 3D content-creation host.
//!
//! Keeps the host's notion of "current working context" (project / entity /
//! task) in sync with the files opened and saved inside it, and mirrors the
//! active context into the host's pipeline menu. Context resolution degrades
//! gracefully: files the pipeline platform cannot recognize put the engine
//! into a disabled state it recovers from on the next resolvable file.

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod host;
pub mod logging;
pub mod menu;
pub mod platform;
