//! Host domain: application surface, scene event subscription, and the
//! console bridge. The host's global objects and mutable hook slots live
//! behind these traits; nothing else in the crate reaches for them directly.

pub mod api;
pub mod console;
pub mod events;
pub mod watcher;

pub use api::{DialogSeverity, DocumentInfo, HostApplication, HostInfo, HostVersion};
pub use console::{ConsoleLevel, HostConsoleBridge};
pub use events::{
    EventCallback, FireOrder, SceneEvent, SceneEventSource, SubscriptionHandle, SCENE_EVENTS,
};
pub use watcher::{SceneEventWatcher, WatcherCallback};
