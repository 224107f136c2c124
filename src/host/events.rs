//! Scene lifecycle event model and the host event-source contract.
//!
//! The host exposes its lifecycle notifications as mutable function slots on
//! a global application object. That mechanism is wrapped behind
//! [`SceneEventSource`] so the core never touches ambient globals: tests run
//! against a fake source, and the pre/post firing order is an explicit
//! parameter instead of an implicit function-wrapping trick.

use crate::error::HookError;

/// Host lifecycle events that may invalidate the current context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneEvent {
    New,
    Clear,
    Import,
    Load,
    Save,
    LoadStartupScene,
    /// Host process exit. Watched for teardown only, never routed to the
    /// context-refresh callback.
    Quit,
}

/// The scene events a watcher installs hooks for, exit excluded.
pub const SCENE_EVENTS: [SceneEvent; 6] = [
    SceneEvent::New,
    SceneEvent::Clear,
    SceneEvent::Import,
    SceneEvent::Load,
    SceneEvent::Save,
    SceneEvent::LoadStartupScene,
];

/// Whether a hook fires before or after the host's own default handling.
///
/// Scene-load hooks fire after the default so the host behavior has already
/// executed; the exit hook fires before it so teardown runs against an
/// intact host. Reversing either is a correctness bug, not a style choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOrder {
    BeforeDefault,
    AfterDefault,
}

/// Opaque handle identifying one installed hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(pub u64);

/// Callback invoked when a subscribed event fires.
pub type EventCallback = Box<dyn Fn(SceneEvent) + Send + Sync>;

/// Subscription registry over the host's lifecycle hook slots.
///
/// Implementations must restore the pre-subscription handler on
/// `unsubscribe`, and must tolerate `unsubscribe` being called from inside a
/// firing callback (the watcher tears itself down mid-dispatch for run-once
/// and exit handling).
pub trait SceneEventSource: Send + Sync {
    fn subscribe(
        &self,
        event: SceneEvent,
        order: FireOrder,
        callback: EventCallback,
    ) -> Result<SubscriptionHandle, HookError>;

    fn unsubscribe(&self, handle: SubscriptionHandle);
}
