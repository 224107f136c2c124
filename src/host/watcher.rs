//! Routes multiple host scene events into a single normalized callback.

use crate::host::events::{
    EventCallback, FireOrder, SceneEvent, SceneEventSource, SubscriptionHandle, SCENE_EVENTS,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared callback type for scene-event notifications.
pub type WatcherCallback = Arc<dyn Fn(SceneEvent) + Send + Sync>;

struct WatcherState {
    handles: Mutex<Vec<SubscriptionHandle>>,
}

impl WatcherState {
    fn teardown(&self, source: &Arc<dyn SceneEventSource>) {
        let drained: Vec<_> = self.handles.lock().drain(..).collect();
        for handle in drained {
            source.unsubscribe(handle);
        }
    }
}

/// Watches the host's scene lifecycle events and invokes one callback for
/// every relevant event.
///
/// The subscription set is installed and torn down as a unit: after
/// [`start_watching`](Self::start_watching) returns, either every available
/// event hook is in place, or the unavailable ones have been logged and
/// skipped. [`stop_watching`](Self::stop_watching) reverts everything that
/// was installed and is a no-op on an already-stopped watcher.
///
/// With `run_once` set, the watcher stops itself before invoking the
/// callback on the first fire, so the callback cannot be re-entered by the
/// same watcher instance.
pub struct SceneEventWatcher {
    source: Arc<dyn SceneEventSource>,
    callback: WatcherCallback,
    run_once: bool,
    state: Arc<WatcherState>,
}

impl SceneEventWatcher {
    /// Creates a watcher and immediately starts watching.
    pub fn new(source: Arc<dyn SceneEventSource>, callback: WatcherCallback, run_once: bool) -> Self {
        let watcher = Self {
            source,
            callback,
            run_once,
            state: Arc::new(WatcherState {
                handles: Mutex::new(Vec::new()),
            }),
        };
        watcher.start_watching();
        watcher
    }

    /// Installs hooks for every scene event plus the exit event.
    ///
    /// Safe to call repeatedly: any hooks from a previous call are reverted
    /// first, so the installed set is always exactly the one from the most
    /// recent call. A hook the host cannot provide is logged and skipped
    /// rather than aborting the rest.
    pub fn start_watching(&self) {
        self.stop_watching();

        let mut handles = Vec::new();

        for event in SCENE_EVENTS {
            match self
                .source
                .subscribe(event, FireOrder::AfterDefault, self.scene_callback())
            {
                Ok(handle) => {
                    debug!(?event, "registered scene event hook");
                    handles.push(handle);
                }
                Err(err) => {
                    warn!(?event, error = %err, "could not hook scene event, skipping");
                }
            }
        }

        // Exit hook: tear down watcher state before the host begins its
        // shutdown sequence.
        match self
            .source
            .subscribe(SceneEvent::Quit, FireOrder::BeforeDefault, self.quit_callback())
        {
            Ok(handle) => handles.push(handle),
            Err(err) => {
                warn!(error = %err, "could not hook host exit event, skipping");
            }
        }

        *self.state.handles.lock() = handles;
    }

    /// Reverts every installed hook. No-op when nothing is installed.
    pub fn stop_watching(&self) {
        self.state.teardown(&self.source);
    }

    fn scene_callback(&self) -> EventCallback {
        let state = self.state.clone();
        let source = self.source.clone();
        let user_callback = self.callback.clone();
        let run_once = self.run_once;

        Box::new(move |event| {
            if run_once {
                state.teardown(&source);
            }
            user_callback(event);
        })
    }

    fn quit_callback(&self) -> EventCallback {
        let state = self.state.clone();
        let source = self.source.clone();

        Box::new(move |_event| {
            debug!("host exiting, tearing down scene event hooks");
            state.teardown(&source);
        })
    }
}

impl Drop for SceneEventWatcher {
    fn drop(&mut self) {
        self.stop_watching();
    }
}
