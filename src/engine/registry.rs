//! Registry routing menu command identifiers back to engine callbacks.

use crate::menu::CommandId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

type CommandFn = Arc<dyn Fn() + Send + Sync>;

/// Maps the stable command identifiers rendered into the menu to the
/// callbacks that implement them. The host hands back only the identifier on
/// invocation, so the mapping must survive menu rebuilds unchanged.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Mutex<HashMap<CommandId, CommandFn>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the callback for a command id.
    pub fn register(&self, id: CommandId, callback: impl Fn() + Send + Sync + 'static) {
        self.commands.lock().insert(id, Arc::new(callback));
    }

    /// Invokes the callback registered for `id`. Unknown ids are logged and
    /// ignored; a stale menu entry must not take the host down.
    pub fn dispatch(&self, id: CommandId) {
        // Clone the callback out so the lock is not held during the call;
        // a command may register further commands.
        let callback = self.commands.lock().get(&id).cloned();
        match callback {
            Some(callback) => callback(),
            None => warn!(id = id.0, "menu invoked an unregistered command id"),
        }
    }

    pub fn is_registered(&self, id: CommandId) -> bool {
        self.commands.lock().contains_key(&id)
    }
}
