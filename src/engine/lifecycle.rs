//! Engine lifecycle: startup gate, scene-event orchestration, and teardown.

use crate::config::EngineSettings;
use crate::context::{path, Context, ContextCache, ContextResolver};
use crate::engine::documents::DocumentContexts;
use crate::engine::registry::CommandRegistry;
use crate::error::{EngineError, ResolveError};
use crate::host::{
    DialogSeverity, HostApplication, SceneEventSource, SceneEventWatcher, WatcherCallback,
};
use crate::menu::commands::{
    default_command_table, ALTERNATE_MENU_TITLE, DISABLED_COMMAND_ID, DISABLED_MESSAGE, MENU_TITLE,
};
use crate::menu::{MenuCommand, MenuResource, MenuSynchronizer};
use crate::platform::PipelinePlatform;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Oldest host major version the engine will run inside.
const MINIMUM_SUPPORTED_MAJOR: u32 = 20;

/// Newest host major version the integration has been tested against.
/// Anything newer runs with a warning.
const MAXIMUM_TESTED_MAJOR: u32 = 21;

/// External collaborators the engine is constructed over, plus the session
/// state that must survive engine restarts in the same host process.
#[derive(Clone)]
pub struct HostBindings {
    pub host: Arc<dyn HostApplication>,
    pub platform: Arc<dyn PipelinePlatform>,
    pub menu: Arc<dyn MenuResource>,
    pub events: Arc<dyn SceneEventSource>,
    /// Set once the untested-version dialog has been shown. Shared across
    /// engine restarts so the dialog appears at most once per host session.
    pub compatibility_dialog_shown: Arc<AtomicBool>,
}

/// Observable engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineStatus {
    Active(Context),
    Disabled,
    TornDown,
}

enum EngineState {
    Active(Context),
    /// Context resolution failed; the disabled menu is rendered. The last
    /// active context is kept so the next event can still resolve against it.
    Disabled { last_active: Context },
    TornDown,
}

struct EngineCore {
    host: Arc<dyn HostApplication>,
    resolver: ContextResolver,
    synchronizer: MenuSynchronizer,
    commands: Arc<CommandRegistry>,
    menu_title: String,
    command_table: Vec<MenuCommand>,
    state: RwLock<EngineState>,
}

impl EngineCore {
    /// The context to seed the next resolution with: the active one, or in
    /// disabled state the last context that was active.
    fn scope_for_resolution(&self) -> Option<Context> {
        match &*self.state.read() {
            EngineState::Active(context) => Some(context.clone()),
            EngineState::Disabled { last_active } => Some(last_active.clone()),
            EngineState::TornDown => None,
        }
    }

    /// Entry point for every scene event the watcher routes through.
    /// Nothing here may propagate into the host's own error surface.
    fn on_scene_event(&self) {
        let Some(previous) = self.scope_for_resolution() else {
            return;
        };

        let document = self.host.active_document();
        let candidate = if document.has_path() {
            path::document_path(&document.directory, &document.name)
        } else {
            String::new()
        };

        match self.resolver.resolve(&candidate, &previous) {
            Ok(context) => self.activate(context),
            Err(err) => self.enter_disabled(&err),
        }
    }

    /// Commits a successfully resolved context.
    ///
    /// The engine's own state is updated before the menu rebuild: the
    /// synchronizer reads the current context to label the submenu, so
    /// reversing the order would render a stale label. An unchanged context
    /// skips the rebuild to avoid redundant host UI churn.
    fn activate(&self, new_context: Context) {
        let needs_rebuild = {
            let mut state = self.state.write();
            match &*state {
                EngineState::TornDown => return,
                EngineState::Active(current) if *current == new_context => false,
                _ => {
                    debug!(context = %new_context, "switching engine context");
                    *state = EngineState::Active(new_context);
                    true
                }
            }
        };

        if needs_rebuild {
            self.create_menu();
        }
    }

    /// Rebuilds the pipeline menu for the active context. Menu failures are
    /// logged with their full chain and never abort the context switch they
    /// were reacting to.
    fn create_menu(&self) {
        if !self.host.is_gui() {
            return;
        }

        let context = match &*self.state.read() {
            EngineState::Active(context) => context.clone(),
            _ => return,
        };

        if let Err(err) = self
            .synchronizer
            .rebuild(&context, &self.menu_title, &self.command_table)
        {
            error!(error = %err, "menu rebuild failed; context switch is unaffected");
        }
    }

    /// Enters disabled state after a terminal resolution failure: renders
    /// the disabled menu and surfaces a warning. The watcher keeps running,
    /// so the next recognizable file recovers the engine through the normal
    /// event path.
    fn enter_disabled(&self, err: &ResolveError) {
        {
            let mut state = self.state.write();
            let last_active = match &*state {
                EngineState::Active(context) => context.clone(),
                EngineState::Disabled { last_active } => last_active.clone(),
                EngineState::TornDown => return,
            };
            *state = EngineState::Disabled { last_active };
        }

        let diagnostics = error_chain(err);
        error!(error = %diagnostics, "entering disabled state");

        if self.host.is_gui() {
            if let Err(menu_err) = self.synchronizer.render_disabled(&self.menu_title) {
                error!(error = %menu_err, "failed to render the disabled menu");
            }
        }

        self.host.show_dialog(
            DialogSeverity::Warning,
            &format!(
                "The pipeline integration could not determine a context for \
                 the active file and has been disabled.\n\n{diagnostics}"
            ),
        );
    }

    fn status(&self) -> EngineStatus {
        match &*self.state.read() {
            EngineState::Active(context) => EngineStatus::Active(context.clone()),
            EngineState::Disabled { .. } => EngineStatus::Disabled,
            EngineState::TornDown => EngineStatus::TornDown,
        }
    }
}

/// The integration engine: owns the active context, the scene event watcher,
/// and the pipeline menu for one host session.
pub struct Engine {
    bindings: HostBindings,
    settings: EngineSettings,
    cache: Arc<ContextCache>,
    core: Arc<EngineCore>,
    watcher: Option<SceneEventWatcher>,
}

impl Engine {
    /// Initializes the engine on `bootstrap_context`.
    ///
    /// Fails only on an unsupported host version; an untested (newer) host
    /// logs a warning and, gated by `compatibility_dialog_min_version`,
    /// shows a once-per-session dialog. With `automatic_context_switch` off
    /// the engine installs no watcher and keeps the bootstrap context for
    /// its whole lifetime.
    ///
    /// The cache is injected rather than constructed so every engine built
    /// in the same host process (e.g. across re-contextualization) shares
    /// one path-to-context record.
    pub fn start(
        bindings: HostBindings,
        settings: EngineSettings,
        cache: Arc<ContextCache>,
        bootstrap_context: Context,
    ) -> Result<Self, EngineError> {
        check_host_version(
            bindings.host.as_ref(),
            &settings,
            &bindings.compatibility_dialog_shown,
        )?;

        let menu_title = if settings.use_alternate_menu_name {
            ALTERNATE_MENU_TITLE
        } else {
            MENU_TITLE
        };

        let commands = Arc::new(CommandRegistry::new());
        {
            let host = bindings.host.clone();
            commands.register(DISABLED_COMMAND_ID, move || {
                host.show_dialog(DialogSeverity::Warning, DISABLED_MESSAGE);
            });
        }

        let core = Arc::new(EngineCore {
            host: bindings.host.clone(),
            resolver: ContextResolver::new(cache.clone(), bindings.platform.clone()),
            synchronizer: MenuSynchronizer::new(bindings.menu.clone()),
            commands,
            menu_title: menu_title.to_string(),
            command_table: default_command_table(),
            state: RwLock::new(EngineState::Active(bootstrap_context)),
        });

        core.create_menu();

        let watcher = if settings.automatic_context_switch {
            // The callback reads the engine state fresh at fire time, so no
            // reinstall is needed when the context changes.
            let event_core = core.clone();
            let callback: WatcherCallback = Arc::new(move |_event| event_core.on_scene_event());
            Some(SceneEventWatcher::new(
                bindings.events.clone(),
                callback,
                false,
            ))
        } else {
            debug!("automatic context switch is off, engine keeps its bootstrap context");
            None
        };

        debug!(menu_title, "engine initialized");
        Ok(Self {
            bindings,
            settings,
            cache,
            core,
            watcher,
        })
    }

    pub fn status(&self) -> EngineStatus {
        self.core.status()
    }

    /// The active context, absent while disabled or torn down.
    pub fn context(&self) -> Option<Context> {
        match self.core.status() {
            EngineStatus::Active(context) => Some(context),
            _ => None,
        }
    }

    pub fn menu_title(&self) -> &str {
        &self.core.menu_title
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The document-context surface handed to the scene-operation hook.
    pub fn document_contexts(&self) -> DocumentContexts {
        DocumentContexts::new(self.cache.clone(), self.bindings.platform.clone())
    }

    /// Routes a menu invocation back to its registered command.
    pub fn dispatch_command(&self, id: crate::menu::CommandId) {
        self.core.commands.dispatch(id);
    }

    /// Stops watching scene events and tears the engine down. No further
    /// events are processed afterwards.
    pub fn destroy(&mut self) {
        debug!("destroying engine");
        if let Some(watcher) = self.watcher.take() {
            watcher.stop_watching();
        }
        *self.core.state.write() = EngineState::TornDown;
    }
}

/// Supported-version gate with three outcomes: unsupported and fatal,
/// untested with a one-time warning, or fully supported and silent.
fn check_host_version(
    host: &dyn HostApplication,
    settings: &EngineSettings,
    dialog_shown: &AtomicBool,
) -> Result<(), EngineError> {
    let version = host.version();

    if version.major < MINIMUM_SUPPORTED_MAJOR {
        return Err(EngineError::UnsupportedHostVersion {
            found: version.major,
            minimum: MINIMUM_SUPPORTED_MAJOR,
        });
    }

    if version.major > MAXIMUM_TESTED_MAJOR {
        let message = format!(
            "The pipeline integration has not yet been fully tested with \
             host version {version}.\nYou can continue, but you may \
             experience bugs or instability."
        );
        warn!("{message}");

        let show_dialog = host.is_gui()
            && version.major >= settings.compatibility_dialog_min_version
            && !dialog_shown.swap(true, Ordering::SeqCst);
        if show_dialog {
            host.show_dialog(DialogSeverity::Info, &message);
        }
    }

    Ok(())
}

/// Flattens an error and its source chain into one diagnostic string.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str("\nCaused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
