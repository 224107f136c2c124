//! End-to-end engine lifecycle: startup, context switches on scene events,
//! disabled-state entry and recovery, and teardown.

use super::test_utils::TestRig;
use stagelink::config::EngineSettings;
use stagelink::context::{Context, EntityRef};
use stagelink::engine::EngineStatus;
use stagelink::host::SceneEvent;
use stagelink::menu::commands::DISABLED_COMMAND_ID;
use stagelink::menu::MenuItem;
use std::sync::atomic::Ordering;

fn shot_context() -> Context {
    Context::for_project("Project Y").with_entity(EntityRef::new("Shot", "sh010"))
}

/// E2E scenario A: no active document keeps the previous context with no
/// menu rebuild.
#[test]
fn test_untitled_session_keeps_context_without_rebuild() {
    let rig = TestRig::new();
    let engine = rig.start_engine(EngineSettings::default(), Context::for_project("Project X"));
    rig.host.clear_document();

    let refreshes_before = rig.menu.refresh_count.load(Ordering::SeqCst);
    rig.events.fire(SceneEvent::New);

    assert_eq!(
        engine.status(),
        EngineStatus::Active(Context::for_project("Project X"))
    );
    assert_eq!(rig.menu.refresh_count.load(Ordering::SeqCst), refreshes_before);
}

/// E2E scenario B: opening a template-matched file switches context and
/// rebuilds the menu with the new context label.
#[test]
fn test_opening_recognized_file_switches_context_and_menu() {
    let rig = TestRig::new();
    rig.platform.register_tree("/proj/shots", shot_context());
    let engine = rig.start_engine(EngineSettings::default(), Context::for_project("Project X"));

    rig.host.set_document("/proj/shots/sh010/work", "scene_v003.ext");
    rig.events.fire(SceneEvent::Load);

    assert_eq!(engine.status(), EngineStatus::Active(shot_context()));

    let nodes = rig.menu.nodes_titled(engine.menu_title());
    assert_eq!(nodes.len(), 1);
    let MenuItem::Submenu(submenu) = &nodes[0].items[0] else {
        panic!("first menu item should be the context submenu");
    };
    assert_eq!(submenu.subtitle, "Project Y > sh010");
}

/// E2E scenario C: an unmatched path degrades to the previous context's
/// entity scope, dropping the task, and stays Active.
#[test]
fn test_unmatched_path_degrades_to_entity_scope() {
    let rig = TestRig::new();
    rig.platform.register_entity("sh010", shot_context());
    let bootstrap = shot_context().with_task("comp");
    let engine = rig.start_engine(EngineSettings::default(), bootstrap);

    rig.host.set_document("/outside/any/template", "scratch.ext");
    rig.events.fire(SceneEvent::Load);

    assert_eq!(engine.status(), EngineStatus::Active(shot_context()));
}

/// E2E scenario D: nothing resolvable at all disables the engine and
/// renders the single-entry disabled menu plus a warning.
#[test]
fn test_unresolvable_file_disables_engine() {
    let rig = TestRig::new();
    let engine = rig.start_engine(EngineSettings::default(), Context::for_project("Project X"));

    rig.host.set_document("/completely/unrelated", "mystery.ext");
    rig.events.fire(SceneEvent::Load);

    assert_eq!(engine.status(), EngineStatus::Disabled);

    let nodes = rig.menu.nodes_titled(engine.menu_title());
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].items.len(), 1);
    assert!(!rig.host.warnings().is_empty());
}

/// P7: a successful event after a failed one recovers the engine; the
/// normal menu replaces the disabled one entirely.
#[test]
fn test_disabled_engine_recovers_on_next_resolvable_event() {
    let rig = TestRig::new();
    rig.platform.register_tree("/proj/shots", shot_context());
    let engine = rig.start_engine(EngineSettings::default(), Context::for_project("Project X"));

    rig.host.set_document("/completely/unrelated", "mystery.ext");
    rig.events.fire(SceneEvent::Load);
    assert_eq!(engine.status(), EngineStatus::Disabled);

    rig.host.set_document("/proj/shots/sh010/work", "scene_v004.ext");
    rig.events.fire(SceneEvent::Load);

    assert_eq!(engine.status(), EngineStatus::Active(shot_context()));
    let nodes = rig.menu.nodes_titled(engine.menu_title());
    assert_eq!(nodes.len(), 1);
    assert!(nodes[0].items.len() > 1, "normal menu, not the disabled one");
}

/// P1 through the engine surface: a recorded document context wins over
/// whatever the platform would infer for the path.
#[test]
fn test_recorded_document_context_overrides_inference() {
    let rig = TestRig::new();
    rig.platform
        .register_tree("/proj/shots", Context::for_project("Wrong"));
    let engine = rig.start_engine(EngineSettings::default(), Context::for_project("Project X"));

    let pinned = shot_context();
    engine
        .document_contexts()
        .set_document_context("/proj/shots/sh010/work/scene_v003.ext", pinned.clone());

    rig.host.set_document("/proj/shots/sh010/work", "scene_v003.ext");
    rig.events.fire(SceneEvent::Load);

    assert_eq!(engine.status(), EngineStatus::Active(pinned));
}

#[test]
fn test_same_context_event_skips_menu_rebuild() {
    let rig = TestRig::new();
    rig.platform.register_tree("/proj/shots", shot_context());
    let engine = rig.start_engine(EngineSettings::default(), Context::for_project("Project X"));

    rig.host.set_document("/proj/shots/sh010/work", "scene_v003.ext");
    rig.events.fire(SceneEvent::Load);
    let refreshes_after_switch = rig.menu.refresh_count.load(Ordering::SeqCst);

    rig.events.fire(SceneEvent::Save);
    assert_eq!(engine.status(), EngineStatus::Active(shot_context()));
    assert_eq!(
        rig.menu.refresh_count.load(Ordering::SeqCst),
        refreshes_after_switch
    );
}

#[test]
fn test_automatic_context_switch_off_installs_no_hooks() {
    let rig = TestRig::new();
    rig.platform.register_tree("/proj/shots", shot_context());
    let settings = EngineSettings {
        automatic_context_switch: false,
        ..EngineSettings::default()
    };
    let engine = rig.start_engine(settings, Context::for_project("Project X"));

    assert_eq!(rig.events.installed_count(), 0);

    rig.host.set_document("/proj/shots/sh010/work", "scene_v003.ext");
    rig.events.fire(SceneEvent::Load);
    assert_eq!(
        engine.status(),
        EngineStatus::Active(Context::for_project("Project X"))
    );
}

#[test]
fn test_alternate_menu_name_setting() {
    let rig = TestRig::new();
    let settings = EngineSettings {
        use_alternate_menu_name: true,
        ..EngineSettings::default()
    };
    let engine = rig.start_engine(settings, Context::for_project("Project X"));

    assert_eq!(engine.menu_title(), "Stagelink");
    assert_eq!(rig.menu.nodes_titled("Stagelink").len(), 1);
}

#[test]
fn test_disabled_menu_command_surfaces_warning() {
    let rig = TestRig::new();
    let engine = rig.start_engine(EngineSettings::default(), Context::for_project("Project X"));

    engine.dispatch_command(DISABLED_COMMAND_ID);

    let warnings = rig.host.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("disabled"));
}

#[test]
fn test_destroy_stops_event_processing() {
    let rig = TestRig::new();
    rig.platform.register_tree("/proj/shots", shot_context());
    let mut engine = rig.start_engine(EngineSettings::default(), Context::for_project("Project X"));

    engine.destroy();
    assert_eq!(rig.events.installed_count(), 0);
    assert_eq!(engine.status(), EngineStatus::TornDown);

    rig.host.set_document("/proj/shots/sh010/work", "scene_v003.ext");
    rig.events.fire(SceneEvent::Load);
    assert_eq!(engine.status(), EngineStatus::TornDown);
}

/// The untested-version dialog appears at most once per host session, even
/// when the engine is restarted with the same bindings.
#[test]
fn test_untested_version_dialog_shown_once_per_session() {
    use stagelink::engine::Engine;
    use stagelink::host::{DialogSeverity, HostVersion};
    use std::sync::Arc;

    let rig = TestRig::new();
    let host = Arc::new(super::test_utils::FakeHost::with_version(HostVersion::new(25, 0)));
    let mut bindings = rig.bindings();
    bindings.host = host.clone();

    let first = Engine::start(
        bindings.clone(),
        EngineSettings::default(),
        rig.cache.clone(),
        Context::for_project("Project X"),
    )
    .unwrap();
    drop(first);

    let _second = Engine::start(
        bindings,
        EngineSettings::default(),
        rig.cache.clone(),
        Context::for_project("Project X"),
    )
    .unwrap();

    let dialogs = host.dialogs.lock();
    assert_eq!(dialogs.len(), 1);
    assert_eq!(dialogs[0].0, DialogSeverity::Info);
}

#[test]
fn test_unsupported_host_version_refuses_to_start() {
    use stagelink::engine::Engine;
    use stagelink::error::EngineError;
    use stagelink::host::HostVersion;

    let rig = TestRig::new();
    let mut bindings = rig.bindings();
    bindings.host = std::sync::Arc::new(super::test_utils::FakeHost::with_version(
        HostVersion::new(19, 0),
    ));

    let result = Engine::start(
        bindings,
        EngineSettings::default(),
        rig.cache.clone(),
        Context::for_project("Project X"),
    );
    assert!(matches!(
        result,
        Err(EngineError::UnsupportedHostVersion { found: 19, minimum: 20 })
    ));
}
