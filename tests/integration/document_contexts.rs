//! Document-context surface used by the scene-operation hook: cache-first
//! lookup with platform fallback, and consistent path normalization.

use super::test_utils::{FakeHost, FakePlatform, TestRig};
use stagelink::config::EngineSettings;
use stagelink::context::{Context, ContextCache, EntityRef};
use stagelink::engine::{execute, DocumentContexts, DocumentOps, OperationOutcome, SceneOperation};
use stagelink::error::PlatformError;
use std::sync::Arc;

fn shot_context() -> Context {
    Context::for_project("Project Y").with_entity(EntityRef::new("Shot", "sh010"))
}

#[test]
fn test_cache_precedence_over_platform_inference() {
    let platform = Arc::new(FakePlatform::new());
    platform.register_tree("/proj", Context::for_project("Inferred"));
    let contexts = DocumentContexts::new(Arc::new(ContextCache::new()), platform);

    contexts.set_document_context("/proj/shot.ext", shot_context());

    assert_eq!(
        contexts.get_document_context("/proj/shot.ext").unwrap(),
        shot_context()
    );
    // paths without a recorded context still fall through to the platform
    assert_eq!(
        contexts.get_document_context("/proj/other.ext").unwrap(),
        Context::for_project("Inferred")
    );
}

#[test]
fn test_normalization_matches_across_case_and_separators() {
    let contexts = DocumentContexts::new(Arc::new(ContextCache::new()), Arc::new(FakePlatform::new()));

    contexts.set_document_context("C:\\A\\b.ext", shot_context());

    assert_eq!(
        contexts.get_document_context("c:/a/B.EXT").unwrap(),
        shot_context()
    );
}

#[test]
fn test_unknown_path_without_cache_entry_fails() {
    let contexts = DocumentContexts::new(Arc::new(ContextCache::new()), Arc::new(FakePlatform::new()));

    assert!(matches!(
        contexts.get_document_context("/nowhere.ext"),
        Err(PlatformError::UnmatchedPath(_))
    ));
}

/// A save recorded through the scene-operation surface pins the saved path's
/// context, so the following scene event resolves it from the cache even
/// when no template would match.
#[test]
fn test_saved_document_resolves_from_cache_on_next_event() {
    struct SavingOps;

    impl DocumentOps for SavingOps {
        fn current_path(&self) -> String {
            String::new()
        }

        fn load(&self, _path: &str) -> anyhow::Result<()> {
            Ok(())
        }

        fn save_as(&self, _path: &str) -> anyhow::Result<()> {
            Ok(())
        }

        fn reset(&self) -> anyhow::Result<bool> {
            Ok(false)
        }
    }

    let rig = TestRig::new();
    let engine = rig.start_engine(EngineSettings::default(), Context::for_project("Project X"));
    let contexts = engine.document_contexts();

    let outcome = execute(
        &SavingOps,
        &contexts,
        SceneOperation::SaveAs {
            path: "/untemplated/area/scene_v001.ext".to_string(),
        },
        Some(&shot_context()),
    )
    .unwrap();
    assert_eq!(outcome, OperationOutcome::Done);

    rig.host.set_document("/untemplated/area", "scene_v001.ext");
    rig.events.fire(stagelink::host::SceneEvent::Save);

    assert_eq!(
        engine.status(),
        stagelink::engine::EngineStatus::Active(shot_context())
    );
}

/// A context recorded through a symlinked spelling of a directory must still
/// be found when a later scene event reports the canonical path: writes and
/// lookups both go through the same canonical absolute form.
#[cfg(unix)]
#[test]
fn test_recorded_context_survives_symlinked_path_spelling() {
    use std::os::unix::fs::symlink;

    let temp = tempfile::TempDir::new().unwrap();
    let real = temp.path().join("real");
    std::fs::create_dir(&real).unwrap();
    std::fs::write(real.join("scene_v001.ext"), b"").unwrap();
    symlink(&real, temp.path().join("link")).unwrap();

    let rig = TestRig::new();
    let engine = rig.start_engine(EngineSettings::default(), Context::for_project("Project X"));

    let linked = temp.path().join("link").join("scene_v001.ext");
    engine
        .document_contexts()
        .set_document_context(linked.to_str().unwrap(), shot_context());

    // recorded under the symlink, reported back under the real directory
    rig.host
        .set_document(real.to_str().unwrap(), "scene_v001.ext");
    rig.events.fire(stagelink::host::SceneEvent::Load);

    assert_eq!(
        engine.status(),
        stagelink::engine::EngineStatus::Active(shot_context())
    );
    assert_eq!(
        engine
            .document_contexts()
            .get_document_context(linked.to_str().unwrap())
            .unwrap(),
        shot_context()
    );
}

/// Console output is UI-affecting, so every line must be marshaled through
/// the host's run-on-main-thread facility.
#[test]
fn test_console_bridge_marshals_to_main_thread() {
    use stagelink::host::{ConsoleLevel, HostConsoleBridge};
    use std::sync::atomic::Ordering;

    let host = Arc::new(FakeHost::new());
    let bridge = HostConsoleBridge::new(host.clone());

    bridge.emit(ConsoleLevel::Warning, "context lost");
    bridge.emit(ConsoleLevel::Info, "context restored");

    assert_eq!(host.main_thread_calls.load(Ordering::SeqCst), 2);
    let console = host.console.lock();
    assert_eq!(console.len(), 2);
    assert!(console[0].contains("Stagelink Warning"));
    assert!(console[0].contains("context lost"));
}
