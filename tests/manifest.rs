//! Integration tests for the dependency manifest
//!
//! Every scenario runs against the in-memory backend so the exact sequence
//! of calls the collaborator sees can be checked.

use akari_recipe::backend::Event;
use akari_recipe::{
    Exit, ManifestBackend, MemoryBackend, Recipe, RecipeConfig, RecipeError, Requirements,
    backend, manifest,
};
use tempfile::TempDir;

const MANDATORY: [&str; 9] = [
    "openexr", "glm", "cereal", "spdlog", "stb", "cxxopts", "assimp", "pybind11", "openvdb",
];

fn declared_for(args: &[&str]) -> (Vec<String>, MemoryBackend) {
    let mut backend = MemoryBackend::new();
    let declared = manifest::run(&mut backend, ".", args).unwrap();
    (declared, backend)
}

// =============================================================================
// Declaration scenarios
// =============================================================================

#[test]
fn test_no_args_declares_mandatory_only() {
    let (declared, backend) = declared_for(&[]);

    assert_eq!(declared, MANDATORY);
    assert_eq!(backend.required(), MANDATORY);
}

#[test]
fn test_embree_arg_appends_embree() {
    let (declared, backend) = declared_for(&["embree"]);

    assert_eq!(declared.len(), 10);
    assert_eq!(&declared[..9], MANDATORY);
    assert_eq!(declared[9], "embree");
    assert_eq!(backend.required().last(), Some(&"embree"));
}

#[test]
fn test_unrecognized_tokens_ignored() {
    let (with_noise, _) = declared_for(&["foo", "embree", "bar"]);
    let (plain, _) = declared_for(&["embree"]);
    let (reordered, _) = declared_for(&["bar", "foo", "embree"]);

    assert_eq!(with_noise, plain);
    assert_eq!(reordered, plain);
}

#[test]
fn test_noise_without_trigger_declares_mandatory_only() {
    let (declared, _) = declared_for(&["--embree", "EMBREE", "foo"]);
    assert_eq!(declared, MANDATORY);
}

#[test]
fn test_same_args_same_sequence() {
    let args = ["x", "embree"];
    let (first, _) = declared_for(&args);
    let (second, _) = declared_for(&args);
    assert_eq!(first, second);
}

#[test]
fn test_session_lifecycle_order() {
    let (_, backend) = declared_for(&[]);
    let events = backend.events();

    assert_eq!(events.first(), Some(&Event::Open));
    assert_eq!(events.last(), Some(&Event::Release(Exit::Completed)));
    assert_eq!(events.len(), MANDATORY.len() + 2);
}

// =============================================================================
// Failure paths
// =============================================================================

#[test]
fn test_acquisition_failure_declares_nothing() {
    let mut backend = MemoryBackend::new().failing_open();

    let result = manifest::run(&mut backend, ".", &["embree"]);

    assert!(matches!(result, Err(RecipeError::AcquisitionFailed { .. })));
    assert!(backend.required().is_empty());
    assert!(backend.events().is_empty());
}

#[test]
fn test_require_failure_propagates_and_releases() {
    let mut backend = MemoryBackend::new().rejecting("embree");

    let result = manifest::run(&mut backend, ".", &["embree"]);

    assert!(matches!(result, Err(RecipeError::InvalidDependencyName(ref n)) if n == "embree"));
    assert_eq!(backend.required(), MANDATORY);
    assert_eq!(backend.events().last(), Some(&Event::Release(Exit::Aborted)));
    assert_eq!(backend.released().map(|r| r.len()), Some(9));
}

#[test]
fn test_release_runs_on_panic() {
    let mut backend = MemoryBackend::new();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut recipe = Recipe::open(RecipeConfig::release("."), &mut backend).unwrap();
        recipe.require("glm").unwrap();
        panic!("build step exploded");
    }));

    assert!(result.is_err());
    assert_eq!(backend.events().last(), Some(&Event::Release(Exit::Aborted)));
}

// =============================================================================
// Requirements file
// =============================================================================

#[test]
fn test_manifest_backend_writes_requirements() {
    let dir = TempDir::new().unwrap();
    let mut backend = ManifestBackend::new();

    manifest::run(&mut backend, dir.path(), &["embree"]).unwrap();

    let path = backend::requirements_path(&RecipeConfig::release(dir.path()));
    let doc = Requirements::load(&path).unwrap();
    assert_eq!(doc.configuration, "Release");
    assert_eq!(doc.requires.len(), 10);
    assert_eq!(doc.requires.last().map(String::as_str), Some("embree"));
}

#[test]
fn test_manifest_backend_rerun_overwrites() {
    let dir = TempDir::new().unwrap();
    let path = backend::requirements_path(&RecipeConfig::release(dir.path()));

    manifest::run(&mut ManifestBackend::new(), dir.path(), &["embree"]).unwrap();
    manifest::run(&mut ManifestBackend::new(), dir.path(), &[] as &[&str]).unwrap();

    let doc = Requirements::load(&path).unwrap();
    assert_eq!(doc.requires, MANDATORY);
}

#[test]
fn test_manifest_backend_locked_root_fails_fast() {
    let dir = TempDir::new().unwrap();
    let mut holder = ManifestBackend::new();
    let _held = Recipe::open(RecipeConfig::release(dir.path()), &mut holder).unwrap();

    let mut backend = ManifestBackend::new();
    let result = manifest::run(&mut backend, dir.path(), &["embree"]);

    match result {
        Err(RecipeError::AcquisitionFailed { source, .. }) => {
            assert!(matches!(*source, RecipeError::Locked { .. }));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(backend.written().is_none());
}
