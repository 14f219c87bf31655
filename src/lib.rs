//! Dependency recipe for the Akari renderer
//!
//! A recipe session is opened for one build configuration and root
//! directory, collects `require` declarations, and is released when its
//! scope ends. What the released requirement list turns into is up to the
//! [`RecipeBackend`] driving the session.
//!
//! # Example
//!
//! ```no_run
//! use akari_recipe::{ManifestBackend, manifest};
//!
//! let args: Vec<String> = std::env::args().skip(1).collect();
//! let mut backend = ManifestBackend::new();
//! let declared = manifest::run(&mut backend, ".", &args)?;
//! assert!(declared.len() >= 9);
//! # Ok::<(), akari_recipe::RecipeError>(())
//! ```
//!
//! # Declared libraries
//!
//! - always: openexr, glm, cereal, spdlog, stb, cxxopts, assimp, pybind11, openvdb
//! - `embree`, last, when the token `embree` is passed on the command line

pub mod backend;
pub mod error;
pub mod lock;
pub mod manifest;
pub mod output;
pub mod recipe;

pub use backend::{ManifestBackend, MemoryBackend, Requirements};
pub use error::RecipeError;
pub use recipe::{Exit, Recipe, RecipeBackend, RecipeConfig};
