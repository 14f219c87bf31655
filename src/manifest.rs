//! The Akari dependency manifest
//!
//! Nine libraries are always required. `embree` is added last when the
//! literal token `embree` appears among the invocation arguments; every
//! other token is ignored.

use crate::error::{RecipeError, Result};
use crate::output;
use crate::recipe::{Recipe, RecipeBackend, RecipeConfig};
use std::ffi::OsStr;
use std::path::PathBuf;

/// Always-required libraries, in declaration order.
pub const MANDATORY: [&str; 9] = [
    "openexr", "glm", "cereal", "spdlog", "stb", "cxxopts", "assimp", "pybind11", "openvdb",
];

/// Library required only when its name is passed as an argument.
pub const CONDITIONAL: &str = "embree";

/// Whether `args` (excluding the program name) enable the conditional library.
/// Tokens need not be valid UTF-8.
pub fn wants_conditional<S: AsRef<OsStr>>(args: &[S]) -> bool {
    args.iter().any(|a| a.as_ref() == OsStr::new(CONDITIONAL))
}

/// The declaration sequence for `args`.
pub fn requested<S: AsRef<OsStr>>(args: &[S]) -> Vec<&'static str> {
    let mut names = MANDATORY.to_vec();
    if wants_conditional(args) {
        names.push(CONDITIONAL);
    }
    names
}

/// Issue every declaration against an open session, printing each one as
/// soon as the backend has accepted it.
/// The first failing `require` stops the sequence and is returned as is.
pub fn declare<B, S>(recipe: &mut Recipe<'_, B>, args: &[S]) -> Result<()>
where
    B: RecipeBackend + ?Sized,
    S: AsRef<OsStr>,
{
    declare_with(recipe, args, |name| {
        output::sub_action(&format!("require {}", name))
    })
}

/// Like [`declare`], calling `on_declared` after every accepted `require`.
pub fn declare_with<B, S, F>(
    recipe: &mut Recipe<'_, B>,
    args: &[S],
    mut on_declared: F,
) -> Result<()>
where
    B: RecipeBackend + ?Sized,
    S: AsRef<OsStr>,
    F: FnMut(&str),
{
    for name in requested(args) {
        recipe.require(name)?;
        on_declared(name);
    }
    Ok(())
}

/// Open the Release recipe at `root`, declare the manifest and close it.
/// Returns the declared sequence.
pub fn run<B, S>(backend: &mut B, root: impl Into<PathBuf>, args: &[S]) -> Result<Vec<String>>
where
    B: RecipeBackend + ?Sized,
    S: AsRef<OsStr>,
{
    let mut recipe = Recipe::open(RecipeConfig::release(root), backend)?;
    if !recipe.is_valid() {
        return Err(RecipeError::AcquisitionFailed {
            configuration: recipe.configuration().to_string(),
            root: recipe.root().to_path_buf(),
            source: Box::new(RecipeError::Unusable("session closed".to_string())),
        });
    }

    output::action(&format!(
        "Recipe {} at {}",
        recipe.configuration(),
        recipe.root().display()
    ));

    declare(&mut recipe, args)?;
    recipe.finish()
}
