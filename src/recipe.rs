//! Scoped recipe sessions
//!
//! A [`Recipe`] is one build-configuration session over a [`RecipeBackend`].
//! Declarations accumulate while the session is open; the backend is told to
//! release the session exactly once, either through [`Recipe::finish`] or,
//! on any other exit path, when the session is dropped.

use crate::error::{RecipeError, Result};
use crate::output;
use std::path::{Path, PathBuf};

/// Configuration used by the Akari build.
pub const RELEASE: &str = "Release";

/// Parameters a session is opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeConfig {
    pub configuration: String,
    pub root: PathBuf,
}

impl RecipeConfig {
    pub fn new(configuration: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            configuration: configuration.into(),
            root: root.into(),
        }
    }

    /// The "Release" configuration rooted at `root`.
    pub fn release(root: impl Into<PathBuf>) -> Self {
        Self::new(RELEASE, root)
    }
}

/// Configuration names end up in file names, so they stay plain identifiers.
pub fn validate_configuration_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'));

    if valid {
        Ok(())
    } else {
        Err(RecipeError::InvalidConfiguration(name.to_string()))
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The owning scope finished normally.
    Completed,
    /// The session was dropped on an error or panic path.
    Aborted,
}

/// The recipe/build collaborator a session drives.
///
/// Resolution, fetching and building are entirely the backend's business;
/// a session only reports what was opened, required and released.
pub trait RecipeBackend {
    fn open(&mut self, config: &RecipeConfig) -> Result<()>;

    fn require(&mut self, config: &RecipeConfig, name: &str) -> Result<()>;

    fn release(&mut self, config: &RecipeConfig, requirements: &[String], exit: Exit)
    -> Result<()>;
}

/// An open recipe session.
pub struct Recipe<'a, B: RecipeBackend + ?Sized> {
    config: RecipeConfig,
    backend: &'a mut B,
    requirements: Vec<String>,
    active: bool,
}

impl<'a, B: RecipeBackend + ?Sized> Recipe<'a, B> {
    /// Open a session. Fails with [`RecipeError::AcquisitionFailed`] when the
    /// configuration is unusable or the backend refuses to open it; the
    /// underlying error is kept as its source.
    pub fn open(config: RecipeConfig, backend: &'a mut B) -> Result<Self> {
        let opened = validate_configuration_name(&config.configuration)
            .and_then(|()| backend.open(&config));

        if let Err(e) = opened {
            return Err(RecipeError::AcquisitionFailed {
                configuration: config.configuration,
                root: config.root,
                source: Box::new(e),
            });
        }

        Ok(Self {
            config,
            backend,
            requirements: Vec::new(),
            active: true,
        })
    }

    /// True while the session is open and usable.
    pub fn is_valid(&self) -> bool {
        self.active && !self.config.configuration.is_empty()
    }

    /// Declare a dependency. Errors come from the backend unchanged.
    pub fn require(&mut self, name: &str) -> Result<()> {
        self.backend.require(&self.config, name)?;
        self.requirements.push(name.to_string());
        Ok(())
    }

    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    pub fn configuration(&self) -> &str {
        &self.config.configuration
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Close the session normally and return the declared requirements.
    pub fn finish(mut self) -> Result<Vec<String>> {
        self.active = false;
        let requirements = std::mem::take(&mut self.requirements);
        self.backend
            .release(&self.config, &requirements, Exit::Completed)?;
        Ok(requirements)
    }
}

impl<B: RecipeBackend + ?Sized> Drop for Recipe<'_, B> {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Err(e) = self
            .backend
            .release(&self.config, &self.requirements, Exit::Aborted)
        {
            output::warning(&format!(
                "failed to release recipe '{}': {}",
                self.config.configuration, e
            ));
        }
    }
}
