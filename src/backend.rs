//! Recipe backends
//!
//! [`ManifestBackend`] persists the declared requirements of a completed
//! session to `<root>/.recipe/<configuration>.toml` for the build to pick up.
//! [`MemoryBackend`] keeps a journal of every call instead.

use crate::error::{RecipeError, Result};
use crate::lock::{RootLock, acquire_root_lock};
use crate::recipe::{Exit, RecipeBackend, RecipeConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory under the recipe root holding requirements and lock files.
pub const STATE_DIR: &str = ".recipe";

/// On-disk form of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub configuration: String,
    pub requires: Vec<String>,
}

impl Requirements {
    /// Read a requirements file written by [`ManifestBackend`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Path of the requirements file for a configuration.
pub fn requirements_path(config: &RecipeConfig) -> PathBuf {
    config
        .root
        .join(STATE_DIR)
        .join(format!("{}.toml", config.configuration))
}

/// Validate a dependency name to keep it usable as a package identifier
pub fn validate_dependency_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '.'));

    if valid {
        Ok(())
    } else {
        Err(RecipeError::InvalidDependencyName(name.to_string()))
    }
}

/// Backend that writes the requirement list of completed sessions to disk.
#[derive(Debug, Default)]
pub struct ManifestBackend {
    lock: Option<RootLock>,
    written: Option<PathBuf>,
}

impl ManifestBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requirements file written by the last completed session, if any.
    pub fn written(&self) -> Option<&Path> {
        self.written.as_deref()
    }
}

impl RecipeBackend for ManifestBackend {
    fn open(&mut self, config: &RecipeConfig) -> Result<()> {
        if !config.root.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("recipe root is not a directory: {}", config.root.display()),
            )
            .into());
        }

        let state_dir = config.root.join(STATE_DIR);
        std::fs::create_dir_all(&state_dir)?;
        self.lock = Some(acquire_root_lock(&state_dir, &config.configuration)?);
        Ok(())
    }

    fn require(&mut self, _config: &RecipeConfig, name: &str) -> Result<()> {
        validate_dependency_name(name)
    }

    fn release(&mut self, config: &RecipeConfig, requirements: &[String], exit: Exit) -> Result<()> {
        // Dropping the lock is the last thing either branch does.
        let _lock = self.lock.take();

        if exit == Exit::Aborted {
            return Ok(());
        }

        let path = requirements_path(config);
        let doc = Requirements {
            configuration: config.configuration.clone(),
            requires: requirements.to_vec(),
        };
        let content = toml::to_string_pretty(&doc)?;

        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, content)?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }

        self.written = Some(path);
        Ok(())
    }
}

/// A call observed by [`MemoryBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Open,
    Require(String),
    Release(Exit),
}

/// Backend that records calls in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    events: Vec<Event>,
    released: Option<Vec<String>>,
    fail_open: bool,
    reject: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `open` fail.
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Make `require(name)` fail for this one name.
    pub fn rejecting(mut self, name: &str) -> Self {
        self.reject = Some(name.to_string());
        self
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Names passed to `require`, in call order.
    pub fn required(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Require(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Requirement list handed over at release.
    pub fn released(&self) -> Option<&[String]> {
        self.released.as_deref()
    }
}

impl RecipeBackend for MemoryBackend {
    fn open(&mut self, _config: &RecipeConfig) -> Result<()> {
        if self.fail_open {
            return Err(std::io::Error::other("backend unavailable").into());
        }
        self.events.push(Event::Open);
        Ok(())
    }

    fn require(&mut self, _config: &RecipeConfig, name: &str) -> Result<()> {
        if self.reject.as_deref() == Some(name) {
            return Err(RecipeError::InvalidDependencyName(name.to_string()));
        }
        self.events.push(Event::Require(name.to_string()));
        Ok(())
    }

    fn release(&mut self, _config: &RecipeConfig, requirements: &[String], exit: Exit) -> Result<()> {
        self.events.push(Event::Release(exit));
        self.released = Some(requirements.to_vec());
        Ok(())
    }
}
