//! Package manifest access
//!
//! The current version lives in `package.json`, or in `lerna.json` for
//! monorepos managed in lerna mode. Writes go back as 2-space JSON with the
//! original key order, and are mirrored into `package-lock.json` when one
//! exists.

use crate::error::{ReleaseError, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const PACKAGE_MANIFEST: &str = "package.json";
pub const LOCK_MANIFEST: &str = "package-lock.json";
pub const WORKSPACE_MANIFEST: &str = "lerna.json";

/// A JSON manifest loaded from disk
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    document: Value,
}

impl Manifest {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content =
            fs::read_to_string(&path).map_err(|e| ReleaseError::manifest_read(&path, e))?;
        let document: Value =
            serde_json::from_str(&content).map_err(|e| ReleaseError::manifest_read(&path, e))?;
        if !document.is_object() {
            return Err(ReleaseError::manifest_read(&path, "expected a JSON object"));
        }
        Ok(Manifest { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `version` field
    pub fn version(&self) -> Result<&str> {
        self.document
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| ReleaseError::manifest_read(&self.path, "missing \"version\" field"))
    }

    /// The `packages` globs (workspace manifests only)
    pub fn packages(&self) -> Vec<String> {
        self.document
            .get("packages")
            .and_then(Value::as_array)
            .map(|globs| {
                globs
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set_version(&mut self, version: &str) {
        if let Value::Object(map) = &mut self.document {
            map.insert("version".to_string(), Value::String(version.to_string()));
        }
    }

    /// Lock files carry the root package version twice.
    fn set_lock_version(&mut self, version: &str) {
        self.set_version(version);
        if let Some(Value::Object(root)) = self
            .document
            .get_mut("packages")
            .and_then(|packages| packages.get_mut(""))
        {
            root.insert("version".to_string(), Value::String(version.to_string()));
        }
    }

    pub fn save(&self) -> Result<()> {
        let mut content = serde_json::to_string_pretty(&self.document)
            .map_err(|e| ReleaseError::manifest_write(&self.path, e))?;
        content.push('\n');
        fs::write(&self.path, content).map_err(|e| ReleaseError::manifest_write(&self.path, e))
    }
}

/// Manifests of one project directory
#[derive(Debug, Clone)]
pub struct ProjectManifests {
    dir: PathBuf,
    lerna_mode: bool,
}

impl ProjectManifests {
    pub fn new(dir: impl Into<PathBuf>, lerna_mode: bool) -> Self {
        ProjectManifests {
            dir: dir.into(),
            lerna_mode,
        }
    }

    /// Path of the manifest holding the version
    pub fn version_manifest_path(&self) -> PathBuf {
        if self.lerna_mode {
            self.dir.join(WORKSPACE_MANIFEST)
        } else {
            self.dir.join(PACKAGE_MANIFEST)
        }
    }

    pub fn load(&self) -> Result<Manifest> {
        Manifest::load(self.version_manifest_path())
    }

    /// Current version and, in lerna mode, the workspace package globs
    pub fn current(&self) -> Result<(String, Vec<String>)> {
        let manifest = self.load()?;
        let version = manifest.version()?.to_string();
        let packages = if self.lerna_mode {
            manifest.packages()
        } else {
            Vec::new()
        };
        Ok((version, packages))
    }

    /// Record a new version, then mirror it into the lock file when present.
    ///
    /// Lock file problems are logged and ignored.
    pub fn write_version(&self, version: &str) -> Result<()> {
        let mut manifest = self.load()?;
        manifest.set_version(version);
        manifest.save()?;
        tracing::debug!(path = %manifest.path().display(), version, "manifest updated");

        if !self.lerna_mode {
            if let Err(e) = self.mirror_lock(version) {
                tracing::warn!(error = %e, "unable to update {}", LOCK_MANIFEST);
            }
        }
        Ok(())
    }

    fn mirror_lock(&self, version: &str) -> Result<()> {
        let path = self.dir.join(LOCK_MANIFEST);
        if !path.exists() {
            return Ok(());
        }
        let mut lock = Manifest::load(path)?;
        lock.set_lock_version(version);
        lock.save()
    }
}
