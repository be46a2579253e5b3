//! On-disk project fixtures.
//!
//! A [`ProjectFixture`] owns a temporary directory laid out like a project
//! rtsgen runs in: an optional `rtsgen.toml` and a template directory.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::TemplateSource;
use crate::util::config::PROJECT_CONFIG_FILE;

/// A temporary project directory.
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    pub fn new() -> Self {
        ProjectFixture {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `rel` inside the project.
    pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `rtsgen.toml`.
    pub fn with_config(self, contents: &str) -> Self {
        self.write(PROJECT_CONFIG_FILE, contents);
        self
    }

    /// Copy every template of `source` below `subdir`.
    pub fn with_templates(self, subdir: &str, source: &dyn TemplateSource) -> Self {
        for name in source.names() {
            let text = source.read(&name).expect("template listed but unreadable");
            self.write(Path::new(subdir).join(&name), &text);
        }
        self
    }

    /// Write a file, creating parent directories.
    pub fn write(&self, rel: impl AsRef<Path>, contents: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(&path, contents).expect("failed to write fixture file");
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        ProjectFixture::new()
    }
}
