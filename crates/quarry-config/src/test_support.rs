//! Directory-tree fixture for discovery tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A scratch directory tree that config files can be dropped into.
pub struct ConfigTree {
    /// Removed on drop.
    dir: TempDir,
}

impl ConfigTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// The top of the tree.
    pub fn top(&self) -> &Path {
        self.dir.path()
    }

    /// Ensures `rel` exists below the top and returns its absolute path.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.top().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `.quarry.toml` into `rel` with the given contents.
    pub fn config(&self, rel: &str, toml: &str) -> PathBuf {
        let path = self.mkdir(rel).join(CONFIG_FILENAME);
        fs::write(&path, toml).unwrap();
        path
    }

    /// Writes a `.quarry.toml` that sets a default field, so merges can tell files apart.
    pub fn field_config(&self, rel: &str, field: &str) -> PathBuf {
        self.config(rel, &format!("[query]\ndefault_field = \"{field}\"\n"))
    }
}
