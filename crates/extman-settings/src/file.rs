//! Settings persisted to a TOML file.
//!
//! The file is read once under a shared lock when opened. Every mutation
//! rewrites it atomically under an exclusive lock. A mutation whose write
//! fails is undone in memory, so the tree always matches the file.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::KeyPath;
use crate::store::SettingsStore;
use crate::tree::SettingsTree;
use crate::value::SettingValue;

/// A settings store backed by a TOML file.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
    tree: SettingsTree,
}

impl FileSettings {
    /// Open the settings file at `path`. A missing file is an empty store;
    /// the file is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tree = match extman_fs::io::read_locked(&path)? {
            Some(content) => {
                let table = toml::from_str::<toml::Table>(&content).map_err(|e| Error::Parse {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                SettingsTree::from_table(table)
            }
            None => SettingsTree::default(),
        };
        tracing::debug!(path = %path.display(), "Opened settings file");
        Ok(Self { path, tree })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let content = toml::to_string_pretty(self.tree.table())?;
        extman_fs::io::write_atomic(&self.path, content.as_bytes())?;
        tracing::trace!(path = %self.path.display(), "Saved settings file");
        Ok(())
    }

    /// Apply `change` to the tree and persist it, restoring the previous
    /// tree if either step fails.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut SettingsTree) -> Result<T>,
        changed: impl Fn(&T) -> bool,
    ) -> Result<T> {
        let previous = self.tree.clone();
        let outcome = change(&mut self.tree).and_then(|value| {
            if changed(&value) {
                self.save()?;
            }
            Ok(value)
        });
        if let Err(e) = &outcome {
            tracing::warn!(path = %self.path.display(), error = %e, "Settings change rolled back");
            self.tree = previous;
        }
        outcome
    }
}

impl SettingsStore for FileSettings {
    fn groups(&self, path: &KeyPath) -> Vec<String> {
        self.tree.groups(path)
    }

    fn keys(&self, path: &KeyPath) -> Vec<String> {
        self.tree.keys(path)
    }

    fn get(&self, path: &KeyPath) -> Option<SettingValue> {
        self.tree.get(path)
    }

    fn set(&mut self, path: &KeyPath, value: SettingValue) -> Result<()> {
        self.commit(|tree| tree.set(path, value), |_| true)
    }

    fn replace_group(&mut self, path: &KeyPath, values: Vec<(String, SettingValue)>) -> Result<()> {
        self.commit(|tree| tree.replace_group(path, values), |_| true)
    }

    fn remove(&mut self, path: &KeyPath) -> Result<bool> {
        self.commit(|tree| tree.remove(path), |removed| *removed)
    }
}
