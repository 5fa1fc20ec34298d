use crate::error::Result;
use crate::path::KeyPath;
use crate::value::SettingValue;

/// A hierarchical key-value store scoped to the current user.
///
/// Every call names its full [`KeyPath`]. Reads are served from memory;
/// writes may fail if the backing storage does.
pub trait SettingsStore {
    /// Names of the child groups under `path`, sorted.
    fn groups(&self, path: &KeyPath) -> Vec<String>;

    /// Names of the scalar values directly under `path`, sorted.
    fn keys(&self, path: &KeyPath) -> Vec<String>;

    /// The scalar value at `path`.
    fn get(&self, path: &KeyPath) -> Option<SettingValue>;

    /// Store `value` at `path`, creating missing groups.
    fn set(&mut self, path: &KeyPath, value: SettingValue) -> Result<()>;

    /// Replace the group at `path` with exactly `values` in one write.
    /// On error the store is left as it was.
    fn replace_group(&mut self, path: &KeyPath, values: Vec<(String, SettingValue)>) -> Result<()>;

    /// Remove the value or whole group at `path`. Returns whether anything
    /// was removed. The root can not be removed.
    fn remove(&mut self, path: &KeyPath) -> Result<bool>;

    /// Whether a group exists at `path`.
    fn contains_group(&self, path: &KeyPath) -> bool {
        match (path.parent(), path.last()) {
            (Some(parent), Some(name)) => self.groups(&parent).iter().any(|group| group == name),
            _ => true,
        }
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for Box<S> {
    fn groups(&self, path: &KeyPath) -> Vec<String> {
        (**self).groups(path)
    }

    fn keys(&self, path: &KeyPath) -> Vec<String> {
        (**self).keys(path)
    }

    fn get(&self, path: &KeyPath) -> Option<SettingValue> {
        (**self).get(path)
    }

    fn set(&mut self, path: &KeyPath, value: SettingValue) -> Result<()> {
        (**self).set(path, value)
    }

    fn replace_group(&mut self, path: &KeyPath, values: Vec<(String, SettingValue)>) -> Result<()> {
        (**self).replace_group(path, values)
    }

    fn remove(&mut self, path: &KeyPath) -> Result<bool> {
        (**self).remove(path)
    }
}
