//! The TOML table tree shared by every store implementation.

use toml::{Table, Value};

use crate::error::{Error, Result};
use crate::path::KeyPath;
use crate::value::SettingValue;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct SettingsTree {
    root: Table,
}

impl SettingsTree {
    pub(crate) fn from_table(root: Table) -> Self {
        Self { root }
    }

    pub(crate) fn table(&self) -> &Table {
        &self.root
    }

    fn group(&self, path: &KeyPath) -> Option<&Table> {
        path.segments()
            .iter()
            .try_fold(&self.root, |table, segment| table.get(segment)?.as_table())
    }

    fn group_mut(&mut self, path: &KeyPath) -> Option<&mut Table> {
        let mut table = &mut self.root;
        for segment in path.segments() {
            table = table.get_mut(segment)?.as_table_mut()?;
        }
        Some(table)
    }

    fn group_or_create(&mut self, path: &KeyPath) -> Result<&mut Table> {
        let mut table = &mut self.root;
        for segment in path.segments() {
            let entry = table
                .entry(segment.clone())
                .or_insert(Value::Table(Table::new()));
            table = match entry {
                Value::Table(child) => child,
                _ => return Err(Error::NotAGroup(path.clone())),
            };
        }
        Ok(table)
    }

    pub(crate) fn groups(&self, path: &KeyPath) -> Vec<String> {
        self.children(path, Value::is_table)
    }

    pub(crate) fn keys(&self, path: &KeyPath) -> Vec<String> {
        self.children(path, |value| SettingValue::from_toml(value).is_some())
    }

    fn children(&self, path: &KeyPath, keep: impl Fn(&Value) -> bool) -> Vec<String> {
        let mut names: Vec<String> = self
            .group(path)
            .map(|table| {
                table
                    .iter()
                    .filter(|(_, value)| keep(value))
                    .map(|(name, _)| name.clone())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    pub(crate) fn get(&self, path: &KeyPath) -> Option<SettingValue> {
        let name = path.last()?;
        let parent = self.group(&path.parent()?)?;
        SettingValue::from_toml(parent.get(name)?)
    }

    pub(crate) fn set(&mut self, path: &KeyPath, value: SettingValue) -> Result<()> {
        let (Some(parent), Some(name)) = (path.parent(), path.last()) else {
            return Err(Error::EmptyPath);
        };
        let table = self.group_or_create(&parent)?;
        table.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Replace the group at `path` with exactly `values`.
    pub(crate) fn replace_group(
        &mut self,
        path: &KeyPath,
        values: impl IntoIterator<Item = (String, SettingValue)>,
    ) -> Result<()> {
        let (Some(parent), Some(name)) = (path.parent(), path.last()) else {
            return Err(Error::EmptyPath);
        };
        let group: Table = values
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect();
        let table = self.group_or_create(&parent)?;
        table.insert(name.to_string(), Value::Table(group));
        Ok(())
    }

    pub(crate) fn remove(&mut self, path: &KeyPath) -> Result<bool> {
        let (Some(parent), Some(name)) = (path.parent(), path.last()) else {
            return Err(Error::EmptyPath);
        };
        Ok(self
            .group_mut(&parent)
            .is_some_and(|table| table.remove(name).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_creates_intermediate_groups() {
        let mut tree = SettingsTree::default();
        tree.set(&"extensions/a_ext/main".into(), "main".into()).unwrap();

        assert_eq!(tree.groups(&"extensions".into()), vec!["a_ext"]);
        assert_eq!(tree.keys(&"extensions/a_ext".into()), vec!["main"]);
    }

    #[test]
    fn set_through_a_value_fails() {
        let mut tree = SettingsTree::default();
        tree.set(&"extensions/a_ext".into(), "flat".into()).unwrap();

        let err = tree
            .set(&"extensions/a_ext/main".into(), "main".into())
            .unwrap_err();
        assert!(matches!(err, Error::NotAGroup(_)), "got {err:?}");
    }

    #[test]
    fn replace_group_drops_previous_children() {
        let mut tree = SettingsTree::default();
        tree.set(&"extensions/a_ext/stale".into(), "old".into()).unwrap();

        tree.replace_group(
            &"extensions/a_ext".into(),
            [("main".to_string(), SettingValue::from("main"))],
        )
        .unwrap();

        assert_eq!(tree.keys(&"extensions/a_ext".into()), vec!["main"]);
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut tree = SettingsTree::default();
        assert!(matches!(tree.remove(&KeyPath::root()), Err(Error::EmptyPath)));
    }
}
