//! Persistence behaviour of the TOML-backed store.

use extman_settings::{Error, FileSettings, KeyPath, SettingValue, SettingsStore};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn missing_file_opens_empty_and_is_created_on_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("extensions.toml");

    let mut settings = FileSettings::open(&path).unwrap();
    assert!(settings.groups(&KeyPath::root()).is_empty());
    assert!(!path.exists());

    settings
        .set(&KeyPath::from("extensions/a_ext/main"), "main".into())
        .unwrap();
    assert!(path.exists());
}

#[test]
fn values_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("extensions.toml");

    {
        let mut settings = FileSettings::open(&path).unwrap();
        let group = KeyPath::from("extensions/a_ext");
        settings.set(&group.child("parent"), "Tools".into()).unwrap();
        settings.set(&group.child("menu_level"), 10_i64.into()).unwrap();
        settings.set(&group.child("initialized"), false.into()).unwrap();
    }

    let settings = FileSettings::open(&path).unwrap();
    let group = KeyPath::from("extensions/a_ext");
    assert_eq!(
        settings.keys(&group),
        vec!["initialized", "menu_level", "parent"]
    );
    assert_eq!(settings.get(&group.child("menu_level")), Some(SettingValue::Integer(10)));
    assert_eq!(settings.get(&group.child("initialized")), Some(SettingValue::Bool(false)));
}

#[test]
fn removal_is_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("extensions.toml");

    let mut settings = FileSettings::open(&path).unwrap();
    settings.set(&KeyPath::from("extensions/a_ext/main"), "main".into()).unwrap();
    settings.set(&KeyPath::from("extensions/b_ext/main"), "main".into()).unwrap();
    assert!(settings.remove(&KeyPath::from("extensions/a_ext")).unwrap());

    let reopened = FileSettings::open(&path).unwrap();
    assert_eq!(reopened.groups(&KeyPath::from("extensions")), vec!["b_ext"]);
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("extensions.toml");
    std::fs::write(&path, "this is = = not toml").unwrap();

    let err = FileSettings::open(&path).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }), "got {err:?}");
}

#[test]
fn no_temp_file_left_behind() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("extensions.toml");

    let mut settings = FileSettings::open(&path).unwrap();
    settings.set(&KeyPath::from("extensions/a_ext/main"), "main".into()).unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["extensions.toml"]);
}

/// Replace the directory holding the settings file with a plain file so
/// the next save can not create it.
fn block_directory(dir: &std::path::Path) {
    if dir.exists() {
        std::fs::remove_dir_all(dir).unwrap();
    }
    std::fs::write(dir, "not a directory").unwrap();
}

#[test]
fn failed_write_leaves_store_unchanged() {
    let dir = TempDir::new().unwrap();
    let settings_dir = dir.path().join("settings");
    let path = settings_dir.join("extensions.toml");

    let mut settings = FileSettings::open(&path).unwrap();
    block_directory(&settings_dir);

    assert!(settings.set(&KeyPath::from("extensions/a_ext/main"), "main".into()).is_err());
    assert!(settings
        .replace_group(
            &KeyPath::from("extensions/b_ext"),
            vec![("main".to_string(), "main".into())],
        )
        .is_err());
    assert!(settings.groups(&KeyPath::from("extensions")).is_empty());

    std::fs::remove_file(&settings_dir).unwrap();
    settings.set(&KeyPath::from("extensions/a_ext/main"), "main".into()).unwrap();
    assert_eq!(settings.groups(&KeyPath::from("extensions")), vec!["a_ext"]);
}

#[test]
fn failed_removal_keeps_group() {
    let dir = TempDir::new().unwrap();
    let settings_dir = dir.path().join("settings");
    let path = settings_dir.join("extensions.toml");

    let mut settings = FileSettings::open(&path).unwrap();
    settings.set(&KeyPath::from("extensions/a_ext/main"), "main".into()).unwrap();
    block_directory(&settings_dir);

    assert!(settings.remove(&KeyPath::from("extensions/a_ext")).is_err());
    assert_eq!(settings.groups(&KeyPath::from("extensions")), vec!["a_ext"]);
}

#[test]
fn replace_group_writes_whole_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("extensions.toml");

    let mut settings = FileSettings::open(&path).unwrap();
    settings
        .set(&KeyPath::from("extensions/a_ext/stale"), "old".into())
        .unwrap();
    settings
        .replace_group(
            &KeyPath::from("extensions/a_ext"),
            vec![
                ("main".to_string(), "main".into()),
                ("menu_level".to_string(), 10_i64.into()),
            ],
        )
        .unwrap();

    let reopened = FileSettings::open(&path).unwrap();
    assert_eq!(
        reopened.keys(&KeyPath::from("extensions/a_ext")),
        vec!["main", "menu_level"]
    );
}
