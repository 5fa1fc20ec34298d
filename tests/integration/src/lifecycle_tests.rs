//! Full extension lifecycle across libraries, manifests and persisted
//! settings.

use std::any::Any;
use std::path::Path;

use extman_core::{
    BuiltinLoader, Error, ExtensionManager, Libraries, LibraryTier, ManagerConfig, UiKind,
    UserInterface, ViewPort,
};
use extman_settings::{FileSettings, KeyPath, SettingValue, SettingsStore};
use extman_test_utils::TestLibrary;
use pretty_assertions::assert_eq;
use serde_json::json;

struct StatusView;

impl ViewPort for StatusView {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn config_for(library: &TestLibrary) -> ManagerConfig {
    let mut libraries = Libraries::default();
    for tier in LibraryTier::ALL {
        libraries.set(tier, library.tier_path(tier.as_str()));
    }
    ManagerConfig {
        app_name: "Commotion".into(),
        settings_path: Some(library.settings_path()),
        libraries,
    }
}

fn open_manager(config: &ManagerConfig) -> ExtensionManager<FileSettings> {
    let mut loader = BuiltinLoader::new();
    loader.register("status_ext", "status", |_| {
        UserInterface::ViewPort(Box::new(StatusView))
    });
    ExtensionManager::from_config(config, config.open_settings().unwrap()).with_loader(loader)
}

fn write_config(path: &Path, config: &ManagerConfig) {
    let mut content = format!(
        "app_name = \"{}\"\nsettings_path = '{}'\n\n[libraries]\n",
        config.app_name,
        config.settings_path.as_ref().unwrap().display()
    );
    for tier in LibraryTier::ALL {
        if let Some(dir) = config.libraries.get(tier) {
            content.push_str(&format!("{} = '{}'\n", tier, dir.display()));
        }
    }
    std::fs::write(path, content).unwrap();
}

#[test]
fn discover_install_disable_enable_remove() {
    let library = TestLibrary::new();
    library.add_extension(
        "core",
        &json!({"name": "status_ext", "main": "status", "parent": "Network", "menu_level": 1}),
    );
    library.add_extension("user", &json!({"name": "sample_ext", "menu_item": "Sample"}));
    let config = config_for(&library);

    // Loaded -> Installed
    let mut manager = open_manager(&config);
    let installed = manager.bootstrap().unwrap();
    assert_eq!(installed, vec!["sample_ext", "status_ext"]);

    let ui = manager.load_user_interface("status_ext", "main").unwrap();
    assert_eq!(ui.kind(), UiKind::Main);
    assert!(ui.as_any().is::<StatusView>());

    // Installed -> Disabled, observed by a fresh manager on the same file
    manager.set_initialized("status_ext", false).unwrap();
    drop(manager);
    let mut manager = open_manager(&config);
    assert!(matches!(
        manager.load_user_interface("status_ext", "main"),
        Err(Error::NotInitialized(_))
    ));

    // A new bootstrap must not re-enable it
    assert!(manager.bootstrap().unwrap().is_empty());
    assert!(!manager.get_config("status_ext").unwrap().initialized);

    // Disabled -> Installed
    manager.set_initialized("status_ext", true).unwrap();
    assert!(manager.load_user_interface("status_ext", "settings").is_err());
    assert!(manager.load_user_interface("status_ext", "main").is_ok());

    // Installed -> not found, package kept
    assert!(manager.remove_extension_settings("status_ext").unwrap());
    assert!(matches!(
        manager.load_user_interface("status_ext", "main"),
        Err(Error::NotInstalled(_))
    ));
    assert!(library.tier_path("global").join("status_ext.tar.gz").exists());
    assert_eq!(
        manager.get_installed().into_iter().collect::<Vec<_>>(),
        vec![("sample_ext".to_string(), LibraryTier::User)]
    );
}

#[test]
fn settings_file_layout_is_keyed_by_extension() {
    let library = TestLibrary::new();
    library.add_extension("user", &json!({"name": "sample_ext", "parent": "Tools"}));
    let config = config_for(&library);

    let mut manager = open_manager(&config);
    manager.bootstrap().unwrap();
    drop(manager);

    let settings = FileSettings::open(library.settings_path()).unwrap();
    let group = KeyPath::from("extensions/sample_ext");
    assert_eq!(
        settings.keys(&group),
        vec![
            "initialized",
            "main",
            "menu_item",
            "menu_level",
            "name",
            "parent",
            "settings",
            "tests",
            "toolbar",
            "type"
        ]
    );
    assert_eq!(
        settings.get(&group.child("parent")),
        Some(SettingValue::from("Tools"))
    );

    let text = std::fs::read_to_string(library.settings_path()).unwrap();
    assert!(text.contains("[extensions.sample_ext]"), "{text}");
}

#[test]
fn customized_record_survives_rediscovery() {
    let library = TestLibrary::new();
    library.add_extension("user", &json!({"name": "sample_ext", "parent": "Tools"}));
    let config = config_for(&library);

    let mut manager = open_manager(&config);
    manager.bootstrap().unwrap();
    drop(manager);

    // An external settings editor changes the record
    let mut settings = FileSettings::open(library.settings_path()).unwrap();
    settings
        .set(&KeyPath::from("extensions/sample_ext/parent"), "Custom".into())
        .unwrap();
    drop(settings);

    let mut manager = open_manager(&config);
    assert!(manager.bootstrap().unwrap().is_empty());
    assert_eq!(
        manager.get_property("sample_ext", "parent").unwrap(),
        SettingValue::from("Custom")
    );
}

#[test]
fn configuration_file_drives_the_manager() {
    let library = TestLibrary::new();
    library.add_extension("global", &json!({"name": "shared_ext"}));
    let expected = config_for(&library);
    let config_path = library.root().join("extman.toml");
    write_config(&config_path, &expected);

    let config = ManagerConfig::load(&config_path).unwrap();
    assert_eq!(config, expected);

    let mut manager = open_manager(&config);
    assert_eq!(manager.bootstrap().unwrap(), vec!["shared_ext"]);
    assert_eq!(
        manager.libraries().get(LibraryTier::User),
        Some(library.tier_path("user").as_path())
    );
}
