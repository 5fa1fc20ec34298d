//! One bad package or tier never stops the rest of a batch.

use extman_core::{ExtensionManager, Libraries, LibraryTier};
use extman_package::{DiscoveryStatus, ManifestStore};
use extman_settings::MemorySettings;
use extman_test_utils::{PackageBuilder, TestLibrary};
use pretty_assertions::assert_eq;
use serde_json::json;

fn manager(library: &TestLibrary) -> ExtensionManager<MemorySettings> {
    let mut libraries = Libraries::default();
    for tier in LibraryTier::ALL {
        libraries.set(tier, library.tier_path(tier.as_str()));
    }
    ExtensionManager::new(MemorySettings::new(), libraries)
}

#[test]
fn broken_packages_are_skipped_individually() {
    let library = TestLibrary::new();
    library.add_extension("user", &json!({"name": "good_ext"}));
    library.add_file("user", "corrupt.tar.gz", b"\x1f\x8b\x08 truncated");
    library.add_file("user", "notes.txt", b"not a package");
    library.add_package(
        "user",
        "unparsable.tar.gz",
        &PackageBuilder::new().member("ext.conf", b"{ broken".to_vec()),
    );
    library.add_package(
        "user",
        "escape.tar.gz",
        &PackageBuilder::new()
            .manifest(&json!({"name": "escape_ext"}))
            .unchecked_member("../../escape.wasm", b"x".to_vec()),
    );
    library.add_package(
        "user",
        "twice.tar.gz",
        &PackageBuilder::new()
            .manifest_named("one.conf", &json!({"name": "one_ext"}))
            .manifest_named("two.conf", &json!({"name": "two_ext"})),
    );
    library.add_package(
        "user",
        "nameless.tar.gz",
        &PackageBuilder::new().manifest(&json!({"main": "main"})).module("main"),
    );

    let mut manager = manager(&library);
    manager.init_extension_config(None);
    let installed = manager.install_loaded(None).unwrap();

    assert_eq!(installed, vec!["good_ext"]);
}

#[test]
fn unusable_tiers_do_not_block_others() {
    let library = TestLibrary::new();
    library.add_file("global", "readme.txt", b"nothing here");
    library.add_extension("user", &json!({"name": "mine_ext"}));

    let mut manager = manager(&library);
    manager.init_extension_config(None);

    assert_eq!(
        manager.manifest_store(LibraryTier::Core).unwrap().status(),
        DiscoveryStatus::DirectoryNotFound
    );
    assert_eq!(
        manager.manifest_store(LibraryTier::Global).unwrap().status(),
        DiscoveryStatus::NoManifests
    );
    assert_eq!(manager.install_loaded(None).unwrap(), vec!["mine_ext"]);
    assert!(manager.load_core().unwrap().is_empty());
}

#[test]
fn unconfigured_tier_is_skipped() {
    let library = TestLibrary::new();
    library.add_extension("user", &json!({"name": "mine_ext"}));
    let mut libraries = Libraries::default();
    libraries.set(LibraryTier::User, library.tier_path("user"));
    let mut manager = ExtensionManager::new(MemorySettings::new(), libraries);

    assert_eq!(manager.bootstrap().unwrap(), vec!["mine_ext"]);
    assert_eq!(
        manager.manifest_store(LibraryTier::Global).unwrap().status(),
        DiscoveryStatus::NotScanned
    );
}

#[test]
fn store_scan_matches_manager_view() {
    let library = TestLibrary::new();
    library.add_extension("global", &json!({"name": "a_ext"}));
    library.add_extension("global", &json!({"name": "b_ext"}));

    let direct = ManifestStore::new(Some(&library.tier_path("global")));
    let mut manager = manager(&library);
    manager.init_extension_config(Some(LibraryTier::Global));
    let via_manager = manager.manifest_store(LibraryTier::Global).unwrap();

    assert_eq!(direct.all(), via_manager.all());
}
