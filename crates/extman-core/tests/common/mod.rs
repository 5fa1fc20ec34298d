use std::any::Any;

use extman_core::{
    BuiltinLoader, ExtensionManager, LoadRequest, Libraries, LibraryTier, SettingsMenu, ToolBar,
    UiKind, UserInterface, ViewPort,
};
use extman_settings::MemorySettings;
use extman_test_utils::TestLibrary;

/// Library bindings pointing at the tier directories of `library`.
pub fn libraries(library: &TestLibrary) -> Libraries {
    let mut libraries = Libraries::default();
    for tier in LibraryTier::ALL {
        libraries.set(tier, library.tier_path(tier.as_str()));
    }
    libraries
}

pub fn manager(library: &TestLibrary) -> ExtensionManager<MemorySettings> {
    ExtensionManager::new(MemorySettings::new(), libraries(library))
}

/// A user interface object remembering what built it.
pub struct Widget {
    pub module: String,
    pub kind: UiKind,
}

impl Widget {
    fn boxed(request: &LoadRequest<'_>) -> Box<Self> {
        Box::new(Self {
            module: request.module.to_string(),
            kind: request.kind,
        })
    }
}

impl ViewPort for Widget {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl SettingsMenu for Widget {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ToolBar for Widget {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Factory serving every kind from one module.
pub fn widget_factory(request: &LoadRequest<'_>) -> UserInterface {
    match request.kind {
        UiKind::Main => UserInterface::ViewPort(Widget::boxed(request)),
        UiKind::Settings => UserInterface::SettingsMenu(Widget::boxed(request)),
        UiKind::Toolbar => UserInterface::ToolBar(Widget::boxed(request)),
    }
}

pub fn loader_for(extension: &str, modules: &[&str]) -> BuiltinLoader {
    let mut loader = BuiltinLoader::new();
    for module in modules {
        loader.register(extension, module, widget_factory);
    }
    loader
}
