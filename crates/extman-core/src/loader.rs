//! Resolving user interface modules into objects.
//!
//! The manager locates the package and module; a [`PluginLoader`] turns
//! them into one of the three user interface objects. What those objects
//! can do is up to the user interface layer, which downcasts through
//! `as_any`.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use extman_package::{PackageArchive, UiKind};

use crate::error::{Error, Result};
use crate::record::InstalledExtension;

/// The main view of an extension.
pub trait ViewPort {
    fn as_any(&self) -> &dyn Any;
}

/// The settings menu of an extension.
pub trait SettingsMenu {
    fn as_any(&self) -> &dyn Any;
}

/// The toolbar of an extension.
pub trait ToolBar {
    fn as_any(&self) -> &dyn Any;
}

/// A constructed user interface object.
pub enum UserInterface {
    ViewPort(Box<dyn ViewPort>),
    SettingsMenu(Box<dyn SettingsMenu>),
    ToolBar(Box<dyn ToolBar>),
}

impl UserInterface {
    /// The kind of interface this object serves.
    pub fn kind(&self) -> UiKind {
        match self {
            Self::ViewPort(_) => UiKind::Main,
            Self::SettingsMenu(_) => UiKind::Settings,
            Self::ToolBar(_) => UiKind::Toolbar,
        }
    }

    pub fn as_any(&self) -> &dyn Any {
        match self {
            Self::ViewPort(view) => view.as_any(),
            Self::SettingsMenu(menu) => menu.as_any(),
            Self::ToolBar(bar) => bar.as_any(),
        }
    }
}

impl fmt::Debug for UserInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ViewPort(_) => "ViewPort",
            Self::SettingsMenu(_) => "SettingsMenu",
            Self::ToolBar(_) => "ToolBar",
        };
        f.debug_tuple(name).finish_non_exhaustive()
    }
}

/// Everything a loader needs to build one interface.
#[derive(Debug)]
pub struct LoadRequest<'a> {
    pub extension: &'a InstalledExtension,
    pub kind: UiKind,
    /// Module named by the extension for `kind`.
    pub module: &'a str,
    pub package: &'a PackageArchive,
}

/// Builds user interface objects from extension modules.
pub trait PluginLoader {
    fn load(&self, request: &LoadRequest<'_>) -> Result<UserInterface>;
}

type Factory = Box<dyn Fn(&LoadRequest<'_>) -> UserInterface + Send + Sync>;

/// An in-process loader with factories registered per extension module.
///
/// ```
/// use std::any::Any;
/// use extman_core::{BuiltinLoader, UserInterface, ViewPort};
///
/// struct Status;
///
/// impl ViewPort for Status {
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let mut loader = BuiltinLoader::new();
/// loader.register("status_ext", "main", |_| UserInterface::ViewPort(Box::new(Status)));
/// assert!(loader.contains("status_ext", "main"));
/// ```
#[derive(Default)]
pub struct BuiltinLoader {
    factories: HashMap<(String, String), Factory>,
}

impl BuiltinLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the factory for `module` of `extension`. The factory sees
    /// the requested kind, so one module may serve several kinds.
    pub fn register<F>(&mut self, extension: &str, module: &str, factory: F)
    where
        F: Fn(&LoadRequest<'_>) -> UserInterface + Send + Sync + 'static,
    {
        self.factories.insert(
            (extension.to_string(), module.to_string()),
            Box::new(factory),
        );
    }

    pub fn contains(&self, extension: &str, module: &str) -> bool {
        self.factories
            .contains_key(&(extension.to_string(), module.to_string()))
    }
}

impl fmt::Debug for BuiltinLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinLoader")
            .field("factories", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PluginLoader for BuiltinLoader {
    fn load(&self, request: &LoadRequest<'_>) -> Result<UserInterface> {
        let name = &request.extension.name;
        let key = (name.clone(), request.module.to_string());
        let factory = self.factories.get(&key).ok_or_else(|| Error::Load {
            name: name.clone(),
            message: format!("no factory registered for module '{}'", request.module),
        })?;

        let interface = factory(request);
        if interface.kind() != request.kind {
            return Err(Error::Load {
                name: name.clone(),
                message: format!(
                    "module '{}' built a {} interface, expected {}",
                    request.module,
                    interface.kind(),
                    request.kind
                ),
            });
        }
        Ok(interface)
    }
}
