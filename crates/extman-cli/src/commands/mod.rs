//! Command implementations for the extman CLI

mod init;
mod install;
mod paths;
mod query;
mod validate;

pub use init::run_init;
pub use install::{run_install, run_remove, run_set_enabled};
pub use paths::run_paths;
pub use query::{run_find, run_get, run_list, run_show};
pub use validate::run_validate;
