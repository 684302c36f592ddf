//! Module system for Dotling.
//!
//! This module provides:
//! - Dotted module names and their validation
//! - Locating module sources on the configured search paths
//! - The module registry (dotted name -> live module object)
//! - The loader driving locate/instantiate/execute/register/bind

mod loader;
mod name;
mod object;
mod origin;
mod registry;

pub use loader::ModuleLoader;
pub use name::ModuleName;
pub use object::{ModuleObject, ModuleRef};
pub use origin::ModuleOrigin;
pub use registry::ModuleRegistry;

/// File extension for Dotling sources.
pub const SOURCE_EXTENSION: &str = "dtl";

/// File name that marks a directory as a package and holds its init code.
pub const PACKAGE_INIT: &str = "mod.dtl";
