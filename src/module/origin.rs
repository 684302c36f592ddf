//! Where a module's source was found.

use std::path::{Path, PathBuf};

/// The origin descriptor produced by `locate`: the source file backing a
/// module, and whether that module is a package (a directory with init code)
/// or a plain module file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOrigin {
    path: PathBuf,
    is_package: bool,
}

impl ModuleOrigin {
    pub fn file(path: PathBuf) -> Self {
        Self {
            path,
            is_package: false,
        }
    }

    pub fn package(path: PathBuf) -> Self {
        Self {
            path,
            is_package: true,
        }
    }

    /// The source file to execute (for packages, the init file inside the
    /// package directory).
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_package(&self) -> bool {
        self.is_package
    }
}

impl std::fmt::Display for ModuleOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
