//! Locating, allocating and registering modules.
//!
//! The loader owns the search paths, the registry, and the stack of modules
//! whose top-level code is currently executing. Executing that code needs
//! the evaluator, so the execute step lives on `Interpreter`; everything
//! else in the locate -> instantiate -> execute -> register -> bind_to_parent
//! sequence is here.
//!
//! Re-entrancy: a package init importing its own submodule re-enters the
//! load of a name that is still executing. The in-flight stack makes that
//! load return the partially-initialized module object instead of running
//! its source a second time; only an attempt to re-execute the same source
//! is rejected as a circular import.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::LoadError;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::Value;
use crate::module::{
    ModuleName, ModuleObject, ModuleOrigin, ModuleRef, ModuleRegistry, PACKAGE_INIT,
    SOURCE_EXTENSION,
};

/// Locates module sources and tracks loaded modules.
pub struct ModuleLoader {
    /// Ordered search roots; first match wins.
    search_paths: Vec<PathBuf>,
    registry: ModuleRegistry,
    /// Modules whose top-level code is currently executing, outermost first.
    loading: Vec<(ModuleName, ModuleRef)>,
}

impl ModuleLoader {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            registry: ModuleRegistry::new(),
            loading: Vec::new(),
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    pub fn add_search_path(&mut self, path: PathBuf) {
        self.search_paths.push(path);
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Find the source artifact for `name` on the search paths.
    ///
    /// A candidate root matches if every parent segment is a package
    /// directory (contains `mod.dtl`) and the final segment resolves to
    /// either `<name>.dtl` or `<name>/mod.dtl`, in that order.
    pub fn locate(&self, name: &ModuleName) -> Result<ModuleOrigin, LoadError> {
        for root in &self.search_paths {
            if let Some(origin) = locate_in_root(root, name) {
                return Ok(origin);
            }
        }
        Err(LoadError::NotFound(name.as_str()))
    }

    /// Allocate an empty module object for `name` with identity metadata
    /// pre-bound. No code runs.
    pub fn instantiate(
        &self,
        name: &ModuleName,
        origin: &ModuleOrigin,
        builtins: Rc<RefCell<Environment>>,
    ) -> ModuleRef {
        ModuleObject::new(name.clone(), origin.clone(), builtins)
    }

    /// Insert `name -> module` into the registry. Overwrites silently if the
    /// name was already registered.
    pub fn register(&mut self, name: &ModuleName, module: &ModuleRef) {
        self.registry.insert(name, module.clone());
    }

    /// Bind `module` as the attribute `last_segment` of `parent`. The parent
    /// must already be loaded: registered, or still executing its init.
    pub fn bind_to_parent(
        &self,
        parent: &ModuleRef,
        last_segment: &str,
        module: &ModuleRef,
    ) -> Result<(), LoadError> {
        let parent_name = parent.borrow().name().clone();
        if !self.registry.contains(&parent_name) && self.in_flight(&parent_name).is_none() {
            return Err(LoadError::NotFound(parent_name.as_str()));
        }
        parent
            .borrow()
            .set(last_segment, Value::Module(module.clone()));
        Ok(())
    }

    /// The module object for `name` if its top-level code is currently
    /// executing.
    pub fn in_flight(&self, name: &ModuleName) -> Option<ModuleRef> {
        self.loading
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, m)| m.clone())
    }

    /// A registered or in-flight module.
    pub fn lookup(&self, name: &ModuleName) -> Option<ModuleRef> {
        self.registry.get(name).or_else(|| self.in_flight(name))
    }

    /// Mark `module` as executing. Fails if its source is already being
    /// executed, which would otherwise recurse forever.
    pub fn begin_execute(&mut self, module: &ModuleRef) -> Result<(), LoadError> {
        let name = module.borrow().name().clone();
        if self.in_flight(&name).is_some() {
            let chain: Vec<String> = self
                .loading
                .iter()
                .map(|(n, _)| n.as_str())
                .chain(std::iter::once(name.as_str()))
                .collect();
            return Err(LoadError::CircularImport(chain));
        }
        self.loading.push((name, module.clone()));
        Ok(())
    }

    /// Unmark `name` after its execution finished (successfully or not).
    pub fn finish_execute(&mut self, name: &ModuleName) {
        if let Some(pos) = self.loading.iter().rposition(|(n, _)| n == name) {
            self.loading.remove(pos);
        }
    }
}

fn locate_in_root(root: &Path, name: &ModuleName) -> Option<ModuleOrigin> {
    let (last, parents) = name.segments().split_last()?;

    let mut dir = root.to_path_buf();
    for segment in parents {
        dir.push(segment);
        if !dir.join(PACKAGE_INIT).is_file() {
            return None;
        }
    }

    let file = dir.join(format!("{}.{}", last, SOURCE_EXTENSION));
    if file.is_file() {
        return Some(ModuleOrigin::file(file));
    }

    let init = dir.join(last).join(PACKAGE_INIT);
    if init.is_file() {
        return Some(ModuleOrigin::package(init));
    }

    None
}
