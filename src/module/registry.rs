//! The module registry: dotted name -> live module object.

use indexmap::IndexMap;

use crate::module::{ModuleName, ModuleRef};

/// Registry of loaded modules, in load order.
///
/// Not global state: each `ModuleLoader` owns one, so tests can run isolated
/// loader instances. Entries are only ever added; a second `insert` for the
/// same name overwrites (last write wins). Callers that must not clobber an
/// entry check `contains` first.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: IndexMap<String, ModuleRef>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &ModuleName) -> Option<ModuleRef> {
        self.modules.get(&name.as_str()).cloned()
    }

    pub fn contains(&self, name: &ModuleName) -> bool {
        self.modules.contains_key(&name.as_str())
    }

    pub fn insert(&mut self, name: &ModuleName, module: ModuleRef) {
        self.modules.insert(name.as_str(), module);
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Registered names in load order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(|k| k.as_str())
    }
}
