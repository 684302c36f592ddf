//! Live module objects.

use std::cell::RefCell;
use std::rc::Rc;

use crate::interpreter::environment::Environment;
use crate::interpreter::value::Value;
use crate::module::{ModuleName, ModuleOrigin};

/// A shared handle to a module object. Identity matters: the registry entry
/// and the attribute bound on the parent namespace are the same `Rc`.
pub type ModuleRef = Rc<RefCell<ModuleObject>>;

/// A loaded (or loading) module: its dotted name, where its source came
/// from, and the namespace holding its top-level bindings.
///
/// The namespace encloses the builtins environment so module code can reach
/// `print` and friends, but attribute access from the outside only sees the
/// module's own bindings.
#[derive(Debug)]
pub struct ModuleObject {
    name: ModuleName,
    origin: ModuleOrigin,
    namespace: Rc<RefCell<Environment>>,
}

impl ModuleObject {
    /// Allocate an empty module bound to `name`. Pre-populates the identity
    /// metadata (`__name__`, `__package__`) but runs no code.
    pub fn new(
        name: ModuleName,
        origin: ModuleOrigin,
        builtins: Rc<RefCell<Environment>>,
    ) -> ModuleRef {
        let namespace = Rc::new(RefCell::new(Environment::with_enclosing(builtins)));

        let package = if origin.is_package() {
            Some(name.clone())
        } else {
            name.parent()
        };

        {
            let mut ns = namespace.borrow_mut();
            ns.define("__name__".to_string(), Value::Str(name.as_str()));
            ns.define(
                "__package__".to_string(),
                match package {
                    Some(p) => Value::Str(p.as_str()),
                    None => Value::Null,
                },
            );
        }

        Rc::new(RefCell::new(Self {
            name,
            origin,
            namespace,
        }))
    }

    pub fn name(&self) -> &ModuleName {
        &self.name
    }

    pub fn origin(&self) -> &ModuleOrigin {
        &self.origin
    }

    /// The namespace used as the execution scope for this module's code.
    pub fn namespace(&self) -> &Rc<RefCell<Environment>> {
        &self.namespace
    }

    /// Attribute lookup. Only the module's own bindings are visible; the
    /// enclosing builtins are not module attributes.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.namespace.borrow().get_local(name)
    }

    /// Bind an attribute on this module.
    pub fn set(&self, name: &str, value: Value) {
        self.namespace.borrow_mut().define(name.to_string(), value);
    }

    /// Names bound on this module (unordered).
    pub fn attribute_names(&self) -> Vec<String> {
        self.namespace.borrow().local_names()
    }
}
