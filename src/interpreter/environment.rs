//! Runtime environment for variable scopes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::interpreter::value::Value;

/// A runtime environment containing variable bindings.
///
/// Scopes form a chain: function locals enclose a module namespace, which
/// encloses the shared builtins environment. Module namespaces are plain
/// environments too; the module object just holds onto one.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Self {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Define a new variable in the current scope, replacing any previous
    /// binding with the same name.
    pub fn define(&mut self, name: String, value: Value) {
        self.values.insert(name, value);
    }

    /// Get a variable's value, searching up the scope chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.get(name) {
            return Some(value.clone());
        }
        if let Some(ref enclosing) = self.enclosing {
            return enclosing.borrow().get(name);
        }
        None
    }

    /// Get a variable from the local scope only (no parent chain traversal).
    /// Attribute access on modules uses this: enclosing scopes are not
    /// module attributes.
    pub fn get_local(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    /// Check if a variable exists in the current scope only.
    pub fn contains_local(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Names bound in the local scope.
    pub fn local_names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_walks_the_scope_chain() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer
            .borrow_mut()
            .define("x".to_string(), Value::Int(1));

        let inner = Environment::with_enclosing(outer);
        assert_eq!(inner.get("x"), Some(Value::Int(1)));
        assert_eq!(inner.get_local("x"), None);
    }

    #[test]
    fn define_shadows_enclosing_binding() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer
            .borrow_mut()
            .define("x".to_string(), Value::Int(1));

        let mut inner = Environment::with_enclosing(outer);
        inner.define("x".to_string(), Value::Int(2));
        assert_eq!(inner.get("x"), Some(Value::Int(2)));
    }
}
