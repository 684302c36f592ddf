//! Statement execution.

use std::rc::Rc;

use crate::ast::*;
use crate::error::RuntimeError;
use crate::interpreter::value::{Function, Value};
use crate::module::ModuleName;

use super::{ControlFlow, Interpreter, RuntimeResult};

impl Interpreter {
    /// Execute a statement, returning control flow information.
    pub(crate) fn execute(&mut self, stmt: &Stmt) -> RuntimeResult<ControlFlow> {
        match &stmt.kind {
            StmtKind::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(ControlFlow::Normal)
            }

            StmtKind::Let { name, initializer } => {
                let value = if let Some(init) = initializer {
                    self.evaluate(init)?
                } else {
                    Value::Null
                };
                self.environment.borrow_mut().define(name.clone(), value);
                Ok(ControlFlow::Normal)
            }

            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Null,
                };
                Ok(ControlFlow::Return(value))
            }

            StmtKind::Function(decl) => {
                let function = Function::from_decl(decl, self.environment.clone());
                self.environment
                    .borrow_mut()
                    .define(decl.name.clone(), Value::Function(Rc::new(function)));
                Ok(ControlFlow::Normal)
            }

            StmtKind::Import(decl) => self.execute_import(decl, stmt),
        }
    }

    /// `import a.b.c;` loads the whole prefix chain and binds the head
    /// segment (`a`) in the importing scope; the deeper segments are
    /// reachable through attributes bound on each parent by the loader.
    fn execute_import(&mut self, decl: &ImportDecl, stmt: &Stmt) -> RuntimeResult<ControlFlow> {
        let name = ModuleName::from_segments(&decl.segments)
            .map_err(|e| RuntimeError::import(e.to_string(), stmt.span))?;

        self.import_module(&name)
            .map_err(|e| RuntimeError::import(e.to_string(), stmt.span))?;

        let head_segment = &decl.segments[0];
        let head_name = ModuleName::from_segments(&[head_segment.as_str()])
            .map_err(|e| RuntimeError::import(e.to_string(), stmt.span))?;
        // The head may still be in flight when a module imports through
        // its own enclosing package, so look past the registry.
        let head = self.loader().lookup(&head_name).ok_or_else(|| {
            RuntimeError::import(format!("'{}' vanished from the registry", head_name), stmt.span)
        })?;

        self.environment
            .borrow_mut()
            .define(head_segment.clone(), Value::Module(head));

        Ok(ControlFlow::Normal)
    }
}
