//! Tree-walking interpreter for Dotling.

mod calls;
mod expressions;
mod statements;

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use crate::ast::Program;
use crate::error::{LoadError, RuntimeError};
use crate::interpreter::builtins::{register_builtins, Output};
use crate::interpreter::environment::Environment;
use crate::interpreter::value::Value;
use crate::lexer::Scanner;
use crate::module::{ModuleLoader, ModuleName, ModuleOrigin, ModuleRef};
use crate::parser::Parser;

pub(crate) type RuntimeResult<T> = Result<T, RuntimeError>;

/// Internal result type that can carry return values out of function bodies.
pub(crate) enum ControlFlow {
    Normal,
    Return(Value),
}

/// The Dotling interpreter.
///
/// Owns the shared builtins environment, the current scope, and the module
/// loader (with its registry). Nothing here is global: two interpreters are
/// fully isolated from each other.
pub struct Interpreter {
    pub(crate) builtins: Rc<RefCell<Environment>>,
    pub(crate) environment: Rc<RefCell<Environment>>,
    loader: ModuleLoader,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_search_paths(Vec::new())
    }

    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self::with_output(search_paths, Output::Stdout)
    }

    pub fn with_output(search_paths: Vec<PathBuf>, output: Output) -> Self {
        let mut globals = Environment::new();
        register_builtins(&mut globals, &output);
        let builtins = Rc::new(RefCell::new(globals));
        let environment = Rc::new(RefCell::new(Environment::with_enclosing(builtins.clone())));

        Self {
            builtins,
            environment,
            loader: ModuleLoader::new(search_paths),
        }
    }

    pub fn loader(&self) -> &ModuleLoader {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut ModuleLoader {
        &mut self.loader
    }

    /// Allocate a module object wired to this interpreter's builtins, for
    /// callers driving the load sequence by hand.
    pub fn instantiate_module(&self, name: &ModuleName, origin: &ModuleOrigin) -> ModuleRef {
        self.loader.instantiate(name, origin, self.builtins.clone())
    }

    /// Execute a program in the current scope.
    pub fn interpret(&mut self, program: &Program) -> RuntimeResult<()> {
        for stmt in &program.statements {
            if let ControlFlow::Return(_) = self.execute(stmt)? {
                return Err(RuntimeError::new("'return' outside function", stmt.span));
            }
        }
        Ok(())
    }

    /// Look up a variable in the current scope chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.environment.borrow().get(name)
    }

    // ===== Module loading =====
    //
    // The sequence for a single module is strict:
    // locate -> instantiate -> execute -> register -> bind_to_parent.
    // Registration happens only after execute succeeds, so a failed load
    // leaves no entry behind. While a module's top-level code runs, the
    // loader tracks it as in-flight; a re-entrant import of that name (a
    // package init importing its own submodule is the usual case) reuses
    // the partially-initialized object instead of running its source again.

    /// Import `name`, loading every prefix of the dotted path root-first and
    /// binding each child onto its parent package. Already-registered
    /// prefixes are reused without re-executing. Returns the module named by
    /// the full path.
    pub fn import_module(&mut self, name: &ModuleName) -> Result<ModuleRef, LoadError> {
        let mut parent: Option<ModuleRef> = None;
        let mut imported: Option<ModuleRef> = None;

        for prefix in name.prefixes() {
            let module = self.load_module(&prefix)?;
            if let Some(ref p) = parent {
                self.loader.bind_to_parent(p, prefix.last(), &module)?;
            }
            parent = Some(module.clone());
            imported = Some(module);
        }

        imported.ok_or_else(|| LoadError::InvalidName(name.as_str()))
    }

    /// Load a single module (no parent handling), reusing a registered or
    /// in-flight entry if one exists.
    pub fn load_module(&mut self, name: &ModuleName) -> Result<ModuleRef, LoadError> {
        if let Some(module) = self.loader.lookup(name) {
            return Ok(module);
        }

        let origin = self.loader.locate(name)?;
        let module = self.loader.instantiate(name, &origin, self.builtins.clone());
        self.execute_module(&module, &origin)?;
        self.loader.register(name, &module);
        Ok(module)
    }

    /// Run a module's top-level code with its namespace as the current
    /// scope. Any failure is wrapped as `LoadError::Execution` naming the
    /// module.
    pub fn execute_module(
        &mut self,
        module: &ModuleRef,
        origin: &ModuleOrigin,
    ) -> Result<(), LoadError> {
        let name = module.borrow().name().clone();
        let dotted = name.as_str();

        let source = fs::read_to_string(origin.path())?;
        let tokens = Scanner::new(&source)
            .scan_tokens()
            .map_err(|e| LoadError::execution(&dotted, e))?;
        let program = Parser::new(tokens)
            .parse()
            .map_err(|e| LoadError::execution(&dotted, e))?;

        self.loader.begin_execute(module)?;
        let namespace = module.borrow().namespace().clone();
        let saved = std::mem::replace(&mut self.environment, namespace);
        let result = self.interpret(&program);
        self.environment = saved;
        self.loader.finish_execute(&name);

        result.map_err(|e| LoadError::execution(&dotted, e))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
