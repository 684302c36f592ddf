//! Built-in functions for Dotling.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::interpreter::environment::Environment;
use crate::interpreter::value::{NativeFunction, Value};

/// Where `print` writes.
///
/// Scripts normally write to stdout; tests swap in a shared buffer so they
/// can assert on exactly what a greeting printed.
#[derive(Clone, Default)]
pub enum Output {
    #[default]
    Stdout,
    Buffer(Rc<RefCell<Vec<u8>>>),
}

impl Output {
    /// A capturing output plus the handle to read it back.
    pub fn buffer() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let buf = Rc::new(RefCell::new(Vec::new()));
        (Self::Buffer(buf.clone()), buf)
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        match self {
            Output::Stdout => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                writeln!(handle, "{}", line)
            }
            Output::Buffer(buf) => writeln!(buf.borrow_mut(), "{}", line),
        }
    }
}

/// Register all built-in functions in the given environment.
pub fn register_builtins(env: &mut Environment, output: &Output) {
    // print(...) - Print values separated by spaces, followed by a newline
    let out = output.clone();
    env.define(
        "print".to_string(),
        Value::NativeFunction(NativeFunction::new("print", None, move |args| {
            let line = args
                .iter()
                .map(|arg| arg.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            out.write_line(&line).map_err(|e| e.to_string())?;
            Ok(Value::Null)
        })),
    );

    // str(value) - Convert a value to its string representation
    env.define(
        "str".to_string(),
        Value::NativeFunction(NativeFunction::new("str", Some(1), |args| {
            Ok(Value::Str(args[0].to_string()))
        })),
    );
}
