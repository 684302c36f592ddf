//! Function calls.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::{Function, Value};
use crate::span::Span;

use super::{ControlFlow, Interpreter, RuntimeResult};

impl Interpreter {
    /// Call any callable value with already-evaluated arguments.
    pub fn call_value(
        &mut self,
        callee: &Value,
        args: Vec<Value>,
        span: Span,
    ) -> RuntimeResult<Value> {
        match callee {
            Value::Function(function) => self.call_function(function, args, span),
            Value::NativeFunction(native) => {
                if let Some(arity) = native.arity {
                    if args.len() != arity {
                        return Err(RuntimeError::wrong_arity(arity, args.len(), span));
                    }
                }
                (native.func)(args).map_err(|message| RuntimeError::new(message, span))
            }
            _ => Err(RuntimeError::not_callable(span)),
        }
    }

    fn call_function(
        &mut self,
        function: &Rc<Function>,
        args: Vec<Value>,
        span: Span,
    ) -> RuntimeResult<Value> {
        if args.len() != function.params.len() {
            return Err(RuntimeError::wrong_arity(
                function.params.len(),
                args.len(),
                span,
            ));
        }

        // The call frame encloses the function's closure, which for a
        // top-level function is its module's namespace.
        let mut frame = Environment::with_enclosing(function.closure.clone());
        for (param, arg) in function.params.iter().zip(args) {
            frame.define(param.clone(), arg);
        }

        let frame = Rc::new(RefCell::new(frame));
        let saved = std::mem::replace(&mut self.environment, frame);

        let mut result = Ok(Value::Null);
        for stmt in &function.body {
            match self.execute(stmt) {
                Ok(ControlFlow::Normal) => {}
                Ok(ControlFlow::Return(value)) => {
                    result = Ok(value);
                    break;
                }
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }

        self.environment = saved;
        result
    }
}
