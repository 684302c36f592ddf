//! Expression evaluation.

use crate::ast::*;
use crate::error::RuntimeError;
use crate::interpreter::value::Value;

use super::{Interpreter, RuntimeResult};

impl Interpreter {
    pub(crate) fn evaluate(&mut self, expr: &Expr) -> RuntimeResult<Value> {
        match &expr.kind {
            ExprKind::IntLiteral(n) => Ok(Value::Int(*n)),
            ExprKind::StringLiteral(s) => Ok(Value::Str(s.clone())),
            ExprKind::BoolLiteral(b) => Ok(Value::Bool(*b)),
            ExprKind::Null => Ok(Value::Null),

            ExprKind::Variable(name) => self
                .environment
                .borrow()
                .get(name)
                .ok_or_else(|| RuntimeError::undefined_variable(name, expr.span)),

            ExprKind::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                self.binary_op(left, *operator, right, expr.span)
            }

            ExprKind::Get { object, name } => {
                let object = self.evaluate(object)?;
                self.get_attribute(&object, name, expr.span)
            }

            ExprKind::Call { callee, args } => {
                let callee = self.evaluate(callee)?;
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(self.evaluate(arg)?);
                }
                self.call_value(&callee, arg_values, expr.span)
            }
        }
    }

    fn binary_op(
        &self,
        left: Value,
        operator: BinaryOp,
        right: Value,
        span: crate::span::Span,
    ) -> RuntimeResult<Value> {
        match operator {
            BinaryOp::Add => match (left, right) {
                (Value::Int(a), Value::Int(b)) => a
                    .checked_add(b)
                    .map(Value::Int)
                    .ok_or_else(|| RuntimeError::type_error("integer overflow in addition", span)),
                (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
                (left, right) => Err(RuntimeError::type_error(
                    format!("cannot add {} and {}", left.type_name(), right.type_name()),
                    span,
                )),
            },
        }
    }

    /// Attribute access. Module attributes are exactly the bindings executed
    /// into (or bound onto) the module; a child module that exists on disk
    /// but was never loaded is not an attribute.
    fn get_attribute(
        &self,
        object: &Value,
        name: &str,
        span: crate::span::Span,
    ) -> RuntimeResult<Value> {
        match object {
            Value::Module(module) => module
                .borrow()
                .get(name)
                .ok_or_else(|| RuntimeError::no_such_property(object.type_name(), name, span)),
            other => Err(RuntimeError::no_such_property(
                other.type_name(),
                name,
                span,
            )),
        }
    }
}
