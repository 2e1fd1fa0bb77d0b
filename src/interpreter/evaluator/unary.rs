use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a unary operation.
    ///
    /// `-` requires a number. `!` works on any value and negates its
    /// truthiness, so `!!x` is the truthiness of `x` as a boolean.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `operand`: The operand expression.
    /// - `line`: Source line for error reporting.
    pub(crate) fn eval_unary(&mut self,
                             op: UnaryOperator,
                             operand: &Expr,
                             line: usize)
                             -> EvalResult<Value> {
        let value = self.evaluate(operand)?;

        match op {
            UnaryOperator::Negate => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::OperandMustBeNumber { operator: op.to_string(),
                                                             line }.into()),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}
