use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a binary operation.
    ///
    /// Both operands are evaluated, left first, before the operator is
    /// applied.
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: The operator.
    /// - `right`: Right operand expression.
    /// - `line`: Source line for error reporting.
    ///
    /// # Returns
    /// The result of applying `op`.
    pub(crate) fn eval_binary(&mut self,
                              left: &Expr,
                              op: BinaryOperator,
                              right: &Expr,
                              line: usize)
                              -> EvalResult<Value> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        let value = match op {
            BinaryOperator::Equal => Value::Bool(left == right),
            BinaryOperator::NotEqual => Value::Bool(left != right),
            BinaryOperator::Add => add(&left, &right, line)?,
            _ => {
                let (a, b) = numbers(op, &left, &right, line)?;
                arithmetic_or_comparison(op, a, b)
            },
        };
        Ok(value)
    }
}

/// `+` adds two numbers or concatenates two strings.
fn add(left: &Value, right: &Value, line: usize) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Str(a), Value::Str(b)) => Ok(Value::from(format!("{a}{b}"))),
        _ => Err(RuntimeError::OperandsMustBeNumbersOrStrings { line }),
    }
}

/// Extracts two numeric operands or fails naming the operator.
fn numbers(op: BinaryOperator,
           left: &Value,
           right: &Value,
           line: usize)
           -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::OperandsMustBeNumbers { operator: op.to_string(),
                                                       line }),
    }
}

/// Applies an arithmetic or comparison operator with IEEE semantics.
fn arithmetic_or_comparison(op: BinaryOperator, a: f64, b: f64) -> Value {
    match op {
        BinaryOperator::Sub => Value::Number(a - b),
        BinaryOperator::Mul => Value::Number(a * b),
        BinaryOperator::Div => Value::Number(a / b),
        BinaryOperator::Less => Value::Bool(a < b),
        BinaryOperator::LessEqual => Value::Bool(a <= b),
        BinaryOperator::Greater => Value::Bool(a > b),
        BinaryOperator::GreaterEqual => Value::Bool(a >= b),
        BinaryOperator::Add | BinaryOperator::Equal | BinaryOperator::NotEqual => {
            unreachable!("handled before numeric extraction")
        },
    }
}
