use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter, MAX_CALL_DEPTH},
        value::{core::Value, function::Callable},
    },
};

impl Interpreter {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments from left to right.
    /// The argument count must match the arity exactly; on a mismatch the
    /// body never runs.
    ///
    /// # Errors
    /// - `NotCallable` when the callee is not a function.
    /// - `ArityMismatch` naming the expected and actual counts.
    /// - `StackOverflow` when calls nest deeper than [`MAX_CALL_DEPTH`].
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            line: usize)
                            -> EvalResult<Value> {
        let callee = self.evaluate(callee)?;
        let arguments = arguments.iter()
                                 .map(|argument| self.evaluate(argument))
                                 .collect::<EvalResult<Vec<_>>>()?;

        let callable: &dyn Callable = match &callee {
            Value::Function(function) => function.as_ref(),
            Value::Native(native) => native.as_ref(),
            other => {
                tracing::debug!(callee = other.type_name(), line, "call of a non-function");
                return Err(RuntimeError::NotCallable { line }.into());
            },
        };

        if arguments.len() != callable.arity() {
            return Err(RuntimeError::ArityMismatch { expected: callable.arity(),
                                                     found: arguments.len(),
                                                     line }.into());
        }

        if self.call_depth >= MAX_CALL_DEPTH {
            tracing::debug!(depth = self.call_depth, line, "call depth exceeded");
            return Err(RuntimeError::StackOverflow { line }.into());
        }
        self.call_depth += 1;
        let result = callable.call(self, arguments, line);
        self.call_depth -= 1;
        result
    }
}
