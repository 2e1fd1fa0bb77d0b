use crate::{
    ast::{Expr, ExprId, LogicalOperator},
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        stack::ensure_sufficient_stack,
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches on the expression variant.
    pub(crate) fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.evaluate_kind(expr))
    }

    fn evaluate_kind(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Grouping { expr, .. } => self.evaluate(expr),
            Expr::Unary { op, operand, line } => self.eval_unary(*op, operand, *line),
            Expr::Binary { left,
                           op,
                           right,
                           line, } => self.eval_binary(left, *op, right, *line),
            Expr::Logical { left, op, right, .. } => self.eval_logical(left, *op, right),
            Expr::Variable { id, name, line } => self.look_up(*id, name, *line),
            Expr::Assign { id,
                           name,
                           value,
                           line, } => {
                let value = self.evaluate(value)?;
                self.assign(*id, name, value.clone(), *line)?;
                Ok(value)
            },
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line),
            Expr::CommandRef { name, .. } => Ok(Value::from(name.to_ascii_lowercase())),
        }
    }

    /// Evaluates `and` / `or`.
    ///
    /// The right operand is only evaluated when the left one does not decide
    /// the result. The deciding operand itself is returned, not a boolean.
    fn eval_logical(&mut self,
                    left: &Expr,
                    op: LogicalOperator,
                    right: &Expr)
                    -> EvalResult<Value> {
        let left = self.evaluate(left)?;
        let decided = match op {
            LogicalOperator::Or => left.is_truthy(),
            LogicalOperator::And => !left.is_truthy(),
        };

        if decided {
            return Ok(left);
        }
        self.evaluate(right)
    }

    /// Reads a variable at its resolved distance, or from the globals when
    /// the resolver left it unresolved.
    fn look_up(&self, id: ExprId, name: &str, line: usize) -> EvalResult<Value> {
        let value = match self.resolutions.get(&id) {
            Some(&distance) => Environment::get_at(&self.environment, distance, name, line)?,
            None => self.globals.borrow().get(name, line)?,
        };
        Ok(value)
    }

    /// Assigns a variable at its resolved distance, or in the globals.
    fn assign(&self, id: ExprId, name: &str, value: Value, line: usize) -> EvalResult<()> {
        match self.resolutions.get(&id) {
            Some(&distance) => {
                Environment::assign_at(&self.environment, distance, name, value, line)?;
            },
            None => self.globals.borrow_mut().assign(name, value, line)?,
        }
        Ok(())
    }
}
