use std::{io::Write, rc::Rc};

use crate::{
    ast::Stmt,
    error::RuntimeError,
    interpreter::{
        environment::{EnvRef, Environment},
        evaluator::core::{EvalResult, Flow, Interpreter},
        stack::ensure_sufficient_stack,
        value::{core::Value, function::Function},
    },
};

impl Interpreter {
    /// Executes one statement.
    ///
    /// # Returns
    /// [`Flow::Return`] while a `return` unwinds towards its call, otherwise
    /// [`Flow::Next`].
    pub(crate) fn execute(&mut self, statement: &Stmt) -> EvalResult<Flow> {
        ensure_sufficient_stack(|| self.execute_kind(statement))
    }

    fn execute_kind(&mut self, statement: &Stmt) -> EvalResult<Flow> {
        match statement {
            Stmt::Expression { expr, .. } => {
                self.evaluate(expr)?;
            },
            Stmt::Print { expr, line } => {
                let value = self.evaluate(expr)?;
                writeln!(self.output, "{value}").map_err(|e| RuntimeError::Output { details: e.to_string(),
                                                                                     line:    *line, })?;
            },
            Stmt::Var { name, initializer, .. } => {
                let value = match initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Value::Null,
                };
                self.environment.borrow_mut().define(name.clone(), value);
            },
            Stmt::Block(statements) => {
                let scope = Environment::child(&self.environment);
                return self.execute_block(statements, scope);
            },
            Stmt::If { condition,
                       then_branch,
                       else_branch,
                       .. } => {
                if self.evaluate(condition)?.is_truthy() {
                    return self.execute(then_branch);
                }
                if let Some(else_branch) = else_branch {
                    return self.execute(else_branch);
                }
            },
            Stmt::While { condition, body, .. } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
            },
            Stmt::Function(declaration) => {
                if !Rc::ptr_eq(&self.environment, &self.globals) {
                    self.captured.track(&self.environment);
                }
                let function = Function::new(Rc::clone(declaration), Rc::clone(&self.environment));
                self.environment
                    .borrow_mut()
                    .define(declaration.name.clone(), Value::Function(Rc::new(function)));
            },
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(value) => self.evaluate(value)?,
                    None => Value::Null,
                };
                return Ok(Flow::Return(value));
            },
            Stmt::Command(command) => self.execute_command(command)?,
        }
        Ok(Flow::Next)
    }

    /// Executes `statements` with `scope` as the current environment.
    ///
    /// The previous environment is restored on every exit path: normal
    /// completion, `return`, runtime errors and `exit`.
    pub(crate) fn execute_block(&mut self, statements: &[Stmt], scope: EnvRef) -> EvalResult<Flow> {
        let previous = std::mem::replace(&mut self.environment, scope);
        let result = self.execute_all(statements);
        self.environment = previous;
        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> EvalResult<Flow> {
        for statement in statements {
            if let Flow::Return(value) = self.execute(statement)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Next)
    }
}
