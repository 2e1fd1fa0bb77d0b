use crate::{
    ast::{Arg, ArgValue, Command},
    command::{CommandMap, Outcome, Request},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Halt, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a command statement and hands it to the distributor.
    ///
    /// # Errors
    /// Runtime errors from argument expressions, and `Halt::Exit` when the
    /// command asks for termination.
    pub(crate) fn execute_command(&mut self, command: &Command) -> EvalResult<()> {
        let (request, line) = match command {
            Command::Exit { line } => (Request::Exit, *line),
            Command::Help { topic, line } => (Request::Help(topic.as_deref()), *line),
            Command::Default { name, args, line } => {
                let map = self.command_map(args)?;
                tracing::debug!(command = %name, %map, "dispatching command");
                (Request::Run { command: name,
                                map },
                 *line)
            },
        };

        let outcome = self.distributor
                          .carry_out(request, &mut self.output)
                          .map_err(|e| RuntimeError::Output { details: e.to_string(),
                                                              line })?;
        match outcome {
            Outcome::Continue => Ok(()),
            Outcome::Exit(code) => Err(Halt::Exit(code)),
        }
    }

    /// Flattens evaluated arguments into a [`CommandMap`].
    ///
    /// Flags go under `flags`, positional arguments under `arguments` and
    /// each parameter under its own name, all in source order.
    fn command_map(&mut self, args: &[Arg]) -> EvalResult<CommandMap> {
        let mut map = CommandMap::new();
        for arg in args {
            match arg {
                Arg::Flag(flag) => map.push_flag(flag),
                Arg::Argument(value) => {
                    let value = self.arg_value(value)?;
                    map.push_argument(value);
                },
                Arg::Parameter { name, arguments } => {
                    let values = arguments.iter()
                                          .map(|value| self.arg_value(value))
                                          .collect::<EvalResult<Vec<_>>>()?;
                    map.extend_parameter(name, values);
                },
            }
        }
        Ok(map)
    }

    fn arg_value(&mut self, value: &ArgValue) -> EvalResult<Value> {
        match value {
            ArgValue::Word(word) => Ok(Value::from(word.as_str())),
            ArgValue::Expr(expr) => self.evaluate(expr),
        }
    }
}
