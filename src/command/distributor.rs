use std::io::{self, Write};

use crate::command::{
    map::CommandMap,
    module::Reception,
    registry::ModuleRegistry,
};

/// A command after evaluation, ready to be carried out.
#[derive(Debug, Clone, PartialEq)]
pub enum Request<'a> {
    /// `help`, optionally about one command word.
    Help(Option<&'a str>),
    /// Any command without a bespoke grammar, with its evaluated map.
    Run {
        /// The command word, lower-cased.
        command: &'a str,
        /// The flattened flags, parameters and arguments.
        map:     CommandMap,
    },
    /// `exit`.
    Exit,
}

/// What the interpreter should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Carry on with the next statement.
    Continue,
    /// Stop evaluating and terminate with the given status.
    Exit(i32),
}

/// Routes evaluated commands to the registered modules.
#[derive(Debug, Default)]
pub struct CommandDistributor {
    registry: ModuleRegistry,
}

impl CommandDistributor {
    /// Creates a distributor over `registry`.
    #[must_use]
    pub const fn new(registry: ModuleRegistry) -> Self {
        Self { registry }
    }

    /// The registered modules.
    #[must_use]
    pub const fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// The registered modules, for registration.
    pub const fn registry_mut(&mut self) -> &mut ModuleRegistry {
        &mut self.registry
    }

    /// Carries out one command.
    ///
    /// - `Help` writes the list of offered commands, or the help text of the
    ///   named command, to `out`.
    /// - `Run` hands the map to every module accepting the command word.
    ///   Refusals and commands that no module accepts are logged; neither is
    ///   an error.
    /// - `Exit` asks for termination with status 0.
    ///
    /// # Errors
    /// Only when writing help text to `out` fails.
    pub fn carry_out(&mut self, request: Request<'_>, out: &mut dyn Write) -> io::Result<Outcome> {
        match request {
            Request::Help(None) => {
                let commands = self.registry.offered_commands();
                if commands.is_empty() {
                    writeln!(out, "No commands available yet.")?;
                } else {
                    writeln!(out, "Available commands: {}", commands.join(", "))?;
                }
            },
            Request::Help(Some(command)) => match self.registry.help(command) {
                Some(text) => writeln!(out, "{text}")?,
                None => writeln!(out, "Command not yet implemented.")?,
            },
            Request::Run { command, map } => self.dispatch(command, &map),
            Request::Exit => {
                tracing::debug!("exit requested");
                return Ok(Outcome::Exit(0));
            },
        }
        Ok(Outcome::Continue)
    }

    fn dispatch(&mut self, command: &str, map: &CommandMap) {
        let mut receivers = 0;
        for (name, module) in self.registry.accepting(command) {
            receivers += 1;
            match module.receive(command, map) {
                Reception::Accepted => tracing::debug!(module = name, command, "command accepted"),
                Reception::Refused(reason) => {
                    tracing::info!(module = name, command, %reason, "command refused");
                },
            }
        }

        if receivers == 0 {
            tracing::warn!(command, "no module accepts this command");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{command::module::Module, interpreter::value::core::Value};

    struct Recorder {
        seen:   Rc<RefCell<Vec<(String, CommandMap)>>>,
        refuse: bool,
    }

    impl Module for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn commands(&self) -> &[&str] {
            &["mix", "heat"]
        }

        fn help(&self, command: &str) -> Option<String> {
            (command == "mix").then(|| "mix: combines the arguments".to_string())
        }

        fn receive(&mut self, command: &str, map: &CommandMap) -> Reception {
            self.seen.borrow_mut().push((command.to_string(), map.clone()));
            if self.refuse {
                Reception::Refused("busy".to_string())
            } else {
                Reception::Accepted
            }
        }
    }

    fn distributor(refuse: bool) -> (CommandDistributor, Rc<RefCell<Vec<(String, CommandMap)>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        registry.register("recorder",
                          Box::new(Recorder { seen: Rc::clone(&seen),
                                              refuse }));
        (CommandDistributor::new(registry), seen)
    }

    #[test]
    fn help_lists_and_describes_commands() {
        let mut out: Vec<u8> = Vec::new();
        CommandDistributor::default().carry_out(Request::Help(None), &mut out)
                                     .expect("writes");
        assert_eq!(String::from_utf8_lossy(&out), "No commands available yet.\n");

        let (mut distributor, _) = distributor(false);
        let mut out: Vec<u8> = Vec::new();
        distributor.carry_out(Request::Help(None), &mut out).expect("writes");
        distributor.carry_out(Request::Help(Some("mix")), &mut out).expect("writes");
        distributor.carry_out(Request::Help(Some("heat")), &mut out).expect("writes");
        assert_eq!(String::from_utf8_lossy(&out),
                   "Available commands: heat, mix\nmix: combines the arguments\nCommand not yet \
                    implemented.\n");
    }

    #[test]
    fn run_reaches_accepting_modules_even_when_refused() {
        let (mut distributor, seen) = distributor(true);
        let mut map = CommandMap::new();
        map.push_argument(Value::from("water"));

        let outcome = distributor.carry_out(Request::Run { command: "mix",
                                                           map:     map.clone(), },
                                            &mut io::sink())
                                 .expect("runs");
        assert_eq!(outcome, Outcome::Continue);
        distributor.carry_out(Request::Run { command: "open",
                                             map:     CommandMap::new(), },
                              &mut io::sink())
                   .expect("runs");

        assert_eq!(*seen.borrow(), vec![("mix".to_string(), map)]);
    }

    #[test]
    fn exit_yields_status_zero() {
        let outcome = CommandDistributor::default().carry_out(Request::Exit, &mut io::sink())
                                                   .expect("runs");
        assert_eq!(outcome, Outcome::Exit(0));
    }
}
