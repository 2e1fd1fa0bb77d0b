use crate::command::map::CommandMap;

/// A module's answer to a command it was handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reception {
    /// The module carried the command out.
    Accepted,
    /// The module declined, with a reason for the log.
    Refused(String),
}

/// An external collaborator that receives evaluated commands.
///
/// The interpreter never looks inside a module. It only asks which command
/// words a module accepts and hands it the [`CommandMap`] of each matching
/// command; whatever the module does with it is its own business.
pub trait Module {
    /// The name the module is known by.
    fn name(&self) -> &str;

    /// The command words this module accepts.
    fn commands(&self) -> &[&str];

    /// Whether this module accepts `command`. Ignores ASCII case.
    fn accepts(&self, command: &str) -> bool {
        self.commands()
            .iter()
            .any(|word| word.eq_ignore_ascii_case(command))
    }

    /// Help text for one of the module's commands.
    fn help(&self, command: &str) -> Option<String> {
        let _ = command;
        None
    }

    /// Carries out `command` with its evaluated arguments.
    fn receive(&mut self, command: &str, map: &CommandMap) -> Reception;
}
