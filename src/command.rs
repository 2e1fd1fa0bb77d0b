/// The flattened form of an evaluated command.
pub mod map;
/// The interface external modules implement to receive commands.
pub mod module;
/// The explicitly owned set of registered modules.
pub mod registry;
/// Carries out evaluated commands.
///
/// Prints help, hands command maps to every module that accepts the command
/// word and turns `exit` into an exit status.
pub mod distributor;
/// A module that prints every command it receives.
pub mod console;

pub use console::ConsoleModule;
pub use distributor::{CommandDistributor, Outcome, Request};
pub use map::CommandMap;
pub use module::{Module, Reception};
pub use registry::ModuleRegistry;
