use crate::{
    command::module::Module,
    interpreter::token::CommandWords,
};

/// The modules registered with one session.
///
/// Modules are kept in registration order under their registered name.
/// Registering a name again replaces the earlier module.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<(String, Box<dyn Module>)>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `module` under `name`.
    ///
    /// # Returns
    /// The module previously registered under that name, if any.
    pub fn register(&mut self,
                    name: impl Into<String>,
                    module: Box<dyn Module>)
                    -> Option<Box<dyn Module>> {
        let name = name.into();
        tracing::debug!(module = %name, commands = ?module.commands(), "registering module");

        if let Some(slot) = self.modules.iter_mut().find(|(existing, _)| *existing == name) {
            return Some(std::mem::replace(&mut slot.1, module));
        }
        self.modules.push((name, module));
        None
    }

    /// Registers `module` under the name it reports for itself.
    ///
    /// # Returns
    /// The module previously registered under that name, if any.
    pub fn install(&mut self, module: Box<dyn Module>) -> Option<Box<dyn Module>> {
        let name = module.name().to_string();
        self.register(name, module)
    }

    /// The module registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Module> {
        self.modules
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, module)| module.as_ref())
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|(name, _)| name.as_str())
    }

    /// The registered modules that accept `command`.
    pub fn accepting<'a>(&'a mut self,
                         command: &'a str)
                         -> impl Iterator<Item = (&'a str, &'a mut Box<dyn Module>)> {
        self.modules
            .iter_mut()
            .filter(move |(_, module)| module.accepts(command))
            .map(|(name, module)| (name.as_str(), module))
    }

    /// Help text for `command` from the first module that documents it.
    #[must_use]
    pub fn help(&self, command: &str) -> Option<String> {
        self.modules
            .iter()
            .filter(|(_, module)| module.accepts(command))
            .find_map(|(_, module)| module.help(command))
    }

    /// Every command word offered by a registered module, sorted.
    #[must_use]
    pub fn offered_commands(&self) -> Vec<String> {
        let mut words: Vec<String> = self.modules
                                         .iter()
                                         .flat_map(|(_, module)| module.commands().iter())
                                         .map(|word| word.to_ascii_lowercase())
                                         .collect();
        words.sort_unstable();
        words.dedup();
        words
    }

    /// The built-in command words plus every registered command word.
    #[must_use]
    pub fn command_words(&self) -> CommandWords {
        let mut words = CommandWords::default();
        for word in self.offered_commands() {
            words.insert(&word);
        }
        words
    }

    /// The number of registered modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no module is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
