use crate::interpreter::value::core::Value;

/// Key holding the names of the flags of a command.
pub const FLAGS: &str = "flags";
/// Key holding the positional arguments of a command.
pub const ARGUMENTS: &str = "arguments";

/// An insertion-ordered map from descriptor to values.
///
/// This is the whole contract between the interpreter and the modules that
/// receive commands. [`FLAGS`] and [`ARGUMENTS`] are always present, in that
/// order; every parameter adds one more key, in the order parameters first
/// appear. A parameter given twice appends to its existing entry.
///
/// # Example
/// ```
/// use clara::{command::CommandMap, interpreter::value::core::Value};
///
/// let mut map = CommandMap::new();
/// map.push_flag("sealed");
/// map.push_argument(Value::from("flask"));
/// map.extend_parameter("volume", vec![Value::Number(2.0)]);
///
/// assert_eq!(map.keys().collect::<Vec<_>>(), vec!["flags", "arguments", "volume"]);
/// assert_eq!(map.to_string(), "{flags: [sealed], arguments: [flask], volume: [2]}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CommandMap {
    entries: Vec<(String, Vec<Value>)>,
}

impl Default for CommandMap {
    fn default() -> Self {
        Self { entries: vec![(FLAGS.to_string(), Vec::new()), (ARGUMENTS.to_string(), Vec::new())] }
    }
}

impl CommandMap {
    /// Creates a map holding only the empty `flags` and `arguments` entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a flag by name.
    pub fn push_flag(&mut self, flag: &str) {
        self.entry(FLAGS).push(Value::from(flag));
    }

    /// Records a positional argument.
    pub fn push_argument(&mut self, value: Value) {
        self.entry(ARGUMENTS).push(value);
    }

    /// Appends the values of a parameter.
    pub fn extend_parameter(&mut self, name: &str, values: Vec<Value>) {
        self.entry(name).extend(values);
    }

    /// The values stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[Value]> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, values)| values.as_slice())
    }

    /// The flag names.
    #[must_use]
    pub fn flags(&self) -> &[Value] {
        self.get(FLAGS).unwrap_or_default()
    }

    /// The positional arguments.
    #[must_use]
    pub fn arguments(&self) -> &[Value] {
        self.get(ARGUMENTS).unwrap_or_default()
    }

    /// Whether the flag `flag` was given.
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags()
            .iter()
            .any(|value| matches!(value, Value::Str(s) if &**s == flag))
    }

    /// The keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// The entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    fn entry(&mut self, key: &str) -> &mut Vec<Value> {
        let index = match self.entries.iter().position(|(name, _)| name == key) {
            Some(index) => index,
            None => {
                self.entries.push((key.to_string(), Vec::new()));
                self.entries.len() - 1
            },
        };
        &mut self.entries[index].1
    }
}

impl std::fmt::Display for CommandMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (name, values)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let values: Vec<String> = values.iter().map(ToString::to_string).collect();
            write!(f, "{name}: [{}]", values.join(", "))?;
        }
        write!(f, "}}")
    }
}
