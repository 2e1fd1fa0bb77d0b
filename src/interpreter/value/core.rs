use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::interpreter::{
    token::Literal,
    value::function::{Function, NativeFunction},
};

/// Represents a runtime value in the interpreter.
///
/// Values are cheap to clone: strings and functions are reference counted.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value. Produced by `null`, by variables declared
    /// without an initializer and by functions that return nothing.
    Null,
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A number. All numbers are double-precision floats.
    Number(f64),
    /// An immutable string.
    Str(Rc<str>),
    /// A user-defined function together with its closure.
    Function(Rc<Function>),
    /// A built-in function.
    Native(Rc<NativeFunction>),
}

impl Value {
    /// Truthiness used by conditions and logical operators.
    ///
    /// `null` and `false` are false. Everything else, including `0` and the
    /// empty string, is true.
    ///
    /// # Example
    /// ```
    /// use clara::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Null.is_truthy());
    /// assert!(Value::Number(0.0).is_truthy());
    /// assert!(Value::from("").is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            _ => true,
        }
    }

    /// A short name for the value's type, used in log events.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Function(_) | Self::Native(_) => "function",
        }
    }
}

impl PartialEq for Value {
    /// Structural equality for matching types.
    ///
    /// Numbers compare as [`OrderedFloat`], so `NaN` equals itself. Functions
    /// are equal only to themselves. Values of different types are never
    /// equal.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => OrderedFloat(*a) == OrderedFloat(*b),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Native(a), Self::Native(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    /// Numbers print without a trailing `.0`; strings print without quotes.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Function(function) => write!(f, "<fn {}>", function.name()),
            Self::Native(_) => write!(f, "<native fn>"),
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Number(n) => Self::Number(*n),
            Literal::Str(s) => Self::from(s.as_str()),
            Literal::Bool(b) => Self::Bool(*b),
            Literal::Null => Self::Null,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(Rc::from(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_drops_trailing_zero() {
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-0.5).to_string(), "-0.5");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from("hi").to_string(), "hi");
    }

    #[test]
    fn equality_is_per_type() {
        assert_eq!(Value::Null, Value::Null);
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_ne!(Value::Number(1.0), Value::from("1"));
        assert_ne!(Value::Null, Value::Bool(false));
        assert_eq!(Value::from("ab"), Value::from(String::from("ab")));
    }
}
