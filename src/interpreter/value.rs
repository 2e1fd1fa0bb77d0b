/// Function values.
///
/// Defines the [`function::Callable`] trait shared by user-defined functions
/// and built-ins, the closure-carrying [`function::Function`] and the
/// [`function::NativeFunction`] wrapper, plus the built-ins installed in
/// every global scope.
pub mod function;

/// The runtime value type.
pub mod core;
