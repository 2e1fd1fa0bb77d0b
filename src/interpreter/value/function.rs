use std::{
    rc::Rc,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{
    ast::FunctionDecl,
    error::RuntimeError,
    interpreter::{
        environment::{EnvRef, Environment},
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::core::Value,
    },
};

/// Anything that can be called with `f(...)`.
pub trait Callable {
    /// The exact number of arguments the callable takes.
    fn arity(&self) -> usize;

    /// Invokes the callable. The argument count was already checked.
    ///
    /// # Parameters
    /// - `interpreter`: The running interpreter.
    /// - `arguments`: Evaluated arguments, in order.
    /// - `line`: Line of the call, for error reporting.
    fn call(&self,
            interpreter: &mut Interpreter,
            arguments: Vec<Value>,
            line: usize)
            -> EvalResult<Value>;
}

/// A user-defined function and the scope it was declared in.
pub struct Function {
    declaration: Rc<FunctionDecl>,
    closure:     EnvRef,
}

impl Function {
    /// Pairs a declaration with its defining scope.
    #[must_use]
    pub const fn new(declaration: Rc<FunctionDecl>, closure: EnvRef) -> Self {
        Self { declaration,
               closure }
    }

    /// The declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    /// The scope the function was declared in.
    #[must_use]
    pub const fn closure(&self) -> &EnvRef {
        &self.closure
    }
}

impl Callable for Function {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// Runs the body in a fresh scope chained to the closure.
    ///
    /// Falling off the end of the body returns `null`.
    fn call(&self,
            interpreter: &mut Interpreter,
            arguments: Vec<Value>,
            _line: usize)
            -> EvalResult<Value> {
        let environment = Environment::child(&self.closure);
        {
            let mut scope = environment.borrow_mut();
            for (param, argument) in self.declaration.params.iter().zip(arguments) {
                scope.define(param.lexeme.clone(), argument);
            }
        }

        tracing::trace!(function = self.name(), "call");
        match interpreter.execute_block(&self.declaration.body, environment)? {
            Flow::Return(value) => Ok(value),
            Flow::Next => Ok(Value::Null),
        }
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.name())
    }
}

/// Signature of the Rust side of a built-in.
pub type NativeFn = fn(&[Value], usize) -> Result<Value, RuntimeError>;

/// A function implemented in Rust.
pub struct NativeFunction {
    name:     &'static str,
    arity:    usize,
    function: NativeFn,
}

impl NativeFunction {
    /// Wraps `function` as a callable value.
    #[must_use]
    pub const fn new(name: &'static str, arity: usize, function: NativeFn) -> Self {
        Self { name,
               arity,
               function }
    }

    /// The name the built-in is bound to.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl Callable for NativeFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self,
            _interpreter: &mut Interpreter,
            arguments: Vec<Value>,
            line: usize)
            -> EvalResult<Value> {
        Ok((self.function)(&arguments, line)?)
    }
}

impl std::fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

/// Binds the built-in functions in `globals`.
pub fn install_natives(globals: &EnvRef) {
    let natives = [NativeFunction::new("clock", 0, clock)];

    let mut globals = globals.borrow_mut();
    for native in natives {
        globals.define(native.name(), Value::Native(Rc::new(native)));
    }
}

/// `clock()`: seconds since the Unix epoch, with sub-second precision.
fn clock(_arguments: &[Value], line: usize) -> Result<Value, RuntimeError> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)
                                   .map_err(|e| RuntimeError::NativeFailure { name: "clock".to_string(),
                                                                              details: e.to_string(),
                                                                              line })?;
    Ok(Value::Number(elapsed.as_secs_f64()))
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::{
        ast::NodeIds,
        command::ModuleRegistry,
        interpreter::{lexer::lex, parser::parse, resolver::resolve, token::CommandWords},
    };

    fn run(interpreter: &mut Interpreter, ids: &mut NodeIds, source: &str) {
        let lexed = lex(source, &CommandWords::default());
        let program = parse(&lexed.tokens, ids, false).expect("parses");
        interpreter.resolve(resolve(&program).expect("resolves"));
        interpreter.interpret(&program).expect("runs");
    }

    fn global_function(interpreter: &Interpreter, name: &str) -> Rc<Function> {
        match interpreter.globals().borrow().get(name, 0) {
            Ok(Value::Function(function)) => function,
            other => panic!("{name} is not a function: {other:?}"),
        }
    }

    #[test]
    fn call_scope_is_released_with_its_last_closure() {
        let mut interpreter = Interpreter::with_output(ModuleRegistry::new(), Box::new(io::sink()));
        let mut ids = NodeIds::new();
        run(&mut interpreter,
            &mut ids,
            "fun make() { var a = 1; fun get() { return a; } return get; } var g = make();");

        let scope = Rc::downgrade(global_function(&interpreter, "g").closure());
        run(&mut interpreter, &mut ids, "print g();");
        assert!(scope.upgrade().is_some());

        run(&mut interpreter, &mut ids, "g = null;");
        assert!(scope.upgrade().is_none());
    }

    #[test]
    fn loops_creating_closures_do_not_pile_up_scopes() {
        let mut interpreter = Interpreter::with_output(ModuleRegistry::new(), Box::new(io::sink()));
        let mut ids = NodeIds::new();
        run(&mut interpreter,
            &mut ids,
            "fun make(n) { fun get() { return n; } return get; }
             var last;
             for (var i = 0; i < 2000; i = i + 1) { last = make(i); }
             print last();");

        assert_eq!(interpreter.captured.len(), 1);
        assert!(global_function(&interpreter, "last").closure()
                                                      .borrow()
                                                      .get("n", 0)
                                                      .is_ok());
    }
}
