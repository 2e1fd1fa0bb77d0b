use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    rc::{Rc, Weak},
};

use crate::{error::RuntimeError, interpreter::value::core::Value};

/// Shared handle to a scope.
///
/// Children hold a handle to their parent, and function values hold a
/// handle to the scope they were declared in, so a scope lives as long as
/// anything that can still reach it. A function bound inside the scope it
/// captured forms a cycle; [`CapturedScopes`] releases those.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One scope of the environment chain.
#[derive(Debug, Default)]
pub struct Environment {
    values:    HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    /// Creates the outermost scope.
    #[must_use]
    pub fn global() -> EnvRef {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Creates a scope nested in `enclosing`.
    #[must_use]
    pub fn child(enclosing: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Self { values:    HashMap::new(),
                                    enclosing: Some(Rc::clone(enclosing)), }))
    }

    /// Binds `name` in this scope, replacing any earlier binding.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Looks `name` up in this scope and then outwards.
    ///
    /// # Errors
    /// `UndefinedVariable` when no scope of the chain binds the name.
    pub fn get(&self, name: &str, line: usize) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.clone());
        }
        match &self.enclosing {
            Some(enclosing) => enclosing.borrow().get(name, line),
            None => Err(undefined(name, line)),
        }
    }

    /// Rebinds an existing `name`, searching outwards.
    ///
    /// # Errors
    /// `UndefinedVariable` when no scope of the chain binds the name.
    /// Assignment never creates a binding.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign(name, value, line),
            None => Err(undefined(name, line)),
        }
    }

    /// Walks `distance` scopes outwards from `env`.
    ///
    /// # Returns
    /// `None` when the chain is shorter than `distance`.
    #[must_use]
    pub fn ancestor(env: &EnvRef, distance: usize) -> Option<EnvRef> {
        let mut current = Rc::clone(env);
        for _ in 0..distance {
            let next = current.borrow().enclosing.clone()?;
            current = next;
        }
        Some(current)
    }

    /// Reads `name` from the scope exactly `distance` hops out.
    ///
    /// # Errors
    /// `UndefinedVariable` when that scope does not bind the name.
    pub fn get_at(env: &EnvRef,
                  distance: usize,
                  name: &str,
                  line: usize)
                  -> Result<Value, RuntimeError> {
        let scope = Self::ancestor(env, distance).ok_or_else(|| undefined(name, line))?;
        let value = scope.borrow().values.get(name).cloned();
        value.ok_or_else(|| undefined(name, line))
    }

    /// Rebinds `name` in the scope exactly `distance` hops out.
    ///
    /// # Errors
    /// `UndefinedVariable` when that scope does not bind the name.
    pub fn assign_at(env: &EnvRef,
                     distance: usize,
                     name: &str,
                     value: Value,
                     line: usize)
                     -> Result<(), RuntimeError> {
        let scope = Self::ancestor(env, distance).ok_or_else(|| undefined(name, line))?;
        let mut scope = scope.borrow_mut();
        let slot = scope.values.get_mut(name).ok_or_else(|| undefined(name, line))?;
        *slot = value;
        Ok(())
    }
}

/// Smallest number of tracked scopes that makes a collection due.
const MIN_COLLECT_AT: usize = 256;

/// Weak handles to the local scopes that function declarations captured.
///
/// Every reference cycle between scopes runs through one of them, because
/// enclosing links alone only point outwards. A collection marks what the
/// roots reach and severs the rest: their bindings and their parent link
/// are dropped, which frees the whole cycle.
#[derive(Debug)]
pub struct CapturedScopes {
    scopes:     Vec<Weak<RefCell<Environment>>>,
    collect_at: usize,
}

impl Default for CapturedScopes {
    fn default() -> Self {
        Self { scopes:     Vec::new(),
               collect_at: MIN_COLLECT_AT, }
    }
}

impl CapturedScopes {
    /// Remembers that a function captured `scope`.
    pub fn track(&mut self, scope: &EnvRef) {
        if self.scopes
               .last()
               .is_some_and(|last| std::ptr::eq(last.as_ptr(), Rc::as_ptr(scope)))
        {
            return;
        }
        self.scopes.push(Rc::downgrade(scope));
    }

    /// Number of tracked handles, including ones already freed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Whether enough scopes piled up since the last collection.
    #[must_use]
    pub fn is_due(&self) -> bool {
        self.scopes.len() >= self.collect_at
    }

    /// Severs every tracked scope that `roots` cannot reach.
    ///
    /// Must only run while no unreachable scope is still in use, that is
    /// between top-level statements.
    ///
    /// # Returns
    /// How many scopes were severed.
    pub fn collect(&mut self, roots: &[&EnvRef]) -> usize {
        let reachable = reachable_from(roots);
        let mut kept = HashSet::new();
        let mut garbage = Vec::new();
        self.scopes.retain(|weak| {
                       let Some(scope) = weak.upgrade() else {
                           return false;
                       };
                       let address = Rc::as_ptr(&scope);
                       if reachable.contains(&address) {
                           kept.insert(address)
                       } else {
                           garbage.push(scope);
                           false
                       }
                   });

        for scope in &garbage {
            let severed = {
                let mut scope = scope.borrow_mut();
                (std::mem::take(&mut scope.values), scope.enclosing.take())
            };
            drop(severed);
        }
        self.collect_at = (self.scopes.len() * 2).max(MIN_COLLECT_AT);
        garbage.len()
    }
}

/// Every scope reachable from `roots` through parent links and the closures
/// of bound functions.
fn reachable_from(roots: &[&EnvRef]) -> HashSet<*const RefCell<Environment>> {
    let mut seen = HashSet::new();
    let mut pending: Vec<EnvRef> = roots.iter().map(|&root| Rc::clone(root)).collect();
    while let Some(scope) = pending.pop() {
        if !seen.insert(Rc::as_ptr(&scope)) {
            continue;
        }
        let env = scope.borrow();
        pending.extend(env.enclosing.iter().cloned());
        pending.extend(env.values.values().filter_map(|value| match value {
                                              Value::Function(function) => {
                                                  Some(Rc::clone(function.closure()))
                                              },
                                              _ => None,
                                          }));
    }
    seen
}

fn undefined(name: &str, line: usize) -> RuntimeError {
    RuntimeError::UndefinedVariable { name: name.to_string(),
                                      line }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::FunctionDecl, interpreter::value::function::Function};

    fn function_in(scope: &EnvRef) -> Value {
        let declaration = FunctionDecl { name:   "f".to_string(),
                                         params: Vec::new(),
                                         body:   Vec::new(),
                                         line:   1, };
        Value::Function(Rc::new(Function::new(Rc::new(declaration), Rc::clone(scope))))
    }

    #[test]
    fn unreachable_cycles_are_severed() {
        let global = Environment::global();
        let kept = Environment::child(&global);
        let lost = Environment::child(&global);
        for scope in [&kept, &lost] {
            scope.borrow_mut().define("f", function_in(scope));
        }
        global.borrow_mut().define("keep", function_in(&kept));

        let mut captured = CapturedScopes::default();
        captured.track(&kept);
        captured.track(&lost);
        captured.track(&lost);
        let released = Rc::downgrade(&lost);
        drop(lost);

        assert_eq!(captured.collect(&[&global]), 1);
        assert!(released.upgrade().is_none());
        assert_eq!(captured.len(), 1);
        assert!(kept.borrow().get("f", 1).is_ok());
    }

    #[test]
    fn lookups_walk_outwards_and_stop_at_the_distance() {
        let global = Environment::global();
        global.borrow_mut().define("a", Value::Number(1.0));
        let inner = Environment::child(&Environment::child(&global));
        inner.borrow_mut().define("a", Value::Number(3.0));

        assert_eq!(inner.borrow().get("a", 1), Ok(Value::Number(3.0)));
        assert_eq!(Environment::get_at(&inner, 2, "a", 1), Ok(Value::Number(1.0)));
        assert!(Environment::get_at(&inner, 1, "a", 1).is_err());
        assert!(Environment::ancestor(&inner, 3).is_none());
    }

    #[test]
    fn assignment_never_creates_bindings() {
        let global = Environment::global();
        let inner = Environment::child(&global);
        assert!(inner.borrow_mut().assign("missing", Value::Null, 4).is_err());

        global.borrow_mut().define("x", Value::Null);
        Environment::assign_at(&inner, 1, "x", Value::Bool(true), 4).expect("assigns");
        assert_eq!(global.borrow().get("x", 4), Ok(Value::Bool(true)));
    }
}
