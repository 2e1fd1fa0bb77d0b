use std::collections::HashMap;

use crate::{
    ast::{Arg, ArgValue, Command, Expr, ExprId, FunctionDecl, Stmt},
    error::ResolveError,
    interpreter::stack::ensure_sufficient_stack,
};

/// Scope distances keyed by the id of the resolved expression node.
///
/// A missing entry means the name lives in the global environment.
pub type Resolutions = HashMap<ExprId, usize>;

/// What kind of body the resolver is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionKind {
    None,
    Function,
}

/// Static pass binding every variable reference to its declaring scope.
///
/// Each scope maps a name to whether its initializer has finished
/// (`false` while declared but not yet defined).
pub struct Resolver {
    scopes:      Vec<HashMap<String, bool>>,
    function:    FunctionKind,
    resolutions: Resolutions,
    errors:      Vec<ResolveError>,
}

/// Resolves a parsed program.
///
/// The program's top level gets a scope of its own, which the interpreter
/// maps to the global environment. Every statement and expression is
/// visited once, including expressions inside command arguments.
///
/// # Returns
/// The distance table, or every error found.
///
/// # Example
/// ```
/// use clara::{
///     ast::NodeIds,
///     interpreter::{lexer::lex, parser::parse, resolver::resolve, token::CommandWords},
/// };
///
/// let lexed = lex("var a = 1; { print a; }", &CommandWords::default());
/// let program = parse(&lexed.tokens, &mut NodeIds::new(), false).unwrap();
/// let resolutions = resolve(&program).unwrap();
///
/// assert_eq!(resolutions.values().copied().collect::<Vec<_>>(), vec![1]);
/// ```
pub fn resolve(statements: &[Stmt]) -> Result<Resolutions, Vec<ResolveError>> {
    let mut resolver = Resolver { scopes:      Vec::new(),
                                  function:    FunctionKind::None,
                                  resolutions: Resolutions::new(),
                                  errors:      Vec::new(), };

    resolver.begin_scope();
    resolver.statements(statements);
    resolver.end_scope();

    if resolver.errors.is_empty() {
        tracing::trace!(resolved = resolver.resolutions.len(), "resolution finished");
        Ok(resolver.resolutions)
    } else {
        Err(resolver.errors)
    }
}

impl Resolver {
    fn statements(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.statement(statement);
        }
    }

    fn statement(&mut self, statement: &Stmt) {
        ensure_sufficient_stack(|| self.statement_kind(statement));
    }

    fn statement_kind(&mut self, statement: &Stmt) {
        match statement {
            Stmt::Block(statements) => {
                self.begin_scope();
                self.statements(statements);
                self.end_scope();
            },
            Stmt::Var { name,
                        initializer,
                        line, } => {
                self.declare(name, *line);
                if let Some(initializer) = initializer {
                    self.expression(initializer);
                }
                self.define(name);
            },
            Stmt::Function(decl) => {
                self.declare(&decl.name, decl.line);
                self.define(&decl.name);
                self.function(decl);
            },
            Stmt::Expression { expr, .. } | Stmt::Print { expr, .. } => self.expression(expr),
            Stmt::If { condition,
                       then_branch,
                       else_branch,
                       .. } => {
                self.expression(condition);
                self.statement(then_branch);
                if let Some(else_branch) = else_branch {
                    self.statement(else_branch);
                }
            },
            Stmt::While { condition, body, .. } => {
                self.expression(condition);
                self.statement(body);
            },
            Stmt::Return { value, line } => {
                if self.function == FunctionKind::None {
                    self.errors
                        .push(ResolveError::ReturnOutsideFunction { line: *line });
                }
                if let Some(value) = value {
                    self.expression(value);
                }
            },
            Stmt::Command(command) => self.command(command),
        }
    }

    fn function(&mut self, decl: &FunctionDecl) {
        let enclosing = std::mem::replace(&mut self.function, FunctionKind::Function);

        self.begin_scope();
        for param in &decl.params {
            self.declare(&param.lexeme, param.line);
            self.define(&param.lexeme);
        }
        self.statements(&decl.body);
        self.end_scope();

        self.function = enclosing;
    }

    fn command(&mut self, command: &Command) {
        let Command::Default { args, .. } = command else {
            return;
        };

        for arg in args {
            match arg {
                Arg::Argument(value) => self.arg_value(value),
                Arg::Parameter { arguments, .. } => {
                    for value in arguments {
                        self.arg_value(value);
                    }
                },
                Arg::Flag(_) => {},
            }
        }
    }

    fn arg_value(&mut self, value: &ArgValue) {
        if let ArgValue::Expr(expr) = value {
            self.expression(expr);
        }
    }

    fn expression(&mut self, expr: &Expr) {
        ensure_sufficient_stack(|| self.expression_kind(expr));
    }

    fn expression_kind(&mut self, expr: &Expr) {
        match expr {
            Expr::Variable { id, name, line } => {
                if let Some(scope) = self.scopes.last()
                   && scope.get(name) == Some(&false)
                {
                    self.errors
                        .push(ResolveError::ReadInOwnInitializer { name: name.clone(),
                                                                   line: *line, });
                }
                self.resolve_local(*id, name);
            },
            Expr::Assign { id, name, value, .. } => {
                self.expression(value);
                self.resolve_local(*id, name);
            },
            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.expression(left);
                self.expression(right);
            },
            Expr::Call { callee,
                         arguments,
                         .. } => {
                self.expression(callee);
                for argument in arguments {
                    self.expression(argument);
                }
            },
            Expr::Grouping { expr, .. } => self.expression(expr),
            Expr::Unary { operand, .. } => self.expression(operand),
            Expr::Literal { .. } | Expr::CommandRef { .. } => {},
        }
    }

    /// Records the distance to the innermost scope declaring `name`.
    fn resolve_local(&mut self, id: ExprId, name: &str) {
        let depth = self.scopes.len();
        if let Some(index) = self.scopes.iter().rposition(|scope| scope.contains_key(name)) {
            let distance = depth - 1 - index;
            tracing::trace!(name, distance, "resolved");
            self.resolutions.insert(id, distance);
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Adds `name` to the innermost scope as not yet defined.
    fn declare(&mut self, name: &str, line: usize) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        if scope.contains_key(name) {
            self.errors.push(ResolveError::AlreadyDeclared { name: name.to_string(),
                                                             line });
            return;
        }
        scope.insert(name.to_string(), false);
    }

    fn define(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::NodeIds,
        interpreter::{lexer::lex, parser::parse, token::CommandWords},
    };

    fn resolve_source(source: &str) -> Result<Resolutions, Vec<ResolveError>> {
        let lexed = lex(source, &CommandWords::default());
        let program = parse(&lexed.tokens, &mut NodeIds::new(), false).expect("parses");
        resolve(&program)
    }

    fn distances(source: &str) -> Vec<usize> {
        let mut resolved: Vec<(ExprId, usize)> =
            resolve_source(source).expect("resolves").into_iter().collect();
        resolved.sort();
        resolved.into_iter().map(|(_, distance)| distance).collect()
    }

    #[test]
    fn shadowing_resolves_to_the_nearest_scope() {
        assert_eq!(distances("var a = 1; { var a = 2; print a; } print a;"), vec![0, 0]);
        assert_eq!(distances("var a = 1; { { print a; } }"), vec![2]);
    }

    #[test]
    fn closures_count_function_scopes() {
        assert_eq!(distances("fun make() { var a = 1; fun get() { return a; } return get; }"),
                   vec![1, 0]);
    }

    #[test]
    fn names_declared_later_stay_global() {
        assert!(distances("fun f() { return later; } var later = 1;").is_empty());
    }

    #[test]
    fn redeclaration_in_same_scope_is_an_error() {
        let errors = resolve_source("{ var a = 1; var a = 2; }").expect_err("must fail");
        assert_eq!(errors,
                   vec![ResolveError::AlreadyDeclared { name: "a".to_string(),
                                                        line: 1, }]);
        assert!(resolve_source("var a = 1; { var a = 2; }").is_ok());
    }

    #[test]
    fn own_initializer_and_top_level_return() {
        let errors = resolve_source("{ var a = a; }\nreturn 1;").expect_err("must fail");
        assert!(matches!(errors.as_slice(),
                         [ResolveError::ReadInOwnInitializer { line: 1, .. },
                          ResolveError::ReturnOutsideFunction { line: 2 }]));
    }

    #[test]
    fn command_arguments_are_resolved() {
        assert_eq!(distances("{ var n = 2; open flask --volume (n * 2); }"), vec![0]);
    }
}
