use crate::ast::{Arg, ArgValue, Command, Expr, Stmt};

/// Renders an expression as prefix text.
///
/// # Example
/// ```
/// use clara::{
///     ast::{NodeIds, Stmt, printer},
///     interpreter::{lexer::lex, parser::parse, token::CommandWords},
/// };
///
/// let lexed = lex("1 + (2 * 3);", &CommandWords::default());
/// let program = parse(&lexed.tokens, &mut NodeIds::new(), false).unwrap();
/// let Stmt::Expression { expr, .. } = &program[0] else { panic!() };
///
/// assert_eq!(printer::expr(expr), "(+ 1 (group (* 2 3)))");
/// ```
#[must_use]
pub fn expr(expr: &Expr) -> String {
    match expr {
        Expr::Literal { value, .. } => value.to_string(),
        Expr::Grouping { expr: inner, .. } => parenthesize("group", &[self::expr(inner)]),
        Expr::Unary { op, operand, .. } => parenthesize(&op.to_string(), &[self::expr(operand)]),
        Expr::Binary { left, op, right, .. } => {
            parenthesize(&op.to_string(), &[self::expr(left), self::expr(right)])
        },
        Expr::Logical { left, op, right, .. } => {
            parenthesize(&op.to_string(), &[self::expr(left), self::expr(right)])
        },
        Expr::Variable { name, .. } | Expr::CommandRef { name, .. } => name.clone(),
        Expr::Assign { name, value, .. } => parenthesize("=", &[name.clone(), self::expr(value)]),
        Expr::Call { callee,
                     arguments,
                     .. } => {
            let mut parts = vec![self::expr(callee)];
            parts.extend(arguments.iter().map(self::expr));
            parenthesize("call", &parts)
        },
    }
}

/// Renders a statement as prefix text.
#[must_use]
pub fn stmt(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Block(statements) => {
            parenthesize("block", &statements.iter().map(self::stmt).collect::<Vec<_>>())
        },
        Stmt::Expression { expr, .. } => parenthesize(";", &[self::expr(expr)]),
        Stmt::If { condition,
                   then_branch,
                   else_branch,
                   .. } => {
            let mut parts = vec![self::expr(condition), self::stmt(then_branch)];
            if let Some(else_branch) = else_branch {
                parts.push(self::stmt(else_branch));
            }
            parenthesize("if", &parts)
        },
        Stmt::While { condition, body, .. } => {
            parenthesize("while", &[self::expr(condition), self::stmt(body)])
        },
        Stmt::Print { expr, .. } => parenthesize("print", &[self::expr(expr)]),
        Stmt::Return { value, .. } => match value {
            Some(value) => parenthesize("return", &[self::expr(value)]),
            None => "(return)".to_string(),
        },
        Stmt::Var { name, initializer, .. } => match initializer {
            Some(initializer) => parenthesize("var", &[name.clone(), self::expr(initializer)]),
            None => parenthesize("var", &[name.clone()]),
        },
        Stmt::Function(decl) => {
            let params: Vec<&str> = decl.params.iter().map(|p| p.lexeme.as_str()).collect();
            let mut parts = vec![decl.name.clone(), format!("({})", params.join(" "))];
            parts.extend(decl.body.iter().map(self::stmt));
            parenthesize("fun", &parts)
        },
        Stmt::Command(command) => self::command(command),
    }
}

/// Renders a command as prefix text.
///
/// Flags print as `-name` and parameters as `(--name args...)`.
#[must_use]
pub fn command(command: &Command) -> String {
    match command {
        Command::Default { name, args, .. } => {
            let mut parts = vec![name.clone()];
            parts.extend(args.iter().map(arg));
            parenthesize("command", &parts)
        },
        Command::Help { topic, .. } => match topic {
            Some(topic) => parenthesize("help", &[topic.clone()]),
            None => "(help)".to_string(),
        },
        Command::Exit { .. } => "(exit)".to_string(),
    }
}

/// Renders a whole program, one statement per line.
#[must_use]
pub fn program(statements: &[Stmt]) -> String {
    statements.iter().map(stmt).collect::<Vec<_>>().join("\n")
}

fn arg(arg: &Arg) -> String {
    match arg {
        Arg::Argument(value) => arg_value(value),
        Arg::Flag(flag) => format!("-{flag}"),
        Arg::Parameter { name, arguments } => {
            let mut parts = vec![format!("--{name}")];
            parts.extend(arguments.iter().map(arg_value));
            format!("({})", parts.join(" "))
        },
    }
}

fn arg_value(value: &ArgValue) -> String {
    match value {
        ArgValue::Word(word) => word.clone(),
        ArgValue::Expr(e) => expr(e),
    }
}

fn parenthesize(name: &str, parts: &[String]) -> String {
    if parts.is_empty() {
        return format!("({name})");
    }
    format!("({name} {})", parts.join(" "))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ast::NodeIds,
        interpreter::{lexer::lex, parser::parse, token::CommandWords},
    };

    fn render(source: &str) -> String {
        let lexed = lex(source, &CommandWords::default());
        let statements = parse(&lexed.tokens, &mut NodeIds::new(), false).expect("parses");
        program(&statements)
    }

    #[test]
    fn precedence_shows_in_nesting() {
        assert_eq!(render("print -1 + 2 * 3 == 7 or !false;"),
                   "(print (or (== (+ (- 1) (* 2 3)) 7) (! false)))");
    }

    #[test]
    fn for_loops_are_lowered() {
        assert_eq!(render("for (var i = 0; i < 2; i = i + 1) print i;"),
                   "(block (var i 0) (while (< i 2) (block (print i) (; (= i (+ i 1))))))");
    }

    #[test]
    fn functions_and_calls() {
        assert_eq!(render("fun add(a, b) { return a + b; } add(1, 2)(3);"),
                   "(fun add (a b) (return (+ a b)))\n(; (call (call add 1 2) 3))");
    }

    #[test]
    fn commands_keep_argument_order() {
        assert_eq!(render("open flask --volume 2, \"l\" -sealed (1 + 1);"),
                   "(command open flask (--volume 2 l) -sealed (group (+ 1 1)))");
    }

    #[test]
    fn help_and_exit() {
        assert_eq!(render("help; help open; exit"), "(help)\n(help open)\n(exit)");
    }
}
