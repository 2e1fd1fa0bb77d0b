use std::{
    cell::RefCell,
    fs::{self},
    io::{self, Write},
    rc::Rc,
};

use clara::{
    Error, Session, Status,
    error::{LexError, ParseError, ResolveError, RuntimeError},
};
use walkdir::WalkDir;

/// Output sink shared between a session and the test reading it.
#[derive(Clone, Default)]
struct Capture(Rc<RefCell<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

fn session() -> (Session, Capture) {
    let capture = Capture::default();
    (Session::with_output(Box::new(capture.clone())), capture)
}

fn run(src: &str) -> (Result<Status, Vec<Error>>, String) {
    let (mut session, capture) = session();
    let result = session.run(src);
    (result, capture.text())
}

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_dsl_blocks(&content).into_iter().enumerate() {
            count += 1;
            let (result, _) = run(&code);
            if let Err(e) = result {
                panic!("DSL example {} in {:?} failed:\n{}\nError: {:?}",
                       i + 1,
                       path,
                       code,
                       e);
            }
        }
    }

    assert!(count > 0, "No DSL examples found in book/src");
}

fn extract_dsl_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```clara") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_output(src: &str, expected: &str) {
    let (result, output) = run(src);
    if let Err(e) = result {
        panic!("Script failed: {e:?}");
    }
    assert_eq!(output, expected, "unexpected output for:\n{src}");
}

fn assert_failure(src: &str) -> Vec<Error> {
    match run(src).0 {
        Ok(_) => panic!("Script succeeded but was expected to fail"),
        Err(errors) => errors,
    }
}

#[test]
fn arithmetic_follows_floating_point() {
    assert_output("print 1 + 2;", "3\n");
    assert_output("print 7 * 9 - 3;", "60\n");
    assert_output("print 10 / 4;", "2.5\n");
    assert_output("print 1 / 0;", "inf\n");
    assert_output("print -(2 + 3) * 2;", "-10\n");
    assert_output("print 0.1 + 0.2;", &format!("{}\n", 0.1_f64 + 0.2));
}

#[test]
fn comparisons_and_equality() {
    assert_output("print 1 < 2; print 2 <= 2; print 3 > 4; print 3 >= 4;",
                  "true\ntrue\nfalse\nfalse\n");
    assert_output("print 1 == 1; print \"a\" != \"a\"; print null == null;",
                  "true\nfalse\ntrue\n");
    assert_output("print 1 == \"1\"; print null == false;", "false\nfalse\n");
}

#[test]
fn strings_concatenate_but_do_not_mix_with_numbers() {
    assert_output("print \"1\" + \"2\";", "12\n");

    let errors = assert_failure("print 1 + \"2\";");
    assert_eq!(errors,
               vec![Error::Runtime(RuntimeError::OperandsMustBeNumbersOrStrings { line: 1 })]);
    assert_eq!(errors[0].to_string(),
               "Error on line 1: Operands must be two numbers or two strings.");
}

#[test]
fn arithmetic_needs_numbers() {
    let errors = assert_failure("print \"a\" * 2;");
    assert!(matches!(&errors[..],
                     [Error::Runtime(RuntimeError::OperandsMustBeNumbers { operator, .. })] if operator == "*"));

    let errors = assert_failure("print -\"a\";");
    assert!(matches!(&errors[..],
                     [Error::Runtime(RuntimeError::OperandMustBeNumber { .. })]));
}

#[test]
fn truthiness_and_double_negation() {
    assert_output("print !!0; print !!\"\"; print !!null; print !!false; print !true;",
                  "true\ntrue\nfalse\nfalse\nfalse\n");
}

#[test]
fn logical_operators_return_the_deciding_operand() {
    assert_output("print null or \"fallback\";", "fallback\n");
    assert_output("print 1 and 2; print false and 2; print 0 or 5;", "2\nfalse\n0\n");
    assert_output("var calls = 0; fun touch() { calls = calls + 1; return true; } \
                   print false and touch(); print true or touch(); print calls;",
                  "false\ntrue\n0\n");
}

#[test]
fn shadowing_restores_the_outer_binding() {
    assert_output("var a = 1; { var a = 2; print a; } print a;", "2\n1\n");
}

#[test]
fn assignment_reaches_the_declaring_scope() {
    assert_output("var a = 1; { a = 2; { a = a + 1; } } print a;", "3\n");
    assert_output("var a; print a; print a = 4;", "null\n4\n");
}

#[test]
fn closures_keep_their_scope_alive() {
    assert_output("fun make() { var a = 1; fun get() { return a; } return get; } var g = make(); \
                   print g();",
                  "1\n");
    assert_output("fun counter() { var n = 0; fun next() { n = n + 1; return n; } return next; } \
                   var c = counter(); c(); c(); print c();",
                  "3\n");
}

#[test]
fn closures_bind_at_declaration_not_at_call() {
    assert_output("var a = \"global\"; { fun show() { print a; } show(); var a = \"block\"; show(); }",
                  "global\nglobal\n");
}

#[test]
fn control_flow() {
    assert_output("if (1 > 2) print \"yes\"; else print \"no\";", "no\n");
    assert_output("var i = 0; while (i < 3) { print i; i = i + 1; }", "0\n1\n2\n");
    assert_output("for (var i = 0; i < 3; i = i + 1) print i * 10;", "0\n10\n20\n");
    assert_output("fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); } \
                   print fib(10);",
                  "55\n");
}

#[test]
fn functions_without_return_give_null() {
    assert_output("fun f() {} print f(); print f;", "null\n<fn f>\n");
    assert_output("print clock;", "<native fn>\n");
    assert_output("print clock() > 0;", "true\n");
}

#[test]
fn redeclaring_in_the_same_block_is_an_error() {
    let errors = assert_failure("{ var a = 1; var a = 2; }");
    assert!(matches!(&errors[..],
                     [Error::Resolve(ResolveError::AlreadyDeclared { .. })]));

    assert_output("var a = 1; { var a = 2; { var a = 3; print a; } }", "3\n");
}

#[test]
fn arity_mismatch_skips_the_body() {
    let (result, output) = run("fun f(a, b) { print \"ran\"; } f(1);");
    assert_eq!(result,
               Err(vec![Error::Runtime(RuntimeError::ArityMismatch { expected: 2,
                                                                     found:    1,
                                                                     line:     1, })]));
    assert_eq!(output, "");
}

#[test]
fn only_functions_are_callable() {
    let errors = assert_failure("var x = 1; x();");
    assert_eq!(errors, vec![Error::Runtime(RuntimeError::NotCallable { line: 1 })]);
}

#[test]
fn runtime_error_stops_remaining_statements_only() {
    let (mut session, capture) = session();
    let result = session.run("print 1; print missing; print 2;");
    assert!(matches!(result.as_ref().map_err(Vec::as_slice),
                     Err([Error::Runtime(RuntimeError::UndefinedVariable { .. })])));
    assert_eq!(capture.text(), "1\n");

    assert_eq!(session.run("print 3;"), Ok(Status::Completed));
    assert_eq!(capture.text(), "1\n3\n");
}

#[test]
fn errors_inside_calls_restore_the_scope() {
    let (mut session, capture) = session();
    let _ = session.run("fun broken() { var a = \"inner\"; return a - 1; }");
    assert!(session.run("broken();").is_err());

    assert_eq!(session.run("var c = \"outer\";"), Ok(Status::Completed));
    assert_eq!(session.run("print c;"), Ok(Status::Completed));
    assert_eq!(capture.text(), "outer\n");
}

#[test]
fn unbounded_recursion_is_a_runtime_error() {
    let (mut session, capture) = session();
    let result = session.run("fun f(n) { return f(n + 1); } f(0);");
    assert_eq!(result, Err(vec![Error::Runtime(RuntimeError::StackOverflow { line: 1 })]));
    assert_eq!(result.unwrap_err()[0].to_string(), "Error on line 1: Stack overflow.");

    assert!(session.run("f(0);").is_err());
    assert_eq!(session.run("print 1;"), Ok(Status::Completed));
    assert_eq!(capture.text(), "1\n");
}

#[test]
fn deep_recursion_below_the_limit_completes() {
    assert_output("fun count(n) { if (n == 0) return 0; return 1 + count(n - 1); } \
                   print count(1000); print count(4000);",
                  "1000\n4000\n");
}

#[test]
fn deeply_nested_parentheses_fail_cleanly() {
    let nested = |depth: usize| format!("print {}1{};", "(".repeat(depth), ")".repeat(depth));
    assert_output(&nested(500), "1\n");

    let errors = assert_failure(&nested(5000));
    assert_eq!(errors, vec![Error::Parse(ParseError::TooDeeplyNested { line: 1 })]);
    assert_output(&format!("print {}1;", "-".repeat(500)), "1\n");
}

#[test]
fn syntax_errors_suppress_evaluation() {
    let (result, output) = run("print 1;\nprint (2;\nprint 3;");
    let errors = result.expect_err("must fail");
    assert!(matches!(&errors[..], [Error::Parse(ParseError::Expected { line: 2, .. })]));
    assert_eq!(output, "");
}

#[test]
fn lex_errors_are_reported_with_lines() {
    let errors = assert_failure("print 1;\nprint \"open");
    assert!(errors.contains(&Error::Lex(LexError::UnterminatedString { line: 2 })));
}

#[test]
fn exit_stops_the_rest_of_the_input() {
    let (result, output) = run("print 1; exit; print 2;");
    assert_eq!(result, Ok(Status::Exit(0)));
    assert_eq!(output, "1\n");

    let (result, output) = run("fun leave() { exit; } leave(); print 2;");
    assert_eq!(result, Ok(Status::Exit(0)));
    assert_eq!(output, "");
}

#[test]
fn fresh_lexing_after_an_error() {
    let (mut session, capture) = session();
    assert!(session.run("print \"never closed").is_err());
    assert_eq!(session.run("print \"fine\";"), Ok(Status::Completed));
    assert_eq!(capture.text(), "fine\n");
}

#[test]
fn state_persists_across_inputs() {
    let (mut session, capture) = session();
    session.set_command_mode(true);
    for line in ["var total = 0", "var total = 0;", "fun add(n) { total = total + n; }",
                 "add(2); add(3);", "print total"]
    {
        let _ = session.run(line);
    }
    assert_eq!(capture.text(), "5\n");
}

#[test]
fn keywords_have_aliases() {
    assert_output("let a = 2; def twice(x) { return x * 2; } echo twice(a);", "4\n");
    assert_output("VAR b = 1; PRINT b;", "1\n");
}
