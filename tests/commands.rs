use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

use clara::{
    Error, Session, Status,
    command::{CommandMap, ConsoleModule, Module, Reception},
    error::ParseError,
    interpreter::value::core::Value,
};
use pretty_assertions::assert_eq;

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

type Seen = Rc<RefCell<Vec<(String, CommandMap)>>>;

/// Keeps every command it receives. Refuses `heat`.
struct Lab {
    seen: Seen,
}

impl Module for Lab {
    fn name(&self) -> &str {
        "lab"
    }

    fn commands(&self) -> &[&str] {
        &["mycmd", "mix", "heat"]
    }

    fn help(&self, command: &str) -> Option<String> {
        (command == "mix").then(|| "mix <substance>... [--volume <n>]".to_string())
    }

    fn receive(&mut self, command: &str, map: &CommandMap) -> Reception {
        self.seen.borrow_mut().push((command.to_string(), map.clone()));
        if command == "heat" {
            Reception::Refused("no burner".to_string())
        } else {
            Reception::Accepted
        }
    }
}

fn lab_session() -> (Session, Capture, Seen) {
    let capture = Capture::default();
    let seen = Seen::default();
    let mut session = Session::with_output(Box::new(capture.clone()));
    session.register("lab", Box::new(Lab { seen: Rc::clone(&seen) }));
    (session, capture, seen)
}

fn strings(words: &[&str]) -> Vec<Value> {
    words.iter().copied().map(Value::from).collect()
}

#[test]
fn registered_words_lex_as_commands() {
    let (session, ..) = lab_session();
    assert!(session.command_words().contains("MIX"));
    assert!(session.command_words().contains("open"));
    assert!(!Session::with_output(Box::new(io::sink())).command_words().contains("mix"));
}

#[test]
fn parameters_and_flags_reach_the_module() {
    let (mut session, _, seen) = lab_session();
    assert_eq!(session.run("mycmd --foo x y -bar"), Ok(Status::Completed));

    let seen = seen.borrow();
    let (command, map) = &seen[0];
    assert_eq!(command, "mycmd");
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["flags", "arguments", "foo"]);
    assert_eq!(map.flags(), strings(&["bar"]).as_slice());
    assert!(map.arguments().is_empty());
    assert_eq!(map.get("foo"), Some(strings(&["x", "y"]).as_slice()));
}

#[test]
fn parenthesised_arguments_are_evaluated_first() {
    let (mut session, _, seen) = lab_session();
    let result = session.run("var n = 2; MIX water, salt --volume (n * 3) 1.5 \"l\";");
    assert_eq!(result, Ok(Status::Completed));

    let seen = seen.borrow();
    let (command, map) = &seen[0];
    assert_eq!(command, "mix");
    assert_eq!(map.arguments(), strings(&["water", "salt"]).as_slice());
    assert_eq!(map.get("volume"),
               Some(&[Value::Number(6.0), Value::Number(1.5), Value::from("l")][..]));
}

#[test]
fn bare_words_are_not_variable_lookups() {
    let (mut session, _, seen) = lab_session();
    session.run("var n = 2; mix n (n) --with n (n);").expect("runs");

    let seen = seen.borrow();
    let (_, map) = &seen[0];
    assert_eq!(map.arguments(), &[Value::from("n"), Value::Number(2.0)][..]);
    assert_eq!(map.get("with"), Some(&[Value::from("n"), Value::Number(2.0)][..]));
}

#[test]
fn commands_run_inside_functions_with_local_values() {
    let (mut session, _, seen) = lab_session();
    session.run("fun batch(amount) { mix --amount (amount); } batch(1); batch(2);")
           .expect("runs");

    let amounts: Vec<String> = seen.borrow()
                                   .iter()
                                   .map(|(_, map)| map.to_string())
                                   .collect();
    assert_eq!(amounts,
               vec!["{flags: [], arguments: [], amount: [1]}",
                    "{flags: [], arguments: [], amount: [2]}"]);
}

#[test]
fn refused_and_unclaimed_commands_are_not_errors() {
    let (mut session, capture, seen) = lab_session();
    assert_eq!(session.run("heat flask; open flask; print \"after\";"),
               Ok(Status::Completed));
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(capture.text(), "after\n");
}

#[test]
fn help_without_modules() {
    let capture = Capture::default();
    let mut session = Session::with_output(Box::new(capture.clone()));
    assert_eq!(session.run("help"), Ok(Status::Completed));
    assert_eq!(session.run("help open;"), Ok(Status::Completed));
    assert_eq!(capture.text(), "No commands available yet.\nCommand not yet implemented.\n");
}

#[test]
fn help_lists_and_describes_module_commands() {
    let (mut session, capture, _) = lab_session();
    session.run("help; help mix; help heat;").expect("runs");
    assert_eq!(capture.text(),
               "Available commands: heat, mix, mycmd\nmix <substance>... [--volume <n>]\nCommand \
                not yet implemented.\n");
}

#[test]
fn help_needs_a_command_word() {
    let (mut session, ..) = lab_session();
    let errors = session.run("help water;").expect_err("must fail");
    assert_eq!(errors,
               vec![Error::Parse(ParseError::NoSuchCommand { found: "water".to_string(),
                                                             line:  1, })]);
}

#[test]
fn argument_errors_stop_the_whole_input() {
    let (mut session, _, seen) = lab_session();
    assert!(session.run("mix water; mix -5;").is_err());
    assert!(session.run("mix --;").is_err());
    assert!(session.run("mix {;").is_err());
    assert!(seen.borrow().is_empty());
}

#[test]
fn runtime_errors_in_arguments_skip_dispatch() {
    let (mut session, _, seen) = lab_session();
    assert!(session.run("mix (missing);").is_err());
    assert!(seen.borrow().is_empty());
}

#[test]
fn exit_is_a_command() {
    let (mut session, capture, _) = lab_session();
    session.set_command_mode(true);
    assert_eq!(session.run("print 1"), Ok(Status::Completed));
    assert_eq!(session.run("EXIT"), Ok(Status::Exit(0)));
    assert_eq!(capture.text(), "1\n");
}

#[test]
fn command_words_evaluate_to_their_name() {
    let (mut session, capture, _) = lab_session();
    session.run("var c = Mix; print c; print open == \"open\";").expect("runs");
    assert_eq!(capture.text(), "mix\ntrue\n");
}

#[test]
fn console_echoes_each_command() {
    let echo = Capture::default();
    let mut session = Session::with_output(Box::new(io::sink()));
    session.register("console", Box::new(ConsoleModule::with_output(Box::new(echo.clone()))));

    session.run("open flask -sealed --volume 2; create batch;").expect("runs");
    assert_eq!(echo.text(),
               "open {flags: [sealed], arguments: [flask], volume: [2]}\ncreate {flags: [], \
                arguments: [batch]}\n");
}

#[test]
fn installed_modules_are_known_by_their_own_name() {
    let capture = Capture::default();
    let first = Seen::default();
    let mut session = Session::with_output(Box::new(capture.clone()));
    session.install(Box::new(Lab { seen: Rc::clone(&first) }));
    session.run("help mix;").expect("runs");
    assert_eq!(capture.text(), "mix <substance>... [--volume <n>]\n");

    let second = Seen::default();
    session.register("lab", Box::new(Lab { seen: Rc::clone(&second) }));
    session.run("mix water;").expect("runs");
    assert!(first.borrow().is_empty());
    assert_eq!(second.borrow().len(), 1);
}

#[test]
fn registering_a_name_again_replaces_the_module() {
    let (mut session, _, first) = lab_session();
    let second = Seen::default();
    session.register("lab", Box::new(Lab { seen: Rc::clone(&second) }));

    session.run("mix water;").expect("runs");
    assert!(first.borrow().is_empty());
    assert_eq!(second.borrow().len(), 1);
}
