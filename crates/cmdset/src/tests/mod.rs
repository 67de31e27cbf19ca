//! Dispatcher pipeline tests.

mod support;

use std::cell::Cell;
use std::rc::Rc;

use rstest::{fixture, rstest};
use unicode_width::UnicodeWidthStr;

use self::support::{CallLog, ScriptedCommand};
use crate::{
    Arguments, Command, CommandContext, CommandError, CommandRegistry, CommandSpec,
    DefaultCommand, Dispatcher, OptionConfig, UsageError,
};

struct Harness {
    dispatcher: Dispatcher,
    log: CallLog,
    stdout: Vec<u8>,
}

impl Harness {
    fn run(&mut self, argv: &[&str]) -> Result<(), CommandError> {
        self.dispatcher
            .run(argv.iter().copied(), &mut self.stdout)
    }

    fn stdout(&self) -> String {
        String::from_utf8(self.stdout.clone()).expect("stdout is utf8")
    }
}

#[fixture]
fn harness() -> Harness {
    let log = CallLog::default();
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .add_commands([
            ScriptedCommand::new("hello", &log).into_spec("hello", "Says hello."),
            ScriptedCommand::new("build", &log).into_spec("build", "Builds the project."),
        ])
        .expect("first group registers");
    dispatcher
        .add_commands([ScriptedCommand::new("echo", &log)
            .consuming(2)
            .with_boolean("v")
            .into_spec("echo <first> [second]", "Echoes up to two values.")])
        .expect("second group registers");
    Harness {
        dispatcher,
        log,
        stdout: Vec::new(),
    }
}

#[rstest]
fn runs_a_named_command_through_every_stage(mut harness: Harness) {
    harness.run(&["hello"]).expect("hello succeeds");
    assert_eq!(
        harness.log.entries(),
        vec!["hello:add_options", "hello:parse_args", "hello:do_command"]
    );
    assert!(harness.stdout.is_empty());
}

#[rstest]
#[case("hello")]
#[case("HELLO")]
#[case("Hello")]
fn selects_commands_case_insensitively(mut harness: Harness, #[case] name: &str) {
    harness.run(&[name]).expect("command found");
    assert!(harness.log.contains("hello:do_command"));
}

#[rstest]
fn rejects_unknown_commands(mut harness: Harness) {
    let error = harness.run(&["bogus"]).expect_err("bogus is unregistered");
    assert!(error.is_usage());
    assert!(error.to_string().contains("bogus"), "{error}");
    assert!(harness.log.entries().is_empty());
}

#[rstest]
fn rejects_leftover_positionals_before_execution(mut harness: Harness) {
    let error = harness
        .run(&["build", "extra", "more"])
        .expect_err("build takes no positionals");
    assert_eq!(error.unexpected_argument(), Some("extra"));
    assert!(harness.log.contains("build:parse_args"));
    assert!(!harness.log.contains("build:do_command"));
}

#[rstest]
fn positionals_reach_handlers_as_literal_text(mut harness: Harness) {
    harness.run(&["echo", "007", "1e3"]).expect("echo consumes two");
    assert!(harness.log.contains("echo:arg=007"));
    assert!(harness.log.contains("echo:arg=1e3"));
}

#[rstest]
fn declared_booleans_do_not_swallow_positionals(mut harness: Harness) {
    harness.run(&["echo", "-v", "value"]).expect("echo succeeds");
    assert!(harness.log.contains("echo:arg=value"));
    assert!(harness.log.contains("echo:flag=v"));
}

#[rstest]
#[case(&["hello", "-h"])]
#[case(&["hello", "--help"])]
#[case(&["build", "extra", "--help"])]
fn command_help_short_circuits(mut harness: Harness, #[case] argv: &[&str]) {
    harness.run(argv).expect("help completes without error");
    let name = argv.first().copied().unwrap_or_default();
    assert!(harness.stdout().contains(name), "{}", harness.stdout());
    assert!(!harness.log.contains(&format!("{name}:parse_args")));
    assert!(!harness.log.contains(&format!("{name}:do_command")));
}

#[rstest]
fn aggregate_help_lists_groups(mut harness: Harness) {
    harness.run(&["--help"]).expect("help completes");
    let expected = "Commands:\n\
                    \n  hello\n      Says hello.\n\
                    \x20 build\n      Builds the project.\n\
                    \n  echo <first> [second]\n      Echoes up to two values.\n\
                    \n";
    assert_eq!(harness.stdout(), expected);
    assert!(harness.log.entries().is_empty());
}

#[rstest]
fn default_path_reports_missing_command(mut harness: Harness) {
    let error = harness.run(&[]).expect_err("no command named");
    assert!(matches!(
        error,
        CommandError::Usage(UsageError::MissingCommand)
    ));
    let error = harness
        .run(&["--verbose"])
        .expect_err("options alone do not name a command");
    assert!(error.is_usage());
}

#[rstest]
fn default_path_rejects_positionals_after_options(mut harness: Harness) {
    let error = harness
        .run(&["--verbose=1", "stray"])
        .expect_err("default path consumes nothing");
    assert_eq!(error.unexpected_argument(), Some("stray"));
}

#[test]
fn empty_dispatcher_is_not_implemented() {
    let mut dispatcher = Dispatcher::new();
    let error = dispatcher
        .run(Vec::<String>::new(), &mut Vec::<u8>::new())
        .expect_err("nothing to run");
    assert!(matches!(error, CommandError::NotImplemented));
    assert!(!error.is_usage());
}

#[test]
fn validation_errors_are_forwarded_verbatim() {
    let log = CallLog::default();
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .add_commands([ScriptedCommand::new("deploy", &log)
            .rejecting("invalid region 'mars'")
            .into_spec("deploy <region>", "Deploys.")])
        .expect("registers");
    let error = dispatcher
        .run(["deploy", "mars"], &mut Vec::<u8>::new())
        .expect_err("region rejected");
    assert!(matches!(
        &error,
        CommandError::Usage(UsageError::Invalid { message }) if message == "invalid region 'mars'"
    ));
    assert!(!log.contains("deploy:do_command"));
}

#[test]
fn execution_failures_are_reported() {
    let log = CallLog::default();
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .add_commands([ScriptedCommand::new("sync", &log)
            .failing("remote unreachable")
            .into_spec("sync", "Syncs.")])
        .expect("registers");
    let error = dispatcher
        .run(["sync"], &mut Vec::<u8>::new())
        .expect_err("sync fails");
    assert!(!error.is_usage());
    assert_eq!(error.to_string(), "remote unreachable");
}

#[test]
fn every_invocation_gets_a_fresh_handler() {
    struct Counted;

    impl Command for Counted {
        fn do_command(
            &mut self,
            _context: &CommandContext<'_>,
            _args: Arguments,
        ) -> Result<(), CommandError> {
            Ok(())
        }
    }

    let created = Rc::new(Cell::new(0));
    let counter = Rc::clone(&created);
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .add_commands([CommandSpec::new("count", "Counts.", move || {
            counter.set(counter.get() + 1);
            Counted
        })
        .expect("valid syntax")])
        .expect("registers");

    for _ in 0..3 {
        dispatcher
            .run(["count"], &mut Vec::<u8>::new())
            .expect("count succeeds");
    }
    assert_eq!(created.get(), 3);
}

#[test]
#[should_panic(expected = "broken validation")]
fn defects_in_validation_propagate() {
    struct Broken;

    impl Command for Broken {
        fn parse_args(
            &mut self,
            _context: &CommandContext<'_>,
            _args: &mut Arguments,
        ) -> Result<(), UsageError> {
            panic!("broken validation");
        }

        fn do_command(
            &mut self,
            _context: &CommandContext<'_>,
            _args: Arguments,
        ) -> Result<(), CommandError> {
            Ok(())
        }
    }

    let mut dispatcher = Dispatcher::new();
    dispatcher
        .add_commands([CommandSpec::new("broken", "Breaks.", || Broken).expect("valid syntax")])
        .expect("registers");
    let _ = dispatcher.run(["broken"], &mut Vec::<u8>::new());
}

#[test]
fn duplicate_registration_fails_before_any_run() {
    let log = CallLog::default();
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .add_commands([ScriptedCommand::new("a", &log).into_spec("build", "")])
        .expect("first registration");
    let error = dispatcher
        .add_commands([ScriptedCommand::new("b", &log).into_spec("Build", "")])
        .expect_err("same normalised name");
    assert!(error.to_string().contains("build"));
}

#[test]
fn debug_output_names_registered_commands() {
    let log = CallLog::default();
    let mut dispatcher = Dispatcher::new().with_help_width(42);
    dispatcher
        .add_commands([ScriptedCommand::new("a", &log).into_spec("build", "")])
        .expect("registration");
    let rendered = format!("{dispatcher:?}");
    assert!(rendered.starts_with("Dispatcher"), "{rendered}");
    assert!(rendered.contains("\"build\""), "{rendered}");
    assert!(rendered.contains("help_width: 42"), "{rendered}");
}

#[test]
fn help_is_wrapped_at_the_configured_width() {
    let log = CallLog::default();
    let mut dispatcher = Dispatcher::new().with_help_width(24);
    dispatcher
        .add_commands([ScriptedCommand::new("fmt", &log).into_spec(
            "fmt",
            "Formats every source file in the workspace using the shared style.",
        )])
        .expect("registers");

    let mut stdout = Vec::new();
    dispatcher.run(["fmt", "-h"], &mut stdout).expect("help");
    let help = String::from_utf8(stdout).expect("utf8");
    assert!(help.lines().count() > 2, "{help}");
    for line in help.lines() {
        assert!(line.width() <= 24, "{line:?} exceeds 24 columns");
    }
}

struct Versioned {
    log: CallLog,
}

impl DefaultCommand for Versioned {
    fn add_options(&self, options: &mut OptionConfig) {
        options.boolean("version").alias("version", "V");
    }

    fn parse_args(
        &mut self,
        _registry: &CommandRegistry,
        args: &mut Arguments,
    ) -> Result<(), UsageError> {
        if args.flag("version") && args.has_positionals() {
            return Err(UsageError::invalid("--version takes no arguments"));
        }
        Ok(())
    }

    fn do_command(
        &mut self,
        registry: &CommandRegistry,
        args: Arguments,
    ) -> Result<(), CommandError> {
        if args.flag("version") {
            self.log.record(format!("version with {} commands", registry.len()));
            return Ok(());
        }
        Err(UsageError::MissingCommand.into())
    }

    fn help_intro(&self, _width: usize) -> String {
        String::from("Usage: tool <command>\n")
    }

    fn help_entry(&self, spec: &CommandSpec, _width: usize) -> String {
        format!("* {}\n", spec.name())
    }

    fn help_trailer(&self, _width: usize) -> String {
        String::from("See the manual.\n")
    }
}

#[fixture]
fn versioned() -> (Dispatcher<Versioned>, CallLog) {
    let log = CallLog::default();
    let mut dispatcher = Dispatcher::with_default_command(Versioned { log: log.clone() });
    dispatcher
        .add_commands([ScriptedCommand::new("lint", &log).into_spec("lint [path]", "Lints.")])
        .expect("registers");
    (dispatcher, log)
}

#[rstest]
fn default_command_hooks_run_on_the_default_path(versioned: (Dispatcher<Versioned>, CallLog)) {
    let (mut dispatcher, log) = versioned;
    dispatcher
        .run(["-V"], &mut Vec::<u8>::new())
        .expect("version succeeds");
    assert_eq!(log.entries(), vec!["version with 1 commands"]);

    let error = dispatcher
        .run(["--version", "extra"], &mut Vec::<u8>::new())
        .expect_err("validation rejects extras");
    assert_eq!(error.to_string(), "--version takes no arguments");
}

#[rstest]
fn help_layout_pieces_are_overridable(versioned: (Dispatcher<Versioned>, CallLog)) {
    let (mut dispatcher, _log) = versioned;

    let mut stdout = Vec::new();
    dispatcher.run(["-h"], &mut stdout).expect("help");
    assert_eq!(
        String::from_utf8(stdout).expect("utf8"),
        "Usage: tool <command>\n\n* lint\nSee the manual.\n"
    );

    let mut stdout = Vec::new();
    dispatcher.run(["lint", "--help"], &mut stdout).expect("help");
    assert_eq!(String::from_utf8(stdout).expect("utf8"), "* lint\n");
}
