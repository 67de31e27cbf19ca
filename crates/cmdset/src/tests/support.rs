//! Test doubles shared by the dispatcher unit and behavioural tests.
//!
//! [`ScriptedCommand`] records every hook the dispatcher calls into a shared
//! [`CallLog`] so tests can assert which stages of the pipeline ran.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    Arguments, Command, CommandContext, CommandError, CommandSpec, OptionConfig, UsageError,
};

/// Ordered record of hook invocations.
#[derive(Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    pub(crate) fn record(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub(crate) fn contains(&self, entry: &str) -> bool {
        self.0.borrow().iter().any(|recorded| recorded == entry)
    }
}

/// A command whose behaviour is configured per test.
#[derive(Clone)]
pub(crate) struct ScriptedCommand {
    name: String,
    log: CallLog,
    consumes: usize,
    reject_with: Option<String>,
    fail_with: Option<String>,
    booleans: Vec<&'static str>,
}

impl ScriptedCommand {
    pub(crate) fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_owned(),
            log: log.clone(),
            consumes: 0,
            reject_with: None,
            fail_with: None,
            booleans: Vec::new(),
        }
    }

    pub(crate) const fn consuming(mut self, count: usize) -> Self {
        self.consumes = count;
        self
    }

    pub(crate) fn rejecting(mut self, message: &str) -> Self {
        self.reject_with = Some(message.to_owned());
        self
    }

    pub(crate) fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_owned());
        self
    }

    pub(crate) fn with_boolean(mut self, name: &'static str) -> Self {
        self.booleans.push(name);
        self
    }

    pub(crate) fn into_spec(self, syntax: &str, summary: &str) -> CommandSpec {
        CommandSpec::new(syntax, summary, move || self.clone()).expect("valid command syntax")
    }

    fn record(&self, hook: &str) {
        self.log.record(format!("{}:{hook}", self.name));
    }
}

impl Command for ScriptedCommand {
    fn add_options(&self, options: &mut OptionConfig) {
        self.record("add_options");
        for name in &self.booleans {
            options.boolean(name);
        }
    }

    fn parse_args(
        &mut self,
        _context: &CommandContext<'_>,
        args: &mut Arguments,
    ) -> Result<(), UsageError> {
        self.record("parse_args");
        if let Some(message) = &self.reject_with {
            return Err(UsageError::invalid(message.clone()));
        }
        for _ in 0..self.consumes {
            match args.take_positional() {
                Some(argument) => self.record(&format!("arg={argument}")),
                None => break,
            }
        }
        Ok(())
    }

    fn do_command(
        &mut self,
        _context: &CommandContext<'_>,
        args: Arguments,
    ) -> Result<(), CommandError> {
        self.record("do_command");
        for name in &self.booleans {
            if args.flag(name) {
                self.record(&format!("flag={name}"));
            }
        }
        match &self.fail_with {
            Some(message) => Err(CommandError::failed(message.clone())),
            None => Ok(()),
        }
    }
}
