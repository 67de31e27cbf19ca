//! Default option tokenizer.
//!
//! The dispatcher only depends on the [`OptionParser`] trait. [`FlagTokenizer`]
//! implements the conventional grammar most Unix tools accept:
//!
//! - `--` ends option parsing.
//! - `--key=value`, `--key value`, and `--no-key`.
//! - `-abc` bundles, `-k=value`, and `-n5`.
//!
//! Values are type-inferred unless their option is declared as a string, and
//! every assignment is mirrored onto all aliases of the option.

use std::collections::BTreeMap;
use std::iter::Peekable;
use std::mem;

use crate::options::{Numeric, OptionConfig, OptionValue};

/// Output of an [`OptionParser`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    /// Option values keyed by every name they were assigned under.
    pub options: BTreeMap<String, OptionValue>,
    /// Tokens that were neither options nor option values, in order.
    pub positionals: Vec<OptionValue>,
}

/// Splits a flat argument list into options and positionals.
pub trait OptionParser {
    /// Tokenizes `argv` according to the declarations in `config`.
    fn parse(&self, argv: &[String], config: &OptionConfig) -> ParsedOptions;
}

/// Conventional `--long`/`-s` option grammar.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlagTokenizer;

impl OptionParser for FlagTokenizer {
    fn parse(&self, argv: &[String], config: &OptionConfig) -> ParsedOptions {
        let mut state = TokenizerState::new(config);
        state.seed_booleans();

        let mut tokens = argv.iter().peekable();
        while let Some(token) = tokens.next() {
            if token == "--" {
                state
                    .parsed
                    .positionals
                    .extend(tokens.by_ref().map(|rest| OptionValue::Text(rest.clone())));
                break;
            }
            if let Some(body) = token.strip_prefix("--") {
                state.long(body, &mut tokens);
            } else if let Some(letters) = token.strip_prefix('-').filter(|rest| !rest.is_empty()) {
                state.short(letters, &mut tokens);
            } else {
                state.parsed.positionals.push(OptionValue::infer(token));
            }
        }

        state.apply_defaults();
        state.parsed
    }
}

struct TokenizerState<'a> {
    config: &'a OptionConfig,
    parsed: ParsedOptions,
}

impl<'a> TokenizerState<'a> {
    fn new(config: &'a OptionConfig) -> Self {
        Self {
            config,
            parsed: ParsedOptions::default(),
        }
    }

    fn seed_booleans(&mut self) {
        let config = self.config;
        for name in config.booleans() {
            let value = self
                .default_for(name)
                .unwrap_or(OptionValue::Bool(false));
            self.assign(name, value);
        }
    }

    fn default_for(&self, name: &str) -> Option<OptionValue> {
        let group = self.config.alias_group(name);
        self.config
            .defaults()
            .find(|(key, _)| group.contains(*key))
            .map(|(_, value)| value.clone())
    }

    fn apply_defaults(&mut self) {
        let config = self.config;
        for (name, value) in config.defaults() {
            if !self.parsed.options.contains_key(name) {
                self.assign(name, value.clone());
            }
        }
    }

    fn long<'t, I>(&mut self, body: &str, tokens: &mut Peekable<I>)
    where
        I: Iterator<Item = &'t String>,
    {
        if let Some((key, value)) = body.split_once('=') {
            let typed = self.typed(key, value);
            self.assign(key, typed);
        } else if let Some(key) = body.strip_prefix("no-").filter(|key| !key.is_empty()) {
            self.assign(key, OptionValue::Bool(false));
        } else {
            self.with_lookahead(body, tokens);
        }
    }

    fn short<'t, I>(&mut self, letters: &str, tokens: &mut Peekable<I>)
    where
        I: Iterator<Item = &'t String>,
    {
        let mut chars = letters.char_indices().peekable();
        while let Some((offset, letter)) = chars.next() {
            let key = letter.to_string();
            if chars.peek().is_none() {
                self.with_lookahead(&key, tokens);
                return;
            }

            let (_, rest) = letters.split_at(offset + letter.len_utf8());
            if let Some(value) = rest.strip_prefix('=') {
                let typed = self.typed(&key, value);
                self.assign(&key, typed);
                return;
            }
            if rest == "-" || (letter.is_ascii_alphabetic() && Numeric::parse(rest).is_some()) {
                let typed = self.typed(&key, rest);
                self.assign(&key, typed);
                return;
            }
            let bare = self.bare(&key);
            self.assign(&key, bare);
        }
    }

    fn with_lookahead<'t, I>(&mut self, key: &str, tokens: &mut Peekable<I>)
    where
        I: Iterator<Item = &'t String>,
    {
        let is_boolean = self.config.is_boolean(key);
        let next = tokens.peek().copied().map(String::as_str);
        match next {
            Some(next) if !is_boolean && !next.starts_with('-') => {
                let typed = self.typed(key, next);
                tokens.next();
                self.assign(key, typed);
            }
            Some(literal @ ("true" | "false")) if is_boolean => {
                let value = OptionValue::Bool(literal == "true");
                tokens.next();
                self.assign(key, value);
            }
            _ => {
                let bare = self.bare(key);
                self.assign(key, bare);
            }
        }
    }

    fn bare(&self, key: &str) -> OptionValue {
        if self.config.is_string(key) {
            OptionValue::Text(String::new())
        } else {
            OptionValue::Bool(true)
        }
    }

    fn typed(&self, key: &str, value: &str) -> OptionValue {
        if self.config.is_string(key) {
            OptionValue::Text(value.to_owned())
        } else if self.config.is_boolean(key) {
            OptionValue::Bool(value != "false")
        } else {
            OptionValue::infer(value)
        }
    }

    fn assign(&mut self, key: &str, value: OptionValue) {
        for name in self.config.alias_group(key) {
            let replace = self.config.is_boolean(&name);
            match self.parsed.options.get_mut(&name) {
                None => {
                    self.parsed.options.insert(name, value.clone());
                }
                Some(existing) if replace || matches!(existing, OptionValue::Bool(_)) => {
                    *existing = value.clone();
                }
                Some(OptionValue::List(values)) => values.push(value.clone()),
                Some(existing) => {
                    let previous = mem::replace(existing, OptionValue::List(Vec::new()));
                    *existing = OptionValue::List(vec![previous, value.clone()]);
                }
            }
        }
    }
}
