//! Option declarations and parsed option values.
//!
//! [`OptionConfig`] accumulates declarations from every contributor taking
//! part in an invocation: the dispatcher seeds `-h`/`--help`, and handlers
//! append their own options. Contributions only ever add; a name declared
//! twice is the same declaration.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

/// Name of the implicit help flag recognised on every path.
pub const HELP_OPTION: &str = "help";

/// Short alias of [`HELP_OPTION`].
pub const HELP_ALIAS: &str = "h";

/// A numeric option value that keeps the literal it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numeric {
    literal: String,
}

impl Numeric {
    /// Wraps `literal` when it reads as a number, otherwise returns `None`.
    #[must_use]
    pub fn parse(literal: &str) -> Option<Self> {
        is_numeric_literal(literal).then(|| Self {
            literal: literal.to_owned(),
        })
    }

    /// The literal text as supplied on the command line.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Interprets the literal as a signed integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self.literal.strip_prefix("0x") {
            Some(hex) => i64::from_str_radix(hex, 16).ok(),
            None => self.literal.parse().ok(),
        }
    }

    /// Interprets the literal as a floating point number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.literal.parse().ok()
    }
}

fn is_numeric_literal(text: &str) -> bool {
    if let Some(hex) = text.strip_prefix("0x") {
        return !hex.is_empty() && hex.chars().all(|ch| ch.is_ascii_hexdigit());
    }

    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());
    let mantissa_ok = digits(whole)
        && digits(fraction)
        && (!whole.is_empty() || !fraction.is_empty());
    let exponent_ok = exponent.is_none_or(|exp| {
        let exp = exp.strip_prefix(['-', '+']).unwrap_or(exp);
        !exp.is_empty() && digits(exp)
    });
    mantissa_ok && exponent_ok
}

/// A value assigned to an option by the tokenizer or a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// A switch.
    Bool(bool),
    /// Free text.
    Text(String),
    /// A value that reads as a number.
    Number(Numeric),
    /// Every value supplied for an option given more than once.
    List(Vec<OptionValue>),
}

impl OptionValue {
    /// Wraps `text`, inferring a number when it reads as one.
    #[must_use]
    pub fn infer(text: &str) -> Self {
        Numeric::parse(text).map_or_else(|| Self::Text(text.to_owned()), Self::Number)
    }

    /// Truthiness used for switch lookups.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Text(text) => !text.is_empty(),
            Self::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
            Self::List(values) => values.last().is_some_and(Self::is_truthy),
        }
    }

    /// Returns the text of a single text or numeric value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(number) => Some(number.literal()),
            Self::Bool(_) | Self::List(_) => None,
        }
    }

    /// Converts the value back to the literal text it represents.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.literal,
            other => other.to_string(),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => f.write_str(number.literal()),
            Self::List(values) => {
                let mut first = true;
                for value in values {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{value}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Additive accumulator of option declarations.
///
/// Builder methods return `&mut Self` so contributors can chain
/// declarations:
///
/// ```rust,ignore
/// options
///     .boolean("force")
///     .alias("force", "f")
///     .string("output")
///     .default_value("output", "out.txt");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionConfig {
    aliases: BTreeMap<String, BTreeSet<String>>,
    booleans: BTreeSet<String>,
    strings: BTreeSet<String>,
    defaults: BTreeMap<String, OptionValue>,
}

impl OptionConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the base configuration every invocation starts from.
    ///
    /// It declares the boolean `--help` flag with its `-h` alias.
    #[must_use]
    pub fn with_help() -> Self {
        let mut config = Self::new();
        config.boolean(HELP_OPTION).alias(HELP_OPTION, HELP_ALIAS);
        config
    }

    /// Declares `alias` as another name for `name`.
    pub fn alias(&mut self, name: &str, alias: &str) -> &mut Self {
        if name != alias {
            self.link(name, alias);
            self.link(alias, name);
        }
        self
    }

    fn link(&mut self, from: &str, to: &str) {
        self.aliases
            .entry(from.to_owned())
            .or_default()
            .insert(to.to_owned());
    }

    /// Declares a switch that never consumes the following token.
    pub fn boolean(&mut self, name: &str) -> &mut Self {
        self.booleans.insert(name.to_owned());
        self
    }

    /// Declares an option whose values are never type-inferred.
    pub fn string(&mut self, name: &str) -> &mut Self {
        self.strings.insert(name.to_owned());
        self
    }

    /// Declares the value `name` takes when absent from the command line.
    ///
    /// The first contributor to declare a default for a name keeps it.
    pub fn default_value(&mut self, name: &str, value: impl Into<OptionValue>) -> &mut Self {
        self.defaults
            .entry(name.to_owned())
            .or_insert_with(|| value.into());
        self
    }

    /// Folds every declaration of `other` into this configuration.
    pub fn merge(&mut self, other: &Self) -> &mut Self {
        for (name, aliases) in &other.aliases {
            for alias in aliases {
                self.alias(name, alias);
            }
        }
        self.booleans.extend(other.booleans.iter().cloned());
        self.strings.extend(other.strings.iter().cloned());
        for (name, value) in &other.defaults {
            self.default_value(name, value.clone());
        }
        self
    }

    /// Returns `name` together with every name reachable through aliases.
    #[must_use]
    pub fn alias_group(&self, name: &str) -> BTreeSet<String> {
        let mut group = BTreeSet::from([name.to_owned()]);
        let mut pending = VecDeque::from([name.to_owned()]);
        while let Some(current) = pending.pop_front() {
            for alias in self.aliases.get(&current).into_iter().flatten() {
                if group.insert(alias.clone()) {
                    pending.push_back(alias.clone());
                }
            }
        }
        group
    }

    /// Returns `true` when `name` or any alias of it is a declared switch.
    #[must_use]
    pub fn is_boolean(&self, name: &str) -> bool {
        self.alias_group(name)
            .iter()
            .any(|member| self.booleans.contains(member))
    }

    /// Returns `true` when `name` or any alias of it is a declared string.
    #[must_use]
    pub fn is_string(&self, name: &str) -> bool {
        self.alias_group(name)
            .iter()
            .any(|member| self.strings.contains(member))
    }

    /// Declared switches, in name order.
    pub fn booleans(&self) -> impl Iterator<Item = &str> {
        self.booleans.iter().map(String::as_str)
    }

    /// Declared defaults, in name order.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.defaults.iter().map(|(name, value)| (name.as_str(), value))
    }
}
