use std::str::FromStr;

use indexmap::IndexMap;
use thiserror::Error;

use crate::model::{OptionKey, OptionValue, Validator};

/// An error raised while declaring an argument.
#[derive(Debug, Error)]
pub enum DeclareError {
    /// A short or long name failed its format check.
    #[error("malformed name '{0}': short names are one alphanumeric character, long names two or more.")]
    MalformedName(String),

    /// A name is already taken by a different argument.
    #[error("cannot duplicate the name '{0}'.")]
    DuplicateName(String),

    /// An option key outside the recognized set (batch configuration path only).
    #[error("unknown option '{0}'.")]
    UnknownOption(String),

    /// An option value failed its key's type check.
    #[error("invalid value for option '{0}'.")]
    InvalidOptionValue(OptionKey),
}

/// An error raised when a lookup name resolves to neither a short nor a long name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown argument '{0}'.")]
pub struct UnknownArgument(pub(crate) String);

/// The resolved behavioral options of a declared argument.
#[derive(Debug, Default)]
pub struct ArgumentOptions {
    value_expected: bool,
    multiple_expected: bool,
    validate: Option<Validator>,
}

impl ArgumentOptions {
    /// Whether the argument carries a value (`false` means presence flag).
    pub fn value_expected(&self) -> bool {
        self.value_expected
    }

    /// Whether occurrences accumulate into a sequence (`false` means last occurrence wins).
    pub fn multiple_expected(&self) -> bool {
        self.multiple_expected
    }

    /// The validation gate, if one was declared.
    pub fn validate(&self) -> Option<&Validator> {
        self.validate.as_ref()
    }
}

/// One declared argument: a short/long name pair, its help text, and its options.
#[derive(Debug)]
pub struct ArgumentSpec {
    short_name: String,
    long_name: String,
    explicit_long: bool,
    doc: String,
    options: ArgumentOptions,
}

impl ArgumentSpec {
    /// The single-character identifier.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// The multi-character identifier.
    /// Defaults to the short name when none was declared.
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    /// Padding metadata for help rendering: the length of the declared long name, or `0`
    /// when the long name is defaulted.
    pub fn long_name_length(&self) -> usize {
        if self.explicit_long {
            self.long_name.len()
        } else {
            0
        }
    }

    /// The help text.
    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// The resolved options.
    pub fn options(&self) -> &ArgumentOptions {
        &self.options
    }
}

/// A declaration in progress; consumed by [`ArgumentRegistry::define`].
///
/// ### Example
/// ```
/// use rebag::{Argument, OptionKey, OptionValue};
///
/// let argument = Argument::new("g")
///     .long("gamma")
///     .doc("A validated option.")
///     .option(OptionKey::ValueExpected, true)
///     .option(
///         OptionKey::MustValidate,
///         OptionValue::predicate(|_short, value| !value.is_falsy()),
///     );
/// # drop(argument);
/// ```
#[derive(Debug)]
pub struct Argument {
    short_name: String,
    long_name: Option<String>,
    doc: String,
    options: Vec<(OptionKey, OptionValue)>,
}

impl Argument {
    /// Start a declaration for the argument with the given short name.
    pub fn new(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            long_name: None,
            doc: String::default(),
            options: Vec::default(),
        }
    }

    /// Declare the long name.
    /// If repeated, only the final long name applies.
    pub fn long(mut self, long_name: impl Into<String>) -> Self {
        self.long_name.replace(long_name.into());
        self
    }

    /// Document the argument for help rendering.
    /// If repeated, only the final text applies.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Assign an option.
    /// If repeated for the same key, only the final assignment applies.
    pub fn option(mut self, key: OptionKey, value: impl Into<OptionValue>) -> Self {
        self.options.push((key, value.into()));
        self
    }
}

/// A batch declaration record with string option keys, for configuration-driven setups.
///
/// Unlike [`Argument`], the option keys here are unchecked text; a key outside the
/// recognized set surfaces as [`DeclareError::UnknownOption`].
#[derive(Debug)]
pub struct ArgumentConfig {
    /// The single-character identifier.
    pub short_name: String,
    /// The multi-character identifier, if any.
    pub long_name: Option<String>,
    /// The help text.
    pub doc: String,
    /// Option assignments, keyed by canonical spelling (ex: `"VALUE_EXPECTED"`).
    pub options: Vec<(String, OptionValue)>,
}

/// The set of declared arguments, in declaration order.
///
/// Short and long names are two labels for one identity; every lookup accepts either form,
/// with or without leading dashes.
#[derive(Debug, Default)]
pub struct ArgumentRegistry {
    arguments: IndexMap<String, ArgumentSpec>,
}

impl ArgumentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an argument.
    ///
    /// Fails without storing anything if a name is malformed, a name collides with a
    /// *different* argument, or any option value fails its key's type check.
    /// Re-declaring the same short name replaces the previous spec entirely.
    ///
    /// Declaring `MultipleExpected` truthy without an explicit `ValueExpected` assignment
    /// also stores `ValueExpected = true`.
    pub fn define(&mut self, argument: Argument) -> Result<(), DeclareError> {
        let Argument {
            short_name,
            long_name,
            doc,
            options,
        } = argument;

        if !is_short_name(&short_name) {
            return Err(DeclareError::MalformedName(short_name));
        }

        if let Some(ref long_name) = long_name {
            if !is_long_name(long_name) {
                return Err(DeclareError::MalformedName(long_name.clone()));
            }
        }

        let effective_long = long_name.clone().unwrap_or_else(|| short_name.clone());

        for spec in self.arguments.values() {
            if spec.short_name == short_name {
                // Re-declaration of the same argument; collisions with itself are fine.
                continue;
            }

            if spec.long_name == effective_long || spec.short_name == effective_long {
                return Err(DeclareError::DuplicateName(effective_long));
            }
        }

        let value_declared = options
            .iter()
            .any(|(key, _)| matches!(key, OptionKey::ValueExpected));
        let mut resolved = ArgumentOptions::default();

        for (key, value) in options {
            match (key, value) {
                (OptionKey::ValueExpected, OptionValue::Flag(flag)) => {
                    resolved.value_expected = flag;
                }
                (OptionKey::MultipleExpected, OptionValue::Flag(flag)) => {
                    resolved.multiple_expected = flag;
                }
                (OptionKey::MustValidate, OptionValue::Flag(flag)) => {
                    resolved.validate.replace(Validator::Enabled(flag));
                }
                (OptionKey::MustValidate, OptionValue::Predicate(predicate)) => {
                    resolved.validate.replace(Validator::Predicate(predicate));
                }
                (key, OptionValue::Predicate(_)) => {
                    return Err(DeclareError::InvalidOptionValue(key));
                }
            }
        }

        if resolved.multiple_expected && !value_declared {
            resolved.value_expected = true;
        }

        self.arguments.insert(
            short_name.clone(),
            ArgumentSpec {
                short_name,
                long_name: effective_long,
                explicit_long: long_name.is_some(),
                doc,
                options: resolved,
            },
        );
        Ok(())
    }

    /// Declare a batch of arguments, in order, stopping at the first failure.
    /// Records declared before the failure remain stored.
    pub fn extend_from_config(
        &mut self,
        configs: Vec<ArgumentConfig>,
    ) -> Result<(), DeclareError> {
        for config in configs {
            let ArgumentConfig {
                short_name,
                long_name,
                doc,
                options,
            } = config;
            let mut argument = Argument::new(short_name).doc(doc);

            if let Some(long_name) = long_name {
                argument = argument.long(long_name);
            }

            for (key, value) in options {
                let key = OptionKey::from_str(&key).map_err(DeclareError::UnknownOption)?;
                argument = argument.option(key, value);
            }

            self.define(argument)?;
        }

        Ok(())
    }

    /// Resolve a short/long name (leading dashes allowed) to the short name.
    /// `None` when the name matches no declared argument.
    pub fn to_short_name(&self, name: &str) -> Option<&str> {
        let name = strip_dashes(name);

        if let Some((short_name, _)) = self.arguments.get_key_value(name) {
            return Some(short_name.as_str());
        }

        self.arguments
            .values()
            .find(|spec| spec.long_name == name)
            .map(|spec| spec.short_name.as_str())
    }

    /// Resolve a short/long name (leading dashes allowed) to the long name.
    /// `None` when the name matches no declared argument.
    pub fn to_long_name(&self, name: &str) -> Option<&str> {
        let name = strip_dashes(name);

        if let Some(spec) = self.arguments.values().find(|spec| spec.long_name == name) {
            return Some(spec.long_name.as_str());
        }

        self.arguments
            .get(name)
            .map(|spec| spec.long_name.as_str())
    }

    /// Look up a declared argument by either name form.
    pub fn get(&self, which: &str) -> Result<&ArgumentSpec, UnknownArgument> {
        let short_name = self
            .to_short_name(which)
            .ok_or_else(|| UnknownArgument(which.to_string()))?;
        Ok(self
            .arguments
            .get(short_name)
            .expect("internal error - resolved short name must be declared"))
    }

    /// The declared arguments, in declaration order.
    pub fn specs(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.arguments.values()
    }

    /// The number of declared arguments.
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    /// Whether no arguments are declared.
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}

fn is_short_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if c.is_ascii_alphanumeric()
    )
}

fn is_long_name(name: &str) -> bool {
    name.len() >= 2 && name.chars().all(|c| c.is_ascii_alphanumeric())
}

// Strip a single leading dash off a one-character token, or a double leading dash off a
// multi-character token.
// Anything else (ex: a single dash before a multi-character token) is left untouched, which
// makes it unresolvable.
fn strip_dashes(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix("--") {
        if rest.len() >= 2 && rest.chars().all(|c| c.is_ascii_alphanumeric()) {
            return rest;
        }
    } else if let Some(rest) = name.strip_prefix('-') {
        let mut chars = rest.chars();

        if matches!(
            (chars.next(), chars.next()),
            (Some(c), None) if c.is_ascii_alphanumeric()
        ) {
            return rest;
        }
    }

    name
}
