use std::collections::HashMap;
use std::env;

use crate::model::{Bag, Origin};
use crate::registry::ArgumentRegistry;
use crate::request::tokens;

/// The capability to produce a raw bag for an origin.
///
/// This replaces ambient process state (argv, request superglobals): the host injects a
/// source, and the normalizer pulls from it at most once per normalization cycle.
pub trait RawSource {
    /// Produce the raw bag for `origin`.
    ///
    /// The declared arguments are available for sources that tokenize against an option
    /// spec (the CLI case); form-decoded sources may ignore them.
    fn fetch(&self, origin: Origin, registry: &ArgumentRegistry) -> Bag;
}

/// A CLI-origin source over command line tokens.
///
/// Tokens are split getopt-style against the declared arguments: `-x`, `--xy`, `-x=v`,
/// `--xy=v`; repeats accumulate; unrecognized tokens are skipped; a bare `--` ends option
/// scanning.
/// Any origin other than [`Origin::Cli`] yields an empty bag.
pub struct ArgsSource {
    tokens: Vec<String>,
}

impl ArgsSource {
    /// A source over the process arguments (skipping the program name).
    pub fn from_env() -> Self {
        Self {
            tokens: env::args().skip(1).collect(),
        }
    }

    /// A source over the given tokens.
    pub fn new(tokens: Vec<impl Into<String>>) -> Self {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

impl RawSource for ArgsSource {
    fn fetch(&self, origin: Origin, registry: &ArgumentRegistry) -> Bag {
        match origin {
            Origin::Cli => {
                let tokens: Vec<&str> = self.tokens.iter().map(AsRef::as_ref).collect();
                tokens::split(tokens.as_slice(), registry)
            }
            _ => Bag::default(),
        }
    }
}

/// A source over prepared per-origin bags.
///
/// HTTP hosts decode their query/body fields into a bag and park it here under the request's
/// verb; origins without a prepared bag yield an empty one.
/// Also the natural source for tests.
///
/// ### Example
/// ```
/// use rebag::{Bag, Origin, RawSource, StaticSource, Value};
/// use rebag::ArgumentRegistry;
///
/// let mut bag = Bag::default();
/// bag.insert("delta".to_string(), Value::from("1"));
/// let source = StaticSource::default().with(Origin::Post, bag);
///
/// let registry = ArgumentRegistry::new();
/// assert_eq!(source.fetch(Origin::Post, &registry).len(), 1);
/// assert!(source.fetch(Origin::Get, &registry).is_empty());
/// ```
#[derive(Default)]
pub struct StaticSource {
    bags: HashMap<Origin, Bag>,
}

impl StaticSource {
    /// This source, with `bag` prepared for `origin`.
    /// If repeated for the same origin, only the final bag applies.
    pub fn with(mut self, origin: Origin, bag: Bag) -> Self {
        self.bags.insert(origin, bag);
        self
    }
}

impl RawSource for StaticSource {
    fn fetch(&self, origin: Origin, _registry: &ArgumentRegistry) -> Bag {
        self.bags.get(&origin).cloned().unwrap_or_default()
    }
}
