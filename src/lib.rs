//! `rebag` declares named arguments and normalizes raw requests against them.
//!
//! Plenty of crates parse command lines; `rebag` solves a slightly different problem.
//! A program often accepts the *same* named inputs whether it was started from a shell or
//! reached over HTTP with form-decoded parameters.
//! The raw material in both cases is a loosely-typed bag of key/value pairs: keys may arrive
//! as short (`-v`) or long (`--verbose`) spellings, values may be missing, empty, scalar, or
//! repeated.
//! `rebag` turns that bag into a strongly-defined mapping under rules you declare up front:
//! * *Short/long aliasing*:
//! Every argument is one identity with two spellings; every lookup accepts either, with or
//! without leading dashes.
//! * *Value semantics*:
//! An argument either carries a value or is a presence flag.
//! Presence flags always normalize to `true`, never to the raw text.
//! * *Multiplicity*:
//! Repeated occurrences either collapse to the last value or accumulate into a sequence,
//! per argument.
//! * *Validation*:
//! A per-argument predicate gates acceptance of the resolved value; the first rejection
//! aborts the whole normalization.
//!
//! # Usage
//! ```
//! use rebag::{
//!     Argument, ArgumentRegistry, ArgsSource, OptionKey, Origin, OriginSet,
//!     RequestNormalizer, Value,
//! };
//!
//! let mut registry = ArgumentRegistry::new();
//! registry
//!     .define(Argument::new("h").long("help").doc("Show this help document."))
//!     .unwrap();
//! registry
//!     .define(
//!         Argument::new("d")
//!             .long("delta")
//!             .doc("A value-carrying, repeatable option.")
//!             .option(OptionKey::ValueExpected, true)
//!             .option(OptionKey::MultipleExpected, true),
//!     )
//!     .unwrap();
//!
//! let source = ArgsSource::new(vec!["-h", "--delta=1", "--delta=2"]);
//! let mut normalizer = RequestNormalizer::new(&registry, Box::new(source))
//!     .origin(Origin::Cli)
//!     .accept(OriginSet::ALL);
//!
//! let request = normalizer.request().unwrap();
//! assert_eq!(request.get("help"), Some(&Value::Bool(true)));
//! assert_eq!(
//!     request.get("delta"),
//!     Some(&Value::Many(vec![Value::from("1"), Value::from("2")]))
//! );
//! ```
//!
//! The normalized result is cached until [`RequestNormalizer::supply`] replaces the raw bag
//! or [`RequestNormalizer::clear`] discards it.
//!
//! `rebag` deliberately is *not* a command line framework: no sub-commands, no shell
//! completion, and no positional arguments.
//! The registry and normalizer are plain caller-owned values; they are meant to live for one
//! logical invocation (one process run, or one request) and are not synchronized for
//! concurrent mutation.
#![deny(missing_docs)]
mod constant;
mod help;
mod interface;
mod model;
mod registry;
mod request;

pub use help::HelpDoc;
pub use interface::{ConsoleInterface, UserInterface};
pub use model::*;
pub use registry::*;
pub use request::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
