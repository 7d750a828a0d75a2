use indexmap::map::Entry;

use crate::constant::VALUE_MARKER;
use crate::model::{Bag, Value};
use crate::registry::ArgumentRegistry;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Build getopt-style option spec strings from the declared arguments.
///
/// Returns the concatenated short spec and the list of long specs.
/// Arguments whose resolved options carry a value or a validation gate are marked with the
/// optional-value suffix `::`.
/// The marker keys off the *resolved* behavior, so an argument declared with an explicit
/// `ValueExpected = false` (and no gate) goes unmarked.
///
/// This exists for hosts that hand tokenization to an external getopt implementation;
/// [`crate::ArgsSource`] uses the built-in splitter instead.
pub fn opt_specs(registry: &ArgumentRegistry) -> (String, Vec<String>) {
    let mut short_specs = String::default();
    let mut long_specs = Vec::default();

    for spec in registry.specs() {
        let marker = if spec.options().value_expected() || spec.options().validate().is_some() {
            VALUE_MARKER
        } else {
            ""
        };
        short_specs.push_str(&format!("{}{marker}", spec.short_name()));
        long_specs.push(format!("{}{marker}", spec.long_name()));
    }

    (short_specs, long_specs)
}

// Split command line tokens into a raw bag.
//
// Only dashed tokens naming a declared argument contribute; everything else is skipped.
// A value attaches via the `=` form exclusively (`-x=v`, `--xy=v`); a dashed token without
// one reports `Bool(false)`, exactly as a getopt optional-value parse would.
// Repeats accumulate into `Many`, and a bare `--` ends option scanning.
//
// Keys are stored as they appeared (dashes stripped), so the same argument given as `-d`
// and `--delta` occupies two entries; normalization resolves both to the long name, with
// the later entry winning.
pub(crate) fn split(tokens: &[&str], registry: &ArgumentRegistry) -> Bag {
    let mut bag = Bag::default();

    for token in tokens {
        if *token == "--" {
            break;
        }

        if !token.starts_with('-') {
            continue;
        }

        let (name, value) = match token.split_once('=') {
            Some((name, value)) => (name, Value::from(value)),
            None => (*token, Value::Bool(false)),
        };

        let Some(key) = resolve_key(name, registry) else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Skipping unrecognized token '{token}'.");
            }

            continue;
        };

        match bag.entry(key) {
            Entry::Occupied(mut occupied) => match occupied.get_mut() {
                Value::Many(values) => {
                    values.push(value);
                }
                existing => {
                    let previous = std::mem::replace(existing, Value::Absent);
                    *existing = Value::Many(vec![previous, value]);
                }
            },
            Entry::Vacant(vacant) => {
                vacant.insert(value);
            }
        }
    }

    bag
}

// The bag key for a dashed name: the name as it appeared, dashes stripped.
fn resolve_key(name: &str, registry: &ArgumentRegistry) -> Option<String> {
    registry.to_short_name(name)?;
    let stripped = name.trim_start_matches('-');
    Some(stripped.to_string())
}
