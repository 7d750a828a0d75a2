use thiserror::Error;

use crate::model::{Bag, Origin, OriginSet, Value};
use crate::registry::{ArgumentRegistry, UnknownArgument};
use crate::request::source::RawSource;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A validation gate rejected a resolved value during normalization.
///
/// Carries the argument's long name and declared doc text, so a host can surface a useful
/// message without further lookups.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("an invalid value was given for argument '{name}'. {doc}")]
pub struct ValidationRejected {
    /// The canonical long name of the rejected argument.
    pub name: String,
    /// The argument's declared doc text.
    pub doc: String,
}

/// An error raised while reading from the normalized request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The requested name is not declared.
    #[error(transparent)]
    UnknownArgument(#[from] UnknownArgument),

    /// Normalization failed on a validation gate.
    #[error(transparent)]
    ValidationRejected(#[from] ValidationRejected),
}

/// Transforms raw bags into normalized results under the registry's declared rules.
///
/// The normalized result is computed lazily on first read (pulling a raw bag from the
/// injected [`RawSource`]) and cached until [`RequestNormalizer::supply`] replaces it or
/// [`RequestNormalizer::clear`] discards it.
///
/// ### Example
/// ```
/// use rebag::{
///     Argument, ArgumentRegistry, Bag, Origin, RequestNormalizer, StaticSource, Value,
/// };
///
/// let mut registry = ArgumentRegistry::new();
/// registry.define(Argument::new("h").long("help")).unwrap();
///
/// let mut bag = Bag::default();
/// bag.insert("h".to_string(), Value::Bool(false));
/// let source = StaticSource::default().with(Origin::Get, bag);
///
/// let mut normalizer = RequestNormalizer::new(&registry, Box::new(source))
///     .origin(Origin::Get)
///     .accept(Origin::Cli | Origin::Get);
///
/// assert_eq!(
///     normalizer.get("help").unwrap(),
///     Some(&Value::Bool(true))
/// );
/// ```
pub struct RequestNormalizer<'r> {
    registry: &'r ArgumentRegistry,
    source: Box<dyn RawSource>,
    origin: Origin,
    accepted: OriginSet,
    request: Option<Bag>,
}

impl<'r> std::fmt::Debug for RequestNormalizer<'r> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestNormalizer")
            .field("origin", &self.origin)
            .field("accepted", &self.accepted)
            .field("request", &self.request)
            .finish()
    }
}

impl<'r> RequestNormalizer<'r> {
    /// Create a normalizer over the given registry and raw source.
    ///
    /// The active origin defaults to [`Origin::Cli`], as does the accepted set.
    pub fn new(registry: &'r ArgumentRegistry, source: Box<dyn RawSource>) -> Self {
        Self {
            registry,
            source,
            origin: Origin::Cli,
            accepted: OriginSet::from(Origin::Cli),
            request: None,
        }
    }

    /// Set the active origin.
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Set the accepted origins.
    /// Fetching while the active origin is outside this set yields an empty raw bag, not an
    /// error.
    pub fn accept(mut self, accepted: impl Into<OriginSet>) -> Self {
        self.accepted = accepted.into();
        self
    }

    /// Normalize and cache an externally supplied raw bag, replacing any cached result.
    ///
    /// On a validation failure nothing is cached; the previous result (if any) is
    /// discarded rather than kept stale.
    pub fn supply(&mut self, raw: Bag) -> Result<(), ValidationRejected> {
        self.request = None;
        self.request.replace(normalize(self.registry, raw)?);
        Ok(())
    }

    /// The normalized request.
    ///
    /// On first read with no cached result, pulls a raw bag from the source and normalizes
    /// it; subsequent reads return the cached result untouched.
    pub fn request(&mut self) -> Result<&Bag, ValidationRejected> {
        if self.request.is_none() {
            let raw = if self.accepted.contains(self.origin) {
                self.source.fetch(self.origin, self.registry)
            } else {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!(
                        "Origin {origin:?} is not accepted; using an empty raw bag.",
                        origin = self.origin
                    );
                }

                Bag::default()
            };
            self.request.replace(normalize(self.registry, raw)?);
        }

        Ok(self
            .request
            .as_ref()
            .expect("internal error - request must be cached"))
    }

    /// The normalized value for an argument, by either name form.
    ///
    /// `Ok(None)` when the argument is declared but absent from the request; looking up an
    /// undeclared name is an error.
    pub fn get(&mut self, which: &str) -> Result<Option<&Value>, RequestError> {
        let long_name = self
            .registry
            .to_long_name(which)
            .ok_or_else(|| UnknownArgument(which.to_string()))?
            .to_string();
        let request = self.request()?;
        Ok(request.get(&long_name))
    }

    /// Whether the argument is present in the normalized request.
    pub fn is_set(&mut self, which: &str) -> Result<bool, RequestError> {
        Ok(self.get(which)?.is_some())
    }

    /// Whether the argument's normalized value is missing or falsy, by either name form.
    ///
    /// Follows the falsy rules of [`Value::is_falsy`]; an argument declared but absent from
    /// the request counts as empty.
    pub fn is_falsy(&mut self, which: &str) -> Result<bool, RequestError> {
        Ok(self.get(which)?.map(Value::is_falsy).unwrap_or(true))
    }

    /// Whether the normalized request holds no values at all.
    /// Useful for printing help on an empty invocation.
    pub fn is_empty(&mut self) -> Result<bool, ValidationRejected> {
        Ok(self.request()?.is_empty())
    }

    /// Discard the cached result; the next read fetches and normalizes afresh.
    pub fn clear(&mut self) {
        self.request = None;
    }
}

// The normalization algorithm, per raw key/value pair:
// 1. resolve the key through the registry; unresolvable keys are dropped.
// 2. presence-flag coercion for arguments without value semantics.
// 3. multiplicity resolution: collapse or wrap, with Absent/Bool(false) as scalar
//    sentinels that never wrap.
// 4. validation gate; the first rejection aborts with no partial result.
// 5. store under the canonical long name, in raw-bag iteration order.
pub(crate) fn normalize(
    registry: &ArgumentRegistry,
    raw: Bag,
) -> Result<Bag, ValidationRejected> {
    let mut normalized = Bag::default();

    for (key, value) in raw {
        let Some(short_name) = registry.to_short_name(&key) else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Dropping undeclared key '{key}'.");
            }

            continue;
        };
        let spec = registry
            .get(short_name)
            .expect("internal error - resolved short name must be declared");
        let options = spec.options();

        let value = if options.value_expected() {
            value
        } else {
            // Without value semantics, presence always signals `true`; a repeated flag
            // signals `true` once per occurrence.
            match value {
                Value::Many(values) => Value::Many(vec![Value::Bool(true); values.len()]),
                _ => Value::Bool(true),
            }
        };

        let value = match (value, options.multiple_expected()) {
            // Last occurrence wins; a drained sequence leaves the no-value sentinel.
            (Value::Many(mut values), false) => values.pop().unwrap_or(Value::Bool(false)),
            (Value::Many(values), true) => Value::Many(values),
            // Absent/false are semantically "set without a value", not one falsy item.
            (value @ (Value::Absent | Value::Bool(false)), _) => value,
            (value, true) => Value::Many(vec![value]),
            (value, false) => value,
        };

        if let Some(validator) = options.validate() {
            if !validator.accepts(short_name, &value) {
                return Err(ValidationRejected {
                    name: spec.long_name().to_string(),
                    doc: spec.doc().to_string(),
                });
            }
        }

        normalized.insert(spec.long_name().to_string(), value);
    }

    Ok(normalized)
}
