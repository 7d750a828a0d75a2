use std::str::FromStr;

use indexmap::IndexMap;

use crate::constant::*;

/// A raw or normalized request value.
///
/// One closed sum covers both sides of normalization:
/// * A raw bag may contain any variant.
/// `Many` represents repeated occurrences of the same key.
/// * A normalized bag contains `Bool`, `Text`, or a flat `Many` of the other two;
/// `Absent` and `Bool(false)` survive only as the sentinels for "set without a value".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// The key was present with no observable value at all.
    Absent,
    /// A boolean value.
    /// `Bool(false)` is how a getopt-style splitter reports a key set as plain `-x`.
    Bool(bool),
    /// A scalar string value, possibly empty.
    Text(String),
    /// Repeated occurrences, in arrival order.
    Many(Vec<Value>),
}

impl Value {
    /// Whether this value is the falsy/absence case: `Absent`, `Bool(false)`, an empty
    /// `Text`, or an empty `Many`.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Absent => true,
            Value::Bool(value) => !value,
            Value::Text(value) => value.is_empty(),
            Value::Many(values) => values.is_empty(),
        }
    }

    /// The scalar text, if this value is `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The sequence, if this value is `Many`.
    pub fn as_many(&self) -> Option<&[Value]> {
        match self {
            Value::Many(values) => Some(values.as_slice()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Many(values)
    }
}

/// An ordered key to value(s) mapping.
/// Used for both the raw request and the normalized result; iteration follows insertion.
pub type Bag = IndexMap<String, Value>;

/// The channel a request arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// A process command line invocation.
    Cli,
    /// An HTTP GET request.
    Get,
    /// An HTTP POST request.
    Post,
    /// An HTTP PUT request.
    Put,
    /// An HTTP DELETE request.
    Delete,
    /// An HTTP PATCH request.
    Patch,
}

impl Origin {
    fn bit(&self) -> u8 {
        match self {
            Origin::Cli => 1,
            Origin::Post => 2,
            Origin::Get => 4,
            Origin::Put => 8,
            Origin::Delete => 16,
            Origin::Patch => 32,
        }
    }
}

/// A set of accepted [`Origin`]s.
///
/// An origin outside the accepted set does not error; fetching simply yields an empty bag.
///
/// ### Example
/// ```
/// use rebag::{Origin, OriginSet};
///
/// let accepted = Origin::Cli | Origin::Get;
/// assert!(accepted.contains(Origin::Cli));
/// assert!(!accepted.contains(Origin::Post));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginSet(u8);

impl OriginSet {
    /// The empty set.
    pub const NONE: OriginSet = OriginSet(0);
    /// Every origin.
    pub const ALL: OriginSet = OriginSet(63);

    /// Whether `origin` is in this set.
    pub fn contains(&self, origin: Origin) -> bool {
        self.0 & origin.bit() != 0
    }

    /// This set, extended with `origin`.
    pub fn with(self, origin: Origin) -> Self {
        OriginSet(self.0 | origin.bit())
    }
}

impl From<Origin> for OriginSet {
    fn from(origin: Origin) -> Self {
        OriginSet(origin.bit())
    }
}

impl std::ops::BitOr for Origin {
    type Output = OriginSet;

    fn bitor(self, rhs: Origin) -> OriginSet {
        OriginSet::from(self).with(rhs)
    }
}

impl std::ops::BitOr<Origin> for OriginSet {
    type Output = OriginSet;

    fn bitor(self, rhs: Origin) -> OriginSet {
        self.with(rhs)
    }
}

/// The recognized per-argument option kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    /// The argument carries a value.
    /// When unset, the argument is a presence flag and always normalizes to `true`.
    ValueExpected,
    /// The argument always normalizes to a sequence.
    /// Setting this without an explicit `ValueExpected` also sets `ValueExpected`.
    MultipleExpected,
    /// The resolved value must pass a gate before it is accepted.
    MustValidate,
}

impl std::fmt::Display for OptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let spelling = match self {
            OptionKey::ValueExpected => VALUE_EXPECTED,
            OptionKey::MultipleExpected => MULTIPLE_EXPECTED,
            OptionKey::MustValidate => MUST_VALIDATE,
        };
        write!(f, "{spelling}")
    }
}

impl FromStr for OptionKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            VALUE_EXPECTED => Ok(OptionKey::ValueExpected),
            MULTIPLE_EXPECTED => Ok(OptionKey::MultipleExpected),
            MUST_VALIDATE => Ok(OptionKey::MustValidate),
            _ => Err(value.to_string()),
        }
    }
}

/// The predicate form of a validation gate.
/// Invoked with the argument's short name and the resolved value; `false` rejects.
pub type Predicate = Box<dyn Fn(&str, &Value) -> bool>;

/// A value assigned to an [`OptionKey`] at declaration time.
///
/// `ValueExpected` and `MultipleExpected` only accept `Flag`; `MustValidate` accepts either
/// variant.
pub enum OptionValue {
    /// A plain boolean setting.
    Flag(bool),
    /// A validation predicate.
    Predicate(Predicate),
}

impl OptionValue {
    /// Wrap a validation predicate.
    ///
    /// ### Example
    /// ```
    /// use rebag::OptionValue;
    ///
    /// let non_empty = OptionValue::predicate(|_short, value| {
    ///     value.as_text().map(|text| !text.is_empty()).unwrap_or(true)
    /// });
    /// # drop(non_empty);
    /// ```
    pub fn predicate(predicate: impl Fn(&str, &Value) -> bool + 'static) -> Self {
        OptionValue::Predicate(Box::new(predicate))
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Flag(value)
    }
}

impl std::fmt::Debug for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Flag(value) => write!(f, "Flag({value})"),
            OptionValue::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

/// The stored form of a `MustValidate` assignment.
pub enum Validator {
    /// A fixed gate.
    /// `Enabled(false)` permanently disables the argument: any occurrence is rejected.
    Enabled(bool),
    /// A predicate gate over the resolved value.
    Predicate(Predicate),
}

impl Validator {
    pub(crate) fn accepts(&self, short_name: &str, value: &Value) -> bool {
        match self {
            Validator::Enabled(enabled) => *enabled,
            Validator::Predicate(predicate) => predicate(short_name, value),
        }
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Validator::Enabled(enabled) => write!(f, "Enabled({enabled})"),
            Validator::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}
