mod normalizer;
mod source;
mod tokens;

pub use normalizer::{RequestError, RequestNormalizer, ValidationRejected};
pub use source::{ArgsSource, RawSource, StaticSource};
pub use tokens::opt_specs;
