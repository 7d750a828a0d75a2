// Canonical option-key spellings.
// These are the strings accepted by the batch configuration path and produced by Display.
pub(crate) const VALUE_EXPECTED: &str = "VALUE_EXPECTED";
pub(crate) const MULTIPLE_EXPECTED: &str = "MULTIPLE_EXPECTED";
pub(crate) const MUST_VALIDATE: &str = "MUST_VALIDATE";

// Suffix marking an option as value-carrying in a getopt spec string.
pub(crate) const VALUE_MARKER: &str = "::";
