use thiserror::Error;

/// Construction-time failures. Raised by [`crate::RuleStoreBuilder::build`];
/// never reachable once a [`crate::RuleStore`] exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("duplicate matcher id {0}")]
    DuplicateMatcherId(u32),

    #[error("matcher {0} has no required words and cannot be indexed")]
    UnindexableMatcher(u32),

    #[error("post-processor calculators form a cycle: {0:?}")]
    CalculatorCycle(Vec<String>),

    #[error("duplicate calculator writes field {field} (calculators {first} and {second})")]
    DuplicateFieldWriter {
        field: String,
        first: String,
        second: String,
    },
}
