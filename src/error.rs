use thiserror::Error;

/// Use-time failures: calling the analyzer in a way that is a programmer
/// error rather than bad input (§7). Never raised on the `parse` path itself
/// — `parse` is total over string/null input and returns a bare [`crate::ParseResult`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UsageError {
    #[error("cache size must be non-negative, got {0}")]
    NegativeCacheSize(i64),

    #[error("withFields named an unknown field: {0}")]
    UnknownRestrictedField(String),
}
