use serde::{Deserialize, Serialize};

/// Addresses a single comment (or the product head) inside a [`TokenTree`](crate::TokenTree).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Position {
    pub product: usize,
    pub comment: Option<usize>,
}

impl Position {
    pub fn product(product: usize) -> Self {
        Self {
            product,
            comment: None,
        }
    }

    pub fn comment(product: usize, comment: usize) -> Self {
        Self {
            product,
            comment: Some(comment),
        }
    }
}

/// Which piece of text at a [`Position`] a predicate or extract clause reads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SubField {
    /// A product's name, e.g. `Firefox`.
    Name,
    /// A product's version, e.g. `2.0.0.11`.
    Version,
    /// A bare comment entry's text.
    Bare,
    /// A `key=value` comment entry's key.
    Key,
    /// A `key=value` comment entry's value (text form only).
    Value,
}
