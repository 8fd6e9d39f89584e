use serde::{Deserialize, Serialize};

use crate::position::{Position, SubField};

/// The output of [`tokenize`](crate::tokenize): an ordered sequence of products.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenTree {
    pub products: Vec<Product>,
}

/// A `name[/version]` head optionally followed by a parenthesized comment group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub version: Option<String>,
    pub comments: Vec<Comment>,
}

/// One entry of a product's parenthesized, `;`-separated comment group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Comment {
    /// Free text with no `=`/`:` separator, e.g. `Windows NT 5.1` or `like Gecko`.
    Bare(String),
    /// A `key=value` or `key:value` entry, e.g. `rv:1.8.1.11`.
    KeyValue { key: String, value: CommentValue },
}

/// The value half of a [`Comment::KeyValue`]. Usually plain text, but some
/// headers nest a further product sequence as the value (e.g.
/// `.NET CLR 3.5.30729` style compatibility tokens).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommentValue {
    Text(String),
    Products(Vec<Product>),
}

impl TokenTree {
    /// Resolves a matcher's `(position, sub_field)` address to the referenced
    /// text, or `None` if the position is out of range. Matchers treat `None`
    /// as a failed predicate rather than an error — see `ua-rules`.
    pub fn resolve(&self, pos: &Position, field: SubField) -> Option<&str> {
        let product = self.products.get(pos.product)?;
        match (field, pos.comment) {
            (SubField::Name, _) => Some(product.name.as_str()),
            (SubField::Version, _) => product.version.as_deref(),
            (SubField::Bare, Some(c)) => match product.comments.get(c)? {
                Comment::Bare(text) => Some(text.as_str()),
                Comment::KeyValue { .. } => None,
            },
            (SubField::Key, Some(c)) => match product.comments.get(c)? {
                Comment::KeyValue { key, .. } => Some(key.as_str()),
                Comment::Bare(_) => None,
            },
            (SubField::Value, Some(c)) => match product.comments.get(c)? {
                Comment::KeyValue {
                    value: CommentValue::Text(text),
                    ..
                } => Some(text.as_str()),
                _ => None,
            },
            (SubField::Bare | SubField::Key | SubField::Value, None) => None,
        }
    }
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            comments: Vec::new(),
        }
    }
}
