//! Tokenizer for HTTP user-agent strings.
//!
//! Splits a raw user-agent string into a [`TokenTree`]: an ordered sequence of
//! [`Product`]s, each with an optional version and an ordered list of
//! [`Comment`]s drawn from a parenthesized group. The tokenizer is pure and
//! total — [`tokenize`] never fails, and malformed input (unbalanced quotes
//! or parens) degrades to a best-effort tree rather than an error.
//!
//! ```
//! use token::tokenize;
//!
//! let tree = tokenize("Mozilla/5.0 (Windows; U; Windows NT 5.1) Gecko/20071127 Firefox/2.0.0.11");
//! assert_eq!(tree.products.len(), 3);
//! assert_eq!(tree.products[0].name, "Mozilla");
//! assert_eq!(tree.products[0].version.as_deref(), Some("5.0"));
//! assert_eq!(tree.products[0].comments.len(), 3);
//! ```

mod position;
mod tokenizer;
mod tree;

pub use position::{Position, SubField};
pub use tokenizer::tokenize;
pub use tree::{Comment, CommentValue, Product, TokenTree};
