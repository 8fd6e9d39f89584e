//! A User-Agent and Client-Hints analyzer: tokenizer, rule-driven matcher
//! engine, field resolver and post-processor pipeline behind a bounded,
//! thread-safe parse cache.
//!
//! The hard parts — deterministic matching under ambiguity, ordered
//! post-processing with cross-field dependencies, and safe sharing of
//! immutable results across concurrent callers — live in the `ua-token`,
//! `ua-rules`, `ua-engine` and `ua-cache` crates this crate wires together.
//! Compiling external rule *source* (YAML or otherwise) into a [`RuleStore`]
//! is out of scope; [`AnalyzerBuilder`] defaults to [`rules::builtin`] when
//! none is supplied.
//!
//! ```
//! use uaparse::Analyzer;
//!
//! let analyzer = Analyzer::builder().build().expect("default rules are valid");
//! let result = analyzer.parse(Some(
//!     "Mozilla/5.0 (Windows; U; Windows NT 5.1; en-US; rv:1.8.1.11) Gecko/20071127 Firefox/2.0.0.11",
//! ));
//! assert_eq!(result.get("AgentName"), "Firefox");
//! assert_eq!(result.get("AgentVersion"), "2.0.0.11");
//!
//! let empty = analyzer.parse(Some(""));
//! assert_eq!(empty.get("AgentClass"), "Hacker");
//! ```
//!
//! ## Errors
//!
//! [`ConfigError`] surfaces from [`AnalyzerBuilder::build`] when the rule set
//! or post-processor pipeline is malformed (cyclic calculator dependencies,
//! duplicate matcher ids, unindexable matchers). `parse` itself is total: it
//! never fails for any string or `null` input, mapping unusual input to the
//! standard `"Hacker"`/`"Unknown"`/`"??"` sentinels instead (§7).

mod builder;
mod client_hints;
mod error;
mod result;

pub use builder::{Analyzer, AnalyzerBuilder, AnalyzerConfig, Initialization};
pub use client_hints::ClientHints;
pub use error::UsageError;
pub use result::ParseResult;
pub use rules::{ConfigError, Field, RuleStore, RuleStoreBuilder};
