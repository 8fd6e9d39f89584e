use std::collections::HashSet;

use hashbrown::HashMap;
use token::{Comment, CommentValue, Product, TokenTree};

use crate::error::ConfigError;
use crate::matcher::Matcher;

/// Injected into the present-word set whenever the token tree has no
/// products at all (empty or null input). The builtin "Hacker" matcher
/// requires this word, so empty input reaches a proposal through the
/// ordinary candidate-lookup path rather than a special case in the matcher
/// engine (§4.1, §4.7).
pub(crate) const EMPTY_INPUT_WORD: &str = "\u{0}empty-input";

/// Immutable catalog of compiled matchers, indexed by required literal word
/// for fast candidate lookup (§4.2). Built once via [`RuleStoreBuilder`] and
/// frozen; reads never synchronize.
#[derive(Debug)]
pub struct RuleStore {
    matchers: HashMap<u32, Matcher>,
    index: HashMap<String, Vec<u32>>,
}

impl RuleStore {
    /// Returns the superset of matchers that *might* fire against `tokens`:
    /// every required word of a returned matcher is present somewhere in the
    /// input. False positives are tolerated; the matcher engine decides.
    ///
    /// Implementation unions the postings lists of every word present in the
    /// input into a deduped candidate id set, then filters that union down
    /// to matchers whose full required-word set is satisfied.
    pub fn candidates(&self, tokens: &TokenTree) -> Vec<&Matcher> {
        let present = present_words(tokens);

        let mut candidate_ids: HashSet<u32> = HashSet::new();
        for word in &present {
            if let Some(list) = self.index.get(word) {
                candidate_ids.extend(list.iter().copied());
            }
        }

        candidate_ids
            .into_iter()
            .filter_map(|id| self.matchers.get(&id))
            .filter(|m| m.required_words.iter().all(|w| present.contains(w)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

/// Accumulates matchers and validates them at [`RuleStoreBuilder::build`].
/// Matcher ids and required-word lists are set by whatever compiled the
/// matchers (the out-of-scope rule loader, or `rules::builtin` in this
/// crate) — the builder only validates and indexes.
#[derive(Debug, Default)]
pub struct RuleStoreBuilder {
    matchers: Vec<Matcher>,
}

impl RuleStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, matcher: Matcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    pub fn build(self) -> Result<RuleStore, ConfigError> {
        let mut seen_ids = HashSet::new();
        for m in &self.matchers {
            if !seen_ids.insert(m.id) {
                return Err(ConfigError::DuplicateMatcherId(m.id));
            }
            if m.required_words.is_empty() {
                return Err(ConfigError::UnindexableMatcher(m.id));
            }
        }

        let mut index: HashMap<String, Vec<u32>> = HashMap::new();
        for m in &self.matchers {
            for word in &m.required_words {
                index.entry(word.to_lowercase()).or_default().push(m.id);
            }
        }
        for list in index.values_mut() {
            list.sort_unstable();
        }

        let matchers = self.matchers.into_iter().map(|m| (m.id, m)).collect();
        Ok(RuleStore { matchers, index })
    }
}

fn present_words(tokens: &TokenTree) -> HashSet<String> {
    let mut words = HashSet::new();
    if tokens.products.is_empty() {
        words.insert(EMPTY_INPUT_WORD.to_string());
        return words;
    }
    for product in &tokens.products {
        collect_product_words(product, &mut words);
    }
    words
}

fn collect_product_words(product: &Product, words: &mut HashSet<String>) {
    split_words(&product.name, words);
    if let Some(version) = &product.version {
        split_words(version, words);
    }
    for comment in &product.comments {
        match comment {
            Comment::Bare(text) => split_words(text, words),
            Comment::KeyValue { key, value } => {
                split_words(key, words);
                match value {
                    CommentValue::Text(text) => split_words(text, words),
                    CommentValue::Products(nested) => {
                        for p in nested {
                            collect_product_words(p, words);
                        }
                    }
                }
            }
        }
    }
}

fn split_words(text: &str, words: &mut HashSet<String>) {
    for word in text.split(|c: char| !c.is_alphanumeric()) {
        if !word.is_empty() {
            words.insert(word.to_lowercase());
        }
    }
}
