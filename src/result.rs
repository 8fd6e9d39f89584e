use std::collections::BTreeMap;
use std::sync::Arc;

use engine::FieldMap;
use rules::Field;

/// An immutable, shareable parse result (§3 "Result"). Safe to hand to many
/// threads; nothing about it changes after [`crate::Analyzer::parse`] returns
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    fields: FieldMap,
}

impl ParseResult {
    pub(crate) fn new(fields: FieldMap) -> Arc<Self> {
        Arc::new(Self { fields })
    }

    /// Returns `field`'s value, or `"Unknown"` if `field` does not name any
    /// entry in the closed catalog (§6 "Field-restricted parse").
    pub fn get(&self, field: &str) -> String {
        match field.parse::<Field>() {
            Ok(field) => self.fields.get(field).to_string(),
            Err(()) => "Unknown".to_string(),
        }
    }

    /// Projects the result down to `fields`; unknown names map to
    /// `"Unknown"` just as [`Self::get`] does.
    pub fn to_map(&self, fields: &[&str]) -> BTreeMap<String, String> {
        fields
            .iter()
            .map(|&name| (name.to_string(), self.get(name)))
            .collect()
    }

    /// The full field catalog in its documented, stable order (§6).
    pub fn all_field_names() -> &'static [&'static str] {
        static NAMES: std::sync::OnceLock<Vec<&'static str>> = std::sync::OnceLock::new();
        NAMES.get_or_init(|| Field::ALL.iter().map(|f| f.as_str()).collect())
    }

    /// Every field and its resolved value, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
        self.fields.iter().map(|(field, value)| (field.as_str(), value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_name_returns_unknown_sentinel() {
        let result = ParseResult::new(engine::resolve(&[]));
        assert_eq!(result.get("NoSuchField"), "Unknown");
    }

    #[test]
    fn all_field_names_matches_catalog_length() {
        assert_eq!(ParseResult::all_field_names().len(), Field::ALL.len());
    }
}
