use rules::Field;

use super::Calculator;
use crate::resolver::FieldMap;

const READS: &[Field] = &[Field::AgentLanguageCode];
const WRITES: &[Field] = &[Field::AgentLanguage];

/// A closed lookup table from IETF-ish language tags (as lower-cased by the
/// `ua-rules` language matcher) to a display name. Unknown tags leave
/// [`Field::AgentLanguage`] at its default sentinel.
const TABLE: &[(&str, &str)] = &[
    ("en-us", "English (United States)"),
    ("en-gb", "English (United Kingdom)"),
    ("de-de", "German (Germany)"),
    ("fr-fr", "French (France)"),
    ("ja-jp", "Japanese (Japan)"),
    ("nl-nl", "Dutch (Netherlands)"),
];

/// Expands [`Field::AgentLanguageCode`] into a human-readable
/// [`Field::AgentLanguage`] via a closed table (§4.5).
pub struct LanguageCalculator;

impl LanguageCalculator {
    pub fn boxed() -> Box<dyn Calculator> {
        Box::new(Self)
    }
}

impl Calculator for LanguageCalculator {
    fn name(&self) -> &'static str {
        "language-expansion"
    }

    fn reads(&self) -> &[Field] {
        READS
    }

    fn writes(&self) -> &[Field] {
        WRITES
    }

    fn apply(&self, fields: &mut FieldMap) {
        if fields.is_default(Field::AgentLanguageCode) {
            return;
        }
        let code = fields.get(Field::AgentLanguageCode).to_string();
        if let Some(&(_, display)) = TABLE.iter().find(|&&(tag, _)| tag == code) {
            fields.set(Field::AgentLanguage, display);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;

    #[test]
    fn expands_known_tag() {
        let mut fields = resolve(&[]);
        fields.set(Field::AgentLanguageCode, "en-us");
        LanguageCalculator.apply(&mut fields);
        assert_eq!(fields.get(Field::AgentLanguage), "English (United States)");
    }

    #[test]
    fn unknown_tag_leaves_default() {
        let mut fields = resolve(&[]);
        fields.set(Field::AgentLanguageCode, "xx-xx");
        LanguageCalculator.apply(&mut fields);
        assert_eq!(fields.get(Field::AgentLanguage), "Unknown");
    }
}
