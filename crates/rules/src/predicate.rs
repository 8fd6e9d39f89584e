use regex::Regex;

/// A single test applied to the text found at a matcher's locator. Matchers
/// are compiled (never hand-built from untrusted rule source inside this
/// crate — that is the out-of-scope rule-set loader's job), so a `Regex`
/// predicate is expected to already be a validated pattern.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Always true; used to capture a value without constraining it.
    Any,
    Equals(String),
    StartsWith(String),
    Contains(String),
    Regex(Regex),
    /// Parses the candidate text as an `i64` and checks it falls in `[min, max]`.
    /// A candidate that fails to parse as an integer is simply false, matching
    /// the "index out of range is simply false" error policy of §4.3.
    Range { min: i64, max: i64 },
}

impl Predicate {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Predicate::Any => true,
            Predicate::Equals(expected) => text == expected,
            Predicate::StartsWith(prefix) => text.starts_with(prefix.as_str()),
            Predicate::Contains(needle) => text.contains(needle.as_str()),
            Predicate::Regex(re) => re.is_match(text),
            Predicate::Range { min, max } => text
                .parse::<i64>()
                .map(|n| n >= *min && n <= *max)
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equals_is_exact() {
        assert!(Predicate::Equals("Firefox".into()).matches("Firefox"));
        assert!(!Predicate::Equals("Firefox".into()).matches("firefox"));
    }

    #[test]
    fn range_rejects_non_numeric_text_instead_of_failing() {
        assert!(!Predicate::Range { min: 0, max: 10 }.matches("abc"));
        assert!(Predicate::Range { min: 0, max: 10 }.matches("5"));
    }

    #[test]
    fn regex_matches_substring_by_default() {
        let pred = Predicate::Regex(Regex::new(r"^\d+\.\d+$").unwrap());
        assert!(pred.matches("5.13"));
        assert!(!pred.matches("5.13.0"));
    }
}
