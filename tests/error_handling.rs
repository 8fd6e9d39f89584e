use uaparse::{Analyzer, UsageError};

#[test]
fn unknown_restricted_field_name_is_a_usage_error() {
    let result = Analyzer::builder().with_fields(&["AgentName", "NotAField"]);
    assert_eq!(
        result.unwrap_err(),
        UsageError::UnknownRestrictedField("NotAField".to_string())
    );
}

#[test]
fn parse_never_fails_on_garbage_input() {
    let analyzer = Analyzer::builder().build().expect("default rules are valid");

    for ua in ["", "\u{0}\u{0}\u{0}", "not a user agent at all", "Mozilla/5.0"] {
        let result = analyzer.parse(Some(ua));
        assert!(!result.get("AgentClass").is_empty());
    }
}

#[test]
fn unrecognized_field_name_resolves_to_the_unknown_sentinel() {
    let analyzer = Analyzer::builder().build().expect("default rules are valid");
    let result = analyzer.parse(Some("Mozilla/5.0 Firefox/2.0"));
    assert_eq!(result.get("ThisFieldDoesNotExist"), "Unknown");
}
