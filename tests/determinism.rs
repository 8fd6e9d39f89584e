use uaparse::Analyzer;

#[test]
fn repeated_parses_of_the_same_input_agree() {
    let analyzer = Analyzer::builder().build().expect("default rules are valid");
    let ua = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/100.0.4896.127 Safari/537.36";

    let first = analyzer.parse(Some(ua));
    let second = analyzer.parse(Some(ua));

    assert_eq!(first.get("AgentName"), second.get("AgentName"));
    assert_eq!(first.get("AgentVersion"), second.get("AgentVersion"));
    assert_eq!(first.get("OperatingSystemName"), second.get("OperatingSystemName"));
}

#[test]
fn clearing_the_cache_does_not_change_the_result() {
    let analyzer = Analyzer::builder().build().expect("default rules are valid");
    let ua = "Mozilla/5.0 Firefox/2.0";

    let before = analyzer.parse(Some(ua));
    analyzer.clear_cache();
    let after = analyzer.parse(Some(ua));

    assert_eq!(before.get("AgentName"), after.get("AgentName"));
    assert_eq!(before.get("AgentVersion"), after.get("AgentVersion"));
}
