//! A small, embedded default rule set.
//!
//! Compiling rule *source* (YAML or otherwise) into [`Matcher`] values is the
//! out-of-scope rule-set loader's job (§1). This module plays that loader's
//! role for a handful of well-known user agents so the crate is useful and
//! testable standalone, without pulling in a YAML parser the core has no
//! business depending on.

use crate::field::Field;
use crate::matcher::{FindTarget, Locator, Matcher, ValueExpr};
use crate::predicate::Predicate;
use crate::store::{RuleStoreBuilder, EMPTY_INPUT_WORD};

/// A rule-store builder pre-populated with matchers for classic Firefox- and
/// Chrome-style user agents, plus the empty/null "Hacker" fallback. Load
/// order (and therefore tie-break order, §9) is the order matchers are added
/// below.
pub fn builtin() -> RuleStoreBuilder {
    let mut id = 0u32;
    let mut next_id = || {
        let current = id;
        id += 1;
        current
    };

    RuleStoreBuilder::new()
        .add(hacker_matcher(next_id()))
        .add(windows_nt_5_1_matcher(next_id()))
        .add(gecko_matcher(next_id()))
        .add(firefox_matcher(next_id()))
        .add(security_token_matcher(next_id(), "U", Field::AgentSecurity, "U"))
        .add(security_token_matcher(next_id(), "I", Field::AgentSecurity, "I"))
        .add(security_token_matcher(next_id(), "N", Field::AgentSecurity, "N"))
        .add(language_tag_matcher(next_id()))
        .add(x11_linux_x86_64_matcher(next_id()))
        .add(chrome_matcher(next_id()))
        .add(safari_matcher(next_id()))
}

/// Empty/null input: no products at all, only the synthetic empty-input word.
fn hacker_matcher(id: u32) -> Matcher {
    Matcher::new(id, vec![EMPTY_INPUT_WORD.to_string()])
        .extract(Field::AgentClass, 1, ValueExpr::Literal("Hacker".into()))
        .extract(Field::AgentName, 1, ValueExpr::Literal("Hacker".into()))
        .extract(Field::DeviceClass, 1, ValueExpr::Literal("Hacker".into()))
}

/// The classic `Windows NT 5.1` comment, pinned to the leading `Mozilla/5.0`
/// product (position 0), which every standard-form browser UA carries.
fn windows_nt_5_1_matcher(id: u32) -> Matcher {
    Matcher::new(id, vec!["windows".into(), "nt".into()])
        .find(
            "os",
            Locator::Fixed(0),
            FindTarget::BareComment(Predicate::Equals("Windows NT 5.1".into())),
        )
        .extract(
            Field::OperatingSystemName,
            20,
            ValueExpr::Literal("Windows NT".into()),
        )
        .extract(Field::OperatingSystemVersion, 20, ValueExpr::Literal("XP".into()))
        .extract(Field::DeviceClass, 20, ValueExpr::Literal("Desktop".into()))
}

/// `rv:<version>` lives on product 0's comment list; the Gecko *product*
/// itself usually carries a build-stamp version (e.g. `20071127`), which the
/// layout-engine version field does not want.
fn gecko_matcher(id: u32) -> Matcher {
    Matcher::new(id, vec!["gecko".into(), "rv".into()])
        .find(
            "gecko_product",
            Locator::ByName("Gecko".into()),
            FindTarget::Name(Predicate::Equals("Gecko".into())),
        )
        .find(
            "rv",
            Locator::Fixed(0),
            FindTarget::KeyValueComment {
                key: "rv".into(),
                predicate: Predicate::Any,
            },
        )
        .extract(Field::LayoutEngineName, 20, ValueExpr::Literal("Gecko".into()))
        .extract(Field::LayoutEngineVersion, 20, ValueExpr::Binding("rv".into()))
}

fn firefox_matcher(id: u32) -> Matcher {
    Matcher::new(id, vec!["firefox".into()])
        .find(
            "name",
            Locator::ByName("Firefox".into()),
            FindTarget::Name(Predicate::Equals("Firefox".into())),
        )
        .find(
            "version",
            Locator::ByName("Firefox".into()),
            FindTarget::Version(Predicate::Any),
        )
        .extract(Field::AgentName, 20, ValueExpr::Binding("name".into()))
        .extract(Field::AgentVersion, 20, ValueExpr::Binding("version".into()))
}

/// `U`/`I`/`N` security tokens recognized at token level (§4.1) and matched
/// here as a plain bare-comment equality on product 0.
fn security_token_matcher(id: u32, token: &str, field: Field, raw_code: &str) -> Matcher {
    Matcher::new(id, vec![token.to_lowercase()])
        .find(
            "code",
            Locator::Fixed(0),
            FindTarget::BareComment(Predicate::Equals(token.into())),
        )
        .extract(field, 10, ValueExpr::Literal(raw_code.into()))
}

/// `en-US`-shaped bare comments on product 0.
fn language_tag_matcher(id: u32) -> Matcher {
    Matcher::new(id, vec!["en".into()])
        .find(
            "lang",
            Locator::Fixed(0),
            FindTarget::BareComment(Predicate::Regex(
                regex::Regex::new(r"^[a-zA-Z]{2}-[a-zA-Z]{2}$").expect("static pattern"),
            )),
        )
        .extract(
            Field::AgentLanguageCode,
            10,
            ValueExpr::Lowercase(Box::new(ValueExpr::Binding("lang".into()))),
        )
}

/// `(X11; Linux x86_64)`-style desktop Linux comment block, used as the
/// plain-UA fallback that Client-Hints headers override when present.
fn x11_linux_x86_64_matcher(id: u32) -> Matcher {
    Matcher::new(id, vec!["x11".into(), "linux".into()])
        .find(
            "x11",
            Locator::Fixed(0),
            FindTarget::BareComment(Predicate::Equals("X11".into())),
        )
        .find(
            "linux_arch",
            Locator::Fixed(0),
            FindTarget::BareComment(Predicate::Equals("Linux x86_64".into())),
        )
        .extract(Field::DeviceClass, 5, ValueExpr::Literal("Desktop".into()))
        .extract(
            Field::OperatingSystemName,
            5,
            ValueExpr::Literal("Linux".into()),
        )
        .extract(Field::DeviceCpu, 5, ValueExpr::Literal("Intel x86_64".into()))
}

fn chrome_matcher(id: u32) -> Matcher {
    Matcher::new(id, vec!["chrome".into()])
        .find(
            "name",
            Locator::ByName("Chrome".into()),
            FindTarget::Name(Predicate::Equals("Chrome".into())),
        )
        .find(
            "version",
            Locator::ByName("Chrome".into()),
            FindTarget::Version(Predicate::Any),
        )
        .extract(Field::AgentName, 20, ValueExpr::Binding("name".into()))
        .extract(Field::AgentVersion, 20, ValueExpr::Binding("version".into()))
}

fn safari_matcher(id: u32) -> Matcher {
    Matcher::new(id, vec!["safari".into()])
        .find(
            "name",
            Locator::ByName("Safari".into()),
            FindTarget::Name(Predicate::Equals("Safari".into())),
        )
        .find(
            "version",
            Locator::ByName("Safari".into()),
            FindTarget::Version(Predicate::Any),
        )
        .extract(Field::AgentName, 15, ValueExpr::Binding("name".into()))
        .extract(Field::AgentVersion, 15, ValueExpr::Binding("version".into()))
}
