use hashbrown::HashMap;
use rules::{Find, FindTarget, Locator, Matcher, Predicate, ValueExpr};
use token::{Comment, CommentValue, TokenTree};

use crate::proposal::Proposal;

/// Evaluates a single candidate matcher against `tokens` (§4.3). Walks the
/// matcher's `finds` in order, short-circuiting on the first failed step;
/// only on full success are `extracts` resolved into [`Proposal`]s.
pub fn evaluate(matcher: &Matcher, tokens: &TokenTree) -> Vec<Proposal> {
    let mut bindings: HashMap<&str, String> = HashMap::new();

    for step in &matcher.finds {
        match resolve_find(step, tokens, &bindings) {
            Some(text) => {
                bindings.insert(step.name.as_str(), text);
            }
            None => {
                tracing::trace!(matcher_id = matcher.id, step = step.name.as_str(), "find failed");
                return Vec::new();
            }
        }
    }

    let proposals: Vec<Proposal> = matcher
        .extracts
        .iter()
        .filter_map(|extract| {
            resolve_value(&extract.value, &bindings)
                .map(|value| Proposal::new(extract.field, value, extract.confidence, matcher.id))
        })
        .collect();
    tracing::trace!(matcher_id = matcher.id, proposals = proposals.len(), "matcher matched");
    proposals
}

fn resolve_find(step: &Find, tokens: &TokenTree, _bindings: &HashMap<&str, String>) -> Option<String> {
    let product_idx = match &step.locator {
        Locator::Fixed(idx) => *idx,
        Locator::ByName(name) => tokens
            .products
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))?,
    };
    let product = tokens.products.get(product_idx)?;

    match &step.target {
        FindTarget::Name(predicate) => {
            predicate.matches(&product.name).then(|| product.name.clone())
        }
        FindTarget::Version(predicate) => {
            let version = product.version.as_deref()?;
            predicate.matches(version).then(|| version.to_string())
        }
        FindTarget::BareComment(predicate) => product.comments.iter().find_map(|c| match c {
            Comment::Bare(text) if predicate.matches(text) => Some(text.clone()),
            _ => None,
        }),
        FindTarget::KeyValueComment { key, predicate } => {
            product.comments.iter().find_map(|c| match c {
                Comment::KeyValue {
                    key: k,
                    value: CommentValue::Text(text),
                } if k.eq_ignore_ascii_case(key) && predicate.matches(text) => Some(text.clone()),
                _ => None,
            })
        }
    }
}

fn resolve_value(expr: &ValueExpr, bindings: &HashMap<&str, String>) -> Option<String> {
    match expr {
        ValueExpr::Literal(text) => Some(text.clone()),
        ValueExpr::Binding(name) => bindings.get(name.as_str()).cloned(),
        ValueExpr::Concat(parts) => {
            let mut out = String::new();
            for part in parts {
                out.push_str(&resolve_value(part, bindings)?);
            }
            Some(out)
        }
        ValueExpr::Lowercase(inner) => resolve_value(inner, bindings).map(|s| s.to_lowercase()),
    }
}
