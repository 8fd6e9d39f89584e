use crate::tree::{Comment, CommentValue, Product, TokenTree};

/// Maximum recursion depth when a comment value is parsed as a nested
/// product sequence. Real user agents never nest this deep; the guard exists
/// so that adversarial input cannot recurse without bound while keeping the
/// tokenizer total.
const MAX_NEST_DEPTH: u32 = 4;

/// Splits a raw user-agent string into a [`TokenTree`].
///
/// Pure and total: every input, including the empty string, produces a
/// (possibly empty) tree. Unbalanced parentheses or quotes are closed
/// defensively at end of input rather than treated as an error.
pub fn tokenize(raw: &str) -> TokenTree {
    TokenTree {
        products: parse_products(raw, 0),
    }
}

enum Segment<'a> {
    Word(&'a str),
    Group(&'a str),
}

/// Splits `s` into top-level whitespace-separated words and parenthesized
/// groups, respecting quoted spans and nested parens.
fn segments(s: &str) -> Vec<Segment<'_>> {
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if c == '(' {
            let start = i + 1;
            let end = matching_paren(s, i).unwrap_or(s.len());
            out.push(Segment::Group(&s[start..end.min(s.len())]));
            i = end + 1;
            continue;
        }
        if c == '"' || c == '\'' {
            let start = i + 1;
            let end = find_char(s, start, c).unwrap_or(s.len());
            out.push(Segment::Word(&s[start..end]));
            i = if end < s.len() { end + 1 } else { end };
            continue;
        }
        let start = i;
        let mut j = i;
        while j < bytes.len() {
            let cj = bytes[j] as char;
            if cj.is_whitespace() || cj == '(' {
                break;
            }
            j += 1;
        }
        out.push(Segment::Word(&s[start..j]));
        i = j;
    }
    out
}

/// Finds the byte offset of the `)` matching the `(` at `open_idx`, tracking
/// nested parens and quoted spans. Returns `None` if unbalanced.
fn matching_paren(s: &str, open_idx: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth = 0i32;
    let mut i = open_idx;
    let mut in_quote: Option<char> = None;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if let Some(q) = in_quote {
            if c == q {
                in_quote = None;
            }
            i += 1;
            continue;
        }
        match c {
            '"' | '\'' => in_quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn find_char(s: &str, from: usize, target: char) -> Option<usize> {
    s[from..].find(target).map(|off| from + off)
}

/// Finds the first top-level occurrence of any of `targets`, skipping
/// anything inside nested parens or quotes.
fn find_top_level(s: &str, targets: &[char]) -> Option<usize> {
    let mut depth = 0i32;
    let mut in_quote: Option<char> = None;
    for (idx, c) in s.char_indices() {
        if let Some(q) = in_quote {
            if c == q {
                in_quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => in_quote = Some(c),
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && targets.contains(&c) => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Splits `s` on top-level occurrences of `sep`, skipping nested parens/quotes.
fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut depth = 0i32;
    let mut in_quote: Option<char> = None;
    for (idx, c) in s.char_indices() {
        if let Some(q) = in_quote {
            if c == q {
                in_quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => in_quote = Some(c),
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && c == sep => {
                out.push(&s[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    out.push(&s[start..]);
    out
}

fn parse_products(s: &str, depth: u32) -> Vec<Product> {
    let mut products: Vec<Product> = Vec::new();
    for seg in segments(s) {
        match seg {
            Segment::Word(word) => {
                if word.is_empty() {
                    continue;
                }
                let (name, version) = match word.split_once('/') {
                    Some((n, v)) => (n.to_string(), Some(v.to_string())),
                    None => (word.to_string(), None),
                };
                products.push(Product {
                    name,
                    version,
                    comments: Vec::new(),
                });
            }
            Segment::Group(inner) => {
                let comments = parse_comments(inner, depth);
                match products.last_mut() {
                    Some(p) => p.comments.extend(comments),
                    None => {
                        // A comment group with no preceding product head; attach it
                        // to a synthetic empty-name product so positions stay addressable.
                        products.push(Product {
                            name: String::new(),
                            version: None,
                            comments,
                        });
                    }
                }
            }
        }
    }
    products
}

fn parse_comments(s: &str, depth: u32) -> Vec<Comment> {
    split_top_level(s, ';')
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_comment_item(item, depth))
        .collect()
}

fn parse_comment_item(item: &str, depth: u32) -> Comment {
    match find_top_level(item, &['=', ':']) {
        Some(sep_idx) => {
            let key = item[..sep_idx].trim().to_string();
            let sep_len = item[sep_idx..].chars().next().map_or(1, char::len_utf8);
            let value_text = item[sep_idx + sep_len..].trim();
            Comment::KeyValue {
                key,
                value: parse_comment_value(value_text, depth),
            }
        }
        None => Comment::Bare(item.to_string()),
    }
}

/// A comment value is parsed as a nested product sequence only when it looks
/// like one (contains `/` and whitespace) and the nesting guard allows it;
/// otherwise it is kept as plain text.
fn parse_comment_value(value: &str, depth: u32) -> CommentValue {
    if depth < MAX_NEST_DEPTH && value.contains('/') && value.contains(char::is_whitespace) {
        let nested = parse_products(value, depth + 1);
        if nested.len() > 1 {
            return CommentValue::Products(nested);
        }
    }
    CommentValue::Text(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Comment, CommentValue};

    #[test]
    fn empty_input_yields_empty_tree() {
        let tree = tokenize("");
        assert!(tree.products.is_empty());
    }

    #[test]
    fn whitespace_only_yields_empty_tree() {
        let tree = tokenize("   \t  ");
        assert!(tree.products.is_empty());
    }

    #[test]
    fn product_with_version_and_comments() {
        let tree = tokenize(
            "Mozilla/5.0 (Windows; U; Windows NT 5.1; en-US; rv:1.8.1.11) Gecko/20071127 Firefox/2.0.0.11",
        );
        assert_eq!(tree.products.len(), 3);

        let mozilla = &tree.products[0];
        assert_eq!(mozilla.name, "Mozilla");
        assert_eq!(mozilla.version.as_deref(), Some("5.0"));
        assert_eq!(mozilla.comments.len(), 5);
        assert_eq!(mozilla.comments[0], Comment::Bare("Windows".into()));
        assert_eq!(mozilla.comments[1], Comment::Bare("U".into()));
        assert_eq!(
            mozilla.comments[4],
            Comment::KeyValue {
                key: "rv".into(),
                value: CommentValue::Text("1.8.1.11".into()),
            }
        );

        let firefox = &tree.products[2];
        assert_eq!(firefox.name, "Firefox");
        assert_eq!(firefox.version.as_deref(), Some("2.0.0.11"));
    }

    #[test]
    fn unbalanced_paren_closes_defensively() {
        let tree = tokenize("Mozilla/5.0 (Windows; U");
        assert_eq!(tree.products.len(), 1);
        assert_eq!(tree.products[0].comments.len(), 2);
    }

    #[test]
    fn quoted_span_kept_as_one_word() {
        let tree = tokenize("App/1.0 \"hello world\"");
        assert_eq!(tree.products.len(), 2);
        assert_eq!(tree.products[1].name, "hello world");
    }

    #[test]
    fn comment_group_with_no_preceding_product_is_best_effort() {
        let tree = tokenize("(just a comment)");
        assert_eq!(tree.products.len(), 1);
        assert_eq!(tree.products[0].name, "");
        assert_eq!(tree.products[0].comments.len(), 1);
    }
}
