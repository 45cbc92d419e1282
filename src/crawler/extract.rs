//! Field extraction helpers
//!
//! Pure functions shared by the resolver and the product scraper. A
//! selector that is absent, or present without a match, yields `None`;
//! only malformed selectors are errors.

use crate::crawler::markup::{MarkupError, MarkupQuery};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// First `digits[.digits]` token in the text
static PRICE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("price pattern is valid"));

/// Collapses whitespace runs to single spaces and trims the ends
///
/// Returns `None` when nothing but whitespace remains.
pub fn normalize_text(value: &str) -> Option<String> {
    let text = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parses the first decimal number out of a raw price string
///
/// A comma between two digits is a thousands separator and is dropped, so
/// `"$12,345.67 USD"` reads as `12345.67`. Any other comma becomes a space.
/// Spaces in the text always end a number. Never fails: text without a
/// number gives `None`.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned = strip_grouping_commas(text);
    PRICE_TOKEN.find(&cleaned)?.as_str().parse::<f64>().ok()
}

fn strip_grouping_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut cleaned = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if c != ',' {
            cleaned.push(c);
            continue;
        }
        let between_digits = i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(|next| next.is_ascii_digit());
        if !between_digits {
            cleaned.push(' ');
        }
    }

    cleaned
}

/// Normalized text of the first node matching `selector`
pub fn extract_text<D: MarkupQuery>(
    doc: &D,
    selector: Option<&str>,
) -> Result<Option<String>, MarkupError> {
    let Some(selector) = selector else {
        return Ok(None);
    };

    Ok(doc
        .select_one(selector)?
        .and_then(|node| normalize_text(&doc.text(node))))
}

/// Attribute of the first node matching `selector`, resolved against `base_url`
pub fn extract_url_attr<D: MarkupQuery>(
    doc: &D,
    selector: Option<&str>,
    attribute: &str,
    base_url: &Url,
) -> Result<Option<String>, MarkupError> {
    let Some(selector) = selector else {
        return Ok(None);
    };

    Ok(doc
        .select_one(selector)?
        .and_then(|node| doc.attr(node, attribute))
        .and_then(|raw| resolve_link(raw, base_url))
        .map(|url| url.to_string()))
}

/// Every link target found via `selector`/`attribute`, as absolute URLs
///
/// Nodes without the attribute, or with a value that cannot be joined to
/// `base_url`, are skipped. Duplicates are kept; callers dedupe.
pub fn extract_links<D: MarkupQuery>(
    doc: &D,
    selector: &str,
    attribute: &str,
    base_url: &Url,
) -> Result<Vec<Url>, MarkupError> {
    Ok(doc
        .select_all(selector)?
        .into_iter()
        .filter_map(|node| doc.attr(node, attribute))
        .filter_map(|raw| resolve_link(raw, base_url))
        .collect())
}

/// Joins an attribute value to the page URL
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base_url.join(href).ok()
}
