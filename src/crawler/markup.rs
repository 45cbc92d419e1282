//! Markup query capability
//!
//! Extraction code only needs four operations on a parsed document:
//! select one node, select all nodes, read a node's text, and read an
//! attribute. `MarkupQuery` names exactly those so any HTML backend can
//! satisfy it; `HtmlDocument` is the `scraper` implementation.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Read-only queries over a parsed document
pub trait MarkupQuery {
    /// A handle to one element of the document
    type Node<'a>: Copy
    where
        Self: 'a;

    fn select_one<'a>(&'a self, selector: &str) -> Result<Option<Self::Node<'a>>, MarkupError>;

    fn select_all<'a>(&'a self, selector: &str) -> Result<Vec<Self::Node<'a>>, MarkupError>;

    /// Concatenated text of the node and its descendants
    fn text<'a>(&'a self, node: Self::Node<'a>) -> String;

    fn attr<'a>(&'a self, node: Self::Node<'a>, name: &str) -> Option<&'a str>;
}

/// An HTML document parsed with `scraper`
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parses a full HTML document; malformed markup is recovered, never rejected
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector, MarkupError> {
    Selector::parse(selector).map_err(|e| MarkupError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

impl MarkupQuery for HtmlDocument {
    type Node<'a> = ElementRef<'a>;

    fn select_one<'a>(&'a self, selector: &str) -> Result<Option<ElementRef<'a>>, MarkupError> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).next())
    }

    fn select_all<'a>(&'a self, selector: &str) -> Result<Vec<ElementRef<'a>>, MarkupError> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).collect())
    }

    fn text<'a>(&'a self, node: ElementRef<'a>) -> String {
        node.text().collect()
    }

    fn attr<'a>(&'a self, node: ElementRef<'a>, name: &str) -> Option<&'a str> {
        node.value().attr(name)
    }
}
