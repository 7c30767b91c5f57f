//! Document-query capability over parsed API responses.
//!
//! Paths are element names joined by `/`, each step a direct child of the
//! previous one; the first step may sit anywhere below the queried node.
//! Names are matched on the local part, so the response namespace is ignored.

use crate::error::{Error, Result};
use roxmltree::{Document, Node};

/// Queries a parsed document (or a subtree of one) by path expression.
pub trait DocumentQuery {
    /// Text content of the first node matching `path`, or `None`.
    fn first_text(&self, path: &str) -> Option<String>;

    /// Text content of every node matching `path`, in document order.
    fn texts(&self, path: &str) -> Vec<String>;
}

impl DocumentQuery for Node<'_, '_> {
    fn first_text(&self, path: &str) -> Option<String> {
        select(*self, path).first().map(|n| element_text(*n))
    }

    fn texts(&self, path: &str) -> Vec<String> {
        select(*self, path).into_iter().map(element_text).collect()
    }
}

impl DocumentQuery for Document<'_> {
    fn first_text(&self, path: &str) -> Option<String> {
        self.root().first_text(path)
    }

    fn texts(&self, path: &str) -> Vec<String> {
        self.root().texts(path)
    }
}

/// Parses an API response body as XML.
pub fn parse_xml(body: &str) -> Result<Document<'_>> {
    if body.trim().is_empty() {
        return Err(Error::MalformedResponse("empty response body".to_string()));
    }

    Document::parse(body).map_err(|e| {
        let preview: String = body.trim().chars().take(80).collect();
        Error::MalformedResponse(format!("invalid XML ({}): {:?}", e, preview))
    })
}

/// Elements below (or at) `scope` matching `path`, in document order.
pub fn select<'a, 'input>(scope: Node<'a, 'input>, path: &str) -> Vec<Node<'a, 'input>> {
    let steps: Vec<&str> = path.split('/').collect();
    scope.descendants().filter(|n| n.is_element() && matches_path(*n, &steps)).collect()
}

fn matches_path(node: Node<'_, '_>, steps: &[&str]) -> bool {
    let mut current = Some(node);
    for step in steps.iter().rev() {
        match current {
            Some(n) if n.tag_name().name() == *step => current = n.parent_element(),
            _ => return false,
        }
    }
    true
}

/// Concatenated text of every text node below `node`.
fn element_text(node: Node<'_, '_>) -> String {
    node.descendants().filter(|d| d.is_text()).filter_map(|d| d.text()).collect()
}
