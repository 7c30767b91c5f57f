//! Fetches catalog pages and normalizes their markup.

use crate::amazon::client::HttpGet;
use crate::error::{Error, Result};
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

static ANY_ELEMENT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("*").unwrap());

/// Elements the parser inserts into every document.
const SCAFFOLD: [&str; 3] = ["html", "head", "body"];

/// Fetches a page and re-serializes it through the HTML parser.
///
/// Normalization regularizes whitespace inside tags, closes open elements
/// and double-quotes attributes, which the wishlist patterns rely on.
pub struct PageRenderer<'a, H: HttpGet + ?Sized> {
    http: &'a H,
}

impl<'a, H: HttpGet + ?Sized> PageRenderer<'a, H> {
    pub fn new(http: &'a H) -> Self {
        Self { http }
    }

    /// Fetches `url` and returns its normalized markup.
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        let body = self.http.get(url).await?;
        let rendered = render_markup(&body)?;
        debug!("Rendered {} bytes of markup ({} raw)", rendered.len(), body.len());
        Ok(rendered)
    }
}

/// Parses `body` and serializes the resulting document.
///
/// The parser accepts any input, so a body that yields no elements of its own
/// is rejected as malformed.
pub fn render_markup(body: &str) -> Result<String> {
    let document = Html::parse_document(body);
    let has_content = document
        .select(&ANY_ELEMENT)
        .any(|el| !SCAFFOLD.contains(&el.value().name()));

    if !has_content {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Err(Error::MalformedResponse("empty response body".to_string()));
        }
        let preview: String = trimmed.chars().take(80).collect();
        return Err(Error::MalformedResponse(format!(
            "no markup elements in response: {:?}",
            preview
        )));
    }

    Ok(document.html())
}
