//! Selectors and patterns for Amazon responses.
//!
//! This file contains every path expression and text pattern used to pull
//! fields out of API responses and wishlist pages.
//! Update this file when Amazon changes their markup.
//!
//! **Update process**: When extraction fails, capture a sample page,
//! update the pattern, and add a test fixture.

use regex_lite::Regex;
use std::sync::LazyLock;

/// Paths into `ItemLookup` XML responses.
pub mod api {
    /// Attributes block of an item.
    pub const ITEM_ATTRIBUTES: &str = "ItemAttributes";

    /// Author, repeated once per author.
    pub const AUTHOR: &str = "Author";
    pub const BINDING: &str = "Binding";
    pub const EAN: &str = "EAN";
    pub const EDITION: &str = "Edition";
    pub const ISBN: &str = "ISBN";
    pub const NUMBER_OF_PAGES: &str = "NumberOfPages";
    pub const PUBLICATION_DATE: &str = "PublicationDate";
    pub const PUBLISHER: &str = "Publisher";
    pub const TITLE: &str = "Title";

    /// List price amount in minor units.
    pub const LIST_PRICE_AMOUNT: &str = "ListPrice/Amount";
    pub const LIST_PRICE_CURRENCY: &str = "ListPrice/CurrencyCode";

    /// Error code of a rejected request.
    pub const ERROR_CODE: &str = "Error/Code";

    /// Human-readable error message of a rejected request.
    pub const ERROR_MESSAGE: &str = "Error/Message";
}

/// Patterns over normalized wishlist page markup.
pub mod wishlist {
    use super::*;

    /// Start of an item: the name link, carrying the item html id.
    pub static ITEM_ANCHOR: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"<a id="itemName_([A-Z0-9]+)""#).unwrap());

    /// Detail page link, `/dp/{ASIN}/ref=...`.
    pub static DETAIL_LINK: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"href="/dp/([^/"]+)/ref"#).unwrap());

    /// Byline after the item heading: `by John Smith (Paperback)`.
    pub static BYLINE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"</h5>\s*by ([^<\n]+)").unwrap());

    /// Splits a byline into author and parenthesized binding.
    pub static AUTHOR_BINDING: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(.*?)\s\(([^)]*)\)").unwrap());

    /// Title attribute on the item name link.
    pub static TITLE_ATTR: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"title="([^"]*)" href"#).unwrap());

    /// Source of the first image element.
    pub static IMAGE_SRC: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"<img\s(?:[^>]*?\s)?src="([^"]*)""#).unwrap());

    /// Text content of an inline span.
    pub static SPAN_TEXT: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<span[^>]*>\s*([^<]*?)\s*</span>").unwrap());

    /// Link to the next page of the wishlist.
    pub static NEXT_PAGE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"<a\s[^>]*?href="([^"]*)"[^>]*>\s*Next"#).unwrap());

    /// Container of an item's image, keyed by item html id.
    pub fn image_marker(item_html_id: &str) -> String {
        format!(r#"<div id="itemImage_{}""#, item_html_id)
    }

    /// Price label of an item, keyed by item html id.
    pub fn price_marker(item_html_id: &str) -> String {
        format!(r#"<span id="itemPrice_{}""#, item_html_id)
    }
}
