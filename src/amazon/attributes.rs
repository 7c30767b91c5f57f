//! Maps an `ItemAttributes` block of an API response to [`ItemAttributes`].

use crate::amazon::document::DocumentQuery;
use crate::amazon::models::ItemAttributes;
use crate::amazon::selectors::api;

/// Extracts item attributes from a parsed attributes block.
///
/// Every field is optional in the response; a missing element leaves the
/// field empty.
pub fn extract(doc: &impl DocumentQuery) -> ItemAttributes {
    ItemAttributes {
        authors: doc.texts(api::AUTHOR),
        binding: text_or_empty(doc, api::BINDING),
        ean: text_or_empty(doc, api::EAN),
        edition: text_or_empty(doc, api::EDITION),
        isbn: text_or_empty(doc, api::ISBN),
        page_count: text_or_empty(doc, api::NUMBER_OF_PAGES),
        publication_date: text_or_empty(doc, api::PUBLICATION_DATE),
        publisher: text_or_empty(doc, api::PUBLISHER),
        title: text_or_empty(doc, api::TITLE),
        price: text_or_empty(doc, api::LIST_PRICE_AMOUNT),
        price_currency: text_or_empty(doc, api::LIST_PRICE_CURRENCY),
    }
}

fn text_or_empty(doc: &impl DocumentQuery, path: &str) -> String {
    doc.first_text(path).unwrap_or_default()
}
