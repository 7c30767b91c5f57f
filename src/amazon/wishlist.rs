//! Wishlist item extraction from normalized page markup.
//!
//! A wishlist item's fields are spread across the page: name, link and
//! byline sit together after the item's name anchor, while the image and
//! price live in separate containers tied to the item by its html id.

use crate::amazon::models::WishlistItem;
use crate::amazon::selectors::wishlist as patterns;
use tracing::trace;

/// Bytes after an item's name anchor that still belong to the item.
pub const ITEM_WINDOW: usize = 1000;

/// Bytes after the image container searched for the image element.
pub const IMAGE_WINDOW: usize = 1000;

/// Bytes before the price label's end included in the price search.
pub const PRICE_WINDOW_BEFORE: usize = 50;

/// Bytes after the price label's end included in the price search.
pub const PRICE_WINDOW_AFTER: usize = 150;

const POUND_SIGN: char = '\u{a3}';
const ZERO_WIDTH_SPACE: char = '\u{200b}';

/// Where one item starts within a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAnchor {
    /// Byte offset of the start of the anchor match
    pub start: usize,
    /// Byte offset just past the anchor match
    pub end: usize,
    /// Item html id embedded in the anchor
    pub html_id: String,
}

impl ItemAnchor {
    /// The bounded window of `page_text` holding this item's inline fields.
    pub fn fragment<'p>(&self, page_text: &'p str) -> &'p str {
        window(page_text, self.start, self.end.saturating_add(ITEM_WINDOW))
    }
}

/// Extraction rules for wishlist pages.
///
/// Implementations never fail; a field whose rule does not match stays
/// empty.
pub trait WishlistItemParser {
    /// Finds every item anchor in the page, in document order.
    fn item_anchors(&self, page_text: &str) -> Vec<ItemAnchor>;

    /// Extracts one item. `item_fragment` is the anchor's window of the page.
    fn parse_item(&self, page_text: &str, item_html_id: &str, item_fragment: &str) -> WishlistItem;

    /// Whether the page links to a following page.
    fn has_next_page(&self, page_text: &str) -> bool;
}

/// Positional pattern matching over normalized wishlist markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternItemParser;

impl PatternItemParser {
    pub fn new() -> Self {
        Self
    }
}

impl WishlistItemParser for PatternItemParser {
    fn item_anchors(&self, page_text: &str) -> Vec<ItemAnchor> {
        patterns::ITEM_ANCHOR
            .captures_iter(page_text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(ItemAnchor {
                    start: whole.start(),
                    end: whole.end(),
                    html_id: caps.get(1)?.as_str().to_string(),
                })
            })
            .collect()
    }

    fn parse_item(&self, page_text: &str, item_html_id: &str, item_fragment: &str) -> WishlistItem {
        let mut item = WishlistItem {
            amazon_id: first_capture(&patterns::DETAIL_LINK, item_fragment),
            title: first_capture(&patterns::TITLE_ATTR, item_fragment),
            image_url: image_url(page_text, item_html_id),
            ..Default::default()
        };

        let byline = first_capture(&patterns::BYLINE, item_fragment);
        (item.author, item.binding) = split_byline(byline.trim());

        (item.currency, item.price) = price(page_text, item_html_id);

        trace!("Parsed wishlist item {}: {} - {}", item_html_id, item.amazon_id, item.title);
        item
    }

    fn has_next_page(&self, page_text: &str) -> bool {
        patterns::NEXT_PAGE.is_match(page_text)
    }
}

fn first_capture(pattern: &regex_lite::Regex, text: &str) -> String {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Splits `Name (Binding)`; without a parenthesized suffix the whole text is the author.
fn split_byline(byline: &str) -> (String, String) {
    match patterns::AUTHOR_BINDING.captures(byline) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => (byline.to_string(), String::new()),
    }
}

fn image_url(page_text: &str, item_html_id: &str) -> String {
    let marker = patterns::image_marker(item_html_id);
    let Some(idx) = page_text.find(&marker) else {
        return String::new();
    };
    let end = idx + marker.len();
    first_capture(&patterns::IMAGE_SRC, window(page_text, end, end + IMAGE_WINDOW))
}

/// Returns `(currency, price)`. Only the pound sign is recognized as a currency.
fn price(page_text: &str, item_html_id: &str) -> (String, String) {
    let marker = patterns::price_marker(item_html_id);
    let Some(idx) = page_text.find(&marker) else {
        return (String::new(), String::new());
    };
    let end = idx + marker.len();
    let text = window(
        page_text,
        end.saturating_sub(PRICE_WINDOW_BEFORE),
        end + PRICE_WINDOW_AFTER,
    );

    let amount = first_capture(&patterns::SPAN_TEXT, text);
    match amount.strip_prefix(POUND_SIGN) {
        Some(rest) => ("GBP".to_string(), rest.to_string()),
        None => (String::new(), amount),
    }
}

/// Slices `text[start..end]`, clamped to the text and widened outwards to
/// the nearest char boundaries.
pub fn window(text: &str, start: usize, end: usize) -> &str {
    let mut start = start.min(text.len());
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = end.clamp(start, text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }
    &text[start..end]
}

/// Decodes HTML entities and drops the zero-width spaces the site embeds.
pub fn clean_text(text: &str) -> String {
    html_escape::decode_html_entities(text).replace(ZERO_WIDTH_SPACE, "")
}
