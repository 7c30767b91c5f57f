//! Walks a wishlist page by page, yielding items as they are parsed.

use crate::amazon::client::HttpGet;
use crate::amazon::models::{PageState, WishlistItem};
use crate::amazon::render::PageRenderer;
use crate::amazon::wishlist::{clean_text, ItemAnchor, PatternItemParser, WishlistItemParser};
use crate::error::{Error, Result};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Builds the URL of one wishlist page.
pub fn wishlist_url(base_url: &str, wishlist_id: &str, page: u32) -> String {
    format!(
        "{}/gp/registry/wishlist/{}/?page={}",
        base_url.trim_end_matches('/'),
        wishlist_id,
        page
    )
}

enum State {
    FetchPage(u32),
    ScanItems { page: PageState, anchors: VecDeque<ItemAnchor> },
    CheckNext(PageState),
    Done,
}

/// Lazily pages through a wishlist.
///
/// Pages are fetched strictly in order and only once every item of the
/// previous page has been pulled. The first error ends the sequence.
///
/// ```no_run
/// # async fn run(http: &amz_catalog::amazon::AmazonClient) -> amz_catalog::Result<()> {
/// use amz_catalog::amazon::PaginationController;
///
/// let mut pages = PaginationController::new(http, "https://www.amazon.co.uk", "3ABCDEF");
/// while let Some(item) = pages.next().await {
///     println!("{}", item?.title);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginationController<'a, H: HttpGet + ?Sized, P = PatternItemParser> {
    renderer: PageRenderer<'a, H>,
    parser: P,
    base_url: String,
    wishlist_id: String,
    max_pages: Option<u32>,
    state: State,
}

impl<'a, H: HttpGet + ?Sized> PaginationController<'a, H, PatternItemParser> {
    /// Creates a controller for `wishlist_id` on the store at `base_url`.
    pub fn new(http: &'a H, base_url: impl Into<String>, wishlist_id: impl Into<String>) -> Self {
        Self {
            renderer: PageRenderer::new(http),
            parser: PatternItemParser::new(),
            base_url: base_url.into(),
            wishlist_id: wishlist_id.into(),
            max_pages: None,
            state: State::FetchPage(1),
        }
    }
}

impl<'a, H: HttpGet + ?Sized, P: WishlistItemParser> PaginationController<'a, H, P> {
    /// Replaces the item parser.
    pub fn with_parser<Q: WishlistItemParser>(self, parser: Q) -> PaginationController<'a, H, Q> {
        PaginationController {
            renderer: self.renderer,
            parser,
            base_url: self.base_url,
            wishlist_id: self.wishlist_id,
            max_pages: self.max_pages,
            state: self.state,
        }
    }

    /// Stops with [`Error::PageLimitExceeded`] instead of fetching past `max_pages`.
    pub fn max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Pulls the next item, fetching the following page when the current one
    /// is exhausted. Returns `None` once the wishlist is done.
    pub async fn next(&mut self) -> Option<Result<WishlistItem>> {
        loop {
            match std::mem::replace(&mut self.state, State::Done) {
                State::FetchPage(page_number) => {
                    let url = wishlist_url(&self.base_url, &self.wishlist_id, page_number);
                    info!("Fetching wishlist page {}", page_number);

                    let raw_page_text = match self.renderer.fetch_page(&url).await {
                        Ok(text) => text,
                        Err(e) => return Some(Err(e)),
                    };
                    let anchors: VecDeque<_> = self.parser.item_anchors(&raw_page_text).into();
                    debug!("Page {} has {} items", page_number, anchors.len());

                    self.state = State::ScanItems {
                        page: PageState { page_number, raw_page_text },
                        anchors,
                    };
                }
                State::ScanItems { page, mut anchors } => match anchors.pop_front() {
                    Some(anchor) => {
                        let item = self.parse_item(&page, &anchor);
                        self.state = State::ScanItems { page, anchors };
                        return Some(Ok(item));
                    }
                    None => self.state = State::CheckNext(page),
                },
                State::CheckNext(page) => {
                    if !self.parser.has_next_page(&page.raw_page_text) {
                        debug!("No next link on page {}", page.page_number);
                        return None;
                    }
                    if let Some(max) = self.max_pages {
                        if page.page_number >= max {
                            return Some(Err(Error::PageLimitExceeded(max)));
                        }
                    }
                    self.state = State::FetchPage(page.page_number + 1);
                }
                State::Done => return None,
            }
        }
    }

    /// Drains the remaining items into a vector.
    pub async fn collect_all(mut self) -> Result<Vec<WishlistItem>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item?);
        }
        Ok(items)
    }

    fn parse_item(&self, page: &PageState, anchor: &ItemAnchor) -> WishlistItem {
        let text = &page.raw_page_text;
        let mut item = self.parser.parse_item(text, &anchor.html_id, anchor.fragment(text));
        item.author = clean_text(&item.author);
        item.title = clean_text(&item.title);
        item
    }
}
