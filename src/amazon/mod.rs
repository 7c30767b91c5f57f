//! Amazon catalog access: signed API lookups and wishlist page extraction.

pub mod attributes;
pub mod client;
pub mod document;
pub mod lookup;
pub mod models;
pub mod pagination;
pub mod regions;
pub mod render;
pub mod selectors;
pub mod signer;
pub mod wishlist;

pub use client::{AmazonClient, HttpGet};
pub use document::DocumentQuery;
pub use lookup::SignedLookupClient;
pub use models::{Credentials, ItemAttributes, PageState, WishlistItem};
pub use pagination::PaginationController;
pub use regions::Region;
pub use render::PageRenderer;
pub use signer::SignedRequestParams;
pub use wishlist::{PatternItemParser, WishlistItemParser};
