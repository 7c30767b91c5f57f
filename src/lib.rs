//! amz-catalog - Bibliographic metadata for Amazon catalog items
//!
//! Two independent paths: signed Product Advertising API `ItemLookup`
//! requests, and paginated extraction of wishlist pages.

pub mod amazon;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;

pub use amazon::models::{Credentials, ItemAttributes, WishlistItem};
pub use amazon::regions::Region;
pub use config::Config;
pub use error::{Error, Result};
