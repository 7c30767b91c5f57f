//! Data models for catalog items, wishlist entries and API credentials.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product Advertising API credentials.
///
/// Passed explicitly into every call that signs a request. Deliberately not
/// `Serialize`, and `Debug` hides the key material.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API host, e.g. `ecs.amazonaws.co.uk`
    pub host: String,
    /// AWS access key id
    pub access_key: String,
    /// AWS secret key used as the HMAC key
    pub secret: String,
}

impl Credentials {
    /// Creates credentials for the given API host.
    pub fn new(
        host: impl Into<String>,
        access_key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self { host: host.into(), access_key: access_key.into(), secret: secret.into() }
    }

    /// Checks the credentials before any request is built.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::Credential("API host is empty".to_string()));
        }
        check_key_material("access key", &self.access_key)?;
        check_key_material("secret", &self.secret)
    }
}

fn check_key_material(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Credential(format!("{} is empty", name)));
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(Error::Credential(format!("{} contains whitespace or control characters", name)));
    }
    Ok(())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("access_key", &"<redacted>")
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Bibliographic attributes returned by an `ItemLookup` call.
///
/// Fields missing from the response stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAttributes {
    /// Authors in document order
    pub authors: Vec<String>,
    pub binding: String,
    pub ean: String,
    pub edition: String,
    pub isbn: String,
    pub page_count: String,
    pub publication_date: String,
    pub publisher: String,
    pub title: String,
    /// List price amount as sent by the API (minor units)
    pub price: String,
    pub price_currency: String,
}

impl ItemAttributes {
    /// Authors joined for display.
    pub fn authors_joined(&self) -> String {
        self.authors.join(", ")
    }
}

/// One entry scraped from a wishlist page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    /// Catalog identifier (ASIN) from the detail page link
    pub amazon_id: String,
    pub author: String,
    pub binding: String,
    pub title: String,
    pub image_url: String,
    /// `GBP` when the price carried a pound sign, empty otherwise
    pub currency: String,
    pub price: String,
}

/// The page currently being scanned by the wishlist paginator.
#[derive(Debug, Clone)]
pub struct PageState {
    /// 1-based page number
    pub page_number: u32,
    /// Normalized page markup
    pub raw_page_text: String,
}
