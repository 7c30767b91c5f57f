//! Wishlist export command implementation.

use crate::amazon::{AmazonClient, HttpGet, PaginationController};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

/// Exports every item of a public wishlist.
pub struct WishlistCommand {
    config: Config,
}

impl WishlistCommand {
    /// Creates a new wishlist command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Exports the wishlist from the configured store, writing rows to `out`
    /// as they are parsed. Returns the number of items written.
    pub async fn execute(&self, wishlist_id: &str, out: &mut impl Write) -> Result<usize> {
        let client =
            AmazonClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client, &self.config.region.base_url(), wishlist_id, out).await
    }

    /// Exports with a provided client and store URL (for testing).
    ///
    /// Rows written before a failure stay written.
    pub async fn execute_with_client(
        &self,
        client: &impl HttpGet,
        base_url: &str,
        wishlist_id: &str,
        out: &mut impl Write,
    ) -> Result<usize> {
        let wishlist_id = wishlist_id.trim();
        if wishlist_id.is_empty() || !wishlist_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            anyhow::bail!(
                "Invalid wishlist id: '{}'. The id is the alphanumeric part after /wishlist/ in the list URL.",
                wishlist_id
            );
        }

        info!("Exporting wishlist {} from {}", wishlist_id, base_url);

        let formatter = Formatter::new(self.config.format);
        if let Some(header) = formatter.wishlist_header() {
            writeln!(out, "{}", header)?;
        }

        let mut pages = PaginationController::new(client, base_url, wishlist_id)
            .max_pages(self.config.max_pages);

        let mut count = 0;
        while let Some(item) = pages.next().await {
            let item = item.with_context(|| {
                format!("Wishlist {} export stopped after {} items", wishlist_id, count)
            })?;
            writeln!(out, "{}", formatter.format_wishlist_item(&item))?;
            count += 1;
        }

        out.flush()?;
        info!("Exported {} items", count);
        Ok(count)
    }
}
