//! Item lookup command implementation.

use crate::amazon::{AmazonClient, Credentials, HttpGet, SignedLookupClient};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::info;

/// Looks up a single item through the Product Advertising API.
pub struct LookupCommand {
    config: Config,
}

impl LookupCommand {
    /// Creates a new lookup command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Builds credentials for the configured region's API host.
    pub fn credentials(&self, access_key: &str, secret: &str) -> Credentials {
        Credentials::new(self.config.region.api_host(), access_key, secret)
    }

    /// Fetches an item by id and returns formatted output.
    pub async fn execute(&self, cred: &Credentials, item_id: &str) -> Result<String> {
        let client =
            AmazonClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client, cred, item_id).await
    }

    /// Fetches an item with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl HttpGet,
        cred: &Credentials,
        item_id: &str,
    ) -> Result<String> {
        // Validate item id format (10 alphanumeric characters)
        let item_id = item_id.trim().to_uppercase();
        if item_id.len() != 10 || !item_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            anyhow::bail!(
                "Invalid item id format: '{}'. Item ids (ASIN or ISBN-10) are 10 alphanumeric characters.",
                item_id
            );
        }

        info!("Looking up {} via {}", item_id, cred.host);

        let lookup = SignedLookupClient::new(client, &self.config.associate_tag);
        let item = lookup
            .lookup_item(cred, &item_id)
            .await
            .with_context(|| format!("Lookup of {} failed", item_id))?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_item(&item))
    }
}
