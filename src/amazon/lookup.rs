//! Signed `ItemLookup` requests against the Product Advertising API.

use crate::amazon::attributes;
use crate::amazon::client::HttpGet;
use crate::amazon::document::{parse_xml, select, DocumentQuery};
use crate::amazon::models::{Credentials, ItemAttributes};
use crate::amazon::selectors::api;
use crate::amazon::signer::{self, SignedRequestParams, API_PATH};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

const OPERATION: &str = "ItemLookup";
const RESPONSE_GROUP: &str = "ItemAttributes";

/// Looks up single items by identifier through signed API requests.
pub struct SignedLookupClient<'a, H: HttpGet + ?Sized> {
    http: &'a H,
    associate_tag: String,
}

impl<'a, H: HttpGet + ?Sized> SignedLookupClient<'a, H> {
    /// Creates a lookup client issuing requests through `http`.
    pub fn new(http: &'a H, associate_tag: impl Into<String>) -> Self {
        Self { http, associate_tag: associate_tag.into() }
    }

    /// Fetches the attributes of `item_id`, signing the request with the current time.
    pub async fn lookup_item(&self, cred: &Credentials, item_id: &str) -> Result<ItemAttributes> {
        self.lookup_item_at(cred, item_id, Utc::now()).await
    }

    /// Fetches the attributes of `item_id`, signing the request at `timestamp`.
    pub async fn lookup_item_at(
        &self,
        cred: &Credentials,
        item_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<ItemAttributes> {
        cred.validate()?;

        info!("Looking up item: {}", item_id);

        let url = self.request_url(cred, item_id, timestamp);
        let body = self.http.get(&url).await?;

        let item = parse_lookup_response(&body)?;
        debug!("Item {} resolved to '{}'", item_id, item.title);
        Ok(item)
    }

    /// Builds the signed request URL for `item_id` at `timestamp`.
    pub fn request_url(
        &self,
        cred: &Credentials,
        item_id: &str,
        timestamp: DateTime<Utc>,
    ) -> String {
        let mut params =
            SignedRequestParams::base(&cred.access_key, &self.associate_tag, timestamp);
        params
            .insert("Operation", OPERATION)
            .insert("ItemId", item_id)
            .insert("ResponseGroup", RESPONSE_GROUP);

        let (query, signature) = signer::sign(&params, &cred.host, API_PATH, &cred.secret);

        format!("http://{}{}?{}&Signature={}", cred.host, API_PATH, query, signature)
    }
}

/// Parses an `ItemLookup` response body into item attributes.
pub fn parse_lookup_response(body: &str) -> Result<ItemAttributes> {
    let document = parse_xml(body)?;

    match select(document.root(), api::ITEM_ATTRIBUTES).first() {
        Some(block) => Ok(attributes::extract(block)),
        None => Err(Error::NotFound(not_found_hint(&document))),
    }
}

/// The API gives no way to tell bad credentials from an unknown item, so the
/// message names both and appends whatever error the response carried.
fn not_found_hint(document: &impl DocumentQuery) -> String {
    let mut hint =
        "response has no ItemAttributes block (wrong credentials or unknown item id?)".to_string();

    let code = document.first_text(api::ERROR_CODE);
    let message = document.first_text(api::ERROR_MESSAGE);
    match (code, message) {
        (Some(code), Some(message)) => hint.push_str(&format!(": {}: {}", code, message.trim())),
        (Some(code), None) => hint.push_str(&format!(": {}", code)),
        (None, Some(message)) => hint.push_str(&format!(": {}", message.trim())),
        (None, None) => {}
    }
    hint
}
