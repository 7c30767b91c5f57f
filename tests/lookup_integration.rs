//! Signed item lookups against a mock API endpoint using fixture responses.

use amz_catalog::amazon::lookup::parse_lookup_response;
use amz_catalog::amazon::{AmazonClient, SignedLookupClient};
use amz_catalog::commands::LookupCommand;
use amz_catalog::{Config, Credentials, Error};
use chrono::{TimeZone, Utc};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RESPONSE: &str = include_str!("fixtures/item_lookup_response.xml");
const ERROR_RESPONSE: &str = include_str!("fixtures/item_lookup_error.xml");

fn xml(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body, "text/xml;charset=UTF-8")
}

fn test_config() -> Config {
    Config { timeout_secs: 5, ..Config::default() }
}

fn credentials_for(server: &MockServer) -> Credentials {
    Credentials::new(server.address().to_string(), "AKIDEXAMPLE", "testsecret")
}

#[test]
fn test_parse_fixture_response() {
    let item = parse_lookup_response(RESPONSE).unwrap();

    assert_eq!(item.authors, vec!["Jane Austen", "Vivien Jones", "Tony Tanner"]);
    assert_eq!(item.title, "Pride and Prejudice (Penguin Classics)");
    assert_eq!(item.binding, "Paperback");
    assert_eq!(item.ean, "9780141439518");
    assert_eq!(item.edition, "Reissue");
    assert_eq!(item.isbn, "0141439513");
    assert_eq!(item.page_count, "480");
    assert_eq!(item.publication_date, "2003-04-29");
    assert_eq!(item.publisher, "Penguin Classics");
    assert_eq!(item.price, "599");
    assert_eq!(item.price_currency, "GBP");
}

#[test]
fn test_parse_fixture_error_response() {
    let err = parse_lookup_response(ERROR_RESPONSE).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(err.to_string().contains("SignatureDoesNotMatch"));
}

#[tokio::test]
async fn test_lookup_sends_signed_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/onca/xml"))
        .and(query_param("Operation", "ItemLookup"))
        .and(query_param("ItemId", "0141439513"))
        .and(query_param("ResponseGroup", "ItemAttributes"))
        .and(query_param("Service", "AWSECommerceService"))
        .and(query_param("Timestamp", "2015-06-01T12:00:00Z"))
        .respond_with(xml(200, RESPONSE))
        .expect(1)
        .mount(&server)
        .await;

    let http = AmazonClient::new(&test_config()).await.unwrap();
    let lookup = SignedLookupClient::new(&http, "PutYourAssociateTagHere");
    let cred = credentials_for(&server);
    let timestamp = Utc.with_ymd_and_hms(2015, 6, 1, 12, 0, 0).unwrap();

    let item = lookup.lookup_item_at(&cred, "0141439513", timestamp).await.unwrap();
    assert_eq!(item.authors.len(), 3);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.as_str(), lookup.request_url(&cred, "0141439513", timestamp));
    assert!(requests[0].url.as_str().contains("&Signature="));
}

#[tokio::test]
async fn test_rejected_signature_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/onca/xml"))
        .respond_with(xml(403, ERROR_RESPONSE))
        .mount(&server)
        .await;

    let http = AmazonClient::new(&test_config()).await.unwrap();
    let lookup = SignedLookupClient::new(&http, "PutYourAssociateTagHere");

    let err = lookup.lookup_item(&credentials_for(&server), "0141439513").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(err.to_string().contains("wrong credentials or unknown item id"));
}

#[tokio::test]
async fn test_lookup_command_prints_tsv_row() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/onca/xml"))
        .respond_with(xml(200, RESPONSE))
        .mount(&server)
        .await;

    let http = AmazonClient::new(&test_config()).await.unwrap();
    let cmd = LookupCommand::new(test_config());

    let output =
        cmd.execute_with_client(&http, &credentials_for(&server), "0141439513").await.unwrap();
    assert_eq!(
        output,
        "Jane Austen, Vivien Jones, Tony Tanner\tPride and Prejudice (Penguin Classics)\t\
         Penguin Classics\tReissue ed\t2003-04-29\tPaperback\t480 pages\t0141439513\t\
         9780141439518\t599\tGBP"
    );
}
