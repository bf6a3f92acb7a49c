//! ESearch (ID locator) tests against a mocked E-utilities server

mod common;

use pubmed_pharma_papers::{ClientConfig, PubMedClient, PubMedError};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{create_mock_client, load_fixture, mount_esearch};

#[tokio::test]
#[traced_test]
async fn test_fetch_ids_returns_server_order() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, 200, &load_fixture("esearch/search_pharma.json")).await;
    let client = create_mock_client(&mock_server);

    let pmids = client
        .fetch_ids("antibody pharma")
        .await
        .expect("Search should succeed");

    assert_eq!(pmids, vec!["38100001", "38100002", "38100003"]);
    assert!(logs_contain("Search completed successfully"));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_ids_sends_expected_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("term", "cancer & \"gene therapy\""))
        .and(query_param("retmode", "json"))
        .and(query_param("retmax", "100"))
        .and(query_param("tool", "pubmed-pharma-papers-tests"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("esearch/search_pharma.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let pmids = client.fetch_ids("cancer & \"gene therapy\"").await.unwrap();
    assert_eq!(pmids.len(), 3);
}

#[tokio::test]
#[traced_test]
async fn test_fetch_ids_respects_configured_cap_and_email() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "25"))
        .and(query_param("email", "me@example.com"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("esearch/search_pharma.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_email("me@example.com")
        .with_max_results(25);
    let client = PubMedClient::with_config(config);

    assert!(client.fetch_ids("anything").await.is_ok());
}

#[tokio::test]
#[traced_test]
async fn test_fetch_ids_empty_result() {
    let mock_server = MockServer::start().await;
    mount_esearch(
        &mock_server,
        200,
        r#"{"esearchresult": {"count": "0", "retmax": "0", "idlist": []}}"#,
    )
    .await;
    let client = create_mock_client(&mock_server);

    let pmids = client.fetch_ids("nothing matches this").await.unwrap();
    assert!(pmids.is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_fetch_ids_error_field_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, 200, &load_fixture("esearch/search_error.json")).await;
    let client = create_mock_client(&mock_server);

    match client.fetch_ids("((broken").await {
        Err(PubMedError::ApiError { status, message }) => {
            assert_eq!(status, 200);
            assert!(message.contains("unbalanced parentheses"));
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
#[traced_test]
async fn test_fetch_ids_unexpected_structure_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, 200, r#"{"header": {"type": "esearch"}}"#).await;
    let client = create_mock_client(&mock_server);

    let result = client.fetch_ids("cancer").await;
    assert!(matches!(result, Err(PubMedError::JsonError(_))));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_ids_missing_idlist_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, 200, r#"{"esearchresult": {"count": "5"}}"#).await;
    let client = create_mock_client(&mock_server);

    let result = client.fetch_ids("cancer").await;
    assert!(matches!(
        result,
        Err(PubMedError::UnexpectedResponse { .. })
    ));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_ids_non_json_body_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, 200, "<html>Service unavailable</html>").await;
    let client = create_mock_client(&mock_server);

    assert!(matches!(
        client.fetch_ids("cancer").await,
        Err(PubMedError::JsonError(_))
    ));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_ids_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    match client.fetch_ids("cancer").await {
        Err(PubMedError::ApiError { status, .. }) => assert_eq!(status, 503),
        other => panic!("Expected ApiError, got {:?}", other),
    }
    assert!(logs_contain("API request failed with status"));
}

#[tokio::test]
async fn test_fetch_ids_unreachable_host_is_request_error() {
    // Port 1 on localhost refuses connections
    let config = ClientConfig::new().with_base_url("http://127.0.0.1:1");
    let client = PubMedClient::with_config(config);

    assert!(matches!(
        client.fetch_ids("cancer").await,
        Err(PubMedError::RequestError(_))
    ));
}
