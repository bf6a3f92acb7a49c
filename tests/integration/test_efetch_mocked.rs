//! EFetch (article extractor) tests against a mocked E-utilities server

mod common;

use pubmed_pharma_papers::{ArticleParseError, PubMedError};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{create_mock_client, load_fixture, mount_efetch, mount_esearch};

const BATCH_IDS: [&str; 4] = ["38100001", "38100002", "38100003", "38100004"];

#[tokio::test]
#[traced_test]
async fn test_fetch_details_sends_comma_joined_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("id", "38100001,38100002,38100003,38100004"))
        .and(query_param("retmode", "xml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("efetch/company_batch.xml")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let records = client.fetch_details(&BATCH_IDS).await.unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
#[traced_test]
async fn test_fetch_batch_skips_malformed_article() {
    let mock_server = MockServer::start().await;
    mount_efetch(&mock_server, 200, &load_fixture("efetch/company_batch.xml")).await;
    let client = create_mock_client(&mock_server);

    let batch = client
        .fetch_batch(&BATCH_IDS)
        .await
        .expect("A malformed article must not abort the batch");

    assert_eq!(batch.parsed, 3);
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.skipped.len(), 1);

    let skipped = &batch.skipped[0];
    assert_eq!(skipped.position, 1);
    assert_eq!(skipped.pmid.as_deref(), Some("38100002"));
    assert_eq!(
        skipped.reason,
        ArticleParseError::MissingField {
            field: "Article/Journal"
        }
    );

    assert!(logs_contain("Failed to parse article, skipping"));
    assert!(logs_contain("Some articles could not be parsed"));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_details_record_contents() {
    let mock_server = MockServer::start().await;
    mount_efetch(&mock_server, 200, &load_fixture("efetch/company_batch.xml")).await;
    let client = create_mock_client(&mock_server);

    let records = client.fetch_details(&BATCH_IDS).await.unwrap();

    let first = &records[0];
    assert_eq!(first.pmid, "38100001");
    assert_eq!(first.title, "Engineered in vivo antibody delivery.");
    assert_eq!(first.publication_year, "2024");
    assert_eq!(
        first.company_affiliations,
        vec!["Acme Therapeutics, Cambridge, MA, USA. contact@acme.com"]
    );
    assert_eq!(first.non_academic_authors, vec!["Ann Smith"]);
    assert_eq!(first.email, "contact@acme.com");

    let second = &records[1];
    assert_eq!(second.pmid, "38100003");
    assert_eq!(second.publication_year, "Unknown");
    assert_eq!(
        second.company_affiliations,
        vec![
            "Delta Biotech LLC, Seattle, WA, USA. dana.park@deltabio.com",
            "Epsilon Therapeutics, Seattle, WA, USA. evan@epsilon.com",
        ]
    );
    assert_eq!(second.non_academic_authors, vec!["Dana Park", "Evan Kim"]);
    // The last author with an '@' in their affiliation wins
    assert_eq!(second.email, "evan@epsilon.com");
}

#[tokio::test]
#[traced_test]
async fn test_fetch_details_single_article_payload() {
    let mock_server = MockServer::start().await;
    mount_efetch(&mock_server, 200, &load_fixture("efetch/single_article.xml")).await;
    let client = create_mock_client(&mock_server);

    let records = client.fetch_details(&["37000042"]).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].pmid, "37000042");
    assert_eq!(records[0].company_affiliations, vec![
        "Genentech, Inc., South San Francisco, CA, USA."
    ]);
    assert_eq!(records[0].non_academic_authors, vec!["Jane Doe"]);
    assert!(records[0].email.is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_fetch_details_empty_ids_makes_no_request() {
    let mock_server = MockServer::start().await;
    let client = create_mock_client(&mock_server);

    let records = client.fetch_details::<String>(&[]).await.unwrap();
    assert!(records.is_empty());

    let received_requests = mock_server.received_requests().await.unwrap();
    assert_eq!(received_requests.len(), 0);
}

#[tokio::test]
#[traced_test]
async fn test_fetch_details_non_xml_payload_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_efetch(
        &mock_server,
        200,
        "<eFetchResult><ERROR>Empty id list - nothing todo</ERROR></eFetchResult>",
    )
    .await;
    let client = create_mock_client(&mock_server);

    let result = client.fetch_details(&["1"]).await;
    assert!(matches!(result, Err(PubMedError::XmlError(_))));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_details_truncated_payload_is_fatal() {
    let mock_server = MockServer::start().await;
    let full = load_fixture("efetch/single_article.xml");
    let truncated = &full[..full.len() / 2];
    mount_efetch(&mock_server, 200, truncated).await;
    let client = create_mock_client(&mock_server);

    let result = client.fetch_details(&["37000042"]).await;
    assert!(result.is_err());
}

#[tokio::test]
#[traced_test]
async fn test_fetch_details_http_error_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_efetch(&mock_server, 400, "Bad Request").await;
    let client = create_mock_client(&mock_server);

    match client.fetch_details(&["1"]).await {
        Err(PubMedError::ApiError { status, .. }) => assert_eq!(status, 400),
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
#[traced_test]
async fn test_search_and_extract_pipeline() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, 200, &load_fixture("esearch/search_pharma.json")).await;
    mount_efetch(&mock_server, 200, &load_fixture("efetch/company_batch.xml")).await;
    let client = create_mock_client(&mock_server);

    let records = client.search_and_extract("antibody pharma").await.unwrap();

    let pmids: Vec<&str> = records.iter().map(|r| r.pmid.as_str()).collect();
    assert_eq!(pmids, vec!["38100001", "38100003"]);

    let received_requests = mock_server.received_requests().await.unwrap();
    assert_eq!(received_requests.len(), 2);
    assert_eq!(received_requests[0].url.path(), "/esearch.fcgi");
    assert_eq!(received_requests[1].url.path(), "/efetch.fcgi");
}
