//! Tests for the registry module

use super::*;
use crate::config::RegistryConfig;
use crate::error::Error;
use crate::pagination::SORT_PROPERTY;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_client(server: &MockServer) -> RegistryClient {
    let config = RegistryConfig {
        rate_limit: None,
        ..RegistryConfig::default().with_base_url(server.uri())
    };
    RegistryClient::from_config(&config).unwrap()
}

fn first_request() -> PageRequest {
    PageRequest {
        q: None,
        sort: vec![SORT_PROPERTY.to_string()],
        limit: 100,
        search_after: None,
        fields: Vec::new(),
    }
}

fn page_body() -> serde_json::Value {
    json!({
        "summary": {
            "hits": 2,
            "q": "((ref_lid_target eq \"urn:nasa:pds:context:target:planet.mercury\"))",
            "took": 12
        },
        "data": [
            {
                "id": "urn:nasa:pds:mess_mla_calib:data:mla_calib_2011_01::1.0",
                "title": "MLA calibrated data",
                "type": "Product_Observational",
                "start_date_time": "2011-01-01T00:00:00Z",
                "stop_date_time": "2011-01-31T23:59:59Z",
                "properties": {
                    "ops:Harvest_Info.ops:harvest_date_time": ["2023-05-02T10:11:12.345Z"],
                    "ref_lid_target": ["urn:nasa:pds:context:target:planet.mercury"],
                    "pds:Primary_Result_Summary.pds:processing_level": ["Calibrated"]
                }
            },
            {
                "id": "urn:nasa:pds:mess_mla_calib:data:mla_calib_2011_02::1.0",
                "properties": {
                    "ops:Harvest_Info.ops:harvest_date_time": ["2023-05-02T10:11:13.000Z"]
                }
            }
        ]
    })
}

#[test]
fn test_client_defaults_to_production_server() {
    let client = RegistryClient::new().unwrap();
    assert_eq!(client.base_url(), "https://pds.nasa.gov/api/search/1");
}

#[test]
fn test_client_rejects_invalid_base_url() {
    let err = RegistryClient::with_base_url("not a url").unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. } | Error::InvalidUrl(_)));
}

#[tokio::test]
async fn test_first_page_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("Accept", "application/json"))
        .and(query_param("sort", SORT_PROPERTY))
        .and(query_param("limit", "100"))
        .and(query_param_is_missing("q"))
        .and(query_param_is_missing("search_after"))
        .and(query_param_is_missing("fields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let page = client.product_list(&first_request()).await.unwrap();

    assert_eq!(page.summary.hits, 2);
    assert_eq!(page.summary.took, Some(12));
    assert_eq!(page.data.len(), 2);
}

#[tokio::test]
async fn test_follow_up_page_request() {
    let server = MockServer::start().await;
    let q = r#"((ref_lid_target eq "urn:nasa:pds:context:target:planet.mercury"))"#;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("q", q))
        .and(query_param("search_after", "2023-05-02T10:11:13.000Z"))
        .and(query_param(
            "fields",
            "ref_lid_target,ops:Harvest_Info.ops:harvest_date_time",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": {"hits": 2},
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PageRequest {
        q: Some(q.to_string()),
        search_after: Some(vec!["2023-05-02T10:11:13.000Z".to_string()]),
        fields: vec!["ref_lid_target".to_string(), SORT_PROPERTY.to_string()],
        ..first_request()
    };

    let page = mock_client(&server).product_list(&request).await.unwrap();
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_products_are_decoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .mount(&server)
        .await;

    let page = mock_client(&server)
        .product_list(&first_request())
        .await
        .unwrap();
    let product = &page.data[0];

    assert_eq!(
        product.id,
        "urn:nasa:pds:mess_mla_calib:data:mla_calib_2011_01::1.0"
    );
    assert_eq!(product.title.as_deref(), Some("MLA calibrated data"));
    assert_eq!(product.product_type.as_deref(), Some("Product_Observational"));
    assert_eq!(product.harvest_time(), Some("2023-05-02T10:11:12.345Z"));
    assert!(product.has_value(
        "ref_lid_target",
        "urn:nasa:pds:context:target:planet.mercury"
    ));
    assert_eq!(
        product.first("pds:Primary_Result_Summary.pds:processing_level"),
        Some("Calibrated")
    );

    let sparse = &page.data[1];
    assert!(sparse.title.is_none());
    assert!(sparse.property("ref_lid_target").is_none());
}

#[tokio::test]
async fn test_missing_summary_is_tolerated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let page = mock_client(&server)
        .product_list(&first_request())
        .await
        .unwrap();
    assert_eq!(page.summary.hits, 0);
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = mock_client(&server)
        .product_list(&first_request())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad q"))
        .mount(&server)
        .await;

    let err = mock_client(&server)
        .product_list(&first_request())
        .await
        .unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "bad q");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_product_serializes_type_field() {
    let product = Product {
        id: "urn:nasa:pds:x::1.0".to_string(),
        product_type: Some("Product_Bundle".to_string()),
        ..Product::default()
    };
    let value = serde_json::to_value(&product).unwrap();
    assert_eq!(value["type"], "Product_Bundle");
    assert!(value.get("title").is_none());
}
