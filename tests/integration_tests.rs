//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: registry file → contract → HTTP requests → pages

use futures::StreamExt;
use pagechain::http::{HttpMethod, HttpPageSource, HttpSourceConfig};
use pagechain::source::from_fn;
use pagechain::{
    load_registry, resolve_contract, AsyncPaginator, ContractDefinition, ErrorKind, Flow,
    JsonObject, Page, Paginator,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REGISTRY: &str = r"
pagination:
  ListTables:
    input_token: ExclusiveStartTableName
    output_token: LastEvaluatedTableName
  ListObjects:
    input_token: Marker
    output_token: NextMarker
    more_results: IsTruncated
  DescribeLimits:
    output_token: null
";

fn registry_file() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paginators.yaml");
    std::fs::write(&path, REGISTRY).unwrap();
    (dir, path)
}

async fn mount_list_tables(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/tables"))
        .and(query_param("ExclusiveStartTableName", "b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "TableNames": [],
            "LastEvaluatedTableName": "b2"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tables"))
        .and(query_param("ExclusiveStartTableName", "b2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"TableNames": ["c"]})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tables"))
        .and(query_param_is_missing("ExclusiveStartTableName"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "TableNames": ["a", "b"],
            "LastEvaluatedTableName": "b"
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Registry + HTTP
// ============================================================================

#[tokio::test]
async fn test_registry_contract_drives_http_search() {
    let server = MockServer::start().await;
    mount_list_tables(&server).await;

    let (_dir, path) = registry_file();
    let registry = load_registry(&path).unwrap();
    let contract = resolve_contract("ListTables", &ContractDefinition::new(), &registry);

    let source = HttpPageSource::new(&format!("{}/tables", server.uri())).unwrap();
    let names: Vec<Value> = AsyncPaginator::new(source, contract, JsonObject::new())
        .search("TableNames", None)
        .map(|item| item.unwrap())
        .collect()
        .await;

    assert_eq!(names, vec![json!("a"), json!("b"), json!("c")]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_limit_avoids_extra_requests() {
    let server = MockServer::start().await;
    mount_list_tables(&server).await;

    let contract = ContractDefinition::new()
        .input_token("ExclusiveStartTableName")
        .output_token("LastEvaluatedTableName")
        .resolve();
    let source = HttpPageSource::new(&format!("{}/tables", server.uri())).unwrap();
    let names: Vec<Value> = AsyncPaginator::new(source, contract, JsonObject::new())
        .search("TableNames", Some(2))
        .map(|item| item.unwrap())
        .collect()
        .await;

    assert_eq!(names, vec![json!("a"), json!("b")]);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_flagged_contract_over_post() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/objects"))
        .and(body_json(json!({"Bucket": "logs", "Marker": "k1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "IsTruncated": false,
            "NextMarker": "ignored",
            "Contents": [{"Key": "k2"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/objects"))
        .and(body_json(json!({"Bucket": "logs"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "IsTruncated": true,
            "NextMarker": "k1",
            "Contents": [{"Key": "k0"}, {"Key": "k1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, path) = registry_file();
    let registry = load_registry(&path).unwrap();
    let contract = resolve_contract("ListObjects", &ContractDefinition::new(), &registry);

    let source = HttpPageSource::with_config(
        HttpSourceConfig::builder(format!("{}/objects", server.uri()))
            .method(HttpMethod::Post)
            .build(),
    )
    .unwrap();
    let mut params = JsonObject::new();
    params.insert("Bucket".to_string(), json!("logs"));

    let mut paginator = AsyncPaginator::new(source, contract, params);
    let mut keys = Vec::new();
    let last = paginator
        .for_each(|page| {
            for item in page.get("Contents").and_then(Value::as_array).into_iter().flatten() {
                keys.push(item["Key"].clone());
            }
            Ok(())
        })
        .await
        .unwrap();

    assert_eq!(keys, vec![json!("k0"), json!("k1"), json!("k2")]);
    assert_eq!(last.get("IsTruncated"), Some(&json!(false)));
    assert!(paginator.is_terminal());
}

#[tokio::test]
async fn test_disabled_operation_fetches_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "TableCount": 3,
            "NextToken": "would-loop"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, path) = registry_file();
    let registry = load_registry(&path).unwrap();
    let overrides = ContractDefinition::new().input_token("NextToken");
    let contract = resolve_contract("DescribeLimits", &overrides, &registry);
    assert!(contract.is_disabled());

    let source = HttpPageSource::new(&server.uri()).unwrap();
    let pages: Vec<_> = AsyncPaginator::new(source, contract, JsonObject::new())
        .into_stream()
        .collect()
        .await;
    assert_eq!(pages.len(), 1);
}

#[tokio::test]
async fn test_callback_stop_skips_remaining_pages() {
    let server = MockServer::start().await;
    mount_list_tables(&server).await;

    let contract = ContractDefinition::new()
        .input_token("ExclusiveStartTableName")
        .output_token("LastEvaluatedTableName")
        .resolve();
    let source = HttpPageSource::new(&format!("{}/tables", server.uri())).unwrap();
    let mut paginator = AsyncPaginator::new(source, contract, JsonObject::new());

    let stopped_at = paginator
        .each(|page: Page| async move {
            let empty = page
                .get("TableNames")
                .and_then(Value::as_array)
                .is_some_and(Vec::is_empty);
            Ok::<_, pagechain::Error>(if empty { Flow::Stop } else { Flow::Continue })
        })
        .await
        .unwrap();

    assert_eq!(stopped_at.get("LastEvaluatedTableName"), Some(&json!("b2")));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_http_failure_mid_traversal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("NextToken", "t1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("InternalError"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"NextToken": "t1"})))
        .mount(&server)
        .await;

    let contract = ContractDefinition::new()
        .input_token("NextToken")
        .output_token("NextToken")
        .resolve();
    let source = HttpPageSource::new(&server.uri()).unwrap();
    let mut paginator = AsyncPaginator::new(source, contract, JsonObject::new());

    let mut seen = 0;
    let err = paginator
        .for_each(|_page| {
            seen += 1;
            Ok(())
        })
        .await
        .unwrap_err();

    assert_eq!(seen, 1);
    assert_eq!(err.kind(), ErrorKind::Source);
    assert_eq!(err.to_string(), "HTTP 500: InternalError");
    assert!(paginator.next_page().await.unwrap().is_none());
}

// ============================================================================
// Blocking traversal with a closure source
// ============================================================================

#[test]
fn test_blocking_traversal_with_closure_source() {
    let mut requests: Vec<JsonObject> = Vec::new();
    let source = from_fn(|params: &JsonObject| {
        requests.push(params.clone());
        let body = match params.get("page").and_then(Value::as_u64) {
            None => json!({"items": [1, 2], "next": 2}),
            Some(2) => json!({"items": [3], "next": 3}),
            Some(_) => json!({"items": [4]}),
        };
        Page::from_value(body)
    });

    let contract = ContractDefinition::new()
        .input_token("page")
        .output_token("next")
        .resolve();
    let items: Vec<Value> = Paginator::new(source, contract, JsonObject::new())
        .search("items[*]", None)
        .collect::<pagechain::Result<_>>()
        .unwrap();

    assert_eq!(items, vec![json!(1), json!(2), json!(3), json!(4)]);
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[2].get("page"), Some(&json!(3)));
}
