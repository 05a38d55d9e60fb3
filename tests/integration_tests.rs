//! Integration tests using mock HTTP server
//!
//! Tests the full flow: typed query → HTTP request → decoded page → next page

use call_logs::call_logs::{AccountCallLogQuery, CallLogsClient, PathType, UserCallLogQuery};
use call_logs::cli::{Cli, Runner, RunSummary};
use call_logs::http::{HttpClient, HttpClientConfig};
use call_logs::{DateRange, Error};
use chrono::NaiveDate;
use clap::Parser;
use futures::future::join_all;
use serde_json::json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CallLogsClient<HttpClient> {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .header("Authorization", "Bearer test-token")
        .build();
    CallLogsClient::from_config(config).unwrap()
}

async fn mount_user_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/phone/users/me/call_logs"))
        .and(query_param_is_missing("next_page_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_records": 3,
            "next_page_token": "page-2",
            "call_logs": [{"id": "1"}, {"id": "2"}]
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/phone/users/me/call_logs"))
        .and(query_param("next_page_token", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_records": 3,
            "next_page_token": "",
            "call_logs": [{"id": "3"}]
        })))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Client Integration Tests
// ============================================================================

#[tokio::test]
async fn test_caller_driven_pagination() {
    let mock_server = MockServer::start().await;
    mount_user_pages(&mock_server).await;

    let client = client_for(&mock_server);
    let mut query = UserCallLogQuery::new("me").unwrap().try_page_size(2).unwrap();
    let mut ids = Vec::new();

    loop {
        let page = client.get_for_user(&query).await.unwrap();
        assert_eq!(page.total_records, Some(3));
        ids.extend(page.items.iter().map(|log| log.id.clone()));
        match page.next_page_token {
            Some(token) => query = query.page_token(Some(token)),
            None => break,
        }
    }

    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_account_query_wire_format() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/phone/call_logs"))
        .and(query_param("from", "2024-02-01"))
        .and(query_param("to", "2024-02-29"))
        .and(query_param("path", "callQueue"))
        .and(query_param("time_type", "startTime"))
        .and(query_param("charged_call_logs", "false"))
        .and(query_param("page_size", "30"))
        .and(query_param_is_missing("type"))
        .and(query_param_is_missing("site_id"))
        .and(query_param_is_missing("next_page_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "call_logs": [{"id": "q1", "path": "callQueue", "duration": 61}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = AccountCallLogQuery::new()
        .dates(DateRange::between(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        ))
        .path(PathType::CallQueue);

    let page = client.get_for_account(&query).await.unwrap();
    assert_eq!(page.items[0].duration, Some(61));
    assert!(!page.has_more());
}

#[tokio::test]
async fn test_http_error_surfaces_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/phone/users/ghost/call_logs"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"code":1001,"message":"User not exist"}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_for_user(&UserCallLogQuery::new("ghost").unwrap())
        .await
        .unwrap_err();

    match err {
        Error::RequestFailed { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("User not exist"));
        }
        other => panic!("Expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_parallel_users_get_their_own_pages() {
    let mock_server = MockServer::start().await;

    for i in 0..5 {
        Mock::given(method("GET"))
            .and(path(format!("/phone/users/user-{i}/call_logs")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(50 - i * 10))
                    .set_body_json(json!({"call_logs": [{"id": format!("log-of-{i}")}]})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server);
    let queries: Vec<_> = (0..5)
        .map(|i| UserCallLogQuery::new(format!("user-{i}")).unwrap())
        .collect();

    let pages = join_all(queries.iter().map(|q| client.get_for_user(q))).await;

    for (i, page) in pages.into_iter().enumerate() {
        assert_eq!(page.unwrap().items[0].id, format!("log-of-{i}"));
    }
}

#[tokio::test]
async fn test_cancel_in_flight_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/phone/call_logs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({"call_logs": []})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let err = client
        .get_for_account_cancellable(&AccountCallLogQuery::new(), &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(5));
}

// ============================================================================
// CLI Integration Tests
// ============================================================================

#[tokio::test]
async fn test_runner_follows_all_pages() {
    let mock_server = MockServer::start().await;
    mount_user_pages(&mock_server).await;

    let uri = mock_server.uri();
    let cli = Cli::parse_from([
        "call-logs",
        "--base-url",
        uri.as_str(),
        "user",
        "me",
        "--page-size",
        "2",
        "--all",
    ]);
    let summary = Runner::new(cli).run().await.unwrap();

    assert_eq!(
        summary,
        RunSummary {
            pages: 2,
            records: 3
        }
    );
}

#[tokio::test]
async fn test_runner_single_page_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/phone/users/me/call_logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next_page_token": "page-2",
            "call_logs": [{"id": "1"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let cli = Cli::parse_from(["call-logs", "--base-url", uri.as_str(), "user", "me"]);
    let summary = Runner::new(cli).run().await.unwrap();
    assert_eq!(summary.pages, 1);
}

#[tokio::test]
async fn test_runner_rejects_page_size_before_any_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"call_logs": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let cli = Cli::parse_from([
        "call-logs",
        "--base-url",
        uri.as_str(),
        "account",
        "--page-size",
        "301",
    ]);
    let err = Runner::new(cli).run().await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_runner_cancelled_before_start() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"call_logs": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let cli = Cli::parse_from(["call-logs", "--base-url", uri.as_str(), "account"]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = Runner::with_cancellation(cli, cancel).run().await.unwrap_err();
    assert!(err.is_cancelled());
}
