//! End-to-end tests against a fake ODPT server on a local port.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode, Uri, header};
use kitaayase_worker::cache::{CacheConfig, EdgeCache};
use kitaayase_worker::odpt::{OdptClient, OdptConfig, OdptError};
use kitaayase_worker::web::{AppState, create_router};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tower::ServiceExt;

const SUSPENDED: &str = r#"[{
    "@type": "odpt:TrainInformation",
    "dc:date": "2025-03-01T07:40:00+09:00",
    "odpt:railway": "odpt.Railway:TokyoMetro.Chiyoda",
    "odpt:trainInformationStatus": {"ja": "運転見合わせ", "en": "Suspended"},
    "odpt:trainInformationText": {"ja": "人身事故の影響で、全線で運転を見合わせています。"}
}]"#;

/// What the fake upstream saw.
#[derive(Debug, Clone)]
struct SeenRequest {
    uri: String,
    accept: Option<String>,
    user_agent: Option<String>,
}

#[derive(Clone, Default)]
struct Seen(Arc<Mutex<Vec<SeenRequest>>>);

impl Seen {
    fn requests(&self) -> Vec<SeenRequest> {
        self.0.lock().unwrap().clone()
    }
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn spawn_upstream(status: StatusCode, body: &'static str) -> (String, Seen) {
    let seen = Seen::default();

    let app = Router::new()
        .fallback(
            move |State(seen): State<Seen>, uri: Uri, headers: HeaderMap| async move {
                seen.0.lock().unwrap().push(SeenRequest {
                    uri: uri.to_string(),
                    accept: header_str(&headers, header::ACCEPT),
                    user_agent: header_str(&headers, header::USER_AGENT),
                });
                (status, body)
            },
        )
        .with_state(seen.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), seen)
}

fn worker(base_url: &str) -> Router {
    let client = OdptClient::new(OdptConfig::new("test-key").with_base_url(base_url)).unwrap();
    create_router(AppState::new(EdgeCache::new(&CacheConfig::default()), client))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    let request = Request::builder()
        .uri(uri)
        .header(header::HOST, "worker.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn client_sends_fixed_query_and_headers() {
    let (base_url, seen) = spawn_upstream(StatusCode::OK, "[]").await;
    let client = OdptClient::new(OdptConfig::new("test-key").with_base_url(&base_url)).unwrap();

    let body = client.fetch_train_information().await.unwrap();
    assert_eq!(body, "[]");

    let requests = seen.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].uri,
        "/odpt:TrainInformation?odpt:railway=odpt.Railway:TokyoMetro.Chiyoda&acl:consumerKey=test-key"
    );
    assert_eq!(requests[0].accept.as_deref(), Some("application/json"));
    assert_eq!(
        requests[0].user_agent.as_deref(),
        Some("kitaayase-worker/1.0")
    );
}

#[tokio::test]
async fn client_reports_status_and_body() {
    let (base_url, _) = spawn_upstream(StatusCode::SERVICE_UNAVAILABLE, "rate limited").await;
    let client = OdptClient::new(OdptConfig::new("test-key").with_base_url(&base_url)).unwrap();

    let err = client.fetch_train_information().await.unwrap_err();
    match err {
        OdptError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn status_is_normalized_and_cached() {
    let (base_url, seen) = spawn_upstream(StatusCode::OK, SUSPENDED).await;
    let app = worker(&base_url);

    let (status, headers, first) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=30");

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "railway": "chiyoda",
            "state": "suspended",
            "text": "人身事故の影響で、全線で運転を見合わせています。",
            "updatedAt": "2025-03-01T07:40:00+09:00",
        })
    );

    let (_, _, second) = get(&app, "/").await;
    assert_eq!(first, second);
    assert_eq!(seen.requests().len(), 1);
}

#[tokio::test]
async fn upstream_error_is_never_cached() {
    let (base_url, seen) = spawn_upstream(StatusCode::SERVICE_UNAVAILABLE, "rate limited").await;
    let app = worker(&base_url);

    for _ in 0..3 {
        let (status, _, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "error": "Tokyo Metro API error",
                "status": 503,
                "body": "rate limited",
            })
        );
    }

    assert_eq!(seen.requests().len(), 3);
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = worker(&format!("http://{addr}"));
    let (status, _, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["error"], "Tokyo Metro API unreachable");
    assert!(!body.contains("test-key"));
}

/// Answers 200 with a `Content-Length` longer than the bytes it sends, then
/// closes the connection.
async fn spawn_truncating_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let _ = socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n[{\"dc:da")
            .await;
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn truncated_body_is_a_transport_error() {
    let base_url = spawn_truncating_upstream().await;
    let client = OdptClient::new(OdptConfig::new("test-key").with_base_url(&base_url)).unwrap();

    let err = client.fetch_train_information().await.unwrap_err();
    assert!(matches!(err, OdptError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn truncated_body_is_bad_gateway_and_not_cached() {
    let base_url = spawn_truncating_upstream().await;
    let app = worker(&base_url);

    let (status, headers, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(headers.get(header::CACHE_CONTROL).is_none());
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["error"], "Tokyo Metro API unreachable");
    assert!(!body.contains("test-key"));
}
