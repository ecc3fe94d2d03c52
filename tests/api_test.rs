// Router-level tests for the status page and stats API.
//
// A stub `MetricsSource` stands in for the host so responses are
// deterministic. The live collector is run once against this host and
// once against a path that cannot exist.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use webui_status::config::Config;
use webui_status::models::SystemStats;
use webui_status::state::AppState;
use webui_status::system_monitor::{
    CollectError, MetricsSource, SysinfoCollector, SystemSnapshot, Usage,
};

const GIB: u64 = 1024 * 1024 * 1024;

struct FixedSource(SystemSnapshot);

impl MetricsSource for FixedSource {
    fn collect(&self) -> Result<SystemSnapshot, CollectError> {
        Ok(self.0.clone())
    }
}

struct FailingSource;

impl MetricsSource for FailingSource {
    fn collect(&self) -> Result<SystemSnapshot, CollectError> {
        Err(CollectError::NoDisk("/".into()))
    }
}

fn snapshot() -> SystemSnapshot {
    SystemSnapshot {
        platform: "Linux-6.8.0-31-generic-x86_64".to_string(),
        cpu_percent: 7.5,
        memory: Usage {
            total_bytes: 16 * GIB,
            used_bytes: 4 * GIB,
            percent: 25.0,
        },
        disk: Usage {
            total_bytes: 512 * GIB,
            used_bytes: 128 * GIB,
            percent: 25.0,
        },
    }
}

fn app(state: AppState) -> axum::Router {
    webui_status::create_router(state)
}

fn stub_app() -> axum::Router {
    app(AppState::with_source(Config::default(), FixedSource(snapshot())))
}

async fn get(router: axum::Router, uri: &str) -> axum::response::Response {
    router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn content_type(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

// ═══════════════════════════════════════════════════════════════════════════
//  GET /
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn index_returns_html() {
    let response = get(stub_app(), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("text/html"));

    let page = body_text(response).await;
    assert!(page.contains("<h1>Kali Linux GUI</h1>"));
    assert!(page.contains("Memory Used: 4.00 GB / 16.00 GB (25.0%)"));
    assert!(page.contains("Disk Used: 128.00 GB / 512.00 GB (25.0%)"));
}

#[tokio::test]
async fn index_shows_configured_rdp_port() {
    let config = Config {
        webui_port: 5000,
        rdp_port: 33890,
    };
    let response = get(app(AppState::with_source(config, FixedSource(snapshot()))), "/").await;

    let page = body_text(response).await;
    assert!(page.contains("<p>RDP port: 33890</p>"));
    assert!(page.contains("<p>Web UI port: 5000</p>"));
}

// ═══════════════════════════════════════════════════════════════════════════
//  GET /api/stats
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn stats_returns_json_contract() {
    let response = get(stub_app(), "/api/stats").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("application/json"));

    let json = body_json(response).await;
    assert_eq!(json["platform"], "Linux-6.8.0-31-generic-x86_64");
    assert_eq!(json["cpu_percent"], 7.5);
    assert_eq!(json["memory"]["total"], "16.00 GB");
    assert_eq!(json["memory"]["used"], "4.00 GB");
    assert_eq!(json["memory"]["percent"], 25.0);
    assert_eq!(json["disk"]["total"], "512.00 GB");
    assert_eq!(json["disk"]["used"], "128.00 GB");
    assert!(json["disk"]["percent"].is_number());

    let stats: SystemStats = serde_json::from_value(json).expect("body should match SystemStats");
    assert_eq!(stats.disk.percent, 25.0);
}

#[tokio::test]
async fn stats_used_never_exceeds_total() {
    let json = body_json(get(stub_app(), "/api/stats").await).await;

    for section in ["memory", "disk"] {
        let total = parse_formatted(json[section]["total"].as_str().unwrap());
        let used = parse_formatted(json[section]["used"].as_str().unwrap());
        assert!(used <= total, "{section}: {used} > {total}");
    }
}

/// Turn `"4.00 GB"` back into an approximate byte count.
fn parse_formatted(s: &str) -> f64 {
    let (value, unit) = s.split_once(' ').unwrap();
    let power = ["B", "KB", "MB", "GB", "TB", "PB"]
        .iter()
        .position(|u| *u == unit)
        .unwrap();
    value.parse::<f64>().unwrap() * 1024f64.powi(power as i32)
}

// ═══════════════════════════════════════════════════════════════════════════
//  Failure
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn both_routes_fail_together_when_collection_fails() {
    for uri in ["/", "/api/stats"] {
        let router = app(AppState::with_source(Config::default(), FailingSource));
        let response = get(router, uri).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "COLLECTION_FAILED");
    }
}

#[tokio::test]
async fn unreadable_disk_path_fails_both_routes() {
    let collector = SysinfoCollector::new("/no/such/mount/point", Duration::ZERO);
    for uri in ["/", "/api/stats"] {
        let router = app(AppState::with_source(Config::default(), collector.clone()));
        let response = get(router, uri).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
    }
}

#[tokio::test]
async fn live_host_serves_both_routes() {
    for uri in ["/", "/api/stats"] {
        let response = get(app(AppState::new(Config::default())), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }

    let response = get(app(AppState::new(Config::default())), "/api/stats").await;
    let stats: SystemStats = serde_json::from_value(body_json(response).await).unwrap();
    assert!(!stats.platform.is_empty());
    for usage in [&stats.memory, &stats.disk] {
        assert!(parse_formatted(&usage.used) <= parse_formatted(&usage.total));
        assert!((0.0..=100.0).contains(&usage.percent));
    }
}

#[tokio::test]
async fn nonexistent_route_returns_404() {
    let response = get(stub_app(), "/api/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
