//! Controller behavior against fake storage, network, and host runtime.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::StatusCode;

use shell_cache::{CacheStore, MemoryStore};
use shell_core::{FetchRequest, FetchResponse, LifecycleState, ResponseKind, WorkerConfig};
use shell_worker::{
    header_names, CacheController, ControlMessage, FetchOutcome, HostRuntime, Network,
    NetworkError, WorkerError,
};

const ORIGIN: &str = "https://app.example";

/// Scripted network: URL -> response, with an offline switch and a call
/// counter.
#[derive(Default)]
struct FakeNetwork {
    routes: Mutex<HashMap<String, FetchResponse>>,
    offline: AtomicBool,
    calls: AtomicUsize,
}

impl FakeNetwork {
    fn route(&self, url: &str, response: FetchResponse) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Network for FakeNetwork {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, NetworkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.offline.load(Ordering::SeqCst) {
            return Err(NetworkError::Offline);
        }

        Ok(self
            .routes
            .lock()
            .unwrap()
            .get(request.url.as_str())
            .cloned()
            .unwrap_or_else(|| {
                FetchResponse::ok("not found").with_status(StatusCode::NOT_FOUND)
            }))
    }
}

/// Host runtime fake recording skip-waiting and claim invocations.
#[derive(Default)]
struct FakeHost {
    skip_waiting_calls: AtomicUsize,
    claim_calls: AtomicUsize,
}

impl FakeHost {
    fn skip_waiting_calls(&self) -> usize {
        self.skip_waiting_calls.load(Ordering::SeqCst)
    }

    fn claim_calls(&self) -> usize {
        self.claim_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostRuntime for FakeHost {
    async fn skip_waiting(&self) {
        self.skip_waiting_calls.fetch_add(1, Ordering::SeqCst);
    }

    async fn claim_clients(&self) {
        self.claim_calls.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    store: Arc<MemoryStore>,
    network: Arc<FakeNetwork>,
    host: Arc<FakeHost>,
    controller: CacheController,
}

fn shell_body(path: &str) -> String {
    format!("<html>shell {path}</html>")
}

fn harness_with(config: WorkerConfig) -> Harness {
    let network = Arc::new(FakeNetwork::default());
    for path in config.app_shell.iter() {
        network.route(
            config.resolve(path).unwrap().as_str(),
            FetchResponse::ok(shell_body(path)).with_header("content-type", "text/html"),
        );
    }
    for path in config.static_assets.iter() {
        network.route(
            config.resolve(path).unwrap().as_str(),
            FetchResponse::ok(format!("asset {path}")),
        );
    }

    let store = Arc::new(MemoryStore::new());
    let host = Arc::new(FakeHost::default());
    let controller = CacheController::new(
        config,
        store.clone() as Arc<dyn CacheStore>,
        network.clone(),
        host.clone(),
    );

    Harness {
        store,
        network,
        host,
        controller,
    }
}

fn harness() -> Harness {
    harness_with(WorkerConfig::for_version("v1").with_origin(ORIGIN))
}

async fn installed() -> Harness {
    let h = harness();
    h.controller.on_install().await.unwrap();
    h.controller.on_activate().await.unwrap();
    h
}

/// Let fire-and-forget cache writes run to completion.
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

fn url(path: &str) -> String {
    format!("{ORIGIN}{path}")
}

#[tokio::test]
async fn test_install_precaches_both_manifests() {
    let h = harness();
    h.controller.on_install().await.unwrap();

    assert_eq!(h.store.entry_count("app-shell-v1").await.unwrap(), 6);
    assert_eq!(h.store.entry_count("static-assets-v1").await.unwrap(), 3);
    assert_eq!(h.store.entry_count("api-cache-v1").await.unwrap(), 0);

    let names = h.store.partition_names().await.unwrap();
    assert_eq!(
        names,
        vec!["api-cache-v1", "app-shell-v1", "static-assets-v1"]
    );
}

#[tokio::test]
async fn test_fresh_install_with_small_manifest() {
    // Scenario A: manifest ["/", "/manifest.json"].
    let config = WorkerConfig::for_version("v1")
        .with_origin(ORIGIN)
        .with_app_shell(vec!["/", "/manifest.json"])
        .with_static_assets(vec![]);
    let h = harness_with(config);

    h.controller.on_install().await.unwrap();

    assert_eq!(h.store.entry_count("app-shell-v1").await.unwrap(), 2);
    let key = FetchRequest::get(url("/manifest.json")).unwrap().cache_key();
    assert!(h.store.lookup("app-shell-v1", &key).await.unwrap().is_some());
}

#[tokio::test]
async fn test_install_signals_eager_activation() {
    let h = harness();
    h.controller.on_install().await.unwrap();

    assert_eq!(h.host.skip_waiting_calls(), 1);
    assert_eq!(h.controller.state(), LifecycleState::Waiting);
}

#[tokio::test]
async fn test_install_is_all_or_nothing() {
    let h = harness();
    // One manifest URL now 404s; the whole install must fail.
    h.network.route(
        &url("/offline.html"),
        FetchResponse::ok("gone").with_status(StatusCode::NOT_FOUND),
    );

    let err = h.controller.on_install().await.unwrap_err();
    assert!(matches!(err, WorkerError::Install { .. }));
    assert_eq!(h.controller.state(), LifecycleState::Redundant);
    assert_eq!(h.host.skip_waiting_calls(), 0);
}

#[tokio::test]
async fn test_activation_prunes_stale_partitions_and_claims() {
    // Scenario D: v1 partitions present, current version is v2.
    let stale_key = FetchRequest::get(url("/")).unwrap().cache_key();
    let config = WorkerConfig::for_version("v2").with_origin(ORIGIN);
    let h = harness_with(config);
    h.store
        .put("app-shell-v1", &stale_key, FetchResponse::ok("old"))
        .await
        .unwrap();
    h.store
        .put("static-assets-v1", &stale_key, FetchResponse::ok("old"))
        .await
        .unwrap();

    h.controller.on_install().await.unwrap();
    h.controller.on_activate().await.unwrap();

    let names = h.store.partition_names().await.unwrap();
    assert!(!names.contains(&"app-shell-v1".to_string()));
    assert!(!names.contains(&"static-assets-v1".to_string()));
    assert!(names.contains(&"app-shell-v2".to_string()));
    assert_eq!(h.host.claim_calls(), 1);
    assert_eq!(h.controller.state(), LifecycleState::Active);
}

#[tokio::test]
async fn test_warm_asset_served_without_network() {
    let h = installed().await;
    let calls_before = h.network.calls();

    let req = FetchRequest::get(url("/favicon.ico")).unwrap();
    let response = h.controller.on_fetch(&req).await.into_response().unwrap();

    assert_eq!(response.body.as_ref(), b"asset /favicon.ico");
    assert_eq!(h.network.calls(), calls_before);
}

#[tokio::test]
async fn test_offline_navigation_serves_cached_document() {
    // Scenario B: /admin cached at install, network gone, fetched again.
    let h = installed().await;
    h.network.set_offline(true);

    let req = FetchRequest::navigation(url("/admin")).unwrap();
    let response = h.controller.on_fetch(&req).await.into_response().unwrap();

    let expected =
        FetchResponse::ok(shell_body("/admin")).with_header("content-type", "text/html");
    assert_eq!(response, expected);
}

#[tokio::test]
async fn test_offline_uncached_navigation_degrades_to_shell() {
    // Scenario C, navigation half: the cached root document stands in.
    let h = installed().await;
    h.network.set_offline(true);

    let req = FetchRequest::navigation(url("/reportes/2026")).unwrap();
    let response = h.controller.on_fetch(&req).await.into_response().unwrap();

    assert_eq!(response.body.as_ref(), shell_body("/").as_bytes());
}

#[tokio::test]
async fn test_offline_uncached_subresource_fails() {
    // Scenario C, fetch() half: the failure propagates.
    let h = installed().await;
    h.network.set_offline(true);

    let req = FetchRequest::get(url("/report.csv")).unwrap();
    match h.controller.on_fetch(&req).await {
        FetchOutcome::Failed(err) => assert_eq!(err, NetworkError::Offline),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_offline_uncached_asset_gets_synthetic_503() {
    let h = installed().await;
    h.network.set_offline(true);

    let req = FetchRequest::get(url("/static/late-chunk.js")).unwrap();
    let response = h.controller.on_fetch(&req).await.into_response().unwrap();

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.headers.get("content-type").unwrap(),
        "text/plain"
    );
}

#[tokio::test]
async fn test_non_http_scheme_passes_through() {
    let h = installed().await;

    let req = FetchRequest::get("chrome-extension://abcdef/popup.js").unwrap();
    assert!(h.controller.on_fetch(&req).await.is_passthrough());
    assert_eq!(h.network.calls(), 9); // only the install fetches
}

#[tokio::test]
async fn test_non_get_passes_through() {
    let h = installed().await;

    let mut req = FetchRequest::get(url("/api/territorios")).unwrap();
    req.method = http::Method::POST;
    assert!(h.controller.on_fetch(&req).await.is_passthrough());
}

#[tokio::test]
async fn test_fetch_before_activation_passes_through() {
    let h = harness();
    h.controller.on_install().await.unwrap();

    let req = FetchRequest::get(url("/favicon.ico")).unwrap();
    assert!(h.controller.on_fetch(&req).await.is_passthrough());
}

#[tokio::test]
async fn test_cache_first_miss_stores_into_static_partition() {
    let h = installed().await;
    h.network
        .route(&url("/static/app-abc123.js"), FetchResponse::ok("chunk"));

    let req = FetchRequest::get(url("/static/app-abc123.js")).unwrap();
    let response = h.controller.on_fetch(&req).await.into_response().unwrap();
    assert_eq!(response.body.as_ref(), b"chunk");
    settle().await;

    assert_eq!(h.store.entry_count("static-assets-v1").await.unwrap(), 4);

    // Second request is a pure cache hit.
    let calls = h.network.calls();
    let again = h.controller.on_fetch(&req).await.into_response().unwrap();
    assert_eq!(again.body, response.body);
    assert_eq!(h.network.calls(), calls);
}

#[tokio::test]
async fn test_network_first_success_stores_into_primary_partition() {
    let h = installed().await;
    h.network.route(
        &url("/api/territorios"),
        FetchResponse::ok(r#"{"territorios":[]}"#),
    );

    let before = h.store.entry_count("app-shell-v1").await.unwrap();
    let req = FetchRequest::get(url("/api/territorios")).unwrap();
    h.controller.on_fetch(&req).await.into_response().unwrap();
    settle().await;

    assert_eq!(h.store.entry_count("app-shell-v1").await.unwrap(), before + 1);

    // The stored copy now answers while offline.
    h.network.set_offline(true);
    let offline = h.controller.on_fetch(&req).await.into_response().unwrap();
    assert_eq!(offline.body.as_ref(), br#"{"territorios":[]}"#);
}

#[tokio::test]
async fn test_non_cacheable_responses_are_never_stored() {
    let h = installed().await;
    h.network.route(
        &url("/api/missing"),
        FetchResponse::ok("nope").with_status(StatusCode::NOT_FOUND),
    );
    h.network.route(
        &url("/api/cors"),
        FetchResponse::ok("cors").with_kind(ResponseKind::Cors),
    );
    h.network.route(
        &url("/static/opaque.js"),
        FetchResponse::ok("opaque").with_kind(ResponseKind::Opaque),
    );

    let counts_before = (
        h.store.entry_count("app-shell-v1").await.unwrap(),
        h.store.entry_count("static-assets-v1").await.unwrap(),
        h.store.entry_count("api-cache-v1").await.unwrap(),
    );

    for path in ["/api/missing", "/api/cors", "/static/opaque.js"] {
        let req = FetchRequest::get(url(path)).unwrap();
        // The live response is still delivered unmodified.
        assert!(h.controller.on_fetch(&req).await.into_response().is_some());
    }
    settle().await;

    let counts_after = (
        h.store.entry_count("app-shell-v1").await.unwrap(),
        h.store.entry_count("static-assets-v1").await.unwrap(),
        h.store.entry_count("api-cache-v1").await.unwrap(),
    );
    assert_eq!(counts_before, counts_after);
}

#[tokio::test]
async fn test_cached_reads_are_idempotent() {
    let h = installed().await;
    h.network.set_offline(true);

    let req = FetchRequest::get(url("/icon-192.png")).unwrap();
    let first = h.controller.on_fetch(&req).await.into_response().unwrap();
    let second = h.controller.on_fetch(&req).await.into_response().unwrap();

    assert_eq!(first.body, second.body);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_skip_waiting_message_collapses_waiting() {
    let h = harness();
    h.controller.on_install().await.unwrap();
    assert_eq!(h.host.skip_waiting_calls(), 1);

    h.controller.on_message(ControlMessage::SkipWaiting).await;
    assert_eq!(h.host.skip_waiting_calls(), 2);

    // Unknown messages are ignored.
    h.controller.on_message(ControlMessage::Unknown).await;
    assert_eq!(h.host.skip_waiting_calls(), 2);

    // Once active, skip-waiting is a no-op.
    h.controller.on_activate().await.unwrap();
    h.controller.on_message(ControlMessage::SkipWaiting).await;
    assert_eq!(h.host.skip_waiting_calls(), 2);
}

#[tokio::test]
async fn test_debug_headers_report_resolution() {
    let mut config = WorkerConfig::for_version("v1").with_origin(ORIGIN);
    config.debug_headers = true;
    let h = harness_with(config);
    h.controller.on_install().await.unwrap();
    h.controller.on_activate().await.unwrap();
    h.network.set_offline(true);

    let req = FetchRequest::navigation(url("/admin")).unwrap();
    let hit = h.controller.on_fetch(&req).await.into_response().unwrap();
    assert_eq!(hit.headers.get(header_names::X_CACHE_STATUS).unwrap(), "HIT");

    let req = FetchRequest::navigation(url("/nunca-visto")).unwrap();
    let fallback = h.controller.on_fetch(&req).await.into_response().unwrap();
    assert_eq!(
        fallback.headers.get(header_names::X_CACHE_STATUS).unwrap(),
        "FALLBACK"
    );
}
