//! End-to-end tests against a live listener on an ephemeral port.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use hubstat_core::error::Result;
use hubstat_core::protocol::{LogLevel, Message, StateTopic, Topic};
use hubstat_core::services::{ClusterRegistry, Logger};
use hubstat_core::{HubStatError, Monitoring};
use hubstat_exporter::config::MonitoringOptions;
use hubstat_exporter::registry::{InMemoryStateRegistries, StaticCluster};
use hubstat_exporter::{HttpMonitoring, ListenerState, MonitoringServices};

#[derive(Default)]
struct CapturingLogger {
    lines: Mutex<Vec<(LogLevel, String, String)>>,
}

impl Logger for CapturingLogger {
    fn log(&self, level: LogLevel, event: &str, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((level, event.to_string(), message.to_string()));
    }
}

/// Cluster registry that can be switched offline.
struct FlakyCluster {
    down: AtomicBool,
}

impl ClusterRegistry for FlakyCluster {
    fn members(&self) -> Result<Vec<String>> {
        if self.down.load(Ordering::SeqCst) {
            return Err(HubStatError::Unavailable("cluster registry offline".into()));
        }
        Ok(vec!["node-a".into(), "node-b".into(), "node-c".into()])
    }
}

/// Cluster registry whose first lookup panics.
struct PanickingCluster {
    panic_once: AtomicBool,
}

impl ClusterRegistry for PanickingCluster {
    fn members(&self) -> Result<Vec<String>> {
        if self.panic_once.swap(false, Ordering::SeqCst) {
            panic!("cluster registry blew up");
        }
        Ok(vec!["node-a".into(), "node-b".into()])
    }
}

struct Harness {
    plugin: HttpMonitoring,
    states: Arc<InMemoryStateRegistries>,
    logger: Arc<CapturingLogger>,
    base_url: String,
    client: Client,
}

impl Harness {
    async fn start_with(cluster: Arc<dyn ClusterRegistry>) -> Self {
        let states = Arc::new(InMemoryStateRegistries::new());
        let logger = Arc::new(CapturingLogger::default());
        let services = MonitoringServices {
            logger: logger.clone(),
            cluster,
            states: states.clone(),
        };
        let mut plugin = HttpMonitoring::new(MonitoringOptions::new("127.0.0.1", 0), services);
        let addr = plugin.when_ready().await.expect("bind ephemeral port");

        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .unwrap();

        Self {
            plugin,
            states,
            logger,
            base_url: format!("http://{addr}"),
            client,
        }
    }

    async fn start() -> Self {
        Self::start_with(Arc::new(StaticCluster::single("node-a"))).await
    }

    async fn get_json(&self, path: &str) -> Value {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "application/json");
        resp.json().await.unwrap()
    }
}

#[tokio::test]
async fn get_returns_counters_then_resets_them() {
    let mut h = Harness::start().await;
    let hooks = h.plugin.monitoring();
    h.states.registry(StateTopic::RecordSubscriptions).add("users/1");
    h.states.registry(StateTopic::RecordSubscriptions).add("users/2");

    hooks.on_error_log(LogLevel::Error, "MESSAGE_PARSE_ERROR", "bad frame");
    hooks.on_message_received(&Message::new(Topic::Record, "READ"));
    hooks.on_message_received(&Message::new(Topic::Record, "READ"));
    hooks.on_message_sent(&Message::new(Topic::Record, "READ_RESPONSE"));
    hooks.on_broadcast(&Message::new(Topic::Event, "EMIT"), 5);
    for allowed in [true, true, false, true, false] {
        hooks.on_login(allowed, "ws");
    }

    let first = h.get_json("/").await;
    assert_eq!(
        first,
        json!({
            "clusterSize": 1,
            "stateMetrics": { "RECORD_SUBSCRIPTIONS": 2 },
            "errors": { "MESSAGE_PARSE_ERROR": 1 },
            "recieved": { "EVENT": { "EMIT": 5 }, "RECORD": { "READ": 2 } },
            "send": { "RECORD": { "READ_RESPONSE": 1 } },
            "logins": { "ws": { "allowed": 3, "declined": 2 } }
        })
    );

    let second = h.get_json("/").await;
    assert_eq!(second["clusterSize"], 1);
    assert_eq!(second["stateMetrics"], json!({ "RECORD_SUBSCRIPTIONS": 2 }));
    assert_eq!(second["errors"], json!({}));
    assert_eq!(second["recieved"], json!({}));
    assert_eq!(second["send"], json!({}));
    assert_eq!(second["logins"], json!({}));

    h.plugin.close().await.unwrap();
}

#[tokio::test]
async fn non_get_is_rejected_without_touching_counters() {
    let mut h = Harness::start().await;
    let hooks = h.plugin.monitoring();
    hooks.on_login(true, "http");

    for _ in 0..3 {
        let resp = h
            .client
            .post(format!("{}/", h.base_url))
            .body("{}")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.text().await.unwrap(), "Only get supported");
    }
    let resp = h
        .client
        .delete(format!("{}/stats", h.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let snap = h.get_json("/").await;
    assert_eq!(snap["logins"], json!({ "http": { "allowed": 1, "declined": 0 } }));

    h.plugin.close().await.unwrap();
}

#[tokio::test]
async fn every_path_is_the_same_endpoint() {
    let mut h = Harness::start().await;
    let hooks = h.plugin.monitoring();
    hooks.on_message_sent(&Message::new(Topic::Rpc, "REQUEST"));

    let snap = h.get_json("/some/nested/path?ignored=1").await;
    assert_eq!(snap["send"], json!({ "RPC": { "REQUEST": 1 } }));

    let snap = h.get_json("/metrics").await;
    assert_eq!(snap["send"], json!({}));

    h.plugin.close().await.unwrap();
}

#[tokio::test]
async fn collaborator_failure_fails_one_request_only() {
    let cluster = Arc::new(FlakyCluster { down: AtomicBool::new(true) });
    let mut h = Harness::start_with(cluster.clone()).await;
    let hooks = h.plugin.monitoring();
    hooks.on_message_received(&Message::new(Topic::Presence, "SUBSCRIBE"));

    let resp = h.client.get(h.base_url.clone()).send().await.unwrap();
    assert!(resp.status().is_server_error());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "UNAVAILABLE");

    cluster.down.store(false, Ordering::SeqCst);
    let snap = h.get_json("/").await;
    assert_eq!(snap["clusterSize"], 3);
    assert_eq!(snap["recieved"], json!({ "PRESENCE": { "SUBSCRIBE": 1 } }));

    h.plugin.close().await.unwrap();
}

#[tokio::test]
async fn panicking_collaborator_yields_500_and_listener_survives() {
    let cluster = Arc::new(PanickingCluster { panic_once: AtomicBool::new(true) });
    let mut h = Harness::start_with(cluster).await;
    let hooks = h.plugin.monitoring();
    hooks.on_login(false, "ws");

    let resp = h.client.get(h.base_url.clone()).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.headers()["content-type"], "application/json");
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "INTERNAL");

    // gauges are read before the drain, so the panic lost nothing
    let snap = h.get_json("/").await;
    assert_eq!(snap["clusterSize"], 2);
    assert_eq!(snap["logins"], json!({ "ws": { "allowed": 0, "declined": 1 } }));
    assert_eq!(h.plugin.state(), ListenerState::Listening);

    h.plugin.close().await.unwrap();
}

#[tokio::test]
async fn plugin_forwards_hooks_to_its_store() {
    let mut h = Harness::start().await;

    h.plugin.on_error_log(LogLevel::Warn, "ACK_TIMEOUT", "no ack");
    h.plugin.on_login(true, "http");
    h.plugin.on_message_received(&Message::new(Topic::Event, "SUBSCRIBE"));
    h.plugin.on_message_sent(&Message::new(Topic::Event, "SUBSCRIBE_ACK"));
    h.plugin.on_broadcast(&Message::new(Topic::Event, "EMIT"), 3);

    let snap = h.get_json("/").await;
    assert_eq!(snap["errors"], json!({ "ACK_TIMEOUT": 1 }));
    assert_eq!(snap["logins"], json!({ "http": { "allowed": 1, "declined": 0 } }));
    assert_eq!(snap["recieved"], json!({ "EVENT": { "EMIT": 3, "SUBSCRIBE": 1 } }));
    assert_eq!(snap["send"], json!({ "EVENT": { "SUBSCRIBE_ACK": 1 } }));

    h.plugin.close().await.unwrap();
}

#[tokio::test]
async fn bind_failure_is_fatal_and_logged_once() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = taken.local_addr().unwrap().port();

    let logger = Arc::new(CapturingLogger::default());
    let services = MonitoringServices {
        logger: logger.clone(),
        cluster: Arc::new(StaticCluster::single("node-a")),
        states: Arc::new(InMemoryStateRegistries::new()),
    };
    let mut plugin = HttpMonitoring::new(MonitoringOptions::new("127.0.0.1", port), services);

    let err = plugin.when_ready().await.expect_err("port is taken");
    assert_eq!(err.client_code().as_str(), "BIND_FAILED");
    assert_eq!(plugin.state(), ListenerState::Idle);

    let lines = logger.lines.lock().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0, LogLevel::Fatal);
    assert_eq!(lines[0].1, "PLUGIN_INITIALIZATION_ERROR");
    assert!(lines[0].2.starts_with("Error: "));
}

#[tokio::test]
async fn lifecycle_idle_listening_closed() {
    let mut h = Harness::start().await;
    assert_eq!(h.plugin.state(), ListenerState::Listening);
    assert!(h.plugin.local_addr().is_some());
    assert!(h.plugin.description().starts_with("HTTP Monitoring on 127.0.0.1:0 Version: "));

    let err = h.plugin.when_ready().await.expect_err("already listening");
    assert_eq!(err.client_code().as_str(), "INVALID_STATE");

    h.plugin.close().await.unwrap();
    assert_eq!(h.plugin.state(), ListenerState::Closed);
    assert!(h.plugin.local_addr().is_none());
    assert!(h.client.get(h.base_url.clone()).send().await.is_err());

    // idempotent
    h.plugin.close().await.unwrap();
    assert!(h.plugin.when_ready().await.is_err());
    assert!(h.logger.lines.lock().unwrap().is_empty());
}

#[tokio::test]
async fn closing_an_idle_plugin_skips_listening() {
    let services = MonitoringServices {
        logger: Arc::new(CapturingLogger::default()),
        cluster: Arc::new(StaticCluster::single("node-a")),
        states: Arc::new(InMemoryStateRegistries::new()),
    };
    let mut plugin = HttpMonitoring::new(MonitoringOptions::new("127.0.0.1", 0), services);
    plugin.close().await.unwrap();
    assert_eq!(plugin.state(), ListenerState::Closed);
}
