//! Common test utilities

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;
use tts_batch::config::SynthesisConfig;
use tts_batch::models::{Address, Outcome, WorkItem, DEFAULT_MARKER};
use tts_batch::storage::AudioSink;
use tts_batch::synthesis::{Executor, SynthesisClient};
use wiremock::{Match, Request};

/// Work item whose speaker line is `text`
pub fn item(text: &str) -> WorkItem {
    WorkItem::from_raw(format!("System: test\nUser: {text}"), DEFAULT_MARKER)
}

/// `n` items with distinct texts `item 0`, `item 1`, ...
#[allow(dead_code)]
pub fn items(n: usize) -> Vec<WorkItem> {
    (0..n).map(|i| item(&format!("item {i}"))).collect()
}

/// HTTP client writing into a fresh temp dir, with a short timeout
#[allow(dead_code)]
pub fn client(dir: &TempDir) -> SynthesisClient {
    let sink = AudioSink::new(dir.path(), "wav").unwrap();
    let config = SynthesisConfig {
        api_key: String::from("test-key"),
        ..Default::default()
    };
    SynthesisClient::with_timeout(&config, sink, Duration::from_secs(10)).unwrap()
}

/// Address of a port nothing is listening on
#[allow(dead_code)]
pub fn closed_address() -> Address {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    Address::new(format!("127.0.0.1:{port}"))
}

/// Matches requests whose MessagePack body has `text` equal to the given string
#[allow(dead_code)]
pub struct MsgpackText(pub String);

impl Match for MsgpackText {
    fn matches(&self, request: &Request) -> bool {
        rmp_serde::from_slice::<serde_json::Value>(&request.body)
            .map(|body| body["text"] == serde_json::Value::String(self.0.clone()))
            .unwrap_or(false)
    }
}

/// Executor that never touches the network
///
/// Items whose text is in `fail` fail on every server except those in
/// `healthy`. Each call sleeps for `delay(text)` first, so tests can force
/// completions to arrive out of submission order.
#[allow(dead_code)]
pub struct ScriptedExecutor {
    pub fail: HashSet<String>,
    pub healthy: HashSet<Address>,
    pub delay: fn(&str) -> Duration,
    pub calls: Mutex<Vec<(String, Address)>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedExecutor {
    pub fn new(fail: &[&str], delay: fn(&str) -> Duration) -> Self {
        Self {
            fail: fail.iter().map(|s| s.to_string()).collect(),
            healthy: HashSet::new(),
            delay,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_healthy(mut self, server: Address) -> Self {
        self.healthy.insert(server);
        self
    }

    pub fn calls(&self) -> Vec<(String, Address)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for ScriptedExecutor {
    async fn execute(&self, item: &WorkItem, server: &Address) -> Outcome {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep((self.delay)(item.text())).await;
        self.calls
            .lock()
            .unwrap()
            .push((item.text().to_string(), server.clone()));

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail.contains(item.text()) && !self.healthy.contains(server) {
            Outcome::failure(item, server, "HTTP 503")
        } else {
            Outcome::success(item, server, format!("{}.wav", item.id()))
        }
    }
}
