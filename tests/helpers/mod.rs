//! Shared stubs for integration tests
//!
//! Stub handlers gate on signals or semaphore permits so tests step the
//! worker deterministically instead of sleeping and hoping.

#![allow(dead_code)]

use async_trait::async_trait;
use boombox::error::{Error, Result, UserError};
use boombox::playback::{PlaceId, Signal, SignalStream, StreamHandler};
use boombox::sources::{MetadataExtractor, SearchProvider, Sink};
use boombox::Track;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Notify, Semaphore};
use tokio::time::{sleep, timeout};

/// Route engine logs to the test output when `RUST_LOG` asks for them
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Poll `cond` until it holds or two seconds pass
pub async fn wait_until<F, Fut>(cond: F)
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    timeout(Duration::from_secs(2), async {
        while !cond().await {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached within 2s");
}

/// Blocks each item until a `SkipRequested` signal arrives
pub struct BlockUntilSkip;

#[async_trait]
impl StreamHandler<Track> for BlockUntilSkip {
    async fn stream(&self, _item: &Track, mut signals: SignalStream) -> Result<()> {
        loop {
            match signals.recv().await {
                Ok(Signal::SkipRequested) => return Ok(()),
                Ok(_) => continue,
                // lagged or closed: treat as end of item
                Err(_) => return Ok(()),
            }
        }
    }
}

/// Completes one item per released permit, recording play order
pub struct StepHandler {
    pub permits: Arc<Semaphore>,
    pub played: Mutex<Vec<String>>,
    /// Items whose stream call has begun, whether or not a permit arrived
    pub started: AtomicUsize,
}

impl StepHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            permits: Arc::new(Semaphore::new(0)),
            played: Mutex::new(Vec::new()),
            started: AtomicUsize::new(0),
        })
    }

    pub fn step(&self, n: usize) {
        self.permits.add_permits(n);
    }

    pub fn played(&self) -> Vec<String> {
        self.played.lock().unwrap().clone()
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StreamHandler<Track> for StepHandler {
    async fn stream(&self, item: &Track, _signals: SignalStream) -> Result<()> {
        self.started.fetch_add(1, Ordering::SeqCst);
        self.permits.acquire().await.unwrap().forget();
        self.played.lock().unwrap().push(item.title.clone());
        Ok(())
    }
}

/// Halts output on `Paused`, continues on `Resumed`, stops on skip,
/// journaling each observation
pub struct PauseAwareHandler {
    pub log: Mutex<Vec<String>>,
}

impl PauseAwareHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            log: Mutex::new(Vec::new()),
        })
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl StreamHandler<Track> for PauseAwareHandler {
    async fn stream(&self, item: &Track, mut signals: SignalStream) -> Result<()> {
        self.log.lock().unwrap().push(format!("start {}", item.title));
        loop {
            match signals.recv().await {
                Ok(Signal::Paused) => self.log.lock().unwrap().push("halted".into()),
                Ok(Signal::Resumed) => self.log.lock().unwrap().push("resumed".into()),
                Ok(Signal::SkipRequested) => {
                    self.log.lock().unwrap().push("stopped".into());
                    return Ok(());
                }
                Err(_) => return Ok(()),
            }
        }
    }
}

/// Completes instantly, recording play order; fails items titled `fail_on`
pub struct RecordingHandler {
    pub played: Mutex<Vec<String>>,
    pub fail_on: Option<String>,
}

impl RecordingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            played: Mutex::new(Vec::new()),
            fail_on: None,
        })
    }

    pub fn failing_on(title: &str) -> Arc<Self> {
        Arc::new(Self {
            played: Mutex::new(Vec::new()),
            fail_on: Some(title.to_string()),
        })
    }

    pub fn played(&self) -> Vec<String> {
        self.played.lock().unwrap().clone()
    }
}

#[async_trait]
impl StreamHandler<Track> for RecordingHandler {
    async fn stream(&self, item: &Track, _signals: SignalStream) -> Result<()> {
        self.played.lock().unwrap().push(item.title.clone());
        if self.fail_on.as_deref() == Some(item.title.as_str()) {
            return Err(Error::Stream(format!("decode died on {}", item.title)));
        }
        Ok(())
    }
}

/// Search stub: resolves any query to a synthetic track, counting calls
pub struct StubSearch {
    pub calls: AtomicUsize,
}

impl StubSearch {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SearchProvider<Track> for StubSearch {
    async fn search(&self, query: &str) -> Result<Track> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if query == "no results whatsoever" {
            return Err(UserError::SourceNotSupported.into());
        }
        if query == "provider outage" {
            return Err(Error::Search("search backend unreachable".into()));
        }
        Ok(Track::new(format!("https://resolved/{query}"), query))
    }
}

/// Extractor stub: accepts any reference except ones containing "unsupported"
pub struct StubExtractor {
    pub calls: AtomicUsize,
}

impl StubExtractor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl MetadataExtractor<Track> for StubExtractor {
    async fn extract(&self, reference: &str) -> Result<Track> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if reference.contains("unsupported") {
            return Err(UserError::SourceNotSupported.into());
        }
        if reference.contains("flaky") {
            // tool I/O failure, distinct from "this source is unsupported"
            return Err(Error::Extract("extractor tool exited abnormally".into()));
        }
        Ok(Track::new(reference, format!("extracted {reference}")))
    }
}

/// Sink stub counting joins; optionally fails the first join
pub struct StubSink {
    pub joins: AtomicUsize,
    pub fail_first: bool,
}

impl StubSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            joins: AtomicUsize::new(0),
            fail_first: false,
        })
    }

    pub fn failing_first() -> Arc<Self> {
        Arc::new(Self {
            joins: AtomicUsize::new(0),
            fail_first: true,
        })
    }

    pub fn join_count(&self) -> usize {
        self.joins.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Sink for StubSink {
    async fn join(&self, place: PlaceId) -> Result<()> {
        let n = self.joins.fetch_add(1, Ordering::SeqCst);
        if self.fail_first && n == 0 {
            return Err(Error::SinkJoin(format!("no voice channel for {place}")));
        }
        Ok(())
    }
}

/// Sink whose `join` blocks until the test opens the gate; optionally fails
/// the first join after the gate opens
pub struct GatedSink {
    gate: Notify,
    pub completed: AtomicBool,
    pub join_calls: AtomicUsize,
    fail_first: bool,
}

impl GatedSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            gate: Notify::new(),
            completed: AtomicBool::new(false),
            join_calls: AtomicUsize::new(0),
            fail_first: false,
        })
    }

    pub fn failing_first() -> Arc<Self> {
        Arc::new(Self {
            gate: Notify::new(),
            completed: AtomicBool::new(false),
            join_calls: AtomicUsize::new(0),
            fail_first: true,
        })
    }

    /// Let one pending (or the next) join proceed
    pub fn open_gate(&self) {
        self.gate.notify_one();
    }

    pub fn join_calls(&self) -> usize {
        self.join_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Sink for GatedSink {
    async fn join(&self, _place: PlaceId) -> Result<()> {
        let n = self.join_calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        if self.fail_first && n == 0 {
            return Err(Error::SinkJoin("voice endpoint rejected us".into()));
        }
        self.completed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Records, for every streamed item, whether the sink join had completed
/// when streaming began
pub struct JoinAwareHandler {
    sink: Arc<GatedSink>,
    pub streamed: Mutex<Vec<String>>,
    pub violations: Mutex<Vec<String>>,
}

impl JoinAwareHandler {
    pub fn new(sink: Arc<GatedSink>) -> Arc<Self> {
        Arc::new(Self {
            sink,
            streamed: Mutex::new(Vec::new()),
            violations: Mutex::new(Vec::new()),
        })
    }

    pub fn streamed(&self) -> Vec<String> {
        self.streamed.lock().unwrap().clone()
    }

    pub fn violations(&self) -> Vec<String> {
        self.violations.lock().unwrap().clone()
    }
}

#[async_trait]
impl StreamHandler<Track> for JoinAwareHandler {
    async fn stream(&self, item: &Track, _signals: SignalStream) -> Result<()> {
        if !self.sink.completed.load(Ordering::SeqCst) {
            self.violations.lock().unwrap().push(item.title.clone());
        }
        self.streamed.lock().unwrap().push(item.title.clone());
        Ok(())
    }
}

pub fn track(title: &str) -> Track {
    Track::new(format!("https://media.example/{title}"), title)
}
