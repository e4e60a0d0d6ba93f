//! Testing utilities for the preview workspace
//!
//! Shared fixtures: a pinned clock, api builders, a recording notifier, a
//! backend that can be switched to failing and an in-memory log capture.

#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use preview_api::{CallShim, FixedClock, IdFactory, Notifier, PreviewApi};
use preview_model::{ProjectId, UseCaseDraft, ValueRecord, Vision};
use preview_store::{Backend, MemoryBackend, Store, StoreError};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

/// Seed project with a vision, use cases and RACI entries
pub const SEEDED_PROJECT: &str = "PRJ-20251231-0001";
/// Seed project with nothing attached
pub const BARE_PROJECT: &str = "PRJ-20251231-0003";

pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
}

pub fn test_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(test_now()))
}

/// Api over a fresh seeded memory store, pinned clock and seeded ids
pub fn setup_test_api() -> PreviewApi {
    setup_test_api_with(test_clock()).0
}

/// Same as [`setup_test_api`], also handing back the clock and backend
pub fn setup_test_api_with(
    clock: Arc<FixedClock>,
) -> (PreviewApi, Arc<FixedClock>, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let store = Store::open(Arc::clone(&backend)).unwrap();
    let api = PreviewApi::new(store)
        .with_clock(clock.clone())
        .with_id_factory(IdFactory::seeded(7));
    (api, clock, backend)
}

pub fn setup_test_shim() -> CallShim {
    CallShim::new(Arc::new(setup_test_api()), Duration::ZERO)
}

/// Api over a backend that can be switched to failing
pub fn setup_failing_api() -> (PreviewApi, Arc<FailingBackend>) {
    let backend = Arc::new(FailingBackend::default());
    let store = Store::open(Arc::clone(&backend)).unwrap();
    let api = PreviewApi::new(store).with_clock(test_clock());
    backend.fail();
    (api, backend)
}

pub fn project_id(id: &str) -> ProjectId {
    ProjectId::from(id)
}

pub fn sample_draft(project: &str, challenge: &str) -> UseCaseDraft {
    UseCaseDraft {
        project_id: project_id(project),
        challenge: challenge.into(),
        goal: "Cut lead time".into(),
        expected_impact: "Faster delivery".into(),
        ninety_day_goal: "Pilot in one plant".into(),
        score: 3.5.into(),
        priority: 2_i64.into(),
        ..UseCaseDraft::default()
    }
}

pub fn sample_vision(project: &str, text: &str) -> Vision {
    Vision {
        project_id: project_id(project),
        vision_text: text.into(),
        decision_rules: "Data first".into(),
        success_metrics: "NPS +10".into(),
        notes: "".into(),
        ..Vision::default()
    }
}

pub fn sample_value(project: &str, usecase: &str, next: &str) -> ValueRecord {
    ValueRecord {
        usecase_id: usecase.into(),
        project_id: project_id(project),
        quantitative_impact: "10h/week".into(),
        qualitative_impact: "Less rework".into(),
        evidence: "Pilot log".into(),
        next_investment: next.into(),
        ..ValueRecord::default()
    }
}

/// Notifier keeping every message
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// Memory backend that rejects every access once `fail` is called
#[derive(Debug, Default)]
pub struct FailingBackend {
    inner: MemoryBackend,
    failing: AtomicBool,
}

impl FailingBackend {
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn recover(&self) {
        self.failing.store(false, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("backend offline".to_string()));
        }
        Ok(())
    }
}

impl Backend for FailingBackend {
    fn get(&self, slot: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        self.inner.get(slot)
    }

    fn put(&self, slot: &str, value: String) -> Result<(), StoreError> {
        self.check()?;
        self.inner.put(slot, value)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.check()?;
        self.inner.clear()
    }
}

/// Shared buffer collecting formatted log lines
#[derive(Debug, Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Route this thread's logs into a buffer until the guard drops
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}
