//! Simulated procedure-call surface
//!
//! Callers bind a success handler, optionally a failure handler, then run an
//! [`Operation`]. The shim waits the configured latency before executing so
//! front-end code sees the same deferred delivery a remote call would give.
//!
//! ```rust,ignore
//! shim.with_success_handler(|env| println!("{env:?}"))
//!     .with_failure_handler(|err| eprintln!("{err}"))
//!     .spawn(Operation::GetUserProjects);
//! ```

use crate::api::PreviewApi;
use crate::config::PreviewConfig;
use crate::error::ApiError;
use crate::operation::Operation;
use preview_model::{Envelope, Reply};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Deferred dispatcher over a shared [`PreviewApi`]
#[derive(Debug, Clone)]
pub struct CallShim {
    api: Arc<PreviewApi>,
    latency: Duration,
}

impl CallShim {
    /// Create with explicit latency
    #[inline]
    #[must_use]
    pub fn new(api: Arc<PreviewApi>, latency: Duration) -> Self {
        Self { api, latency }
    }

    /// Build the api and latency from configuration
    ///
    /// # Errors
    /// `ApiError::Store` if the configured store cannot be opened.
    pub fn from_config(config: &PreviewConfig) -> Result<Self, ApiError> {
        let api = PreviewApi::from_config(config)?;
        Ok(Self::new(Arc::new(api), config.latency()))
    }

    /// Simulated latency
    #[inline]
    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Shared api
    #[inline]
    #[must_use]
    pub fn api(&self) -> &Arc<PreviewApi> {
        &self.api
    }

    /// Wait the latency, then execute `op`
    ///
    /// Stores doing file I/O run the operation on the blocking pool.
    ///
    /// # Errors
    /// - the execution failure of the handler
    /// - `ApiError::Task` if the blocking task panicked
    pub async fn call(&self, op: Operation) -> Result<Envelope<Reply>, ApiError> {
        let latency_ms = u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX);
        tracing::debug!(op = op.name(), latency_ms, "dispatch");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.api.store().is_blocking() {
            let api = Arc::clone(&self.api);
            tokio::task::spawn_blocking(move || api.execute(op)).await?
        } else {
            self.api.execute(op)
        }
    }

    /// Bind the handler that receives successful envelopes
    #[must_use]
    pub fn with_success_handler<S>(&self, on_success: S) -> Runner<S, NoFailureHandler>
    where
        S: FnOnce(Envelope<Reply>) + Send + 'static,
    {
        Runner {
            shim: self.clone(),
            on_success,
            on_failure: NoFailureHandler,
        }
    }
}

/// Receiver of an execution failure
pub trait FailureSink {
    /// Take the failure of operation `op`
    fn fail(self, op: &'static str, error: ApiError);
}

/// No failure handler bound; failures go to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFailureHandler;

impl FailureSink for NoFailureHandler {
    fn fail(self, op: &'static str, error: ApiError) {
        tracing::error!(op, error = %error, "call failed with no failure handler");
    }
}

/// Bound failure handler
#[derive(Debug, Clone, Copy)]
pub struct FailureHandler<F>(F);

impl<F> FailureSink for FailureHandler<F>
where
    F: FnOnce(ApiError),
{
    fn fail(self, _op: &'static str, error: ApiError) {
        (self.0)(error)
    }
}

/// Pending call with its handlers bound
pub struct Runner<S, F> {
    shim: CallShim,
    on_success: S,
    on_failure: F,
}

impl<S> Runner<S, NoFailureHandler> {
    /// Bind the handler that receives execution failures
    #[must_use]
    pub fn with_failure_handler<G>(self, on_failure: G) -> Runner<S, FailureHandler<G>>
    where
        G: FnOnce(ApiError) + Send + 'static,
    {
        Runner {
            shim: self.shim,
            on_success: self.on_success,
            on_failure: FailureHandler(on_failure),
        }
    }
}

impl<S, F> Runner<S, F>
where
    S: FnOnce(Envelope<Reply>) + Send + 'static,
    F: FailureSink + Send + 'static,
{
    /// Execute `op` and deliver the outcome
    pub async fn run(self, op: Operation) {
        let name = op.name();
        match self.shim.call(op).await {
            Ok(envelope) => (self.on_success)(envelope),
            Err(error) => self.on_failure.fail(name, error),
        }
    }

    /// Run on the tokio runtime without waiting
    pub fn spawn(self, op: Operation) -> JoinHandle<()> {
        tokio::spawn(self.run(op))
    }
}
