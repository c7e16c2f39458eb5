// system-tests/src/runner.rs
// ============================================================================
// Module: Scenario Runner
// Description: Executes scenarios with timeouts, retries, and a worker limit.
// Purpose: Isolate each attempt behind a fresh controller and record it.
// Dependencies: products-client, serde, tokio, url
// ============================================================================

//! ## Overview
//! A scenario is an async function that takes a [`ProductsController`] by
//! value and returns `Result<(), ScenarioError>`. The runner builds a new
//! controller for every attempt, so nothing leaks between retries, and wraps
//! each attempt in the configured wall-clock budget.
//!
//! Concurrency is bounded by a semaphore that callers may share across
//! runners. Every request the scenario issues is captured in the report's
//! transcript and optionally forwarded to an extra audit sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use products_client::FanoutAuditSink;
use products_client::FileAuditSink;
use products_client::HttpTransport;
use products_client::MemoryAuditSink;
use products_client::ProductsController;
use products_client::RequestAuditEvent;
use products_client::RequestAuditSink;
use products_client::ReqwestTransport;
use products_client::StderrAuditSink;
use products_client::TransportError;
use serde::Serialize;
use tokio::sync::Semaphore;
use url::Url;

use crate::assertions::ScenarioError;
use crate::config::AuditTarget;
use crate::config::SystemTestConfig;

// ============================================================================
// SECTION: Transport Factories
// ============================================================================

/// Builds the transport for one scenario attempt.
pub trait TransportFactory: Send + Sync {
    /// Transport handed to the controller.
    type Transport: HttpTransport;

    /// Creates a fresh transport.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the transport cannot be constructed.
    fn build(&self) -> Result<Self::Transport, TransportError>;
}

/// Factory for [`ReqwestTransport`] bound to one base URL.
#[derive(Debug, Clone)]
pub struct ReqwestFactory {
    /// Remote API base URL.
    base_url: Url,
    /// Per-request timeout.
    request_timeout: Duration,
}

impl ReqwestFactory {
    /// Creates a factory for `base_url`.
    #[must_use]
    pub fn new(base_url: Url, request_timeout: Duration) -> Self {
        Self {
            base_url,
            request_timeout,
        }
    }

    /// Creates a factory from the configured base URL and request timeout.
    #[must_use]
    pub fn from_config(config: &SystemTestConfig) -> Self {
        Self::new(config.base_url.clone(), config.request_timeout)
    }
}

impl TransportFactory for ReqwestFactory {
    type Transport = ReqwestTransport;

    fn build(&self) -> Result<ReqwestTransport, TransportError> {
        ReqwestTransport::new(self.base_url.as_str(), self.request_timeout)
    }
}

// ============================================================================
// SECTION: Audit Destinations
// ============================================================================

/// Opens the sink for a configured audit destination.
///
/// # Errors
///
/// Returns [`io::Error`] when the audit file cannot be opened for append.
pub fn open_audit_sink(target: &AuditTarget) -> io::Result<Arc<dyn RequestAuditSink>> {
    Ok(match target {
        AuditTarget::Stderr => Arc::new(StderrAuditSink),
        AuditTarget::File(path) => Arc::new(FileAuditSink::new(path)?),
    })
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Outcome of one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptRecord {
    /// Attempt number, starting at 1.
    pub attempt: u32,
    /// `pass` or the failure classification.
    pub outcome: String,
    /// Failure message, when the attempt failed.
    pub error: Option<String>,
    /// Wall time for the attempt.
    pub elapsed_ms: u128,
}

/// Result of running one scenario to completion.
#[derive(Debug)]
pub struct ScenarioReport {
    /// Scenario name.
    pub name: String,
    /// Every attempt in order.
    pub attempts: Vec<AttemptRecord>,
    /// Requests issued across all attempts.
    pub transcript: Vec<RequestAuditEvent>,
    /// Final outcome: the last attempt's result.
    pub result: Result<(), ScenarioError>,
}

impl ScenarioReport {
    /// Returns true when the final attempt passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns `pass` or `fail`.
    #[must_use]
    pub const fn status(&self) -> &'static str {
        if self.passed() { "pass" } else { "fail" }
    }

    /// Returns one note per attempt.
    #[must_use]
    pub fn notes(&self) -> Vec<String> {
        self.attempts
            .iter()
            .map(|record| match &record.error {
                None => format!("attempt {}: pass ({} ms)", record.attempt, record.elapsed_ms),
                Some(error) => format!("attempt {}: {}: {error}", record.attempt, record.outcome),
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Runs scenarios against transports built by `F`.
pub struct ScenarioRunner<F> {
    /// Transport source.
    factory: F,
    /// Budget for one attempt.
    timeout: Duration,
    /// Attempts after the first failure.
    retries: u32,
    /// Worker slots.
    permits: Arc<Semaphore>,
    /// Extra destination for request events.
    audit: Option<Arc<dyn RequestAuditSink>>,
}

impl<F: TransportFactory> ScenarioRunner<F> {
    /// Creates a runner with its own worker limit.
    #[must_use]
    pub fn new(factory: F, config: &SystemTestConfig) -> Self {
        Self {
            factory,
            timeout: config.scenario_timeout,
            retries: config.retries,
            permits: Arc::new(Semaphore::new(config.workers.max(1))),
            audit: None,
        }
    }

    /// Shares `permits` with other runners.
    #[must_use]
    pub fn with_permits(mut self, permits: Arc<Semaphore>) -> Self {
        self.permits = permits;
        self
    }

    /// Forwards every request event to `sink` as well as the transcript.
    #[must_use]
    pub fn with_audit_sink(mut self, sink: Arc<dyn RequestAuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Overrides the per-attempt budget.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the retry count.
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Runs `scenario` until it passes or the attempts are exhausted.
    pub async fn run<S, Fut>(&self, name: &str, scenario: S) -> ScenarioReport
    where
        S: Fn(ProductsController<F::Transport>) -> Fut,
        Fut: Future<Output = Result<(), ScenarioError>>,
    {
        let _permit = self.permits.acquire().await.ok();
        let mut attempts = Vec::new();
        let mut transcript = Vec::new();
        let mut attempt = 0;
        loop {
            attempt += 1;
            let memory = Arc::new(MemoryAuditSink::new());
            let started = Instant::now();
            let result = self.attempt(&scenario, memory.clone()).await;
            transcript.extend(memory.events());
            attempts.push(AttemptRecord {
                attempt,
                outcome: result.as_ref().map_or_else(|err| err.kind(), |_| "pass").to_string(),
                error: result.as_ref().err().map(ToString::to_string),
                elapsed_ms: started.elapsed().as_millis(),
            });
            if result.is_ok() || attempt > self.retries {
                return ScenarioReport {
                    name: name.to_string(),
                    attempts,
                    transcript,
                    result,
                };
            }
        }
    }

    /// Executes a single attempt on a fresh controller.
    async fn attempt<S, Fut>(
        &self,
        scenario: &S,
        memory: Arc<MemoryAuditSink>,
    ) -> Result<(), ScenarioError>
    where
        S: Fn(ProductsController<F::Transport>) -> Fut,
        Fut: Future<Output = Result<(), ScenarioError>>,
    {
        let transport =
            self.factory.build().map_err(|err| ScenarioError::Infrastructure(err.into()))?;
        let mut sinks: Vec<Arc<dyn RequestAuditSink>> = vec![memory];
        if let Some(extra) = &self.audit {
            sinks.push(extra.clone());
        }
        let audit = Arc::new(FanoutAuditSink::new(sinks));
        let controller = ProductsController::new(transport).with_audit_sink(audit);
        match tokio::time::timeout(self.timeout, scenario(controller)).await {
            Ok(result) => result,
            Err(_) => Err(ScenarioError::TimedOut(self.timeout)),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
