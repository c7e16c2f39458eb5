// crates/products-client/src/audit.rs
// ============================================================================
// Module: Request Audit Logging
// Description: Structured audit events for outbound Products API calls.
// Purpose: Emit one JSON line per call without a hard logging dependency.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every controller call produces exactly one [`RequestAuditEvent`]. Events
//! carry request metadata, the observed status or transport failure, byte
//! counts, and latency. Bodies are never recorded. Sinks decide where the JSON
//! lines go: stderr, an append-only file, memory, several of those at once,
//! or nowhere.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome classification for a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// A response was received (any status).
    Response,
    /// No response: the transport failed.
    TransportError,
    /// The request body could not be encoded.
    EncodeError,
}

/// Audit event for one outbound call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Per-controller sequence number, starting at 1.
    pub sequence: u64,
    /// Controller operation name.
    pub operation: &'static str,
    /// HTTP method.
    pub method: &'static str,
    /// Logical path below the base URL.
    pub path: String,
    /// Query string, unencoded.
    pub query: String,
    /// Outcome classification.
    pub outcome: RequestOutcome,
    /// Status code when a response arrived.
    pub status: Option<u16>,
    /// Transport error kind when no response arrived.
    pub error_kind: Option<&'static str>,
    /// Request body size.
    pub request_bytes: usize,
    /// Response body size.
    pub response_bytes: usize,
    /// Wall time for the call.
    pub elapsed_ms: u128,
}

/// Inputs required to construct a [`RequestAuditEvent`].
pub struct RequestAuditEventParams {
    /// Per-controller sequence number.
    pub sequence: u64,
    /// Controller operation name.
    pub operation: &'static str,
    /// HTTP method.
    pub method: &'static str,
    /// Logical path.
    pub path: String,
    /// Query string.
    pub query: String,
    /// Outcome classification.
    pub outcome: RequestOutcome,
    /// Status code when a response arrived.
    pub status: Option<u16>,
    /// Transport error kind.
    pub error_kind: Option<&'static str>,
    /// Request body size.
    pub request_bytes: usize,
    /// Response body size.
    pub response_bytes: usize,
    /// Wall time for the call.
    pub elapsed_ms: u128,
}

impl RequestAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: RequestAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "products_request",
            timestamp_ms,
            sequence: params.sequence,
            operation: params.operation,
            method: params.method,
            path: params.path,
            query: params.query,
            outcome: params.outcome,
            status: params.status,
            error_kind: params.error_kind,
            request_bytes: params.request_bytes,
            response_bytes: params.response_bytes,
            elapsed_ms: params.elapsed_ms,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for outbound request events.
pub trait RequestAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &RequestAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl RequestAuditSink for StderrAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RequestAuditSink for FileAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that keeps events in memory.
#[derive(Default)]
pub struct MemoryAuditSink {
    /// Recorded events in arrival order.
    events: Mutex<Vec<RequestAuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<RequestAuditEvent> {
        self.events.lock().map_or_else(|_| Vec::new(), |events| events.clone())
    }
}

impl RequestAuditSink for MemoryAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Audit sink that forwards every event to several sinks in order.
#[derive(Default)]
pub struct FanoutAuditSink {
    /// Downstream sinks.
    sinks: Vec<Arc<dyn RequestAuditSink>>,
}

impl FanoutAuditSink {
    /// Creates a fan-out over `sinks`.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn RequestAuditSink>>) -> Self {
        Self {
            sinks,
        }
    }
}

impl RequestAuditSink for FanoutAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        for sink in &self.sinks {
            sink.record(event);
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl RequestAuditSink for NoopAuditSink {
    fn record(&self, _event: &RequestAuditEvent) {}
}
