// crates/ciphercore-api/src/audit.rs
// ============================================================================
// Module: API Request Auditing
// Description: Structured audit events for HTTP request handling.
// Purpose: Emit JSON-line request logs without hard dependencies.
// Dependencies: ciphercore-config, serde
// ============================================================================

//! ## Overview
//! This module defines audit event payloads and sinks for HTTP request
//! logging. It is intentionally lightweight so deployments can route events
//! to their preferred logging pipeline without redesign. Validation failures
//! surface only field names and messages; store faults carry their full
//! detail here and never in client responses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Labels
// ============================================================================

/// API endpoint classification for audit events.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApiEndpoint {
    /// POST /api/contact.
    ContactSubmit,
    /// GET /api/contact.
    ContactList,
    /// POST /api/bookings.
    BookingSubmit,
    /// GET /api/bookings.
    BookingList,
    /// POST /api/chat.
    ChatSubmit,
    /// GET /api/chat/{visitorId}.
    ChatHistory,
}

impl ApiEndpoint {
    /// Returns a stable label for the endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContactSubmit => "contact/submit",
            Self::ContactList => "contact/list",
            Self::BookingSubmit => "bookings/submit",
            Self::BookingList => "bookings/list",
            Self::ChatSubmit => "chat/submit",
            Self::ChatHistory => "chat/history",
        }
    }
}

/// Request outcome classification for audit events.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequestOutcome {
    /// Request succeeded.
    Ok,
    /// Request was rejected as client-correctable.
    ClientError,
    /// Request failed on the server side.
    ServerError,
}

impl RequestOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
        }
    }
}

// ============================================================================
// SECTION: Events
// ============================================================================

/// HTTP request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RequestAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Endpoint classification.
    pub endpoint: ApiEndpoint,
    /// Request outcome.
    pub outcome: RequestOutcome,
    /// HTTP status code returned to the client.
    pub status: u16,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Internal failure detail, never surfaced to clients.
    pub detail: Option<String>,
}

impl RequestAuditEvent {
    /// Creates a new request audit event with a consistent timestamp.
    #[must_use]
    pub fn new(
        endpoint: ApiEndpoint,
        outcome: RequestOutcome,
        status: u16,
        peer_ip: Option<String>,
        request_bytes: usize,
    ) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "request_audit",
            timestamp_ms,
            endpoint,
            outcome,
            status,
            peer_ip,
            request_bytes,
            detail: None,
        }
    }

    /// Attaches internal failure detail to the event.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for HTTP request events.
pub trait AuditSink: Send + Sync {
    /// Records an audit event.
    fn record(&self, event: &RequestAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
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

impl AuditSink for FileAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &RequestAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        clippy::dbg_macro,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        reason = "Test-only output and panic-based assertions are permitted."
    )]

    use std::fs;

    use super::ApiEndpoint;
    use super::AuditSink;
    use super::FileAuditSink;
    use super::RequestAuditEvent;
    use super::RequestOutcome;

    #[test]
    fn file_sink_appends_json_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("requests.log");
        let sink = FileAuditSink::new(&path).expect("open sink");

        sink.record(&RequestAuditEvent::new(
            ApiEndpoint::ContactSubmit,
            RequestOutcome::Ok,
            201,
            Some("127.0.0.1".to_string()),
            120,
        ));
        sink.record(
            &RequestAuditEvent::new(ApiEndpoint::ContactList, RequestOutcome::ServerError, 500, None, 0)
                .with_detail("submission store error: contact store mutex poisoned"),
        );

        let contents = fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"status\":201"));
        assert!(lines[1].contains("mutex poisoned"));
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(ApiEndpoint::ChatHistory.as_str(), "chat/history");
        assert_eq!(RequestOutcome::ClientError.as_str(), "client_error");
    }
}
