// crates/ciphercore-api/src/lib.rs
// ============================================================================
// Module: CipherCore API
// Description: HTTP surface for the CipherCore submission pipeline.
// Purpose: Expose the six-endpoint JSON API over the core services.
// Dependencies: axum, ciphercore-config, ciphercore-core, tokio
// ============================================================================

//! ## Overview
//! The CipherCore API crate serves the submission and retrieval endpoints
//! consumed by the consultancy site. All writes route through
//! [`ciphercore_core::SubmissionService`]; request handling is audited
//! through pluggable JSON-line sinks selected by configuration.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::ApiEndpoint;
pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RequestAuditEvent;
pub use audit::RequestOutcome;
pub use audit::StderrAuditSink;
pub use server::ApiServer;
pub use server::ApiServerError;
