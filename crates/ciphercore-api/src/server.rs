// crates/ciphercore-api/src/server.rs
// ============================================================================
// Module: Submissions API Server
// Description: Axum HTTP server exposing the submission and retrieval endpoints.
// Purpose: Map the six-endpoint JSON surface onto the core services.
// Dependencies: axum, ciphercore-config, ciphercore-core, tokio
// ============================================================================

//! ## Overview
//! The API server exposes the submission pipeline over HTTP: form posts for
//! contact messages, consultation bookings, and chat messages, plus the
//! matching listings. Handlers read raw bytes, enforce the configured body
//! limit, parse JSON themselves, and route every write through
//! [`ciphercore_core::SubmissionService`] so no surface bypasses validation.
//! Inputs are untrusted; failures map to the wire envelopes and the full
//! detail goes to the audit sink only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::ConnectInfo;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::routing::post;
use ciphercore_config::AuditSinkMode;
use ciphercore_config::CipherCoreConfig;
use ciphercore_core::Booking;
use ciphercore_core::ChatInput;
use ciphercore_core::ChatMessage;
use ciphercore_core::ContactMessage;
use ciphercore_core::IdentitySource;
use ciphercore_core::InMemorySubmissionStore;
use ciphercore_core::RetrievalService;
use ciphercore_core::SharedSubmissionStore;
use ciphercore_core::SubmissionError;
use ciphercore_core::SubmissionId;
use ciphercore_core::SubmissionService;
use ciphercore_core::SubmissionStore;
use ciphercore_core::SystemIdentity;
use ciphercore_core::VisitorId;
use ciphercore_core::reply_for;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::audit::ApiEndpoint;
use crate::audit::AuditSink;
use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::RequestAuditEvent;
use crate::audit::RequestOutcome;
use crate::audit::StderrAuditSink;

// ============================================================================
// SECTION: API Server
// ============================================================================

/// Submissions API server instance.
pub struct ApiServer {
    /// Server configuration.
    config: CipherCoreConfig,
    /// Shared handler state.
    state: Arc<AppState>,
}

impl ApiServer {
    /// Builds a new API server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiServerError`] when initialization fails.
    pub fn from_config(config: CipherCoreConfig) -> Result<Self, ApiServerError> {
        config.validate().map_err(|err| ApiServerError::Config(err.to_string()))?;
        let store = SharedSubmissionStore::from_store(InMemorySubmissionStore::new());
        store.readiness().map_err(|err| ApiServerError::Init(err.to_string()))?;
        let identity: Arc<dyn IdentitySource> = Arc::new(SystemIdentity::new());
        let audit = build_audit_sink(&config)?;
        let state = Arc::new(AppState {
            submissions: SubmissionService::new(store.clone(), identity),
            retrieval: RetrievalService::new(store),
            audit,
            auto_reply: config.chat.auto_reply,
            max_body_bytes: config.server.max_body_bytes,
        });
        Ok(Self {
            config,
            state,
        })
    }

    /// Serves requests until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`ApiServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ApiServerError> {
        let addr: SocketAddr = self
            .config
            .server
            .bind
            .parse()
            .map_err(|_| ApiServerError::Config("invalid bind address".to_string()))?;
        let app = router(self.state);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| ApiServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|_| ApiServerError::Transport("http server failed".to_string()))
    }
}

/// Builds the configured audit sink.
fn build_audit_sink(config: &CipherCoreConfig) -> Result<Arc<dyn AuditSink>, ApiServerError> {
    let sink: Arc<dyn AuditSink> = match config.audit.sink {
        AuditSinkMode::Stderr => Arc::new(StderrAuditSink),
        AuditSinkMode::File => {
            let path = config
                .audit
                .path
                .as_ref()
                .ok_or_else(|| ApiServerError::Config("audit.sink=file requires audit.path".to_string()))?;
            let file_sink = FileAuditSink::new(path)
                .map_err(|err| ApiServerError::Init(format!("audit log open failed: {err}")))?;
            Arc::new(file_sink)
        }
        AuditSinkMode::None => Arc::new(NoopAuditSink),
    };
    Ok(sink)
}

/// Builds the API router over shared handler state.
fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/contact", post(submit_contact).get(list_contacts))
        .route("/api/bookings", post(submit_booking).get(list_bookings))
        .route("/api/chat", post(submit_chat))
        .route("/api/chat/{visitor_id}", get(chat_history))
        .with_state(state)
}

/// Shared state for API handlers.
struct AppState {
    /// Submission pipeline entry point.
    submissions: SubmissionService,
    /// Read access over the store.
    retrieval: RetrievalService,
    /// Request audit sink.
    audit: Arc<dyn AuditSink>,
    /// Records a canned reply after visitor chat messages when enabled.
    auto_reply: bool,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
}

// ============================================================================
// SECTION: Wire Envelopes
// ============================================================================

/// Acknowledgement returned for accepted contact and booking submissions.
#[derive(Debug, Serialize)]
struct SubmitAccepted {
    /// Always true on acceptance.
    success: bool,
    /// Human-readable confirmation.
    message: String,
    /// Identifier assigned to the stored record.
    id: SubmissionId,
}

/// Acknowledgement returned for accepted chat submissions.
#[derive(Debug, Serialize)]
struct ChatAccepted {
    /// Always true on acceptance.
    success: bool,
    /// The stored chat record.
    message: ChatMessage,
}

/// Error body returned for rejected or failed requests.
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Human-readable error summary.
    error: String,
    /// Per-field violation messages on validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<BTreeMap<&'static str, Vec<String>>>,
}

/// JSON response payloads for the API surface.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ApiResponse {
    /// Accepted contact or booking submission.
    Accepted(SubmitAccepted),
    /// Accepted chat submission.
    ChatAccepted(ChatAccepted),
    /// Contact message listing.
    Contacts(Vec<ContactMessage>),
    /// Booking listing.
    Bookings(Vec<Booking>),
    /// Chat thread listing.
    Chat(Vec<ChatMessage>),
    /// Error body.
    Error(ErrorBody),
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Handles POST /api/contact.
async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    bytes: Bytes,
) -> (StatusCode, Json<ApiResponse>) {
    contact_submit(&state, peer, &bytes)
}

/// Handles GET /api/contact.
async fn list_contacts(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> (StatusCode, Json<ApiResponse>) {
    contact_list(&state, peer)
}

/// Handles POST /api/bookings.
async fn submit_booking(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    bytes: Bytes,
) -> (StatusCode, Json<ApiResponse>) {
    booking_submit(&state, peer, &bytes)
}

/// Handles GET /api/bookings.
async fn list_bookings(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> (StatusCode, Json<ApiResponse>) {
    booking_list(&state, peer)
}

/// Handles POST /api/chat.
async fn submit_chat(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    bytes: Bytes,
) -> (StatusCode, Json<ApiResponse>) {
    chat_submit(&state, peer, &bytes)
}

/// Handles GET /api/chat/{visitorId}.
async fn chat_history(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Path(visitor_id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    chat_thread(&state, peer, &visitor_id)
}

// ============================================================================
// SECTION: Endpoint Logic
// ============================================================================

/// Processes a contact submission request.
fn contact_submit(
    state: &AppState,
    peer: SocketAddr,
    bytes: &Bytes,
) -> (StatusCode, Json<ApiResponse>) {
    let (status, response, detail) = match parse_body(state, bytes) {
        Err(rejection) => rejection,
        Ok(input) => match state.submissions.submit_contact(input) {
            Ok(record) => (
                StatusCode::CREATED,
                ApiResponse::Accepted(SubmitAccepted {
                    success: true,
                    message: "Message received successfully".to_string(),
                    id: record.id,
                }),
                None,
            ),
            Err(err) => submission_failure(err, "Failed to send message"),
        },
    };
    finish(state, ApiEndpoint::ContactSubmit, peer, bytes.len(), status, response, detail)
}

/// Processes a contact listing request.
fn contact_list(state: &AppState, peer: SocketAddr) -> (StatusCode, Json<ApiResponse>) {
    let (status, response, detail) = match state.retrieval.list_contacts() {
        Ok(records) => (StatusCode::OK, ApiResponse::Contacts(records), None),
        Err(err) => store_failure("Failed to retrieve messages", &err),
    };
    finish(state, ApiEndpoint::ContactList, peer, 0, status, response, detail)
}

/// Processes a booking submission request.
fn booking_submit(
    state: &AppState,
    peer: SocketAddr,
    bytes: &Bytes,
) -> (StatusCode, Json<ApiResponse>) {
    let (status, response, detail) = match parse_body(state, bytes) {
        Err(rejection) => rejection,
        Ok(input) => match state.submissions.submit_booking(input) {
            Ok(record) => (
                StatusCode::CREATED,
                ApiResponse::Accepted(SubmitAccepted {
                    success: true,
                    message: "Consultation booked successfully".to_string(),
                    id: record.id,
                }),
                None,
            ),
            Err(err) => submission_failure(err, "Failed to book consultation"),
        },
    };
    finish(state, ApiEndpoint::BookingSubmit, peer, bytes.len(), status, response, detail)
}

/// Processes a booking listing request.
fn booking_list(state: &AppState, peer: SocketAddr) -> (StatusCode, Json<ApiResponse>) {
    let (status, response, detail) = match state.retrieval.list_bookings() {
        Ok(records) => (StatusCode::OK, ApiResponse::Bookings(records), None),
        Err(err) => store_failure("Failed to retrieve bookings", &err),
    };
    finish(state, ApiEndpoint::BookingList, peer, 0, status, response, detail)
}

/// Processes a chat submission request, recording a canned reply when enabled.
fn chat_submit(state: &AppState, peer: SocketAddr, bytes: &Bytes) -> (StatusCode, Json<ApiResponse>) {
    let (status, response, detail) = match parse_body(state, bytes) {
        Err(rejection) => rejection,
        Ok(input) => match state.submissions.submit_chat(input) {
            Ok(record) => {
                maybe_auto_reply(state, &record);
                (
                    StatusCode::CREATED,
                    ApiResponse::ChatAccepted(ChatAccepted {
                        success: true,
                        message: record,
                    }),
                    None,
                )
            }
            Err(err) => submission_failure(err, "Failed to send chat message"),
        },
    };
    finish(state, ApiEndpoint::ChatSubmit, peer, bytes.len(), status, response, detail)
}

/// Processes a chat thread listing request.
fn chat_thread(state: &AppState, peer: SocketAddr, visitor_id: &str) -> (StatusCode, Json<ApiResponse>) {
    let (status, response, detail) = match state.retrieval.list_chat(&VisitorId::new(visitor_id)) {
        Ok(records) => (StatusCode::OK, ApiResponse::Chat(records), None),
        Err(err) => store_failure("Failed to retrieve chat messages", &err),
    };
    finish(state, ApiEndpoint::ChatHistory, peer, 0, status, response, detail)
}

/// Records the keyword-matched reply after a visitor message when enabled.
///
/// The reply is fire-and-forget: a failure is audited and never surfaced to
/// the visitor, whose own message was already stored.
fn maybe_auto_reply(state: &AppState, visitor_message: &ChatMessage) {
    if !state.auto_reply || !visitor_message.is_from_visitor {
        return;
    }
    let input = ChatInput {
        visitor_id: Some(visitor_message.visitor_id.as_str().to_string()),
        name: None,
        email: None,
        message: Some(reply_for(&visitor_message.message).to_string()),
        is_from_visitor: Some(false),
    };
    if let Err(err) = state.submissions.submit_chat(input) {
        state.audit.record(
            &RequestAuditEvent::new(ApiEndpoint::ChatSubmit, RequestOutcome::ServerError, 0, None, 0)
                .with_detail(format!("auto reply failed: {err}")),
        );
    }
}

// ============================================================================
// SECTION: Request Plumbing
// ============================================================================

/// Intermediate endpoint result: status, response body, and audit detail.
type EndpointResult = (StatusCode, ApiResponse, Option<String>);

/// Enforces the body limit and parses the JSON payload.
fn parse_body<T: DeserializeOwned>(state: &AppState, bytes: &Bytes) -> Result<T, EndpointResult> {
    if bytes.len() > state.max_body_bytes {
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            ApiResponse::Error(ErrorBody {
                error: "Request body too large".to_string(),
                details: None,
            }),
            None,
        ));
    }
    serde_json::from_slice::<T>(bytes.as_ref()).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            ApiResponse::Error(ErrorBody {
                error: "Invalid form data".to_string(),
                details: None,
            }),
            None,
        )
    })
}

/// Maps a submission failure to its wire envelope and audit detail.
fn submission_failure(err: SubmissionError, generic: &str) -> EndpointResult {
    match err {
        SubmissionError::Validation(errors) => (
            StatusCode::BAD_REQUEST,
            ApiResponse::Error(ErrorBody {
                error: "Invalid form data".to_string(),
                details: Some(errors.field_messages()),
            }),
            None,
        ),
        SubmissionError::Store(store_err) => {
            let detail = store_err.to_string();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiResponse::Error(ErrorBody {
                    error: generic.to_string(),
                    details: None,
                }),
                Some(detail),
            )
        }
    }
}

/// Maps a store read failure to its wire envelope and audit detail.
fn store_failure(generic: &str, err: &ciphercore_core::StoreError) -> EndpointResult {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiResponse::Error(ErrorBody {
            error: generic.to_string(),
            details: None,
        }),
        Some(err.to_string()),
    )
}

/// Records the audit event and packages the response.
fn finish(
    state: &AppState,
    endpoint: ApiEndpoint,
    peer: SocketAddr,
    request_bytes: usize,
    status: StatusCode,
    response: ApiResponse,
    detail: Option<String>,
) -> (StatusCode, Json<ApiResponse>) {
    let mut event = RequestAuditEvent::new(
        endpoint,
        outcome_for(status),
        status.as_u16(),
        Some(peer.ip().to_string()),
        request_bytes,
    );
    if let Some(detail) = detail {
        event = event.with_detail(detail);
    }
    state.audit.record(&event);
    (status, Json(response))
}

/// Classifies an HTTP status for audit labeling.
fn outcome_for(status: StatusCode) -> RequestOutcome {
    if status.is_success() {
        RequestOutcome::Ok
    } else if status.is_client_error() {
        RequestOutcome::ClientError
    } else {
        RequestOutcome::ServerError
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// API server errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
