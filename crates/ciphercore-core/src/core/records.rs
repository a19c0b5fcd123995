// crates/ciphercore-core/src/core/records.rs
// ============================================================================
// Module: CipherCore Submission Records
// Description: Stored record families for contact, booking, and chat flows.
// Purpose: Provide stable, serializable record types for the submission store.
// Dependencies: crate::core::{identifiers, time}, serde
// ============================================================================

//! ## Overview
//! The three record families are independent: contact messages, consultation
//! bookings, and live-chat messages never reference one another. Records are
//! created exactly once by the submission service, are immutable afterwards,
//! and are never deleted. Wire field names are camelCase to match the JSON
//! surface consumed by the site.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::SubmissionId;
use crate::core::identifiers::VisitorId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Contact Messages
// ============================================================================

/// Stored contact-form message.
///
/// # Invariants
/// - `email` is trimmed and lowercased before storage.
/// - `organization` is `None` when absent or empty, never an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    /// Record identifier.
    pub id: SubmissionId,
    /// Sender name.
    pub name: String,
    /// Optional sender organization.
    pub organization: Option<String>,
    /// Normalized sender email address.
    pub email: String,
    /// Message body.
    pub message: String,
    /// Creation timestamp.
    pub created_at: Timestamp,
}

// ============================================================================
// SECTION: Consultation Bookings
// ============================================================================

/// Services offered for consultation bookings.
///
/// # Invariants
/// - The set is closed; unknown values are rejected at validation, not stored.
/// - Wire names are stable kebab-case labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
    /// SOC 2 readiness assessment.
    Soc2,
    /// ISO 27001 readiness assessment.
    Iso27001,
    /// HIPAA compliance validation.
    Hipaa,
    /// NIST Cybersecurity Framework alignment.
    NistCsf,
    /// NIST CMMC assessment.
    NistCmmc,
    /// Cloud security review.
    CloudSecurity,
    /// General consultation.
    GeneralConsultation,
}

impl ServiceKind {
    /// Canonical list of bookable services.
    pub const ALL: [Self; 7] = [
        Self::Soc2,
        Self::Iso27001,
        Self::Hipaa,
        Self::NistCsf,
        Self::NistCmmc,
        Self::CloudSecurity,
        Self::GeneralConsultation,
    ];

    /// Returns the stable wire label for the service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Soc2 => "soc2",
            Self::Iso27001 => "iso27001",
            Self::Hipaa => "hipaa",
            Self::NistCsf => "nist-csf",
            Self::NistCmmc => "nist-cmmc",
            Self::CloudSecurity => "cloud-security",
            Self::GeneralConsultation => "general-consultation",
        }
    }

    /// Resolves a wire label to a service (returns `None` for unknown labels).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored consultation booking.
///
/// # Invariants
/// - `service` is always one of the closed [`ServiceKind`] set.
/// - `preferred_date` is a validated `YYYY-MM-DD` literal that was
///   today-or-future when the booking was accepted.
/// - `preferred_time` is a validated 24-hour `HH:MM` literal.
/// - Optional fields are `None` when absent or empty, never empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Record identifier.
    pub id: SubmissionId,
    /// Requester name.
    pub name: String,
    /// Normalized requester email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional company name.
    pub company: Option<String>,
    /// Requested service.
    pub service: ServiceKind,
    /// Requested date (`YYYY-MM-DD`).
    pub preferred_date: String,
    /// Requested time (24-hour `HH:MM`).
    pub preferred_time: String,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: Timestamp,
}

// ============================================================================
// SECTION: Chat Messages
// ============================================================================

/// Stored live-chat message.
///
/// # Invariants
/// - Messages sharing a `visitor_id` form one thread ordered by `created_at`
///   ascending.
/// - Optional fields are `None` when absent or empty, never empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Record identifier.
    pub id: SubmissionId,
    /// Chat thread partition key.
    pub visitor_id: VisitorId,
    /// Optional visitor name.
    pub name: Option<String>,
    /// Optional normalized visitor email address.
    pub email: Option<String>,
    /// Message body.
    pub message: String,
    /// True when the visitor sent the message, false for replies to them.
    pub is_from_visitor: bool,
    /// Creation timestamp.
    pub created_at: Timestamp,
}
