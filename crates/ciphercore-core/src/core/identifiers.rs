// crates/ciphercore-core/src/core/identifiers.rs
// ============================================================================
// Module: CipherCore Identifiers
// Description: Canonical opaque identifiers for submission records and threads.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde, uuid
// ============================================================================

//! ## Overview
//! This module defines the canonical identifiers used throughout the
//! submissions backend. Record identifiers wrap a UUID (v4-class randomness)
//! so freshly generated identifiers never collide at this data volume;
//! visitor identifiers are opaque client-generated strings used only as chat
//! partition keys.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Unique identifier assigned to every stored submission record.
///
/// # Invariants
/// - Wraps a UUID; serialized as its canonical hyphenated string form.
/// - Assigned exactly once at submission time and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Creates a submission identifier from an existing UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the wrapped UUID value.
    #[must_use]
    pub const fn get(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for SubmissionId {
    fn from(value: Uuid) -> Self {
        Self::new(value)
    }
}

/// Opaque chat partition key owned and generated by the visitor's browser.
///
/// # Invariants
/// - Opaque UTF-8 string; stored and compared verbatim with no normalization.
/// - Length bounds are enforced by validation at the submission boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitorId(String);

impl VisitorId {
    /// Creates a new visitor identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for VisitorId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for VisitorId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
