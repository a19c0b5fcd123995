// crates/ciphercore-core/src/interfaces/mod.rs
// ============================================================================
// Module: CipherCore Interfaces
// Description: Backend-agnostic interfaces for storage and identity.
// Purpose: Define the contract surfaces used by the submission runtime.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the submission pipeline integrates with storage and
//! the identity/clock source without embedding backend-specific details. A
//! persistent database would implement [`SubmissionStore`] behind the same
//! contracts; tests inject fixed [`IdentitySource`] implementations to make
//! the pipeline deterministic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Booking;
use crate::core::ChatMessage;
use crate::core::ContactMessage;
use crate::core::SubmissionId;
use crate::core::Timestamp;
use crate::core::VisitorId;

// ============================================================================
// SECTION: Submission Store
// ============================================================================

/// Submission store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same identifier already exists.
    #[error("submission store conflict: {0}")]
    Conflict(String),
    /// Store backend reported an unexpected failure.
    #[error("submission store error: {0}")]
    Store(String),
}

/// Append-only store holding the three independent record collections.
///
/// Records are write-once: no update or delete operations exist. Contact
/// messages and bookings list newest-first; chat messages list oldest-first
/// after filtering to one visitor thread.
pub trait SubmissionStore {
    /// Inserts a contact message and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the identifier already exists or the
    /// backend fails.
    fn insert_contact(&self, record: ContactMessage) -> Result<ContactMessage, StoreError>;

    /// Lists all contact messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend fails.
    fn list_contacts(&self) -> Result<Vec<ContactMessage>, StoreError>;

    /// Inserts a booking and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the identifier already exists or the
    /// backend fails.
    fn insert_booking(&self, record: Booking) -> Result<Booking, StoreError>;

    /// Lists all bookings, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend fails.
    fn list_bookings(&self) -> Result<Vec<Booking>, StoreError>;

    /// Inserts a chat message and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the identifier already exists or the
    /// backend fails.
    fn insert_chat(&self, record: ChatMessage) -> Result<ChatMessage, StoreError>;

    /// Lists one visitor's chat thread, oldest first. An unknown visitor
    /// yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend fails.
    fn list_chat(&self, visitor_id: &VisitorId) -> Result<Vec<ChatMessage>, StoreError>;

    /// Reports store readiness for liveness/readiness probes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Identity Source
// ============================================================================

/// Source of fresh record identifiers and creation timestamps.
///
/// Implementations must produce identifiers that never collide under the
/// birthday bound expected at this data volume (UUID-v4 class randomness).
pub trait IdentitySource: Send + Sync {
    /// Returns a fresh, globally unique record identifier.
    fn next_id(&self) -> SubmissionId;

    /// Returns the current wall-clock timestamp.
    fn now(&self) -> Timestamp;
}
