// crates/ciphercore-core/src/runtime/service.rs
// ============================================================================
// Module: CipherCore Submission and Retrieval Services
// Description: Validate, identify, persist, and list submission records.
// Purpose: Provide the single canonical execution path for every API surface.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The submission service is the only entry point for turning raw external
//! input into stored records: validate, then assign identity and timestamp,
//! then persist. A validation failure is terminal and leaves the store
//! untouched; a successful call performs exactly one store mutation. The
//! retrieval service exposes the pure read side. Any HTTP or CLI surface must
//! call through these services to preserve the pipeline's invariants.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::Booking;
use crate::core::BookingInput;
use crate::core::ChatInput;
use crate::core::ChatMessage;
use crate::core::ContactInput;
use crate::core::ContactMessage;
use crate::core::FieldErrors;
use crate::core::VisitorId;
use crate::core::validate_booking;
use crate::core::validate_chat;
use crate::core::validate_contact;
use crate::interfaces::IdentitySource;
use crate::interfaces::StoreError;
use crate::interfaces::SubmissionStore;
use crate::runtime::store::SharedSubmissionStore;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Submission pipeline errors.
///
/// # Invariants
/// - `Validation` is a terminal client-correctable outcome, never retried.
/// - `Store` is an unexpected backend fault surfaced generically to callers.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// One or more fields violated their schema rules.
    #[error("validation failed: {0}")]
    Validation(#[from] FieldErrors),
    /// The store failed while persisting the record.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ============================================================================
// SECTION: Submission Service
// ============================================================================

/// Orchestrates validate, identify, and persist for each submission kind.
#[derive(Clone)]
pub struct SubmissionService {
    /// Injected submission store.
    store: SharedSubmissionStore,
    /// Injected identity and clock source.
    identity: Arc<dyn IdentitySource>,
}

impl SubmissionService {
    /// Creates a submission service over an injected store and identity source.
    #[must_use]
    pub fn new(store: SharedSubmissionStore, identity: Arc<dyn IdentitySource>) -> Self {
        Self {
            store,
            identity,
        }
    }

    /// Validates and stores a contact-form submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Validation`] with every violated field
    /// constraint, or [`SubmissionError::Store`] when persistence fails.
    pub fn submit_contact(&self, input: ContactInput) -> Result<ContactMessage, SubmissionError> {
        let draft = validate_contact(input)?;
        let record = ContactMessage {
            id: self.identity.next_id(),
            name: draft.name,
            organization: draft.organization,
            email: draft.email,
            message: draft.message,
            created_at: self.identity.now(),
        };
        Ok(self.store.insert_contact(record)?)
    }

    /// Validates and stores a consultation-booking submission.
    ///
    /// The date check compares against the identity source's current date, so
    /// the same payload may validate differently on a later day.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Validation`] with every violated field
    /// constraint, or [`SubmissionError::Store`] when persistence fails.
    pub fn submit_booking(&self, input: BookingInput) -> Result<Booking, SubmissionError> {
        let today = self.identity.now().date();
        let draft = validate_booking(input, today)?;
        let record = Booking {
            id: self.identity.next_id(),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            company: draft.company,
            service: draft.service,
            preferred_date: draft.preferred_date,
            preferred_time: draft.preferred_time,
            notes: draft.notes,
            created_at: self.identity.now(),
        };
        Ok(self.store.insert_booking(record)?)
    }

    /// Validates and stores a chat-message submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Validation`] with every violated field
    /// constraint, or [`SubmissionError::Store`] when persistence fails.
    pub fn submit_chat(&self, input: ChatInput) -> Result<ChatMessage, SubmissionError> {
        let draft = validate_chat(input)?;
        let record = ChatMessage {
            id: self.identity.next_id(),
            visitor_id: draft.visitor_id,
            name: draft.name,
            email: draft.email,
            message: draft.message,
            is_from_visitor: draft.is_from_visitor,
            created_at: self.identity.now(),
        };
        Ok(self.store.insert_chat(record)?)
    }
}

// ============================================================================
// SECTION: Retrieval Service
// ============================================================================

/// Pure read access over the submission store.
#[derive(Clone)]
pub struct RetrievalService {
    /// Injected submission store.
    store: SharedSubmissionStore,
}

impl RetrievalService {
    /// Creates a retrieval service over an injected store.
    #[must_use]
    pub const fn new(store: SharedSubmissionStore) -> Self {
        Self {
            store,
        }
    }

    /// Lists all contact messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend fails.
    pub fn list_contacts(&self) -> Result<Vec<ContactMessage>, StoreError> {
        self.store.list_contacts()
    }

    /// Lists all bookings, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend fails.
    pub fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        self.store.list_bookings()
    }

    /// Lists one visitor's chat thread, oldest first. An unknown visitor
    /// yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend fails.
    pub fn list_chat(&self, visitor_id: &VisitorId) -> Result<Vec<ChatMessage>, StoreError> {
        self.store.list_chat(visitor_id)
    }
}
