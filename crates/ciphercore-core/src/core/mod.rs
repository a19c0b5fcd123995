// crates/ciphercore-core/src/core/mod.rs
// ============================================================================
// Module: CipherCore Core Types
// Description: Canonical record, identifier, and validation structures.
// Purpose: Provide stable, serializable types for the submission pipeline.
// Dependencies: serde, time, uuid
// ============================================================================

//! ## Overview
//! Core types define the three submission record families, their
//! identifiers and timestamps, and the validation schemas that turn raw
//! client input into normalized drafts. These types are the canonical source
//! of truth for any derived API surfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod records;
pub mod schema;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::SubmissionId;
pub use identifiers::VisitorId;
pub use records::Booking;
pub use records::ChatMessage;
pub use records::ContactMessage;
pub use records::ServiceKind;
pub use schema::BookingDraft;
pub use schema::BookingInput;
pub use schema::ChatDraft;
pub use schema::ChatInput;
pub use schema::ContactDraft;
pub use schema::ContactInput;
pub use schema::FieldErrors;
pub use schema::FieldViolation;
pub use schema::validate_booking;
pub use schema::validate_chat;
pub use schema::validate_contact;
pub use self::time::Timestamp;
