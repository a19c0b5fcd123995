// crates/ciphercore-core/src/runtime/identity.rs
// ============================================================================
// Module: CipherCore System Identity Source
// Description: UUID v4 and UTC wall-clock identity implementation.
// Purpose: Supply fresh identifiers and timestamps for accepted submissions.
// Dependencies: crate::core, crate::interfaces, time, uuid
// ============================================================================

//! ## Overview
//! The production identity source draws record identifiers from UUID v4
//! randomness (122 bits of entropy, collision-free at this data volume) and
//! timestamps from the UTC system clock. It is the only place the runtime
//! reads the clock; everything downstream receives explicit values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use uuid::Uuid;

use crate::core::SubmissionId;
use crate::core::Timestamp;
use crate::interfaces::IdentitySource;

// ============================================================================
// SECTION: System Identity
// ============================================================================

/// Identity source backed by UUID v4 generation and the UTC system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemIdentity;

impl SystemIdentity {
    /// Creates a new system identity source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl IdentitySource for SystemIdentity {
    fn next_id(&self) -> SubmissionId {
        SubmissionId::new(Uuid::new_v4())
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(OffsetDateTime::now_utc())
    }
}
