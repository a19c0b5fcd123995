// crates/ciphercore-core/src/core/time.rs
// ============================================================================
// Module: CipherCore Time Model
// Description: Canonical creation timestamps for submission records.
// Purpose: Provide a single ordered, serializable wall-clock representation.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Every stored record carries a creation timestamp assigned by the identity
//! source at submission time. The core never reads wall-clock time directly;
//! callers supply instants through [`crate::interfaces::IdentitySource`],
//! which keeps validation and storage deterministic under test.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::Date;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Canonical creation timestamp attached to stored records.
///
/// # Invariants
/// - Serialized as an RFC 3339 string on the wire.
/// - Total ordering follows the underlying instant; listing order for each
///   record kind is derived from comparisons of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl Timestamp {
    /// Creates a timestamp from an explicit instant.
    #[must_use]
    pub const fn new(instant: OffsetDateTime) -> Self {
        Self(instant)
    }

    /// Returns the wrapped instant.
    #[must_use]
    pub const fn get(self) -> OffsetDateTime {
        self.0
    }

    /// Returns the calendar date of the instant.
    #[must_use]
    pub const fn date(self) -> Date {
        self.0.date()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(value: OffsetDateTime) -> Self {
        Self::new(value)
    }
}
