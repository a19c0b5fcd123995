// crates/ciphercore-core/src/runtime/store.rs
// ============================================================================
// Module: CipherCore In-Memory Store
// Description: Mutex-guarded in-memory submission store.
// Purpose: Provide the process-lifetime store implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The in-memory store holds the three record collections for the lifetime of
//! the process: no eviction, no TTL, no persistence. Each kind's collection
//! sits behind its own mutex so concurrent inserts from multiple worker
//! threads never race on the underlying vector; reads clone a snapshot under
//! the same lock. Insertion order is preserved, which keeps `created_at` tie
//! ordering stable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use crate::core::Booking;
use crate::core::ChatMessage;
use crate::core::ContactMessage;
use crate::core::VisitorId;
use crate::interfaces::StoreError;
use crate::interfaces::SubmissionStore;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory submission store with one lock per record kind.
#[derive(Debug, Default, Clone)]
pub struct InMemorySubmissionStore {
    /// Contact message collection protected by a mutex.
    contacts: Arc<Mutex<Vec<ContactMessage>>>,
    /// Booking collection protected by a mutex.
    bookings: Arc<Mutex<Vec<Booking>>>,
    /// Chat message collection protected by a mutex.
    chats: Arc<Mutex<Vec<ChatMessage>>>,
}

impl InMemorySubmissionStore {
    /// Creates a new empty in-memory submission store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            bookings: Arc::new(Mutex::new(Vec::new())),
            chats: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Builds the poisoned-mutex store error for a record kind.
fn poisoned(kind: &str) -> StoreError {
    StoreError::Store(format!("{kind} store mutex poisoned"))
}

/// Builds the duplicate-identifier conflict error for a record kind.
fn duplicate(kind: &str) -> StoreError {
    StoreError::Conflict(format!("{kind} identifier already exists"))
}

impl SubmissionStore for InMemorySubmissionStore {
    fn insert_contact(&self, record: ContactMessage) -> Result<ContactMessage, StoreError> {
        let mut guard = self.contacts.lock().map_err(|_| poisoned("contact"))?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(duplicate("contact"));
        }
        guard.push(record.clone());
        drop(guard);
        Ok(record)
    }

    fn list_contacts(&self) -> Result<Vec<ContactMessage>, StoreError> {
        let guard = self.contacts.lock().map_err(|_| poisoned("contact"))?;
        let mut records = guard.clone();
        drop(guard);
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn insert_booking(&self, record: Booking) -> Result<Booking, StoreError> {
        let mut guard = self.bookings.lock().map_err(|_| poisoned("booking"))?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(duplicate("booking"));
        }
        guard.push(record.clone());
        drop(guard);
        Ok(record)
    }

    fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        let guard = self.bookings.lock().map_err(|_| poisoned("booking"))?;
        let mut records = guard.clone();
        drop(guard);
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn insert_chat(&self, record: ChatMessage) -> Result<ChatMessage, StoreError> {
        let mut guard = self.chats.lock().map_err(|_| poisoned("chat"))?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(duplicate("chat"));
        }
        guard.push(record.clone());
        drop(guard);
        Ok(record)
    }

    fn list_chat(&self, visitor_id: &VisitorId) -> Result<Vec<ChatMessage>, StoreError> {
        let guard = self.chats.lock().map_err(|_| poisoned("chat"))?;
        let mut records: Vec<ChatMessage> =
            guard.iter().filter(|message| message.visitor_id == *visitor_id).cloned().collect();
        drop(guard);
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }
}

// ============================================================================
// SECTION: Shared Store Wrapper
// ============================================================================

/// Shared submission store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedSubmissionStore {
    /// Inner store implementation.
    inner: Arc<dyn SubmissionStore + Send + Sync>,
}

impl SharedSubmissionStore {
    /// Wraps a submission store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl SubmissionStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn SubmissionStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl SubmissionStore for SharedSubmissionStore {
    fn insert_contact(&self, record: ContactMessage) -> Result<ContactMessage, StoreError> {
        self.inner.insert_contact(record)
    }

    fn list_contacts(&self) -> Result<Vec<ContactMessage>, StoreError> {
        self.inner.list_contacts()
    }

    fn insert_booking(&self, record: Booking) -> Result<Booking, StoreError> {
        self.inner.insert_booking(record)
    }

    fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        self.inner.list_bookings()
    }

    fn insert_chat(&self, record: ChatMessage) -> Result<ChatMessage, StoreError> {
        self.inner.insert_chat(record)
    }

    fn list_chat(&self, visitor_id: &VisitorId) -> Result<Vec<ChatMessage>, StoreError> {
        self.inner.list_chat(visitor_id)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.inner.readiness()
    }
}
