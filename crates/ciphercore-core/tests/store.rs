// crates/ciphercore-core/tests/store.rs
// ============================================================================
// Module: In-Memory Store Tests
// Description: Ordering, partitioning, and conflict behavior of the store.
// ============================================================================
//! ## Overview
//! Validates the append-only store semantics: newest-first listing for
//! contact messages and bookings, filter-then-oldest-first chat threads,
//! stable tie ordering, and duplicate-identifier conflicts.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use ciphercore_core::Booking;
use ciphercore_core::ChatMessage;
use ciphercore_core::ContactMessage;
use ciphercore_core::InMemorySubmissionStore;
use ciphercore_core::ServiceKind;
use ciphercore_core::SharedSubmissionStore;
use ciphercore_core::StoreError;
use ciphercore_core::SubmissionId;
use ciphercore_core::SubmissionStore;
use ciphercore_core::Timestamp;
use ciphercore_core::VisitorId;
use time::OffsetDateTime;
use uuid::Uuid;

fn id(value: u128) -> SubmissionId {
    SubmissionId::new(Uuid::from_u128(value))
}

fn at(seconds: i64) -> Timestamp {
    Timestamp::new(
        OffsetDateTime::from_unix_timestamp(1_900_000_000 + seconds).expect("valid timestamp"),
    )
}

fn contact(record_id: u128, seconds: i64) -> ContactMessage {
    ContactMessage {
        id: id(record_id),
        name: "Ada Lovelace".to_string(),
        organization: None,
        email: "ada@example.com".to_string(),
        message: "We need a readiness assessment.".to_string(),
        created_at: at(seconds),
    }
}

fn booking(record_id: u128, seconds: i64) -> Booking {
    Booking {
        id: id(record_id),
        name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
        phone: None,
        company: None,
        service: ServiceKind::Soc2,
        preferred_date: "2030-06-01".to_string(),
        preferred_time: "10:00".to_string(),
        notes: None,
        created_at: at(seconds),
    }
}

fn chat(record_id: u128, visitor: &str, seconds: i64) -> ChatMessage {
    ChatMessage {
        id: id(record_id),
        visitor_id: VisitorId::new(visitor),
        name: None,
        email: None,
        message: format!("message {record_id}"),
        is_from_visitor: true,
        created_at: at(seconds),
    }
}

#[test]
fn contacts_list_newest_first() {
    let store = InMemorySubmissionStore::new();
    store.insert_contact(contact(1, 10)).expect("insert a");
    store.insert_contact(contact(2, 20)).expect("insert b");
    store.insert_contact(contact(3, 30)).expect("insert c");

    let listed = store.list_contacts().expect("list");
    let ids: Vec<SubmissionId> = listed.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![id(3), id(2), id(1)]);
}

#[test]
fn bookings_list_newest_first() {
    let store = InMemorySubmissionStore::new();
    store.insert_booking(booking(1, 5)).expect("insert a");
    store.insert_booking(booking(2, 50)).expect("insert b");

    let listed = store.list_bookings().expect("list");
    let ids: Vec<SubmissionId> = listed.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![id(2), id(1)]);
}

#[test]
fn created_at_ties_keep_insertion_order() {
    let store = InMemorySubmissionStore::new();
    store.insert_contact(contact(1, 10)).expect("insert a");
    store.insert_contact(contact(2, 10)).expect("insert b");
    store.insert_contact(contact(3, 10)).expect("insert c");

    let listed = store.list_contacts().expect("list");
    let ids: Vec<SubmissionId> = listed.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![id(1), id(2), id(3)]);
}

#[test]
fn chat_thread_lists_oldest_first() {
    let store = InMemorySubmissionStore::new();
    store.insert_chat(chat(3, "x", 30)).expect("insert c");
    store.insert_chat(chat(1, "x", 10)).expect("insert a");
    store.insert_chat(chat(2, "x", 20)).expect("insert b");

    let listed = store.list_chat(&VisitorId::new("x")).expect("list");
    let ids: Vec<SubmissionId> = listed.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![id(1), id(2), id(3)]);
}

#[test]
fn chat_threads_are_partitioned_by_visitor() {
    let store = InMemorySubmissionStore::new();
    store.insert_chat(chat(1, "x", 10)).expect("insert x");
    store.insert_chat(chat(2, "y", 20)).expect("insert y");

    let x_thread = store.list_chat(&VisitorId::new("x")).expect("list x");
    assert_eq!(x_thread.len(), 1);
    assert_eq!(x_thread[0].id, id(1));

    let y_thread = store.list_chat(&VisitorId::new("y")).expect("list y");
    assert_eq!(y_thread.len(), 1);
    assert_eq!(y_thread[0].id, id(2));
}

#[test]
fn unknown_visitor_yields_empty_thread() {
    let store = InMemorySubmissionStore::new();
    store.insert_chat(chat(1, "x", 10)).expect("insert x");

    let listed = store.list_chat(&VisitorId::new("nobody")).expect("list");
    assert!(listed.is_empty());
}

#[test]
fn repeated_reads_are_identical() {
    let store = InMemorySubmissionStore::new();
    store.insert_chat(chat(1, "x", 10)).expect("insert a");
    store.insert_chat(chat(2, "x", 20)).expect("insert b");

    let first = store.list_chat(&VisitorId::new("x")).expect("first read");
    let second = store.list_chat(&VisitorId::new("x")).expect("second read");
    assert_eq!(first, second);
}

#[test]
fn duplicate_identifiers_conflict() {
    let store = InMemorySubmissionStore::new();
    store.insert_contact(contact(1, 10)).expect("first insert");
    let result = store.insert_contact(contact(1, 20));
    assert!(matches!(result, Err(StoreError::Conflict(_))));

    let listed = store.list_contacts().expect("list");
    assert_eq!(listed.len(), 1);
}

#[test]
fn shared_store_forwards_to_inner() {
    let shared = SharedSubmissionStore::from_store(InMemorySubmissionStore::new());
    shared.readiness().expect("ready");
    shared.insert_contact(contact(1, 10)).expect("insert");
    let listed = shared.list_contacts().expect("list");
    assert_eq!(listed.len(), 1);
}
