// crates/ciphercore-core/tests/service.rs
// ============================================================================
// Module: Submission Pipeline Tests
// Description: Validate-identify-persist orchestration and read idempotence.
// ============================================================================
//! ## Overview
//! Drives the submission and retrieval services end to end over a fresh
//! injected store and a deterministic identity source: one mutation per
//! accepted submission, zero on rejection, and listing order per kind.

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

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use ciphercore_core::BookingInput;
use ciphercore_core::ChatInput;
use ciphercore_core::ContactInput;
use ciphercore_core::IdentitySource;
use ciphercore_core::InMemorySubmissionStore;
use ciphercore_core::RetrievalService;
use ciphercore_core::SharedSubmissionStore;
use ciphercore_core::SubmissionError;
use ciphercore_core::SubmissionId;
use ciphercore_core::SubmissionService;
use ciphercore_core::Timestamp;
use ciphercore_core::VisitorId;
use time::Duration;
use time::OffsetDateTime;
use time::macros::datetime;
use uuid::Uuid;

/// Deterministic identity source: sequential identifiers, advancing clock.
struct ScriptedIdentity {
    /// Identifier counter.
    ids: AtomicU64,
    /// Clock tick counter.
    ticks: AtomicU64,
    /// Clock origin.
    base: OffsetDateTime,
}

impl ScriptedIdentity {
    fn new() -> Self {
        Self {
            ids: AtomicU64::new(0),
            ticks: AtomicU64::new(0),
            base: datetime!(2030-01-01 12:00 UTC),
        }
    }
}

impl IdentitySource for ScriptedIdentity {
    fn next_id(&self) -> SubmissionId {
        let next = self.ids.fetch_add(1, Ordering::SeqCst) + 1;
        SubmissionId::new(Uuid::from_u128(u128::from(next)))
    }

    fn now(&self) -> Timestamp {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        Timestamp::new(self.base + Duration::seconds(i64::try_from(tick).unwrap_or(i64::MAX)))
    }
}

/// Builds fresh services over an empty store.
fn services() -> (SubmissionService, RetrievalService) {
    let store = SharedSubmissionStore::from_store(InMemorySubmissionStore::new());
    let identity = Arc::new(ScriptedIdentity::new());
    (SubmissionService::new(store.clone(), identity), RetrievalService::new(store))
}

fn contact_input(message: &str) -> ContactInput {
    ContactInput {
        name: Some("Ada Lovelace".to_string()),
        organization: None,
        email: Some("Ada@Example.COM".to_string()),
        message: Some(message.to_string()),
    }
}

fn booking_input(date: &str) -> BookingInput {
    BookingInput {
        name: Some("Grace Hopper".to_string()),
        email: Some("grace@example.com".to_string()),
        phone: None,
        company: None,
        service: Some("iso27001".to_string()),
        preferred_date: Some(date.to_string()),
        preferred_time: Some("10:00".to_string()),
        notes: None,
    }
}

fn chat_input(visitor: &str, message: &str) -> ChatInput {
    ChatInput {
        visitor_id: Some(visitor.to_string()),
        name: None,
        email: None,
        message: Some(message.to_string()),
        is_from_visitor: Some(true),
    }
}

#[test]
fn accepted_contact_is_stored_normalized_and_listed() {
    let (submissions, retrieval) = services();
    let record =
        submissions.submit_contact(contact_input("We need an audit soon.")).expect("accepted");
    assert_eq!(record.email, "ada@example.com");

    let listed = retrieval.list_contacts().expect("list");
    assert_eq!(listed, vec![record]);
}

#[test]
fn rejected_contact_leaves_store_untouched() {
    let (submissions, retrieval) = services();
    let result = submissions.submit_contact(contact_input("short"));
    assert!(matches!(result, Err(SubmissionError::Validation(_))));
    assert!(retrieval.list_contacts().expect("list").is_empty());
}

#[test]
fn contacts_list_newest_first_after_submission() {
    let (submissions, retrieval) = services();
    let a = submissions.submit_contact(contact_input("first message body")).expect("a");
    let b = submissions.submit_contact(contact_input("second message body")).expect("b");
    let c = submissions.submit_contact(contact_input("third message body")).expect("c");

    let listed = retrieval.list_contacts().expect("list");
    let ids: Vec<SubmissionId> = listed.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);
}

#[test]
fn booking_date_is_checked_against_the_identity_clock() {
    let (submissions, retrieval) = services();
    let result = submissions.submit_booking(booking_input("2029-12-31"));
    assert!(matches!(result, Err(SubmissionError::Validation(_))));
    assert!(retrieval.list_bookings().expect("list").is_empty());

    submissions.submit_booking(booking_input("2030-01-01")).expect("same-day booking");
    assert_eq!(retrieval.list_bookings().expect("list").len(), 1);
}

#[test]
fn chat_thread_round_trips_in_insertion_order() {
    let (submissions, retrieval) = services();
    let a = submissions.submit_chat(chat_input("x", "first")).expect("a");
    let b = submissions.submit_chat(chat_input("x", "second")).expect("b");
    let c = submissions.submit_chat(chat_input("x", "third")).expect("c");

    let thread = retrieval.list_chat(&VisitorId::new("x")).expect("thread");
    assert_eq!(thread, vec![a, b, c]);
}

#[test]
fn chat_threads_never_leak_across_visitors() {
    let (submissions, retrieval) = services();
    submissions.submit_chat(chat_input("x", "hello from x")).expect("x");
    submissions.submit_chat(chat_input("y", "hello from y")).expect("y");

    let thread = retrieval.list_chat(&VisitorId::new("y")).expect("thread");
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].message, "hello from y");
}

#[test]
fn repeated_reads_without_writes_are_identical() {
    let (submissions, retrieval) = services();
    submissions.submit_chat(chat_input("x", "only message")).expect("insert");

    let first = retrieval.list_chat(&VisitorId::new("x")).expect("first");
    let second = retrieval.list_chat(&VisitorId::new("x")).expect("second");
    assert_eq!(first, second);
}

#[test]
fn identifiers_are_unique_across_accepted_submissions() {
    let (submissions, _) = services();
    let contact = submissions.submit_contact(contact_input("unique id check")).expect("contact");
    let chat = submissions.submit_chat(chat_input("x", "unique id check")).expect("chat");
    assert_ne!(contact.id, chat.id);
}
