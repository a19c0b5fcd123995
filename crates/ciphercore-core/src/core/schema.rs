// crates/ciphercore-core/src/core/schema.rs
// ============================================================================
// Module: CipherCore Validation Schemas
// Description: Field-level acceptance rules for the three submission kinds.
// Purpose: Turn raw external input into normalized drafts or full field errors.
// Dependencies: crate::core::{identifiers, records}, serde, time
// ============================================================================

//! ## Overview
//! Validators are pure and synchronous: they never touch storage, and they
//! read the clock only through the `today` argument supplied by the caller
//! when checking booking dates (so revalidating the same payload a day later
//! may change the outcome; this is deliberate and documented). Every violated
//! constraint is reported in one pass rather than failing on the first error,
//! so clients can surface all problems at once.
//!
//! Normalization happens here and only here: strings are trimmed, emails are
//! lowercased, and optional fields that are absent or empty after trimming
//! become `None`. Visitor identifiers are the one exception: they are opaque
//! partition keys and are stored verbatim.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::Date;
use time::Time;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::core::identifiers::VisitorId;
use crate::core::records::ServiceKind;

// ============================================================================
// SECTION: Field Limits
// ============================================================================

/// Minimum length of a person name in characters.
pub const NAME_MIN: usize = 2;
/// Maximum length of a person name in characters.
pub const NAME_MAX: usize = 100;
/// Maximum length of an organization or company name in characters.
pub const ORGANIZATION_MAX: usize = 200;
/// Minimum length of a contact message body in characters.
pub const CONTACT_MESSAGE_MIN: usize = 10;
/// Maximum length of a contact message body in characters.
pub const CONTACT_MESSAGE_MAX: usize = 2_000;
/// Maximum length of a chat message body in characters.
pub const CHAT_MESSAGE_MAX: usize = 1_000;
/// Maximum length of booking notes in characters.
pub const NOTES_MAX: usize = 1_000;
/// Maximum length of a visitor identifier in characters.
pub const VISITOR_ID_MAX: usize = 200;
/// Maximum total length of an email address in characters.
pub const EMAIL_MAX: usize = 254;
/// Maximum length of the local part of an email address in characters.
pub const EMAIL_LOCAL_MAX: usize = 64;
/// Minimum number of digits in a phone number.
pub const PHONE_MIN_DIGITS: usize = 7;
/// Maximum number of digits in a phone number.
pub const PHONE_MAX_DIGITS: usize = 15;

/// Wire format for booking dates.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
/// Wire format for booking times.
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

// ============================================================================
// SECTION: Field Errors
// ============================================================================

/// Single violated field constraint.
///
/// # Invariants
/// - `field` is the camelCase wire name of the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Wire name of the field that failed validation.
    pub field: &'static str,
    /// Human-readable violation message.
    pub message: String,
}

/// Full set of field violations collected for one submission.
///
/// # Invariants
/// - Contains every violated constraint found in one validation pass.
/// - Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Collected violations in field order.
    violations: Vec<FieldViolation>,
}

impl FieldErrors {
    /// Creates an empty violation set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// Records a violation against a field.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    /// Returns true when no violations have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the recorded violations.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Flattens the violations into a field-to-messages map for wire output.
    #[must_use]
    pub fn field_messages(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut messages: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for violation in &self.violations {
            messages.entry(violation.field).or_default().push(violation.message.clone());
        }
        messages
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", violation.field, violation.message)?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

// ============================================================================
// SECTION: Raw Inputs
// ============================================================================

/// Raw contact-form submission as received from the client.
///
/// # Invariants
/// - All fields are optional at the wire level; validation decides which are
///   required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    /// Sender name.
    #[serde(default)]
    pub name: Option<String>,
    /// Sender organization.
    #[serde(default)]
    pub organization: Option<String>,
    /// Sender email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Message body.
    #[serde(default)]
    pub message: Option<String>,
}

/// Raw consultation-booking submission as received from the client.
///
/// # Invariants
/// - All fields are optional at the wire level; validation decides which are
///   required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    /// Requester name.
    #[serde(default)]
    pub name: Option<String>,
    /// Requester email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Company name.
    #[serde(default)]
    pub company: Option<String>,
    /// Requested service label.
    #[serde(default)]
    pub service: Option<String>,
    /// Requested date (`YYYY-MM-DD`).
    #[serde(default)]
    pub preferred_date: Option<String>,
    /// Requested time (24-hour `HH:MM`).
    #[serde(default)]
    pub preferred_time: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Raw chat-message submission as received from the client.
///
/// # Invariants
/// - All fields are optional at the wire level; validation decides which are
///   required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatInput {
    /// Chat thread partition key.
    #[serde(default)]
    pub visitor_id: Option<String>,
    /// Visitor name.
    #[serde(default)]
    pub name: Option<String>,
    /// Visitor email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Message body.
    #[serde(default)]
    pub message: Option<String>,
    /// True when the visitor sent the message; defaults to true when absent.
    #[serde(default)]
    pub is_from_visitor: Option<bool>,
}

// ============================================================================
// SECTION: Normalized Drafts
// ============================================================================

/// Normalized contact message awaiting identity assignment.
///
/// # Invariants
/// - All fields have passed validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    /// Trimmed sender name.
    pub name: String,
    /// Normalized optional organization.
    pub organization: Option<String>,
    /// Trimmed, lowercased email address.
    pub email: String,
    /// Trimmed message body.
    pub message: String,
}

/// Normalized booking awaiting identity assignment.
///
/// # Invariants
/// - All fields have passed validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    /// Trimmed requester name.
    pub name: String,
    /// Trimmed, lowercased email address.
    pub email: String,
    /// Normalized optional phone number.
    pub phone: Option<String>,
    /// Normalized optional company name.
    pub company: Option<String>,
    /// Requested service.
    pub service: ServiceKind,
    /// Validated date literal (`YYYY-MM-DD`).
    pub preferred_date: String,
    /// Validated time literal (24-hour `HH:MM`).
    pub preferred_time: String,
    /// Normalized optional notes.
    pub notes: Option<String>,
}

/// Normalized chat message awaiting identity assignment.
///
/// # Invariants
/// - All fields have passed validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatDraft {
    /// Verbatim chat thread partition key.
    pub visitor_id: VisitorId,
    /// Normalized optional visitor name.
    pub name: Option<String>,
    /// Normalized optional email address.
    pub email: Option<String>,
    /// Trimmed message body.
    pub message: String,
    /// True when the visitor sent the message.
    pub is_from_visitor: bool,
}

// ============================================================================
// SECTION: Validators
// ============================================================================

/// Validates and normalizes a contact-form submission.
///
/// # Errors
///
/// Returns [`FieldErrors`] carrying every violated constraint.
pub fn validate_contact(input: ContactInput) -> Result<ContactDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    let name = required_text("name", input.name, NAME_MIN, NAME_MAX, &mut errors);
    let organization = optional_text("organization", input.organization, ORGANIZATION_MAX, &mut errors);
    let email = required_email("email", input.email, &mut errors);
    let message =
        required_text("message", input.message, CONTACT_MESSAGE_MIN, CONTACT_MESSAGE_MAX, &mut errors);
    match (name, email, message) {
        (Some(name), Some(email), Some(message)) if errors.is_empty() => Ok(ContactDraft {
            name,
            organization,
            email,
            message,
        }),
        _ => Err(errors),
    }
}

/// Validates and normalizes a consultation-booking submission.
///
/// The caller supplies `today` so the date check stays pure; the same payload
/// may validate differently on a later day by design.
///
/// # Errors
///
/// Returns [`FieldErrors`] carrying every violated constraint.
pub fn validate_booking(input: BookingInput, today: Date) -> Result<BookingDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    let name = required_text("name", input.name, NAME_MIN, NAME_MAX, &mut errors);
    let email = required_email("email", input.email, &mut errors);
    let phone = optional_phone("phone", input.phone, &mut errors);
    let company = optional_text("company", input.company, ORGANIZATION_MAX, &mut errors);
    let service = required_service("service", input.service, &mut errors);
    let preferred_date = required_date("preferredDate", input.preferred_date, today, &mut errors);
    let preferred_time = required_time("preferredTime", input.preferred_time, &mut errors);
    let notes = optional_text("notes", input.notes, NOTES_MAX, &mut errors);
    match (name, email, service, preferred_date, preferred_time) {
        (Some(name), Some(email), Some(service), Some(preferred_date), Some(preferred_time))
            if errors.is_empty() =>
        {
            Ok(BookingDraft {
                name,
                email,
                phone,
                company,
                service,
                preferred_date,
                preferred_time,
                notes,
            })
        }
        _ => Err(errors),
    }
}

/// Validates and normalizes a chat-message submission.
///
/// # Errors
///
/// Returns [`FieldErrors`] carrying every violated constraint.
pub fn validate_chat(input: ChatInput) -> Result<ChatDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    let visitor_id = required_visitor_id("visitorId", input.visitor_id, &mut errors);
    let name = optional_bounded_text("name", input.name, NAME_MIN, NAME_MAX, &mut errors);
    let email = optional_email("email", input.email, &mut errors);
    let message = required_text("message", input.message, 1, CHAT_MESSAGE_MAX, &mut errors);
    let is_from_visitor = input.is_from_visitor.unwrap_or(true);
    match (visitor_id, message) {
        (Some(visitor_id), Some(message)) if errors.is_empty() => Ok(ChatDraft {
            visitor_id,
            name,
            email,
            message,
            is_from_visitor,
        }),
        _ => Err(errors),
    }
}

// ============================================================================
// SECTION: Field Checks
// ============================================================================

/// Validates a required text field with character-length bounds.
fn required_text(
    field: &'static str,
    value: Option<String>,
    min: usize,
    max: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    let Some(raw) = value else {
        errors.push(field, format!("{field} is required"));
        return None;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{field} is required"));
        return None;
    }
    let length = char_len(trimmed);
    if length < min {
        errors.push(field, format!("{field} must be at least {min} characters"));
        return None;
    }
    if length > max {
        errors.push(field, format!("{field} must be at most {max} characters"));
        return None;
    }
    Some(trimmed.to_string())
}

/// Normalizes an optional text field, rejecting values over `max` characters.
fn optional_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    let trimmed = normalize_optional(value)?;
    if char_len(&trimmed) > max {
        errors.push(field, format!("{field} must be at most {max} characters"));
        return None;
    }
    Some(trimmed)
}

/// Normalizes an optional text field with both lower and upper length bounds.
fn optional_bounded_text(
    field: &'static str,
    value: Option<String>,
    min: usize,
    max: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    let trimmed = normalize_optional(value)?;
    let length = char_len(&trimmed);
    if length < min {
        errors.push(field, format!("{field} must be at least {min} characters"));
        return None;
    }
    if length > max {
        errors.push(field, format!("{field} must be at most {max} characters"));
        return None;
    }
    Some(trimmed)
}

/// Validates and normalizes a required email field.
fn required_email(
    field: &'static str,
    value: Option<String>,
    errors: &mut FieldErrors,
) -> Option<String> {
    let Some(raw) = value else {
        errors.push(field, format!("{field} is required"));
        return None;
    };
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        errors.push(field, format!("{field} is required"));
        return None;
    }
    if !email_is_valid(&normalized) {
        errors.push(field, format!("{field} must be a valid email address"));
        return None;
    }
    Some(normalized)
}

/// Validates and normalizes an optional email field.
fn optional_email(
    field: &'static str,
    value: Option<String>,
    errors: &mut FieldErrors,
) -> Option<String> {
    let trimmed = normalize_optional(value)?;
    let normalized = trimmed.to_lowercase();
    if !email_is_valid(&normalized) {
        errors.push(field, format!("{field} must be a valid email address"));
        return None;
    }
    Some(normalized)
}

/// Validates and normalizes an optional phone field.
fn optional_phone(
    field: &'static str,
    value: Option<String>,
    errors: &mut FieldErrors,
) -> Option<String> {
    let trimmed = normalize_optional(value)?;
    if !phone_is_valid(&trimmed) {
        errors.push(field, format!("{field} must be a valid phone number"));
        return None;
    }
    Some(trimmed)
}

/// Validates a required service label against the closed service set.
fn required_service(
    field: &'static str,
    value: Option<String>,
    errors: &mut FieldErrors,
) -> Option<ServiceKind> {
    let Some(raw) = value else {
        errors.push(field, format!("{field} is required"));
        return None;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{field} is required"));
        return None;
    }
    match ServiceKind::parse(trimmed) {
        Some(service) => Some(service),
        None => {
            errors.push(field, format!("{field} must be one of: {}", service_labels()));
            None
        }
    }
}

/// Validates a required booking date: `YYYY-MM-DD`, today or later.
fn required_date(
    field: &'static str,
    value: Option<String>,
    today: Date,
    errors: &mut FieldErrors,
) -> Option<String> {
    let Some(raw) = value else {
        errors.push(field, format!("{field} is required"));
        return None;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{field} is required"));
        return None;
    }
    let Ok(parsed) = Date::parse(trimmed, DATE_FORMAT) else {
        errors.push(field, format!("{field} must be a date in YYYY-MM-DD format"));
        return None;
    };
    if parsed < today {
        errors.push(field, format!("{field} must be today or a future date"));
        return None;
    }
    Some(trimmed.to_string())
}

/// Validates a required booking time: 24-hour `HH:MM`.
fn required_time(
    field: &'static str,
    value: Option<String>,
    errors: &mut FieldErrors,
) -> Option<String> {
    let Some(raw) = value else {
        errors.push(field, format!("{field} is required"));
        return None;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{field} is required"));
        return None;
    }
    if Time::parse(trimmed, TIME_FORMAT).is_err() {
        errors.push(field, format!("{field} must be a 24-hour time in HH:MM format"));
        return None;
    }
    Some(trimmed.to_string())
}

/// Validates a required visitor identifier, preserving it verbatim.
fn required_visitor_id(
    field: &'static str,
    value: Option<String>,
    errors: &mut FieldErrors,
) -> Option<VisitorId> {
    let Some(raw) = value else {
        errors.push(field, format!("{field} is required"));
        return None;
    };
    if raw.is_empty() {
        errors.push(field, format!("{field} is required"));
        return None;
    }
    if char_len(&raw) > VISITOR_ID_MAX {
        errors.push(field, format!("{field} must be at most {VISITOR_ID_MAX} characters"));
        return None;
    }
    Some(VisitorId::new(raw))
}

// ============================================================================
// SECTION: Normalization Helpers
// ============================================================================

/// Trims an optional string, coercing absent and empty values to `None`.
fn normalize_optional(value: Option<String>) -> Option<String> {
    let raw = value?;
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

/// Returns the length of a string in Unicode scalar values.
fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Syntactic email check: one `@`, bounded non-empty local part, dotted
/// domain with non-empty labels, no whitespace.
fn email_is_valid(value: &str) -> bool {
    if value.len() > EMAIL_MAX || value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > EMAIL_LOCAL_MAX {
        return false;
    }
    if domain.contains('@') || !domain.contains('.') {
        return false;
    }
    if domain.starts_with('.') || domain.ends_with('.') || domain.starts_with('-') || domain.ends_with('-')
    {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}

/// Phone check: digits plus common separators, with a bounded digit count.
fn phone_is_valid(value: &str) -> bool {
    if !value.chars().all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.')) {
        return false;
    }
    let digits = value.chars().filter(char::is_ascii_digit).count();
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
}

/// Returns the comma-separated list of bookable service labels.
fn service_labels() -> String {
    let labels: Vec<&'static str> = ServiceKind::ALL.iter().map(|kind| kind.as_str()).collect();
    labels.join(", ")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
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

    use super::email_is_valid;
    use super::normalize_optional;
    use super::phone_is_valid;

    #[test]
    fn email_check_accepts_plain_addresses() {
        assert!(email_is_valid("ada@example.com"));
        assert!(email_is_valid("first.last@sub.example.co"));
        assert!(email_is_valid("tag+filter@example.io"));
    }

    #[test]
    fn email_check_rejects_malformed_addresses() {
        assert!(!email_is_valid("plainaddress"));
        assert!(!email_is_valid("@example.com"));
        assert!(!email_is_valid("user@"));
        assert!(!email_is_valid("user@nodot"));
        assert!(!email_is_valid("user@.example.com"));
        assert!(!email_is_valid("user@example..com"));
        assert!(!email_is_valid("user name@example.com"));
        assert!(!email_is_valid("user@@example.com"));
    }

    #[test]
    fn phone_check_bounds_digit_count() {
        assert!(phone_is_valid("+1 (415) 555-0132"));
        assert!(phone_is_valid("4155550132"));
        assert!(!phone_is_valid("555-01"));
        assert!(!phone_is_valid("12345678901234567890"));
        assert!(!phone_is_valid("call me maybe"));
    }

    #[test]
    fn normalize_optional_coerces_empty_to_none() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some(String::new())), None);
        assert_eq!(normalize_optional(Some("   ".to_string())), None);
        assert_eq!(normalize_optional(Some("  Acme  ".to_string())), Some("Acme".to_string()));
    }
}
