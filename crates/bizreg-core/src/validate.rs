//! Pure payload validation.
//!
//! [`validate`] maps a raw [`RegistrationBody`] to either a normalized
//! [`Registration`] or a [`FieldErrors`] map. It has no side effects, is
//! deterministic, and is safe to call repeatedly. A payload that fails
//! validation never reaches the upstream client.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::registration::{Business, Contact, Registration, RegistrationBody};

static ZIP_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5}$").unwrap());
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{3}\) \d{3}-\d{4}$").unwrap());
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Per-field validation errors, keyed by the form's field name.
///
/// At most one message is recorded per field; the first violation wins.
/// Backed by a `BTreeMap` so serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    /// Record an error for `field` unless one is already present.
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    /// Look up the message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    /// Number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

/// Validate a raw submission body.
///
/// Trimming is applied before every emptiness or pattern check. `address2`
/// is optional and normalized to an empty string when absent.
///
/// # Errors
///
/// Returns a [`FieldErrors`] map with one entry per violating field.
pub fn validate(body: &RegistrationBody) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = required(&mut errors, "businessName", &body.business.business_name);
    let business_type = required(&mut errors, "businessType", &body.business.business_type);
    let address1 = required(&mut errors, "address1", &body.business.address1);
    let address2 = body
        .business
        .address2
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_string();
    let city = required(&mut errors, "city", &body.business.city);

    let state = body.business.state.trim().to_string();
    if state.len() < 2 {
        errors.push("state", "State must be at least 2 characters");
    }

    let zip = body.business.zip.trim().to_string();
    if !ZIP_PATTERN.is_match(&zip) {
        errors.push("zip", "Zip must be 5 digits");
    }

    let first_name = required(&mut errors, "firstName", &body.contact.first_name);
    let last_name = required(&mut errors, "lastName", &body.contact.last_name);

    let email = body.contact.email.trim().to_string();
    if !EMAIL_PATTERN.is_match(&email) {
        errors.push("email", "Invalid email");
    }

    let country_code = required(&mut errors, "countryCode", &body.contact.country_code);

    let phone = body.contact.phone.trim().to_string();
    if !PHONE_PATTERN.is_match(&phone) {
        errors.push("phone", "Phone must be (000) 000-0000");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Registration {
        business: Business {
            name,
            business_type,
            address1,
            address2,
            city,
            state,
            zip,
        },
        contact: Contact {
            first_name,
            last_name,
            email,
            country_code,
            phone,
        },
    })
}

/// Trim `value`, recording a "Required" error when the result is empty.
fn required(errors: &mut FieldErrors, field: &'static str, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, "Required");
    }
    trimmed.to_string()
}
