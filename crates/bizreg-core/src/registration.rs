//! Registration payload types.
//!
//! Two layers are kept deliberately separate: the raw inbound shape as the
//! form submits it ([`RegistrationBody`]), where every field is optional at
//! the wire level so that a missing field surfaces as a per-field validation
//! error rather than a deserialization failure, and the normalized record
//! ([`Registration`]) produced by [`crate::validate`], where every field has
//! already been trimmed and checked.

use serde::Deserialize;

/// Raw business fields as submitted by the form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessFields {
    /// Legal business name.
    #[serde(default)]
    pub business_name: String,
    /// Business type (e.g. "LLC").
    #[serde(default)]
    pub business_type: String,
    /// First address line.
    #[serde(default)]
    pub address1: String,
    /// Optional second address line.
    #[serde(default)]
    pub address2: Option<String>,
    /// City.
    #[serde(default)]
    pub city: String,
    /// State or region code.
    #[serde(default)]
    pub state: String,
    /// ZIP code, exactly five digits.
    #[serde(default)]
    pub zip: String,
}

/// Raw contact fields as submitted by the form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
    /// Contact first name.
    #[serde(default)]
    pub first_name: String,
    /// Contact last name.
    #[serde(default)]
    pub last_name: String,
    /// Contact email address.
    #[serde(default)]
    pub email: String,
    /// Country selector: a positional index or a dial-code string.
    #[serde(default)]
    pub country_code: String,
    /// Phone number in `(000) 000-0000` form.
    #[serde(default)]
    pub phone: String,
}

/// The complete raw submission body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationBody {
    /// Business section of the form.
    #[serde(default)]
    pub business: BusinessFields,
    /// Contact section of the form.
    #[serde(default)]
    pub contact: ContactFields,
}

/// A validated, trimmed business record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Business {
    /// Legal business name.
    pub name: String,
    /// Business type.
    pub business_type: String,
    /// First address line.
    pub address1: String,
    /// Second address line, normalized to `""` when absent.
    pub address2: String,
    /// City.
    pub city: String,
    /// State or region code, at least two characters.
    pub state: String,
    /// Five-digit ZIP code.
    pub zip: String,
}

/// A validated, trimmed contact record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Contact first name.
    pub first_name: String,
    /// Contact last name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Country selector, as submitted.
    pub country_code: String,
    /// Phone number in `(000) 000-0000` form.
    pub phone: String,
}

/// A fully validated registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// The business record.
    pub business: Business,
    /// The contact record.
    pub contact: Contact,
}
