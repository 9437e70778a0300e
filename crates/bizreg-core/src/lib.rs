//! Core types and validation for business-registration submissions.
//!
//! This crate provides the foundational pieces shared by the gateway:
//!
//! - **Registration types**: the raw inbound payload shape and the normalized
//!   record produced by validation
//! - **Validator**: a pure function mapping a raw payload to either a
//!   normalized [`Registration`] or a per-field error map
//! - **Country table**: the static dial-code lookup used to compose the
//!   display phone number
//!
//! # Example
//!
//! ```
//! use bizreg_core::{validate, RegistrationBody};
//!
//! let body: RegistrationBody = serde_json::from_str(r#"{
//!     "business": {
//!         "businessName": "Acme Co",
//!         "businessType": "LLC",
//!         "address1": "1 Main St",
//!         "city": "Springfield",
//!         "state": "CA",
//!         "zip": "90210"
//!     },
//!     "contact": {
//!         "firstName": "Ada",
//!         "lastName": "Lovelace",
//!         "email": "ada@example.com",
//!         "countryCode": "+1",
//!         "phone": "(415) 555-0100"
//!     }
//! }"#).unwrap();
//!
//! let registration = validate(&body).unwrap();
//! assert_eq!(registration.business.name, "Acme Co");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod country;
pub mod registration;
pub mod validate;

pub use country::{resolve_country, Country, COUNTRIES};
pub use registration::{
    Business, BusinessFields, Contact, ContactFields, Registration, RegistrationBody,
};
pub use validate::{validate, FieldErrors};
