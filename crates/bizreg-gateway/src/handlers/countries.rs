//! Country table endpoint.
//!
//! Serves the static dial-code table the form UI renders in its country
//! selector. The table never changes at runtime.

use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use bizreg_core::{Country, COUNTRIES};

/// Response for the country list.
#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    /// The supported countries, in selector order.
    pub countries: &'static [Country],
}

/// Handle `GET /v1/countries`.
pub async fn list_countries() -> impl IntoResponse {
    Json(CountriesResponse {
        countries: COUNTRIES,
    })
}
