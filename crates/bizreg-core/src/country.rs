//! Static country lookup table.
//!
//! The table backs the contact form's country selector and supplies the dial
//! code used to compose the display phone number. It is immutable and never
//! changes at runtime.

use serde::Serialize;

/// A single entry in the country table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    /// Display name.
    pub name: &'static str,
    /// International dial code, including the leading `+`.
    pub dial_code: &'static str,
    /// Flag image URL rendered by the form UI.
    pub flag_url: &'static str,
}

/// The supported countries, in selector order.
pub const COUNTRIES: &[Country] = &[
    Country {
        name: "United States",
        dial_code: "+1",
        flag_url: "https://upload.wikimedia.org/wikipedia/en/a/a4/Flag_of_the_United_States.svg",
    },
    Country {
        name: "Canada",
        dial_code: "+1",
        flag_url: "https://upload.wikimedia.org/wikipedia/commons/c/cf/Flag_of_Canada.svg",
    },
    Country {
        name: "United Kingdom",
        dial_code: "+44",
        flag_url: "https://upload.wikimedia.org/wikipedia/en/a/ae/Flag_of_the_United_Kingdom.svg",
    },
    Country {
        name: "Australia",
        dial_code: "+61",
        flag_url: "https://upload.wikimedia.org/wikipedia/commons/b/b9/Flag_of_Australia.svg",
    },
    Country {
        name: "Germany",
        dial_code: "+49",
        flag_url: "https://upload.wikimedia.org/wikipedia/en/b/ba/Flag_of_Germany.svg",
    },
    Country {
        name: "France",
        dial_code: "+33",
        flag_url: "https://upload.wikimedia.org/wikipedia/en/c/c3/Flag_of_France.svg",
    },
    Country {
        name: "Japan",
        dial_code: "+81",
        flag_url: "https://upload.wikimedia.org/wikipedia/en/9/9e/Flag_of_Japan.svg",
    },
    Country {
        name: "China",
        dial_code: "+86",
        flag_url: "https://upload.wikimedia.org/wikipedia/commons/0/0d/Flag_of_China.svg",
    },
    Country {
        name: "India",
        dial_code: "+91",
        flag_url: "https://upload.wikimedia.org/wikipedia/en/4/41/Flag_of_India.svg",
    },
    Country {
        name: "Brazil",
        dial_code: "+55",
        flag_url: "https://upload.wikimedia.org/wikipedia/en/0/05/Flag_of_Brazil.svg",
    },
];

/// Resolve a country from a selector string.
///
/// An all-digit selector is treated as a positional index into the table;
/// anything else is matched against dial codes. Any miss falls back to the
/// first entry.
#[must_use]
pub fn resolve_country(selector: &str) -> &'static Country {
    let selector = selector.trim();
    if !selector.is_empty() && selector.bytes().all(|b| b.is_ascii_digit()) {
        return selector
            .parse::<usize>()
            .ok()
            .and_then(|idx| COUNTRIES.get(idx))
            .unwrap_or(&COUNTRIES[0]);
    }
    COUNTRIES
        .iter()
        .find(|c| c.dial_code == selector)
        .unwrap_or(&COUNTRIES[0])
}
