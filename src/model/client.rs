//! Client input model.

use serde::{Deserialize, Serialize};

/// Form data for creating or updating a client.
///
/// Only `name` and `country` are mandatory; every other field is stored as
/// NULL when absent or blank. `country` is an ISO-2 code per the WIPO
/// standard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientInput {
    /// Identity, required for updates, ignored on insert.
    pub client_id: Option<i64>,
    pub name: Option<String>,
    /// Internal short code used on invoices and file references.
    pub client_code: Option<String>,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    /// ISO-2 country code, exactly two letters.
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub vat_number: Option<String>,
    /// Payment term in days, kept as entered.
    pub payment_term: Option<String>,
    pub notes: Option<String>,
}
