//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use zidar_core::{AccountKind, UserId};

/// A shop account (domain type).
///
/// The password hash is deliberately not part of this type; it never leaves
/// the repository layer. See `UserRepository::get_password_hash`.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// First name.
    #[serde(rename = "ime")]
    pub first_name: String,
    /// Last name.
    #[serde(rename = "prezime")]
    pub last_name: String,
    /// Email address, unique across accounts.
    pub email: String,
    /// Contact phone number.
    #[serde(rename = "telefon")]
    pub phone: String,
    /// Street address.
    #[serde(rename = "adresa")]
    pub address: String,
    /// Individual, company, or admin.
    #[serde(rename = "tip_korisnika")]
    pub kind: AccountKind,
    /// Company name, only meaningful for company accounts.
    #[serde(rename = "naziv_firme")]
    pub company_name: Option<String>,
    /// VAT number, only meaningful for company accounts.
    #[serde(rename = "pdv_broj")]
    pub tax_id: Option<String>,
    /// When the account was registered.
    #[serde(rename = "datum_registracije")]
    pub registered_at: DateTime<Utc>,
}

impl User {
    /// Display name used by the frontend ("ime prezime").
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new(7),
            first_name: "Amar".to_string(),
            last_name: "Hodžić".to_string(),
            email: "amar@example.ba".to_string(),
            phone: "+387 61 123 456".to_string(),
            address: "Zmaja od Bosne 12, Sarajevo".to_string(),
            kind: AccountKind::Individual,
            company_name: None,
            tax_id: None,
            registered_at: Utc::now(),
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample_user().full_name(), "Amar Hodžić");
    }

    #[test]
    fn test_serializes_bosnian_field_names_without_password() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(json["ime"], "Amar");
        assert_eq!(json["tip_korisnika"], "fizicko_lice");
        assert!(json.get("sifra").is_none());
        assert!(json.get("first_name").is_none());
    }
}
