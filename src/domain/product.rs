//! Product entity and date rules for the catalog
//!
//! The backend stores dates as plain `YYYY-MM-DD` strings, so the entity
//! keeps them as strings and the date arithmetic lives in free functions
//! that parse on demand.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::validation::{rules, FieldErrors};

/// Wire format for dates, shared with the backend.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identifier length bounds enforced on drafts before any network check.
pub const ID_MIN_LEN: usize = 3;
pub const ID_MAX_LEN: usize = 10;

/// A catalog product as exchanged with the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// User-entered identifier, unique across the catalog
    pub id: String,
    pub name: String,
    pub description: String,
    /// Reference to the product logo asset
    pub logo: String,
    /// Release date, `YYYY-MM-DD`
    pub date_release: String,
    /// Revision date, always release + 1 calendar year
    pub date_revision: String,
}

impl Product {
    /// Validate the identifier field, producing the same named rule flags
    /// the form layer merges asynchronous results into.
    pub fn validate_id(id: &str) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let len = id.chars().count();

        if len == 0 {
            errors.set(rules::REQUIRED, serde_json::json!(true));
            return errors;
        }
        if len < ID_MIN_LEN {
            errors.set(
                rules::MIN_LENGTH,
                serde_json::json!({ "requiredLength": ID_MIN_LEN, "actualLength": len }),
            );
        }
        if len > ID_MAX_LEN {
            errors.set(
                rules::MAX_LENGTH,
                serde_json::json!({ "requiredLength": ID_MAX_LEN, "actualLength": len }),
            );
        }
        errors
    }

    /// Recompute `date_revision` from the current `date_release`.
    pub fn sync_revision_date(&mut self) -> Result<(), DateParseError> {
        self.date_revision = revision_date(&self.date_release)?;
        Ok(())
    }
}

/// Failure to interpret a wire date string.
#[derive(Debug, thiserror::Error)]
#[error("invalid date '{value}', expected YYYY-MM-DD")]
pub struct DateParseError {
    pub value: String,
}

fn parse_date(value: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DateParseError {
        value: value.to_string(),
    })
}

/// Revision date rule: exactly one calendar year after the release date.
///
/// `checked_add_months` clamps, so a Feb 29 release lands on the next
/// year's Feb 28.
pub fn revision_date(date_release: &str) -> Result<String, DateParseError> {
    let release = parse_date(date_release)?;
    let revision = release
        .checked_add_months(Months::new(12))
        .ok_or_else(|| DateParseError {
            value: date_release.to_string(),
        })?;
    Ok(revision.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2023-01-01", "2024-01-01")]
    #[case("2023-12-31", "2024-12-31")]
    #[case("2024-02-29", "2025-02-28")]
    #[case("2023-02-28", "2024-02-28")]
    fn revision_date_adds_one_calendar_year(#[case] release: &str, #[case] expected: &str) {
        assert_eq!(revision_date(release).unwrap(), expected);
    }

    #[test]
    fn revision_date_rejects_malformed_input() {
        assert!(revision_date("01/01/2023").is_err());
        assert!(revision_date("").is_err());
        assert!(revision_date("2023-13-01").is_err());
    }

    #[test]
    fn sync_revision_date_updates_in_place() {
        let mut product = Product {
            id: "trj-crd".to_string(),
            name: "Tarjeta de Crédito".to_string(),
            description: "Tarjeta de consumo".to_string(),
            logo: "logo.png".to_string(),
            date_release: "2023-06-15".to_string(),
            date_revision: String::new(),
        };
        product.sync_revision_date().unwrap();
        assert_eq!(product.date_revision, "2024-06-15");
    }

    #[test]
    fn validate_id_flags_empty_as_required_only() {
        let errors = Product::validate_id("");
        assert!(errors.contains(rules::REQUIRED));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn validate_id_flags_length_bounds() {
        assert!(Product::validate_id("ab").contains(rules::MIN_LENGTH));
        assert!(Product::validate_id("abcdefghijk").contains(rules::MAX_LENGTH));
        assert!(Product::validate_id("abc").is_empty());
        assert!(Product::validate_id("abcdefghij").is_empty());
    }

    #[test]
    fn product_serde_uses_backend_field_names() {
        let json = serde_json::json!({
            "id": "trj-crd",
            "name": "Tarjeta",
            "description": "Tarjeta de consumo",
            "logo": "logo.png",
            "date_release": "2023-01-01",
            "date_revision": "2024-01-01"
        });
        let product: Product = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(product.id, "trj-crd");
        assert_eq!(serde_json::to_value(&product).unwrap(), json);
    }
}
