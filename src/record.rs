//! The customer record written to the fixture.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column header, in field order.
pub const HEADER: [&str; 7] = [
    "customer_id",
    "first_name",
    "last_name",
    "email",
    "country_code",
    "signup_date",
    "is_marketing_opt_in",
];

/// Number of characters kept from the random UUID.
pub const CUSTOMER_ID_LEN: usize = 8;

/// One customer row.
///
/// String fields are stored exactly as they should appear in the CSV,
/// including any deliberate whitespace or casing damage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code: String,
    pub signup_date: NaiveDate,
    pub is_marketing_opt_in: String,
}

impl CustomerRecord {
    /// Whether `other` disagrees with this record on a non-key attribute.
    pub fn conflicts_with(&self, other: &CustomerRecord) -> bool {
        self.country_code != other.country_code
            || self.signup_date != other.signup_date
            || self.is_marketing_opt_in != other.is_marketing_opt_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CustomerRecord {
        CustomerRecord {
            customer_id: "1a2b3c4d".to_string(),
            first_name: "Quinn".to_string(),
            last_name: "Novak".to_string(),
            email: "Quinn.Novak12@Example.COM".to_string(),
            country_code: "pt".to_string(),
            signup_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            is_marketing_opt_in: "yes".to_string(),
        }
    }

    #[test]
    fn test_conflicts_ignore_key_fields() {
        let a = record();
        let mut b = a.clone();
        b.email = "other@example.com".to_string();
        assert!(!a.conflicts_with(&b));

        b.is_marketing_opt_in = "no".to_string();
        assert!(a.conflicts_with(&b));
    }

    #[test]
    fn test_header_matches_field_order() {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(vec![]);
        writer.serialize(record()).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, HEADER.join(","));
    }
}
