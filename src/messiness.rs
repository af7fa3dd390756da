//! Messiness rules: deliberate, index-triggered formatting damage.
//!
//! Each rule fires on generated rows whose index is a multiple of its
//! period (row 0 always qualifies). Rules are independent, so a row can be
//! hit by several of them.

use serde::{Deserialize, Serialize};

use crate::profile::MessinessConfig;
use crate::record::CustomerRecord;

/// Padding placed on both sides of a damaged email.
pub const EMAIL_PADDING: &str = "  ";

/// A single messiness rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessinessRule {
    /// Upper-cased email surrounded by whitespace
    PaddedEmail,
    /// Country code replaced by a space-padded variant
    SpacedCountry,
    /// Opt-in replaced by an alternate truthy spelling
    AltTruthy,
}

impl MessinessRule {
    /// All rules, in application order.
    pub const ALL: [MessinessRule; 3] = [
        MessinessRule::PaddedEmail,
        MessinessRule::SpacedCountry,
        MessinessRule::AltTruthy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessinessRule::PaddedEmail => "padded_email",
            MessinessRule::SpacedCountry => "spaced_country",
            MessinessRule::AltTruthy => "alt_truthy",
        }
    }

    /// The row period for this rule.
    pub fn period(&self, config: &MessinessConfig) -> usize {
        match self {
            MessinessRule::PaddedEmail => config.padded_email_every,
            MessinessRule::SpacedCountry => config.spaced_country_every,
            MessinessRule::AltTruthy => config.alt_truthy_every,
        }
    }

    /// Whether the rule fires for the generated row at `index`.
    ///
    /// A zero period never fires; profiles with one are rejected earlier.
    pub fn applies(&self, config: &MessinessConfig, index: usize) -> bool {
        match self.period(config) {
            0 => false,
            n => index % n == 0,
        }
    }

    /// Damage `record` in place.
    pub fn apply(&self, config: &MessinessConfig, record: &mut CustomerRecord) {
        match self {
            MessinessRule::PaddedEmail => record.email = pad_email(&record.email),
            MessinessRule::SpacedCountry => record.country_code = config.spaced_country.clone(),
            MessinessRule::AltTruthy => record.is_marketing_opt_in = config.alt_truthy.clone(),
        }
    }
}

impl std::fmt::Display for MessinessRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Upper-case an email and wrap it in whitespace.
pub fn pad_email(email: &str) -> String {
    format!("{EMAIL_PADDING}{}{EMAIL_PADDING}", email.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record() -> CustomerRecord {
        CustomerRecord {
            customer_id: "0f3c9a71".to_string(),
            first_name: "Riley".to_string(),
            last_name: "Khan".to_string(),
            email: "Riley.Khan404@Example.COM".to_string(),
            country_code: "fr".to_string(),
            signup_date: NaiveDate::from_ymd_opt(2024, 8, 20).unwrap(),
            is_marketing_opt_in: "0".to_string(),
        }
    }

    #[test]
    fn test_pad_email() {
        assert_eq!(
            pad_email("Riley.Khan404@Example.COM"),
            "  RILEY.KHAN404@EXAMPLE.COM  "
        );
    }

    #[test]
    fn test_default_periods() {
        let cfg = MessinessConfig::default();
        let hits = |rule: MessinessRule| -> Vec<usize> {
            (0..50).filter(|i| rule.applies(&cfg, *i)).collect()
        };
        assert_eq!(hits(MessinessRule::PaddedEmail), vec![0, 10, 20, 30, 40]);
        assert_eq!(hits(MessinessRule::SpacedCountry), vec![0, 13, 26, 39]);
        assert_eq!(hits(MessinessRule::AltTruthy), vec![0, 17, 34]);
    }

    #[test]
    fn test_zero_period_never_fires() {
        let cfg = MessinessConfig {
            alt_truthy_every: 0,
            ..MessinessConfig::default()
        };
        assert!(!MessinessRule::AltTruthy.applies(&cfg, 0));
    }

    #[test]
    fn test_apply_all_rules() {
        let cfg = MessinessConfig::default();
        let mut r = record();
        for rule in MessinessRule::ALL {
            rule.apply(&cfg, &mut r);
        }
        assert_eq!(r.email, "  RILEY.KHAN404@EXAMPLE.COM  ");
        assert_eq!(r.country_code, " nl ");
        assert_eq!(r.is_marketing_opt_in, "Y");
        // Key fields are untouched
        assert_eq!(r.customer_id, "0f3c9a71");
        assert_eq!(r.first_name, "Riley");
    }
}
