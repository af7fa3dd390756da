//! Profile schema definitions for fixturegen.
//!
//! A profile overrides the generator constants. Every field is optional and
//! an empty profile describes exactly the built-in fixture.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Profile schema versions this build understands.
pub const SUPPORTED_VERSIONS: &[&str] = &["1"];

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_ROWS: usize = 50;
/// Largest fixture a profile may request. Keeps 8-hex-char ids far from
/// exhaustion and allocations bounded.
pub const MAX_ROWS: usize = 1_000_000;
pub const DEFAULT_OUTPUT: &str = "data/customers.csv";
pub const DEFAULT_WINDOW_DAYS: u32 = 400;
pub const DEFAULT_EMAIL_DOMAIN: &str = "Example.COM";

pub const DEFAULT_START_DATE: NaiveDate = ymd(2024, 1, 1);

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => d,
        None => panic!("invalid calendar date"),
    }
}

const FIRST_NAMES: &[&str] = &[
    "Alex", "Sam", "Taylor", "Jordan", "Riley", "Casey", "Morgan", "Quinn", "Jamie", "Avery",
];
const LAST_NAMES: &[&str] = &[
    "Stone", "Rivera", "Kim", "Singh", "Dubois", "Khan", "Novak", "Silva", "Santos", "Murphy",
];
const COUNTRIES: &[&str] = &["nl", "de", "fr", "es", "br", "us", "uk", " it ", "pt"];
const OPT_IN_TOKENS: &[&str] = &["true", "false", "yes", "no", "1", "0", " t ", " f "];

fn owned(pool: &[&str]) -> Vec<String> {
    pool.iter().map(|s| s.to_string()).collect()
}

/// Top-level profile definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Profile {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub seed: u64,
    /// Number of generated rows, not counting appended duplicates
    pub rows: usize,
    pub output: PathBuf,
    /// First day of the signup window
    pub start_date: NaiveDate,
    /// Signup dates fall in `start_date ..= start_date + window_days`
    pub window_days: u32,
    pub email_domain: String,
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    pub countries: Vec<String>,
    pub opt_in_tokens: Vec<String>,
    pub messiness: MessinessConfig,
    pub duplicates: Vec<DuplicateSpec>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            description: None,
            seed: DEFAULT_SEED,
            rows: DEFAULT_ROWS,
            output: PathBuf::from(DEFAULT_OUTPUT),
            start_date: DEFAULT_START_DATE,
            window_days: DEFAULT_WINDOW_DAYS,
            email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
            first_names: owned(FIRST_NAMES),
            last_names: owned(LAST_NAMES),
            countries: owned(COUNTRIES),
            opt_in_tokens: owned(OPT_IN_TOKENS),
            messiness: MessinessConfig::default(),
            duplicates: DuplicateSpec::defaults(),
        }
    }
}

impl Profile {
    /// Parse a profile from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a profile from YAML text. An empty document yields the defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let profile: Profile = serde_yaml::from_str(content)?;
        Ok(profile)
    }

    /// Last day a generated signup date can take.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.start_date
            .checked_add_days(chrono::Days::new(u64::from(self.window_days)))
    }
}

/// Index-keyed formatting corruptions applied to generated rows.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MessinessConfig {
    /// Rows where `index % n == 0` get an upper-cased, space-padded email
    pub padded_email_every: usize,
    pub spaced_country_every: usize,
    pub spaced_country: String,
    pub alt_truthy_every: usize,
    pub alt_truthy: String,
}

impl Default for MessinessConfig {
    fn default() -> Self {
        Self {
            padded_email_every: 10,
            spaced_country_every: 13,
            spaced_country: " nl ".to_string(),
            alt_truthy_every: 17,
            alt_truthy: "Y".to_string(),
        }
    }
}

/// A business-key duplicate appended after the generated rows.
///
/// The duplicate copies `customer_id`, names and email from row `source`
/// and takes the remaining fields from this entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DuplicateSpec {
    pub source: usize,
    pub country_code: String,
    pub signup_date: NaiveDate,
    pub is_marketing_opt_in: String,
}

impl DuplicateSpec {
    fn defaults() -> Vec<Self> {
        vec![
            DuplicateSpec {
                source: 5,
                country_code: "NL".to_string(),
                signup_date: ymd(2025, 1, 31),
                is_marketing_opt_in: "true".to_string(),
            },
            DuplicateSpec {
                source: 7,
                country_code: "de".to_string(),
                signup_date: ymd(2025, 2, 4),
                is_marketing_opt_in: "false".to_string(),
            },
        ]
    }
}

/// Validate a profile for correctness.
pub fn validate(profile: &Profile) -> anyhow::Result<()> {
    if !SUPPORTED_VERSIONS.contains(&profile.version.as_str()) {
        anyhow::bail!(
            "unsupported profile version {:?}, expected one of: {}",
            profile.version,
            SUPPORTED_VERSIONS.join(", ")
        );
    }

    if profile.rows > MAX_ROWS {
        anyhow::bail!(
            "rows must be at most {}, got {}",
            MAX_ROWS,
            profile.rows
        );
    }

    let pools = [
        ("first_names", &profile.first_names),
        ("last_names", &profile.last_names),
        ("countries", &profile.countries),
        ("opt_in_tokens", &profile.opt_in_tokens),
    ];
    for (name, pool) in pools {
        if pool.is_empty() {
            anyhow::bail!("pool {} must not be empty", name);
        }
    }

    let m = &profile.messiness;
    let periods = [
        ("padded_email_every", m.padded_email_every),
        ("spaced_country_every", m.spaced_country_every),
        ("alt_truthy_every", m.alt_truthy_every),
    ];
    for (name, period) in periods {
        if period == 0 {
            anyhow::bail!("messiness.{} must be greater than zero", name);
        }
    }

    if profile.end_date().is_none() {
        anyhow::bail!(
            "signup window of {} days from {} overflows the calendar",
            profile.window_days,
            profile.start_date
        );
    }

    for d in &profile.duplicates {
        if d.source >= profile.rows {
            anyhow::bail!(
                "duplicate source row {} is out of range (profile generates {} rows)",
                d.source,
                profile.rows
            );
        }
    }

    Ok(())
}

/// Rules whose period exceeds the row count only ever fire on row 0.
pub fn sparse_rules(profile: &Profile) -> Vec<&'static str> {
    let m = &profile.messiness;
    [
        ("padded_email_every", m.padded_email_every),
        ("spaced_country_every", m.spaced_country_every),
        ("alt_truthy_every", m.alt_truthy_every),
    ]
    .into_iter()
    .filter(|(_, period)| profile.rows > 1 && *period >= profile.rows)
    .map(|(name, _)| name)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile() {
        let yaml = r#"
version: "1"
seed: 7
rows: 20
output: "out/people.csv"
countries: ["nl", "be"]
messiness:
  spaced_country_every: 4
duplicates:
  - source: 3
    country_code: "BE"
    signup_date: 2024-06-01
    is_marketing_opt_in: "no"
"#;
        let profile = Profile::parse_str(yaml).unwrap();
        assert_eq!(profile.seed, 7);
        assert_eq!(profile.rows, 20);
        assert_eq!(profile.output, PathBuf::from("out/people.csv"));
        assert_eq!(profile.countries, vec!["nl", "be"]);
        assert_eq!(profile.messiness.spaced_country_every, 4);
        // Unset messiness fields keep their defaults
        assert_eq!(profile.messiness.padded_email_every, 10);
        assert_eq!(profile.duplicates.len(), 1);
        assert_eq!(
            profile.duplicates[0].signup_date,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert!(validate(&profile).is_ok());
    }

    #[test]
    fn test_empty_profile_is_default() {
        let profile = Profile::parse_str("").unwrap();
        assert_eq!(profile.seed, DEFAULT_SEED);
        assert_eq!(profile.rows, DEFAULT_ROWS);
        assert_eq!(profile.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(profile.duplicates.len(), 2);
        assert_eq!(profile.opt_in_tokens.len(), 8);
        assert!(!profile.opt_in_tokens.contains(&"Y".to_string()));
    }

    #[test]
    fn test_default_window_ends_2025_02_04() {
        let profile = Profile::default();
        assert_eq!(
            profile.end_date(),
            NaiveDate::from_ymd_opt(2025, 2, 4)
        );
    }

    #[test]
    fn test_validate_rejects_zero_period() {
        let mut profile = Profile::default();
        profile.messiness.alt_truthy_every = 0;
        let err = validate(&profile).unwrap_err();
        assert!(err.to_string().contains("alt_truthy_every"));
    }

    #[test]
    fn test_validate_rejects_empty_pool() {
        let mut profile = Profile::default();
        profile.last_names.clear();
        let err = validate(&profile).unwrap_err();
        assert!(err.to_string().contains("last_names"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_duplicate() {
        let profile = Profile {
            rows: 6,
            ..Profile::default()
        };
        let err = validate(&profile).unwrap_err();
        assert!(err.to_string().contains("duplicate source row 7"));
    }

    #[test]
    fn test_validate_rejects_too_many_rows() {
        let profile = Profile {
            rows: MAX_ROWS + 1,
            ..Profile::default()
        };
        let err = validate(&profile).unwrap_err();
        assert!(err.to_string().contains("rows must be at most 1000000"));

        let profile = Profile {
            rows: usize::MAX,
            ..Profile::default()
        };
        assert!(validate(&profile).is_err());

        let profile = Profile {
            rows: MAX_ROWS,
            ..Profile::default()
        };
        assert!(validate(&profile).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_version() {
        let profile = Profile {
            version: "9".to_string(),
            ..Profile::default()
        };
        assert!(validate(&profile).is_err());
    }

    #[test]
    fn test_sparse_rules() {
        let profile = Profile {
            rows: 12,
            duplicates: vec![],
            ..Profile::default()
        };
        assert_eq!(
            sparse_rules(&profile),
            vec!["spaced_country_every", "alt_truthy_every"]
        );
        assert!(sparse_rules(&Profile::default()).is_empty());
    }
}
