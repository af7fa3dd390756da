//! The fixture generator.
//!
//! Builds the generated rows from a seeded ChaCha8 stream, applies the
//! messiness rules and appends the business-key duplicates. Output is a
//! pure function of the profile: the same profile always yields the same
//! records.

use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use uuid::Builder;

use crate::messiness::MessinessRule;
use crate::profile::{DuplicateSpec, Profile, MAX_ROWS};
use crate::record::{CustomerRecord, CUSTOMER_ID_LEN};

/// Range of the numeric suffix in generated emails.
const EMAIL_SUFFIX_MIN: u32 = 1;
const EMAIL_SUFFIX_MAX: u32 = 999;

/// Errors that can occur while generating a fixture.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("duplicate source row {source_row} is out of range ({rows} rows generated)")]
    DuplicateSourceOutOfRange { source_row: usize, rows: usize },
    #[error("pool {0} is empty")]
    EmptyPool(&'static str),
    #[error("date {start} + {offset} days is out of range")]
    DateOutOfRange { start: NaiveDate, offset: u64 },
    #[error("{rows} rows requested, at most {max} supported")]
    TooManyRows { rows: usize, max: usize },
}

/// A business-key duplicate appended to the fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateRow {
    /// Index of the generated row whose key was copied
    pub source: usize,
    /// Index of the duplicate within `Fixture::records`
    pub row: usize,
    pub customer_id: String,
}

/// A generated fixture, ready to be written.
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Generated rows followed by the duplicates
    pub records: Vec<CustomerRecord>,
    /// Number of generated rows at the front of `records`
    pub generated: usize,
    /// Generated row indices each rule fired on
    pub rule_hits: BTreeMap<MessinessRule, Vec<usize>>,
    pub duplicates: Vec<DuplicateRow>,
}

impl Fixture {
    /// The generated rows, without the appended duplicates.
    pub fn generated_records(&self) -> &[CustomerRecord] {
        &self.records[..self.generated]
    }

    /// Number of rows the given rule damaged.
    pub fn hit_count(&self, rule: MessinessRule) -> usize {
        self.rule_hits.get(&rule).map(Vec::len).unwrap_or(0)
    }
}

/// Seeded record generator.
pub struct Generator<'a> {
    profile: &'a Profile,
    rng: ChaCha8Rng,
    issued_ids: HashSet<String>,
}

impl<'a> Generator<'a> {
    pub fn new(profile: &'a Profile) -> Self {
        Self {
            profile,
            rng: ChaCha8Rng::seed_from_u64(profile.seed),
            issued_ids: HashSet::with_capacity(profile.rows.min(MAX_ROWS)),
        }
    }

    /// Generate the full fixture.
    pub fn generate(mut self) -> Result<Fixture, GenerateError> {
        let profile = self.profile;
        let rows = profile.rows;
        if rows > MAX_ROWS {
            return Err(GenerateError::TooManyRows {
                rows,
                max: MAX_ROWS,
            });
        }
        let mut records = Vec::with_capacity(rows + profile.duplicates.len());
        let mut rule_hits: BTreeMap<MessinessRule, Vec<usize>> = BTreeMap::new();

        for index in 0..rows {
            let mut record = self.next_record()?;
            for rule in MessinessRule::ALL {
                if rule.applies(&profile.messiness, index) {
                    rule.apply(&profile.messiness, &mut record);
                    rule_hits.entry(rule).or_default().push(index);
                }
            }
            records.push(record);
        }

        let mut duplicates = Vec::with_capacity(profile.duplicates.len());
        for dup in &profile.duplicates {
            let source = records
                .get(dup.source)
                .filter(|_| dup.source < rows)
                .ok_or(GenerateError::DuplicateSourceOutOfRange {
                    source_row: dup.source,
                    rows,
                })?;
            let duplicate = self.duplicate_of(source, dup)?;
            duplicates.push(DuplicateRow {
                source: dup.source,
                row: records.len(),
                customer_id: duplicate.customer_id.clone(),
            });
            records.push(duplicate);
        }

        Ok(Fixture {
            records,
            generated: rows,
            rule_hits,
            duplicates,
        })
    }

    /// Draw one clean record. Draw order fixes the output for a seed.
    fn next_record(&mut self) -> Result<CustomerRecord, GenerateError> {
        let profile = self.profile;

        let customer_id = self.next_customer_id();
        let first_name = pick(&mut self.rng, &profile.first_names, "first_names")?;
        let last_name = pick(&mut self.rng, &profile.last_names, "last_names")?;
        let suffix = self.rng.gen_range(EMAIL_SUFFIX_MIN..=EMAIL_SUFFIX_MAX);
        let email = format!(
            "{}.{}{}@{}",
            first_name, last_name, suffix, profile.email_domain
        );
        let country_code = pick(&mut self.rng, &profile.countries, "countries")?;
        let offset = u64::from(self.rng.gen_range(0..=profile.window_days));
        let signup_date = profile
            .start_date
            .checked_add_days(Days::new(offset))
            .ok_or(GenerateError::DateOutOfRange {
                start: profile.start_date,
                offset,
            })?;
        let is_marketing_opt_in = pick(&mut self.rng, &profile.opt_in_tokens, "opt_in_tokens")?;

        Ok(CustomerRecord {
            customer_id,
            first_name,
            last_name,
            email,
            country_code,
            signup_date,
            is_marketing_opt_in,
        })
    }

    /// Truncated v4-layout UUID, redrawn until unique within this fixture.
    fn next_customer_id(&mut self) -> String {
        loop {
            let bytes: [u8; 16] = self.rng.gen();
            let mut id = Builder::from_random_bytes(bytes).into_uuid().to_string();
            id.truncate(CUSTOMER_ID_LEN);
            if self.issued_ids.insert(id.clone()) {
                return id;
            }
        }
    }

    fn duplicate_of(
        &self,
        source: &CustomerRecord,
        dup: &DuplicateSpec,
    ) -> Result<CustomerRecord, GenerateError> {
        let mut duplicate = CustomerRecord {
            customer_id: source.customer_id.clone(),
            first_name: source.first_name.clone(),
            last_name: source.last_name.clone(),
            email: source.email.clone(),
            country_code: dup.country_code.clone(),
            signup_date: dup.signup_date,
            is_marketing_opt_in: dup.is_marketing_opt_in.clone(),
        };

        // The copy must disagree with its source somewhere.
        if !duplicate.conflicts_with(source) {
            let shifted = if duplicate.signup_date > self.profile.start_date {
                duplicate.signup_date.pred_opt()
            } else {
                duplicate.signup_date.succ_opt()
            };
            duplicate.signup_date = shifted.ok_or(GenerateError::DateOutOfRange {
                start: duplicate.signup_date,
                offset: 1,
            })?;
        }

        Ok(duplicate)
    }
}

fn pick(
    rng: &mut ChaCha8Rng,
    pool: &[String],
    name: &'static str,
) -> Result<String, GenerateError> {
    pool.choose(rng)
        .cloned()
        .ok_or(GenerateError::EmptyPool(name))
}

/// Generate the fixture described by `profile`.
pub fn generate(profile: &Profile) -> Result<Fixture, GenerateError> {
    Generator::new(profile).generate()
}
