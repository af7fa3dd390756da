//! Fixturegen - messy customer CSV fixtures for data-cleaning pipelines.
//!
//! Fixturegen writes a deterministic CSV of synthetic customers whose
//! fields are deliberately damaged (stray whitespace, inconsistent casing,
//! varied boolean spellings) and which ends with business-key duplicates
//! carrying conflicting attributes. Downstream cleaning, validation and
//! deduplication code can be tested against it.
//!
//! # Architecture
//!
//! - `profile`: YAML profile schema and the built-in constants
//! - `record`: the `CustomerRecord` row and CSV header
//! - `messiness`: index-keyed formatting damage
//! - `generate`: the seeded generator producing a `Fixture`
//! - `writer`: CSV output
//! - `report`: run summary formatting (pretty, JSON)
//! - `cli`: command-line entry points

pub mod cli;
pub mod generate;
pub mod messiness;
pub mod profile;
pub mod record;
pub mod report;
pub mod writer;

pub use generate::{generate, DuplicateRow, Fixture, GenerateError, Generator};
pub use messiness::MessinessRule;
pub use profile::Profile;
pub use record::{CustomerRecord, HEADER};
