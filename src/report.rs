//! Run summaries for fixturegen.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::generate::{DuplicateRow, Fixture};
use crate::messiness::MessinessRule;
use crate::profile::Profile;

/// Summary of a generated fixture.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub version: String,
    pub output: String,
    pub seed: u64,
    pub generated_rows: usize,
    pub duplicate_rows: usize,
    pub total_rows: usize,
    pub rules: Vec<RuleSummary>,
    pub duplicates: Vec<DuplicateSummary>,
}

/// How often a messiness rule fired.
#[derive(Debug, Serialize, Deserialize)]
pub struct RuleSummary {
    pub rule: String,
    pub every: usize,
    pub rows: Vec<usize>,
}

/// A business-key duplicate in the summary.
#[derive(Debug, Serialize, Deserialize)]
pub struct DuplicateSummary {
    pub customer_id: String,
    pub source_row: usize,
    pub row: usize,
}

impl From<&DuplicateRow> for DuplicateSummary {
    fn from(d: &DuplicateRow) -> Self {
        Self {
            customer_id: d.customer_id.clone(),
            source_row: d.source,
            row: d.row,
        }
    }
}

impl RunSummary {
    pub fn new(output: &Path, profile: &Profile, fixture: &Fixture) -> Self {
        let rules = MessinessRule::ALL
            .iter()
            .map(|rule| RuleSummary {
                rule: rule.as_str().to_string(),
                every: rule.period(&profile.messiness),
                rows: fixture.rule_hits.get(rule).cloned().unwrap_or_default(),
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            output: output.to_string_lossy().to_string(),
            seed: profile.seed,
            generated_rows: fixture.generated,
            duplicate_rows: fixture.duplicates.len(),
            total_rows: fixture.records.len(),
            rules,
            duplicates: fixture.duplicates.iter().map(DuplicateSummary::from).collect(),
        }
    }
}

/// Write the summary in JSON format.
pub fn write_json(summary: &RunSummary) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    println!("{}", json);
    Ok(())
}

/// Write the summary in pretty (human-readable) format.
pub fn write_pretty(summary: &RunSummary) {
    println!();
    print!("  ");
    print!("{}", "fixturegen".cyan().bold());
    println!(" v{}", summary.version);
    println!();

    print!("  {}", "Output: ".dimmed());
    println!("{}", summary.output);
    print!("  {}", "Seed:   ".dimmed());
    println!("{}", summary.seed);
    println!();

    print!("  {}", "✓ WROTE".green());
    println!(
        "  {} rows ({} generated + {} duplicates)",
        summary.total_rows.to_string().bold(),
        summary.generated_rows,
        summary.duplicate_rows
    );
    println!();

    write_rules(&summary.rules);

    if !summary.duplicates.is_empty() {
        println!();
        write_duplicates(&summary.duplicates);
    }
    println!();
}

fn write_rules(rules: &[RuleSummary]) {
    println!("  {}", "Messiness:".bold());
    for r in rules {
        let count = r.rows.len();
        let plural = if count != 1 { "s" } else { "" };
        println!(
            "    {:<18} every {:>3}  {} row{}",
            r.rule, r.every, count, plural
        );
    }
}

fn write_duplicates(duplicates: &[DuplicateSummary]) {
    println!("  {} ({}):", "Duplicates".bold(), duplicates.len());
    for d in duplicates {
        print!("    {}", d.customer_id.blue());
        println!(
            "  {}",
            format!("row {} copies row {}", d.row, d.source_row).dimmed()
        );
    }
}
