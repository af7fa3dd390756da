//! Command-line interface for fixturegen.

use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};

use crate::generate;
use crate::profile::{self, Profile};
use crate::report::{self, RunSummary};
use crate::writer;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Default profile file names to search for.
const DEFAULT_PROFILE_NAMES: &[&str] = &["fixturegen.yaml", ".fixturegen.yaml"];

/// Generate a messy customer CSV fixture for data-cleaning pipelines.
///
/// Without arguments, writes 50 customers plus 2 business-key duplicates
/// to data/customers.csv using seed 42.
#[derive(Parser)]
#[command(name = "fixturegen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the customer fixture (default)
    #[command(visible_alias = "gen")]
    Generate(GenerateArgs),
    /// Create a new profile from a template
    Init(InitArgs),
}

/// Arguments for the generate command.
#[derive(Args)]
pub struct GenerateArgs {
    /// Path to profile YAML file (default: auto-discover, else built-in)
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Random seed (overrides the profile)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of generated rows before duplicates (overrides the profile)
    #[arg(short = 'n', long)]
    pub rows: Option<usize>,

    /// Output CSV path (overrides the profile)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the CSV to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Summary format: pretty, json, or quiet
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            profile: None,
            seed: None,
            rows: None,
            output: None,
            stdout: false,
            format: "pretty".to_string(),
        }
    }
}

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "fixturegen.yaml")]
    pub output: PathBuf,

    /// Template to use
    #[arg(short, long, default_value = "default")]
    pub template: String,

    /// List available templates
    #[arg(short, long)]
    pub list: bool,
}

/// A bundled profile written by `init`.
struct Template {
    name: &'static str,
    content: &'static str,
}

impl Template {
    fn profile(&self) -> anyhow::Result<Profile> {
        Profile::parse_str(self.content)
            .map_err(|e| anyhow::anyhow!("bundled template {} is invalid: {}", self.name, e))
    }
}

/// All available templates.
static TEMPLATES: &[Template] = &[
    Template {
        name: "default",
        content: include_str!("templates/default.yaml"),
    },
    Template {
        name: "dedupe-heavy",
        content: include_str!("templates/dedupe-heavy.yaml"),
    },
];

/// Discover a profile file in the current directory.
fn discover_profile() -> Option<PathBuf> {
    DEFAULT_PROFILE_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Load the profile and apply command-line overrides.
pub fn resolve_profile(args: &GenerateArgs) -> anyhow::Result<(Profile, Option<PathBuf>)> {
    let source = args.profile.clone().or_else(discover_profile);

    let mut profile = match &source {
        Some(path) => Profile::parse_file(path)
            .map_err(|e| anyhow::anyhow!("parsing profile {}: {}", path.display(), e))?,
        None => Profile::default(),
    };

    if let Some(seed) = args.seed {
        profile.seed = seed;
    }
    if let Some(rows) = args.rows {
        profile.rows = rows;
    }
    if let Some(output) = &args.output {
        profile.output = output.clone();
    }

    Ok((profile, source))
}

/// Run the generate command.
pub fn run_generate(args: &GenerateArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" && args.format != "quiet" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'json', or 'quiet'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let (profile, _source) = match resolve_profile(args) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if let Err(e) = profile::validate(&profile) {
        eprintln!("Error: invalid profile: {}", e);
        return Ok(EXIT_ERROR);
    }

    for rule in profile::sparse_rules(&profile) {
        eprintln!(
            "Warning: messiness.{} exceeds the row count; the rule only hits row 0",
            rule
        );
    }

    let fixture = generate::generate(&profile)?;

    if args.stdout {
        writer::write_csv(io::stdout().lock(), &fixture.records)?;
        return Ok(EXIT_SUCCESS);
    }

    writer::write_file(&profile.output, &fixture.records)?;

    let summary = RunSummary::new(&profile.output, &profile, &fixture);
    match args.format.as_str() {
        "json" => report::write_json(&summary)?,
        "quiet" => {}
        _ => report::write_pretty(&summary),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.list {
        return list_templates();
    }

    let Some(template) = TEMPLATES.iter().find(|t| t.name == args.template) else {
        eprintln!("Error: unknown template {:?}", args.template);
        eprintln!("Run 'fixturegen init --list' to see available templates");
        return Ok(EXIT_ERROR);
    };
    let profile = template.profile()?;

    // Never clobber a hand-edited profile.
    if args.output.exists() {
        eprintln!("Error: profile already exists: {}", args.output.display());
        eprintln!("Remove it or pass --output to write the template elsewhere");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, template.content) {
        eprintln!("Error: failed to write profile: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!(
        "Created {} from template '{}'",
        args.output.display(),
        template.name
    );
    println!(
        "  seed {}, {} rows + {} duplicates -> {}",
        profile.seed,
        profile.rows,
        profile.duplicates.len(),
        profile.output.display()
    );
    println!();
    println!(
        "Run: fixturegen generate --profile {}",
        args.output.display()
    );

    Ok(EXIT_SUCCESS)
}

/// List available templates with the fixture each one produces.
fn list_templates() -> anyhow::Result<i32> {
    println!(
        "  {:<14} {:>6} {:>5} {:>6}  {}",
        "TEMPLATE", "ROWS", "DUPS", "SEED", "OUTPUT"
    );

    for template in TEMPLATES {
        let profile = template.profile()?;
        println!(
            "  {:<14} {:>6} {:>5} {:>6}  {}",
            template.name,
            profile.rows,
            profile.duplicates.len(),
            profile.seed,
            profile.output.display()
        );
        if let Some(description) = &profile.description {
            println!("  {:<14} {}", "", description);
        }
    }

    println!();
    println!("Usage: fixturegen init --template <name>");

    Ok(EXIT_SUCCESS)
}
