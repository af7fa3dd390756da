//! CSV output for generated fixtures.
//!
//! Fields are quoted only when they contain a delimiter, quote or line
//! break, records end in CRLF, and the header is always written, even for
//! an empty fixture.

use anyhow::Context;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::record::{CustomerRecord, HEADER};

/// Write the header and `records` to `out`.
pub fn write_csv<W: Write>(out: W, records: &[CustomerRecord]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);

    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the fixture to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, records: &[CustomerRecord]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }

    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(BufWriter::new(file), records)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Render the fixture as an in-memory CSV string.
pub fn to_csv_string(records: &[CustomerRecord]) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    Ok(String::from_utf8(buf)?)
}
