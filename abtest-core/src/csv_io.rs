//! CSV encoding of two-group datasets.
//!
//! The expected layout is a header row containing at least a `group` column
//! (values `A` or `B`) and an `outcome` column (numbers). Any other columns
//! are ignored.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::domain::{Dataset, DatasetSource, Group, Record};
use crate::error::{CoreError, Result};

pub const GROUP_COLUMN: &str = "group";
pub const OUTCOME_COLUMN: &str = "outcome";

/// Example file shipped to users so they can see the expected structure.
pub const SAMPLE_TEMPLATE: &str = "\
group,outcome
A,52.4
A,47.9
A,50.3
A,55.1
A,49.6
B,56.2
B,53.8
B,58.9
B,54.4
B,57.0
";

/// Read a dataset from CSV text.
pub fn read_csv<R: Read>(reader: R, source: DatasetSource) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CoreError::malformed(1, format!("missing required column '{name}'")))
    };
    let group_idx = column(GROUP_COLUMN)?;
    let outcome_idx = column(OUTCOME_COLUMN)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let group_field = row.get(group_idx).unwrap_or_default();
        let group: Group = group_field.parse().map_err(|_| {
            CoreError::malformed(
                line,
                format!("group must be 'A' or 'B', found '{group_field}'"),
            )
        })?;

        let outcome_field = row.get(outcome_idx).unwrap_or_default();
        let outcome: f64 = outcome_field.parse().map_err(|_| {
            CoreError::malformed(line, format!("outcome '{outcome_field}' is not numeric"))
        })?;
        if !outcome.is_finite() {
            return Err(CoreError::malformed(
                line,
                format!("outcome '{outcome_field}' is not a finite number"),
            ));
        }

        records.push(Record::new(group, outcome));
    }

    let dataset = Dataset::new(records, source);
    tracing::info!(
        records = dataset.len(),
        group_a = dataset.count(Group::A),
        group_b = dataset.count(Group::B),
        "Dataset loaded"
    );
    Ok(dataset)
}

/// Read a dataset from a CSV file on disk.
pub fn read_csv_path<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_csv(
        file,
        DatasetSource::Upload {
            path: path.to_path_buf(),
        },
    )
}

/// Write a dataset as `group,outcome` CSV.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([GROUP_COLUMN, OUTCOME_COLUMN])?;
    for record in dataset.records() {
        let outcome = record.outcome.to_string();
        writer.write_record([record.group.as_str(), outcome.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// The bundled example file parsed as a dataset.
pub fn sample_dataset() -> Result<Dataset> {
    read_csv(SAMPLE_TEMPLATE.as_bytes(), DatasetSource::Inline)
}
