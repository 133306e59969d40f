use std::{io, path::Path};

use color_eyre::eyre::{Result, eyre};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::Serialize;

use crate::domain::{
    collection::{Collection, Field},
    record::{FieldValue, Record},
};

/// Reads a CSV file whose header names fields of `collection`, coercing each
/// cell to the field's kind. Empty cells become nulls.
pub fn read_records(collection: Collection, file_path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(file_path)
        .map_err(|e| eyre!("Could not read input file: {}", e))?;

    parse_records(collection, reader)
}

fn parse_records<R: io::Read>(
    collection: Collection,
    mut reader: csv::Reader<R>,
) -> Result<Vec<Record>> {
    let fields: Vec<&Field> = reader
        .headers()
        .map_err(|e| eyre!("Error reading header: {}", e))?
        .iter()
        .map(|h| collection.field(h).map_err(|e| eyre!(e)))
        .collect::<Result<_>>()?;

    reader
        .records()
        .enumerate()
        .map(|(i, row)| {
            let row = row.map_err(|e| eyre!("Error parsing row {}: {}", i + 1, e))?;
            to_record(&fields, &row).map_err(|e| eyre!("Error parsing row {}: {}", i + 1, e))
        })
        .collect()
}

fn to_record(fields: &[&Field], row: &StringRecord) -> Result<Record> {
    let mut record = Record::new();
    for (field, cell) in fields.iter().zip(row.iter()) {
        record.insert(field.name, FieldValue::parse(cell, field.kind)?);
    }

    Ok(record)
}

/// Writes `rows` as CSV with a header line to stdout.
pub fn print_csv<S: Serialize>(rows: impl IntoIterator<Item = S>) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(io::stdout());
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    Ok(())
}
