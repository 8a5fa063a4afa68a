//! Comma-delimited text parser
//!
//! Reads with quoting disabled, so `"` is an ordinary character. Header names
//! are lower-cased; values are trimmed and kept as strings.

use crate::core::ParseError;
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};
use std::collections::HashMap;

const DELIMITER: u8 = b',';

/// One data line keyed by header field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    line: usize,
    fields: HashMap<String, String>,
}

impl Row {
    /// Value of `field`, `None` if the line was too short to carry it
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// 1-based line number in the source text
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Lazy iterator over the data lines of a payload
pub struct Rows<'a> {
    header: Vec<String>,
    records: StringRecordsIntoIter<&'a [u8]>,
}

impl Rows<'_> {
    pub fn header(&self) -> &[String] {
        &self.header
    }
}

/// A whitespace-only line trims down to a single empty field
fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.get(0).map_or(true, str::is_empty)
}

fn line_of(record: &StringRecord) -> usize {
    record.position().map_or(0, |p| p.line() as usize)
}

/// Next non-blank record, skipping lines the reader cannot decode
fn next_record(records: &mut StringRecordsIntoIter<&[u8]>) -> Option<StringRecord> {
    for result in records {
        match result {
            Ok(record) if is_blank(&record) => continue,
            Ok(record) => return Some(record),
            Err(e) => log::warn!("Skipping unreadable line: {}", e),
        }
    }
    None
}

impl Iterator for Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let record = next_record(&mut self.records)?;

        let fields = self
            .header
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();

        Some(Row {
            line: line_of(&record),
            fields,
        })
    }
}

/// Split `text` into a header and a lazy sequence of rows
///
/// Blank lines are skipped everywhere, so the header is the first non-blank
/// line. Fails only when there is no header at all.
pub fn parse(text: &str) -> Result<Rows<'_>, ParseError> {
    let mut records = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes())
        .into_records();

    let header = next_record(&mut records)
        .ok_or(ParseError::Empty)?
        .iter()
        .map(str::to_lowercase)
        .collect();

    Ok(Rows { header, records })
}
