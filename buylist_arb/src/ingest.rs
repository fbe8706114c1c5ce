//! Card Kingdom buylist CSV reader

use crate::error::{ArbError, Result};
use crate::models::RawEntry;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const NAME_COLUMN: usize = 1;
const SET_COLUMN: usize = 2;
const FOIL_COLUMN: usize = 5;
const PRICE_COLUMN: usize = 7;
const MIN_COLUMNS: usize = 8;

/// Labels a buylist export carries at fixed header positions
const EXPECTED_LABELS: [(usize, &str); 4] = [
    (NAME_COLUMN, "Card Name"),
    (SET_COLUMN, "CK_Modif_Set"),
    (FOIL_COLUMN, "NF/F"),
    (PRICE_COLUMN, "BL_Value"),
];

/// Streams buylist rows as [`RawEntry`] values, one row at a time
pub struct EntryReader<R> {
    reader: csv::Reader<R>,
    record: StringRecord,
    line: u64,
}

impl EntryReader<File> {
    /// Open a buylist export and validate its header
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Reading buylist from: {}", path.display());
        Self::from_reader(File::open(path)?)
    }
}

impl<R: Read> EntryReader<R> {
    pub fn from_reader(source: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        validate_header(reader.headers()?)?;

        Ok(Self {
            reader,
            record: StringRecord::new(),
            line: 1,
        })
    }

    fn next_entry(&mut self) -> Result<Option<RawEntry>> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        self.line += 1;

        if self.record.len() < MIN_COLUMNS {
            return Err(ArbError::MalformedInput(format!(
                "line {} has {} columns, expected at least {}",
                self.line,
                self.record.len(),
                MIN_COLUMNS
            )));
        }

        let field = |index: usize| self.record.get(index).unwrap_or_default();

        Ok(Some(RawEntry {
            name: field(NAME_COLUMN).to_string(),
            set: field(SET_COLUMN).to_string(),
            is_foil: !field(FOIL_COLUMN).is_empty(),
            buylist_price: parse_price(field(PRICE_COLUMN)),
        }))
    }
}

impl<R: Read> Iterator for EntryReader<R> {
    type Item = Result<RawEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}

fn validate_header(header: &StringRecord) -> Result<()> {
    if header.len() < MIN_COLUMNS {
        return Err(ArbError::MalformedInput(format!(
            "header has {} columns, expected at least {}",
            header.len(),
            MIN_COLUMNS
        )));
    }

    for (index, label) in EXPECTED_LABELS {
        let found = header.get(index).unwrap_or_default();
        if found != label {
            return Err(ArbError::MalformedInput(format!(
                "expected header '{label}' in column {}, found '{found}'",
                index + 1
            )));
        }
    }

    Ok(())
}

/// "$1,234.50" -> 1234.5; anything unparseable or non-finite counts as 0
pub fn parse_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prices() {
        assert_eq!(parse_price("$12.50"), 12.5);
        assert_eq!(parse_price("0.25"), 0.25);
        assert_eq!(parse_price("$1,200.00"), 1200.0);
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("n/a"), 0.0);
        assert_eq!(parse_price("NaN"), 0.0);
        assert_eq!(parse_price("$inf"), 0.0);
    }
}
