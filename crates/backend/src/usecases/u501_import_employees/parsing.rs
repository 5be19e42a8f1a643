//! Reading and normalization of the rows of an import file.

use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use contracts::usecases::u501_import_employees::required_columns;

const BOM: char = '\u{feff}';

/// Header cell → column name: BOM stripped, trimmed, lowercased
pub fn normalize_header(cell: &str) -> String {
    cell.trim_start_matches(BOM).trim().to_lowercase()
}

/// Data cell → trimmed value; an empty cell is absent, not ""
pub fn normalize_cell(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// True when every cell is empty after trimming
pub fn is_blank_record(record: &csv::ByteRecord) -> bool {
    record.iter().all(|field| {
        String::from_utf8_lossy(field)
            .trim_matches(|c: char| c.is_whitespace() || c == BOM)
            .is_empty()
    })
}

/// Source wrapper that keeps the bytes pulled by the CSV reader
/// until their line breaks have been counted.
struct Tracked<R> {
    inner: R,
    pending: Vec<u8>,
}

impl<R: Read> Read for Tracked<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.pending.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

/// CSV records of the whole stream paired with the physical line they start on.
///
/// Quoting follows the `csv` reader: a quoted cell may span several lines,
/// a quote inside an unquoted cell is plain text. Empty lines are skipped by
/// the reader but still advance the numbering.
pub struct PhysicalRecords<R> {
    reader: csv::Reader<Tracked<R>>,
    /// Stream offset of `pending[0]`
    offset: u64,
    /// Line on which `pending[0]` sits
    line: u64,
}

impl<R: Read> PhysicalRecords<R> {
    pub fn new(input: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(Tracked {
                inner: input,
                pending: Vec::new(),
            });
        Self {
            reader,
            offset: 0,
            line: 1,
        }
    }

    /// Line of the first record byte at or after stream offset `from`
    fn line_at(&mut self, from: u64) -> u64 {
        let pending = &mut self.reader.get_mut().pending;
        let mut end = usize::try_from(from - self.offset)
            .unwrap_or(usize::MAX)
            .min(pending.len());
        // Empty lines the reader skipped before the record
        while end < pending.len() && matches!(pending[end], b'\r' | b'\n') {
            end += 1;
        }

        self.line += pending[..end].iter().filter(|b| **b == b'\n').count() as u64;
        pending.drain(..end);
        self.offset += end as u64;
        self.line
    }
}

impl<R: Read> Iterator for PhysicalRecords<R> {
    type Item = Result<(u64, csv::ByteRecord), csv::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let from = self.reader.position().byte();
        let mut record = csv::ByteRecord::new();
        match self.reader.read_byte_record(&mut record) {
            Ok(true) => Some(Ok((self.line_at(from), record))),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Required columns missing from the header, in template order
pub fn missing_columns(header: &[String]) -> Vec<String> {
    required_columns()
        .filter(|name| !header.iter().any(|h| h == name))
        .map(str::to_string)
        .collect()
}

/// One data row mapped onto the header
#[derive(Debug, Clone)]
pub struct ImportRow {
    /// Header is row 1
    pub number: u64,
    cells: Vec<(String, Option<String>)>,
}

impl ImportRow {
    /// Cells beyond the header are dropped; missing trailing cells are absent.
    pub fn new(number: u64, header: &[String], record: &csv::StringRecord) -> Self {
        let cells = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), record.get(i).and_then(normalize_cell)))
            .collect();
        Self { number, cells }
    }

    /// First occurrence of the column wins when the header repeats it
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn missing_values(&self) -> Vec<String> {
        required_columns()
            .filter(|name| self.get(name).is_none())
            .map(str::to_string)
            .collect()
    }
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Lenient date reading; an unrecognized value is `None`, never an error.
///
/// Slash dates are read month-first and fall back to day-first when the
/// first number cannot be a month.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
        })
}
