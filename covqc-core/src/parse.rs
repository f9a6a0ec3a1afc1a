//! Shared record/column handling for the delimited sources read by this crate.
//!
//! Depth and region files arrive with or without a header row and with a
//! caller-chosen delimiter. Headered files are mapped onto canonical columns
//! through a list of accepted aliases per column.
use std::io::Read;

use csv::StringRecord;

use crate::errors::{CoverageError, Result};

///
/// Whether the first line of a source is a header row.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Every line is data.
    Absent,
    /// The first non-blank line is a header.
    Present,
    /// Treat the first line as a header when it starts with `#` or its
    /// coordinate column is not an integer.
    #[default]
    Auto,
}

///
/// Options for reading a delimited depth or region source.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub delimiter: char,
    pub header: HeaderMode,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            delimiter: '\t',
            header: HeaderMode::Auto,
        }
    }
}

impl ReadOptions {
    pub fn new(delimiter: char) -> Self {
        ReadOptions {
            delimiter,
            ..Default::default()
        }
    }

    pub fn with_header(mut self, header: HeaderMode) -> Self {
        self.header = header;
        self
    }
}

///
/// Parse a delimiter given on the command line or in a config file.
///
/// Accepts a single ASCII character as well as the names `tab`, `comma`,
/// `space` and `semicolon`, and the escape `\t`.
///
pub fn parse_delimiter(value: &str) -> Option<char> {
    match value {
        "\\t" | "tab" | "\t" => Some('\t'),
        "comma" => Some(','),
        "space" => Some(' '),
        "semicolon" => Some(';'),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Some(c),
                _ => None,
            }
        }
    }
}

/// Lowercase, trimmed, without a leading `#`.
pub(crate) fn normalize_column_name(name: &str) -> String {
    name.trim().trim_start_matches('#').trim().to_ascii_lowercase()
}

/// The byte the csv reader and writer split on.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    match delimiter.is_ascii() {
        true => Ok(delimiter as u8),
        false => Err(CoverageError::InvalidDelimiter(delimiter)),
    }
}

///
/// Open a csv reader over a depth or region source.
///
/// Every row is read as a record, headers included, so header detection
/// stays with the loaders. Row lengths are checked by [`ColumnLayout`] to
/// report them with their line number.
///
pub(crate) fn delimited_reader<R: Read>(
    reader: R,
    options: &ReadOptions,
) -> Result<csv::Reader<R>> {
    Ok(csv::ReaderBuilder::new()
        .delimiter(delimiter_byte(options.delimiter)?)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader))
}

/// Map a csv read failure onto [`CoverageError`].
pub(crate) fn read_error(err: csv::Error) -> CoverageError {
    let line = err.position().map(|p| p.line() as usize).unwrap_or(0);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => CoverageError::Io(e),
        _ => CoverageError::malformed(line, reason),
    }
}

/// 1-based line the record starts on.
pub(crate) fn record_line(record: &StringRecord) -> usize {
    record.position().map(|p| p.line() as usize).unwrap_or(0)
}

/// A row holding only whitespace.
pub(crate) fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

/// A `#` comment, or a header row that starts with `#`.
pub(crate) fn is_comment(record: &StringRecord) -> bool {
    record.get(0).is_some_and(|f| f.starts_with('#'))
}

/// Decide whether `record` is a header row under [`HeaderMode::Auto`].
pub(crate) fn looks_like_header(record: &StringRecord, numeric_column: usize) -> bool {
    if is_comment(record) {
        return true;
    }
    match record.get(numeric_column) {
        Some(field) => field.parse::<i64>().is_err(),
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldCount {
    Exact(usize),
    AtLeast(usize),
}

///
/// Maps canonical columns to field indices of a source record.
///
#[derive(Debug, Clone)]
pub(crate) struct ColumnLayout {
    columns: Vec<Option<usize>>,
    count: FieldCount,
}

impl ColumnLayout {
    ///
    /// Layout of a headerless source: canonical column `i` is field `i`.
    ///
    pub fn positional(n_columns: usize, count: FieldCount) -> Self {
        ColumnLayout {
            columns: (0..n_columns).map(Some).collect(),
            count,
        }
    }

    ///
    /// Build a layout from a header record.
    ///
    /// # Arguments
    /// - header: the header record
    /// - aliases: accepted names for each canonical column, in canonical order
    /// - required: the number of leading canonical columns that must be present
    ///
    pub fn from_header(
        header: &StringRecord,
        aliases: &[&[&str]],
        required: usize,
    ) -> Result<Self> {
        let names: Vec<String> = header.iter().map(normalize_column_name).collect();

        let mut columns = Vec::with_capacity(aliases.len());
        for (i, accepted) in aliases.iter().enumerate() {
            let index = names.iter().position(|n| accepted.contains(&n.as_str()));
            if index.is_none() && i < required {
                return Err(CoverageError::malformed(
                    record_line(header),
                    format!(
                        "header is missing a '{}' column: {:?}",
                        accepted[0],
                        header.iter().collect::<Vec<&str>>()
                    ),
                ));
            }
            columns.push(index);
        }

        Ok(ColumnLayout {
            columns,
            count: FieldCount::Exact(names.len()),
        })
    }

    pub fn check_field_count(&self, record: &StringRecord) -> Result<()> {
        let n_fields = record.len();
        let ok = match self.count {
            FieldCount::Exact(n) => n_fields == n,
            FieldCount::AtLeast(n) => n_fields >= n,
        };
        if ok {
            return Ok(());
        }
        let expected = match self.count {
            FieldCount::Exact(n) => format!("{}", n),
            FieldCount::AtLeast(n) => format!("at least {}", n),
        };
        Err(CoverageError::malformed(
            record_line(record),
            format!("expected {} columns, found {}", expected, n_fields),
        ))
    }

    ///
    /// Get the field backing canonical column `column`, if the layout has it
    /// and the record is long enough.
    ///
    pub fn field<'a>(&self, record: &'a StringRecord, column: usize) -> Option<&'a str> {
        self.columns
            .get(column)
            .copied()
            .flatten()
            .and_then(|i| record.get(i))
    }
}

/// Parse an unsigned integer field, reporting the column name on failure.
pub(crate) fn parse_u32(value: Option<&str>, column: &str, line: usize) -> Result<u32> {
    let value =
        value.ok_or_else(|| CoverageError::malformed(line, format!("missing {} field", column)))?;
    value.trim().parse::<u32>().map_err(|_| {
        CoverageError::malformed(
            line,
            format!("{} is not a non-negative integer: {:?}", column, value),
        )
    })
}
