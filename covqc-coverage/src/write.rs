//! Delimited text and JSON output for result tables.
//!
//! Every table is written with a header row. Paths ending in `.gz` are gzip
//! compressed.

use std::io::Write;
use std::path::Path;

use log::info;
use serde::Serialize;
use thiserror::Error;

use covqc_core::parse::delimiter_byte;
use covqc_core::utils::get_dynamic_writer;

use crate::models::{
    AnnotatedObservation, CategoryMeans, CoverageSummary, StrandReport,
};

#[derive(Error, Debug)]
pub enum WriteError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write delimited table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(char),
}

pub type WriteResult<T> = std::result::Result<T, WriteError>;

pub const WINDOW_COLUMNS: [&str; 7] = [
    "chromosome",
    "window_index",
    "window_start",
    "window_end",
    "window_median_coverage",
    "global_coverage_median",
    "normalized_coverage",
];

pub const ANNOTATED_COLUMNS: [&str; 4] = ["chromosome", "position", "depth", "region"];

pub const MEAN_COLUMNS: [&str; 2] = ["chromosome", "mean_depth"];

pub const REPORT_COLUMNS: [&str; 8] = [
    "category",
    "n_chromosomes",
    "minimum",
    "lower_quartile",
    "median",
    "upper_quartile",
    "maximum",
    "mean",
];

/// Field separator and float formatting for delimited output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormat {
    pub delimiter: char,
    /// Digits after the decimal point; `None` prints the shortest exact form.
    pub precision: Option<usize>,
}

impl Default for TableFormat {
    fn default() -> Self {
        TableFormat {
            delimiter: ',',
            precision: None,
        }
    }
}

impl TableFormat {
    pub fn new(delimiter: char) -> Self {
        TableFormat {
            delimiter,
            precision: None,
        }
    }

    pub fn tsv() -> Self {
        Self::new('\t')
    }

    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }

    pub fn float(&self, value: f64) -> String {
        match self.precision {
            Some(p) => format!("{:.*}", p, value),
            None => value.to_string(),
        }
    }

    /// Open a csv writer over `writer`. Fields holding the delimiter, a
    /// quote or a newline are quoted.
    pub fn csv_writer<W: Write>(&self, writer: W) -> WriteResult<csv::Writer<W>> {
        let delimiter = delimiter_byte(self.delimiter)
            .map_err(|_| WriteError::InvalidDelimiter(self.delimiter))?;
        Ok(csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer))
    }
}

/// Tables that can be written as delimited text or JSON.
pub trait TableWrite: Serialize {
    /// Column names of the header row.
    fn columns(&self) -> &'static [&'static str];

    /// Rows as formatted fields, in output order.
    fn rows(&self, format: &TableFormat) -> Vec<Vec<String>>;

    /// Number of data rows.
    fn row_count(&self) -> usize;

    fn write_delimited<W: Write>(&self, writer: &mut W, format: &TableFormat) -> WriteResult<()> {
        let mut csv_writer = format.csv_writer(&mut *writer)?;
        csv_writer.write_record(self.columns())?;
        for row in self.rows(format) {
            csv_writer.write_record(&row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    ///
    /// Write the table to a file, gzip compressed when the path ends in `.gz`.
    ///
    /// # Arguments
    /// - path: destination, parent folders are created
    /// - format: delimiter and float precision
    fn write_table<P: AsRef<Path>>(&self, path: P, format: &TableFormat) -> WriteResult<()> {
        let path = path.as_ref();
        let mut writer = get_dynamic_writer(path)?;
        self.write_delimited(&mut writer, format)?;
        writer.finish()?;

        info!("Wrote {} rows to {}", self.row_count(), path.display());
        Ok(())
    }

    fn write_json<W: Write>(&self, writer: &mut W) -> WriteResult<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }

    /// Write the table as JSON, gzip compressed when the path ends in `.gz`.
    fn write_json_file<P: AsRef<Path>>(&self, path: P) -> WriteResult<()> {
        let path = path.as_ref();
        let mut writer = get_dynamic_writer(path)?;
        self.write_json(&mut writer)?;
        writer.finish()?;

        info!("Wrote {} rows as JSON to {}", self.row_count(), path.display());
        Ok(())
    }
}

impl TableWrite for CoverageSummary {
    fn columns(&self) -> &'static [&'static str] {
        &WINDOW_COLUMNS
    }

    fn rows(&self, format: &TableFormat) -> Vec<Vec<String>> {
        self.windows
            .iter()
            .map(|w| {
                vec![
                    w.chromosome.clone(),
                    w.window_index.to_string(),
                    w.window_start.to_string(),
                    w.window_end.to_string(),
                    format.float(w.window_median_coverage),
                    format.float(w.global_coverage_median),
                    format.float(w.normalized_coverage),
                ]
            })
            .collect()
    }

    fn row_count(&self) -> usize {
        self.windows.len()
    }
}

impl TableWrite for Vec<AnnotatedObservation> {
    fn columns(&self) -> &'static [&'static str] {
        &ANNOTATED_COLUMNS
    }

    fn rows(&self, _format: &TableFormat) -> Vec<Vec<String>> {
        self.iter()
            .map(|r| {
                vec![
                    r.chromosome.clone(),
                    r.position.to_string(),
                    r.depth.to_string(),
                    r.region.clone(),
                ]
            })
            .collect()
    }

    fn row_count(&self) -> usize {
        self.len()
    }
}

impl TableWrite for CategoryMeans {
    fn columns(&self) -> &'static [&'static str] {
        &MEAN_COLUMNS
    }

    fn rows(&self, format: &TableFormat) -> Vec<Vec<String>> {
        self.means
            .iter()
            .map(|m| vec![m.chromosome.clone(), format.float(m.mean_depth)])
            .collect()
    }

    fn row_count(&self) -> usize {
        self.means.len()
    }
}

impl TableWrite for StrandReport {
    fn columns(&self) -> &'static [&'static str] {
        &REPORT_COLUMNS
    }

    fn rows(&self, format: &TableFormat) -> Vec<Vec<String>> {
        self.categories
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    c.n_chromosomes.to_string(),
                    format.float(c.minimum),
                    format.float(c.lower_quartile),
                    format.float(c.median),
                    format.float(c.upper_quartile),
                    format.float(c.maximum),
                    format.float(c.mean),
                ]
            })
            .collect()
    }

    fn row_count(&self) -> usize {
        self.categories.len()
    }
}
