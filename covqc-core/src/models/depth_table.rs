use std::fmt::{self, Display};
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::debug;

use crate::errors::{CoverageError, Result};
use crate::models::DepthObservation;
use crate::parse::{
    ColumnLayout, FieldCount, HeaderMode, ReadOptions, delimited_reader, is_blank, is_comment,
    looks_like_header, parse_u32, read_error, record_line,
};
use crate::utils::get_dynamic_reader;

/// Accepted header names, in canonical column order.
const DEPTH_COLUMNS: &[&[&str]] = &[
    &["chromosome", "chrom", "chr", "contig"],
    &["position", "pos"],
    &["depth", "coverage", "cov"],
];

///
/// DepthTable struct, an ordered collection of per-base depth observations.
///
/// Input order is preserved exactly as read; nothing is sorted.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DepthTable {
    pub observations: Vec<DepthObservation>,
    pub path: Option<PathBuf>,
}

impl DepthTable {
    ///
    /// Read a depth table from a delimited source.
    ///
    /// Headerless sources must have exactly three columns: chromosome,
    /// position and depth. Headered sources are mapped onto those columns by
    /// name and every row must have as many fields as the header.
    ///
    /// Loading stops at the first malformed row; rows are never skipped.
    ///
    /// # Arguments
    /// - reader: the source to read
    /// - options: delimiter and header handling
    pub fn from_reader<R: Read>(reader: R, options: &ReadOptions) -> Result<Self> {
        let mut reader = delimited_reader(reader, options)?;

        let mut observations: Vec<DepthObservation> = Vec::new();
        let mut layout: Option<ColumnLayout> = None;
        let mut first_record = options.header != HeaderMode::Absent;
        let mut record = StringRecord::new();

        while reader.read_record(&mut record).map_err(read_error)? {
            if is_blank(&record) {
                continue;
            }

            if first_record {
                first_record = false;
                let is_header = match options.header {
                    HeaderMode::Present => true,
                    HeaderMode::Auto => looks_like_header(&record, 1),
                    HeaderMode::Absent => false,
                };
                if is_header {
                    layout = Some(ColumnLayout::from_header(&record, DEPTH_COLUMNS, 3)?);
                    continue;
                }
            } else if is_comment(&record) {
                continue;
            }

            let line_number = record_line(&record);
            let active =
                layout.get_or_insert_with(|| ColumnLayout::positional(3, FieldCount::Exact(3)));
            active.check_field_count(&record)?;

            let chromosome = active
                .field(&record, 0)
                .filter(|c| !c.is_empty())
                .ok_or_else(|| CoverageError::malformed(line_number, "empty chromosome field"))?;
            let position = parse_u32(active.field(&record, 1), "position", line_number)?;
            if position == 0 {
                return Err(CoverageError::malformed(
                    line_number,
                    "position must be 1-based, found 0",
                ));
            }
            let depth = parse_u32(active.field(&record, 2), "depth", line_number)?;

            observations.push(DepthObservation {
                chromosome: chromosome.to_owned(),
                position,
                depth,
            });
        }

        debug!("Loaded {} depth observations", observations.len());

        Ok(DepthTable {
            observations,
            path: None,
        })
    }

    ///
    /// Read a depth table from disk, gzip'd or not.
    ///
    /// # Arguments
    /// - path: path to the depth file
    /// - options: delimiter and header handling
    pub fn from_path<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path)?;
        let mut table = DepthTable::from_reader(reader, options)?;
        table.path = Some(path.to_owned());
        Ok(table)
    }

    ///
    /// Get number of observations in the table
    ///
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    ///
    /// Is the table empty?
    ///
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DepthObservation> {
        self.observations.iter()
    }

    ///
    /// Iterate the depth column in table order
    ///
    pub fn depths(&self) -> impl Iterator<Item = u32> + '_ {
        self.observations.iter().map(|o| o.depth)
    }
}

impl TryFrom<&Path> for DepthTable {
    type Error = CoverageError;

    ///
    /// Create a new [DepthTable] from a tab-delimited depth file, detecting a
    /// header row automatically.
    ///
    /// # Arguments:
    /// - value: path to the depth file on disk.
    fn try_from(value: &Path) -> Result<Self> {
        DepthTable::from_path(value, &ReadOptions::default())
    }
}

impl TryFrom<&str> for DepthTable {
    type Error = CoverageError;

    fn try_from(value: &str) -> Result<Self> {
        DepthTable::try_from(Path::new(value))
    }
}

impl TryFrom<String> for DepthTable {
    type Error = CoverageError;

    fn try_from(value: String) -> Result<Self> {
        DepthTable::try_from(Path::new(&value))
    }
}

impl TryFrom<PathBuf> for DepthTable {
    type Error = CoverageError;

    fn try_from(value: PathBuf) -> Result<Self> {
        DepthTable::try_from(value.as_path())
    }
}

impl From<Vec<DepthObservation>> for DepthTable {
    fn from(observations: Vec<DepthObservation>) -> Self {
        DepthTable {
            observations,
            path: None,
        }
    }
}

impl FromIterator<DepthObservation> for DepthTable {
    fn from_iter<T: IntoIterator<Item = DepthObservation>>(iter: T) -> Self {
        DepthTable::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a DepthTable {
    type Item = &'a DepthObservation;
    type IntoIter = std::slice::Iter<'a, DepthObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

impl Display for DepthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DepthTable with {} observations.", self.len())
    }
}
