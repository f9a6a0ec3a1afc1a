use std::fmt::{self, Display};
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::debug;

use crate::errors::{CoverageError, Result};
use crate::models::Region;
use crate::parse::{
    ColumnLayout, FieldCount, HeaderMode, ReadOptions, delimited_reader, is_blank, is_comment,
    looks_like_header, parse_u32, read_error, record_line,
};
use crate::utils::get_dynamic_reader;

/// Accepted header names, in canonical column order. The label is optional.
const REGION_COLUMNS: &[&[&str]] = &[
    &["chromosome", "chrom", "chr", "contig"],
    &["start", "chromstart"],
    &["end", "chromend", "stop"],
    &["label", "region", "name"],
];

///
/// A UCSC `browser` or `track` line: the keyword followed by settings, or
/// alone on its line. Contigs that merely start with the word are data.
///
fn is_track_line(record: &StringRecord) -> bool {
    let Some(first) = record.get(0) else {
        return false;
    };
    let mut words = first.split_whitespace();
    match words.next() {
        Some("browser") | Some("track") => words.next().is_some() || record.len() == 1,
        _ => false,
    }
}

/// Header text of a record, fields rejoined with the delimiter.
fn joined(record: &StringRecord, delimiter: &str) -> String {
    record.iter().collect::<Vec<&str>>().join(delimiter)
}

///
/// RegionSet struct, the representation of a labeled interval file such as
/// a bed file.
///
/// Regions keep the order they were read in; they are not sorted or merged,
/// so overlapping regions stay distinct.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionSet {
    pub regions: Vec<Region>,
    pub header: Option<String>,
    pub path: Option<PathBuf>,
}

impl RegionSet {
    ///
    /// Read regions from a delimited source with columns
    /// `chromosome, start, end[, label]`.
    ///
    /// A missing or empty label is replaced by `chr:start-end`. Fields may be
    /// quoted, so labels can hold the delimiter. `browser`, `track` and `#`
    /// lines are kept as the header. A source without regions gives an
    /// empty set.
    ///
    /// # Arguments
    /// - reader: the source to read
    /// - options: delimiter and header handling
    pub fn from_reader<R: Read>(reader: R, options: &ReadOptions) -> Result<Self> {
        let delimiter = options.delimiter.to_string();
        let mut reader = delimited_reader(reader, options)?;

        let mut regions: Vec<Region> = Vec::new();
        let mut header: Vec<String> = Vec::new();
        let mut layout: Option<ColumnLayout> = None;
        let mut first_record = options.header != HeaderMode::Absent;
        let mut record = StringRecord::new();

        while reader.read_record(&mut record).map_err(read_error)? {
            if is_blank(&record) {
                continue;
            }

            if is_track_line(&record) {
                header.push(joined(&record, &delimiter));
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
                    layout = Some(ColumnLayout::from_header(&record, REGION_COLUMNS, 3)?);
                    header.push(joined(&record, &delimiter));
                    continue;
                }
            } else if is_comment(&record) {
                header.push(joined(&record, &delimiter));
                continue;
            }

            let line_number = record_line(&record);
            let active =
                layout.get_or_insert_with(|| ColumnLayout::positional(4, FieldCount::AtLeast(3)));
            active.check_field_count(&record)?;

            let chr = active
                .field(&record, 0)
                .filter(|c| !c.is_empty())
                .ok_or_else(|| CoverageError::malformed(line_number, "empty chromosome field"))?;
            let start = parse_u32(active.field(&record, 1), "start", line_number)?;
            let end = parse_u32(active.field(&record, 2), "end", line_number)?;
            if start > end {
                return Err(CoverageError::malformed(
                    line_number,
                    format!("region start {} is after its end {}", start, end),
                ));
            }

            let label = match active.field(&record, 3) {
                Some(label) if !label.is_empty() => label.to_owned(),
                _ => Region::default_label(chr, start, end),
            };

            regions.push(Region {
                chr: chr.to_owned(),
                start,
                end,
                label,
            });
        }

        debug!("Loaded {} regions", regions.len());

        Ok(RegionSet {
            regions,
            header: match header.is_empty() {
                true => None,
                false => Some(header.join("\n")),
            },
            path: None,
        })
    }

    ///
    /// Read regions from disk, gzip'd or not.
    ///
    pub fn from_path<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path)?;
        let mut rs = RegionSet::from_reader(reader, options)?;
        rs.path = Some(path.to_owned());
        Ok(rs)
    }

    ///
    /// Get number of regions in RegionSet
    ///
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    ///
    /// Is regionSet empty?
    ///
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl TryFrom<&Path> for RegionSet {
    type Error = CoverageError;

    ///
    /// Create a new [RegionSet] from a tab-delimited bed-like file.
    ///
    /// # Arguments:
    /// - value: path to bed file on disk.
    fn try_from(value: &Path) -> Result<Self> {
        RegionSet::from_path(value, &ReadOptions::default())
    }
}

impl TryFrom<&str> for RegionSet {
    type Error = CoverageError;

    fn try_from(value: &str) -> Result<Self> {
        RegionSet::try_from(Path::new(value))
    }
}

impl TryFrom<String> for RegionSet {
    type Error = CoverageError;

    fn try_from(value: String) -> Result<Self> {
        RegionSet::try_from(Path::new(&value))
    }
}

impl TryFrom<PathBuf> for RegionSet {
    type Error = CoverageError;

    fn try_from(value: PathBuf) -> Result<Self> {
        RegionSet::try_from(value.as_path())
    }
}

impl From<Vec<Region>> for RegionSet {
    fn from(regions: Vec<Region>) -> Self {
        RegionSet {
            regions,
            header: None,
            path: None,
        }
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

impl Display for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionSet with {} regions.", self.len())
    }
}
