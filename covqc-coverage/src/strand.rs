//! Per-chromosome mean depth for each strand / mapping quality category.
//!
//! A strand comparison takes several depth tables of the same sample, one per
//! category (both strands, forward only, reverse only, with or without a
//! mapping quality floor), and reduces each to one mean depth per chromosome.

use std::fmt::{self, Display};
use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};

use covqc_core::models::DepthTable;
use covqc_core::{CoverageError, Result};

use crate::models::{CategoryMeans, StrandSummary};
use crate::statistics::DepthStatistics;

/// Which strand the reads of a category were taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Both,
    Forward,
    Reverse,
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strand::Both => "BothStrands",
            Strand::Forward => "ForwardStrand",
            Strand::Reverse => "ReverseStrand",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "BothStrands" => Ok(Strand::Both),
            "ForwardStrand" => Ok(Strand::Forward),
            "ReverseStrand" => Ok(Strand::Reverse),
            _ => Err(format!("Unknown strand: {}", s)),
        }
    }
}

/// A strand plus a minimum mapping quality, e.g. `ForwardStrand.Q30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrandCategory {
    pub strand: Strand,
    pub min_mapq: u8,
}

/// The four categories of the usual strand bias check.
pub const CANONICAL_CATEGORIES: [StrandCategory; 4] = [
    StrandCategory::new(Strand::Both, 0),
    StrandCategory::new(Strand::Forward, 0),
    StrandCategory::new(Strand::Forward, 30),
    StrandCategory::new(Strand::Reverse, 30),
];

impl StrandCategory {
    pub const fn new(strand: Strand, min_mapq: u8) -> Self {
        StrandCategory { strand, min_mapq }
    }

    ///
    /// Infer the category from a depth file name of the form
    /// `<prefix>_DepthCoverage.<Strand>.Q<mapq>.txt[.gz]`.
    ///
    /// Returns `None` when no `<Strand>.Q<mapq>` pair is found.
    pub fn from_file_name<P: AsRef<Path>>(path: P) -> Option<Self> {
        let name = path.as_ref().file_name()?.to_str()?;
        let parts: Vec<&str> = name.split('.').collect();

        parts
            .windows(2)
            .find_map(|pair| format!("{}.{}", pair[0], pair[1]).parse().ok())
    }
}

impl Display for StrandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.Q{:02}", self.strand, self.min_mapq)
    }
}

impl FromStr for StrandCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (strand, quality) = s
            .split_once('.')
            .ok_or_else(|| format!("Expected <Strand>.Q<mapq>, got: {}", s))?;

        let min_mapq = quality
            .strip_prefix('Q')
            .and_then(|q| q.parse::<u8>().ok())
            .ok_or_else(|| format!("Invalid mapping quality in category: {}", s))?;

        Ok(StrandCategory {
            strand: strand.parse()?,
            min_mapq,
        })
    }
}

///
/// Reduces named depth tables to per-chromosome mean depths.
///
/// Categories keep the order they are given in; chromosomes within a category
/// keep the order they first appear in its table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrandSummarizer {
    /// Omit empty categories with a warning instead of failing.
    pub skip_empty: bool,
}

impl StrandSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_empty(mut self, skip_empty: bool) -> Self {
        self.skip_empty = skip_empty;
        self
    }

    ///
    /// Summarize the given `(category, table)` pairs.
    ///
    /// # Errors
    /// [`CoverageError::EmptyInput`] naming the first empty category, unless
    /// `skip_empty` is set.
    pub fn summarize<'a, S, I>(&self, tables: I) -> Result<StrandSummary>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, &'a DepthTable)>,
    {
        let mut categories = Vec::new();

        for (name, table) in tables {
            let category: String = name.into();

            if table.is_empty() {
                if self.skip_empty {
                    warn!("Skipping category {}: depth table is empty", category);
                    continue;
                }
                return Err(CoverageError::EmptyInput(format!(
                    "mean depth of category {}",
                    category
                )));
            }

            let means = table.chromosome_mean_depths()?;
            debug!("Category {}: {} chromosomes", category, means.len());

            categories.push(CategoryMeans { category, means });
        }

        Ok(StrandSummary { categories })
    }
}

///
/// Summarize categories, failing on the first empty table.
pub fn summarize<'a, S, I>(tables: I) -> Result<StrandSummary>
where
    S: Into<String>,
    I: IntoIterator<Item = (S, &'a DepthTable)>,
{
    StrandSummarizer::new().summarize(tables)
}

///
/// Summarize categories, dropping empty tables with a warning.
pub fn summarize_skip_empty<'a, S, I>(tables: I) -> Result<StrandSummary>
where
    S: Into<String>,
    I: IntoIterator<Item = (S, &'a DepthTable)>,
{
    StrandSummarizer::new().with_skip_empty(true).summarize(tables)
}
