//! # Coverage QC analyses over per-base depth tables
//!
//! Three analyses, all pure functions of loaded tables:
//!
//! - [`WindowedNormalizer`]: median depth per fixed-size window, divided by
//!   the median depth of the whole table
//! - [`RegionAnnotator`]: keeps the observations that fall inside labeled
//!   regions and tags them with the region label
//! - [`StrandSummarizer`]: mean depth per chromosome for each strand /
//!   mapping quality category, and a [`StrandReport`] comparing them
//!
//! Results serialize through [`TableWrite`] as delimited text or JSON.
//!
//! ```
//! use covqc_core::models::{DepthObservation, DepthTable, Region, RegionSet};
//! use covqc_coverage::RegionAnnotator;
//!
//! let table = DepthTable::from(vec![
//!     DepthObservation::new("chr1", 5, 100),
//!     DepthObservation::new("chr1", 15, 200),
//! ]);
//! let regions = RegionSet::from(vec![Region::new("chr1", 1, 10, "regionA")]);
//!
//! let rows = RegionAnnotator::new(regions).annotate(&table);
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].region, "regionA");
//! ```
pub mod annotate;
pub mod models;
pub mod normalize;
pub mod report;
pub mod statistics;
pub mod strand;
pub mod write;

pub use annotate::{RegionAnnotator, annotate_regions};
pub use models::{
    AnnotatedObservation, CategoryMeans, CategoryStatistics, CoverageSummary, CoverageWindow,
    StrandMean, StrandReport, StrandSummary,
};
pub use normalize::{WindowConvention, WindowedNormalizer, ZeroMedianPolicy, normalize_coverage};
pub use statistics::DepthStatistics;
pub use strand::{
    CANONICAL_CATEGORIES, Strand, StrandCategory, StrandSummarizer, summarize,
    summarize_skip_empty,
};
pub use write::{TableFormat, TableWrite, WriteError};
