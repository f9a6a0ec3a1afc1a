//! Core data model for covqc.
//!
//! Holds the tables every analysis in the workspace consumes:
//!
//! - [`DepthTable`](models::DepthTable): per-base `(chromosome, position, depth)` observations,
//!   as written by `samtools depth` and friends
//! - [`RegionSet`](models::RegionSet): labeled, inclusive genomic intervals (BED-like)
//!
//! plus gzip-aware readers and writers shared by the analysis and CLI crates.
//!
//! ```
//! use covqc_core::models::{DepthTable, ReadOptions};
//!
//! let data = "chr1\t1\t10\nchr1\t2\t20\n";
//! let table = DepthTable::from_reader(data.as_bytes(), &ReadOptions::default()).unwrap();
//! assert_eq!(table.len(), 2);
//! ```
pub mod errors;
pub mod models;
pub mod parse;
pub mod utils;

pub use errors::{CoverageError, Result};
