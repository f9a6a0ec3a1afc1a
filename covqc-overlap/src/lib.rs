//! Interval membership lookups for covqc.
//!
//! Depth observations are single positions; annotating them means finding
//! every region that contains a position. This crate provides:
//!
//! - [`Bits`]: a Binary Interval Search structure over one chromosome
//! - [`RegionIndex`]: one [`Bits`] per chromosome, built from a
//!   [`RegionSet`](covqc_core::models::RegionSet)
//!
//! ```rust
//! use covqc_core::models::{Region, RegionSet};
//! use covqc_overlap::RegionIndex;
//!
//! let regions = RegionSet::from(vec![
//!     Region::new("chr1", 1, 10, "regionA"),
//!     Region::new("chr1", 8, 30, "regionB"),
//! ]);
//! let index = RegionIndex::from(regions);
//!
//! let labels: Vec<&str> = index.find_regions("chr1", 9).map(|r| r.label.as_str()).collect();
//! assert_eq!(labels, vec!["regionA", "regionB"]);
//! assert_eq!(index.find_regions("chr2", 9).count(), 0);
//! ```

/// Binary Interval Search implementation.
///
/// See [`Bits`] for details.
pub mod bits;

/// Per-chromosome region index.
pub mod region_index;

/// Core traits for overlap operations.
///
/// See [`Overlapper`] for the main trait.
pub mod traits;

// re-exports
pub use self::bits::Bits;
pub use self::region_index::{IntoRegionIndex, RegionIndex};
pub use self::traits::{Interval, Overlapper};
