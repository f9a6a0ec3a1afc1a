//! Chromosome-keyed index over a [`RegionSet`].
//!
//! `RegionIndex` keeps one overlap structure per chromosome, each storing
//! the position of its regions in the region set. Lookups return the
//! [`Region`]s themselves, so labels and coordinates stay attached.

use fxhash::FxHashMap as HashMap;

use covqc_core::models::{Interval, Region, RegionSet};

use crate::{Bits, Overlapper};

/// Per-chromosome lookup of the regions containing a position.
///
/// The overlap backend is a type parameter; [`Bits`] is the default.
/// Intervals are keyed on `u64` so inclusive `u32` regions convert to
/// half-open form without overflow.
pub struct RegionIndex<O = Bits<u64, usize>>
where
    O: Overlapper<u64, usize>,
{
    regions: Vec<Region>,
    index_maps: HashMap<String, O>,
}

/// Iterator over the regions containing one position.
pub struct IterRegions<'a> {
    regions: &'a [Region],
    hits: Option<Box<dyn Iterator<Item = &'a Interval<u64, usize>> + 'a>>,
}

impl<'a> Iterator for IterRegions<'a> {
    type Item = &'a Region;

    fn next(&mut self) -> Option<Self::Item> {
        let hit = self.hits.as_mut()?.next()?;
        self.regions.get(hit.val)
    }
}

impl<O> RegionIndex<O>
where
    O: Overlapper<u64, usize>,
{
    /// Build the index, consuming the region set.
    pub fn build(region_set: RegionSet) -> Self {
        let regions = region_set.regions;

        // STEP 1: organize intervals by chromosome, keeping region order
        let mut intervals: HashMap<String, Vec<Interval<u64, usize>>> = HashMap::default();
        for (idx, region) in regions.iter().enumerate() {
            intervals
                .entry(region.chr.clone())
                .or_default()
                .push(region.to_interval(idx));
        }

        // STEP 2: build one overlapper per chromosome
        let index_maps = intervals
            .into_iter()
            .map(|(chr, chr_intervals)| (chr, O::build(chr_intervals)))
            .collect();

        RegionIndex {
            regions,
            index_maps,
        }
    }

    /// Regions on `chr` with `start <= position <= end`, sorted by
    /// `(start, end)` and then by their order in the region set.
    pub fn find_regions<'a>(&'a self, chr: &str, position: u32) -> IterRegions<'a> {
        IterRegions {
            regions: &self.regions,
            hits: self
                .index_maps
                .get(chr)
                .map(|lapper| lapper.find_point_iter(u64::from(position))),
        }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl From<RegionSet> for RegionIndex {
    fn from(region_set: RegionSet) -> Self {
        RegionIndex::build(region_set)
    }
}

/// A trait for converting region-based data into a [`RegionIndex`].
pub trait IntoRegionIndex {
    fn into_region_index(self) -> RegionIndex;
}

impl IntoRegionIndex for RegionSet {
    fn into_region_index(self) -> RegionIndex {
        RegionIndex::build(self)
    }
}

impl IntoRegionIndex for Vec<Region> {
    fn into_region_index(self) -> RegionIndex {
        RegionIndex::build(RegionSet::from(self))
    }
}
