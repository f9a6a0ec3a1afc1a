//! Label depth observations with the regions that contain them.

use log::debug;

use covqc_core::models::{DepthObservation, DepthTable, RegionSet};
use covqc_overlap::{IntoRegionIndex, RegionIndex};

use crate::models::AnnotatedObservation;

///
/// Annotates depth observations with the labels of the regions they fall in.
///
/// A position matches a region when the chromosomes are equal and
/// `start <= position <= end`. An observation inside several regions yields
/// one row per region; one inside none yields nothing.
///
/// Rows come out in observation order. Rows of the same observation are
/// ordered by region `(start, end)`, ties keeping region set order. An empty
/// region set annotates nothing.
pub struct RegionAnnotator {
    index: RegionIndex,
}

impl RegionAnnotator {
    pub fn new(region_set: RegionSet) -> Self {
        RegionAnnotator {
            index: region_set.into_region_index(),
        }
    }

    /// Lazily annotate observations.
    pub fn annotate_iter<'a, I>(&'a self, observations: I) -> impl Iterator<Item = AnnotatedObservation> + 'a
    where
        I: IntoIterator<Item = &'a DepthObservation>,
        I::IntoIter: 'a,
    {
        observations.into_iter().flat_map(move |obs| {
            self.index
                .find_regions(&obs.chromosome, obs.position)
                .map(move |region| AnnotatedObservation {
                    chromosome: obs.chromosome.clone(),
                    position: obs.position,
                    depth: obs.depth,
                    region: region.label.clone(),
                })
        })
    }

    /// Annotate a whole table.
    pub fn annotate(&self, table: &DepthTable) -> Vec<AnnotatedObservation> {
        let rows: Vec<AnnotatedObservation> = self.annotate_iter(table).collect();
        debug!(
            "Annotated {} of {} observations against {} regions",
            rows.len(),
            table.len(),
            self.index.len()
        );
        rows
    }
}

impl From<RegionSet> for RegionAnnotator {
    fn from(region_set: RegionSet) -> Self {
        RegionAnnotator::new(region_set)
    }
}

///
/// Annotate a depth table against a region set.
///
/// # Arguments
/// - table: the depth observations
/// - regions: labeled inclusive regions
pub fn annotate_regions(table: &DepthTable, regions: RegionSet) -> Vec<AnnotatedObservation> {
    RegionAnnotator::new(regions).annotate(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    use covqc_core::models::Region;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::path::PathBuf;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data")
            .join(file_name)
    }

    fn row(chr: &str, position: u32, depth: u32, region: &str) -> AnnotatedObservation {
        AnnotatedObservation {
            chromosome: chr.to_string(),
            position,
            depth,
            region: region.to_string(),
        }
    }

    #[rstest]
    fn test_single_region_scenario() {
        let table = DepthTable::from(vec![
            DepthObservation::new("1", 5, 12),
            DepthObservation::new("1", 50, 3),
        ]);
        let regions = RegionSet::from(vec![Region::new("1", 1, 10, "region1")]);

        assert_eq!(
            annotate_regions(&table, regions),
            vec![row("1", 5, 12, "region1")]
        );
    }

    #[rstest]
    fn test_overlapping_regions_fan_out() {
        let table = DepthTable::from(vec![
            DepthObservation::new("chr1", 3, 1),
            DepthObservation::new("chr1", 7, 2),
            DepthObservation::new("chr1", 15, 3),
        ]);
        let regions = RegionSet::from(vec![
            Region::new("chr1", 5, 20, "wide"),
            Region::new("chr1", 1, 10, "left"),
        ]);

        assert_eq!(
            annotate_regions(&table, regions),
            vec![
                row("chr1", 3, 1, "left"),
                row("chr1", 7, 2, "left"),
                row("chr1", 7, 2, "wide"),
                row("chr1", 15, 3, "wide"),
            ]
        );
    }

    #[rstest]
    fn test_chromosome_without_regions_is_dropped() {
        let table = DepthTable::from(vec![
            DepthObservation::new("chr2", 5, 9),
            DepthObservation::new("chrX", 5, 9),
        ]);
        let annotator = RegionAnnotator::new(RegionSet::from(vec![Region::new(
            "chr2", 1, 10, "r",
        )]));

        assert_eq!(annotator.annotate(&table), vec![row("chr2", 5, 9, "r")]);
    }

    #[rstest]
    fn test_rows_follow_observation_order() {
        let table = DepthTable::from(vec![
            DepthObservation::new("chr2", 4, 1),
            DepthObservation::new("chr1", 2, 2),
            DepthObservation::new("chr2", 3, 3),
        ]);
        let regions = RegionSet::from(vec![
            Region::new("chr1", 1, 5, "a"),
            Region::new("chr2", 1, 5, "b"),
        ]);

        let positions: Vec<(String, u32)> = annotate_regions(&table, regions)
            .into_iter()
            .map(|r| (r.chromosome, r.position))
            .collect();
        assert_eq!(
            positions,
            vec![
                ("chr2".to_string(), 4),
                ("chr1".to_string(), 2),
                ("chr2".to_string(), 3)
            ]
        );
    }

    #[rstest]
    fn test_every_row_lies_in_its_region() {
        let table = DepthTable::try_from(get_test_path("depth/sample.depth.txt")).unwrap();
        let regions = RegionSet::try_from(get_test_path("regions/regions.bed")).unwrap();
        let lookup = regions.regions.clone();

        let rows = annotate_regions(&table, regions);
        assert!(!rows.is_empty());

        for r in &rows {
            assert!(lookup.iter().any(|region| region.label == r.region
                && region.chr == r.chromosome
                && region.start <= r.position
                && r.position <= region.end));
        }

        // chr1 positions 1-3 all sit in regionA; none reach past regionB
        let labels: Vec<&str> = rows.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(labels, vec!["regionA", "regionA", "regionA"]);
    }

    #[rstest]
    fn test_empty_region_file_annotates_nothing() {
        let table = DepthTable::try_from(get_test_path("depth/sample.depth.txt")).unwrap();

        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("empty.bed");
        std::fs::write(&path, "track name=empty\n").unwrap();
        let regions = RegionSet::try_from(path.as_path()).unwrap();

        assert!(regions.is_empty());
        assert_eq!(annotate_regions(&table, regions), Vec::<AnnotatedObservation>::new());
    }

    #[rstest]
    fn test_region_ending_at_the_last_position() {
        let table = DepthTable::from(vec![
            DepthObservation::new("chr1", u32::MAX - 1, 5),
            DepthObservation::new("chr1", u32::MAX, 6),
        ]);
        let regions = RegionSet::from(vec![
            Region::new("chr1", 1, u32::MAX, "to-end"),
            Region::new("chr1", u32::MAX, u32::MAX, "last"),
        ]);

        assert_eq!(
            annotate_regions(&table, regions),
            vec![
                row("chr1", u32::MAX - 1, 5, "to-end"),
                row("chr1", u32::MAX, 6, "to-end"),
                row("chr1", u32::MAX, 6, "last"),
            ]
        );
    }

    #[rstest]
    fn test_annotate_iter_is_lazy_over_slices() {
        let observations = vec![DepthObservation::new("chr1", 8, 4)];
        let annotator = RegionAnnotator::from(RegionSet::from(vec![
            Region::new("chr1", 1, 10, "x"),
            Region::new("chr1", 8, 8, "y"),
        ]));

        let mut iter = annotator.annotate_iter(&observations);
        assert_eq!(iter.next().map(|r| r.region), Some("x".to_string()));
        assert_eq!(iter.next().map(|r| r.region), Some("y".to_string()));
        assert_eq!(iter.next(), None);
    }
}
