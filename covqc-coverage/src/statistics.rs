//! Descriptive statistics over depth values and depth tables.
//!
//! Medians are computed by sorting a copy of the values and taking the middle
//! element, or the mean of the two middle elements for an even count.

use indexmap::IndexMap;

use covqc_core::models::DepthTable;
use covqc_core::{CoverageError, Result};

use crate::models::StrandMean;

///
/// Median of a set of depth values. Sorts `values` in place.
///
/// Returns `None` for an empty slice.
///
pub fn median(values: &mut [u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();

    let n = values.len();
    let median = if n % 2 == 0 {
        (values[n / 2 - 1] as f64 + values[n / 2] as f64) / 2.0
    } else {
        values[n / 2] as f64
    };
    Some(median)
}

///
/// Quantile of already sorted values, interpolating linearly between the
/// two nearest order statistics.
///
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    Some(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

/// Arithmetic mean, `None` when empty.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Trait for summary statistics over a [`DepthTable`].
pub trait DepthStatistics {
    /// Median depth over every observation, all chromosomes pooled.
    fn depth_median(&self) -> Result<f64>;

    /// Mean depth per chromosome, in the order chromosomes are first seen.
    ///
    /// Sums are accumulated as integers, so the mean is exact up to the final
    /// division.
    fn chromosome_mean_depths(&self) -> Result<Vec<StrandMean>>;
}

impl DepthStatistics for DepthTable {
    fn depth_median(&self) -> Result<f64> {
        let mut depths: Vec<u32> = self.depths().collect();
        median(&mut depths).ok_or_else(|| CoverageError::EmptyInput("median depth".to_string()))
    }

    fn chromosome_mean_depths(&self) -> Result<Vec<StrandMean>> {
        if self.is_empty() {
            return Err(CoverageError::EmptyInput("mean depth".to_string()));
        }

        let mut totals: IndexMap<&str, (u64, u64)> = IndexMap::new();
        for obs in self {
            let (sum, count) = totals.entry(obs.chromosome.as_str()).or_insert((0, 0));
            *sum += obs.depth as u64;
            *count += 1;
        }

        Ok(totals
            .into_iter()
            .map(|(chr, (sum, count))| StrandMean {
                chromosome: chr.to_owned(),
                mean_depth: sum as f64 / count as f64,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use covqc_core::models::DepthObservation;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(vec![7], 7.0)]
    #[case(vec![10, 20], 15.0)]
    #[case(vec![30, 10, 20], 20.0)]
    #[case(vec![4, 1, 3, 2], 2.5)]
    #[case(vec![0, 0, 9], 0.0)]
    #[case(vec![u32::MAX, u32::MAX], u32::MAX as f64)]
    fn test_median(#[case] mut values: Vec<u32>, #[case] expected: f64) {
        assert_eq!(median(&mut values), Some(expected));
    }

    #[rstest]
    fn test_median_empty() {
        assert_eq!(median(&mut []), None);
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(0.25, 1.75)]
    #[case(0.5, 2.5)]
    #[case(0.75, 3.25)]
    #[case(1.0, 4.0)]
    fn test_quantile(#[case] q: f64, #[case] expected: f64) {
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, q), Some(expected));
    }

    #[rstest]
    fn test_quantile_out_of_range() {
        assert_eq!(quantile(&[1.0], 1.5), None);
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[rstest]
    fn test_depth_median_pools_chromosomes() {
        let table = DepthTable::from(vec![
            DepthObservation::new("chr1", 1, 10),
            DepthObservation::new("chr2", 1, 40),
            DepthObservation::new("chr1", 2, 20),
            DepthObservation::new("chr2", 2, 30),
        ]);
        assert_eq!(table.depth_median().unwrap(), 25.0);
    }

    #[rstest]
    fn test_chromosome_mean_depths_manual_sums() {
        let table = DepthTable::from(vec![
            DepthObservation::new("chrB", 1, 3),
            DepthObservation::new("chrA", 1, 10),
            DepthObservation::new("chrB", 2, 4),
            DepthObservation::new("chrA", 2, 11),
            DepthObservation::new("chrB", 3, 6),
        ]);
        let means = table.chromosome_mean_depths().unwrap();

        assert_eq!(means.len(), 2);
        assert_eq!(means[0].chromosome, "chrB");
        assert_eq!(means[0].mean_depth, (3 + 4 + 6) as f64 / 3.0);
        assert_eq!(means[1].chromosome, "chrA");
        assert_eq!(means[1].mean_depth, (10 + 11) as f64 / 2.0);
    }

    #[rstest]
    fn test_empty_table_statistics_fail() {
        let table = DepthTable::default();
        assert!(matches!(
            table.depth_median(),
            Err(CoverageError::EmptyInput(_))
        ));
        assert!(matches!(
            table.chromosome_mean_depths(),
            Err(CoverageError::EmptyInput(_))
        ));
    }
}
