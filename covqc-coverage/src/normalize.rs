//! Windowed, globally normalized coverage.
//!
//! Every chromosome is cut into fixed-size, non-overlapping windows. Each
//! window reports the median depth of the observations that fall in it,
//! divided by the median depth of the whole table.

use indexmap::IndexMap;
use log::debug;

use covqc_core::models::DepthTable;
use covqc_core::{CoverageError, Result};

use crate::models::{CoverageSummary, CoverageWindow};
use crate::statistics::{DepthStatistics, median};

/// What to do when the global median depth is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroMedianPolicy {
    /// Fail with [`CoverageError::DivisionByZero`].
    #[default]
    Fail,
    /// Emit NaN for every normalized value and clear
    /// [`CoverageSummary::normalization_defined`].
    NotANumber,
}

/// How a position is assigned to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowConvention {
    /// `position / window_size`. A position that is an exact multiple of
    /// the window size lands in the window labelled as starting right after
    /// it.
    #[default]
    PositionDiv,
    /// `(position - 1) / window_size`, so every position lies within the
    /// labelled bounds of its window.
    OneBased,
}

impl WindowConvention {
    #[inline]
    pub fn window_index(&self, position: u32, window_size: u32) -> u32 {
        match self {
            WindowConvention::PositionDiv => position / window_size,
            WindowConvention::OneBased => position.saturating_sub(1) / window_size,
        }
    }
}

///
/// Computes per-window median coverage normalized by the table-wide median.
///
/// # Example
///
/// ```
/// use covqc_core::models::{DepthObservation, DepthTable};
/// use covqc_coverage::WindowedNormalizer;
///
/// let table = DepthTable::from(vec![
///     DepthObservation::new("chr1", 1, 10),
///     DepthObservation::new("chr1", 2, 20),
///     DepthObservation::new("chr1", 1001, 30),
/// ]);
///
/// let summary = WindowedNormalizer::new(1000).unwrap().normalize(&table).unwrap();
/// assert_eq!(summary.global_coverage_median, 20.0);
/// assert_eq!(summary.windows[0].normalized_coverage, 0.75);
/// assert_eq!(summary.windows[1].normalized_coverage, 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowedNormalizer {
    pub window_size: u32,
    pub zero_median: ZeroMedianPolicy,
    pub convention: WindowConvention,
}

impl WindowedNormalizer {
    ///
    /// Create a normalizer with the default zero-median policy and window
    /// convention.
    ///
    /// # Arguments
    /// - window_size: number of positions per window, must be positive
    pub fn new(window_size: u32) -> Result<Self> {
        if window_size == 0 {
            return Err(CoverageError::InvalidWindowSize(window_size));
        }
        Ok(WindowedNormalizer {
            window_size,
            zero_median: ZeroMedianPolicy::default(),
            convention: WindowConvention::default(),
        })
    }

    pub fn with_zero_median_policy(mut self, policy: ZeroMedianPolicy) -> Self {
        self.zero_median = policy;
        self
    }

    pub fn with_convention(mut self, convention: WindowConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Window number of a position.
    #[inline]
    pub fn window_index(&self, position: u32) -> u32 {
        self.convention.window_index(position, self.window_size)
    }

    /// Inclusive `(start, end)` of a window.
    #[inline]
    pub fn window_bounds(&self, window_index: u32) -> (u64, u64) {
        let offset = window_index as u64 * self.window_size as u64;
        (offset + 1, offset + self.window_size as u64)
    }

    ///
    /// Normalize a depth table.
    ///
    /// Windows are reported in the order their first observation appears in
    /// the table; each `(chromosome, window_index)` appears once.
    ///
    /// # Errors
    /// - [`CoverageError::EmptyInput`] when the table has no observations
    /// - [`CoverageError::DivisionByZero`] when the global median is zero and
    ///   the policy is [`ZeroMedianPolicy::Fail`]
    pub fn normalize(&self, table: &DepthTable) -> Result<CoverageSummary> {
        let global_coverage_median = table.depth_median()?;

        let normalization_defined = global_coverage_median != 0.0;
        if !normalization_defined && self.zero_median == ZeroMedianPolicy::Fail {
            return Err(CoverageError::DivisionByZero);
        }

        let mut groups: IndexMap<(&str, u32), Vec<u32>> = IndexMap::new();
        for obs in table {
            groups
                .entry((obs.chromosome.as_str(), self.window_index(obs.position)))
                .or_default()
                .push(obs.depth);
        }

        debug!(
            "Grouped {} observations into {} windows of {} bp",
            table.len(),
            groups.len(),
            self.window_size
        );

        let windows = groups
            .into_iter()
            .map(|((chr, window_index), mut depths)| {
                let window_median_coverage = median(&mut depths).ok_or_else(|| {
                    CoverageError::EmptyInput(format!("median of window {}:{}", chr, window_index))
                })?;
                let (window_start, window_end) = self.window_bounds(window_index);
                let normalized_coverage = match normalization_defined {
                    true => window_median_coverage / global_coverage_median,
                    false => f64::NAN,
                };

                Ok(CoverageWindow {
                    chromosome: chr.to_owned(),
                    window_index,
                    window_start,
                    window_end,
                    window_median_coverage,
                    global_coverage_median,
                    normalized_coverage,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CoverageSummary {
            window_size: self.window_size,
            global_coverage_median,
            normalization_defined,
            windows,
        })
    }
}

///
/// Normalize a table with default settings.
///
/// # Arguments
/// - table: the depth observations
/// - window_size: number of positions per window
pub fn normalize_coverage(table: &DepthTable, window_size: u32) -> Result<CoverageSummary> {
    WindowedNormalizer::new(window_size)?.normalize(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    use covqc_core::models::DepthObservation;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/depth")
            .join(file_name)
    }

    #[fixture]
    fn scenario_table() -> DepthTable {
        DepthTable::from(vec![
            DepthObservation::new("chr1", 1, 10),
            DepthObservation::new("chr1", 2, 20),
            DepthObservation::new("chr1", 1001, 30),
        ])
    }

    #[fixture]
    fn sample_table() -> DepthTable {
        DepthTable::try_from(get_test_path("sample.depth.txt")).unwrap()
    }

    #[rstest]
    fn test_two_windows_scenario(scenario_table: DepthTable) {
        let summary = normalize_coverage(&scenario_table, 1000).unwrap();

        assert_eq!(summary.global_coverage_median, 20.0);
        assert!(summary.normalization_defined);
        assert_eq!(
            summary.windows,
            vec![
                CoverageWindow {
                    chromosome: "chr1".to_string(),
                    window_index: 0,
                    window_start: 1,
                    window_end: 1000,
                    window_median_coverage: 15.0,
                    global_coverage_median: 20.0,
                    normalized_coverage: 0.75,
                },
                CoverageWindow {
                    chromosome: "chr1".to_string(),
                    window_index: 1,
                    window_start: 1001,
                    window_end: 2000,
                    window_median_coverage: 30.0,
                    global_coverage_median: 20.0,
                    normalized_coverage: 1.5,
                },
            ]
        );
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(10)]
    #[case(1000)]
    #[case(1_000_000)]
    fn test_global_median_ignores_window_size(sample_table: DepthTable, #[case] window_size: u32) {
        let summary = normalize_coverage(&sample_table, window_size).unwrap();

        let mut depths: Vec<u32> = sample_table.depths().collect();
        let expected = median(&mut depths).unwrap();

        assert_eq!(summary.global_coverage_median, expected);
        assert!(
            summary
                .iter()
                .all(|w| w.global_coverage_median == expected)
        );
    }

    #[rstest]
    fn test_windows_follow_first_seen_order() {
        let table = DepthTable::from(vec![
            DepthObservation::new("chr2", 2500, 8),
            DepthObservation::new("chr1", 10, 4),
            DepthObservation::new("chr2", 10, 6),
            DepthObservation::new("chr2", 2600, 10),
        ]);
        let summary = normalize_coverage(&table, 1000).unwrap();

        let keys: Vec<(&str, u32)> = summary
            .iter()
            .map(|w| (w.chromosome.as_str(), w.window_index))
            .collect();
        assert_eq!(keys, vec![("chr2", 2), ("chr1", 0), ("chr2", 0)]);
        assert_eq!(summary.get("chr2", 2).unwrap().window_median_coverage, 9.0);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(1000)]
    fn test_every_observed_window_is_reported_once(
        sample_table: DepthTable,
        #[case] window_size: u32,
    ) {
        let normalizer = WindowedNormalizer::new(window_size).unwrap();
        let summary = normalizer.normalize(&sample_table).unwrap();

        let keys: HashSet<(String, u32)> = summary
            .iter()
            .map(|w| (w.chromosome.clone(), w.window_index))
            .collect();
        let observed: HashSet<(String, u32)> = sample_table
            .iter()
            .map(|o| (o.chromosome.clone(), normalizer.window_index(o.position)))
            .collect();

        assert_eq!(keys.len(), summary.len());
        assert_eq!(keys, observed);
    }

    #[rstest]
    fn test_position_div_window_assignment(sample_table: DepthTable) {
        let window_size = 1000;
        let normalizer = WindowedNormalizer::new(window_size).unwrap();
        let summary = normalizer.normalize(&sample_table).unwrap();

        for obs in &sample_table {
            let idx = obs.position / window_size;
            assert_eq!(normalizer.window_index(obs.position), idx);

            let window = summary.get(&obs.chromosome, idx).unwrap();
            let p = obs.position as u64;
            if obs.position % window_size != 0 {
                assert!(window.window_start <= p && p <= window.window_end);
            }
        }
    }

    #[rstest]
    fn test_position_div_boundary_lands_in_next_window() {
        // 1000 / 1000 == 1: the window labelled 1001-2000
        let table = DepthTable::from(vec![DepthObservation::new("chr1", 1000, 5)]);
        let summary = normalize_coverage(&table, 1000).unwrap();

        assert_eq!(summary.windows[0].window_index, 1);
        assert_eq!(summary.windows[0].window_start, 1001);
        assert_eq!(summary.windows[0].window_end, 2000);
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(1000)]
    fn test_one_based_windows_contain_their_positions(
        sample_table: DepthTable,
        #[case] window_size: u32,
    ) {
        let normalizer = WindowedNormalizer::new(window_size)
            .unwrap()
            .with_convention(WindowConvention::OneBased);
        let summary = normalizer.normalize(&sample_table).unwrap();

        for obs in &sample_table {
            let window = summary
                .get(&obs.chromosome, normalizer.window_index(obs.position))
                .unwrap();
            let p = obs.position as u64;
            assert!(window.window_start <= p && p <= window.window_end);
        }
    }

    #[rstest]
    fn test_normalize_is_idempotent(sample_table: DepthTable) {
        let normalizer = WindowedNormalizer::new(2).unwrap();
        let first = normalizer.normalize(&sample_table).unwrap();
        let second = normalizer.normalize(&sample_table).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.chromosome, b.chromosome);
            assert_eq!(a.window_index, b.window_index);
            assert_eq!(
                a.normalized_coverage.to_bits(),
                b.normalized_coverage.to_bits()
            );
            assert_eq!(
                a.window_median_coverage.to_bits(),
                b.window_median_coverage.to_bits()
            );
        }
    }

    #[rstest]
    fn test_empty_table_fails() {
        let result = normalize_coverage(&DepthTable::default(), 1000);
        assert!(matches!(result, Err(CoverageError::EmptyInput(_))));
    }

    #[rstest]
    fn test_zero_window_size_fails() {
        assert!(matches!(
            WindowedNormalizer::new(0),
            Err(CoverageError::InvalidWindowSize(0))
        ));
    }

    #[fixture]
    fn mostly_zero_table() -> DepthTable {
        DepthTable::from(vec![
            DepthObservation::new("chr1", 1, 0),
            DepthObservation::new("chr1", 2, 0),
            DepthObservation::new("chr1", 5000, 12),
        ])
    }

    #[rstest]
    fn test_zero_global_median_fails_by_default(mostly_zero_table: DepthTable) {
        let result = normalize_coverage(&mostly_zero_table, 1000);
        assert!(matches!(result, Err(CoverageError::DivisionByZero)));
    }

    #[rstest]
    fn test_zero_global_median_nan_policy_is_flagged(mostly_zero_table: DepthTable) {
        let summary = WindowedNormalizer::new(1000)
            .unwrap()
            .with_zero_median_policy(ZeroMedianPolicy::NotANumber)
            .normalize(&mostly_zero_table)
            .unwrap();

        assert!(!summary.normalization_defined);
        assert_eq!(summary.global_coverage_median, 0.0);
        assert_eq!(summary.len(), 2);
        assert!(summary.iter().all(|w| w.normalized_coverage.is_nan()));
        assert_eq!(summary.get("chr1", 5).unwrap().window_median_coverage, 12.0);
    }

    #[rstest]
    fn test_window_bounds_do_not_overflow() {
        let normalizer = WindowedNormalizer::new(u32::MAX).unwrap();
        assert_eq!(normalizer.window_index(u32::MAX), 1);
        assert_eq!(
            normalizer.window_bounds(1),
            (u32::MAX as u64 + 1, 2 * u32::MAX as u64)
        );
    }
}
