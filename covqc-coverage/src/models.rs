use serde::Serialize;

/// One fixed-size window of one chromosome with its normalized coverage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageWindow {
    pub chromosome: String,
    /// 0-based window number within the chromosome
    pub window_index: u32,
    /// First position of the window (1-based, inclusive)
    pub window_start: u64,
    /// Last position of the window (inclusive)
    pub window_end: u64,
    /// Median depth of the observations assigned to the window
    pub window_median_coverage: f64,
    /// Median depth of the whole table, the same for every row
    pub global_coverage_median: f64,
    /// `window_median_coverage / global_coverage_median`; NaN when the global
    /// median is zero and NaN output was requested
    pub normalized_coverage: f64,
}

/// Result of a windowed normalization run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageSummary {
    pub window_size: u32,
    pub global_coverage_median: f64,
    /// `false` when the global median is zero; every `normalized_coverage` is
    /// then NaN.
    pub normalization_defined: bool,
    pub windows: Vec<CoverageWindow>,
}

impl CoverageSummary {
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CoverageWindow> {
        self.windows.iter()
    }

    /// Look up a window by its key.
    pub fn get(&self, chromosome: &str, window_index: u32) -> Option<&CoverageWindow> {
        self.windows
            .iter()
            .find(|w| w.chromosome == chromosome && w.window_index == window_index)
    }
}

/// A depth observation that falls inside a labeled region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AnnotatedObservation {
    pub chromosome: String,
    pub position: u32,
    pub depth: u32,
    /// Label of the containing region
    pub region: String,
}

/// Mean depth of one chromosome in one depth table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrandMean {
    pub chromosome: String,
    pub mean_depth: f64,
}

/// Per-chromosome means of one named depth table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMeans {
    pub category: String,
    pub means: Vec<StrandMean>,
}

/// Per-chromosome means for every category of a strand comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StrandSummary {
    pub categories: Vec<CategoryMeans>,
}

impl StrandSummary {
    pub fn get(&self, category: &str) -> Option<&CategoryMeans> {
        self.categories.iter().find(|c| c.category == category)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Distribution of the chromosome means of one category, as drawn in a
/// box plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStatistics {
    pub category: String,
    pub n_chromosomes: usize,
    pub minimum: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub maximum: f64,
    /// Mean of the chromosome means
    pub mean: f64,
}

/// Side by side statistics of every category in a [`StrandSummary`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StrandReport {
    pub categories: Vec<CategoryStatistics>,
}
