use covqc_core::{CoverageError, Result};

use crate::models::{CategoryMeans, CategoryStatistics, StrandReport, StrandSummary};
use crate::statistics::{mean, quantile};

impl TryFrom<&CategoryMeans> for CategoryStatistics {
    type Error = CoverageError;

    fn try_from(category: &CategoryMeans) -> Result<Self> {
        let mut values: Vec<f64> = category.means.iter().map(|m| m.mean_depth).collect();
        values.sort_by(|a, b| a.total_cmp(b));

        let empty = || CoverageError::EmptyInput(format!("statistics of category {}", category.category));
        let q = |p: f64| quantile(&values, p).ok_or_else(empty);

        Ok(CategoryStatistics {
            category: category.category.clone(),
            n_chromosomes: values.len(),
            minimum: q(0.0)?,
            lower_quartile: q(0.25)?,
            median: q(0.5)?,
            upper_quartile: q(0.75)?,
            maximum: q(1.0)?,
            mean: mean(&values).ok_or_else(empty)?,
        })
    }
}

impl TryFrom<&StrandSummary> for StrandReport {
    type Error = CoverageError;

    fn try_from(summary: &StrandSummary) -> Result<Self> {
        let categories = summary
            .categories
            .iter()
            .map(CategoryStatistics::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(StrandReport { categories })
    }
}

impl StrandReport {
    pub fn get(&self, category: &str) -> Option<&CategoryStatistics> {
        self.categories.iter().find(|c| c.category == category)
    }
}
