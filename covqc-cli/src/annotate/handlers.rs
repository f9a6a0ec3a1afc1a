use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};

use covqc_core::models::{ReadOptions, RegionSet};
use covqc_coverage::{RegionAnnotator, TableFormat};

use crate::utils::{load_depth_table, write_output};

/// Comma for `.csv` and `.csv.gz` region files, tab for anything else.
fn infer_region_delimiter(path: &Path) -> char {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    match name.trim_end_matches(".gz").ends_with(".csv") {
        true => ',',
        false => '\t',
    }
}

pub fn run_annotate(matches: &ArgMatches) -> Result<()> {
    let depth = matches
        .get_one::<String>("depth")
        .context("A path to a depth table is required.")?;

    let regions = matches
        .get_one::<String>("regions")
        .context("A path to a region file is required.")?;

    let output = matches
        .get_one::<String>("output")
        .context("An output path is required.")?;

    let delimiter = matches.get_one::<char>("delimiter").copied().unwrap_or('\t');
    let region_delimiter = matches
        .get_one::<char>("region-delimiter")
        .copied()
        .unwrap_or_else(|| infer_region_delimiter(Path::new(regions)));

    let region_set = RegionSet::from_path(regions, &ReadOptions::new(region_delimiter))
        .with_context(|| format!("Failed to load regions {}", regions))?;
    info!("Loaded {} regions from {}", region_set.len(), regions);
    if region_set.is_empty() {
        warn!("{} holds no regions, no observation will be annotated", regions);
    }

    let annotator = RegionAnnotator::new(region_set);

    let table = load_depth_table(depth, &ReadOptions::new(delimiter))?;

    let rows = annotator.annotate(&table);
    info!(
        "{} of {} observations fall in a region",
        rows.len(),
        table.len()
    );

    write_output(
        &rows,
        output,
        &TableFormat::default(),
        matches.get_flag("json"),
    )
}
