use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use log::info;
use rayon::prelude::*;

use covqc_core::models::{DepthTable, ReadOptions};
use covqc_coverage::{StrandReport, StrandSummarizer, TableFormat, TableWrite};

use super::cli::{DEFAULT_OUTPUT_DIR, DEFAULT_PRECISION, DEFAULT_PREFIX};
use crate::config::{CategoryEntry, StrandConfig};
use crate::utils::progress_bar;

/// Settings of one `strand` run after merging the config file and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct StrandRun {
    pub categories: Vec<(String, PathBuf)>,
    pub prefix: String,
    pub output_dir: PathBuf,
    pub skip_empty: bool,
    pub precision: usize,
    pub delimiter: char,
    pub json: bool,
}

impl StrandRun {
    ///
    /// Merge command line flags over the config file, if one was given.
    ///
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let config = match matches.get_one::<String>("config") {
            Some(path) => StrandConfig::try_from(Path::new(path))
                .with_context(|| format!("Failed to read config {}", path))?,
            None => StrandConfig::default(),
        };

        let entries: Vec<CategoryEntry> = match matches.get_many::<String>("input") {
            Some(values) => values.map(|v| CategoryEntry::from_arg(v)).collect(),
            None => config.categories.clone(),
        };

        let mut seen = HashSet::new();
        let mut categories = Vec::with_capacity(entries.len());
        for entry in &entries {
            let name = entry.category_name()?;
            if !seen.insert(name.clone()) {
                bail!("Category {} is listed more than once", name);
            }
            categories.push((name, entry.path.clone()));
        }
        if categories.is_empty() {
            bail!("No categories to summarize");
        }

        Ok(StrandRun {
            categories,
            prefix: matches
                .get_one::<String>("prefix")
                .cloned()
                .or(config.prefix)
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            output_dir: matches
                .get_one::<String>("output-dir")
                .map(PathBuf::from)
                .or(config.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            skip_empty: matches.get_flag("skip-empty") || config.skip_empty,
            precision: matches
                .get_one::<usize>("precision")
                .copied()
                .or(config.precision)
                .unwrap_or(DEFAULT_PRECISION),
            delimiter: matches.get_one::<char>("delimiter").copied().unwrap_or('\t'),
            json: matches.get_flag("json"),
        })
    }

    fn extension(&self) -> &'static str {
        match self.json {
            true => "json",
            false => "txt.gz",
        }
    }

    /// `<output_dir>/<prefix>_Mean.<category>.txt.gz`
    pub fn mean_path(&self, category: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_Mean.{}.{}", self.prefix, category, self.extension()))
    }

    pub fn report_path(&self) -> PathBuf {
        let ext = match self.json {
            true => "json",
            false => "tsv",
        };
        self.output_dir
            .join(format!("{}_StrandReport.{}", self.prefix, ext))
    }
}

///
/// Load every category table, one rayon task per file. Order follows
/// `categories`.
///
fn load_categories(
    categories: &[(String, PathBuf)],
    options: &ReadOptions,
) -> Result<Vec<(String, DepthTable)>> {
    let bar = progress_bar(categories.len() as u64, "Loading depth tables");

    let tables = categories
        .par_iter()
        .map(|(name, path)| {
            let table = DepthTable::from_path(path, options).with_context(|| {
                format!("Failed to load category {} from {}", name, path.display())
            })?;
            bar.inc(1);
            Ok((name.clone(), table))
        })
        .collect::<Result<Vec<_>>>();

    bar.finish_and_clear();
    tables
}

///
/// Summarize the categories of a run and write the mean tables and the
/// report. Returns the files written.
///
pub fn summarize_strands(run: &StrandRun) -> Result<Vec<PathBuf>> {
    let tables = load_categories(&run.categories, &ReadOptions::new(run.delimiter))?;

    let summary = StrandSummarizer::new()
        .with_skip_empty(run.skip_empty)
        .summarize(tables.iter().map(|(name, table)| (name.as_str(), table)))?;
    let report = StrandReport::try_from(&summary)?;

    let format = TableFormat::tsv().with_precision(Some(run.precision));
    let mut written = Vec::with_capacity(summary.len() + 1);

    for category in &summary.categories {
        let path = run.mean_path(&category.category);
        match run.json {
            true => category.write_json_file(&path)?,
            false => category.write_table(&path, &format)?,
        }
        written.push(path);
    }

    let report_path = run.report_path();
    match run.json {
        true => report.write_json_file(&report_path)?,
        false => report.write_table(&report_path, &format)?,
    }
    written.push(report_path);

    for stats in &report.categories {
        info!(
            "{}: mean of chromosome means {}, median {} over {} chromosomes",
            stats.category,
            format.float(stats.mean),
            format.float(stats.median),
            stats.n_chromosomes
        );
    }

    Ok(written)
}

pub fn run_strand(matches: &ArgMatches) -> Result<()> {
    let run = StrandRun::from_matches(matches)?;
    let written = summarize_strands(&run)?;
    info!("Wrote {} files to {}", written.len(), run.output_dir.display());
    Ok(())
}
