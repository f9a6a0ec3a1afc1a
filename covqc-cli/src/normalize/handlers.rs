use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};

use covqc_core::models::ReadOptions;
use covqc_coverage::{TableFormat, WindowConvention, WindowedNormalizer, ZeroMedianPolicy};

use crate::utils::{load_depth_table, write_output};

pub fn run_normalize(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("A path to a depth table is required.")?;

    let output = matches
        .get_one::<String>("output")
        .context("An output path is required.")?;

    let window_size = *matches
        .get_one::<u32>("window-size")
        .context("A window size is required.")?;

    let delimiter = matches.get_one::<char>("delimiter").copied().unwrap_or('\t');

    let zero_median = match matches.get_one::<String>("zero-median").map(String::as_str) {
        Some("nan") => ZeroMedianPolicy::NotANumber,
        _ => ZeroMedianPolicy::Fail,
    };

    let convention = match matches.get_flag("one-based-windows") {
        true => WindowConvention::OneBased,
        false => WindowConvention::PositionDiv,
    };

    let normalizer = WindowedNormalizer::new(window_size)?
        .with_zero_median_policy(zero_median)
        .with_convention(convention);

    let table = load_depth_table(input, &ReadOptions::new(delimiter))?;

    info!("Loaded {} depth observations from {}", table.len(), input);

    let summary = normalizer.normalize(&table)?;
    if !summary.normalization_defined {
        warn!("Global coverage median is zero, normalized coverage is NaN");
    }

    write_output(
        &summary,
        output,
        &TableFormat::default(),
        matches.get_flag("json"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::normalize::cli::create_normalize_cli;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::fs::read_to_string;
    use tempfile::tempdir;

    const DEPTH: &str = "../tests/data/depth/sample.depth.txt";

    #[rstest]
    fn test_run_normalize_writes_csv() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("windows.csv");
        let out_str = out.to_str().unwrap();

        let matches = create_normalize_cli()
            .try_get_matches_from(["normalize", "-i", DEPTH, "-o", out_str, "-w", "1000"])
            .unwrap();
        run_normalize(&matches).unwrap();

        let contents = read_to_string(&out).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines[0],
            "chromosome,window_index,window_start,window_end,window_median_coverage,global_coverage_median,normalized_coverage"
        );
        // chr1 positions 1-3 with depths 10, 20, 30; global median 15
        assert_eq!(lines[1], "chr1,0,1,1000,20,15,1.3333333333333333");
    }

    #[rstest]
    fn test_run_normalize_json() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("windows.json");
        let out_str = out.to_str().unwrap();

        let matches = create_normalize_cli()
            .try_get_matches_from(["normalize", "-i", DEPTH, "-o", out_str, "--json"])
            .unwrap();
        run_normalize(&matches).unwrap();

        let contents = read_to_string(&out).unwrap();
        assert!(contents.contains("\"global_coverage_median\": 15.0"));
    }

    #[rstest]
    fn test_run_normalize_rejects_zero_window() {
        let matches = create_normalize_cli()
            .try_get_matches_from(["normalize", "-i", DEPTH, "-o", "-", "-w", "0"])
            .unwrap();
        assert!(run_normalize(&matches).is_err());
    }

    #[rstest]
    fn test_missing_input_fails() {
        let matches = create_normalize_cli()
            .try_get_matches_from(["normalize", "-i", "missing.txt", "-o", "-"])
            .unwrap();
        let err = run_normalize(&matches).unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }
}
