use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use covqc_core::CoverageError;
use covqc_core::models::{DepthTable, ReadOptions};
use covqc_core::parse::parse_delimiter;
use covqc_core::utils::{get_dynamic_reader_w_stdin, get_dynamic_writer_w_stdout};
use covqc_coverage::{TableFormat, TableWrite};

pub const DELIMITER_HELP: &str = "Field delimiter: a character, or tab, comma, space, semicolon";

/// clap value parser for delimiter arguments.
pub fn delimiter_parser(value: &str) -> std::result::Result<char, String> {
    parse_delimiter(value).ok_or_else(|| format!("Invalid delimiter: {}", value))
}

/// A spinner shown on stderr while a file loads.
pub fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// A bar counting finished items.
pub fn progress_bar(len: u64, message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("{msg} {bar:30} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message(message);
    bar
}

///
/// Load a depth table from a file, or from stdin when `input` is `-`.
///
/// A spinner runs on stderr while the table loads.
pub fn load_depth_table(input: &str, options: &ReadOptions) -> Result<DepthTable> {
    let bar = spinner(format!("Loading {}", input));
    let table = get_dynamic_reader_w_stdin(input)
        .map_err(CoverageError::from)
        .and_then(|reader| DepthTable::from_reader(reader, options))
        .with_context(|| format!("Failed to load depth table {}", input));
    bar.finish_and_clear();

    let mut table = table?;
    if input != "-" {
        table.path = Some(PathBuf::from(input));
    }
    Ok(table)
}

///
/// Write a result table to a file, or to stdout when `output` is `-`.
///
/// # Arguments
/// - table: the rows to write
/// - output: destination path, gzip compressed when it ends in `.gz`
/// - format: delimiter and float precision for delimited output
/// - json: write JSON instead of delimited text
pub fn write_output<T: TableWrite>(
    table: &T,
    output: &str,
    format: &TableFormat,
    json: bool,
) -> Result<()> {
    let mut writer = get_dynamic_writer_w_stdout(output)
        .with_context(|| format!("Failed to open output {}", output))?;

    match json {
        true => table.write_json(&mut writer)?,
        false => table.write_delimited(&mut writer, format)?,
    }
    writer
        .finish()
        .with_context(|| format!("Failed to finish writing {}", output))?;

    info!("Wrote {} rows to {}", table.row_count(), output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("tab", '\t')]
    #[case("\\t", '\t')]
    #[case(",", ',')]
    #[case("semicolon", ';')]
    fn test_delimiter_parser(#[case] value: &str, #[case] expected: char) {
        assert_eq!(delimiter_parser(value), Ok(expected));
    }

    #[rstest]
    fn test_delimiter_parser_rejects_words() {
        assert!(delimiter_parser("pipe").is_err());
    }

    #[rstest]
    #[case("../tests/data/depth/sample.depth.txt", 12)]
    #[case("../tests/data/depth/headered.depth.tsv", 4)]
    fn test_load_depth_table_from_path(#[case] input: &str, #[case] expected: usize) {
        let table = load_depth_table(input, &ReadOptions::default()).unwrap();
        assert_eq!(table.len(), expected);
        assert_eq!(table.path, Some(PathBuf::from(input)));
    }

    #[rstest]
    fn test_load_depth_table_names_the_input() {
        let err = load_depth_table("missing.depth.txt", &ReadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("missing.depth.txt"));
    }
}
