use clap::{Arg, ArgAction, ArgGroup, Command, arg, value_parser};

use crate::utils::{DELIMITER_HELP, delimiter_parser};

pub const STRAND_CMD: &str = "strand";
pub const DEFAULT_PREFIX: &str = "sample";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_PRECISION: usize = 2;

pub fn create_strand_cli() -> Command {
    Command::new(STRAND_CMD)
        .author("covqc developers")
        .about("Mean depth per chromosome for each strand / mapping quality category.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("NAME=PATH")
                .action(ArgAction::Append)
                .help("A category depth table. The name may be omitted for <prefix>_DepthCoverage.<Strand>.Q<mapq> files"),
        )
        .arg(arg!(-c --config <config> "TOML file listing the categories and output settings"))
        .group(
            ArgGroup::new("sources")
                .args(["input", "config"])
                .multiple(true)
                .required(true),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .help("Folder for the per-category mean tables [default: .]"),
        )
        .arg(arg!(-p --prefix <prefix> "Prefix of the output file names"))
        .arg(
            Arg::new("skip-empty")
                .long("skip-empty")
                .action(ArgAction::SetTrue)
                .help("Skip empty categories with a warning instead of failing"),
        )
        .arg(
            Arg::new("precision")
                .long("precision")
                .value_parser(value_parser!(usize))
                .help("Digits after the decimal point in mean tables [default: 2]"),
        )
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .value_parser(delimiter_parser)
                .default_value("tab")
                .help(DELIMITER_HELP),
        )
        .arg(arg!(--json "Write JSON instead of tab separated tables"))
}
