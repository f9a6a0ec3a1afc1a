use clap::{Arg, Command, arg};

use crate::utils::{DELIMITER_HELP, delimiter_parser};

pub const ANNOTATE_CMD: &str = "annotate";

pub fn create_annotate_cli() -> Command {
    Command::new(ANNOTATE_CMD)
        .author("covqc developers")
        .about("Keep depth observations inside labeled regions and tag them with the region label.")
        .arg_required_else_help(true)
        .arg(arg!(-d --depth <depth> "Depth table (chromosome, position, depth), optionally gzipped, '-' for stdin").required(true))
        .arg(arg!(-b --regions <regions> "Regions (chromosome, start, end[, label]), inclusive bounds").required(true))
        .arg(arg!(-o --output <output> "Output table, '-' for stdout, gzipped when it ends in .gz").required(true))
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .value_parser(delimiter_parser)
                .default_value("tab")
                .help(DELIMITER_HELP),
        )
        .arg(
            Arg::new("region-delimiter")
                .long("region-delimiter")
                .value_parser(delimiter_parser)
                .help("Region file delimiter. Defaults to comma for .csv files, tab otherwise"),
        )
        .arg(arg!(--json "Write JSON instead of CSV"))
}
