use clap::{Arg, ArgAction, Command, arg, value_parser};

use crate::utils::{DELIMITER_HELP, delimiter_parser};

pub const NORMALIZE_CMD: &str = "normalize";
pub const DEFAULT_WINDOW_SIZE: &str = "1000";

pub fn create_normalize_cli() -> Command {
    Command::new(NORMALIZE_CMD)
        .author("covqc developers")
        .about("Median coverage per fixed-size window, normalized by the genome-wide median.")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "Depth table (chromosome, position, depth), optionally gzipped, '-' for stdin").required(true))
        .arg(arg!(-o --output <output> "Output table, '-' for stdout, gzipped when it ends in .gz").required(true))
        .arg(
            Arg::new("window-size")
                .short('w')
                .long("window-size")
                .value_parser(value_parser!(u32))
                .default_value(DEFAULT_WINDOW_SIZE)
                .help("Number of positions per window"),
        )
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .value_parser(delimiter_parser)
                .default_value("tab")
                .help(DELIMITER_HELP),
        )
        .arg(
            Arg::new("zero-median")
                .long("zero-median")
                .value_parser(["fail", "nan"])
                .default_value("fail")
                .help("When the global median is zero: fail, or emit NaN normalized values"),
        )
        .arg(
            Arg::new("one-based-windows")
                .long("one-based-windows")
                .action(ArgAction::SetTrue)
                .help("Assign position p to window (p - 1) / w so every window contains its positions"),
        )
        .arg(arg!(--json "Write JSON instead of CSV"))
}
