mod annotate;
mod config;
mod normalize;
mod strand;
mod utils;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "covqc";
    pub const VERBOSE_ARG: &str = "verbose";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("covqc developers")
        .about("Coverage quality control for per-base sequencing depth: windowed normalization, region annotation and strand bias summaries.")
        .subcommand_required(true)
        .arg(
            Arg::new(consts::VERBOSE_ARG)
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase logging (-v info, -vv debug). RUST_LOG takes precedence"),
        )
        .subcommand(normalize::cli::create_normalize_cli())
        .subcommand(annotate::cli::create_annotate_cli())
        .subcommand(strand::cli::create_strand_cli())
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logger(matches.get_count(consts::VERBOSE_ARG));

    match matches.subcommand() {
        //
        // WINDOWED NORMALIZATION
        //
        Some((normalize::cli::NORMALIZE_CMD, matches)) => {
            normalize::handlers::run_normalize(matches)?;
        }

        //
        // REGION ANNOTATION
        //
        Some((annotate::cli::ANNOTATE_CMD, matches)) => {
            annotate::handlers::run_annotate(matches)?;
        }

        //
        // STRAND SUMMARY
        //
        Some((strand::cli::STRAND_CMD, matches)) => {
            strand::handlers::run_strand(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
