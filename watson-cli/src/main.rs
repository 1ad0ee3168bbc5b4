mod encode;
mod inspect;

use anyhow::Result;
use clap::{ArgAction, ArgMatches, Command, arg};
use env_logger::Env;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "watson";
    pub const BIN_NAME: &str = "watson";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Watson")
        .about("Tools for preparing multilingual premise/hypothesis pairs as input to BERT-style NLI classifiers.")
        .subcommand_required(true)
        .arg(
            arg!(-v --verbose "Increase log verbosity (-v debug, -vv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(inspect::cli::create_inspect_cli())
        .subcommand(encode::cli::create_encode_cli())
}

fn init_logging(matches: &ArgMatches) {
    let level = match matches.get_count("verbose") {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    if level > log::LevelFilter::Info {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(&matches);

    match matches.subcommand() {
        //
        // INSPECT
        //
        Some((inspect::cli::INSPECT_CMD, matches)) => {
            inspect::handlers::run_inspect(matches)?;
        }

        //
        // ENCODE
        //
        Some((encode::cli::ENCODE_CMD, matches)) => {
            encode::handlers::run_encode(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
