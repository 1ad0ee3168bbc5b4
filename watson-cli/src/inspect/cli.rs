use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const INSPECT_CMD: &str = "inspect";
pub const DEFAULT_HEAD: usize = 5;

pub fn create_inspect_cli() -> Command {
    Command::new(INSPECT_CMD)
        .author("Watson")
        .about("Print a summary of an NLI dataset: first rows, one labelled pair and the language distribution.")
        .arg(Arg::new("data").required(true).help("Path to the dataset csv (or - for stdin)"))
        .arg(
            arg!(--index <index> "Row to print as a (premise, hypothesis, label) triple")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--head <head> "Number of leading rows to print")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--unlabelled "The dataset has no label column")
                .action(ArgAction::SetTrue),
        )
}
