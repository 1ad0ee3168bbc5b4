use clap::{Arg, ArgAction, Command, arg, value_parser};

pub use watson_tokenizers::consts::*;

pub const DEFAULT_FORMAT: &str = "json";
pub const JSON_OUT_EXT: &str = "encoded.json";
pub const BINCODE_OUT_EXT: &str = "encoded.bin";

pub fn create_encode_cli() -> Command {
    Command::new(ENCODE_CMD)
        .author("Watson")
        .about("Encode premise/hypothesis pairs into BERT input tensors (input_word_ids, input_mask, input_type_ids).")
        .arg_required_else_help(true)
        .arg(Arg::new("data").required(true).help("Path to the dataset csv"))
        .arg(
            arg!(-t --tokenizer <tokenizer> "Tokenizer config (.toml), vocab (.txt/.txt.gz) or tokenizer.json")
                .required(true),
        )
        .arg(arg!(-o --output <output> "Where to write the encoded tensors"))
        .arg(
            arg!(--format <format> "Output format")
                .value_parser(["json", "bincode"]),
        )
        .arg(arg!(--order <order> "Which sentence leads: hypothesis-first or premise-first"))
        .arg(
            arg!(--"max-len" <max_len> "Pad every row to this length instead of the batch maximum")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--unlabelled "The dataset has no label column")
                .action(ArgAction::SetTrue),
        )
}
