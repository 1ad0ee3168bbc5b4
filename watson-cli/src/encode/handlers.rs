use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::{Deserialize, Serialize};

use watson_core::models::NliDataset;
use watson_core::utils::remove_all_extensions;
use watson_tokenizers::config::{EncoderConfig, TokenizerConfig, TokenizerInputFileType};
use watson_tokenizers::{
    ModelInputs, Padding, PairOrder, SequencePairEncoder, SubwordTokenizer, Tokenizer,
};

use super::cli::{BINCODE_OUT_EXT, DEFAULT_FORMAT, JSON_OUT_EXT};

/// What `encode` writes to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedDataset {
    pub inputs: ModelInputs,
    pub labels: Option<Vec<u32>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Bincode,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => JSON_OUT_EXT,
            OutputFormat::Bincode => BINCODE_OUT_EXT,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "bincode" => Ok(OutputFormat::Bincode),
            _ => anyhow::bail!("Unknown output format supplied: {}", s),
        }
    }
}

pub fn run_encode(matches: &ArgMatches) -> Result<()> {
    // get arguments from CLI
    let data = matches
        .get_one::<String>("data")
        .expect("A path to a dataset is required.");

    let tokenizer_path = matches
        .get_one::<String>("tokenizer")
        .expect("A path to a tokenizer is required.");

    let format = OutputFormat::from_str(
        matches
            .get_one::<String>("format")
            .map(String::as_str)
            .unwrap_or(DEFAULT_FORMAT),
    )?;

    // flags win over the [encoder] section of a toml config
    let encoder_config = load_encoder_config(Path::new(tokenizer_path))?;
    let order = match matches.get_one::<String>("order") {
        Some(order) => match PairOrder::from_str(order) {
            Ok(order) => order,
            Err(_err) => anyhow::bail!("Unknown pair order supplied: {}", order),
        },
        None => encoder_config.pair_order,
    };
    let max_len = matches
        .get_one::<usize>("max-len")
        .copied()
        .or(encoder_config.max_len);

    let data = PathBuf::from(data);
    let output = match matches.get_one::<String>("output") {
        Some(output) => PathBuf::from(output),
        None => default_output_path(&data, format),
    };

    // coerce arguments to types
    let dataset = if matches.get_flag("unlabelled") {
        NliDataset::from_csv_unlabelled(&data)?
    } else {
        NliDataset::from_csv(&data)?
    };
    let tokenizer = Tokenizer::from_auto(tokenizer_path)
        .with_context(|| format!("Failed to load tokenizer from {tokenizer_path}"))?;

    let encoded = encode_dataset(&dataset, &tokenizer, order, Padding::from(max_len))?;
    write_output(&encoded, &output, format)?;

    info!("Wrote {} encoded pairs to {:?}", encoded.inputs.len(), output);

    Ok(())
}

fn load_encoder_config(tokenizer_path: &Path) -> Result<EncoderConfig> {
    match TokenizerInputFileType::from_path(tokenizer_path)? {
        TokenizerInputFileType::Toml => Ok(TokenizerConfig::try_from(tokenizer_path)?
            .encoder
            .unwrap_or_default()),
        _ => Ok(EncoderConfig::default()),
    }
}

fn default_output_path(data: &Path, format: OutputFormat) -> PathBuf {
    let stem = remove_all_extensions(data);
    data.with_file_name(format!("{}.{}", stem, format.extension()))
}

///
/// Encode every example of a dataset through the library batch path, with a
/// spinner while the rows are encoded and padded.
///
pub fn encode_dataset<T: SubwordTokenizer + ?Sized>(
    dataset: &NliDataset,
    tokenizer: &T,
    order: PairOrder,
    padding: Padding,
) -> Result<EncodedDataset> {
    let encoder = SequencePairEncoder::new(tokenizer)?.with_padding(padding);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message(format!("Encoding {} pairs", dataset.len()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let batch = encoder.encode_examples(dataset.examples(), order)?;
    pb.finish_and_clear();

    info!(
        "Encoded {} pairs ({:?}, {:?}) into tensors of width {}",
        batch.batch_size(),
        order,
        padding,
        batch.seq_len()
    );

    Ok(EncodedDataset {
        inputs: batch.into(),
        labels: dataset.labels(),
    })
}

pub fn write_output(encoded: &EncodedDataset, path: &Path, format: OutputFormat) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create output file: {:?}", path))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Json => serde_json::to_writer(&mut writer, encoded)?,
        OutputFormat::Bincode => bincode::serialize_into(&mut writer, encoded)?,
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::super::cli::create_encode_cli;

    #[fixture]
    fn dataset() -> NliDataset {
        NliDataset::from_csv("../tests/data/nli/train.csv").unwrap()
    }

    #[fixture]
    fn tokenizer() -> Tokenizer {
        Tokenizer::from_auto("../tests/data/tokenizers/vocab.txt").unwrap()
    }

    #[rstest]
    fn test_encode_dataset(dataset: NliDataset, tokenizer: Tokenizer) {
        let encoded =
            encode_dataset(&dataset, &tokenizer, PairOrder::HypothesisFirst, Padding::Longest)
                .unwrap();

        assert_eq!(encoded.inputs.len(), 12);
        assert_eq!(encoded.labels.as_ref().map(|l| l.len()), Some(12));

        let encoder = SequencePairEncoder::new(&tokenizer).unwrap();
        let batch = encoder
            .encode_examples(dataset.examples(), PairOrder::HypothesisFirst)
            .unwrap();
        assert_eq!(encoded.inputs, ModelInputs::from(batch));
    }

    #[rstest]
    fn test_encode_dataset_rejects_long_rows(dataset: NliDataset, tokenizer: Tokenizer) {
        let result =
            encode_dataset(&dataset, &tokenizer, PairOrder::PremiseFirst, Padding::Fixed(10));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Example 0"));
    }

    #[rstest]
    fn test_default_output_path() {
        let path = default_output_path(Path::new("data/train.csv.gz"), OutputFormat::Bincode);
        assert_eq!(path, PathBuf::from("data/train.encoded.bin"));
    }

    #[rstest]
    fn test_run_encode_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");

        let matches = create_encode_cli().get_matches_from([
            "encode",
            "../tests/data/nli/train.csv",
            "--tokenizer",
            "../tests/data/tokenizers/tokenizer_fixed_len.toml",
            "--output",
            output.to_str().unwrap(),
        ]);
        run_encode(&matches).unwrap();

        let written: EncodedDataset =
            serde_json::from_reader(File::open(&output).unwrap()).unwrap();
        assert_eq!(written.inputs.len(), 12);
        // max_len from the config file
        assert_eq!(written.inputs.seq_len(), 24);
        assert_eq!(written.labels.unwrap()[0], 2);
    }

    #[rstest]
    fn test_run_encode_bincode_unlabelled() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.bin");

        let matches = create_encode_cli().get_matches_from([
            "encode",
            "../tests/data/nli/test.csv",
            "--tokenizer",
            "../tests/data/tokenizers/vocab.txt",
            "--format",
            "bincode",
            "--order",
            "premise-first",
            "--max-len",
            "20",
            "--unlabelled",
            "--output",
            output.to_str().unwrap(),
        ]);
        run_encode(&matches).unwrap();

        let written: EncodedDataset =
            bincode::deserialize_from(File::open(&output).unwrap()).unwrap();
        assert_eq!(written.inputs.len(), 3);
        assert_eq!(written.inputs.seq_len(), 20);
        assert_eq!(written.labels, None);
    }

    #[rstest]
    fn test_run_encode_rejects_bad_order() {
        let matches = create_encode_cli().get_matches_from([
            "encode",
            "../tests/data/nli/train.csv",
            "--tokenizer",
            "../tests/data/tokenizers/vocab.txt",
            "--order",
            "sideways",
        ]);
        assert!(run_encode(&matches).is_err());
    }
}
