pub mod encoder;
pub mod padding;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use watson_core::models::Example;

use crate::error::TokenizerError;

pub use encoder::{SequencePairEncoder, encode_one, encode_pair_batch};
pub use padding::{Padding, pad_batch};

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Batch size mismatch: {hypotheses} hypotheses but {premises} premises")]
    BatchSizeMismatch { hypotheses: usize, premises: usize },
    #[error("Example {index} is {length} tokens long, longer than the maximum of {max_len}")]
    ExceedsMaxLength {
        index: usize,
        length: usize,
        max_len: usize,
    },
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
}

///
/// The unpadded encoding of one sentence pair:
/// `[CLS] first [SEP] second [SEP]` with matching segment ids.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairEncoding {
    pub ids: Vec<u32>,
    pub segment_ids: Vec<u8>,
}

impl PairEncoding {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Before padding every position holds a real token.
    pub fn attention_mask(&self) -> Vec<u8> {
        vec![1; self.ids.len()]
    }
}

///
/// Three row-aligned, rectangular tensors for a batch of sentence pairs. Every
/// row of every tensor has length `seq_len()`; `lengths[i]` is the number of
/// real tokens in row `i` before padding.
///
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncodedBatch {
    pub token_ids: Vec<Vec<u32>>,
    pub attention_mask: Vec<Vec<u8>>,
    pub segment_ids: Vec<Vec<u8>>,
    pub lengths: Vec<usize>,
}

impl EncodedBatch {
    pub fn batch_size(&self) -> usize {
        self.token_ids.len()
    }

    pub fn seq_len(&self) -> usize {
        self.token_ids.first().map_or(0, |row| row.len())
    }

    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
    }
}

///
/// An [EncodedBatch] under the input names the classifier is built with.
///
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModelInputs {
    pub input_word_ids: Vec<Vec<u32>>,
    pub input_mask: Vec<Vec<u8>>,
    pub input_type_ids: Vec<Vec<u8>>,
}

impl ModelInputs {
    pub fn len(&self) -> usize {
        self.input_word_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_word_ids.is_empty()
    }

    pub fn seq_len(&self) -> usize {
        self.input_word_ids.first().map_or(0, |row| row.len())
    }
}

impl From<EncodedBatch> for ModelInputs {
    fn from(batch: EncodedBatch) -> Self {
        ModelInputs {
            input_word_ids: batch.token_ids,
            input_mask: batch.attention_mask,
            input_type_ids: batch.segment_ids,
        }
    }
}

///
/// Which sentence of an [Example] is placed in segment 0.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairOrder {
    #[default]
    HypothesisFirst,
    PremiseFirst,
}

impl PairOrder {
    /// Returns `(segment 0 text, segment 1 text)`.
    pub fn arrange<'a>(&self, example: &'a Example) -> (&'a str, &'a str) {
        match self {
            PairOrder::HypothesisFirst => (&example.hypothesis, &example.premise),
            PairOrder::PremiseFirst => (&example.premise, &example.hypothesis),
        }
    }
}

impl FromStr for PairOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "hypothesis_first" => Ok(PairOrder::HypothesisFirst),
            "premise_first" => Ok(PairOrder::PremiseFirst),
            _ => Err(format!("Unknown pair order: {s}")),
        }
    }
}
