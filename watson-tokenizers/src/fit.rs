//!
//! The boundary to whatever trains the classifier. This crate does not train
//! anything itself: it packages encoded inputs and labels, checks them against
//! the model's fixed input shape, and hands them to a [Trainer].
//!
use serde::{Deserialize, Serialize};
use thiserror::Error;

use watson_core::consts::NUM_LABELS;
use watson_core::models::NliDataset;

use crate::encoding::{EncodeError, EncodedBatch, ModelInputs, PairOrder, SequencePairEncoder};
use crate::tokenizer::SubwordTokenizer;

pub const DEFAULT_EPOCHS: usize = 2;
pub const DEFAULT_BATCH_SIZE: usize = 64;
pub const DEFAULT_LEARNING_RATE: f64 = 1e-5;
pub const DEFAULT_MAX_LEN: usize = 259;

#[derive(Error, Debug)]
pub enum FitError {
    #[error("{labels} labels for {examples} encoded examples")]
    LabelCountMismatch { examples: usize, labels: usize },
    #[error("Label {label} at position {index} is outside 0..{num_labels}")]
    InvalidLabel {
        index: usize,
        label: u32,
        num_labels: usize,
    },
    #[error("Dataset has unlabelled examples")]
    Unlabelled,
    #[error("Inputs are {actual} tokens wide but the model expects {expected}")]
    SequenceLengthMismatch { expected: usize, actual: usize },
    #[error("Invalid fit configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub max_len: usize,
    pub num_labels: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        FitConfig {
            epochs: DEFAULT_EPOCHS,
            batch_size: DEFAULT_BATCH_SIZE,
            learning_rate: DEFAULT_LEARNING_RATE,
            max_len: DEFAULT_MAX_LEN,
            num_labels: NUM_LABELS,
        }
    }
}

impl FitConfig {
    ///
    /// Check that a training set can be fed to a model built with this config.
    ///
    pub fn validate(&self, training_set: &TrainingSet) -> Result<(), FitError> {
        if self.epochs == 0 {
            return Err(FitError::InvalidConfig("epochs must be at least 1".to_string()));
        }
        if self.batch_size == 0 {
            return Err(FitError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if let Some((index, &label)) = training_set
            .labels
            .iter()
            .enumerate()
            .find(|(_, l)| **l as usize >= self.num_labels)
        {
            return Err(FitError::InvalidLabel {
                index,
                label,
                num_labels: self.num_labels,
            });
        }
        let actual = training_set.inputs.seq_len();
        if !training_set.is_empty() && actual != self.max_len {
            return Err(FitError::SequenceLengthMismatch {
                expected: self.max_len,
                actual,
            });
        }
        Ok(())
    }
}

/// Encoded inputs and their class labels, row for row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSet {
    pub inputs: ModelInputs,
    pub labels: Vec<u32>,
}

/// A contiguous slice of a [TrainingSet].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingBatch<'a> {
    pub input_word_ids: &'a [Vec<u32>],
    pub input_mask: &'a [Vec<u8>],
    pub input_type_ids: &'a [Vec<u8>],
    pub labels: &'a [u32],
}

impl TrainingBatch<'_> {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl TrainingSet {
    pub fn new(batch: EncodedBatch, labels: Vec<u32>) -> Result<Self, FitError> {
        if batch.batch_size() != labels.len() {
            return Err(FitError::LabelCountMismatch {
                examples: batch.batch_size(),
                labels: labels.len(),
            });
        }
        if let Some((index, &label)) = labels
            .iter()
            .enumerate()
            .find(|(_, l)| **l as usize >= NUM_LABELS)
        {
            return Err(FitError::InvalidLabel {
                index,
                label,
                num_labels: NUM_LABELS,
            });
        }

        Ok(TrainingSet {
            inputs: batch.into(),
            labels,
        })
    }

    ///
    /// Encode a labelled dataset and pair it with its labels.
    ///
    /// # Arguments:
    /// - dataset: the examples; every one must be labelled
    /// - encoder: a configured pair encoder
    /// - order: which sentence goes into segment 0
    ///
    pub fn from_dataset<T: SubwordTokenizer + ?Sized>(
        dataset: &NliDataset,
        encoder: &SequencePairEncoder<'_, T>,
        order: PairOrder,
    ) -> Result<Self, FitError> {
        let labels = dataset.labels().ok_or(FitError::Unlabelled)?;
        let batch = encoder.encode_examples(dataset.examples(), order)?;
        TrainingSet::new(batch, labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    ///
    /// Iterate over mini-batches in order. The last batch may be shorter.
    ///
    pub fn batches(
        &self,
        batch_size: usize,
    ) -> Result<impl Iterator<Item = TrainingBatch<'_>>, FitError> {
        if batch_size == 0 {
            return Err(FitError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }

        Ok((0..self.len()).step_by(batch_size).map(move |start| {
            let end = (start + batch_size).min(self.len());
            TrainingBatch {
                input_word_ids: &self.inputs.input_word_ids[start..end],
                input_mask: &self.inputs.input_mask[start..end],
                input_type_ids: &self.inputs.input_type_ids[start..end],
                labels: &self.labels[start..end],
            }
        }))
    }
}

///
/// Anything that can fit a classifier on encoded sentence pairs. The model and
/// optimizer behind it are opaque here.
///
pub trait Trainer {
    type Model;
    type Error: From<FitError>;

    fn fit(
        &mut self,
        training_set: &TrainingSet,
        config: &FitConfig,
    ) -> Result<Self::Model, Self::Error>;
}
