use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use watson_core::models::Example;

use super::padding::{Padding, pad_batch};
use super::{EncodeError, EncodedBatch, PairEncoding, PairOrder};
use crate::tokenizer::SubwordTokenizer;

///
/// Packs sentence pairs into the `[CLS] a [SEP] b [SEP]` layout BERT expects.
/// The structural token ids are resolved once, when the encoder is built.
///
pub struct SequencePairEncoder<'a, T: SubwordTokenizer + ?Sized> {
    tokenizer: &'a T,
    cls_id: u32,
    sep_id: u32,
    padding: Padding,
}

impl<'a, T: SubwordTokenizer + ?Sized> SequencePairEncoder<'a, T> {
    pub fn new(tokenizer: &'a T) -> Result<Self, EncodeError> {
        Ok(Self {
            tokenizer,
            cls_id: tokenizer.get_cls_token_id()?,
            sep_id: tokenizer.get_sep_token_id()?,
            padding: Padding::default(),
        })
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    ///
    /// Tokenize one sentence and close it with `[SEP]`.
    ///
    pub fn encode_one(&self, text: &str) -> Result<Vec<u32>, EncodeError> {
        let tokens = self.tokenizer.tokenize(text)?;
        let mut ids = self.tokenizer.convert_tokens_to_ids(&tokens)?;
        ids.push(self.sep_id);
        Ok(ids)
    }

    ///
    /// Encode one pair without padding. `first` becomes segment 0, after the
    /// leading `[CLS]`, and `second` becomes segment 1.
    ///
    pub fn encode_pair(&self, first: &str, second: &str) -> Result<PairEncoding, EncodeError> {
        let s1 = self.encode_one(first)?;
        let s2 = self.encode_one(second)?;

        let mut ids = Vec::with_capacity(1 + s1.len() + s2.len());
        ids.push(self.cls_id);
        ids.extend_from_slice(&s1);
        ids.extend_from_slice(&s2);

        let mut segment_ids = vec![0u8; 1 + s1.len()];
        segment_ids.resize(ids.len(), 1);

        Ok(PairEncoding { ids, segment_ids })
    }

    ///
    /// Encode a batch of pairs into padded tensors.
    ///
    /// # Arguments:
    /// - hypotheses: segment 0 sentences
    /// - premises: segment 1 sentences, same length as `hypotheses`
    ///
    pub fn encode_pair_batch<S>(
        &self,
        hypotheses: &[S],
        premises: &[S],
    ) -> Result<EncodedBatch, EncodeError>
    where
        S: AsRef<str> + Sync,
    {
        if hypotheses.len() != premises.len() {
            return Err(EncodeError::BatchSizeMismatch {
                hypotheses: hypotheses.len(),
                premises: premises.len(),
            });
        }

        #[cfg(feature = "parallel")]
        let rows = hypotheses
            .par_iter()
            .zip(premises.par_iter())
            .map(|(h, p)| self.encode_pair(h.as_ref(), p.as_ref()))
            .collect::<Result<Vec<PairEncoding>, EncodeError>>()?;

        #[cfg(not(feature = "parallel"))]
        let rows = hypotheses
            .iter()
            .zip(premises.iter())
            .map(|(h, p)| self.encode_pair(h.as_ref(), p.as_ref()))
            .collect::<Result<Vec<PairEncoding>, EncodeError>>()?;

        let batch = pad_batch(rows, self.padding)?;
        debug!(
            "Encoded {} pairs into tensors of length {}",
            batch.batch_size(),
            batch.seq_len()
        );

        Ok(batch)
    }

    ///
    /// Encode dataset examples, choosing which sentence leads with `order`.
    ///
    pub fn encode_examples(
        &self,
        examples: &[Example],
        order: PairOrder,
    ) -> Result<EncodedBatch, EncodeError> {
        let (firsts, seconds): (Vec<&str>, Vec<&str>) =
            examples.iter().map(|e| order.arrange(e)).unzip();
        self.encode_pair_batch(&firsts, &seconds)
    }
}

///
/// Tokenize `text`, append `[SEP]` and map everything to ids.
///
pub fn encode_one<T: SubwordTokenizer + ?Sized>(
    text: &str,
    tokenizer: &T,
) -> Result<Vec<u32>, EncodeError> {
    SequencePairEncoder::new(tokenizer)?.encode_one(text)
}

///
/// Encode hypothesis/premise pairs into tensors padded to the batch maximum.
///
pub fn encode_pair_batch<S, T>(
    hypotheses: &[S],
    premises: &[S],
    tokenizer: &T,
) -> Result<EncodedBatch, EncodeError>
where
    S: AsRef<str> + Sync,
    T: SubwordTokenizer + ?Sized,
{
    SequencePairEncoder::new(tokenizer)?.encode_pair_batch(hypotheses, premises)
}
