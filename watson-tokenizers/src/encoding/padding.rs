use super::{EncodeError, EncodedBatch, PairEncoding};

/// Value written into every padded position of all three tensors.
pub const PAD_VALUE: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    /// Pad to the longest row of the batch.
    #[default]
    Longest,
    /// Pad every row to a fixed length. Rows are never truncated.
    Fixed(usize),
}

impl From<Option<usize>> for Padding {
    fn from(max_len: Option<usize>) -> Self {
        match max_len {
            Some(max_len) => Padding::Fixed(max_len),
            None => Padding::Longest,
        }
    }
}

///
/// Right-pad a batch of ragged pair encodings into rectangular tensors. The
/// same positions are padded in all three tensors, so row alignment holds.
///
/// # Arguments:
/// - rows: the unpadded encodings, in batch order
/// - padding: target length strategy
///
pub fn pad_batch(rows: Vec<PairEncoding>, padding: Padding) -> Result<EncodedBatch, EncodeError> {
    let longest = rows.iter().map(|r| r.len()).max().unwrap_or(0);

    let target = match padding {
        Padding::Longest => longest,
        Padding::Fixed(max_len) => {
            if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() > max_len) {
                return Err(EncodeError::ExceedsMaxLength {
                    index,
                    length: row.len(),
                    max_len,
                });
            }
            max_len
        }
    };

    let mut batch = EncodedBatch {
        token_ids: Vec::with_capacity(rows.len()),
        attention_mask: Vec::with_capacity(rows.len()),
        segment_ids: Vec::with_capacity(rows.len()),
        lengths: Vec::with_capacity(rows.len()),
    };

    for row in rows {
        let length = row.len();
        let mut attention_mask = row.attention_mask();
        let PairEncoding {
            mut ids,
            mut segment_ids,
        } = row;

        ids.resize(target, PAD_VALUE);
        attention_mask.resize(target, PAD_VALUE as u8);
        segment_ids.resize(target, PAD_VALUE as u8);

        batch.token_ids.push(ids);
        batch.attention_mask.push(attention_mask);
        batch.segment_ids.push(segment_ids);
        batch.lengths.push(length);
    }

    Ok(batch)
}
