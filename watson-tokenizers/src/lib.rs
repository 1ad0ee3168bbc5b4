//! # watson-tokenizers
//!
//! Turns natural-language sentence pairs into the packed integer tensors a
//! BERT-style encoder consumes.
//!
//! ## Purpose
//!
//! A pair `(a, b)` becomes `[CLS] a [SEP] b [SEP]`, together with an attention
//! mask and segment ids marking which sentence every position belongs to. Rows
//! are encoded independently and then padded once, across the whole batch.
//!
//! ## Design Philosophy
//!
//! Subword splitting is not done here. Tokenizers are injected through the
//! [`SubwordTokenizer`] trait; this crate ships a whole-word tokenizer over a BERT
//! `vocab.txt` and an adapter for `tokenizer.json` files, both running the
//! `tokenizers` crate's BERT normalizer and pre-tokenizer. The `huggingface`
//! feature adds downloads from the hub.
//!
//! ## Main Components
//!
//! - **`SequencePairEncoder`**: builds padded `EncodedBatch`es from sentence pairs
//! - **`Tokenizer`**: tokenizer backends constructed from files on disk
//! - **`Vocab`**: token <-> id mapping
//! - **`TrainingSet` / `Trainer`**: the hand-off to an external training loop
//!
//! ## Example
//!
//! ```rust
//! use watson_tokenizers::{Tokenizer, encode_pair_batch};
//!
//! let tokenizer = Tokenizer::from_vocab("../tests/data/tokenizers/vocab.txt").unwrap();
//! let batch = encode_pair_batch(&["I love you"], &["hello world"], &tokenizer).unwrap();
//!
//! assert_eq!(batch.token_ids[0][0], 101);
//! ```
//!
pub mod config;
pub mod encoding;
pub mod error;
pub mod fit;
pub mod huggingface;
pub mod tokenizer;
pub mod utils;
pub mod vocab;

// re-export things
pub use encoding::*;
pub use error::*;
pub use fit::*;
pub use tokenizer::*;
pub use utils::special_tokens::SpecialTokens;
pub use vocab::*;

// contants
pub mod consts {
    pub const ENCODE_CMD: &str = "encode";
}
