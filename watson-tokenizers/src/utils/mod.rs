//!
//! This module contains utility functions for tokenizers. Basic things
//! like vocab preparation, special token handling and the text pipeline are set up here.
//!
use std::path::Path;
use std::str::FromStr;

use serde_json::json;
use tokenizers::Tokenizer as HfTokenizer;

use special_tokens::SpecialTokens;

use super::TokenizerError;
use super::vocab::Vocab;

pub mod special_tokens;

///
/// Prepare the vocab and special tokens. This function will build
/// the vocab struct and register the special tokens in it.
///
/// Doing these together is necessary, because the special tokens contribute
/// to the vocab.
///
/// # Arguments:
/// - vocab_file: path to a `vocab.txt` (or `vocab.txt.gz`)
/// - special_tokens: the special tokens to register
///
pub fn prepare_vocab_and_special_tokens<P: AsRef<Path>>(
    vocab_file: P,
    special_tokens: SpecialTokens,
) -> Result<(Vocab, SpecialTokens), TokenizerError> {
    let mut vocab = Vocab::try_from(vocab_file.as_ref())?;
    vocab.add_special_tokens(&special_tokens);
    Ok((vocab, special_tokens))
}

///
/// Build the BERT text pipeline around a vocab: `BertNormalizer` (control-char
/// cleanup, spaces around CJK ideographs, optional lowercasing, accents kept),
/// `BertPreTokenizer` (whitespace plus every Unicode punctuation character) and
/// a `WordLevel` model that maps whole words to ids, falling back to `unk`.
///
/// Special tokens present in the vocab are registered as added tokens, so they
/// survive inside raw text as single tokens and are never lowercased.
///
/// # Arguments:
/// - vocab: the vocab, special tokens already registered
/// - special_tokens: the special tokens
/// - lowercase: lowercase text before lookup
///
pub fn build_word_level_pipeline(
    vocab: &Vocab,
    special_tokens: &SpecialTokens,
    lowercase: bool,
) -> Result<HfTokenizer, TokenizerError> {
    let specials: Vec<String> = special_tokens.into();
    let added_tokens: Vec<serde_json::Value> = specials
        .iter()
        .filter_map(|token| {
            vocab.convert_token_to_id(token).map(|id| {
                json!({
                    "id": id,
                    "content": token,
                    "single_word": false,
                    "lstrip": false,
                    "rstrip": false,
                    "normalized": false,
                    "special": true
                })
            })
        })
        .collect();

    let tokenizer_json = json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": added_tokens,
        "normalizer": {
            "type": "BertNormalizer",
            "clean_text": true,
            "handle_chinese_chars": true,
            "strip_accents": false,
            "lowercase": lowercase
        },
        "pre_tokenizer": {
            "type": "BertPreTokenizer"
        },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab.to_map(),
            "unk_token": special_tokens.unk
        }
    });

    HfTokenizer::from_str(&tokenizer_json.to_string())
        .map_err(|e| TokenizerError::External(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_pipeline_registers_special_tokens() {
        let (vocab, special_tokens) = prepare_vocab_and_special_tokens(
            "../tests/data/tokenizers/vocab.txt",
            SpecialTokens::default(),
        )
        .unwrap();
        let pipeline = build_word_level_pipeline(&vocab, &special_tokens, false).unwrap();

        let encoding = pipeline.encode("hello [SEP] world", false).unwrap();
        assert_eq!(encoding.get_tokens(), &["hello", "[SEP]", "world"]);
        assert_eq!(encoding.get_ids(), &[107, 102, 108]);
    }

    #[rstest]
    fn test_prepare_vocab_and_special_tokens() {
        let (vocab, special_tokens) = prepare_vocab_and_special_tokens(
            "../tests/data/tokenizers/vocab.txt.gz",
            SpecialTokens::default(),
        )
        .unwrap();

        assert_eq!(vocab.len(), 160);
        assert_eq!(vocab.convert_token_to_id(&special_tokens.sep), Some(102));
    }
}
