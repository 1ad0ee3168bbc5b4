//!
//! Adapter that lets a `tokenizer.json` from the `tokenizers` crate stand in as a
//! [SubwordTokenizer]. Subword splitting is entirely delegated to it. Pulling
//! files from the hub needs the `huggingface` feature.
//!
use std::path::Path;
#[cfg(feature = "huggingface")]
use std::path::PathBuf;

#[cfg(feature = "huggingface")]
use hf_hub::api::sync::Api;
#[cfg(feature = "huggingface")]
use log::info;

use super::error::TokenizerError;
use super::tokenizer::SubwordTokenizer;
use super::utils::special_tokens::SpecialTokens;

pub const DEFAULT_TOKENIZER_FILENAME: &str = "tokenizer.json";

pub struct HuggingFaceTokenizer {
    inner: tokenizers::Tokenizer,
    special_tokens: SpecialTokens,
}

impl HuggingFaceTokenizer {
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        special_tokens: SpecialTokens,
    ) -> Result<Self, TokenizerError> {
        let inner = tokenizers::Tokenizer::from_file(path.as_ref())
            .map_err(|e| TokenizerError::External(e.to_string()))?;
        Ok(Self {
            inner,
            special_tokens,
        })
    }

    ///
    /// Load the tokenizer of a pretrained model, e.g. `bert-base-multilingual-cased`.
    /// A local directory is used as-is, anything else is fetched from the hub.
    ///
    #[cfg(feature = "huggingface")]
    pub fn from_pretrained(name: &str) -> Result<Self, TokenizerError> {
        let local = Path::new(name);
        let tokenizer_file: PathBuf = if local.exists() {
            local.join(DEFAULT_TOKENIZER_FILENAME)
        } else {
            let api = Api::new().map_err(|e| TokenizerError::External(e.to_string()))?;
            let repo = api.model(name.to_string());
            info!("Fetching {DEFAULT_TOKENIZER_FILENAME} for {name}");
            repo.get(DEFAULT_TOKENIZER_FILENAME)
                .map_err(|e| TokenizerError::External(e.to_string()))?
        };

        Self::from_file(tokenizer_file, SpecialTokens::default())
    }
}

impl SubwordTokenizer for HuggingFaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| TokenizerError::External(e.to_string()))?;
        Ok(encoding.get_tokens().to_vec())
    }

    fn convert_token_to_id(&self, token: &str) -> Option<u32> {
        self.inner.token_to_id(token)
    }

    fn special_tokens(&self) -> &SpecialTokens {
        &self.special_tokens
    }

    fn get_vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }
}
