use std::fs::read_to_string;
use std::path::Path;

use thiserror::Error;

use serde::{Deserialize, Serialize};
use std::ffi::OsStr;

use crate::encoding::PairOrder;

#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SpecialToken {
    Unk,
    Pad,
    Cls,
    Sep,
    Mask,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct SpecialTokenAssignment {
    pub name: SpecialToken,
    pub token: String,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerType {
    #[serde(rename = "wordlevel")]
    WordLevel,
    #[serde(rename = "huggingface")]
    HuggingFace,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Default, Clone)]
pub struct EncoderConfig {
    #[serde(default)]
    pub pair_order: PairOrder,
    /// Pad every row to this length instead of the batch maximum.
    pub max_len: Option<usize>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct TokenizerConfig {
    /// `vocab.txt` for the word-level tokenizer, `tokenizer.json` for huggingface
    pub vocab: String,
    pub special_tokens: Option<Vec<SpecialTokenAssignment>>,
    pub tokenizer_type: Option<TokenizerType>,
    #[serde(default)]
    pub lowercase: bool,
    pub encoder: Option<EncoderConfig>,
}

#[derive(Debug)]
pub enum TokenizerInputFileType {
    Toml,
    Vocab,
    VocabGz,
    Json,
}

#[derive(Error, Debug)]
pub enum TokenizerConfigError {
    #[error(
        "Missing or invalid file extension in tokenizer file. It must be `toml`, `txt`, `txt.gz` or `json`"
    )]
    InvalidFileType,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type TokenizerConfigResult<T> = std::result::Result<T, TokenizerConfigError>;

impl TokenizerInputFileType {
    ///
    /// Determine the type of the tokenizer input file based on its extension.
    /// # Arguments
    /// * `path` - A reference to a `Path` object representing the file path.
    /// # Returns
    /// * `TokenizerInputFileType` - An enum representing the type of the tokenizer input file.
    ///
    pub fn from_path(path: &Path) -> TokenizerConfigResult<Self> {
        match path.extension().and_then(OsStr::to_str) {
            Some("gz") => {
                let file_stem = path
                    .file_stem()
                    .ok_or(TokenizerConfigError::InvalidFileType)?;
                let ext2 = Path::new(file_stem)
                    .extension()
                    .and_then(OsStr::to_str)
                    .ok_or(TokenizerConfigError::InvalidFileType)?;
                if ext2 == "txt" {
                    Ok(TokenizerInputFileType::VocabGz)
                } else {
                    Err(TokenizerConfigError::InvalidFileType)
                }
            }
            Some("toml") => Ok(TokenizerInputFileType::Toml),
            Some("txt") => Ok(TokenizerInputFileType::Vocab),
            Some("json") => Ok(TokenizerInputFileType::Json),
            _ => Err(TokenizerConfigError::InvalidFileType),
        }
    }
}

impl TryFrom<&Path> for TokenizerConfig {
    type Error = TokenizerConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}
