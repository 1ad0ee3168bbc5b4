use thiserror::Error;

use super::config::TokenizerConfigError;

#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] TokenizerConfigError),
    #[error("Vocab error: {0}")]
    VocabError(#[from] crate::vocab::VocabError),
    #[error("Special token `{0}` is not in the vocabulary")]
    MissingSpecialToken(String),
    #[error("Token `{0}` has no id in the vocabulary")]
    UnknownToken(String),
    #[error("Backing tokenizer failed: {0}")]
    External(String),
}
