//!
//! This module defines the `Vocab` struct: the ordered list of tokens a model was
//! trained with, and the mapping between those tokens and their integer ids.
//!
//! Vocab files follow the BERT convention of one token per line, where the id of a
//! token is its zero-based line number.
//!
use std::collections::HashMap as StdHashMap;
use std::io::BufRead;
use std::path::Path;

use fxhash::FxHashMap as HashMap;
use log::warn;
use thiserror::Error;

use watson_core::utils::get_dynamic_reader;

use super::utils::special_tokens::SpecialTokens;

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("Vocab file is empty")]
    Empty,
    #[error("Duplicate token `{token}` on line {line}")]
    DuplicateToken { token: String, line: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Can't read vocab file: {0}")]
    Read(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vocab {
    pub tokens: Vec<String>,
    pub token_to_id: HashMap<String, u32>,
    pub special_tokens: Option<Vec<String>>,
}

impl Vocab {
    ///
    /// Build a vocab from an ordered list of tokens. Token `i` gets id `i`.
    ///
    /// # Arguments:
    /// - `tokens`: the tokens, in id order
    ///
    pub fn from_tokens(tokens: Vec<String>) -> Result<Self, VocabError> {
        let mut token_to_id = HashMap::default();
        for (i, token) in tokens.iter().enumerate() {
            if token_to_id.insert(token.clone(), i as u32).is_some() {
                return Err(VocabError::DuplicateToken {
                    token: token.clone(),
                    line: i + 1,
                });
            }
        }

        Ok(Vocab {
            tokens,
            token_to_id,
            special_tokens: None,
        })
    }

    ///
    /// Append a token with the next free id. Existing tokens keep their id.
    ///
    pub fn add_token(&mut self, token: &str) -> u32 {
        if let Some(id) = self.token_to_id.get(token) {
            return *id;
        }
        let new_id = self.tokens.len() as u32;
        self.token_to_id.insert(token.to_owned(), new_id);
        self.tokens.push(token.to_owned());
        new_id
    }

    pub fn convert_token_to_id(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    pub fn convert_id_to_token(&self, id: u32) -> Option<String> {
        self.tokens.get(id as usize).cloned()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.token_to_id.contains_key(token)
    }

    pub fn to_map(&self) -> StdHashMap<String, u32> {
        self.token_to_id
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }

    ///
    /// Register the special tokens. Any that the vocab file did not already
    /// contain are appended after the last regular token.
    ///
    pub fn add_special_tokens(&mut self, special_tokens: &SpecialTokens) {
        let special_tokens_vec: Vec<String> = special_tokens.into();
        for token in special_tokens_vec.iter() {
            if !self.contains(token) {
                warn!("Special token {token} is not in the vocab, appending it");
            }
            self.add_token(token);
        }
        self.special_tokens = Some(special_tokens_vec);
    }
}

impl TryFrom<&Path> for Vocab {
    type Error = VocabError;

    fn try_from(value: &Path) -> Result<Self, Self::Error> {
        let reader = get_dynamic_reader(value).map_err(|err| VocabError::Read(err.to_string()))?;

        let mut tokens = vec![];
        for line in reader.lines() {
            let line = line?;
            // keep the line even when it is blank, ids are line numbers
            tokens.push(line.trim_end_matches(['\r', '\n']).to_string());
        }

        if tokens.is_empty() {
            return Err(VocabError::Empty);
        }

        Vocab::from_tokens(tokens)
    }
}
