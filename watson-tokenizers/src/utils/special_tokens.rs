use std::collections::HashMap;

use crate::config::{SpecialToken, SpecialTokenAssignment};

/// The structural tokens of a BERT-style vocabulary.
#[derive(Clone, Debug, PartialEq)]
pub struct SpecialTokens {
    pub unk: String,
    pub pad: String,
    pub cls: String,
    pub sep: String,
    pub mask: String,
}

impl SpecialTokens {
    pub fn contains(&self, token: &str) -> bool {
        token == self.unk
            || token == self.pad
            || token == self.cls
            || token == self.sep
            || token == self.mask
    }
}

impl Default for SpecialTokens {
    fn default() -> Self {
        SpecialTokens {
            unk: "[UNK]".to_string(),
            pad: "[PAD]".to_string(),
            cls: "[CLS]".to_string(),
            sep: "[SEP]".to_string(),
            mask: "[MASK]".to_string(),
        }
    }
}

impl From<Vec<SpecialTokenAssignment>> for SpecialTokens {
    fn from(value: Vec<SpecialTokenAssignment>) -> Self {
        let mut special_tokens = SpecialTokens::default();

        for token in value {
            match token.name {
                SpecialToken::Unk => special_tokens.unk = token.token,
                SpecialToken::Pad => special_tokens.pad = token.token,
                SpecialToken::Cls => special_tokens.cls = token.token,
                SpecialToken::Sep => special_tokens.sep = token.token,
                SpecialToken::Mask => special_tokens.mask = token.token,
            }
        }

        special_tokens
    }
}

impl From<&SpecialTokens> for Vec<String> {
    fn from(val: &SpecialTokens) -> Self {
        vec![
            val.pad.clone(),
            val.unk.clone(),
            val.cls.clone(),
            val.sep.clone(),
            val.mask.clone(),
        ]
    }
}

impl From<&SpecialTokens> for HashMap<String, String> {
    fn from(val: &SpecialTokens) -> Self {
        let mut map = HashMap::new();
        map.insert("unk".to_string(), val.unk.clone());
        map.insert("pad".to_string(), val.pad.clone());
        map.insert("cls".to_string(), val.cls.clone());
        map.insert("sep".to_string(), val.sep.clone());
        map.insert("mask".to_string(), val.mask.clone());
        map
    }
}
