use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use super::label::Label;

///
/// One row of an NLI corpus: a premise, a hypothesis about it, the language
/// both are written in, and the gold label when the split is labelled.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub id: Option<String>,
    pub premise: String,
    pub hypothesis: String,
    pub lang_abv: Option<String>,
    pub language: String,
    pub label: Option<Label>,
}

impl Example {
    pub fn new(premise: &str, hypothesis: &str, language: &str, label: Option<Label>) -> Self {
        Example {
            id: None,
            premise: premise.to_string(),
            hypothesis: hypothesis.to_string(),
            lang_abv: None,
            language: language.to_string(),
            label,
        }
    }
}

impl Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self
            .label
            .map_or("-".to_string(), |l| format!("{} ({})", l.id(), l));
        write!(
            f,
            "[{:?}, {:?}, {}]",
            self.premise, self.hypothesis, label
        )
    }
}
