use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

///
/// The three NLI classes. Discriminants match the integer labels of the
/// training data, so `label as u32` is the class index fed to the model.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i64")]
pub enum Label {
    Entailment = 0,
    Neutral = 1,
    Contradiction = 2,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Entailment, Label::Neutral, Label::Contradiction];

    pub fn id(&self) -> u32 {
        *self as u32
    }

    pub fn name(&self) -> &'static str {
        match self {
            Label::Entailment => "entailment",
            Label::Neutral => "neutral",
            Label::Contradiction => "contradiction",
        }
    }
}

impl TryFrom<i64> for Label {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Entailment),
            1 => Ok(Label::Neutral),
            2 => Ok(Label::Contradiction),
            other => Err(format!("invalid label: {other}")),
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label as u8
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "entailment" | "0" => Ok(Label::Entailment),
            "neutral" | "1" => Ok(Label::Neutral),
            "contradiction" | "2" => Ok(Label::Contradiction),
            _ => Err(format!("Unknown label: {s}")),
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, Label::Entailment)]
    #[case(1, Label::Neutral)]
    #[case(2, Label::Contradiction)]
    fn test_label_from_int(#[case] value: i64, #[case] expected: Label) {
        assert_eq!(Label::try_from(value), Ok(expected));
        assert_eq!(expected.id() as i64, value);
    }

    #[rstest]
    #[case(-1)]
    #[case(3)]
    fn test_label_out_of_range(#[case] value: i64) {
        assert_eq!(Label::try_from(value).is_err(), true);
    }

    #[rstest]
    fn test_label_from_str() {
        assert_eq!("Contradiction".parse::<Label>(), Ok(Label::Contradiction));
        assert_eq!("1".parse::<Label>(), Ok(Label::Neutral));
        assert_eq!("maybe".parse::<Label>().is_err(), true);
    }
}
