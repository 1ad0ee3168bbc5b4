use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use super::example::Example;
use super::label::Label;
use crate::consts::{HYPOTHESIS_COL, LABEL_COL, LANGUAGE_COL, PREMISE_COL};
use crate::errors::DatasetError;
use crate::utils::get_dynamic_reader;

#[derive(Debug, Deserialize)]
struct ExampleRecord {
    id: Option<String>,
    premise: String,
    hypothesis: String,
    lang_abv: Option<String>,
    language: String,
    label: Option<i64>,
}

/// Number of examples written in one language.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageCount {
    pub language: String,
    pub count: usize,
    pub percent: f64,
}

///
/// An ordered collection of NLI examples. Row order of the source file is
/// preserved, so position `i` here is position `i` in every tensor built from it.
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NliDataset {
    examples: Vec<Example>,
}

impl NliDataset {
    pub fn new(examples: Vec<Example>) -> Self {
        NliDataset { examples }
    }

    ///
    /// Load a labelled dataset from a CSV file (optionally gzip'd). The header
    /// must contain `premise`, `hypothesis`, `label` and `language`.
    ///
    /// # Arguments:
    /// - path: path to the csv file
    ///
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let reader = get_dynamic_reader(path.as_ref())?;
        let dataset = Self::from_reader(reader, true)?;
        info!(
            "Loaded {} examples in {} languages from {:?}",
            dataset.len(),
            dataset.language_distribution().len(),
            path.as_ref()
        );
        Ok(dataset)
    }

    ///
    /// Load a dataset whose `label` column may be absent (e.g. a test split).
    ///
    pub fn from_csv_unlabelled<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let reader = get_dynamic_reader(path.as_ref())?;
        let dataset = Self::from_reader(reader, false)?;
        info!(
            "Loaded {} unlabelled examples from {:?}",
            dataset.len(),
            path.as_ref()
        );
        Ok(dataset)
    }

    ///
    /// Parse CSV records from any reader.
    ///
    /// # Arguments:
    /// - reader: the csv source, header row first
    /// - require_label: when true every row must carry a label in 0..=2
    ///
    pub fn from_reader<R: Read>(reader: R, require_label: bool) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut required = vec![PREMISE_COL, HYPOTHESIS_COL, LANGUAGE_COL];
        if require_label {
            required.push(LABEL_COL);
        }
        for col in required {
            if !headers.iter().any(|h| h == col) {
                return Err(DatasetError::MissingColumn(col.to_string()));
            }
        }

        let mut examples = vec![];
        for (i, record) in csv_reader.deserialize::<ExampleRecord>().enumerate() {
            let record = record?;
            let row = i + 1;

            let label = match record.label {
                Some(value) => Some(
                    Label::try_from(value).map_err(|_| DatasetError::InvalidLabel { row, value })?,
                ),
                None if require_label => return Err(DatasetError::MissingLabel { row }),
                None => None,
            };

            examples.push(Example {
                id: record.id,
                premise: record.premise,
                hypothesis: record.hypothesis,
                lang_abv: record.lang_abv,
                language: record.language,
                label,
            });
        }

        debug!("Parsed {} csv records", examples.len());

        Ok(NliDataset { examples })
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Example> {
        self.examples.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Example> {
        self.examples.iter()
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn head(&self, n: usize) -> &[Example] {
        &self.examples[..n.min(self.examples.len())]
    }

    pub fn premises(&self) -> Vec<&str> {
        self.examples.iter().map(|e| e.premise.as_str()).collect()
    }

    pub fn hypotheses(&self) -> Vec<&str> {
        self.examples.iter().map(|e| e.hypothesis.as_str()).collect()
    }

    ///
    /// Class indices for every example, or `None` if any example is unlabelled.
    ///
    pub fn labels(&self) -> Option<Vec<u32>> {
        self.examples
            .iter()
            .map(|e| e.label.map(|l| l.id()))
            .collect()
    }

    ///
    /// Count examples per language. The result is sorted by language name and
    /// the counts sum to `self.len()`.
    ///
    pub fn language_distribution(&self) -> Vec<LanguageCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for example in self.examples.iter() {
            *counts.entry(example.language.as_str()).or_insert(0) += 1;
        }

        let total = self.len() as f64;
        counts
            .into_iter()
            .map(|(language, count)| LanguageCount {
                language: language.to_string(),
                count,
                percent: 100.0 * count as f64 / total,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a NliDataset {
    type Item = &'a Example;
    type IntoIter = std::slice::Iter<'a, Example>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn train_path() -> String {
        "../tests/data/nli/train.csv".to_string()
    }

    #[fixture]
    fn test_path() -> String {
        "../tests/data/nli/test.csv".to_string()
    }

    #[rstest]
    fn test_load_train_csv(train_path: String) {
        let dataset = NliDataset::from_csv(&train_path).unwrap();
        assert_eq!(dataset.len(), 12);

        let first = dataset.get(0).unwrap();
        assert_eq!(first.id.as_deref(), Some("5130fd2cb5"));
        assert_eq!(first.language, "English");
        assert_eq!(first.lang_abv.as_deref(), Some("en"));
        assert_eq!(first.label, Some(Label::Contradiction));
    }

    #[rstest]
    fn test_labelled_load_rejects_unlabelled_file(test_path: String) {
        let result = NliDataset::from_csv(&test_path);
        assert!(matches!(result, Err(DatasetError::MissingColumn(col)) if col == "label"));
    }

    #[rstest]
    fn test_load_unlabelled_csv(test_path: String) {
        let dataset = NliDataset::from_csv_unlabelled(&test_path).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.labels(), None);
    }

    #[rstest]
    fn test_missing_premise_column() {
        let csv = "hypothesis,label,language\nfoo,0,English\n";
        let result = NliDataset::from_reader(csv.as_bytes(), true);
        assert!(matches!(result, Err(DatasetError::MissingColumn(col)) if col == "premise"));
    }

    #[rstest]
    fn test_columns_in_any_order() {
        let csv = "language,label,hypothesis,premise,extra\nFrench,1,Il dort.,Le chat dort.,x\n";
        let dataset = NliDataset::from_reader(csv.as_bytes(), true).unwrap();

        let example = dataset.get(0).unwrap();
        assert_eq!(example.premise, "Le chat dort.");
        assert_eq!(example.hypothesis, "Il dort.");
        assert_eq!(example.label, Some(Label::Neutral));
    }

    #[rstest]
    fn test_padded_header_names() {
        let csv = "premise , hypothesis,label ,  language\nLe chat dort.,Il dort.,1,French\n";
        let dataset = NliDataset::from_reader(csv.as_bytes(), true).unwrap();

        let example = dataset.get(0).unwrap();
        assert_eq!(example.premise, "Le chat dort.");
        assert_eq!(example.language, "French");
        assert_eq!(example.label, Some(Label::Neutral));
    }

    #[rstest]
    #[case("3", 3)]
    #[case("-1", -1)]
    fn test_invalid_label(#[case] raw: &str, #[case] value: i64) {
        let csv = format!("premise,hypothesis,label,language\na,b,0,English\nc,d,{raw},English\n");
        let result = NliDataset::from_reader(csv.as_bytes(), true);
        assert!(matches!(
            result,
            Err(DatasetError::InvalidLabel { row: 2, value: v }) if v == value
        ));
    }

    #[rstest]
    fn test_empty_label_in_labelled_file() {
        let csv = "premise,hypothesis,label,language\na,b,,English\n";
        let result = NliDataset::from_reader(csv.as_bytes(), true);
        assert!(matches!(result, Err(DatasetError::MissingLabel { row: 1 })));
    }

    #[rstest]
    fn test_language_distribution(train_path: String) {
        let dataset = NliDataset::from_csv(&train_path).unwrap();
        let dist = dataset.language_distribution();

        let total: usize = dist.iter().map(|c| c.count).sum();
        assert_eq!(total, dataset.len());

        let languages: Vec<&str> = dist.iter().map(|c| c.language.as_str()).collect();
        let mut sorted = languages.clone();
        sorted.sort();
        assert_eq!(languages, sorted);

        let english = dist.iter().find(|c| c.language == "English").unwrap();
        assert_eq!(english.count, 6);
        assert!((english.percent - 50.0).abs() < 1e-9);
    }

    #[rstest]
    fn test_columns_line_up(train_path: String) {
        let dataset = NliDataset::from_csv(&train_path).unwrap();
        let labels = dataset.labels().unwrap();

        assert_eq!(dataset.premises().len(), dataset.len());
        assert_eq!(dataset.hypotheses().len(), dataset.len());
        assert_eq!(labels.len(), dataset.len());
        assert_eq!(dataset.head(100).len(), dataset.len());
        assert_eq!(dataset.head(2).len(), 2);
    }

    #[rstest]
    fn test_example_display() {
        let example = Example::new("A dog runs.", "An animal moves.", "English", Some(Label::Entailment));
        assert_eq!(
            example.to_string(),
            "[\"A dog runs.\", \"An animal moves.\", 0 (entailment)]"
        );
    }
}
