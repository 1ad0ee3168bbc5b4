use anyhow::{Context, Result};
use clap::ArgMatches;

use watson_core::models::NliDataset;
use watson_core::utils::get_dynamic_reader_w_stdin;

use super::cli::DEFAULT_HEAD;

pub fn run_inspect(matches: &ArgMatches) -> Result<()> {
    let data = matches
        .get_one::<String>("data")
        .expect("A path to a dataset is required.");
    let head = matches
        .get_one::<usize>("head")
        .copied()
        .unwrap_or(DEFAULT_HEAD);
    let unlabelled = matches.get_flag("unlabelled");

    let reader = get_dynamic_reader_w_stdin(data)?;
    let dataset = NliDataset::from_reader(reader, !unlabelled)
        .with_context(|| format!("Failed to load dataset from {data}"))?;

    println!("{}", render_summary(&dataset, head, matches.get_one::<usize>("index").copied())?);

    Ok(())
}

///
/// Build the text report printed by `inspect`.
///
pub fn render_summary(dataset: &NliDataset, head: usize, index: Option<usize>) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("{} examples\n\n", dataset.len()));

    for example in dataset.head(head) {
        out.push_str(&format!(
            "{:<12} {:<4} {}\n",
            example.id.as_deref().unwrap_or("-"),
            example.lang_abv.as_deref().unwrap_or("-"),
            example
        ));
    }

    if let Some(index) = index {
        let example = dataset
            .get(index)
            .with_context(|| format!("Index {index} is out of range for {} examples", dataset.len()))?;
        out.push_str(&format!("\nExample {index}: {example}\n"));
    }

    out.push_str("\nLanguage distribution:\n");
    for count in dataset.language_distribution() {
        out.push_str(&format!(
            "  {:<16} {:>8} {:>6.1}%\n",
            count.language, count.count, count.percent
        ));
    }

    Ok(out)
}
