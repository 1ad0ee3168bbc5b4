use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Can't read file: {0}")]
    FileReadError(#[from] anyhow::Error),

    #[error("Missing required column `{0}` in dataset header")]
    MissingColumn(String),

    #[error("Row {row} has no label, but the dataset was loaded as labelled")]
    MissingLabel { row: usize },

    #[error("Row {row} has invalid label {value}: labels must be 0, 1 or 2")]
    InvalidLabel { row: usize, value: i64 },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
