//! # watson-core
//!
//! Core data model for multilingual natural-language-inference corpora.
//!
//! ## Main Components
//!
//! - **`Example`**: one premise/hypothesis pair with its language and (optional) label
//! - **`Label`**: the three NLI classes, using the 0/1/2 integer encoding of the source data
//! - **`NliDataset`**: an ordered, immutable collection of examples loaded from CSV
//!
//! ## Example
//!
//! ```rust
//! use watson_core::models::NliDataset;
//!
//! let csv = "premise,hypothesis,label,language\nA man sleeps.,Someone rests.,0,English\n";
//! let dataset = NliDataset::from_reader(csv.as_bytes(), true).unwrap();
//!
//! assert_eq!(dataset.len(), 1);
//! ```
//!
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::*;

pub mod consts {
    pub const PREMISE_COL: &str = "premise";
    pub const HYPOTHESIS_COL: &str = "hypothesis";
    pub const LABEL_COL: &str = "label";
    pub const LANGUAGE_COL: &str = "language";

    pub const NUM_LABELS: usize = 3;
}
