pub mod dataset;
pub mod example;
pub mod label;

// re-export for cleaner imports
pub use self::dataset::{LanguageCount, NliDataset};
pub use self::example::Example;
pub use self::label::Label;
