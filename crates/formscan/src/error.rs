use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{tool} is not installed or not on PATH. {hint}")]
    MissingDependency { tool: &'static str, hint: &'static str },

    #[error("Input not found at {}", .0.display())]
    MissingInput(PathBuf),

    #[error("{0}")]
    InvalidConfig(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),
}
