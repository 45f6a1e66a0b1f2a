//! Run configuration: which network to build and where the trees go.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::universe::{Dimension, DimensionError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Dimension(#[from] DimensionError),
    #[error("Expected an integer size, got {0:?}")]
    NotANumber(String),
    #[error("Cannot create output directory {}", path.display())]
    OutDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parses the size `n` as typed by the user.
pub fn parse_dimension(input: &str) -> Result<Dimension, ConfigError> {
    let trimmed = input.trim();
    let n: i64 = trimmed
        .parse()
        .map_err(|_| ConfigError::NotANumber(trimmed.to_string()))?;
    Ok(Dimension::new(n)?)
}

/// Everything a run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub dimension: Dimension,
    /// Directory receiving `tree{t}.txt`, created if missing.
    pub out_dir: PathBuf,
    /// One rayon task per tree instead of a sequential loop.
    pub parallel: bool,
}

impl RunConfig {
    pub fn new(dimension: Dimension) -> Self {
        RunConfig {
            dimension,
            out_dir: PathBuf::from("."),
            parallel: false,
        }
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Creates the output directory if needed.
    pub fn prepare_out_dir(&self) -> Result<&Path, ConfigError> {
        std::fs::create_dir_all(&self.out_dir).map_err(|source| ConfigError::OutDir {
            path: self.out_dir.clone(),
            source,
        })?;
        Ok(&self.out_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_range() {
        assert_eq!(parse_dimension("3").unwrap().get(), 3);
        assert_eq!(parse_dimension(" 8\n").unwrap().get(), 8);
    }

    #[test]
    fn parse_rejects() {
        assert!(matches!(
            parse_dimension("9"),
            Err(ConfigError::Dimension(DimensionError::OutOfRange(9)))
        ));
        assert!(matches!(
            parse_dimension("-2"),
            Err(ConfigError::Dimension(DimensionError::OutOfRange(-2)))
        ));
        assert!(matches!(
            parse_dimension("three"),
            Err(ConfigError::NotANumber(s)) if s == "three"
        ));
        let msg = parse_dimension("1").unwrap_err().to_string();
        assert!(msg.starts_with("Please enter a value between 2 and 8."), "{msg}");
    }

    #[test]
    fn builder_defaults() {
        let d = Dimension::new(4).unwrap();
        let config = RunConfig::new(d);
        assert_eq!(config.out_dir, PathBuf::from("."));
        assert!(!config.parallel);

        let config = config.with_out_dir("trees").with_parallel(true);
        assert_eq!(config.out_dir, PathBuf::from("trees"));
        assert!(config.parallel);
    }

    #[test]
    fn prepare_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let config = RunConfig::new(Dimension::new(2).unwrap()).with_out_dir(&nested);
        assert_eq!(config.prepare_out_dir().unwrap(), nested.as_path());
        assert!(nested.is_dir());
    }

    #[test]
    fn prepare_fails_on_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = RunConfig::new(Dimension::new(2).unwrap()).with_out_dir(file.path());
        assert!(matches!(
            config.prepare_out_dir(),
            Err(ConfigError::OutDir { .. })
        ));
    }
}
