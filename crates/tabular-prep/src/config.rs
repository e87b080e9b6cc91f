//! Dataset definitions for the preprocessing pipeline.
//!
//! A [`DatasetSpec`] names the raw file, the normalized file, the field
//! delimiter and the normalization strategy for one dataset. The two
//! built-in datasets are available through [`DatasetSpec::banknote`] and
//! [`DatasetSpec::kidney`]; custom definitions use the builder pattern.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Column names prepended to the banknote file, which ships without a header.
pub const BANKNOTE_HEADER: &str = "variance,skewness,curtosis,entropy,class";

/// Characters stripped from the kidney file after the id column is removed.
pub const KIDNEY_NOISE: [char; 3] = ['\t', '?', ' '];

/// How a raw file is turned into a parseable delimited file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum NormalizationStrategy {
    /// The file is already delimiter-clean but has no column names.
    PrependHeader { header: String },
    /// The file starts every line with an identifier field and contains
    /// placeholder/whitespace noise.
    StripIdAndNoise { noise: Vec<char> },
}

/// Definition of one dataset.
///
/// # Example
///
/// ```rust,ignore
/// use tabular_prep::config::{DatasetSpec, NormalizationStrategy};
///
/// let spec = DatasetSpec::builder("survey")
///     .raw_path("raw/survey.txt")
///     .cleaned_path("raw/survey_clean.csv")
///     .strategy(NormalizationStrategy::PrependHeader { header: "q1,q2".into() })
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSpec {
    /// Short name used in logs and reports.
    pub name: String,

    /// Source file as delivered.
    pub raw_path: PathBuf,

    /// Normalized file. Its presence marks the dataset as already normalized.
    pub cleaned_path: PathBuf,

    /// Field delimiter of both the raw and the normalized file.
    /// Default: ','
    pub delimiter: char,

    pub strategy: NormalizationStrategy,
}

impl DatasetSpec {
    /// Create a new builder for a dataset with the given name.
    pub fn builder(name: impl Into<String>) -> DatasetSpecBuilder {
        DatasetSpecBuilder {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The banknote authentication dataset, relative to `root`.
    pub fn banknote(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            name: "banknote".to_string(),
            raw_path: root.join("data_banknote_authentication.txt"),
            cleaned_path: root.join("data_banknote_authentication_with_def.csv"),
            delimiter: ',',
            strategy: NormalizationStrategy::PrependHeader {
                header: BANKNOTE_HEADER.to_string(),
            },
        }
    }

    /// The chronic kidney disease dataset, relative to `root`.
    pub fn kidney(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            name: "kidney".to_string(),
            raw_path: root.join("archive").join("kidney_disease.csv"),
            cleaned_path: root.join("archive").join("kidney_disease_cleaned.csv"),
            delimiter: ',',
            strategy: NormalizationStrategy::StripIdAndNoise {
                noise: KIDNEY_NOISE.to_vec(),
            },
        }
    }

    /// Both built-in datasets, banknote first.
    pub fn builtin(root: impl AsRef<Path>) -> Vec<Self> {
        vec![Self::banknote(root.as_ref()), Self::kidney(root.as_ref())]
    }

    /// Validate the definition and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyField("name"));
        }
        if self.raw_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyField("raw_path"));
        }
        if self.cleaned_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyField("cleaned_path"));
        }
        if self.raw_path == self.cleaned_path {
            return Err(ConfigValidationError::SamePaths(self.raw_path.clone()));
        }
        if !self.delimiter.is_ascii() || self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(ConfigValidationError::InvalidDelimiter(self.delimiter));
        }

        match &self.strategy {
            NormalizationStrategy::PrependHeader { header } => {
                if header.is_empty() || header.contains('\n') {
                    return Err(ConfigValidationError::InvalidHeader(header.clone()));
                }
            }
            NormalizationStrategy::StripIdAndNoise { noise } => {
                if noise.contains(&self.delimiter) || noise.contains(&'\n') {
                    return Err(ConfigValidationError::NoiseOverlapsStructure(
                        noise.iter().collect(),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Errors that can occur during dataset definition validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Raw and cleaned path are the same: {}", .0.display())]
    SamePaths(PathBuf),

    #[error("Invalid delimiter {0:?} (must be a single ASCII character other than a newline)")]
    InvalidDelimiter(char),

    #[error("Invalid header line {0:?} (must be non-empty and a single line)")]
    InvalidHeader(String),

    #[error("Noise characters {0:?} would remove delimiters or line breaks")]
    NoiseOverlapsStructure(String),
}

/// Builder for [`DatasetSpec`] with fluent API.
#[derive(Debug, Default)]
pub struct DatasetSpecBuilder {
    name: String,
    raw_path: Option<PathBuf>,
    cleaned_path: Option<PathBuf>,
    delimiter: Option<char>,
    strategy: Option<NormalizationStrategy>,
}

impl DatasetSpecBuilder {
    /// Set the raw source file.
    pub fn raw_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.raw_path = Some(path.into());
        self
    }

    /// Set the normalized output file.
    pub fn cleaned_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cleaned_path = Some(path.into());
        self
    }

    /// Set the field delimiter.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Set the normalization strategy.
    pub fn strategy(mut self, strategy: NormalizationStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Build the definition.
    ///
    /// Returns a validated `DatasetSpec` or an error if validation fails.
    /// Without an explicit strategy the default noise set of the kidney
    /// dataset is used.
    pub fn build(self) -> Result<DatasetSpec, ConfigValidationError> {
        let spec = DatasetSpec {
            name: self.name,
            raw_path: self.raw_path.unwrap_or_default(),
            cleaned_path: self.cleaned_path.unwrap_or_default(),
            delimiter: self.delimiter.unwrap_or(','),
            strategy: self
                .strategy
                .unwrap_or_else(|| NormalizationStrategy::StripIdAndNoise {
                    noise: KIDNEY_NOISE.to_vec(),
                }),
        };

        spec.validate()?;
        Ok(spec)
    }
}
