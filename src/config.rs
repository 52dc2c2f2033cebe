//! Configuration types for Markdown-to-LaTeX conversion.
//!
//! A conversion is driven by a [`ConversionConfig`]: which document
//! template to use, the named values substituted into it (title, author,
//! …) and which external program turns the `.tex` file into a PDF.
//!
//! Configs are usually loaded from a YAML mapping such as:
//!
//! ```yaml
//! document_type: article
//! title: Field notes
//! author: A. Writer
//! pdf_compiler: xelatex   # optional, defaults to pdflatex
//! ```
//!
//! `document_type` is required. An unknown value is a configuration error
//! reported before any Markdown is read. Every other scalar key becomes a
//! template option.

use crate::error::Md2TexError;
use crate::template::RESERVED_NAMES;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Compiler used by [`crate::compile::generate_pdf`] unless configured.
pub const DEFAULT_PDF_COMPILER: &str = "pdflatex";

const KEY_DOCUMENT_TYPE: &str = "document_type";
const KEY_PDF_COMPILER: &str = "pdf_compiler";

/// Configuration for a Markdown-to-LaTeX conversion.
///
/// Built via [`ConversionConfig::builder()`], loaded with
/// [`ConversionConfig::load`], or parsed with
/// [`ConversionConfig::from_yaml_str`].
///
/// # Example
/// ```rust
/// use md2tex::{ConversionConfig, DocumentType};
///
/// let config = ConversionConfig::builder()
///     .document_type(DocumentType::Report)
///     .option("title", "Quarterly report")
///     .build()
///     .unwrap();
/// assert_eq!(config.options["title"], "Quarterly report");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Template the LaTeX body is embedded in. Default: [`DocumentType::Article`].
    pub document_type: DocumentType,

    /// Named values substituted into the template (`{{ title }}` etc.).
    pub options: BTreeMap<String, String>,

    /// Program invoked to build a PDF from the `.tex` output. Default: `pdflatex`.
    pub pdf_compiler: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            document_type: DocumentType::default(),
            options: BTreeMap::new(),
            pdf_compiler: DEFAULT_PDF_COMPILER.to_string(),
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Read and parse a YAML configuration file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, Md2TexError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Md2TexError::from_read(path, e))?;
        debug!("Loaded config file: {}", path.display());
        Self::parse_yaml(&text, path)
    }

    /// Parse a YAML configuration held in memory.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, Md2TexError> {
        Self::parse_yaml(yaml, Path::new("<string>"))
    }

    fn parse_yaml(text: &str, path: &Path) -> Result<Self, Md2TexError> {
        let value: Value = serde_yaml::from_str(text).map_err(|source| Md2TexError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        let mapping = match value {
            Value::Mapping(m) => m,
            // An empty file has no document_type either.
            Value::Null => serde_yaml::Mapping::new(),
            other => {
                return Err(Md2TexError::InvalidConfig(format!(
                    "'{}' must contain a mapping of option names to values, found {}",
                    path.display(),
                    value_kind(&other)
                )))
            }
        };

        let mut document_type = None;
        let mut builder = Self::builder();
        for (key, value) in mapping {
            let key = match key {
                Value::String(k) => k,
                other => {
                    return Err(Md2TexError::InvalidConfig(format!(
                        "option names must be strings, found {}",
                        value_kind(&other)
                    )))
                }
            };
            let value = scalar_to_string(&key, value)?;
            match key.as_str() {
                KEY_DOCUMENT_TYPE => document_type = Some(value),
                KEY_PDF_COMPILER => builder = builder.pdf_compiler(value),
                _ => builder = builder.option(key, value),
            }
        }

        let document_type: DocumentType = document_type.unwrap_or_default().parse()?;
        builder.document_type(document_type).build()
    }
}

fn scalar_to_string(key: &str, value: Value) -> Result<String, Md2TexError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(Md2TexError::InvalidConfig(format!(
            "option '{key}' must be a scalar value, found {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn document_type(mut self, document_type: DocumentType) -> Self {
        self.config.document_type = document_type;
        self
    }

    /// Set a named template option, replacing any previous value.
    pub fn option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.options.insert(name.into(), value.into());
        self
    }

    pub fn pdf_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.config.pdf_compiler = compiler.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Md2TexError> {
        let c = &self.config;
        if c.pdf_compiler.trim().is_empty() {
            return Err(Md2TexError::InvalidConfig(
                "pdf_compiler must not be empty".into(),
            ));
        }
        if let Some(name) = RESERVED_NAMES.iter().find(|n| c.options.contains_key(**n)) {
            return Err(Md2TexError::InvalidConfig(format!(
                "option '{name}' is filled in by the converter and cannot be set"
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Document template selector: one LaTeX document class each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// `\documentclass{article}` (default).
    #[default]
    Article,
    /// `\documentclass{report}`.
    Report,
    /// `\documentclass{book}`.
    Book,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [DocumentType::Article, DocumentType::Report, DocumentType::Book];

    pub fn name(self) -> &'static str {
        match self {
            DocumentType::Article => "article",
            DocumentType::Report => "report",
            DocumentType::Book => "book",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DocumentType {
    type Err = Md2TexError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| Md2TexError::UnknownDocumentType {
                value: s.to_string(),
                expected: Self::ALL.map(DocumentType::name).join(", "),
            })
    }
}
