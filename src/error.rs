//! Error types for the md2tex library.
//!
//! The rewrite stages in [`crate::pipeline`] are total functions: any text
//! goes in, LaTeX comes out, and syntax they do not recognise is passed
//! through untouched. Every error in this module therefore belongs to the
//! collaborators around the core: reading the Markdown and configuration
//! files, selecting and rendering a template, writing the `.tex` output and
//! launching the PDF compiler.
//!
//! All of these are fatal: the conversion stops and the error is surfaced
//! to the caller as-is. Nothing is retried, and no partially written output
//! file is left behind (see [`crate::convert::convert_to_file`]).

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the md2tex library.
#[derive(Debug, Error)]
pub enum Md2TexError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but could not be read (not UTF-8, is a directory, …).
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// The configuration file is not valid YAML or not a mapping.
    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `document_type` names a template that does not exist.
    #[error("Invalid document type '{value}'. Expected one of: {expected}")]
    UnknownDocumentType { value: String, expected: String },

    /// Builder validation failed or an option has an unusable value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Template errors ───────────────────────────────────────────────────
    /// A document skeleton failed to evaluate.
    #[error("Failed to render template '{template}': {source}")]
    TemplateRender {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output `.tex` file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── PDF compiler errors ───────────────────────────────────────────────
    /// The external compiler could not be started at all.
    #[error("Failed to start PDF compiler '{compiler}': {source}\nIs it installed and on PATH?")]
    CompilerSpawnFailed {
        compiler: String,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Md2TexError {
    /// Map an I/O error raised while reading `path` onto the matching variant.
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Md2TexError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => Md2TexError::PermissionDenied { path },
            _ => Md2TexError::ReadFailed { path, source },
        }
    }
}
