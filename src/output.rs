//! Result types returned by the conversion entry points.

use crate::config::DocumentType;
use crate::pipeline::LatexFragment;
use serde::{Deserialize, Serialize};

/// A finished conversion: the complete `.tex` document plus the bare body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Complete LaTeX document (template with the body filled in).
    pub latex: String,
    /// The converted body and its package flags, before templating.
    pub fragment: LatexFragment,
    pub stats: ConversionStats,
}

/// Summary of a single conversion, suitable for `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    pub document_type: DocumentType,
    /// Size of the Markdown source in bytes.
    pub input_bytes: usize,
    /// Size of the rendered LaTeX document in bytes.
    pub output_bytes: usize,
    pub has_images: bool,
    pub has_links: bool,
    pub duration_ms: u64,
}
