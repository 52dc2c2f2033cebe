//! Rewrite stages for Markdown-to-LaTeX conversion.
//!
//! Each submodule implements exactly one pass over the whole document
//! string. No syntax tree is built; every stage finds its own construct,
//! rewrites it in place, and leaves everything else untouched.
//!
//! ## Stage order
//!
//! ```text
//! headers ──▶ lists ──▶ tables ──▶ images ──▶ links ──▶ bold ──▶ italics
//! ```
//!
//! The order is load-bearing:
//! - images before links, because `![alt](path)` contains `[alt](path)`;
//! - links and images before emphasis, so `_` and `*` inside paths and URLs
//!   are not read as emphasis delimiters;
//! - bold before italics, so `**` is not read as two single delimiters;
//! - lists before emphasis, so a leading `* ` is a list marker, not an
//!   italic delimiter.

pub mod emphasis;
pub mod headers;
pub mod images;
pub mod links;
pub mod lists;
pub mod tables;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The LaTeX body produced from one Markdown document.
///
/// `body` is a fragment, not a compilable document: it is meant to be
/// embedded in a template supplying the preamble and the `document`
/// environment (see [`crate::template`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatexFragment {
    pub body: String,
    /// At least one image was rewritten (template should load `graphicx`).
    pub has_images: bool,
    /// At least one link was rewritten (template should load `hyperref`).
    pub has_links: bool,
}

/// Run every stage in order over `markdown`.
pub fn markdown_to_latex(markdown: &str) -> LatexFragment {
    let doc = headers::convert_headers(markdown);
    let doc = lists::convert_lists(&doc);
    let doc = tables::convert_tables(&doc);
    let (doc, has_images) = images::convert_images(&doc);
    let (doc, has_links) = links::convert_links(&doc);
    let doc = emphasis::convert_bold(&doc);
    let body = emphasis::convert_italics(&doc);

    debug!(
        input_bytes = markdown.len(),
        output_bytes = body.len(),
        has_images,
        has_links,
        "markdown rewritten"
    );

    LatexFragment {
        body,
        has_images,
        has_links,
    }
}
