//! # md2tex
//!
//! Convert a documented subset of Markdown into LaTeX, wrap it in a
//! document template chosen by a small YAML config, and optionally run a
//! LaTeX compiler to get a PDF.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Headers   # … #####          → \section … \subparagraph
//!  ├─ 2. Lists     - * + / 1.  nested → itemize / enumerate
//!  ├─ 3. Tables    pipe tables        → bordered tabular
//!  ├─ 4. Images    ![alt](p "cap")    → figure
//!  ├─ 5. Links     [label](url)       → \href
//!  ├─ 6. Bold      **x** / __x__      → \textbf
//!  ├─ 7. Italics   *x* / _x_          → \textit
//!  ├─ 8. Template  article / report / book skeleton
//!  └─ 9. PDF       pdflatex (optional, fire-and-forget)
//! ```
//!
//! Stages 1–7 are pure text-in/text-out passes in [`pipeline`]. They never
//! fail: syntax they do not recognise is left as it is. LaTeX special
//! characters are not escaped.
//!
//! ## Quick Start
//!
//! ```rust
//! use md2tex::markdown_to_latex;
//!
//! let fragment = markdown_to_latex("## Results\n\n- **fast**\n- [docs](https://example.org)");
//! assert!(fragment.body.starts_with("\\subsection{Results}"));
//! assert!(fragment.has_links);
//! assert!(!fragment.has_images);
//! ```
//!
//! Whole files, with a template:
//!
//! ```rust,no_run
//! use md2tex::{convert_to_file, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::load("config.yaml").await?;
//!     let stats = convert_to_file("notes.md", "notes.tex", &config).await?;
//!     eprintln!("{} → {} bytes", stats.input_bytes, stats.output_bytes);
//!     md2tex::generate_pdf("notes.tex", &config.pdf_compiler).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2tex` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod compile;
pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod template;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use compile::generate_pdf;
pub use config::{ConversionConfig, ConversionConfigBuilder, DocumentType, DEFAULT_PDF_COMPILER};
pub use convert::{convert, convert_str, convert_sync, convert_to_file, convert_with_config_file};
pub use error::Md2TexError;
pub use output::{ConversionOutput, ConversionStats};
pub use pipeline::{markdown_to_latex, LatexFragment};
