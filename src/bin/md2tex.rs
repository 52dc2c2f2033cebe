//! CLI binary for md2tex.
//!
//! A thin shim over the library crate: loads the YAML config, converts the
//! Markdown file into a `.tex` file and optionally runs the PDF compiler.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use md2tex::{convert_to_file, generate_pdf, ConversionConfig};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert to LaTeX
  md2tex notes.md config.yaml notes.tex

  # Convert and build a PDF with pdflatex
  md2tex notes.md config.yaml notes.tex --generate-pdf

  # Use another compiler
  md2tex notes.md config.yaml notes.tex --generate-pdf --compiler xelatex

  # Machine-readable summary
  md2tex notes.md config.yaml notes.tex --json

CONFIG FILE (YAML):
  document_type: article      # required: article, report or book
  title: Field notes          # optional template values
  author: A. Writer
  date: 2024-05-01
  toc: true                   # report: print a table of contents
  pdf_compiler: pdflatex      # optional, overridden by --compiler

SUPPORTED MARKDOWN:
  # … #####              section … subparagraph
  - item / * item / + item, 1. item   itemize / enumerate (nest with a tab or 4 spaces)
  | A | B | + |-|-| row  tabular (one dash per column)
  ![alt](path "caption") figure
  [label](url)           \href
  **bold** __bold__      \textbf
  *italic* _italic_      \textit

ENVIRONMENT VARIABLES:
  RUST_LOG                Override log filtering (e.g. md2tex=debug)
  MD2TEX_COMPILER         Default for --compiler
"#;

/// Convert Markdown files to LaTeX documents.
#[derive(Parser, Debug)]
#[command(
    name = "md2tex",
    version,
    about = "Convert Markdown files to LaTeX documents",
    long_about = "Convert a Markdown file to a complete LaTeX document. The YAML config file \
selects the document template (article, report, book) and supplies values such as title and \
author. Optionally runs a LaTeX compiler to produce a PDF.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown input file.
    md_file: PathBuf,

    /// YAML config file (must set document_type).
    config_file: PathBuf,

    /// LaTeX output file.
    tex_file: PathBuf,

    /// Run the LaTeX compiler on the output to produce a PDF.
    #[arg(long, env = "MD2TEX_GENERATE_PDF")]
    generate_pdf: bool,

    /// LaTeX compiler to run (overrides pdf_compiler in the config).
    #[arg(long, env = "MD2TEX_COMPILER")]
    compiler: Option<String>,

    /// Print conversion statistics as JSON on stdout.
    #[arg(long, env = "MD2TEX_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2TEX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2TEX_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let chatty = !cli.quiet && !cli.json;

    // ── Load config ──────────────────────────────────────────────────────
    // Done first: an unknown document type must fail before any conversion.
    let mut config = ConversionConfig::load(&cli.config_file)
        .await
        .with_context(|| format!("Failed to load config {:?}", cli.config_file))?;
    if let Some(ref compiler) = cli.compiler {
        anyhow::ensure!(!compiler.trim().is_empty(), "--compiler must not be empty");
        config.pdf_compiler = compiler.clone();
    }

    // ── Convert ──────────────────────────────────────────────────────────
    if chatty {
        eprintln!("{} {}", cyan("◆"), bold("Converting markdown to LaTeX…"));
    }
    let stats = convert_to_file(&cli.md_file, &cli.tex_file, &config)
        .await
        .context("Conversion failed")?;

    if chatty {
        eprintln!(
            "{}  {}  {}  →  {}",
            green("✔"),
            config.document_type,
            dim(&format!("{}ms", stats.duration_ms)),
            bold(&cli.tex_file.display().to_string()),
        );
    }

    // ── PDF ──────────────────────────────────────────────────────────────
    if cli.generate_pdf {
        let spinner = chatty.then(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
            );
            bar.set_prefix("Generating PDF");
            bar.set_message(config.pdf_compiler.clone());
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        });

        let result = generate_pdf(&cli.tex_file, &config.pdf_compiler).await;
        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }
        result.context("PDF generation failed")?;

        if chatty {
            eprintln!(
                "{}  {} {}",
                green("✔"),
                config.pdf_compiler,
                dim("finished (check its .log file for LaTeX errors)")
            );
        }
    }

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
        );
    }

    Ok(())
}
