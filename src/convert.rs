//! Conversion entry points: in-memory, file-to-memory and file-to-file.
//!
//! The rewrite itself ([`crate::pipeline::markdown_to_latex`]) is pure and
//! synchronous. The functions here add the collaborators around it: reading
//! the Markdown file, rendering the document template, and writing the
//! `.tex` output atomically so a failed run never leaves a truncated file
//! that looks valid.

use crate::config::ConversionConfig;
use crate::error::Md2TexError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline;
use crate::template;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert Markdown held in memory into a complete LaTeX document.
///
/// # Example
/// ```rust
/// use md2tex::{convert_str, ConversionConfig};
///
/// let output = convert_str("# Hello\n\nSome **bold** text.", &ConversionConfig::default())?;
/// assert!(output.latex.contains("\\section{Hello}"));
/// assert!(output.latex.contains("\\textbf{bold}"));
/// # Ok::<(), md2tex::Md2TexError>(())
/// ```
///
/// # Errors
/// [`Md2TexError::TemplateRender`] if the document skeleton fails to render.
pub fn convert_str(
    markdown: &str,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2TexError> {
    let start = Instant::now();
    let fragment = pipeline::markdown_to_latex(markdown);
    let latex = template::render_document(config.document_type, &fragment, &config.options)?;

    let stats = ConversionStats {
        document_type: config.document_type,
        input_bytes: markdown.len(),
        output_bytes: latex.len(),
        has_images: fragment.has_images,
        has_links: fragment.has_links,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    debug!(
        "Rendered {} template: {} → {} bytes",
        config.document_type, stats.input_bytes, stats.output_bytes
    );

    Ok(ConversionOutput {
        latex,
        fragment,
        stats,
    })
}

/// Read a Markdown file and convert it.
///
/// # Errors
/// - [`Md2TexError::FileNotFound`] / [`Md2TexError::PermissionDenied`] when
///   the file cannot be opened
/// - [`Md2TexError::ReadFailed`] for any other read failure, including
///   content that is not valid UTF-8
pub async fn convert(
    md_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2TexError> {
    let md_path = md_path.as_ref();
    info!("Starting conversion: {}", md_path.display());

    let markdown = tokio::fs::read_to_string(md_path)
        .await
        .map_err(|e| Md2TexError::from_read(md_path, e))?;

    convert_str(&markdown, config)
}

/// Convert a Markdown file and write the LaTeX document to `tex_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files. Parent
/// directories of `tex_path` are created as needed.
pub async fn convert_to_file(
    md_path: impl AsRef<Path>,
    tex_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Md2TexError> {
    let output = convert(md_path, config).await?;
    let path = tex_path.as_ref();
    write_atomic(path, &output.latex).await?;
    info!(
        "Wrote {} ({} bytes, {}ms)",
        path.display(),
        output.stats.output_bytes,
        output.stats.duration_ms
    );
    Ok(output.stats)
}

/// Load the YAML config, then convert `md_path` into `tex_path`.
///
/// The configuration is validated first: an unknown `document_type` fails
/// before the Markdown file is even opened.
pub async fn convert_with_config_file(
    md_path: impl AsRef<Path>,
    config_path: impl AsRef<Path>,
    tex_path: impl AsRef<Path>,
) -> Result<ConversionStats, Md2TexError> {
    let config = ConversionConfig::load(config_path).await?;
    convert_to_file(md_path, tex_path, &config).await
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    md_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2TexError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Md2TexError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(md_path, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

async fn write_atomic(path: &Path, contents: &str) -> Result<(), Md2TexError> {
    let write_err = |source: std::io::Error| Md2TexError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp_path = path.with_extension("tex.tmp");
    let result = match tokio::fs::write(&tmp_path, contents).await {
        Ok(()) => tokio::fs::rename(&tmp_path, path).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                warn!("Could not remove {}: {}", tmp_path.display(), cleanup);
            }
        }
        return Err(write_err(e));
    }
    Ok(())
}
