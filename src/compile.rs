//! PDF generation: hand the `.tex` file to an external LaTeX compiler.
//!
//! This is a fire-and-forget step. The compiler runs in the directory of
//! the `.tex` file, in non-interactive mode and with stdin closed, so a
//! LaTeX error cannot leave it waiting for input. Only a failure to start
//! the program is reported; a non-zero exit status is logged and otherwise
//! ignored, and nothing is retried.

use crate::error::Md2TexError;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Run `compiler` on `tex_path`.
///
/// # Errors
/// [`Md2TexError::CompilerSpawnFailed`] when the program cannot be started
/// (not installed, not executable). A compiler that starts and then fails
/// is not an error.
pub async fn generate_pdf(tex_path: impl AsRef<Path>, compiler: &str) -> Result<(), Md2TexError> {
    let tex_path = tex_path.as_ref();
    let file_name = tex_path.file_name().ok_or_else(|| {
        Md2TexError::Internal(format!("'{}' has no file name", tex_path.display()))
    })?;
    let work_dir = match tex_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    info!("Running {} on {}", compiler, tex_path.display());
    let output = Command::new(compiler)
        .arg("-interaction=nonstopmode")
        .arg(file_name)
        .current_dir(work_dir)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| Md2TexError::CompilerSpawnFailed {
            compiler: compiler.to_string(),
            source,
        })?;

    if output.status.success() {
        info!("{} finished for {}", compiler, tex_path.display());
    } else {
        warn!(
            "{} exited with {} for {}; see the .log file next to it",
            compiler,
            output.status,
            tex_path.display()
        );
        debug!(
            "{} stdout:\n{}",
            compiler,
            String::from_utf8_lossy(&output.stdout)
        );
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_compiler() {
        let dir = tempfile::tempdir().unwrap();
        let tex = dir.path().join("doc.tex");
        std::fs::write(&tex, "x").unwrap();
        assert!(generate_pdf(&tex, "true").await.is_ok());
    }

    #[tokio::test]
    async fn test_failing_compiler_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let tex = dir.path().join("doc.tex");
        std::fs::write(&tex, "x").unwrap();
        assert!(generate_pdf(&tex, "false").await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_compiler() {
        let err = generate_pdf("doc.tex", "md2tex-no-such-compiler")
            .await
            .unwrap_err();
        assert!(matches!(err, Md2TexError::CompilerSpawnFailed { .. }));
    }

    #[tokio::test]
    async fn test_path_without_file_name() {
        let err = generate_pdf("/", "true").await.unwrap_err();
        assert!(matches!(err, Md2TexError::Internal(_)));
    }
}
