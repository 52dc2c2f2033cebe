//! Image rewriter: `![alt](path)` and `![alt](path "caption")` → `figure`.
//!
//! The captioned form is rewritten first. The plain pattern would also
//! accept `path "caption"` as a path and the caption would be lost.
//!
//! A figure is a float spanning several lines, so it cannot be emphasised.
//! Matching emphasis delimiters hugging an image (`**![a](p.png)**`) are
//! dropped with it; unmatched ones are put back untouched.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

static RE_CAPTIONED_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&wrapped(
        r#"!\[[^\]\n]*\]\((?P<path>[^)"\n]*?)\s*"(?P<caption>[^"\n]*)"\s*\)"#,
    ))
    .unwrap()
});

static RE_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&wrapped(r"!\[[^\]\n]*\]\((?P<path>[^)\n]*)\)")).unwrap());

/// Surround an image pattern with optional `open` / `close` delimiter groups.
fn wrapped(image: &str) -> String {
    format!(r"(?P<open>\*\*|__|\*|_)?{image}(?P<close>\*\*|__|\*|_)?")
}

/// An image reference. The alt text is not carried into LaTeX.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef<'a> {
    pub path: &'a str,
    pub caption: Option<&'a str>,
}

impl<'a> ImageRef<'a> {
    fn captioned(caps: &Captures<'a>) -> Self {
        Self {
            path: caps.name("path").map_or("", |m| m.as_str().trim()),
            caption: caps.name("caption").map(|m| m.as_str().trim()),
        }
    }

    fn plain(caps: &Captures<'a>) -> Self {
        Self {
            path: caps.name("path").map_or("", |m| m.as_str().trim()),
            caption: None,
        }
    }

    /// Render as a centred `figure` block.
    pub fn to_latex(&self) -> String {
        let mut out = String::from("\\begin{figure}[h]\n    \\centering\n");
        out.push_str(&format!("    \\includegraphics{{{}}}\n", self.path));
        if let Some(caption) = self.caption {
            out.push_str(&format!("    \\caption{{{}}}\n", caption));
        }
        out.push_str("\\end{figure}");
        out
    }
}

fn unwrap_emphasis(caps: &Captures<'_>, figure: String) -> String {
    let open = caps.name("open").map_or("", |m| m.as_str());
    let close = caps.name("close").map_or("", |m| m.as_str());
    if open == close {
        figure
    } else {
        format!("{open}{figure}{close}")
    }
}

/// Rewrite every image reference into a `figure` block.
///
/// Returns the rewritten document and whether at least one image was found,
/// which templates use to load `graphicx` only when needed.
pub fn convert_images(input: &str) -> (String, bool) {
    let mut captioned = 0usize;
    let doc = RE_CAPTIONED_IMAGE.replace_all(input, |caps: &Captures<'_>| {
        captioned += 1;
        unwrap_emphasis(caps, ImageRef::captioned(caps).to_latex())
    });

    let mut plain = 0usize;
    let doc = RE_IMAGE
        .replace_all(&doc, |caps: &Captures<'_>| {
            plain += 1;
            unwrap_emphasis(caps, ImageRef::plain(caps).to_latex())
        })
        .into_owned();

    let found = captioned + plain > 0;
    if found {
        debug!(captioned, plain, "rewrote images");
    }
    (doc, found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_image() {
        let (tex, found) = convert_images("![alt text](sample.jpeg)");
        assert!(found);
        assert_eq!(
            tex,
            "\\begin{figure}[h]\n    \\centering\n    \\includegraphics{sample.jpeg}\n\\end{figure}"
        );
    }

    #[test]
    fn test_captioned_image() {
        let (tex, found) = convert_images(r#"![alt text](sample.jpeg "Caption")"#);
        assert!(found);
        assert_eq!(
            tex,
            "\\begin{figure}[h]\n    \\centering\n    \\includegraphics{sample.jpeg}\n    \\caption{Caption}\n\\end{figure}"
        );
    }

    #[test]
    fn test_path_and_caption_trimmed() {
        let (tex, _) = convert_images(r#"![alt text](  img/a.png   " A caption " )"#);
        assert!(tex.contains("\\includegraphics{img/a.png}\n"));
        assert!(tex.contains("\\caption{A caption}\n"));
    }

    #[test]
    fn test_no_image() {
        let (tex, found) = convert_images("just text [not](an image)");
        assert!(!found);
        assert_eq!(tex, "just text [not](an image)");
    }

    #[test]
    fn test_mixed_forms() {
        let input = "![a](one.png)\n\n![b](two.png \"Two\")";
        let (tex, found) = convert_images(input);
        assert!(found);
        assert_eq!(tex.matches("\\begin{figure}").count(), 2);
        assert_eq!(tex.matches("\\caption{").count(), 1);
        assert!(tex.find("one.png") < tex.find("two.png"));
    }

    #[test]
    fn test_enclosing_emphasis_dropped() {
        let figure = "\\begin{figure}[h]\n    \\centering\n    \\includegraphics{p.png}\n\\end{figure}";
        for input in ["*![alt text](p.png)*", "**![alt text](p.png)**", "_![a](p.png)_"] {
            assert_eq!(convert_images(input).0, figure, "input: {input:?}");
        }
        let (tex, _) = convert_images(r#"__![a](p.png "Cap")__"#);
        assert!(tex.starts_with("\\begin{figure}") && tex.ends_with("\\end{figure}"));
    }

    #[test]
    fn test_unmatched_delimiters_kept() {
        let (tex, _) = convert_images("**![a](p.png) bold**");
        assert!(tex.starts_with("**\\begin{figure}"));
        assert!(tex.ends_with("\\end{figure} bold**"));
        let (tex, _) = convert_images("![a](p.png)*");
        assert!(tex.ends_with("\\end{figure}*"));
    }

    #[test]
    fn test_to_latex_order() {
        let img = ImageRef {
            path: "p.png",
            caption: Some("C"),
        };
        let tex = img.to_latex();
        let centering = tex.find("\\centering").unwrap();
        let include = tex.find("\\includegraphics").unwrap();
        let caption = tex.find("\\caption").unwrap();
        assert!(centering < include && include < caption);
    }
}
