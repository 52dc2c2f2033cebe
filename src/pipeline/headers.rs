//! Header rewriter: ATX headings (`#` … `#####`) → LaTeX sectioning commands.
//!
//! Only the first five depths exist in LaTeX's standard sectioning family,
//! so a line starting with six or more `#` is left untouched. Levels are
//! processed from the deepest to the shallowest; each pattern also demands a
//! non-`#` character right after its hashes, so `#` can never swallow `##`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

/// Sectioning level, mapped from the number of leading `#` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLevel {
    Section,
    Subsection,
    Subsubsection,
    Paragraph,
    Subparagraph,
}

impl HeaderLevel {
    /// Deepest level first, the order the rewriter applies them in.
    pub const DEEPEST_FIRST: [HeaderLevel; 5] = [
        HeaderLevel::Subparagraph,
        HeaderLevel::Paragraph,
        HeaderLevel::Subsubsection,
        HeaderLevel::Subsection,
        HeaderLevel::Section,
    ];

    /// Number of leading `#` characters.
    pub fn hashes(self) -> usize {
        match self {
            HeaderLevel::Section => 1,
            HeaderLevel::Subsection => 2,
            HeaderLevel::Subsubsection => 3,
            HeaderLevel::Paragraph => 4,
            HeaderLevel::Subparagraph => 5,
        }
    }

    /// LaTeX command name, without the backslash.
    pub fn command(self) -> &'static str {
        match self {
            HeaderLevel::Section => "section",
            HeaderLevel::Subsection => "subsection",
            HeaderLevel::Subsubsection => "subsubsection",
            HeaderLevel::Paragraph => "paragraph",
            HeaderLevel::Subparagraph => "subparagraph",
        }
    }

    fn pattern(self) -> &'static Regex {
        &RE_HEADERS[self.hashes() - 1]
    }
}

/// One pattern per depth, indexed by `hashes - 1`.
static RE_HEADERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    (1..=5)
        .map(|n| Regex::new(&format!(r"(?m)^#{{{n}}}([^#\n].*)$")).unwrap())
        .collect()
});

/// A heading line recognised by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderMatch<'a> {
    level: HeaderLevel,
    /// Heading text with exactly one leading space removed, if present.
    title: &'a str,
    /// `"\r"` for CRLF input so the line ending survives the rewrite.
    line_end: &'a str,
}

impl<'a> HeaderMatch<'a> {
    fn from_captures(level: HeaderLevel, caps: &Captures<'a>) -> Self {
        let rest = caps.get(1).map_or("", |m| m.as_str());
        let (rest, line_end) = match rest.strip_suffix('\r') {
            Some(r) => (r, "\r"),
            None => (rest, ""),
        };
        let title = rest.strip_prefix(' ').unwrap_or(rest);
        Self {
            level,
            title,
            line_end,
        }
    }

    fn to_latex(&self) -> String {
        format!("\\{}{{{}}}{}", self.level.command(), self.title, self.line_end)
    }
}

/// Rewrite every heading line of depth 1–5 into its sectioning command.
///
/// The heading text is copied verbatim: LaTeX special characters are not
/// escaped. Identical heading lines anywhere in the document are rewritten
/// identically.
pub fn convert_headers(input: &str) -> String {
    let mut doc = input.to_string();
    for level in HeaderLevel::DEEPEST_FIRST {
        let mut count = 0usize;
        let rewritten = level
            .pattern()
            .replace_all(&doc, |caps: &Captures<'_>| {
                count += 1;
                HeaderMatch::from_captures(level, caps).to_latex()
            })
            .into_owned();
        if count > 0 {
            debug!(command = level.command(), count, "rewrote headers");
        }
        doc = rewritten;
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_depth() {
        let cases = [
            ("# Header1", r"\section{Header1}"),
            ("## Header2", r"\subsection{Header2}"),
            ("### Header3", r"\subsubsection{Header3}"),
            ("#### Header4", r"\paragraph{Header4}"),
            ("##### Header5", r"\subparagraph{Header5}"),
        ];
        for (md, tex) in cases {
            assert_eq!(convert_headers(md), tex, "input: {md:?}");
        }
    }

    #[test]
    fn test_six_hashes_untouched() {
        assert_eq!(convert_headers("###### Too deep"), "###### Too deep");
    }

    #[test]
    fn test_missing_space_kept_literal() {
        assert_eq!(convert_headers("#Title"), r"\section{Title}");
    }

    #[test]
    fn test_only_one_leading_space_stripped() {
        assert_eq!(convert_headers("##  Spaced"), r"\subsection{ Spaced}");
    }

    #[test]
    fn test_hash_inside_title() {
        assert_eq!(convert_headers("## C# notes"), r"\subsection{C# notes}");
        assert_eq!(convert_headers("# #tag"), r"\section{#tag}");
    }

    #[test]
    fn test_bare_hashes_untouched() {
        assert_eq!(convert_headers("#\ntext"), "#\ntext");
    }

    #[test]
    fn test_not_at_line_start() {
        let input = "issue # 12 is open";
        assert_eq!(convert_headers(input), input);
    }

    #[test]
    fn test_mixed_document() {
        let input = "# Intro\ntext\n## Details\nmore\n### Deep";
        assert_eq!(
            convert_headers(input),
            "\\section{Intro}\ntext\n\\subsection{Details}\nmore\n\\subsubsection{Deep}"
        );
    }

    #[test]
    fn test_duplicate_lines_rewritten_identically() {
        let input = "# Same\nbody\n# Same";
        assert_eq!(convert_headers(input), "\\section{Same}\nbody\n\\section{Same}");
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(
            convert_headers("# A\r\n## B\r\n"),
            "\\section{A}\r\n\\subsection{B}\r\n"
        );
    }
}
