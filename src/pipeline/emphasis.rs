//! Emphasis rewriter: `**bold**` / `__bold__` and `*italic*` / `_italic_`.
//!
//! Bold must run before italic, otherwise `**a**` would be read as two
//! empty single-delimiter spans. Both scans are non-greedy and line-local:
//! a span closes at the first matching delimiter on the same line, and an
//! unmatched delimiter is left as literal text.
//!
//! Delimiters inside the path argument of `\includegraphics` and the URL
//! argument of `\href` (emitted by the image and link stages, which run
//! earlier) are masked before scanning, so file names such as
//! `fig_1_a.png` survive intact while a span may still enclose the whole
//! command, as in `**[docs](url)**`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use tracing::debug;

static RE_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^\n]+?)\*\*|__([^\n]+?)__").unwrap());

static RE_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^\n]+?)\*|_([^\n]+?)_").unwrap());

/// Arguments of earlier-stage commands that hold paths or URLs.
static RE_PROTECTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\includegraphics(?:\[[^\]\n]*\])?\{[^}\n]*\}|\\href\{[^}\n]*\}").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emphasis {
    Bold,
    Italic,
}

impl Emphasis {
    fn command(self) -> &'static str {
        match self {
            Emphasis::Bold => "textbf",
            Emphasis::Italic => "textit",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Emphasis::Bold => &*RE_BOLD,
            Emphasis::Italic => &*RE_ITALIC,
        }
    }
}

/// A delimited span found by the scanner.
#[derive(Debug)]
struct EmphasisSpan<'a> {
    style: Emphasis,
    text: &'a str,
}

impl EmphasisSpan<'_> {
    fn to_latex(&self) -> String {
        format!("\\{}{{{}}}", self.style.command(), self.text)
    }
}

/// Rewrite `**text**` and `__text__` into `\textbf{text}`.
pub fn convert_bold(input: &str) -> String {
    rewrite(input, Emphasis::Bold)
}

/// Rewrite `*text*` and `_text_` into `\textit{text}`.
///
/// Expects [`convert_bold`] to have consumed every double delimiter first.
pub fn convert_italics(input: &str) -> String {
    rewrite(input, Emphasis::Italic)
}

fn rewrite(input: &str, style: Emphasis) -> String {
    let masked = mask_protected(input);
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    let mut count = 0usize;

    // Offsets in `masked` are offsets in `input`: masking swaps single ASCII bytes.
    for caps in style.pattern().captures_iter(&masked) {
        let (Some(span), Some(inner)) = (caps.get(0), caps.get(1).or_else(|| caps.get(2))) else {
            continue;
        };
        out.push_str(&input[last..span.start()]);
        let span_text = EmphasisSpan {
            style,
            text: &input[inner.range()],
        };
        out.push_str(&span_text.to_latex());
        last = span.end();
        count += 1;
    }
    out.push_str(&input[last..]);

    if count > 0 {
        debug!(command = style.command(), count, "rewrote emphasis spans");
    }
    out
}

/// Replace `*` and `_` inside protected arguments with NUL bytes.
fn mask_protected(input: &str) -> Cow<'_, str> {
    if !RE_PROTECTED.is_match(input) {
        return Cow::Borrowed(input);
    }
    let mut masked = String::with_capacity(input.len());
    let mut last = 0;
    for m in RE_PROTECTED.find_iter(input) {
        masked.push_str(&input[last..m.start()]);
        masked.push_str(&m.as_str().replace(['*', '_'], "\0"));
        last = m.end();
    }
    masked.push_str(&input[last..]);
    Cow::Owned(masked)
}
