//! Link rewriter: `[label](url)` → `\href{url}{label}`.
//!
//! Runs after the image stage (an image is a link prefixed with `!`) and
//! before emphasis, which leaves the `\href` URL argument alone.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]\n]*)\]\(([^)\n]*)\)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef<'a> {
    pub label: &'a str,
    pub url: &'a str,
}

impl<'a> LinkRef<'a> {
    fn from_captures(caps: &Captures<'a>) -> Self {
        Self {
            label: caps.get(1).map_or("", |m| m.as_str()),
            url: caps.get(2).map_or("", |m| m.as_str().trim()),
        }
    }

    pub fn to_latex(&self) -> String {
        format!("\\href{{{}}}{{{}}}", self.url, self.label)
    }
}

/// Rewrite every inline link. The URL is not validated.
///
/// Returns the rewritten document and whether at least one link was found,
/// which templates use to load `hyperref` only when needed.
pub fn convert_links(input: &str) -> (String, bool) {
    let mut count = 0usize;
    let doc = RE_LINK
        .replace_all(input, |caps: &Captures<'_>| {
            count += 1;
            LinkRef::from_captures(caps).to_latex()
        })
        .into_owned();
    if count > 0 {
        debug!(count, "rewrote links");
    }
    (doc, count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link() {
        let (tex, found) = convert_links("[Sample link](https://www.google.com)");
        assert!(found);
        assert_eq!(tex, r"\href{https://www.google.com}{Sample link}");
    }

    #[test]
    fn test_no_link() {
        let (tex, found) = convert_links("plain [brackets] and (parens)");
        assert!(!found);
        assert_eq!(tex, "plain [brackets] and (parens)");
    }

    #[test]
    fn test_multiple_links_keep_order() {
        let (tex, _) = convert_links("see [a](http://a) then [b](http://b)");
        assert_eq!(tex, r"see \href{http://a}{a} then \href{http://b}{b}");
    }

    #[test]
    fn test_url_not_validated() {
        let (tex, found) = convert_links("[x](not a url)");
        assert!(found);
        assert_eq!(tex, r"\href{not a url}{x}");
    }
}
