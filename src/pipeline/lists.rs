//! List rewriter: nested `-`/`*`/`+` and `1.` lists → `itemize`/`enumerate`.
//!
//! Lists are never built into a tree. Instead the document is rewritten one
//! indentation depth at a time, starting at depth 0:
//!
//! 1. Find every *run* of list lines whose first line sits exactly at the
//!    current depth. The run continues over every list line, of either
//!    marker kind, indented at least that deep.
//! 2. Wrap the run in `\begin{itemize}` / `\begin{enumerate}` and turn the
//!    lines of the run's own kind at the current depth into `\item`
//!    commands. Other lines are left untouched for later scans.
//! 3. Repeat one level deeper until a pass finds nothing.
//!
//! Unordered runs are rewritten before ordered ones at every depth, so a
//! `1.` line sitting between `-` lines ends up as an `enumerate` nested in
//! the surrounding `itemize`.
//!
//! Indentation is measured in tab stops: a tab advances to the next multiple
//! of four columns and a space advances one column. Emitted lines use four
//! spaces per level, and `\item` lines sit one level inside their
//! environment, so converted output never looks like a list line again and
//! running the rewriter twice is a no-op. Lines of a run keep the line
//! ending (`\n` or `\r\n`) of the run's first line.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const TAB_STOP: usize = 4;

static RE_UNORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[*+-][ \t]+(.*)$").unwrap());

static RE_ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.[ \t]+(.*)$").unwrap());

/// Marker kind of a list line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `*`, `-` or `+`.
    Unordered,
    /// Digits followed by `.`.
    Ordered,
}

impl ListKind {
    fn environment(self) -> &'static str {
        match self {
            ListKind::Unordered => "itemize",
            ListKind::Ordered => "enumerate",
        }
    }
}

/// A single source line recognised as a list item.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListLine<'a> {
    depth: usize,
    kind: ListKind,
    text: &'a str,
}

impl<'a> ListLine<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let body = line.trim_start_matches([' ', '\t']);
        let indent = &line[..line.len() - body.len()];

        let (kind, caps) = if let Some(caps) = RE_UNORDERED_ITEM.captures(body) {
            (ListKind::Unordered, caps)
        } else if let Some(caps) = RE_ORDERED_ITEM.captures(body) {
            (ListKind::Ordered, caps)
        } else {
            return None;
        };

        Some(Self {
            depth: indent_depth(indent),
            kind,
            text: caps.get(1).map_or("", |m| m.as_str()).trim_end(),
        })
    }

    /// Whether this line may follow the first line of a run at `depth`.
    fn continues(&self, depth: usize) -> bool {
        self.depth >= depth
    }
}

/// Depth in whole tab stops of a leading whitespace string.
fn indent_depth(indent: &str) -> usize {
    let columns = indent.chars().fold(0, |col, c| match c {
        '\t' => (col / TAB_STOP + 1) * TAB_STOP,
        _ => col + 1,
    });
    columns / TAB_STOP
}

fn line_end(line: &str) -> &'static str {
    if line.ends_with('\r') {
        "\r"
    } else {
        ""
    }
}

fn pad(depth: usize) -> String {
    " ".repeat(depth * TAB_STOP)
}

/// Rewrite all nested lists, one depth per pass, until a pass finds none.
pub fn convert_lists(input: &str) -> String {
    let mut doc = input.to_string();
    let mut depth = 0;
    loop {
        let (next, unordered) = wrap_runs(&doc, depth, ListKind::Unordered);
        let (next, ordered) = wrap_runs(&next, depth, ListKind::Ordered);
        if unordered + ordered == 0 {
            return doc;
        }
        debug!(depth, unordered, ordered, "rewrote list runs");
        doc = next;
        depth += 1;
    }
}

/// Wrap every run of `kind` starting at `depth`; returns the run count.
fn wrap_runs(input: &str, depth: usize, kind: ListKind) -> (String, usize) {
    let lines: Vec<&str> = input.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut runs = 0usize;
    let mut i = 0;

    while i < lines.len() {
        let starts_run = matches!(
            ListLine::parse(lines[i]),
            Some(ref first) if first.depth == depth && first.kind == kind
        );
        if !starts_run {
            out.push(lines[i].to_string());
            i += 1;
            continue;
        }

        let mut end = i + 1;
        while end < lines.len()
            && ListLine::parse(lines[end]).is_some_and(|l| l.continues(depth))
        {
            end += 1;
        }

        let eol = line_end(lines[i]);
        out.push(format!("{}\\begin{{{}}}{eol}", pad(depth), kind.environment()));
        for line in &lines[i..end] {
            match ListLine::parse(line) {
                Some(item) if item.depth == depth && item.kind == kind => {
                    out.push(format!("{}\\item {}{eol}", pad(depth + 1), item.text));
                }
                _ => {
                    let text = line.strip_suffix('\r').unwrap_or(line);
                    out.push(format!("{text}{eol}"));
                }
            }
        }
        // The last line of the document may have had no ending at all.
        out.push(format!(
            "{}\\end{{{}}}{}",
            pad(depth),
            kind.environment(),
            line_end(lines[end - 1])
        ));

        runs += 1;
        i = end;
    }

    if runs == 0 {
        return (input.to_string(), 0);
    }
    (out.join("\n"), runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flat_unordered() {
        assert_eq!(
            convert_lists("- a\n- b\n- c"),
            "\\begin{itemize}\n    \\item a\n    \\item b\n    \\item c\n\\end{itemize}"
        );
    }

    #[test]
    fn test_flat_ordered() {
        assert_eq!(
            convert_lists("1. a\n2. b\n3. c"),
            "\\begin{enumerate}\n    \\item a\n    \\item b\n    \\item c\n\\end{enumerate}"
        );
    }

    #[test]
    fn test_all_unordered_markers() {
        let tex = convert_lists("* a\n+ b\n- c");
        assert_eq!(tex.matches("\\item").count(), 3);
        assert_eq!(tex.matches("\\begin{itemize}").count(), 1);
    }

    #[test]
    fn test_nested_unordered() {
        let input = "- a\n\t- a1\n\t- a2\n- b";
        let expected = "\\begin{itemize}\n    \\item a\n    \\begin{itemize}\n        \\item a1\n        \\item a2\n    \\end{itemize}\n    \\item b\n\\end{itemize}";
        assert_eq!(convert_lists(input), expected);
    }

    #[test]
    fn test_nested_with_spaces() {
        let tabs = convert_lists("- a\n\t- b");
        let spaces = convert_lists("- a\n    - b");
        assert_eq!(tabs, spaces);
    }

    #[test]
    fn test_depth_zero_pass_leaves_nested_lines() {
        let (tex, runs) = wrap_runs("- a\n\t- a1\n- b", 0, ListKind::Unordered);
        assert_eq!(runs, 1);
        assert_eq!(
            tex,
            "\\begin{itemize}\n    \\item a\n\t- a1\n    \\item b\n\\end{itemize}"
        );
    }

    #[test]
    fn test_ordered_inside_unordered() {
        let input = "- a\n\t1. one\n\t2. two\n- b";
        let expected = "\\begin{itemize}\n    \\item a\n    \\begin{enumerate}\n        \\item one\n        \\item two\n    \\end{enumerate}\n    \\item b\n\\end{itemize}";
        assert_eq!(convert_lists(input), expected);
    }

    #[test]
    fn test_three_levels() {
        let tex = convert_lists("- a\n\t- b\n\t\t- c");
        assert!(tex.contains("\n        \\begin{itemize}\n            \\item c\n        \\end{itemize}"));
        assert_eq!(tex.matches("\\begin{itemize}").count(), 3);
    }

    #[test]
    fn test_mixed_kinds_at_same_depth_share_a_run() {
        let tex = convert_lists("- a\n1. b\n- c");
        assert_eq!(
            tex,
            "\\begin{itemize}\n    \\item a\n\\begin{enumerate}\n    \\item b\n\\end{enumerate}\n    \\item c\n\\end{itemize}"
        );
        assert_eq!(convert_lists(&tex), tex);
    }

    #[test]
    fn test_ordered_first_then_unordered() {
        assert_eq!(
            convert_lists("1. a\n- b"),
            "\\begin{enumerate}\n    \\item a\n\\end{enumerate}\n\\begin{itemize}\n    \\item b\n\\end{itemize}"
        );
    }

    #[test]
    fn test_crlf_line_endings_kept() {
        assert_eq!(
            convert_lists("- a\r\n\t- b\r\n- c\r\ntext\r\n"),
            "\\begin{itemize}\r\n    \\item a\r\n    \\begin{itemize}\r\n        \\item b\r\n    \\end{itemize}\r\n    \\item c\r\n\\end{itemize}\r\ntext\r\n"
        );
    }

    #[test]
    fn test_crlf_without_final_newline() {
        assert_eq!(
            convert_lists("- a\r\n- b"),
            "\\begin{itemize}\r\n    \\item a\r\n    \\item b\r\n\\end{itemize}"
        );
    }

    #[test]
    fn test_blank_line_ends_run() {
        let tex = convert_lists("- a\n\n- b");
        assert_eq!(tex.matches("\\begin{itemize}").count(), 2);
    }

    #[test]
    fn test_surrounding_text_kept() {
        let tex = convert_lists("intro\n- a\noutro");
        assert_eq!(
            tex,
            "intro\n\\begin{itemize}\n    \\item a\n\\end{itemize}\noutro"
        );
    }

    #[test]
    fn test_idempotent() {
        let once = convert_lists("- a\n\t- b\n\t\t1. c\n- d\n\n1. x\n2. y");
        assert_eq!(convert_lists(&once), once);
    }

    #[test]
    fn test_not_list_lines() {
        let input = "**bold** start\n-5 degrees\n1.5 litres\n---";
        assert_eq!(convert_lists(input), input);
    }

    #[test]
    fn test_indent_depth() {
        assert_eq!(indent_depth(""), 0);
        assert_eq!(indent_depth("  "), 0);
        assert_eq!(indent_depth("    "), 1);
        assert_eq!(indent_depth("\t"), 1);
        assert_eq!(indent_depth("  \t"), 1);
        assert_eq!(indent_depth("\t\t"), 2);
        assert_eq!(indent_depth("\t    "), 2);
    }
}
