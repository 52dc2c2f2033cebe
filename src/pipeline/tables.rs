//! Table rewriter: pipe tables → bordered `tabular` environments.
//!
//! A table is a header row containing `|`, directly followed by a separator
//! row made only of `|` and `-`, followed by every contiguous row that still
//! contains a `|`. Outer pipes are optional on every row.
//!
//! The column count is the number of `-` characters in the separator, so
//! `|-|-|-|` declares three columns while `|---|---|` declares six. Rows whose
//! cell count differs from the column count are emitted as they are.

use tracing::debug;

/// A table block found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Table<'a> {
    header: &'a str,
    columns: usize,
    rows: Vec<&'a str>,
}

impl<'a> Table<'a> {
    /// Recognise a table starting at `lines[0]`.
    fn scan(lines: &[&'a str]) -> Option<Self> {
        let header = *lines.first()?;
        let separator = *lines.get(1)?;
        if !header.contains('|') || is_separator_row(header) || !is_separator_row(separator) {
            return None;
        }
        let rows = lines[2..]
            .iter()
            .take_while(|line| line.contains('|'))
            .copied()
            .collect();
        Some(Self {
            header,
            columns: separator.matches('-').count(),
            rows,
        })
    }

    /// Source lines consumed: header, separator and body rows.
    fn line_count(&self) -> usize {
        2 + self.rows.len()
    }

    fn to_latex(&self) -> String {
        let mut out = format!("\\begin{{tabular}}{{{}|}}\n", "|l".repeat(self.columns));
        out.push_str(&format!("    {}\n    \\hline\n", render_row(self.header)));
        for row in &self.rows {
            out.push_str(&format!("    {}\n", render_row(row)));
        }
        if !self.rows.is_empty() {
            out.push_str("    \\hline\n");
        }
        out.push_str("\\end{tabular}");
        out
    }
}

/// `|---|---|` style row: pipes and dashes only, at least one dash.
fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('-') && trimmed.chars().all(|c| c == '|' || c == '-')
}

/// Strip outer whitespace and pipes, then join the cells with `&`.
fn render_row(line: &str) -> String {
    let cells: Vec<&str> = line
        .trim()
        .trim_matches('|')
        .split('|')
        .map(str::trim)
        .collect();
    format!("{} \\\\", cells.join(" & "))
}

/// Rewrite every pipe table in the document.
pub fn convert_tables(input: &str) -> String {
    let lines: Vec<&str> = input.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut tables = 0usize;
    let mut i = 0;

    while i < lines.len() {
        if let Some(table) = Table::scan(&lines[i..]) {
            debug!(
                columns = table.columns,
                rows = table.rows.len(),
                "rewrote table"
            );
            out.push(table.to_latex());
            i += table.line_count();
            tables += 1;
            continue;
        }
        out.push(lines[i].to_string());
        i += 1;
    }

    if tables == 0 {
        return input.to_string();
    }
    out.join("\n")
}
