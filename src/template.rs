//! Document templates: wrap a LaTeX body in a complete, compilable file.
//!
//! Each [`DocumentType`] has one Jinja skeleton, embedded in the binary
//! from `templates/*.tex` and rendered with `minijinja`. Undefined names
//! render as an empty string and are falsy in `{% if %}` tests.
//!
//! The converter fills in [`RESERVED_NAMES`] itself: `body` is the
//! converted fragment, `document_type` is the template's name, and
//! `has_images` / `has_links` are booleans so skeletons load `graphicx`
//! and `hyperref` only when needed. Every other name comes from
//! [`crate::ConversionConfig::options`]; the option values `true` and
//! `false` (any case) become booleans, everything else stays a string.
//!
//! LaTeX groups and Jinja delimiters collide (`\title{{{ title }}}` opens
//! an expression at the first `{{`), so skeletons write
//! `\title{ {{- title -}} }` and let whitespace control close the gap.

use crate::config::DocumentType;
use crate::error::Md2TexError;
use crate::pipeline::LatexFragment;
use minijinja::{Environment, Value};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use tracing::debug;

/// Names set by the converter; configs may not define them.
pub const RESERVED_NAMES: [&str; 4] = ["body", "document_type", "has_images", "has_links"];

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    for t in DocumentType::ALL {
        env.add_template(template_name(t), template_source(t)).unwrap();
    }
    env
});

/// The skeleton for `document_type`.
pub fn template_source(document_type: DocumentType) -> &'static str {
    match document_type {
        DocumentType::Article => include_str!("../templates/article.tex"),
        DocumentType::Report => include_str!("../templates/report.tex"),
        DocumentType::Book => include_str!("../templates/book.tex"),
    }
}

fn template_name(document_type: DocumentType) -> &'static str {
    match document_type {
        DocumentType::Article => "article.tex",
        DocumentType::Report => "report.tex",
        DocumentType::Book => "book.tex",
    }
}

/// Embed `fragment` in the skeleton for `document_type`.
///
/// # Errors
/// [`Md2TexError::TemplateRender`] if the skeleton fails to evaluate.
pub fn render_document(
    document_type: DocumentType,
    fragment: &LatexFragment,
    options: &BTreeMap<String, String>,
) -> Result<String, Md2TexError> {
    let name = template_name(document_type);
    let context = document_context(document_type, fragment, options);
    debug!(template = name, values = context.len(), "rendering document template");

    TEMPLATES
        .get_template(name)
        .and_then(|t| t.render(&context))
        .map_err(|source| Md2TexError::TemplateRender {
            template: name.to_string(),
            source,
        })
}

fn document_context<'a>(
    document_type: DocumentType,
    fragment: &'a LatexFragment,
    options: &'a BTreeMap<String, String>,
) -> BTreeMap<&'a str, Value> {
    let mut context: BTreeMap<&str, Value> = options
        .iter()
        .map(|(k, v)| (k.as_str(), option_value(v)))
        .collect();
    context.insert("document_type", Value::from(document_type.name()));
    context.insert("body", Value::from(fragment.body.as_str()));
    context.insert("has_images", Value::from(fragment.has_images));
    context.insert("has_links", Value::from(fragment.has_links));
    context
}

/// YAML booleans reach the options as `"true"` / `"false"`.
fn option_value(value: &str) -> Value {
    if value.eq_ignore_ascii_case("true") {
        Value::from(true)
    } else if value.eq_ignore_ascii_case("false") {
        Value::from(false)
    } else {
        Value::from(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fragment(body: &str, has_images: bool, has_links: bool) -> LatexFragment {
        LatexFragment {
            body: body.into(),
            has_images,
            has_links,
        }
    }

    fn options(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_latex_group_around_value() {
        let out = TEMPLATES
            .render_str(r"\title{ {{- title -}} } {{ missing }}|", options(&[("title", "T")]))
            .unwrap();
        assert_eq!(out, r"\title{T} |");
    }

    #[test]
    fn test_option_truthiness() {
        let template = "{% if a %}A{% endif %}{% if b %}B{% endif %}{% if c %}C{% endif %}{% if d %}D{% endif %}";
        let context: BTreeMap<&str, Value> = [("a", "yes"), ("b", "False"), ("c", ""), ("d", "TRUE")]
            .into_iter()
            .map(|(k, v)| (k, option_value(v)))
            .collect();
        assert_eq!(TEMPLATES.render_str(template, context).unwrap(), "AD");
    }

    #[test]
    fn test_nested_blocks() {
        let template = "{% if title %}T{% if author %}+A{% endif %}{% endif %}";
        let out = TEMPLATES
            .render_str(template, options(&[("title", "x"), ("author", "y")]))
            .unwrap();
        assert_eq!(out, "T+A");
    }

    #[test]
    fn test_body_inserted_verbatim() {
        let doc = render_document(
            DocumentType::Article,
            &fragment("{{ title }} & <b>", false, false),
            &options(&[("title", "T")]),
        )
        .unwrap();
        assert!(doc.contains("\n{{ title }} & <b>\n"));
    }

    #[test]
    fn test_document_type_in_context() {
        let frag = fragment("", false, false);
        let opts = BTreeMap::new();
        let context = document_context(DocumentType::Report, &frag, &opts);
        assert_eq!(
            TEMPLATES.render_str("{{ document_type }}", context).unwrap(),
            "report"
        );
    }

    #[test]
    fn test_article_packages_follow_flags() {
        let doc =
            render_document(DocumentType::Article, &fragment("hello", true, false), &BTreeMap::new())
                .unwrap();
        assert!(doc.starts_with("\\documentclass{article}\n"));
        assert!(doc.contains("\\usepackage{graphicx}\n"));
        assert!(!doc.contains("hyperref"));
        assert!(!doc.contains("\\maketitle"));
        assert!(doc.contains("\\begin{document}\n"));
        assert!(doc.contains("\nhello\n"));
        assert!(doc.ends_with("\\end{document}\n"));
    }

    #[test]
    fn test_title_block_only_with_title() {
        let doc = render_document(
            DocumentType::Report,
            &fragment("", false, true),
            &options(&[("title", "My Notes"), ("author", "Sam")]),
        )
        .unwrap();
        assert!(doc.contains("\\title{My Notes}\n\\author{Sam}\n\\date{}\n"));
        assert!(doc.contains("\\maketitle\n"));
        assert!(doc.contains("\\usepackage{hyperref}\n"));
    }

    #[test]
    fn test_report_toc_false_is_skipped() {
        let doc = render_document(
            DocumentType::Report,
            &fragment("", false, false),
            &options(&[("toc", "false")]),
        )
        .unwrap();
        assert!(!doc.contains("\\tableofcontents"));
    }

    #[test]
    fn test_every_template_renders_cleanly() {
        for t in DocumentType::ALL {
            let doc = render_document(t, &fragment("x", true, true), &BTreeMap::new()).unwrap();
            assert!(doc.contains(&format!("\\documentclass{{{}}}", t.name())));
            assert!(!doc.contains("{{"), "{t}: leftover placeholder");
            assert!(!doc.contains("{%"), "{t}: leftover block");
        }
    }
}
