//! Full-page HTML assembly for module nodes.

use std::fmt::Write;

use doctree_model::{Member, Module};

use crate::error::RenderError;
use crate::markdown::{MarkdownRenderer, escape_html};
use crate::options::RenderOptions;

const MATHJAX_SCRIPT: &str = r#"<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>"#;

/// Renders one standalone HTML page per module node.
pub struct PageRenderer {
    options: RenderOptions,
}

impl PageRenderer {
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a complete HTML document for one module.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if formatting the page fails.
    pub fn render_module(&self, module: &Module) -> Result<String, RenderError> {
        let title = module
            .title
            .clone()
            .unwrap_or_else(|| module.qualified.clone());

        let mut page = String::with_capacity(8192);
        page.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
        page.push_str("<meta charset=\"utf-8\">\n");
        page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        writeln!(page, "<title>{}</title>", escape_html(&title))?;
        if self.options.latex_math {
            page.push_str(MATHJAX_SCRIPT);
            page.push('\n');
        }
        page.push_str("</head>\n<body>\n");

        self.write_breadcrumb(&mut page, module)?;
        writeln!(page, "<h1>{}</h1>", escape_html(&title))?;

        if module.placeholder {
            page.push_str("<p class=\"placeholder-note\">This module is an optional dependency and is not installed.</p>\n");
        }

        if let Some(doc) = &module.doc {
            let body = MarkdownRenderer::new(&self.options).render(doc);
            page.push_str("<section class=\"module-doc\">\n");
            page.push_str(&body);
            page.push_str("\n</section>\n");
        }

        self.write_members(&mut page, module)?;
        Self::write_submodules(&mut page, module)?;

        page.push_str("</body>\n</html>\n");
        tracing::trace!(module = %module.qualified, bytes = page.len(), "rendered page");
        Ok(page)
    }

    /// Breadcrumb navigation from the root package down to this module.
    ///
    /// Every ancestor is a package, so its page is an `index.html` some
    /// number of directories up from this page's directory.
    fn write_breadcrumb(&self, page: &mut String, module: &Module) -> Result<(), RenderError> {
        let parts: Vec<&str> = module.qualified.split('.').collect();
        if parts.len() < 2 {
            return Ok(());
        }

        let dir_depth = module.url_segments().len() - 1;
        page.push_str("<nav class=\"breadcrumb\">");
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                page.push('.');
            }
            if i + 1 == parts.len() {
                write!(page, "<span>{}</span>", escape_html(part))?;
            } else {
                let ups = "../".repeat(dir_depth - 1 - i);
                write!(page, r#"<a href="{ups}index.html">{}</a>"#, escape_html(part))?;
            }
        }
        page.push_str("</nav>\n");
        Ok(())
    }

    fn write_members(&self, page: &mut String, module: &Module) -> Result<(), RenderError> {
        if module.members.is_empty() {
            return Ok(());
        }

        let mut members: Vec<&Member> = module.members.iter().collect();
        if !self.options.source_order {
            members.sort_by(|a, b| a.name.cmp(&b.name));
        }

        page.push_str("<h2 id=\"members\">Members</h2>\n<dl class=\"members\">\n");
        for member in members {
            writeln!(
                page,
                r#"<dt class="kind-{}"><code>{}</code> <small>{}</small></dt>"#,
                member.kind.label(),
                escape_html(&member.name),
                member.kind.label(),
            )?;
            match &member.doc {
                Some(doc) => {
                    let body = MarkdownRenderer::new(&self.options).render(doc);
                    writeln!(page, "<dd>{body}</dd>")?;
                }
                None => page.push_str("<dd></dd>\n"),
            }
        }
        page.push_str("</dl>\n");
        Ok(())
    }

    /// Index of direct submodules, linked relative to this page.
    fn write_submodules(page: &mut String, module: &Module) -> Result<(), RenderError> {
        if module.submodules.is_empty() {
            return Ok(());
        }

        page.push_str("<h2 id=\"submodules\">Submodules</h2>\n<ul class=\"submodules\">\n");
        for sub in &module.submodules {
            let href = if sub.is_package {
                format!("{}/index.html", sub.name)
            } else {
                format!("{}.html", sub.name)
            };
            writeln!(
                page,
                r#"<li><a href="{}">{}</a></li>"#,
                escape_html(&href),
                escape_html(&sub.qualified)
            )?;
        }
        page.push_str("</ul>\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctree_model::MemberKind;

    fn member(name: &str, kind: MemberKind, doc: Option<&str>) -> Member {
        Member {
            name: name.to_owned(),
            kind,
            doc: doc.map(str::to_owned),
        }
    }

    fn sample_tree() -> Module {
        let mut util = Module::new("util", "regpy.util");
        util.doc = Some("Helper *routines*.".to_owned());
        util.members = vec![
            member("zeros", MemberKind::Function, Some("Allocate zeros.")),
            member("Memo", MemberKind::Class, None),
        ];

        let mut solvers = Module::new("solvers", "regpy.solvers");
        solvers.is_package = true;

        let mut root = Module::new("regpy", "regpy");
        root.is_package = true;
        root.doc = Some("# regpy\n\nRegularization methods.".to_owned());
        root.submodules = vec![solvers, util];
        root
    }

    fn render(module: &Module) -> String {
        PageRenderer::new(RenderOptions::new())
            .render_module(module)
            .unwrap()
    }

    #[test]
    fn test_page_is_complete_document() {
        let root = sample_tree();
        let html = render(&root);
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<title>regpy</title>"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_title_override() {
        let mut root = sample_tree();
        root.title = Some("The regpy library".to_owned());
        let html = render(&root);
        assert!(html.contains("<title>The regpy library</title>"));
        assert!(html.contains("<h1>The regpy library</h1>"));
    }

    #[test]
    fn test_docstring_rendered_as_markdown() {
        let root = sample_tree();
        let html = render(root.find("regpy.util").unwrap());
        assert!(html.contains("<em>routines</em>"));
    }

    #[test]
    fn test_root_has_no_breadcrumb() {
        let root = sample_tree();
        let html = render(&root);
        assert!(!html.contains("breadcrumb"));
    }

    #[test]
    fn test_leaf_breadcrumb_links_to_parent_index() {
        let root = sample_tree();
        // Page lives at regpy/util.html, parent index at regpy/index.html.
        let html = render(root.find("regpy.util").unwrap());
        assert!(html.contains(r#"<a href="index.html">regpy</a>"#));
        assert!(html.contains("<span>util</span>"));
    }

    #[test]
    fn test_nested_breadcrumb_walks_up_directories() {
        let mut leaf = Module::new("landweber", "regpy.solvers.landweber");
        leaf.doc = Some("Landweber iteration.".to_owned());
        // Page lives at regpy/solvers/landweber.html.
        let html = render(&leaf);
        assert!(html.contains(r#"<a href="../index.html">regpy</a>"#));
        assert!(html.contains(r#"<a href="index.html">solvers</a>"#));
    }

    #[test]
    fn test_package_breadcrumb() {
        let mut pkg = Module::new("solvers", "regpy.solvers");
        pkg.is_package = true;
        // Page lives at regpy/solvers/index.html.
        let html = render(&pkg);
        assert!(html.contains(r#"<a href="../index.html">regpy</a>"#));
        assert!(html.contains("<span>solvers</span>"));
    }

    #[test]
    fn test_members_sorted_by_name() {
        let root = sample_tree();
        let html = render(root.find("regpy.util").unwrap());
        let memo = html.find("<code>Memo</code>").unwrap();
        let zeros = html.find("<code>zeros</code>").unwrap();
        assert!(memo < zeros);
        assert!(html.contains(r#"class="kind-class""#));
        assert!(html.contains("Allocate zeros."));
    }

    #[test]
    fn test_members_in_source_order() {
        let root = sample_tree();
        let html = PageRenderer::new(RenderOptions::new().with_source_order(true))
            .render_module(root.find("regpy.util").unwrap())
            .unwrap();
        let memo = html.find("<code>Memo</code>").unwrap();
        let zeros = html.find("<code>zeros</code>").unwrap();
        assert!(zeros < memo);
    }

    #[test]
    fn test_submodule_links() {
        let root = sample_tree();
        let html = render(&root);
        assert!(html.contains(r#"<a href="solvers/index.html">regpy.solvers</a>"#));
        assert!(html.contains(r#"<a href="util.html">regpy.util</a>"#));
    }

    #[test]
    fn test_mathjax_only_when_enabled() {
        let root = sample_tree();
        let html = render(&root);
        assert!(!html.contains("MathJax"));

        let html = PageRenderer::new(RenderOptions::new().with_latex_math(true))
            .render_module(&root)
            .unwrap();
        assert!(html.contains("MathJax-script"));
    }

    #[test]
    fn test_placeholder_page() {
        let module = Module::placeholder("nativeplot", "regpy.nativeplot");
        let html = render(&module);
        assert!(html.contains("placeholder-note"));
        assert!(html.contains("not installed"));
    }

    #[test]
    fn test_title_escaped() {
        let mut root = sample_tree();
        root.title = Some("a < b".to_owned());
        let html = render(&root);
        assert!(html.contains("<title>a &lt; b</title>"));
    }
}
