//! Recursive doc tree writer.

use std::fs;
use std::path::{Path, PathBuf};

use doctree_model::Module;
use doctree_render::{PageRenderer, RenderError};

use crate::error::BuildError;

/// Source of rendered page content.
///
/// The production implementation is [`PageRenderer`]; tests substitute
/// failing or recording sources.
pub trait PageSource {
    /// Render the full HTML document for one module.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the page cannot be produced.
    fn render_page(&self, module: &Module) -> Result<String, RenderError>;
}

impl PageSource for PageRenderer {
    fn render_page(&self, module: &Module) -> Result<String, RenderError> {
        self.render_module(module)
    }
}

/// Writes one HTML file per module node under an output root.
///
/// Modules are visited depth first, parents before children, siblings in
/// tree order. The first failure aborts the whole pass; the failed node's
/// file is removed first so no truncated page survives.
pub struct TreeWriter<R: PageSource> {
    renderer: R,
    output_root: PathBuf,
}

impl<R: PageSource> TreeWriter<R> {
    pub fn new(renderer: R, output_root: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            output_root: output_root.into(),
        }
    }

    /// Write the whole tree, returning the number of pages written.
    ///
    /// # Errors
    ///
    /// Returns the first [`BuildError`] encountered. On a render or write
    /// failure the offending file is deleted; if that deletion itself
    /// fails, the deletion error is reported instead.
    pub fn write(&self, root: &Module) -> Result<usize, BuildError> {
        let mut written = 0;
        self.write_node(root, &mut written)?;
        tracing::debug!(pages = written, root = %self.output_root.display(), "wrote doc tree");
        Ok(written)
    }

    fn write_node(&self, module: &Module, written: &mut usize) -> Result<(), BuildError> {
        let path = self.page_path(module);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let html = match self.renderer.render_page(module) {
            Ok(html) => html,
            Err(source) => {
                // A stale file from an earlier run may sit at this path.
                remove_partial(&path)?;
                return Err(BuildError::Render {
                    module: module.qualified.clone(),
                    source,
                });
            }
        };

        if let Err(source) = fs::write(&path, html) {
            remove_partial(&path)?;
            return Err(BuildError::Write { path, source });
        }
        tracing::debug!(module = %module.qualified, path = %path.display(), "wrote page");
        *written += 1;

        for sub in &module.submodules {
            self.write_node(sub, written)?;
        }
        Ok(())
    }

    /// Output file path for a module, derived from its qualified name.
    fn page_path(&self, module: &Module) -> PathBuf {
        let mut path = self.output_root.clone();
        for segment in module.url_segments() {
            path.push(segment);
        }
        path
    }
}

/// Remove a failed page. A missing file is fine; any other deletion error
/// supersedes the failure that triggered the cleanup.
fn remove_partial(path: &Path) -> Result<(), BuildError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed partial page");
            Ok(())
        }
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(BuildError::Cleanup {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use doctree_render::RenderOptions;
    use pretty_assertions::assert_eq;

    fn sample_tree() -> Module {
        let mut landweber = Module::new("landweber", "regpy.solvers.landweber");
        landweber.doc = Some("Landweber iteration.".to_owned());

        let mut solvers = Module::new("solvers", "regpy.solvers");
        solvers.is_package = true;
        solvers.doc = Some("Solvers.".to_owned());
        solvers.submodules = vec![landweber];

        let mut util = Module::new("util", "regpy.util");
        util.doc = Some("Utilities.".to_owned());

        let mut root = Module::new("regpy", "regpy");
        root.is_package = true;
        root.doc = Some("Root.".to_owned());
        root.submodules = vec![solvers, util];
        root
    }

    /// Renders a fixed page body, failing on configured modules.
    struct FakeSource {
        fail_on: Option<String>,
        rendered: RefCell<Vec<String>>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                fail_on: None,
                rendered: RefCell::new(Vec::new()),
            }
        }

        fn failing_on(qualified: &str) -> Self {
            Self {
                fail_on: Some(qualified.to_owned()),
                rendered: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageSource for FakeSource {
        fn render_page(&self, module: &Module) -> Result<String, RenderError> {
            if self.fail_on.as_deref() == Some(module.qualified.as_str()) {
                return Err(RenderError::Fmt(std::fmt::Error));
            }
            self.rendered.borrow_mut().push(module.qualified.clone());
            Ok(format!("<html>{}</html>", module.qualified))
        }
    }

    #[test]
    fn test_writes_one_file_per_module() {
        let temp_dir = tempfile::tempdir().unwrap();
        let writer = TreeWriter::new(FakeSource::new(), temp_dir.path());

        let written = writer.write(&sample_tree()).unwrap();
        assert_eq!(written, 4);
        assert!(temp_dir.path().join("regpy/index.html").is_file());
        assert!(temp_dir.path().join("regpy/solvers/index.html").is_file());
        assert!(
            temp_dir
                .path()
                .join("regpy/solvers/landweber.html")
                .is_file()
        );
        assert!(temp_dir.path().join("regpy/util.html").is_file());
    }

    #[test]
    fn test_writes_parents_before_children() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = FakeSource::new();
        let writer = TreeWriter::new(source, temp_dir.path());

        writer.write(&sample_tree()).unwrap();
        let order = writer.renderer.rendered.borrow();
        assert_eq!(
            *order,
            vec![
                "regpy",
                "regpy.solvers",
                "regpy.solvers.landweber",
                "regpy.util"
            ]
        );
    }

    #[test]
    fn test_creates_missing_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("site").join("api");
        let writer = TreeWriter::new(FakeSource::new(), &output);

        writer.write(&sample_tree()).unwrap();
        assert!(output.join("regpy/solvers/index.html").is_file());
    }

    #[test]
    fn test_render_failure_aborts_pass() {
        let temp_dir = tempfile::tempdir().unwrap();
        let writer = TreeWriter::new(FakeSource::failing_on("regpy.solvers"), temp_dir.path());

        let result = writer.write(&sample_tree());
        assert!(matches!(
            result,
            Err(BuildError::Render { module, .. }) if module == "regpy.solvers"
        ));
        // Nothing after the failing node is written, including its later
        // sibling and its children.
        assert!(temp_dir.path().join("regpy/index.html").is_file());
        assert!(!temp_dir.path().join("regpy/solvers/index.html").exists());
        assert!(
            !temp_dir
                .path()
                .join("regpy/solvers/landweber.html")
                .exists()
        );
        assert!(!temp_dir.path().join("regpy/util.html").exists());
    }

    #[test]
    fn test_render_failure_removes_stale_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let stale = temp_dir.path().join("regpy/solvers/index.html");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old content").unwrap();

        let writer = TreeWriter::new(FakeSource::failing_on("regpy.solvers"), temp_dir.path());
        let result = writer.write(&sample_tree());

        assert!(result.is_err());
        assert!(!stale.exists());
    }

    #[test]
    fn test_write_failure_when_path_is_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        // A directory squats on a leaf page's path, so the write fails.
        fs::create_dir_all(temp_dir.path().join("regpy/util.html")).unwrap();

        let writer = TreeWriter::new(FakeSource::new(), temp_dir.path());
        let result = writer.write(&sample_tree());
        assert!(matches!(
            result,
            Err(BuildError::Write { .. } | BuildError::Cleanup { .. })
        ));
    }

    #[test]
    fn test_rerun_overwrites_existing_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tree = sample_tree();

        let writer = TreeWriter::new(FakeSource::new(), temp_dir.path());
        assert_eq!(writer.write(&tree).unwrap(), 4);

        let writer = TreeWriter::new(FakeSource::new(), temp_dir.path());
        assert_eq!(writer.write(&tree).unwrap(), 4);

        let content = fs::read_to_string(temp_dir.path().join("regpy/util.html")).unwrap();
        assert_eq!(content, "<html>regpy.util</html>");
    }

    #[test]
    fn test_single_leaf_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut root = Module::new("single", "single");
        root.doc = Some("One page.".to_owned());

        let writer = TreeWriter::new(FakeSource::new(), temp_dir.path());
        assert_eq!(writer.write(&root).unwrap(), 1);
        assert!(temp_dir.path().join("single.html").is_file());
    }

    #[test]
    fn test_real_renderer_end_to_end() {
        let temp_dir = tempfile::tempdir().unwrap();
        let renderer = PageRenderer::new(RenderOptions::new());
        let writer = TreeWriter::new(renderer, temp_dir.path());

        writer.write(&sample_tree()).unwrap();
        let html = fs::read_to_string(temp_dir.path().join("regpy/index.html")).unwrap();
        assert!(html.contains("<title>regpy</title>"));
        assert!(html.contains(r#"<a href="solvers/index.html">regpy.solvers</a>"#));
    }
}
