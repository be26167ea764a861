//! Module tree types.
//!
//! A [`Module`] is one node of the documentation tree: a package (directory
//! with `index.md`) or a leaf module (standalone `.md` file). Modules are
//! built once by the loader and treated as immutable during the write pass.

/// Kind of a documented member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// A free function or method.
    Function,
    /// A class or type.
    Class,
    /// A module-level constant.
    Constant,
    /// A data attribute.
    Attribute,
}

impl MemberKind {
    /// Display label used in rendered pages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Constant => "constant",
            Self::Attribute => "attribute",
        }
    }
}

/// A documented member of a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Member identifier.
    pub name: String,
    /// Member kind.
    pub kind: MemberKind,
    /// Markdown docstring, if declared.
    pub doc: Option<String>,
}

/// One node of the documentation tree.
#[derive(Debug, Clone)]
pub struct Module {
    /// Final path component (e.g. `"solvers"`).
    pub name: String,
    /// Dotted path from the root (e.g. `"regpy.solvers"`).
    pub qualified: String,
    /// Whether this module is a package (may hold submodules).
    pub is_package: bool,
    /// Page title override from sidecar metadata.
    pub title: Option<String>,
    /// Module-level markdown docstring.
    pub doc: Option<String>,
    /// Members in declaration order.
    pub members: Vec<Member>,
    /// Qualified name of the module whose members donate docstrings.
    pub inherits: Option<String>,
    /// External module names this module depends on.
    pub requires: Vec<String>,
    /// True for substituted known-absent modules.
    pub placeholder: bool,
    /// Direct children, name-sorted.
    pub submodules: Vec<Module>,
}

impl Module {
    /// Create an empty leaf module.
    #[must_use]
    pub fn new(name: impl Into<String>, qualified: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualified: qualified.into(),
            is_package: false,
            title: None,
            doc: None,
            members: Vec::new(),
            inherits: None,
            requires: Vec::new(),
            placeholder: false,
            submodules: Vec::new(),
        }
    }

    /// Create a placeholder module for a known-absent dependency.
    ///
    /// Placeholders are leaf modules with no members and a stub docstring.
    #[must_use]
    pub fn placeholder(name: impl Into<String>, qualified: impl Into<String>) -> Self {
        let mut module = Self::new(name, qualified);
        module.placeholder = true;
        module.doc = Some(
            "Placeholder for an optional dependency that is not installed. \
             No members are documented."
                .to_owned(),
        );
        module
    }

    /// Logical URL of this module's page, as path segments.
    ///
    /// A package `a.b` maps to `["a", "b", "index.html"]`; a leaf module
    /// `a.m` maps to `["a", "m.html"]`.
    #[must_use]
    pub fn url_segments(&self) -> Vec<String> {
        let mut segments: Vec<String> = self.qualified.split('.').map(str::to_owned).collect();
        if self.is_package {
            segments.push("index.html".to_owned());
        } else if let Some(last) = segments.last_mut() {
            last.push_str(".html");
        }
        segments
    }

    /// Find a module by qualified name in the subtree rooted here.
    #[must_use]
    pub fn find(&self, qualified: &str) -> Option<&Self> {
        if self.qualified == qualified {
            return Some(self);
        }
        self.submodules.iter().find_map(|sub| sub.find(qualified))
    }

    /// Total number of modules in the subtree rooted here.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.submodules.iter().map(Self::count).sum::<usize>()
    }

    /// Whether the module documents nothing at all.
    ///
    /// Used by the loader to drop directories that contain no documentation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doc.is_none()
            && self.title.is_none()
            && self.members.is_empty()
            && self.submodules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_segments_root_package() {
        let mut module = Module::new("regpy", "regpy");
        module.is_package = true;
        assert_eq!(module.url_segments(), vec!["regpy", "index.html"]);
    }

    #[test]
    fn test_url_segments_nested_package() {
        let mut module = Module::new("solvers", "regpy.solvers");
        module.is_package = true;
        assert_eq!(
            module.url_segments(),
            vec!["regpy", "solvers", "index.html"]
        );
    }

    #[test]
    fn test_url_segments_leaf() {
        let module = Module::new("landweber", "regpy.solvers.landweber");
        assert_eq!(
            module.url_segments(),
            vec!["regpy", "solvers", "landweber.html"]
        );
    }

    #[test]
    fn test_placeholder_has_stub_doc_and_no_members() {
        let module = Module::placeholder("nativeplot", "regpy.nativeplot");
        assert!(module.placeholder);
        assert!(module.doc.is_some());
        assert!(module.members.is_empty());
        assert!(!module.is_package);
    }

    #[test]
    fn test_find_nested() {
        let mut root = Module::new("a", "a");
        root.is_package = true;
        let mut mid = Module::new("b", "a.b");
        mid.is_package = true;
        mid.submodules.push(Module::new("c", "a.b.c"));
        root.submodules.push(mid);

        assert!(root.find("a.b.c").is_some());
        assert!(root.find("a.b").is_some());
        assert!(root.find("a.x").is_none());
    }

    #[test]
    fn test_count() {
        let mut root = Module::new("a", "a");
        root.is_package = true;
        root.submodules.push(Module::new("b", "a.b"));
        root.submodules.push(Module::new("c", "a.c"));
        assert_eq!(root.count(), 3);
    }

    #[test]
    fn test_is_empty() {
        let module = Module::new("a", "a");
        assert!(module.is_empty());

        let mut with_doc = Module::new("a", "a");
        with_doc.doc = Some("docs".to_owned());
        assert!(!with_doc.is_empty());
    }
}
