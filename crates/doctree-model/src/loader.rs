//! Package loading by filesystem walking.
//!
//! The loader walks a package source directory and builds the module tree:
//!
//! - `index.md` holds the docstring of the directory's package module
//! - every other `name.md` file becomes a leaf module
//! - a `name.yaml` sibling (or the configured sidecar next to `index.md`)
//!   supplies metadata for the module
//! - subdirectories are scanned recursively; directories that document
//!   nothing are dropped
//!
//! Hidden entries (leading `.`) and underscore-prefixed entries are skipped.
//! After the walk, every `requires` entry is resolved against the tree and
//! the configured set of known-absent module names.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::ModelError;
use crate::metadata::{ModuleMetadata, parse_metadata};
use crate::module::Module;

/// Options controlling package loading.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Sidecar filename for package modules (e.g. `module.yaml`).
    pub meta_filename: String,
    /// Module names known to be absent; `requires` entries naming them are
    /// satisfied by empty placeholder modules instead of failing the load.
    pub absent_modules: BTreeSet<String>,
    /// Root module name override. Defaults to the source directory name.
    pub root_name: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            meta_filename: "module.yaml".to_owned(),
            absent_modules: BTreeSet::new(),
            root_name: None,
        }
    }
}

/// Load a package source directory into a module tree.
///
/// # Errors
///
/// Returns [`ModelError::PackageNotFound`] if `source_dir` is not a
/// directory, [`ModelError::Io`] / [`ModelError::Metadata`] for unreadable
/// or malformed sources, and [`ModelError::UnresolvedRequire`] if a
/// requirement resolves to neither a module in the tree nor a declared
/// absent name.
pub fn load_package(source_dir: &Path, options: &LoadOptions) -> Result<Module, ModelError> {
    if !source_dir.is_dir() {
        return Err(ModelError::PackageNotFound(source_dir.to_path_buf()));
    }

    let root_name = options.root_name.clone().unwrap_or_else(|| {
        source_dir
            .file_name()
            .map_or_else(|| "package".to_owned(), |n| n.to_string_lossy().into_owned())
    });

    let mut root = scan_directory(source_dir, &root_name, &root_name, options)?;
    resolve_requires(&mut root, &options.absent_modules)?;

    tracing::debug!(root = %root.qualified, modules = root.count(), "loaded package");
    Ok(root)
}

/// Scan one directory into a package module.
fn scan_directory(
    dir: &Path,
    name: &str,
    qualified: &str,
    options: &LoadOptions,
) -> Result<Module, ModelError> {
    let mut module = Module::new(name, qualified);
    module.is_package = true;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') || file_name.starts_with('_') {
            tracing::trace!(entry = %file_name, "skipping hidden entry");
            continue;
        }

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            let child_qualified = format!("{qualified}.{file_name}");
            let child = scan_directory(&path, &file_name, &child_qualified, options)?;
            if !child.is_empty() {
                module.submodules.push(child);
            }
        } else if file_name == options.meta_filename {
            let content = fs::read_to_string(&path)?;
            let meta = parse_metadata(&content, &path)?;
            apply_metadata(&mut module, meta);
        } else if path.extension().is_some_and(|e| e == "md") {
            if file_name.eq_ignore_ascii_case("index.md") {
                module.doc = Some(fs::read_to_string(&path)?);
            } else {
                let child = load_leaf(&path, qualified)?;
                module.submodules.push(child);
            }
        }
    }

    module.submodules.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(module)
}

/// Load a standalone `.md` file as a leaf module, with its optional
/// `<name>.yaml` sidecar.
fn load_leaf(md_path: &Path, parent_qualified: &str) -> Result<Module, ModelError> {
    let stem = md_path
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());

    let mut module = Module::new(&stem, format!("{parent_qualified}.{stem}"));
    module.doc = Some(fs::read_to_string(md_path)?);

    let sidecar = md_path.with_extension("yaml");
    if sidecar.is_file() {
        let content = fs::read_to_string(&sidecar)?;
        let meta = parse_metadata(&content, &sidecar)?;
        apply_metadata(&mut module, meta);
    }

    Ok(module)
}

/// Fold sidecar metadata into a module.
fn apply_metadata(module: &mut Module, meta: ModuleMetadata) {
    module.title = meta.title;
    module.inherits = meta.inherits;
    module.requires = meta.requires;
    module.members = meta
        .members
        .into_iter()
        .map(super::MemberSpec::into_member)
        .collect();
}

/// Resolve every `requires` entry in the tree.
///
/// A requirement is satisfied by a module in the tree (matched by name or
/// qualified name) or by a declared-absent name, which is substituted with
/// a placeholder module under the root. Anything else is an error.
fn resolve_requires(root: &mut Module, absent: &BTreeSet<String>) -> Result<(), ModelError> {
    let mut requirements: Vec<(String, String)> = Vec::new();
    collect_requires(root, &mut requirements);

    let mut placeholders: BTreeSet<String> = BTreeSet::new();
    for (module, name) in requirements {
        if root.find(&name).is_some() || contains_name(root, &name) {
            continue;
        }
        if absent.contains(&name) {
            placeholders.insert(name);
        } else {
            return Err(ModelError::UnresolvedRequire { module, name });
        }
    }

    for name in placeholders {
        tracing::debug!(module = %name, "substituting placeholder for absent dependency");
        let qualified = format!("{}.{name}", root.qualified);
        root.submodules.push(Module::placeholder(name, qualified));
    }
    Ok(())
}

/// Collect `(module, requirement)` pairs from the whole tree.
fn collect_requires(module: &Module, out: &mut Vec<(String, String)>) {
    for name in &module.requires {
        out.push((module.qualified.clone(), name.clone()));
    }
    for sub in &module.submodules {
        collect_requires(sub, out);
    }
}

/// Whether any module in the tree has the given short name.
fn contains_name(module: &Module, name: &str) -> bool {
    module.name == name || module.submodules.iter().any(|sub| contains_name(sub, name))
}
