//! YAML sidecar metadata for modules.
//!
//! A module's sidecar (`module.yaml` next to `index.md`, or `<name>.yaml`
//! next to a leaf `<name>.md`) declares the fields introspection cannot
//! recover from the markdown alone: the member list, inheritance target,
//! and external requirements.

use std::path::Path;

use serde::Deserialize;

use crate::error::ModelError;
use crate::module::{Member, MemberKind};

/// Parsed sidecar metadata.
///
/// All fields are optional; an empty file parses to the default instance.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleMetadata {
    /// Page title override.
    #[serde(default)]
    pub title: Option<String>,

    /// Qualified name of the module whose members donate docstrings.
    #[serde(default)]
    pub inherits: Option<String>,

    /// External module names this module depends on.
    #[serde(default)]
    pub requires: Vec<String>,

    /// Declared members, in declaration order.
    #[serde(default)]
    pub members: Vec<MemberSpec>,
}

/// One member entry from a sidecar file.
#[derive(Debug, Deserialize)]
pub struct MemberSpec {
    /// Member identifier.
    pub name: String,
    /// Member kind (`function`, `class`, `constant`, `attribute`).
    #[serde(default)]
    pub kind: Option<String>,
    /// Markdown docstring.
    #[serde(default)]
    pub doc: Option<String>,
}

impl MemberSpec {
    /// Convert to a model [`Member`]. Unknown kinds fall back to `function`.
    #[must_use]
    pub fn into_member(self) -> Member {
        let kind = match self.kind.as_deref() {
            Some("class") => MemberKind::Class,
            Some("constant") => MemberKind::Constant,
            Some("attribute") => MemberKind::Attribute,
            _ => MemberKind::Function,
        };
        Member {
            name: self.name,
            kind,
            doc: self.doc,
        }
    }
}

/// Parse sidecar metadata from YAML content.
///
/// Empty or whitespace-only content yields the default instance.
///
/// # Errors
///
/// Returns [`ModelError::Metadata`] if the YAML is malformed.
pub(crate) fn parse_metadata(content: &str, path: &Path) -> Result<ModuleMetadata, ModelError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(ModuleMetadata::default());
    }
    serde_yaml::from_str(trimmed).map_err(|e| ModelError::Metadata {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
