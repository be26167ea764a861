//! Docstring inheritance between modules.
//!
//! A module may declare `inherits: other.module` in its sidecar. Members
//! without their own docstring then pick up the docstring of the same-named
//! member in the donor module. Whether that linking happens at all is
//! controlled by [`DocstringMode`].

use std::collections::HashMap;

use crate::error::ModelError;
use crate::module::Module;

/// How member docstrings are resolved across `inherits` declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocstringMode {
    /// Only docstrings written on the member itself are used.
    #[default]
    Declared,
    /// Missing docstrings are filled in from the inherited module.
    Inherited,
}

/// Link inherited docstrings across the module tree.
///
/// In [`DocstringMode::Declared`] this is a no-op and `inherits` targets are
/// not checked. In [`DocstringMode::Inherited`] every `inherits` target must
/// name a module in the tree, and members lacking a docstring receive the
/// donor's docstring for the same member name.
///
/// # Errors
///
/// Returns [`ModelError::DanglingInherit`] when an `inherits` target does
/// not exist in the tree.
pub fn link_inheritance(root: &mut Module, mode: DocstringMode) -> Result<(), ModelError> {
    if mode == DocstringMode::Declared {
        return Ok(());
    }

    // Donor docs are collected up front so linking is order-independent.
    let mut donors: HashMap<String, HashMap<String, String>> = HashMap::new();
    collect_donor_docs(root, &mut donors);

    link_module(root, &donors)
}

/// Record every module's documented members, keyed by qualified name and by
/// short name.
fn collect_donor_docs(module: &Module, donors: &mut HashMap<String, HashMap<String, String>>) {
    let docs: HashMap<String, String> = module
        .members
        .iter()
        .filter_map(|m| m.doc.clone().map(|doc| (m.name.clone(), doc)))
        .collect();
    donors.entry(module.qualified.clone()).or_default().extend(docs.clone());
    donors.entry(module.name.clone()).or_default().extend(docs);

    for sub in &module.submodules {
        collect_donor_docs(sub, donors);
    }
}

fn link_module(
    module: &mut Module,
    donors: &HashMap<String, HashMap<String, String>>,
) -> Result<(), ModelError> {
    if let Some(target) = &module.inherits {
        let Some(docs) = donors.get(target) else {
            return Err(ModelError::DanglingInherit {
                module: module.qualified.clone(),
                target: target.clone(),
            });
        };
        let mut filled = 0_usize;
        for member in &mut module.members {
            if member.doc.is_none()
                && let Some(doc) = docs.get(&member.name)
            {
                member.doc = Some(doc.clone());
                filled += 1;
            }
        }
        if filled > 0 {
            tracing::debug!(module = %module.qualified, target = %target, filled, "linked inherited docstrings");
        }
    }

    for sub in &mut module.submodules {
        link_module(sub, donors)?;
    }
    Ok(())
}
