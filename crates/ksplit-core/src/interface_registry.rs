//! Tracks which (package, type) pairs are interface-shaped so the patcher
//! can substitute `encoding/json.RawMessage` for them instead of emitting
//! an empty-interface Go type.

use std::collections::{HashMap, HashSet};

/// Registration is add-only and read-only once planning completes — the
/// planner populates it while scanning definitions, then every
/// `Definition::generate_patched_schema` call only ever reads from it.
#[derive(Debug, Clone, Default)]
pub struct InterfaceRegistry {
    by_package: HashMap<String, HashSet<String>>,
}

impl InterfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, package_path: &str, type_name: &str) {
        self.by_package
            .entry(package_path.to_string())
            .or_default()
            .insert(type_name.to_string());
    }

    /// `package_path` may be fully qualified as `<git_repo>/<path>`; the
    /// `<git_repo>/` prefix, if present, is stripped before lookup.
    pub fn is_interface(&self, git_repo: &str, package_path: &str, type_name: &str) -> bool {
        let prefix = format!("{git_repo}/");
        let package_path = package_path.strip_prefix(&prefix).unwrap_or(package_path);

        self.by_package
            .get(package_path)
            .map(|types| types.contains(type_name))
            .unwrap_or(false)
    }
}
