//! Group/Version/Kind identity file emission (C7).
//!
//! Walks a package's definitions, pulls the
//! `x-kubernetes-group-version-kind` vendor extension off each one, and
//! renders the per-kind identity file plus one shared group-info file per
//! package. Rendering is plain `format!` text, matching the absence of any
//! templating engine elsewhere in this codebase.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::error::{CoreError, Result};
use crate::naming::to_snake_case;
use crate::package::Package;

const GVK_EXTENSION_KEY: &str = "x-kubernetes-group-version-kind";

/// One resolved `{group, version, kind}` triple lifted off a definition's
/// vendor extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    /// Extract and validate the extension on one definition's schema. The
    /// extension must be a length-1 list of string-keyed, string-valued
    /// maps carrying `group`, `version`, `kind`; anything else is an
    /// ambiguous or malformed shape (S7) and yields `None` after logging a
    /// warning, never an error — the definition still participates in
    /// everything else.
    pub fn extract(extensions: &indexmap::IndexMap<String, Value>, context: &str) -> Option<Self> {
        let raw = extensions.get(GVK_EXTENSION_KEY)?;

        let Value::Array(entries) = raw else {
            warn!(definition = context, "GVK extension is not a list, skipping");
            return None;
        };

        if entries.len() != 1 {
            warn!(
                definition = context,
                count = entries.len(),
                "GVK extension does not have exactly one entry, skipping"
            );
            return None;
        }

        let Value::Object(fields) = &entries[0] else {
            warn!(definition = context, "GVK entry is not an object, skipping");
            return None;
        };

        let field = |key: &str| -> Option<String> {
            match fields.get(key) {
                Some(Value::String(s)) => Some(s.clone()),
                _ => None,
            }
        };

        match (field("group"), field("version"), field("kind")) {
            (Some(group), Some(version), Some(kind)) => Some(GroupVersionKind {
                group,
                version,
                kind,
            }),
            _ => {
                warn!(
                    definition = context,
                    "GVK entry is missing group/version/kind as strings, skipping"
                );
                None
            }
        }
    }
}

/// `(relative_path, file_contents)` pairs for one package's GVK emission:
/// one identity file per kind, plus a trailing group-info file if any GVK
/// was found.
pub fn render_package_gvk_files(package: &Package) -> Result<Vec<(String, String)>> {
    let mut files = Vec::new();
    let mut last: Option<GroupVersionKind> = None;

    for definition in &package.definitions {
        let context = format!("{}.{}", package.name, definition.type_name);
        let Some(gvk) = GroupVersionKind::extract(&definition.schema.extensions, &context) else {
            continue;
        };

        if let Some(previous) = &last {
            if previous.group != gvk.group || previous.version != gvk.version {
                return Err(CoreError::InconsistentGroupVersion {
                    group: package.name.clone(),
                    previous: (previous.group.clone(), previous.version.clone()),
                    found: (gvk.group.clone(), gvk.version.clone()),
                });
            }
        }

        let file_name = format!("{}_gvk.go", to_snake_case(&gvk.kind));
        files.push((file_name, render_object_kind_file(&gvk)));
        last = Some(gvk);
    }

    if let Some(gvk) = last {
        files.push(("group_info.go".to_string(), render_group_info_file(&gvk)));
    }

    Ok(files)
}

/// Every package's GVK files, keyed by package path, plus the embedded
/// static-content tree's relative paths and bytes ready to copy verbatim.
pub fn render_all_gvk_files(
    packages: &HashMap<String, Package>,
) -> Result<HashMap<String, Vec<(String, String)>>> {
    let mut rendered = HashMap::new();
    for (name, package) in packages {
        let files = render_package_gvk_files(package)?;
        if !files.is_empty() {
            rendered.insert(name.clone(), files);
        }
    }
    Ok(rendered)
}

fn render_object_kind_file(gvk: &GroupVersionKind) -> String {
    format!(
        r#"package {version}

// Code generated. DO NOT EDIT.

// {kind}GVK is the GroupVersionKind for {kind}.
var {kind}GVK = SchemeGroupVersion.WithKind("{kind}")
"#,
        version = gvk.version,
        kind = gvk.kind,
    )
}

fn render_group_info_file(gvk: &GroupVersionKind) -> String {
    format!(
        r#"package {version}

// Code generated. DO NOT EDIT.

import "k8s.io/apimachinery/pkg/runtime/schema"

// SchemeGroupVersion is the group and version used for objects in this package.
var SchemeGroupVersion = schema.GroupVersion{{Group: "{group}", Version: "{version}"}}

// Kind takes an unqualified kind and returns a Group-qualified GroupKind.
func Kind(kind string) schema.GroupKind {{
	return SchemeGroupVersion.WithKind(kind).GroupKind()
}}

// Resource takes an unqualified resource and returns a Group-qualified GroupResource.
func Resource(resource string) schema.GroupResource {{
	return SchemeGroupVersion.WithResource(resource).GroupResource()
}}
"#,
        group = gvk.group,
        version = gvk.version,
    )
}
