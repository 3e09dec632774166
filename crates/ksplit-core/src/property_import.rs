//! Parses a `#/definitions/io.k8s.<dotted>.<Type>` ref pointer into the
//! (package path, alias, type name) triple the rest of the planner needs
//! to rewrite cross-package references.

use serde_json::{Map, Value};

use crate::error::{CoreError, Result};

const REF_PREFIX: &str = "#/definitions/io.k8s.";

/// A parsed `$ref` pointer. The all-empty value is the sentinel returned
/// for an absent or empty pointer — not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyImport {
    pub package_path: String,
    pub alias: String,
    pub type_name: String,
}

impl PropertyImport {
    /// Parse a `$ref` string. An empty pointer (no `$ref` set) yields the
    /// empty sentinel. A non-empty pointer must begin with
    /// `#/definitions/io.k8s.` and have at least two dot-separated chunks
    /// after that prefix.
    pub fn parse(ref_pointer: &str) -> Result<PropertyImport> {
        if ref_pointer.is_empty() {
            return Ok(PropertyImport::default());
        }

        let Some(namespace) = ref_pointer.strip_prefix(REF_PREFIX) else {
            return Ok(PropertyImport::default());
        };

        let chunks: Vec<&str> = namespace.split('.').collect();
        if chunks.len() < 2 {
            return Err(CoreError::RefTooFewChunks {
                pointer: ref_pointer.to_string(),
                chunks: chunks.into_iter().map(str::to_string).collect(),
            });
        }

        let (namespace_chunks, type_name) = chunks.split_at(chunks.len() - 1);
        let type_name = type_name[0].to_string();
        let package_path = namespace_chunks.join("/");
        let alias = namespace_chunks.join("_").replace('-', "");

        Ok(PropertyImport {
            package_path,
            alias,
            type_name,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.package_path.is_empty() && self.alias.is_empty() && self.type_name.is_empty()
    }

    /// Render the `x-go-type` vendor extension payload for a cross-package
    /// reference:
    /// `{ "type": <TypeName>, "import": { "package": <gitRepo>/<packagePath>, "alias": <alias> } }`.
    pub fn to_vendor_type_map(&self, git_repo: &str) -> Value {
        let mut import = Map::new();
        import.insert(
            "package".to_string(),
            Value::String(format!("{git_repo}/{}", self.package_path)),
        );
        import.insert("alias".to_string(), Value::String(self.alias.clone()));

        let mut outer = Map::new();
        outer.insert("type".to_string(), Value::String(self.type_name.clone()));
        outer.insert("import".to_string(), Value::Object(import));
        Value::Object(outer)
    }
}
