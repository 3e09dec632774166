//! Groups definitions that share a package path and renders the
//! self-contained swagger envelope for that package.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::definition::Definition;
use crate::error::{CoreError, Result};
use crate::interface_registry::InterfaceRegistry;
use crate::schema::{Info, SwaggerDocument};

#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub definitions: Vec<Definition>,
    dependencies: BTreeSet<String>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definitions: Vec::new(),
            dependencies: BTreeSet::new(),
        }
    }

    pub fn add(&mut self, definition: Definition) {
        self.dependencies.extend(definition.dependencies().clone());
        self.definitions.push(definition);
    }

    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }

    /// Render a fresh swagger envelope containing only this package's
    /// patched definitions, keyed by their bare type name.
    pub fn generate_swagger(
        &self,
        swagger_version: &str,
        kubernetes_version: &str,
        git_repo: &str,
        registry: &InterfaceRegistry,
    ) -> Result<SwaggerDocument> {
        let mut definitions = IndexMap::new();
        for definition in &self.definitions {
            let patched =
                definition
                    .generate_patched_schema(git_repo, registry)
                    .map_err(|source| CoreError::RenderPackage {
                        package: self.name.clone(),
                        source: Box::new(source),
                    })?;
            definitions.insert(definition.type_name.clone(), patched);
        }

        Ok(SwaggerDocument {
            swagger: swagger_version.to_string(),
            info: Some(Info {
                title: Some("kubernetes".to_string()),
                version: Some(kubernetes_version.to_string()),
                extra: IndexMap::new(),
            }),
            paths: Some(serde_json::Value::Object(serde_json::Map::new())),
            definitions,
            extra: IndexMap::new(),
        })
    }
}
