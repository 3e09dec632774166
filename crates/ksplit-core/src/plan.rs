//! Scans the whole input document, builds every `Definition` and
//! `Package`, populates the `InterfaceRegistry`, and renders every
//! per-package swagger envelope.

use std::collections::HashMap;

use crate::definition::Definition;
use crate::error::{CoreError, Result};
use crate::interface_registry::InterfaceRegistry;
use crate::package::Package;
use crate::schema::SwaggerDocument;

const DEFAULT_KUBERNETES_VERSION: &str = "undefined";

#[derive(Debug, Clone)]
pub struct RefactoringPlan {
    pub packages: HashMap<String, Package>,
    pub interfaces: InterfaceRegistry,
    pub swagger_version: String,
    pub kubernetes_version: String,
}

impl RefactoringPlan {
    pub fn build(document: &SwaggerDocument) -> Result<Self> {
        let kubernetes_version = document
            .info
            .as_ref()
            .and_then(|info| info.version.clone())
            .unwrap_or_else(|| DEFAULT_KUBERNETES_VERSION.to_string());

        let mut packages: HashMap<String, Package> = HashMap::new();
        let mut interfaces = InterfaceRegistry::new();

        // Definition ids are sorted before processing so per-package
        // definition order (and therefore every rendered envelope) is
        // byte-stable across runs, independent of the input map's
        // iteration order.
        let mut ids: Vec<&String> = document.definitions.keys().collect();
        ids.sort();

        for id in ids {
            let schema = &document.definitions[id];
            let is_polymorphic = schema.is_polymorphic_shaped();

            let definition = Definition::new(schema.clone(), id)?;

            if is_polymorphic {
                interfaces.register(&definition.package_name, &definition.type_name);
            }

            packages
                .entry(definition.package_name.clone())
                .or_insert_with(|| Package::new(definition.package_name.clone()))
                .add(definition);
        }

        Ok(RefactoringPlan {
            packages,
            interfaces,
            swagger_version: document.swagger.clone(),
            kubernetes_version,
        })
    }

    /// Render every package's swagger envelope and serialize it to JSON
    /// text, keyed by package path.
    pub fn render_all(&self, git_repo: &str) -> Result<HashMap<String, String>> {
        let mut rendered = HashMap::new();

        for (name, package) in &self.packages {
            let document = package.generate_swagger(
                &self.swagger_version,
                &self.kubernetes_version,
                git_repo,
                &self.interfaces,
            )?;

            let json = serde_json::to_string_pretty(&document).map_err(|source| {
                CoreError::Serialize {
                    package: name.clone(),
                    source,
                }
            })?;

            rendered.insert(name.clone(), json);
        }

        Ok(rendered)
    }
}
