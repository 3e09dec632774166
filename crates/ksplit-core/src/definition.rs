//! Wraps one input schema, derives its (package, type) identity and
//! cross-package dependency set, and produces the rewritten schema that
//! lands in a per-package swagger envelope.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::error::{CoreError, Result};
use crate::interface_registry::InterfaceRegistry;
use crate::property_import::PropertyImport;
use crate::schema::Schema;

const IO_K8S_PREFIX: &str = "io.k8s.";
const TIME_DEFINITION_ID: &str = "io.k8s.apimachinery.pkg.apis.meta.v1.Time";

#[derive(Debug, Clone)]
pub struct Definition {
    pub schema: Schema,
    pub package_name: String,
    pub type_name: String,
    dependencies: BTreeSet<String>,
}

impl Definition {
    /// Build a `Definition` from one `(id, schema)` entry of the input
    /// document's `definitions` map.
    pub fn new(mut schema: Schema, id: &str) -> Result<Self> {
        patch_input_schema(&mut schema, id);

        let path = id.strip_prefix(IO_K8S_PREFIX).unwrap_or(id);
        let chunks: Vec<&str> = path.split('.').collect();
        if chunks.len() < 2 {
            return Err(CoreError::DefinitionTooFewChunks {
                id: id.to_string(),
                chunks: chunks.into_iter().map(str::to_string).collect(),
            });
        }

        let (namespace_chunks, type_name) = chunks.split_at(chunks.len() - 1);
        let package_name = namespace_chunks.join("/");
        let type_name = type_name[0].to_string();

        let mut definition = Definition {
            schema,
            package_name,
            type_name,
            dependencies: BTreeSet::new(),
        };
        definition.compute_dependencies()?;
        Ok(definition)
    }

    fn compute_dependencies(&mut self) -> Result<()> {
        let Some(properties) = self.schema.properties.clone() else {
            return Ok(());
        };

        let mut imports = Vec::new();
        for (name, property) in &properties {
            imports.push(self.import_for(&property.ref_, name)?);

            if let Some(items) = &property.items {
                imports.push(self.import_for(&items.ref_, name)?);
            }

            if let Some(additional) = &property.additional_properties {
                if let Some(inner) = additional.schema() {
                    imports.push(self.import_for(&inner.ref_, name)?);
                }
            }
        }

        for import in imports.into_iter().flatten() {
            if import.package_path != self.package_name {
                self.dependencies.insert(import.package_path);
            }
        }

        Ok(())
    }

    fn import_for(&self, ref_pointer: &str, property_name: &str) -> Result<Option<PropertyImport>> {
        let import = PropertyImport::parse(ref_pointer).map_err(|source| {
            CoreError::DependencyComputation {
                package: self.package_name.clone(),
                type_name: format!("{}.{property_name}", self.type_name),
                source: Box::new(source),
            }
        })?;
        Ok(if import.is_empty() { None } else { Some(import) })
    }

    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }

    /// Produce the schema as it should appear in the rendered per-package
    /// envelope: local refs rewritten to `#/definitions/<Type>`, foreign
    /// refs rewritten to `x-go-type` vendor extensions, and nullability /
    /// omit-empty hints injected per the `required` list.
    pub fn generate_patched_schema(
        &self,
        git_repo: &str,
        registry: &InterfaceRegistry,
    ) -> Result<Schema> {
        if registry.is_interface(git_repo, &self.package_name, &self.type_name) {
            let mut schema = self.schema.clone();
            schema.set_extension("x-go-type", raw_message_extension());
            return Ok(schema);
        }

        let mut schema = self.schema.clone();
        let required = schema.required.clone().unwrap_or_default();

        if let Some(properties) = schema.properties.as_mut() {
            for (name, property) in properties.iter_mut() {
                let is_required = Schema::is_required(&required, name);

                patch_schema_ref(property, &self.package_name, registry, is_required, git_repo)
                    .map_err(|source| CoreError::PatchDefinition {
                        package: self.package_name.clone(),
                        type_name: self.type_name.clone(),
                        source: Box::new(source),
                    })?;

                if let Some(items) = property.items.as_mut() {
                    patch_schema_ref(items, &self.package_name, registry, is_required, git_repo)
                        .map_err(|source| CoreError::PatchDefinition {
                            package: self.package_name.clone(),
                            type_name: self.type_name.clone(),
                            source: Box::new(source),
                        })?;
                }

                if let Some(additional) = property.additional_properties.as_mut() {
                    if let Some(inner) = additional.schema_mut() {
                        patch_schema_ref(
                            inner,
                            &self.package_name,
                            registry,
                            is_required,
                            git_repo,
                        )
                        .map_err(|source| CoreError::PatchDefinition {
                            package: self.package_name.clone(),
                            type_name: self.type_name.clone(),
                            source: Box::new(source),
                        })?;
                    }
                }
            }
        }

        Ok(schema)
    }
}

fn patch_input_schema(schema: &mut Schema, id: &str) {
    if id == TIME_DEFINITION_ID {
        schema.set_extension("x-nullable", Value::Bool(true));
    }
}

fn raw_message_extension() -> Value {
    let mut import = Map::new();
    import.insert(
        "package".to_string(),
        Value::String("encoding/json".to_string()),
    );

    let mut outer = Map::new();
    outer.insert("type".to_string(), Value::String("RawMessage".to_string()));
    outer.insert("import".to_string(), Value::Object(import));
    Value::Object(outer)
}

fn patch_schema_ref(
    node: &mut Schema,
    definition_package: &str,
    registry: &InterfaceRegistry,
    is_required: bool,
    git_repo: &str,
) -> Result<()> {
    let prop_import = PropertyImport::parse(&node.ref_)?;
    let is_interface = !prop_import.is_empty()
        && registry.is_interface(git_repo, &prop_import.package_path, &prop_import.type_name);

    if !is_required {
        node.set_extension("x-omitempty", Value::Bool(true));

        let is_basic_type = prop_import.is_empty();
        if !is_basic_type && !is_interface {
            node.set_extension("x-nullable", Value::Bool(true));
        }
    }

    if prop_import.is_empty() {
        return Ok(());
    }

    if prop_import.package_path == definition_package {
        node.ref_ = format!("#/definitions/{}", prop_import.type_name);
        return Ok(());
    }

    node.ref_ = String::new();

    if is_interface {
        node.set_extension("x-nullable", Value::Bool(false));
        node.set_extension("x-go-type", raw_message_extension());
    } else {
        node.set_extension("x-go-type", prop_import.to_vendor_type_map(git_repo));
    }

    Ok(())
}
