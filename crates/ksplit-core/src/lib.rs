//! Core partitioning pipeline: parses a monolithic Kubernetes OpenAPI 2.0
//! document and plans/renders the per-package swagger envelopes and GVK
//! identity files an external model generator consumes.

pub mod definition;
pub mod dependency_graph;
pub mod error;
pub mod gvk;
pub mod interface_registry;
pub mod naming;
pub mod package;
pub mod plan;
pub mod property_import;
pub mod schema;

pub use definition::Definition;
pub use dependency_graph::DependencyGraph;
pub use error::CoreError;
pub use gvk::{render_all_gvk_files, render_package_gvk_files, GroupVersionKind};
pub use interface_registry::InterfaceRegistry;
pub use package::Package;
pub use plan::RefactoringPlan;
pub use property_import::PropertyImport;
pub use schema::{AdditionalProperties, Info, Schema, SwaggerDocument};
