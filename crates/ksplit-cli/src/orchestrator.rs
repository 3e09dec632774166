//! Drives a `RefactoringPlan` end to end: renders and writes every
//! package's swagger envelope in dependency order, invokes the external
//! model generator for each, emits GVK identity files, and copies the
//! static template tree.

use std::collections::HashMap;
use std::path::Path;

use ksplit_core::{DependencyGraph, RefactoringPlan};
use tracing::info;

use crate::error::{CliError, Result};
use crate::project::Project;

pub fn generate_swagger_files(
    project: &Project,
    plan: &RefactoringPlan,
    template_dir: &Path,
) -> Result<()> {
    let rendered = plan.render_all(&project.git_repo)?;
    let graph = DependencyGraph::build_from(plan)?;

    graph.walk(|package_name| {
        visit_package(project, package_name, &rendered, template_dir)
    })
}

fn visit_package(
    project: &Project,
    package_name: &str,
    rendered: &HashMap<String, String>,
    template_dir: &Path,
) -> Result<()> {
    info!(package = package_name, "generating models for package");

    let json_text = rendered
        .get(package_name)
        .ok_or_else(|| CliError::MissingRenderedPackage(package_name.to_string()))?;

    project.write_package_swagger(package_name, json_text)?;

    project.invoke_swagger_model_generator(package_name, template_dir)
}

pub fn generate_gvk_files(project: &Project, plan: &RefactoringPlan) -> Result<()> {
    let files_by_package = ksplit_core::render_all_gvk_files(&plan.packages)?;

    for (package_name, files) in &files_by_package {
        info!(
            package = package_name,
            count = files.len(),
            "writing GVK identity files"
        );

        for (file_name, contents) in files {
            project.write_package_file(package_name, file_name, contents)?;
        }
    }

    project.copy_static_files()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use ksplit_core::SwaggerDocument;

    fn document_with(definitions: Vec<(&str, ksplit_core::Schema)>) -> SwaggerDocument {
        let mut map = IndexMap::new();
        for (id, schema) in definitions {
            map.insert(id.to_string(), schema);
        }
        SwaggerDocument {
            swagger: "2.0".to_string(),
            info: None,
            paths: None,
            definitions: map,
            extra: IndexMap::new(),
        }
    }

    #[test]
    fn missing_rendered_package_is_an_error() {
        let doc = document_with(vec![("io.k8s.api.core.v1.Pod", ksplit_core::Schema::default())]);
        let plan = RefactoringPlan::build(&doc).unwrap();
        let rendered = HashMap::new();
        let err = visit_package(
            &Project::new(
                std::env::temp_dir(),
                "github.com/example/repo".to_string(),
                std::sync::Arc::new(crate::filesystem::MemFilesystem::new()),
            ),
            "api/core/v1",
            &rendered,
            Path::new("/tmp"),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::MissingRenderedPackage(_)));
        let _ = plan;
    }
}
