//! Drives `Project`/`orchestrator` over a small in-memory document, the
//! same way `main` does, but through `MemFilesystem` so no real files or
//! subprocesses are touched.

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use ksplit::filesystem::MemFilesystem;
use ksplit::Project;
use ksplit_core::{RefactoringPlan, Schema, SwaggerDocument};
use pretty_assertions::assert_eq;
use serde_json::json;

fn sample_document() -> SwaggerDocument {
    let raw = json!({
        "swagger": "2.0",
        "info": { "title": "kubernetes", "version": "v1.29.0" },
        "definitions": {
            "io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta": { "type": "object" },
            "io.k8s.api.core.v1.Pod": {
                "type": "object",
                "properties": {
                    "metadata": {
                        "$ref": "#/definitions/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"
                    }
                },
                "x-kubernetes-group-version-kind": [
                    {"group": "", "version": "v1", "kind": "Pod"}
                ]
            }
        }
    });
    serde_json::from_value(raw).unwrap()
}

#[test]
fn generate_gvk_files_writes_through_the_filesystem_port() {
    let fs = Arc::new(MemFilesystem::new());
    let project = Project::new(
        PathBuf::from("/out"),
        "github.com/kubewarden/k8s-objects".to_string(),
        fs.clone(),
    );

    let document = sample_document();
    let plan = RefactoringPlan::build(&document).unwrap();

    ksplit::orchestrator::generate_gvk_files(&project, &plan).unwrap();

    let files = fs.files();
    let pod_gvk = project.root.join("api/core/v1").join("pod_gvk.go");
    let group_info = project.root.join("api/core/v1").join("group_info.go");

    assert!(files.contains_key(&pod_gvk));
    assert!(files.contains_key(&group_info));

    let contents = String::from_utf8(files[&pod_gvk].clone()).unwrap();
    assert!(contents.contains("Pod"));
}

#[test]
fn init_then_write_package_swagger_round_trips_through_mem_filesystem() {
    let fs = Arc::new(MemFilesystem::new());
    let project = Project::new(
        PathBuf::from("/out"),
        "github.com/kubewarden/k8s-objects".to_string(),
        fs.clone(),
    );

    project.init(b"{}", "v1.29.0").unwrap();
    project
        .write_package_swagger("api/core/v1", r#"{"swagger":"2.0"}"#)
        .unwrap();

    let files = fs.files();
    let package_swagger = project.root.join("api/core/v1").join("swagger.json");
    assert_eq!(
        files[&package_swagger],
        br#"{"swagger":"2.0"}"#.to_vec()
    );
}

#[test]
fn empty_plan_produces_no_gvk_files_but_still_copies_static_tree() {
    let fs = Arc::new(MemFilesystem::new());
    let project = Project::new(
        PathBuf::from("/out"),
        "github.com/kubewarden/k8s-objects".to_string(),
        fs.clone(),
    );

    let document = SwaggerDocument {
        swagger: "2.0".to_string(),
        info: None,
        paths: None,
        definitions: IndexMap::<String, Schema>::new(),
        extra: IndexMap::new(),
    };
    let plan = RefactoringPlan::build(&document).unwrap();

    ksplit::orchestrator::generate_gvk_files(&project, &plan).unwrap();

    let files = fs.files();
    assert!(!files.keys().any(|p| p
        .file_name()
        .is_some_and(|n| n == "group_info.go" || n.to_string_lossy().ends_with("_gvk.go"))));
    assert!(files
        .keys()
        .any(|p| p.ends_with("apimachinery/pkg/runtime/doc.go")));
}
