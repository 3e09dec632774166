//! End-to-end exercise of the planning pipeline: parse a small multi-package
//! document, build the plan, walk the dependency graph, and check the
//! rewritten cross-package references and GVK emission together.

use indexmap::IndexMap;
use ksplit_core::{DependencyGraph, RefactoringPlan};
use pretty_assertions::assert_eq;
use serde_json::json;

const GIT_REPO: &str = "github.com/kubewarden/k8s-objects";

fn sample_document() -> ksplit_core::SwaggerDocument {
    let raw = json!({
        "swagger": "2.0",
        "info": { "title": "kubernetes", "version": "v1.29.0" },
        "paths": {},
        "definitions": {
            "io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta": {
                "type": "object"
            },
            "io.k8s.api.apps.v1.Deployment": {
                "type": "object",
                "properties": {
                    "metadata": {
                        "$ref": "#/definitions/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"
                    }
                },
                "required": [],
                "x-kubernetes-group-version-kind": [
                    {"group": "apps", "version": "v1", "kind": "Deployment"}
                ]
            },
            "io.k8s.api.apps.v1.StatefulSet": {
                "type": "object",
                "properties": {
                    "metadata": {
                        "$ref": "#/definitions/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"
                    }
                },
                "required": ["metadata"],
                "x-kubernetes-group-version-kind": [
                    {"group": "apps", "version": "v1", "kind": "StatefulSet"}
                ]
            }
        }
    });

    serde_json::from_value(raw).unwrap()
}

#[test]
fn plan_groups_definitions_and_tracks_cross_package_dependency() {
    let document = sample_document();
    let plan = RefactoringPlan::build(&document).unwrap();

    assert_eq!(plan.packages.len(), 2);
    assert_eq!(plan.kubernetes_version, "v1.29.0");

    let apps = &plan.packages["api/apps/v1"];
    assert_eq!(apps.definitions.len(), 2);
    assert_eq!(
        apps.dependencies().iter().collect::<Vec<_>>(),
        vec!["apimachinery/pkg/apis/meta/v1"]
    );
}

#[test]
fn dependency_graph_visits_ancestor_packages_first() {
    let document = sample_document();
    let plan = RefactoringPlan::build(&document).unwrap();
    let graph = DependencyGraph::build_from(&plan).unwrap();

    let mut order = Vec::new();
    graph
        .walk(|name| {
            order.push(name.to_string());
            Ok::<(), ksplit_core::CoreError>(())
        })
        .unwrap();

    let meta_pos = order
        .iter()
        .position(|n| n == "apimachinery/pkg/apis/meta/v1")
        .unwrap();
    let apps_pos = order.iter().position(|n| n == "api/apps/v1").unwrap();
    assert!(meta_pos < apps_pos);
}

#[test]
fn rendered_package_has_no_dangling_cross_package_refs() {
    let document = sample_document();
    let plan = RefactoringPlan::build(&document).unwrap();
    let rendered = plan.render_all(GIT_REPO).unwrap();

    let apps_json: serde_json::Value = serde_json::from_str(&rendered["api/apps/v1"]).unwrap();
    let deployment = &apps_json["definitions"]["Deployment"];
    let metadata = &deployment["properties"]["metadata"];

    assert_eq!(metadata["$ref"], serde_json::Value::Null);
    assert_eq!(metadata["x-go-type"]["type"], "ObjectMeta");
    assert_eq!(
        metadata["x-go-type"]["import"]["package"],
        format!("{GIT_REPO}/apimachinery/pkg/apis/meta/v1")
    );

    let statefulset = &apps_json["definitions"]["StatefulSet"];
    let required_metadata = &statefulset["properties"]["metadata"];
    assert_eq!(required_metadata["$ref"], serde_json::Value::Null);
    assert!(required_metadata.get("x-omitempty").is_none());
}

#[test]
fn gvk_files_are_emitted_once_per_kind_plus_one_group_info() {
    let document = sample_document();
    let plan = RefactoringPlan::build(&document).unwrap();

    let files = ksplit_core::render_all_gvk_files(&plan.packages).unwrap();
    let apps_files = &files["api/apps/v1"];

    let names: Vec<&str> = apps_files.iter().map(|(n, _)| n.as_str()).collect();
    assert!(names.contains(&"deployment_gvk.go"));
    assert!(names.contains(&"stateful_set_gvk.go"));
    assert!(names.contains(&"group_info.go"));
    assert_eq!(apps_files.len(), 3);

    assert!(!files.contains_key("apimachinery/pkg/apis/meta/v1"));
}

#[test]
fn unresolved_dependency_aborts_graph_construction() {
    let raw = json!({
        "swagger": "2.0",
        "definitions": {
            "io.k8s.api.apps.v1.Deployment": {
                "properties": {
                    "metadata": {
                        "$ref": "#/definitions/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"
                    }
                }
            }
        }
    });
    let document: ksplit_core::SwaggerDocument = serde_json::from_value(raw).unwrap();
    let plan = RefactoringPlan::build(&document).unwrap();

    let err = DependencyGraph::build_from(&plan).unwrap_err();
    assert!(matches!(
        err,
        ksplit_core::CoreError::UnresolvedDependency { .. }
    ));
}

#[test]
fn empty_document_produces_an_empty_plan() {
    let document = ksplit_core::SwaggerDocument {
        swagger: "2.0".to_string(),
        info: None,
        paths: None,
        definitions: IndexMap::new(),
        extra: IndexMap::new(),
    };
    let plan = RefactoringPlan::build(&document).unwrap();
    assert!(plan.packages.is_empty());
    assert_eq!(plan.kubernetes_version, "undefined");
}
