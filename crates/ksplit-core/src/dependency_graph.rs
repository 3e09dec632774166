//! Inter-package dependency DAG, built from a `RefactoringPlan`.
//!
//! One vertex per package path; an edge `dep -> pkg` exists whenever `pkg`
//! depends on `dep`. Built with `petgraph`, following the same
//! `DiGraph` + `HashMap<String, NodeIndex>` shape the teacher's module
//! registry uses for its own dependency graph.

use std::collections::{HashMap, HashSet};

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::error::{CoreError, Result};
use crate::plan::RefactoringPlan;

#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn build_from(plan: &RefactoringPlan) -> Result<Self> {
        let mut graph = DependencyGraph {
            graph: DiGraph::new(),
            indices: HashMap::new(),
        };

        for (name, package) in &plan.packages {
            let pkg_idx = graph.ensure_vertex(name);

            for dependency in package.dependencies() {
                if !plan.packages.contains_key(dependency) {
                    return Err(CoreError::UnresolvedDependency {
                        dependency: dependency.clone(),
                        dependent: name.clone(),
                    });
                }

                let dep_idx = graph.ensure_vertex(dependency);
                graph.graph.add_edge(dep_idx, pkg_idx, ());
            }
        }

        if is_cyclic_directed(&graph.graph) {
            let mut names: Vec<String> = graph.indices.keys().cloned().collect();
            names.sort();
            return Err(CoreError::CircularDependency(names));
        }

        Ok(graph)
    }

    fn ensure_vertex(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.indices.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.indices.insert(name.to_string(), idx);
        idx
    }

    /// All transitive ancestors of `node` (packages `node` depends on,
    /// directly or indirectly), in a deterministic, lexicographically
    /// tie-broken order suitable for dependency-respecting processing.
    pub fn ordered_ancestors(&self, node: &str) -> Vec<String> {
        let Some(&start) = self.indices.get(node) else {
            return Vec::new();
        };

        let mut visited = HashSet::new();
        let mut ordered = Vec::new();
        self.collect_ancestors(start, &mut visited, &mut ordered);
        ordered
    }

    fn collect_ancestors(
        &self,
        node: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        ordered: &mut Vec<String>,
    ) {
        let mut parents: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(node, Direction::Incoming)
            .collect();
        parents.sort_by_key(|&idx| self.graph[idx].clone());

        for parent in parents {
            if visited.insert(parent) {
                self.collect_ancestors(parent, visited, ordered);
                ordered.push(self.graph[parent].clone());
            }
        }
    }

    /// Visit every vertex exactly once, roots sorted lexicographically,
    /// invoking `visitor` with the node id. The visitor may call
    /// `ordered_ancestors` itself to pre-visit dependencies before its own
    /// processing; `walk` additionally guarantees every vertex's
    /// ancestors have already been passed to `visitor` by the time the
    /// vertex itself is.
    pub fn walk<F, E>(&self, mut visitor: F) -> std::result::Result<(), E>
    where
        F: FnMut(&str) -> std::result::Result<(), E>,
    {
        let mut names: Vec<&String> = self.indices.keys().collect();
        names.sort();

        let mut visited = HashSet::new();
        for name in names {
            self.walk_from(name, &mut visited, &mut visitor)?;
        }
        Ok(())
    }

    fn walk_from<F, E>(
        &self,
        name: &str,
        visited: &mut HashSet<String>,
        visitor: &mut F,
    ) -> std::result::Result<(), E>
    where
        F: FnMut(&str) -> std::result::Result<(), E>,
    {
        if visited.contains(name) {
            return Ok(());
        }

        for ancestor in self.ordered_ancestors(name) {
            self.walk_from(&ancestor, visited, visitor)?;
        }

        if visited.insert(name.to_string()) {
            visitor(name)?;
        }

        Ok(())
    }

    pub fn vertex_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.indices.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, SwaggerDocument};
    use indexmap::IndexMap;

    fn document_with(definitions: Vec<(&str, Schema)>) -> SwaggerDocument {
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

    fn schema_with_ref(r: &str) -> Schema {
        let mut s = Schema::default();
        s.ref_ = r.to_string();
        s
    }

    #[test]
    fn missing_dependency_is_an_error() {
        let mut properties = IndexMap::new();
        properties.insert(
            "meta".to_string(),
            schema_with_ref("#/definitions/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"),
        );
        let mut schema = Schema::default();
        schema.properties = Some(properties);

        let doc = document_with(vec![("io.k8s.api.core.v1.Pod", schema)]);
        let plan = RefactoringPlan::build(&doc).unwrap();

        let err = DependencyGraph::build_from(&plan).unwrap_err();
        assert!(matches!(err, CoreError::UnresolvedDependency { .. }));
    }

    #[test]
    fn acyclic_graph_orders_ancestors_before_dependents() {
        let mut properties = IndexMap::new();
        properties.insert(
            "meta".to_string(),
            schema_with_ref("#/definitions/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"),
        );
        let mut pod_schema = Schema::default();
        pod_schema.properties = Some(properties);

        let doc = document_with(vec![
            ("io.k8s.api.core.v1.Pod", pod_schema),
            (
                "io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta",
                Schema::default(),
            ),
        ]);
        let plan = RefactoringPlan::build(&doc).unwrap();
        let graph = DependencyGraph::build_from(&plan).unwrap();

        let ancestors = graph.ordered_ancestors("api/core/v1");
        assert_eq!(ancestors, vec!["apimachinery/pkg/apis/meta/v1"]);

        let mut order = Vec::new();
        graph
            .walk(|name| {
                order.push(name.to_string());
                Ok::<(), CoreError>(())
            })
            .unwrap();
        assert_eq!(
            order
                .iter()
                .position(|n| n == "apimachinery/pkg/apis/meta/v1"),
            Some(0)
        );
        assert_eq!(order.len(), 2);
    }

    #[test]
    fn visitor_runs_at_most_once_per_vertex() {
        let doc = document_with(vec![("io.k8s.api.core.v1.Pod", Schema::default())]);
        let plan = RefactoringPlan::build(&doc).unwrap();
        let graph = DependencyGraph::build_from(&plan).unwrap();

        let mut visits = 0;
        graph
            .walk(|_| {
                visits += 1;
                Ok::<(), CoreError>(())
            })
            .unwrap();
        assert_eq!(visits, 1);
    }
}
