use std::collections::{HashMap, HashSet};

use super::graph::{PackageGraph, compare_ids};

/// Closure relationships between explicit packages and their dependencies.
#[derive(Clone, Debug, Default)]
pub struct DependencyMaps {
    explicit_closures: HashMap<String, HashSet<String>>,
    explicit_parents: HashMap<String, Vec<String>>,
}

impl DependencyMaps {
    pub(super) fn build(graph: &PackageGraph) -> Self {
        let mut explicit_closures = HashMap::new();
        let mut explicit_parents: HashMap<String, Vec<String>> = HashMap::new();

        for node in graph.nodes().iter().filter(|node| node.explicit) {
            let closure = graph.collect_dependencies(&node.id);
            for dependency in &closure {
                explicit_parents
                    .entry(dependency.clone())
                    .or_default()
                    .push(node.id.clone());
            }
            explicit_closures.insert(node.id.clone(), closure);
        }

        for parents in explicit_parents.values_mut() {
            parents.sort_by(|a, b| compare_ids(a, b));
        }

        Self {
            explicit_closures,
            explicit_parents,
        }
    }

    /// Transitive dependencies of an explicit package.
    pub fn closure_of(&self, explicit_id: &str) -> Option<&HashSet<String>> {
        self.explicit_closures.get(explicit_id)
    }

    pub fn explicit_depends_on(&self, explicit_id: &str, dependency_id: &str) -> bool {
        self.closure_of(explicit_id)
            .is_some_and(|closure| closure.contains(dependency_id))
    }

    /// Explicit packages whose closure contains `dependency_id`, sorted.
    pub fn needed_by(&self, dependency_id: &str) -> &[String] {
        self.explicit_parents
            .get(dependency_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
