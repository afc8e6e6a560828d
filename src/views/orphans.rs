use crate::packages::{PackageGraph, PackageNode};
use crate::search::fuzzy_match;

#[derive(Clone, Debug, Default)]
pub struct OrphansState {
    pub query: String,
    pub selected: Option<String>,
}

impl OrphansState {
    pub fn rows<'g>(&self, graph: &'g PackageGraph) -> Vec<&'g PackageNode> {
        graph
            .orphaned()
            .into_iter()
            .filter(|node| fuzzy_match(&self.query, &node.id))
            .collect()
    }

    /// Clicking an orphan row toggles it.
    pub fn toggle(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.to_owned());
        }
    }

    /// Clicking a dependency in the detail pane always selects it.
    pub fn select(&mut self, id: &str) {
        self.selected = Some(id.to_owned());
    }

    pub fn selected_node<'g>(&self, graph: &'g PackageGraph) -> Option<&'g PackageNode> {
        self.selected.as_deref().and_then(|id| graph.node(id))
    }

    pub fn selected_dependencies<'g>(&self, graph: &'g PackageGraph) -> Vec<&'g PackageNode> {
        self.selected
            .as_deref()
            .map(|id| graph.dependencies_of(id))
            .unwrap_or_default()
    }

    pub fn empty_rows_message(&self) -> &'static str {
        if self.query.is_empty() {
            "No orphaned packages found"
        } else {
            "No orphaned packages match your search"
        }
    }
}

/// Row caption, e.g. `3 dependencies`.
pub fn dependency_summary(node: &PackageNode) -> String {
    let count = node.depends_on.len();
    format!(
        "{count} {}",
        crate::util::pluralize(count, "dependency", "dependencies")
    )
}
