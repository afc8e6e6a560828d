use crate::packages::{PackageGraph, PackageNode, SubGraph};
use crate::search::fuzzy_match;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InvestigateFilter {
    #[default]
    All,
    Explicit,
    Dependency,
}

impl InvestigateFilter {
    pub const ALL: [InvestigateFilter; 3] = [Self::All, Self::Explicit, Self::Dependency];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Explicit => "Explicit",
            Self::Dependency => "Dependencies",
        }
    }

    pub fn accepts(self, node: &PackageNode) -> bool {
        match self {
            Self::All => true,
            Self::Explicit => node.explicit,
            Self::Dependency => !node.explicit,
        }
    }

    /// Number of packages the filter would show with an empty query.
    pub fn count(self, graph: &PackageGraph) -> usize {
        let counts = graph.counts();
        match self {
            Self::All => counts.total,
            Self::Explicit => counts.explicit,
            Self::Dependency => counts.dependency,
        }
    }
}

/// Picks one package and shows its dependency tree.
#[derive(Clone, Debug, Default)]
pub struct InvestigateState {
    pub query: String,
    pub filter: InvestigateFilter,
    selected: Option<String>,
    tree: SubGraph,
}

impl InvestigateState {
    pub fn rows<'g>(&self, graph: &'g PackageGraph) -> Vec<&'g PackageNode> {
        graph
            .nodes()
            .iter()
            .filter(|node| fuzzy_match(&self.query, &node.id) && self.filter.accepts(node))
            .collect()
    }

    pub fn select(&mut self, graph: &PackageGraph, id: &str) {
        self.tree = graph.subgraph(id);
        self.selected = Some(id.to_owned());
        tracing::debug!(
            root = id,
            nodes = self.tree.nodes.len(),
            links = self.tree.links.len(),
            "built dependency tree"
        );
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.tree = SubGraph::default();
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn tree(&self) -> &SubGraph {
        &self.tree
    }

    pub fn tree_title(&self) -> Option<String> {
        self.selected
            .as_deref()
            .map(|id| format!("Dependency Tree: {id}"))
    }

    pub fn tree_summary(&self) -> String {
        format!(
            "Showing {} packages in the tree ({} connections)",
            self.tree.nodes.len(),
            self.tree.links.len()
        )
    }
}

/// Row caption, e.g. `3 deps, 1 parents`.
pub fn relation_summary(node: &PackageNode) -> String {
    format!(
        "{} deps, {} parents",
        node.depends_on.len(),
        node.required_by.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::parse_graph_document;

    fn graph() -> PackageGraph {
        let raw = r#"{"nodes": {
            "git": {"explicit": true, "depends_on": ["curl", "perl"]},
            "curl": {"depends_on": ["openssl"], "required_by": ["git"]},
            "openssl": {"required_by": ["curl"]},
            "perl": {"required_by": ["git"]},
            "htop": {"explicit": true, "depends_on": ["ncurses"]},
            "ncurses": {"required_by": ["htop"]}
        }}"#;
        PackageGraph::from_document(parse_graph_document(raw).unwrap())
    }

    #[test]
    fn filter_counts_follow_package_counts() {
        let graph = graph();
        assert_eq!(InvestigateFilter::All.count(&graph), 6);
        assert_eq!(InvestigateFilter::Explicit.count(&graph), 2);
        assert_eq!(InvestigateFilter::Dependency.count(&graph), 4);
    }

    #[test]
    fn rows_apply_query_then_filter() {
        let graph = graph();
        let mut state = InvestigateState {
            query: "c".into(),
            ..Default::default()
        };
        let ids = |rows: Vec<&PackageNode>| rows.into_iter().map(|n| n.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(state.rows(&graph)), ["curl", "ncurses"]);

        state.filter = InvestigateFilter::Explicit;
        assert!(state.rows(&graph).is_empty());

        state.query = " ".into();
        assert!(state.rows(&graph).is_empty());

        state.query.clear();
        assert_eq!(ids(state.rows(&graph)), ["git", "htop"]);
    }

    #[test]
    fn selecting_builds_the_tree() {
        let graph = graph();
        let mut state = InvestigateState::default();
        assert_eq!(state.tree_title(), None);

        state.select(&graph, "git");
        assert_eq!(state.selected(), Some("git"));
        assert_eq!(state.tree_title().as_deref(), Some("Dependency Tree: git"));
        assert_eq!(
            state.tree_summary(),
            "Showing 4 packages in the tree (3 connections)"
        );

        state.clear();
        assert!(state.tree().nodes.is_empty());
        assert_eq!(state.selected(), None);
        assert_eq!(state.tree_title(), None);
    }

    #[test]
    fn relation_summary_counts_edges() {
        let graph = graph();
        assert_eq!(relation_summary(graph.node("git").unwrap()), "2 deps, 0 parents");
        assert_eq!(relation_summary(graph.node("curl").unwrap()), "1 deps, 1 parents");
    }
}
