use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::maps::DependencyMaps;
use super::parse::{GraphInfo, ParsedDocument};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageNode {
    pub id: String,
    pub explicit: bool,
    pub version: String,
    pub depends_on: Vec<String>,
    pub required_by: Vec<String>,
}

impl PackageNode {
    pub fn is_orphaned(&self) -> bool {
        !self.explicit && self.required_by.is_empty()
    }

    pub fn status(&self) -> PackageStatus {
        if self.explicit {
            PackageStatus::Explicit
        } else if self.is_orphaned() {
            PackageStatus::Orphaned
        } else {
            PackageStatus::Dependency
        }
    }

    /// Short description used under dependency rows.
    pub fn status_text(&self) -> String {
        match self.status() {
            PackageStatus::Explicit => "Explicitly installed".to_owned(),
            PackageStatus::Orphaned => "Orphaned dependency".to_owned(),
            PackageStatus::Dependency => {
                let count = self.required_by.len();
                format!(
                    "Required by {count} {}",
                    crate::util::pluralize(count, "package", "packages")
                )
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PackageStatus {
    Explicit,
    Dependency,
    Orphaned,
}

impl PackageStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Explicit => "Explicitly Installed",
            Self::Dependency => "Dependency",
            Self::Orphaned => "Orphaned Package",
        }
    }

    /// RGB triple of the status color.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::Explicit => [0x4c, 0xaf, 0x50],
            Self::Dependency => [0x21, 0x96, 0xf3],
            Self::Orphaned => [0xff, 0x57, 0x22],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    Explicit,
    Dependency,
}

/// Edge from a package to one of its dependencies, by node index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackageLink {
    pub source: usize,
    pub target: usize,
    pub kind: LinkKind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PackageCounts {
    pub explicit: usize,
    pub dependency: usize,
    pub total: usize,
}

/// A package plus its transitive dependencies.
#[derive(Clone, Debug, Default)]
pub struct SubGraph {
    pub nodes: Vec<usize>,
    pub links: Vec<PackageLink>,
}

#[derive(Clone, Debug)]
pub struct PackageGraph {
    info: Option<GraphInfo>,
    nodes: Vec<PackageNode>,
    index_by_id: HashMap<String, usize>,
    links: Vec<PackageLink>,
}

/// Alphabetical order used by every package list.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl PackageGraph {
    pub fn from_document(doc: ParsedDocument) -> Self {
        let mut nodes = doc.nodes;
        nodes.sort_by(|a, b| compare_ids(&a.id, &b.id));

        let index_by_id = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.clone(), index))
            .collect::<HashMap<_, _>>();

        let mut links = Vec::new();
        for (source, node) in nodes.iter().enumerate() {
            let kind = if node.explicit {
                LinkKind::Explicit
            } else {
                LinkKind::Dependency
            };
            for dependency in &node.depends_on {
                if let Some(&target) = index_by_id.get(dependency) {
                    links.push(PackageLink {
                        source,
                        target,
                        kind,
                    });
                }
            }
        }

        Self {
            info: doc.info,
            nodes,
            index_by_id,
            links,
        }
    }

    pub fn info(&self) -> Option<&GraphInfo> {
        self.info.as_ref()
    }

    pub fn nodes(&self) -> &[PackageNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[PackageLink] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&PackageNode> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub fn node_at(&self, index: usize) -> Option<&PackageNode> {
        self.nodes.get(index)
    }

    pub fn counts(&self) -> PackageCounts {
        let explicit = self.nodes.iter().filter(|node| node.explicit).count();
        PackageCounts {
            explicit,
            dependency: self.nodes.len() - explicit,
            total: self.nodes.len(),
        }
    }

    pub fn orphaned(&self) -> Vec<&PackageNode> {
        // nodes are kept in display order already
        self.nodes.iter().filter(|node| node.is_orphaned()).collect()
    }

    pub fn orphan_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_orphaned()).count()
    }

    /// Direct dependencies of `id` that exist in the snapshot, sorted.
    pub fn dependencies_of(&self, id: &str) -> Vec<&PackageNode> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };

        let mut dependencies = node
            .depends_on
            .iter()
            .filter_map(|dependency| self.node(dependency))
            .collect::<Vec<_>>();
        dependencies.sort_by(|a, b| compare_ids(&a.id, &b.id));
        dependencies
    }

    /// Every id reachable from `id` through `depends_on`.
    ///
    /// Ids missing from the snapshot are recorded but not expanded. `id`
    /// itself only appears when a cycle leads back to it.
    pub fn collect_dependencies(&self, id: &str) -> HashSet<String> {
        let mut visited = HashSet::new();
        let mut result = HashSet::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }

            let Some(node) = self.node(current) else {
                continue;
            };

            for dependency in node.depends_on.iter().rev() {
                result.insert(dependency.clone());
                if !visited.contains(dependency.as_str()) {
                    stack.push(dependency.as_str());
                }
            }
        }

        result
    }

    /// `id` together with its transitive dependencies.
    pub fn collect_package_tree(&self, id: &str) -> HashSet<String> {
        let mut result = HashSet::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            if !result.insert(current.to_owned()) {
                continue;
            }

            let Some(node) = self.node(current) else {
                continue;
            };

            for dependency in node.depends_on.iter().rev() {
                if !result.contains(dependency) {
                    stack.push(dependency.as_str());
                }
            }
        }

        result
    }

    pub fn subgraph(&self, root_id: &str) -> SubGraph {
        if self.index_of(root_id).is_none() {
            return SubGraph::default();
        }

        let tree = self.collect_package_tree(root_id);
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| tree.contains(&node.id))
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        let links = self
            .links
            .iter()
            .filter(|link| {
                tree.contains(&self.nodes[link.source].id)
                    && tree.contains(&self.nodes[link.target].id)
            })
            .copied()
            .collect();

        SubGraph { nodes, links }
    }

    pub fn dependency_maps(&self) -> DependencyMaps {
        DependencyMaps::build(self)
    }
}
