use crate::packages::{DependencyMaps, PackageGraph, PackageNode};
use crate::search::fuzzy_match;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Explicit,
    Dependency,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListSelection {
    pub id: String,
    pub column: Column,
}

/// Two-column list of explicit and dependency packages.
#[derive(Clone, Debug, Default)]
pub struct ListState {
    pub explicit_query: String,
    pub dependency_query: String,
    pub selected: Option<ListSelection>,
}

impl ListState {
    pub fn click(&mut self, id: &str, column: Column) {
        let already_selected = self
            .selected
            .as_ref()
            .is_some_and(|selected| selected.id == id && selected.column == column);

        if already_selected {
            self.selected = None;
            return;
        }

        self.selected = Some(ListSelection {
            id: id.to_owned(),
            column,
        });
        match column {
            Column::Explicit => self.dependency_query.clear(),
            Column::Dependency => self.explicit_query.clear(),
        }
    }

    pub fn rows<'g>(
        &self,
        graph: &'g PackageGraph,
        maps: &DependencyMaps,
        column: Column,
    ) -> Vec<&'g PackageNode> {
        let (query, explicit) = match column {
            Column::Explicit => (self.explicit_query.as_str(), true),
            Column::Dependency => (self.dependency_query.as_str(), false),
        };

        let filtered = graph
            .nodes()
            .iter()
            .filter(|node| node.explicit == explicit && fuzzy_match(query, &node.id));

        let mut pinned = Vec::new();
        let mut related = Vec::new();
        let mut others = Vec::new();

        for node in filtered {
            match &self.selected {
                Some(selected) if selected.id == node.id => {
                    if selected.column == column {
                        pinned.push(node);
                    }
                }
                Some(selected) if selected.column != column => {
                    if Self::related(maps, column, &selected.id, &node.id) {
                        related.push(node);
                    } else {
                        others.push(node);
                    }
                }
                _ => others.push(node),
            }
        }

        // graph nodes are already in display order, so each bucket stays sorted
        pinned.extend(related);
        pinned.extend(others);
        pinned
    }

    pub fn is_highlighted(&self, maps: &DependencyMaps, column: Column, id: &str) -> bool {
        let Some(selected) = &self.selected else {
            return false;
        };

        if selected.column == column {
            return selected.id == id;
        }

        Self::related(maps, column, &selected.id, id)
    }

    fn related(maps: &DependencyMaps, row_column: Column, selected_id: &str, row_id: &str) -> bool {
        match row_column {
            Column::Explicit => maps.explicit_depends_on(row_id, selected_id),
            Column::Dependency => maps.explicit_depends_on(selected_id, row_id),
        }
    }
}
