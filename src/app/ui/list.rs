use eframe::egui::{RichText, Ui};

use deps_explorer::packages::PackageStatus;
use deps_explorer::views::Column;

use super::super::Workspace;
use super::widgets::{package_row, package_rows, search_box, status_dot};

impl Workspace {
    pub(in crate::app) fn draw_list_view(&mut self, ui: &mut Ui) {
        ui.columns(2, |columns| {
            self.draw_list_column(&mut columns[0], Column::Explicit);
            self.draw_list_column(&mut columns[1], Column::Dependency);
        });
    }

    fn draw_list_column(&mut self, ui: &mut Ui, column: Column) {
        let counts = self.graph.counts();
        let (title, status, total, hint) = match column {
            Column::Explicit => (
                "Explicitly Installed Packages",
                PackageStatus::Explicit,
                counts.explicit,
                "Search explicit packages...",
            ),
            Column::Dependency => (
                "Dependency Packages",
                PackageStatus::Dependency,
                counts.dependency,
                "Search dependency packages...",
            ),
        };

        let rows = self.list.rows(&self.graph, &self.maps, column);

        ui.horizontal(|ui| {
            status_dot(ui, status);
            ui.label(
                RichText::new(format!("{title} ({}/{total})", rows.len()))
                    .heading()
                    .size(16.0),
            );
        });

        let query = match column {
            Column::Explicit => &mut self.list.explicit_query,
            Column::Dependency => &mut self.list.dependency_query,
        };
        search_box(ui, query, hint);
        ui.add_space(6.0);

        let mut clicked = None;
        package_rows(ui, title, rows.len(), |ui, index| {
            let node = rows[index];
            let caption = match column {
                Column::Explicit => String::new(),
                Column::Dependency => {
                    format!("Needed by: {}", self.maps.needed_by(&node.id).join(", "))
                }
            };
            let highlighted = self.list.is_highlighted(&self.maps, column, &node.id);
            if package_row(ui, node, &caption, highlighted, column == Column::Dependency) {
                clicked = Some(node.id.clone());
            }
        });

        if let Some(id) = clicked {
            self.list.click(&id, column);
        }
    }
}
