use eframe::egui::{RichText, Ui};

use deps_explorer::packages::PackageStatus;
use deps_explorer::views::dependency_summary;

use super::super::Workspace;
use super::widgets::{package_row, package_rows, search_box, status_dot};

impl Workspace {
    pub(in crate::app) fn draw_orphans_view(&mut self, ui: &mut Ui) {
        ui.columns(2, |columns| {
            self.draw_orphan_list(&mut columns[0]);
            self.draw_orphan_dependencies(&mut columns[1]);
        });
    }

    fn draw_orphan_list(&mut self, ui: &mut Ui) {
        let rows = self.orphans.rows(&self.graph);

        ui.horizontal(|ui| {
            status_dot(ui, PackageStatus::Orphaned);
            ui.label(
                RichText::new(format!(
                    "Orphaned Dependency Packages ({}/{})",
                    rows.len(),
                    self.graph.orphan_count()
                ))
                .heading()
                .size(16.0),
            );
        });
        ui.label(
            RichText::new("Dependency packages that are not required by any other package")
                .small()
                .weak(),
        );
        search_box(ui, &mut self.orphans.query, "Search orphaned packages...");
        ui.add_space(6.0);

        if rows.is_empty() {
            ui.weak(self.orphans.empty_rows_message());
            return;
        }

        let selected = self.orphans.selected.as_deref();
        let mut clicked = None;
        package_rows(ui, "orphan_rows", rows.len(), |ui, index| {
            let node = rows[index];
            let highlighted = selected == Some(node.id.as_str());
            if package_row(ui, node, &dependency_summary(node), highlighted, false) {
                clicked = Some(node.id.clone());
            }
        });

        if let Some(id) = clicked {
            self.orphans.toggle(&id);
        }
    }

    fn draw_orphan_dependencies(&mut self, ui: &mut Ui) {
        let Some(node) = self.orphans.selected_node(&self.graph) else {
            ui.label(RichText::new("Dependencies").heading().size(16.0));
            ui.add_space(12.0);
            ui.weak("Select an orphaned package to view its dependencies");
            return;
        };

        let dependencies = self.orphans.selected_dependencies(&self.graph);
        ui.label(
            RichText::new(format!("Dependencies ({})", dependencies.len()))
                .heading()
                .size(16.0),
        );
        ui.add_space(4.0);
        ui.small("Selected package:");
        ui.label(RichText::new(&node.id).strong());
        ui.label(RichText::new(format!("v{}", node.version)).small().weak());
        ui.separator();

        if dependencies.is_empty() {
            ui.weak("This package has no dependencies");
            return;
        }

        let mut clicked = None;
        package_rows(ui, "orphan_dependency_rows", dependencies.len(), |ui, index| {
            let dependency = dependencies[index];
            if package_row(ui, dependency, &dependency.status_text(), false, true) {
                clicked = Some(dependency.id.clone());
            }
        });

        if let Some(id) = clicked {
            self.orphans.select(&id);
        }
    }
}
