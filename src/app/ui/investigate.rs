use eframe::egui::{self, RichText, Ui};

use deps_explorer::views::{InvestigateFilter, relation_summary};

use super::super::Workspace;
use super::super::canvas::GraphCanvas;
use super::details::canvas_with_details;
use super::widgets::{empty_state, package_row, package_rows, search_box};

impl Workspace {
    pub(in crate::app) fn draw_investigate_view(&mut self, ui: &mut Ui) {
        let mut picked = None;

        egui::SidePanel::left("investigate_packages")
            .resizable(true)
            .default_width(340.0)
            .show_inside(ui, |ui| picked = self.draw_investigate_list(ui));

        egui::CentralPanel::default().show_inside(ui, |ui| {
            if let Some(id) = self.draw_investigate_tree(ui) {
                picked = Some(id);
            }
        });

        if let Some(id) = picked {
            self.investigate_package(&id);
        }
    }

    fn investigate_package(&mut self, id: &str) {
        if self.investigate.selected() == Some(id) {
            return;
        }
        self.investigate.select(&self.graph, id);
        self.tree_canvas = Some(GraphCanvas::tree(&self.graph, self.investigate.tree(), id));
    }

    fn draw_investigate_list(&mut self, ui: &mut Ui) -> Option<String> {
        ui.label(RichText::new("Investigate Packages").heading().size(16.0));
        search_box(ui, &mut self.investigate.query, "Search packages...");

        ui.horizontal(|ui| {
            for filter in InvestigateFilter::ALL {
                let label = format!("{} ({})", filter.label(), filter.count(&self.graph));
                if ui
                    .selectable_label(self.investigate.filter == filter, label)
                    .clicked()
                {
                    self.investigate.filter = filter;
                }
            }
        });
        ui.add_space(6.0);

        let rows = self.investigate.rows(&self.graph);
        if rows.is_empty() {
            ui.weak("No packages match your criteria");
            return None;
        }

        let selected = self.investigate.selected();
        let mut clicked = None;
        package_rows(ui, "investigate_rows", rows.len(), |ui, index| {
            let node = rows[index];
            let highlighted = selected == Some(node.id.as_str());
            if package_row(ui, node, &relation_summary(node), highlighted, true) {
                clicked = Some(node.id.clone());
            }
        });
        clicked
    }

    fn draw_investigate_tree(&mut self, ui: &mut Ui) -> Option<String> {
        let (Some(title), Some(canvas)) = (self.investigate.tree_title(), self.tree_canvas.as_mut())
        else {
            empty_state(
                ui,
                "Select a package to investigate.\nThe dependency tree will show all connected packages",
            );
            return None;
        };

        let mut cleared = false;
        ui.horizontal(|ui| {
            ui.label(RichText::new(title).heading().size(16.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                cleared = ui.button("Clear").on_hover_text("Close this tree").clicked();
            });
        });
        if cleared {
            self.investigate.clear();
            self.tree_canvas = None;
            return None;
        }
        ui.weak(self.investigate.tree_summary());
        ui.add_space(4.0);

        canvas_with_details(ui, &self.graph, canvas, None)
    }
}
