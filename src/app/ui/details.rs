use std::collections::HashSet;

use eframe::egui::{self, RichText, Ui};

use deps_explorer::packages::{PackageGraph, PackageNode};

use super::super::canvas::GraphCanvas;
use super::super::render_utils::status_color;

enum DetailsAction {
    Select(String),
    Close,
}

/// Draws `canvas` with the details sidebar for its selection.
///
/// Returns an id picked in the sidebar that is not drawn on this canvas.
pub(in crate::app) fn canvas_with_details(
    ui: &mut Ui,
    graph: &PackageGraph,
    canvas: &mut GraphCanvas,
    matches: Option<&HashSet<usize>>,
) -> Option<String> {
    let mut action = None;

    if let Some(node) = canvas.selected_node(graph) {
        egui::SidePanel::right(ui.id().with("details"))
            .resizable(true)
            .default_width(320.0)
            .show_inside(ui, |ui| {
                action = draw_details(ui, graph, node);
            });
    }

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show_inside(ui, |ui| canvas.show(ui, graph, matches));

    match action? {
        DetailsAction::Close => {
            canvas.clear_selection();
            None
        }
        DetailsAction::Select(id) => {
            if canvas.select_id(graph, &id) {
                canvas.focus_selected();
                None
            } else {
                Some(id)
            }
        }
    }
}

fn draw_details(ui: &mut Ui, graph: &PackageGraph, node: &PackageNode) -> Option<DetailsAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.heading(&node.id);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("×").on_hover_text("Close").clicked() {
                action = Some(DetailsAction::Close);
            }
        });
    });
    ui.add_space(8.0);

    ui.label(RichText::new("Version").strong());
    ui.label(&node.version);
    ui.add_space(6.0);

    ui.label(RichText::new("Package Type").strong());
    let kind = if node.explicit {
        "Explicitly Installed"
    } else {
        "Dependency"
    };
    ui.label(RichText::new(kind).color(status_color(node.status())));
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (title, items, empty) in [
                ("Dependencies", &node.depends_on, "No dependencies"),
                ("Required By", &node.required_by, "Not required by any package"),
            ] {
                ui.label(RichText::new(format!("{title} ({})", items.len())).strong());
                if items.is_empty() {
                    ui.weak(empty);
                }
                for item in items {
                    if graph.node(item).is_some() {
                        if ui.link(item).clicked() {
                            action = Some(DetailsAction::Select(item.clone()));
                        }
                    } else {
                        ui.weak(item).on_hover_text("Not present in this snapshot");
                    }
                }
                ui.add_space(10.0);
            }
        });

    action
}
