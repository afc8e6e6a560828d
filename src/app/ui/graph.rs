use std::collections::HashSet;

use eframe::egui::{self, Key, Ui};

use deps_explorer::search::{best_match, fuzzy_match};

use super::super::Workspace;
use super::super::canvas::GraphCanvas;
use super::details::canvas_with_details;

impl Workspace {
    pub(in crate::app) fn draw_graph_view(&mut self, ui: &mut Ui) {
        let canvas = self
            .graph_canvas
            .get_or_insert_with(|| GraphCanvas::full(&self.graph));

        let query = self.graph_search.clone();
        let matches = (!query.is_empty()).then(|| {
            self.graph
                .nodes()
                .iter()
                .enumerate()
                .filter(|(_, node)| fuzzy_match(&query, &node.id))
                .map(|(index, _)| index)
                .collect::<HashSet<_>>()
        });

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.graph_search)
                    .hint_text("Search packages... (Enter jumps to best match)")
                    .desired_width(320.0),
            );
            if response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter)) {
                let ids = self.graph.nodes().iter().map(|node| node.id.as_str());
                if let Some(id) = best_match(&query, ids) {
                    tracing::debug!(query = %query, id, "jumping to search match");
                    canvas.select_id(&self.graph, id);
                    canvas.focus_selected();
                }
            }

            if let Some(matches) = &matches {
                ui.label(format!("{} matches", matches.len()));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!(
                    "{} nodes, {} links",
                    canvas.node_count(),
                    self.graph.links().len()
                ));
            });
        });
        ui.add_space(4.0);

        let outside = canvas_with_details(ui, &self.graph, canvas, matches.as_ref());
        debug_assert!(outside.is_none(), "full graph canvas is missing {outside:?}");
    }
}
