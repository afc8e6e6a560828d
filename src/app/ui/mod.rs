mod details;
mod graph;
mod header;
mod investigate;
mod list;
mod orphans;
mod widgets;

pub(in crate::app) use header::HeaderAction;
pub(in crate::app) use widgets::{empty_state, error_state, loading_state};

use eframe::egui::Ui;

use deps_explorer::views::ViewMode;

use super::Workspace;

impl Workspace {
    pub(in crate::app) fn show(&mut self, ui: &mut Ui, view: ViewMode) {
        if self.graph.is_empty() {
            empty_state(ui, "This snapshot contains no packages.");
            return;
        }

        match view {
            ViewMode::List => self.draw_list_view(ui),
            ViewMode::Graph => self.draw_graph_view(ui),
            ViewMode::Orphaned => self.draw_orphans_view(ui),
            ViewMode::Investigate => self.draw_investigate_view(ui),
        }
    }
}
