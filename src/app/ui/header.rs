use eframe::egui::{self, Context, RichText, Ui};

use deps_explorer::packages::{GraphInfo, PackageStatus};
use deps_explorer::util::format_timestamp;
use deps_explorer::views::ViewMode;

use super::super::DepsExplorerApp;
use super::widgets::status_dot;

pub(in crate::app) enum HeaderAction {
    SelectFile(String),
    Rescan,
    SwitchView(ViewMode),
}

impl DepsExplorerApp {
    pub(in crate::app) fn draw_header(&self, ctx: &Context) -> Option<HeaderAction> {
        let mut action = None;

        egui::TopBottomPanel::top("header")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.heading("Package Dependency Explorer");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button("⟳")
                            .on_hover_text("Rescan the data directory")
                            .clicked()
                        {
                            action = Some(HeaderAction::Rescan);
                        }
                        if let Some(name) = self.draw_file_selector(ui) {
                            action = Some(HeaderAction::SelectFile(name));
                        }
                    });
                });

                let graph = self.loaded_graph();
                if let Some(info) = graph.and_then(|graph| graph.info()) {
                    draw_system_info(ui, info);
                }

                if let Some(graph) = graph {
                    let counts = graph.counts();
                    ui.horizontal_wrapped(|ui| {
                        ui.label(format!(
                            "{} packages ({} explicit, {} dependencies)",
                            counts.total, counts.explicit, counts.dependency
                        ));
                        ui.add_space(24.0);
                        for (status, label) in [
                            (PackageStatus::Explicit, "Explicit"),
                            (PackageStatus::Dependency, "Dependency"),
                            (PackageStatus::Orphaned, "Orphaned"),
                        ] {
                            status_dot(ui, status);
                            ui.label(label);
                            ui.add_space(12.0);
                        }
                    });
                }

                ui.separator();
                ui.horizontal(|ui| {
                    for mode in ViewMode::ALL {
                        if ui
                            .selectable_label(self.view == mode, mode.tab_label())
                            .clicked()
                        {
                            action = Some(HeaderAction::SwitchView(mode));
                        }
                    }
                });
                ui.add_space(4.0);
            });

        action
    }

    fn draw_file_selector(&self, ui: &mut Ui) -> Option<String> {
        let mut picked = None;
        let selected_text = self
            .selected_file
            .as_deref()
            .unwrap_or("Select a data file...");

        egui::ComboBox::from_id_salt("data_file")
            .width(260.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                if self.files.is_empty() {
                    ui.label(format!("No .json files in {}", self.data_dir.display()));
                }
                for file in &self.files {
                    let current = self.selected_file.as_deref() == Some(file.as_str());
                    if ui.selectable_label(current, file).clicked() && !current {
                        picked = Some(file.clone());
                    }
                }
            });

        picked
    }
}

fn draw_system_info(ui: &mut Ui, info: &GraphInfo) {
    ui.horizontal_wrapped(|ui| {
        for (label, value) in [
            ("OS:", info.os.clone()),
            ("Host:", info.hostname.clone()),
            ("Shell Used:", info.shell.clone()),
            ("Collected On:", format_timestamp(&info.timestamp)),
        ] {
            ui.label(RichText::new(label).strong());
            ui.label(value);
            ui.add_space(16.0);
        }
    });
}
