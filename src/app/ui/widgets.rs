use eframe::egui::{self, Color32, Response, RichText, Sense, Ui, vec2};

use deps_explorer::packages::{PackageNode, PackageStatus};

use super::super::render_utils::status_color;

pub(in crate::app) const ROW_HEIGHT: f32 = 40.0;
const HIGHLIGHT_FILL: Color32 = Color32::from_rgb(40, 62, 44);

pub(in crate::app) fn empty_state(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(RichText::new(message).size(17.0).color(Color32::from_gray(160)));
    });
}

pub(in crate::app) fn loading_state(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.35);
        ui.spinner();
        ui.add_space(8.0);
        ui.label(RichText::new("Loading package data...").size(17.0));
    });
}

pub(in crate::app) fn error_state(ui: &mut Ui, error: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.3);
        egui::Frame::new()
            .fill(Color32::from_rgb(60, 24, 24))
            .corner_radius(4.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_max_width(480.0);
                let red = Color32::from_rgb(248, 113, 113);
                ui.label(RichText::new("Error loading data").strong().color(red));
                ui.label(RichText::new(error).color(red));
                ui.add_space(8.0);
                ui.small("Make sure JSON files exist in the data directory.");
            });
    });
}

pub(in crate::app) fn status_dot(ui: &mut Ui, status: PackageStatus) -> Response {
    let (rect, response) = ui.allocate_exact_size(vec2(10.0, 10.0), Sense::hover());
    ui.painter()
        .circle_filled(rect.center(), 4.0, status_color(status));
    response.on_hover_text(status.label())
}

/// Clickable two-line package row. Returns `true` when clicked.
pub(in crate::app) fn package_row(
    ui: &mut Ui,
    node: &PackageNode,
    caption: &str,
    highlighted: bool,
    show_status: bool,
) -> bool {
    let fill = if highlighted {
        HIGHLIGHT_FILL
    } else {
        ui.visuals().faint_bg_color
    };

    let response = egui::Frame::new()
        .fill(fill)
        .corner_radius(3.0)
        .inner_margin(egui::Margin::symmetric(8, 3))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&node.id).strong());
                        ui.label(RichText::new(&node.version).small().weak());
                    });
                    if !caption.is_empty() {
                        ui.label(RichText::new(caption).small().italics().weak());
                    }
                });
                if show_status {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        status_dot(ui, node.status());
                    });
                }
            });
        })
        .response
        .interact(Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    response.clicked()
}

/// Search box with a placeholder, filling the available width.
pub(in crate::app) fn search_box(ui: &mut Ui, query: &mut String, hint: &str) -> Response {
    ui.add(
        egui::TextEdit::singleline(query)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    )
}

/// Virtualised list of `rows` package rows.
pub(in crate::app) fn package_rows<F>(ui: &mut Ui, id_salt: &str, rows: usize, mut add_row: F)
where
    F: FnMut(&mut Ui, usize),
{
    egui::ScrollArea::vertical()
        .id_salt(id_salt)
        .auto_shrink([false, false])
        .show_rows(ui, ROW_HEIGHT, rows, |ui, range| {
            for index in range {
                add_row(ui, index);
            }
        });
}
