use std::collections::{HashMap, HashSet};

use eframe::egui::{
    self, Align2, Color32, CursorIcon, FontId, PointerButton, Pos2, Rect, Sense, Stroke, Ui, vec2,
};

use deps_explorer::layout::{ForceSimulation, MAX_ZOOM, MIN_ZOOM, SimulationConfig, Viewport};
use deps_explorer::packages::{LinkKind, PackageGraph, PackageNode, SubGraph};

use super::render_utils::{
    blend_color, circle_visible, dim_color, draw_background, edge_visible, link_color,
    status_color,
};

const NODE_RADIUS: f32 = 6.0;
const ROOT_SCALE: f32 = 1.67;
const SELECTED_RING: Color32 = Color32::from_rgb(250, 204, 21);

/// Interactive force-directed drawing of a set of packages.
///
/// Node indices are local to the canvas; `nodes` maps them back into the
/// package graph.
pub(super) struct GraphCanvas {
    nodes: Vec<usize>,
    local_by_graph: HashMap<usize, usize>,
    links: Vec<(usize, usize, LinkKind)>,
    simulation: ForceSimulation,
    viewport: Viewport,
    root: Option<usize>,
    selected: Option<usize>,
    dragging: Option<usize>,
    color_links_by_kind: bool,
}

impl GraphCanvas {
    pub(super) fn full(graph: &PackageGraph) -> Self {
        let nodes = (0..graph.node_count()).collect::<Vec<_>>();
        let links = graph
            .links()
            .iter()
            .map(|link| (link.source, link.target, link.kind))
            .collect();
        Self::build(graph, nodes, links, None, false)
    }

    /// Canvas over one dependency tree with `root_id` drawn enlarged.
    pub(super) fn tree(graph: &PackageGraph, tree: &SubGraph, root_id: &str) -> Self {
        let local_by_graph = tree
            .nodes
            .iter()
            .enumerate()
            .map(|(local, &index)| (index, local))
            .collect::<HashMap<_, _>>();
        let links = tree
            .links
            .iter()
            .filter_map(|link| {
                Some((
                    *local_by_graph.get(&link.source)?,
                    *local_by_graph.get(&link.target)?,
                    link.kind,
                ))
            })
            .collect();
        let root = graph
            .index_of(root_id)
            .and_then(|index| local_by_graph.get(&index).copied());
        Self::build(graph, tree.nodes.clone(), links, root, true)
    }

    fn build(
        graph: &PackageGraph,
        nodes: Vec<usize>,
        links: Vec<(usize, usize, LinkKind)>,
        root: Option<usize>,
        color_links_by_kind: bool,
    ) -> Self {
        let ids = nodes
            .iter()
            .filter_map(|&index| graph.node_at(index).map(|node| node.id.as_str()))
            .collect::<Vec<_>>();
        let pairs = links
            .iter()
            .map(|&(source, target, _)| (source, target))
            .collect::<Vec<_>>();
        let simulation =
            ForceSimulation::new(&ids, &pairs, SimulationConfig::for_node_count(ids.len()));
        tracing::debug!(nodes = ids.len(), links = pairs.len(), "built graph canvas");

        Self {
            local_by_graph: nodes
                .iter()
                .enumerate()
                .map(|(local, &index)| (index, local))
                .collect(),
            nodes,
            links,
            simulation,
            viewport: Viewport::default(),
            root,
            selected: None,
            dragging: None,
            color_links_by_kind,
        }
    }

    pub(super) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(super) fn selected_node<'g>(&self, graph: &'g PackageGraph) -> Option<&'g PackageNode> {
        self.selected
            .and_then(|local| self.nodes.get(local))
            .and_then(|&index| graph.node_at(index))
    }

    /// Selects `id` if it is drawn on this canvas.
    pub(super) fn select_id(&mut self, graph: &PackageGraph, id: &str) -> bool {
        let Some(local) = graph
            .index_of(id)
            .and_then(|index| self.local_by_graph.get(&index).copied())
        else {
            return false;
        };
        self.selected = Some(local);
        true
    }

    pub(super) fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Centers the view on the selected node.
    pub(super) fn focus_selected(&mut self) {
        if let Some(position) = self.selected.and_then(|local| self.simulation.position(local)) {
            self.viewport.focus(position);
        }
    }

    pub(super) fn show(&mut self, ui: &mut Ui, graph: &PackageGraph, matches: Option<&HashSet<usize>>) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.simulation.tick();

        self.handle_zoom(ui, rect, &response);
        let hovered = self.hovered_index(ui, rect);
        self.handle_drag(ui, rect, &response, hovered);

        if response.clicked_by(PointerButton::Primary)
            && let Some(index) = hovered
        {
            self.selected = Some(index);
        }

        if hovered.is_some() || self.dragging.is_some() {
            ui.ctx().set_cursor_icon(if self.dragging.is_some() {
                CursorIcon::Grabbing
            } else {
                CursorIcon::PointingHand
            });
        }

        draw_background(&painter, rect, self.viewport.pan, self.viewport.zoom());
        self.draw_links(&painter, rect);
        self.draw_nodes(&painter, rect, graph, hovered, matches);

        if let Some(node) = hovered
            .and_then(|local| self.nodes.get(local))
            .and_then(|&index| graph.node_at(index))
        {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}  v{}", node.id, node.version),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        self.draw_zoom_controls(ui, rect);

        if self.simulation.is_active() || self.dragging.is_some() {
            ui.ctx().request_repaint();
        }
    }

    fn screen_radius(&self, local: usize) -> f32 {
        let scale = if self.root == Some(local) { ROOT_SCALE } else { 1.0 };
        (NODE_RADIUS * scale * self.viewport.zoom()).max(1.0)
    }

    fn screen_position(&self, rect: Rect, local: usize) -> Option<Pos2> {
        self.simulation
            .position(local)
            .map(|world| self.viewport.world_to_screen(rect, world))
    }

    fn handle_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let factor = (1.0 + (scroll * 0.002)).clamp(0.85, 1.15);
        self.viewport.zoom_at(rect, pointer, factor);
    }

    fn hovered_index(&self, ui: &Ui, rect: Rect) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !rect.contains(pointer) {
            return None;
        }

        (0..self.nodes.len())
            .filter_map(|local| {
                let position = self.screen_position(rect, local)?;
                let distance = position.distance(pointer);
                (distance <= self.screen_radius(local) + 2.0).then_some((local, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(local, _)| local)
    }

    fn handle_drag(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
        hovered: Option<usize>,
    ) {
        if response.drag_started_by(PointerButton::Primary)
            && let Some(local) = hovered
        {
            self.dragging = Some(local);
            self.simulation.start_drag(local);
        }

        if let Some(local) = self.dragging {
            if response.dragged_by(PointerButton::Primary)
                && let Some(pointer) = ui.input(|input| input.pointer.interact_pos())
            {
                let world = self.viewport.screen_to_world(rect, pointer);
                self.simulation.drag_to(local, world);
            }

            if response.drag_stopped() || !ui.input(|input| input.pointer.primary_down()) {
                self.simulation.end_drag(local);
                self.dragging = None;
            }
            return;
        }

        if response.dragged_by(PointerButton::Primary)
            || response.dragged_by(PointerButton::Secondary)
            || response.dragged_by(PointerButton::Middle)
        {
            self.viewport.pan += response.drag_delta();
        }
    }

    fn draw_links(&self, painter: &egui::Painter, rect: Rect) {
        let width = (1.0 * self.viewport.zoom().sqrt()).clamp(0.5, 2.5);

        for &(source, target, kind) in &self.links {
            let (Some(start), Some(end)) = (
                self.screen_position(rect, source),
                self.screen_position(rect, target),
            ) else {
                continue;
            };
            if !edge_visible(rect, start, end, 2.0) {
                continue;
            }

            let touches_selection =
                self.selected.is_some_and(|selected| selected == source || selected == target);
            let base = link_color(self.color_links_by_kind.then_some(kind));
            let (line_width, color) = if touches_selection {
                (width * 2.0, blend_color(base, SELECTED_RING, 0.6))
            } else if self.selected.is_some() {
                (width, dim_color(base, 0.6))
            } else {
                (width, base)
            };

            painter.line_segment([start, end], Stroke::new(line_width, color));
        }
    }

    fn draw_nodes(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        graph: &PackageGraph,
        hovered: Option<usize>,
        matches: Option<&HashSet<usize>>,
    ) {
        let zoom = self.viewport.zoom();

        for (local, &index) in self.nodes.iter().enumerate() {
            let Some(node) = graph.node_at(index) else {
                continue;
            };
            let Some(position) = self.screen_position(rect, local) else {
                continue;
            };
            let radius = self.screen_radius(local);
            if !circle_visible(rect, position, radius + 4.0) {
                continue;
            }

            let is_match = matches.is_some_and(|matches| matches.contains(&index));
            let base = status_color(node.status());
            let color = match matches {
                Some(_) if !is_match => dim_color(base, 0.35),
                _ => base,
            };

            painter.circle_filled(position, radius, color);
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 255, 255, 160)),
            );

            let is_root = self.root == Some(local);
            let is_selected = self.selected == Some(local);
            if is_root {
                painter.circle_stroke(position, radius + 2.0, Stroke::new(2.0, Color32::WHITE));
            }
            if is_selected {
                painter.circle_stroke(position, radius + 3.5, Stroke::new(2.5, SELECTED_RING));
            }
            if is_match {
                painter.circle_stroke(
                    position,
                    radius + 2.5,
                    Stroke::new(1.5, Color32::from_rgb(103, 196, 255)),
                );
            }

            let show_label =
                is_root || is_selected || hovered == Some(local) || is_match || zoom > 1.6;
            if show_label {
                painter.text(
                    position + vec2(radius + 4.0, 0.0),
                    Align2::LEFT_CENTER,
                    node.id.as_str(),
                    FontId::proportional(11.0),
                    Color32::from_gray(230),
                );
            }
        }
    }

    fn draw_zoom_controls(&mut self, ui: &Ui, rect: Rect) {
        let viewport = &mut self.viewport;
        let simulation = &mut self.simulation;

        egui::Area::new(ui.id().with("zoom_controls"))
            .order(egui::Order::Foreground)
            .pivot(Align2::LEFT_BOTTOM)
            .fixed_pos(rect.left_bottom() + vec2(16.0, -16.0))
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(180.0);
                    ui.vertical_centered(|ui| {
                        ui.strong(format!("{}%", viewport.zoom_percent()));
                    });

                    ui.horizontal(|ui| {
                        let zoom = viewport.zoom();
                        if ui
                            .add_enabled(zoom > MIN_ZOOM, egui::Button::new("−"))
                            .on_hover_text("Zoom out")
                            .clicked()
                        {
                            viewport.zoom_out();
                        }
                        if ui.button("Reset").on_hover_text("Reset zoom").clicked() {
                            viewport.reset();
                        }
                        if ui
                            .add_enabled(zoom < MAX_ZOOM, egui::Button::new("+"))
                            .on_hover_text("Zoom in")
                            .clicked()
                        {
                            viewport.zoom_in();
                        }
                    });

                    let mut zoom = viewport.zoom();
                    let slider = egui::Slider::new(&mut zoom, MIN_ZOOM..=MAX_ZOOM)
                        .logarithmic(true)
                        .show_value(false);
                    if ui.add(slider).changed() {
                        viewport.set_zoom(zoom);
                    }

                    ui.vertical_centered(|ui| {
                        if ui
                            .button("Re-run layout")
                            .on_hover_text("Restart the force simulation")
                            .clicked()
                        {
                            tracing::debug!(nodes = simulation.len(), "reheating layout");
                            simulation.reheat(1.0);
                        }
                    });
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deps_explorer::packages::parse_graph_document;

    fn graph() -> PackageGraph {
        let raw = r#"{"nodes": {
            "git": {"explicit": true, "depends_on": ["curl", "perl", "missing"]},
            "curl": {"depends_on": ["openssl"], "required_by": ["git"]},
            "openssl": {"required_by": ["curl"]},
            "perl": {"required_by": ["git"]},
            "htop": {"explicit": true}
        }}"#;
        PackageGraph::from_document(parse_graph_document(raw).unwrap())
    }

    #[test]
    fn full_canvas_can_select_every_package() {
        let graph = graph();
        let mut canvas = GraphCanvas::full(&graph);
        assert_eq!(canvas.node_count(), graph.node_count());

        for node in graph.nodes() {
            assert!(canvas.select_id(&graph, &node.id), "{} not on canvas", node.id);
            assert_eq!(canvas.selected_node(&graph).map(|n| n.id.as_str()), Some(node.id.as_str()));
        }
        assert!(!canvas.select_id(&graph, "missing"));
    }

    #[test]
    fn tree_canvas_only_holds_the_subgraph() {
        let graph = graph();
        let tree = graph.subgraph("curl");
        let mut canvas = GraphCanvas::tree(&graph, &tree, "curl");

        assert_eq!(canvas.node_count(), 2);
        assert_eq!(canvas.root, graph.index_of("curl").and_then(|i| canvas.local_by_graph.get(&i).copied()));
        assert!(canvas.select_id(&graph, "openssl"));
        assert!(!canvas.select_id(&graph, "git"));

        canvas.clear_selection();
        assert!(canvas.selected_node(&graph).is_none());
    }
}
