use eframe::egui::{Pos2, Rect, Vec2};

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 10.0;
pub const ZOOM_STEP: f32 = 0.2;

/// Pan and zoom of the graph canvas. The world origin sits at the canvas
/// center shifted by `pan`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub pan: Vec2,
    zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Zooms about the canvas center.
    pub fn set_zoom(&mut self, zoom: f32) {
        let next = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan *= next / self.zoom;
        self.zoom = next;
    }

    /// Zooms by `factor` keeping the world point under `pointer` still.
    pub fn zoom_at(&mut self, rect: Rect, pointer: Pos2, factor: f32) {
        let anchor = self.screen_to_world(rect, pointer);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = pointer - rect.center() - anchor * self.zoom;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn world_to_screen(&self, rect: Rect, world: Vec2) -> Pos2 {
        rect.center() + self.pan + world * self.zoom
    }

    pub fn screen_to_world(&self, rect: Rect, screen: Pos2) -> Vec2 {
        (screen - rect.center() - self.pan) / self.zoom
    }

    /// Centers the view on `world` without changing zoom.
    pub fn focus(&mut self, world: Vec2) {
        self.pan = -world * self.zoom;
    }
}
