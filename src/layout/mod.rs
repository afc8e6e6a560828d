//! Force-directed layout for the package graph.
//!
//! One [`ForceSimulation::tick`] applies, in order, link springs, many-body
//! charge (Barnes-Hut), centering and collision, then integrates velocities.
//! The simulation cools from `alpha = 1` towards `alpha_target` and reports
//! itself idle once alpha drops under [`SimulationConfig::alpha_min`].

mod forces;
mod quadtree;
mod viewport;

use std::f32::consts::PI;

use eframe::egui::{Vec2, vec2};

use crate::util::stable_pair;
use forces::{ChargeParams, CollisionParams, Spring};
use quadtree::QuadNode;

pub use viewport::{MAX_ZOOM, MIN_ZOOM, Viewport, ZOOM_STEP};

const LARGE_GRAPH_NODES: usize = 500;
const INITIAL_RADIUS: f32 = 10.0;
const JIGGLE_SCALE: f32 = 1.0e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    pub link_distance: f32,
    pub charge_strength: f32,
    pub theta: f32,
    pub collision_radius: f32,
    pub collision_strength: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
    pub velocity_decay: f32,
    /// Target alpha while a node is being dragged.
    pub drag_alpha_target: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            link_distance: 50.0,
            charge_strength: -100.0,
            theta: 0.9,
            collision_radius: 15.0,
            collision_strength: 1.0,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            drag_alpha_target: 0.3,
        }
    }
}

impl SimulationConfig {
    /// Large graphs cool faster and damp harder.
    pub fn for_node_count(count: usize) -> Self {
        let base = Self::default();
        if count > LARGE_GRAPH_NODES {
            Self {
                alpha_decay: 0.05,
                velocity_decay: 0.6,
                ..base
            }
        } else {
            base
        }
    }
}

pub struct ForceSimulation {
    config: SimulationConfig,
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    pins: Vec<Option<Vec2>>,
    jiggles: Vec<Vec2>,
    springs: Vec<Spring>,
    alpha: f32,
    alpha_target: f32,
}

impl ForceSimulation {
    /// Lays the nodes out on a phyllotaxis spiral. Self-links are ignored.
    pub fn new<S: AsRef<str>>(
        ids: &[S],
        links: &[(usize, usize)],
        config: SimulationConfig,
    ) -> Self {
        let golden_angle = PI * (3.0 - 5.0_f32.sqrt());
        let positions = (0..ids.len())
            .map(|index| {
                let radius = INITIAL_RADIUS * (0.5 + index as f32).sqrt();
                let angle = index as f32 * golden_angle;
                vec2(radius * angle.cos(), radius * angle.sin())
            })
            .collect::<Vec<_>>();

        let jiggles = ids
            .iter()
            .map(|id| {
                let (x, y) = stable_pair(id.as_ref());
                vec2(x, y) * JIGGLE_SCALE
            })
            .collect();

        let links = links
            .iter()
            .copied()
            .filter(|&(source, target)| source != target && source < ids.len() && target < ids.len())
            .collect::<Vec<_>>();

        Self {
            config,
            velocities: vec![Vec2::ZERO; positions.len()],
            pins: vec![None; positions.len()],
            springs: forces::springs(&links, positions.len()),
            positions,
            jiggles,
            alpha: 1.0,
            alpha_target: 0.0,
        }
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn position(&self, index: usize) -> Option<Vec2> {
        self.positions.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_active(&self) -> bool {
        self.alpha >= self.config.alpha_min || self.alpha_target >= self.config.alpha_min
    }

    pub fn is_pinned(&self, index: usize) -> bool {
        self.pins.get(index).is_some_and(Option::is_some)
    }

    /// Advances one step. Returns `false` without doing anything once idle.
    pub fn tick(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
        let alpha = self.alpha;

        forces::apply_springs(
            &self.springs,
            &self.positions,
            &mut self.velocities,
            &self.jiggles,
            self.config.link_distance,
            alpha,
        );

        if let Some(tree) = QuadNode::build(&self.positions) {
            forces::apply_charge(
                &tree,
                &self.positions,
                &mut self.velocities,
                &self.jiggles,
                ChargeParams {
                    strength: self.config.charge_strength,
                    theta: self.config.theta,
                    alpha,
                },
            );
        }

        forces::apply_center(&mut self.positions);

        forces::apply_collision(
            &self.positions,
            &mut self.velocities,
            &self.jiggles,
            CollisionParams {
                radius: self.config.collision_radius,
                strength: self.config.collision_strength,
            },
        );

        let keep = 1.0 - self.config.velocity_decay;
        for ((position, velocity), pin) in self
            .positions
            .iter_mut()
            .zip(&mut self.velocities)
            .zip(&self.pins)
        {
            match pin {
                Some(fixed) => {
                    *position = *fixed;
                    *velocity = Vec2::ZERO;
                }
                None => {
                    *velocity *= keep;
                    *position += *velocity;
                }
            }
        }

        true
    }

    /// Sets alpha and restarts a settled simulation.
    pub fn reheat(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn start_drag(&mut self, index: usize) {
        let Some(&position) = self.positions.get(index) else {
            return;
        };
        self.pins[index] = Some(position);
        self.alpha_target = self.config.drag_alpha_target;
    }

    pub fn drag_to(&mut self, index: usize, world: Vec2) {
        if let Some(pin) = self.pins.get_mut(index) {
            *pin = Some(world);
            self.positions[index] = world;
        }
    }

    pub fn end_drag(&mut self, index: usize) {
        if let Some(pin) = self.pins.get_mut(index) {
            *pin = None;
        }
        self.alpha_target = 0.0;
    }

    /// Index of the node closest to `world` within `radius`.
    pub fn node_at(&self, world: Vec2, radius: f32) -> Option<usize> {
        let radius_sq = radius * radius;
        self.positions
            .iter()
            .enumerate()
            .map(|(index, position)| (index, (*position - world).length_sq()))
            .filter(|&(_, distance_sq)| distance_sq <= radius_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(len: usize) -> ForceSimulation {
        let ids = (0..len).map(|i| format!("pkg{i}")).collect::<Vec<_>>();
        let links = (1..len).map(|i| (i - 1, i)).collect::<Vec<_>>();
        ForceSimulation::new(&ids, &links, SimulationConfig::for_node_count(len))
    }

    #[test]
    fn default_config_matches_d3_defaults() {
        let config = SimulationConfig::default();
        assert!((config.alpha_decay - 0.0228).abs() < 1e-3);
        assert_eq!(config.velocity_decay, 0.4);

        let large = SimulationConfig::for_node_count(501);
        assert_eq!(large.alpha_decay, 0.05);
        assert_eq!(large.velocity_decay, 0.6);
        assert_eq!(SimulationConfig::for_node_count(500), config);
    }

    #[test]
    fn initial_layout_is_a_spiral() {
        let sim = chain(3);
        let first = sim.position(0).unwrap();
        assert!((first.length() - INITIAL_RADIUS * 0.5_f32.sqrt()).abs() < 1e-4);
        assert!(first.y.abs() < 1e-4);
        assert!(sim.position(2).unwrap().length() > sim.position(1).unwrap().length());
    }

    #[test]
    fn cools_down_to_idle() {
        let mut sim = chain(12);
        let mut ticks = 0;
        while sim.tick() {
            ticks += 1;
            assert!(ticks < 1_000, "simulation never settled");
        }
        assert!(!sim.is_active());
        assert!(ticks > 200);
        assert!(sim.positions().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn linked_nodes_settle_near_link_distance() {
        let mut sim = chain(2);
        while sim.tick() {}
        let distance = (sim.position(0).unwrap() - sim.position(1).unwrap()).length();
        assert!(distance > 30.0 && distance < 120.0, "distance was {distance}");
    }

    #[test]
    fn dragged_node_stays_pinned_and_keeps_simulation_warm() {
        let mut sim = chain(6);
        for _ in 0..400 {
            sim.tick();
        }
        assert!(!sim.is_active());

        sim.start_drag(2);
        assert!(sim.is_active());
        assert!(sim.is_pinned(2));
        let target = vec2(300.0, -120.0);
        sim.drag_to(2, target);
        for _ in 0..50 {
            assert!(sim.tick());
        }
        assert_eq!(sim.position(2), Some(target));
        assert!(sim.alpha() > 0.1);

        sim.end_drag(2);
        assert!(!sim.is_pinned(2));
        let mut ticks = 0;
        while sim.tick() {
            ticks += 1;
            assert!(ticks < 1_000);
        }
    }

    #[test]
    fn reheat_restarts_a_settled_simulation() {
        let mut sim = chain(4);
        while sim.tick() {}
        sim.reheat(0.5);
        assert!(sim.tick());
        assert!(sim.alpha() < 0.5);
    }

    #[test]
    fn self_links_are_ignored() {
        let mut sim = ForceSimulation::new(&["a", "b"], &[(0, 0), (0, 1)], SimulationConfig::default());
        while sim.tick() {}
        assert!(sim.positions().iter().all(|p| p.x.is_finite()));
    }

    #[test]
    fn node_at_picks_closest_within_radius() {
        let sim = chain(3);
        let p1 = sim.position(1).unwrap();
        assert_eq!(sim.node_at(p1 + vec2(0.5, 0.0), 3.0), Some(1));
        assert_eq!(sim.node_at(vec2(10_000.0, 0.0), 3.0), None);
    }

    #[test]
    fn empty_graph_is_harmless() {
        let ids: [&str; 0] = [];
        let mut sim = ForceSimulation::new(&ids, &[], SimulationConfig::default());
        assert!(sim.is_empty());
        while sim.tick() {}
    }
}
