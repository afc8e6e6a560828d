use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadNode;

const MIN_DISTANCE_SQ: f32 = 1.0;

/// Spring between a package and one of its dependencies.
#[derive(Clone, Copy, Debug)]
pub(super) struct Spring {
    pub(super) source: usize,
    pub(super) target: usize,
    pub(super) strength: f32,
    /// Share of the correction taken by the target.
    pub(super) bias: f32,
}

/// Builds springs with strength `1 / min(deg)` and degree-proportional bias.
pub(super) fn springs(links: &[(usize, usize)], node_count: usize) -> Vec<Spring> {
    let mut degree = vec![0usize; node_count];
    for &(source, target) in links {
        degree[source] += 1;
        degree[target] += 1;
    }

    links
        .iter()
        .map(|&(source, target)| {
            let (ds, dt) = (degree[source] as f32, degree[target] as f32);
            Spring {
                source,
                target,
                strength: 1.0 / ds.min(dt),
                bias: ds / (ds + dt),
            }
        })
        .collect()
}

fn separation(jiggles: &[Vec2], a: usize, b: usize) -> Vec2 {
    let nudge = jiggles[a] - jiggles[b];
    if nudge == Vec2::ZERO {
        vec2(1.0e-6, 0.0)
    } else {
        nudge
    }
}

fn soften(distance_sq: f32) -> f32 {
    if distance_sq < MIN_DISTANCE_SQ {
        (MIN_DISTANCE_SQ * distance_sq).sqrt()
    } else {
        distance_sq
    }
}

pub(super) fn apply_springs(
    springs: &[Spring],
    positions: &[Vec2],
    velocities: &mut [Vec2],
    jiggles: &[Vec2],
    distance: f32,
    alpha: f32,
) {
    for spring in springs {
        let (s, t) = (spring.source, spring.target);
        let mut delta = (positions[t] + velocities[t]) - (positions[s] + velocities[s]);
        if delta == Vec2::ZERO {
            delta = separation(jiggles, t, s);
        }

        let length = delta.length();
        let correction = delta * ((length - distance) / length * alpha * spring.strength);
        velocities[t] -= correction * spring.bias;
        velocities[s] += correction * (1.0 - spring.bias);
    }
}

#[derive(Clone, Copy)]
pub(super) struct ChargeParams {
    pub(super) strength: f32,
    pub(super) theta: f32,
    pub(super) alpha: f32,
}

pub(super) fn apply_charge(
    tree: &QuadNode,
    positions: &[Vec2],
    velocities: &mut [Vec2],
    jiggles: &[Vec2],
    params: ChargeParams,
) {
    for (index, velocity) in velocities.iter_mut().enumerate() {
        charge_on(tree, index, positions, jiggles, params, velocity);
    }
}

fn charge_on(
    cell: &QuadNode,
    index: usize,
    positions: &[Vec2],
    jiggles: &[Vec2],
    params: ChargeParams,
    velocity: &mut Vec2,
) {
    if cell.mass <= 0.0 {
        return;
    }

    let point = positions[index];

    if cell.is_leaf() {
        for &other in &cell.indices {
            if other == index {
                continue;
            }
            let mut delta = positions[other] - point;
            if delta == Vec2::ZERO {
                delta = separation(jiggles, other, index);
            }
            *velocity += delta * (params.strength * params.alpha / soften(delta.length_sq()));
        }
        return;
    }

    let delta = cell.center_of_mass - point;
    let distance_sq = delta.length_sq();
    let far_enough = cell.bounds.side().powi(2) < distance_sq * params.theta * params.theta;
    if far_enough && !cell.bounds.contains(point) {
        *velocity += delta * (params.strength * cell.mass * params.alpha / soften(distance_sq));
        return;
    }

    for child in cell.children() {
        charge_on(child, index, positions, jiggles, params, velocity);
    }
}

/// Shifts every position so the mean sits at the origin.
pub(super) fn apply_center(positions: &mut [Vec2]) {
    if positions.is_empty() {
        return;
    }

    let mean = positions.iter().fold(Vec2::ZERO, |sum, p| sum + *p) / positions.len() as f32;
    for position in positions {
        *position -= mean;
    }
}

#[derive(Clone, Copy)]
pub(super) struct CollisionParams {
    pub(super) radius: f32,
    pub(super) strength: f32,
}

/// Pushes apart nodes whose next positions would overlap.
pub(super) fn apply_collision(
    positions: &[Vec2],
    velocities: &mut [Vec2],
    jiggles: &[Vec2],
    params: CollisionParams,
) {
    let predicted = positions
        .iter()
        .zip(velocities.iter())
        .map(|(position, velocity)| *position + *velocity)
        .collect::<Vec<_>>();

    if let Some(tree) = QuadNode::build(&predicted) {
        collide_cells(&tree, &tree, true, &predicted, jiggles, params, velocities);
    }
}

fn collide_pair(
    from: usize,
    to: usize,
    predicted: &[Vec2],
    jiggles: &[Vec2],
    params: CollisionParams,
    velocities: &mut [Vec2],
) {
    let diameter = params.radius * 2.0;
    let mut delta = predicted[from] - predicted[to];
    if delta.length_sq() >= diameter * diameter {
        return;
    }
    if delta == Vec2::ZERO {
        delta = separation(jiggles, from, to);
    }

    let distance = delta.length();
    // equal radii split the push evenly
    let impulse = delta * ((diameter - distance) / distance * params.strength * 0.5);
    velocities[from] += impulse;
    velocities[to] -= impulse;
}

fn collide_cells(
    a: &QuadNode,
    b: &QuadNode,
    same_cell: bool,
    predicted: &[Vec2],
    jiggles: &[Vec2],
    params: CollisionParams,
    velocities: &mut [Vec2],
) {
    let diameter = params.radius * 2.0;
    if a.bounds.gap_sq(b.bounds) > diameter * diameter {
        return;
    }

    if a.is_leaf() && b.is_leaf() {
        if same_cell {
            for (i, &from) in a.indices.iter().enumerate() {
                for &to in &a.indices[i + 1..] {
                    collide_pair(from, to, predicted, jiggles, params, velocities);
                }
            }
        } else {
            for &from in &a.indices {
                for &to in &b.indices {
                    collide_pair(from, to, predicted, jiggles, params, velocities);
                }
            }
        }
        return;
    }

    if same_cell {
        let children = a.children().collect::<Vec<_>>();
        for (i, first) in children.iter().enumerate() {
            collide_cells(first, first, true, predicted, jiggles, params, velocities);
            for second in &children[i + 1..] {
                collide_cells(first, second, false, predicted, jiggles, params, velocities);
            }
        }
        return;
    }

    let split_a = !a.is_leaf() && (b.is_leaf() || a.bounds.half_extent >= b.bounds.half_extent);
    if split_a {
        for child in a.children() {
            collide_cells(child, b, false, predicted, jiggles, params, velocities);
        }
    } else {
        for child in b.children() {
            collide_cells(a, child, false, predicted, jiggles, params, velocities);
        }
    }
}
