use itertools::Itertools;
use ultraviolet::DVec2;

use crate::{
    error::PhysicsError,
    physics::{Body, GRAVITY, MIN_DISTANCE},
};

/// Owns the bodies and advances them with a two-pass Euler-Cromer step.
#[derive(Debug, Clone)]
pub struct Simulation {
    bodies: Vec<Body>,
    gravity: f64,
    min_distance: f64,
    time: f64,
    steps: u64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            gravity: GRAVITY,
            min_distance: MIN_DISTANCE,
            time: 0.0,
            steps: 0,
        }
    }

    pub fn with_gravity(mut self, gravity: f64) -> Result<Self, PhysicsError> {
        if !gravity.is_finite() {
            return Err(PhysicsError::invalid("gravity", gravity));
        }

        self.gravity = gravity;
        Ok(self)
    }

    pub fn with_min_distance(mut self, min_distance: f64) -> Result<Self, PhysicsError> {
        if !(min_distance > 0.0) || !min_distance.is_finite() {
            return Err(PhysicsError::invalid("min_distance", min_distance));
        }

        self.min_distance = min_distance;
        Ok(self)
    }

    /// Appends a body and returns its index.
    pub fn push(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Signed simulated time; decreases while running in reverse.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Advances every body by `dt`, which may be zero or negative.
    ///
    /// All velocities are updated from the pre-step positions before any
    /// position moves, so the result does not depend on body order.
    pub fn step(&mut self, dt: f64) {
        if !dt.is_finite() {
            log::warn!("ignoring non-finite time step {}", dt);
            return;
        }

        let (g, min_distance) = (self.gravity, self.min_distance);

        // Kick
        for i in 0..self.bodies.len() {
            let (before, rest) = self.bodies.split_at_mut(i);

            if let Some((body, after)) = rest.split_first_mut() {
                body.update_velocity(dt, before.iter().chain(after.iter()), g, min_distance);
            }
        }

        // Drift
        for body in &mut self.bodies {
            body.update_position(dt);
        }

        self.time += dt;
        self.steps += 1;

        log::trace!("step {} dt={} t={}", self.steps, dt, self.time);
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .map(|body| 0.5 * body.mass() * body.vel().mag_sq())
            .sum()
    }

    pub fn potential_energy(&self) -> f64 {
        self.bodies
            .iter()
            .tuple_combinations()
            .map(|(a, b)| {
                let distance = a.distance_to(b).max(self.min_distance);
                -self.gravity * a.mass() * b.mass() / distance
            })
            .sum()
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    pub fn momentum(&self) -> DVec2 {
        self.bodies
            .iter()
            .fold(DVec2::zero(), |total, body| total + body.vel() * body.mass())
    }

    /// Mass-weighted centre of all bodies, `None` when empty.
    pub fn barycenter(&self) -> Option<DVec2> {
        if self.bodies.is_empty() {
            return None;
        }

        let mass: f64 = self.bodies.iter().map(Body::mass).sum();

        let weighted = self
            .bodies
            .iter()
            .fold(DVec2::zero(), |total, body| total + body.pos() * body.mass());

        Some(weighted / mass)
    }
}
