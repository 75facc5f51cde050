//! Scenario files describing the initial state of a system.
//!
//! ```yaml
//! gravity: 1.0            # gravitational constant
//! min_distance: 1.0e-6    # separation clamp
//! trail_length: 240       # positions kept per trail
//!
//! bodies:
//!   - name: Lumen
//!     mass: 450000.0
//!     position: [0.0, 0.0]
//!     color: [255, 255, 200]
//!     radius: 50.0
//!   - name: Nisse
//!     mass: 45.0
//!     position: [-500.0, 0.0]
//!     velocity: [0.0, 30.0]  # defaults to rest
//!     color: [53, 30, 41]
//!     radius: 10.0
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use macroquad::color::Color;
use serde::Deserialize;
use ultraviolet::DVec2;

use crate::{
    error::PhysicsError,
    physics::{Body, GRAVITY, MIN_DISTANCE},
    simulation::Simulation,
};

pub const DEFAULT_TRAIL_LENGTH: usize = 240;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub mass: f64,
    pub position: [f64; 2],
    #[serde(default)]
    pub velocity: [f64; 2],
    pub color: [u8; 3],
    pub radius: f64,
}

impl BodyConfig {
    pub fn build(&self) -> Result<Body, PhysicsError> {
        let [r, g, b] = self.color;

        Body::new(
            self.name.clone(),
            self.mass,
            DVec2::from(self.position),
            DVec2::from(self.velocity),
            self.radius,
            Color::from_rgba(r, g, b, 255),
        )
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    #[serde(default = "default_min_distance")]
    pub min_distance: f64,
    #[serde(default = "default_trail_length")]
    pub trail_length: usize,
    pub bodies: Vec<BodyConfig>,
}

fn default_gravity() -> f64 {
    GRAVITY
}

fn default_min_distance() -> f64 {
    MIN_DISTANCE
}

fn default_trail_length() -> usize {
    DEFAULT_TRAIL_LENGTH
}

impl Default for ScenarioConfig {
    /// A light planet on a circular orbit around a heavy star.
    fn default() -> Self {
        let star_mass = 450000.0;
        let orbit = 500.0;

        Self {
            gravity: GRAVITY,
            min_distance: MIN_DISTANCE,
            trail_length: DEFAULT_TRAIL_LENGTH,
            bodies: vec![
                BodyConfig {
                    name: "Lumen".to_string(),
                    mass: star_mass,
                    position: [0.0, 0.0],
                    velocity: [0.0, 0.0],
                    color: [255, 255, 200],
                    radius: 50.0,
                },
                BodyConfig {
                    name: "Nisse".to_string(),
                    mass: 45.0,
                    position: [-orbit, 0.0],
                    velocity: [0.0, f64::sqrt(GRAVITY * star_mass / orbit)],
                    color: [0x35, 0x1e, 0x29],
                    radius: 10.0,
                },
            ],
        }
    }
}

impl ScenarioConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_yaml::from_reader(reader).context("failed to parse scenario")
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open scenario {}", path.display()))?;

        let scenario = Self::from_reader(BufReader::new(file))
            .with_context(|| format!("in {}", path.display()))?;

        log::info!(
            "loaded scenario {} with {} bodies",
            path.display(),
            scenario.bodies.len()
        );

        Ok(scenario)
    }

    /// Builds the simulation, failing on the first invalid body.
    pub fn build(&self) -> Result<Simulation, PhysicsError> {
        let mut simulation = Simulation::new()
            .with_gravity(self.gravity)?
            .with_min_distance(self.min_distance)?;

        for body in &self.bodies {
            simulation.push(body.build()?);
        }

        Ok(simulation)
    }
}
