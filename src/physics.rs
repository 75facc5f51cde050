use macroquad::color::Color;
use ultraviolet::DVec2;

use crate::error::PhysicsError;

/// Gravitational constant of the unitless default system.
pub const GRAVITY: f64 = 1.0;

/// Separations below this are clamped before the inverse-square falloff.
pub const MIN_DISTANCE: f64 = 1e-6;

pub trait Position {
    fn pos(&self) -> DVec2;
}

pub trait Affect {
    type Subject;

    /// Force `self` exerts on `other`.
    fn effect_on(&self, other: &Self::Subject, g: f64, min_distance: f64) -> DVec2;
}

/// A point mass drawn as a disc.
#[derive(Debug, Clone)]
pub struct Body {
    name: String,
    mass: f64,
    pos: DVec2,
    vel: DVec2,
    acc: DVec2,
    radius: f64,
    color: Color,
}

impl Body {
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        pos: DVec2,
        vel: DVec2,
        radius: f64,
        color: Color,
    ) -> Result<Self, PhysicsError> {
        // Also catches NaN
        if !(mass > 0.0) || !mass.is_finite() {
            return Err(PhysicsError::invalid("mass", mass));
        }

        if !radius.is_finite() || radius < 0.0 {
            return Err(PhysicsError::invalid("radius", radius));
        }

        for (parameter, value) in [
            ("position.x", pos.x),
            ("position.y", pos.y),
            ("velocity.x", vel.x),
            ("velocity.y", vel.y),
        ] {
            if !value.is_finite() {
                return Err(PhysicsError::invalid(parameter, value));
            }
        }

        Ok(Self {
            name: name.into(),
            mass,
            pos,
            vel,
            acc: DVec2::zero(),
            radius,
            color,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Acceleration from the most recent velocity update.
    pub fn acc(&self) -> DVec2 {
        self.acc
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    pub fn vel(&self) -> DVec2 {
        self.vel
    }

    pub fn speed(&self) -> f64 {
        self.vel.mag()
    }

    pub fn distance_to(&self, other: &impl Position) -> f64 {
        (self.pos - other.pos()).mag()
    }

    /// Net gravitational force on `self` from `peers`.
    ///
    /// `peers` may contain `self`; it is skipped by identity, so two distinct
    /// bodies that happen to look alike still attract each other.
    pub fn gravity_from<'a, I>(&self, peers: I, g: f64, min_distance: f64) -> DVec2
    where
        I: IntoIterator<Item = &'a Body>,
    {
        peers
            .into_iter()
            .filter(|peer| !core::ptr::eq(*peer, self))
            .fold(DVec2::zero(), |total, peer| {
                saturate(total + peer.effect_on(self, g, min_distance))
            })
    }

    /// Explicit Euler kick: `v += F / m * dt`, with `F` taken from the current
    /// positions of `peers`.
    pub fn update_velocity<'a, I>(&mut self, dt: f64, peers: I, g: f64, min_distance: f64)
    where
        I: IntoIterator<Item = &'a Body>,
    {
        let force = self.gravity_from(peers, g, min_distance);
        self.acc = force / self.mass;
        self.vel += self.acc * dt;
    }

    pub fn update_position(&mut self, dt: f64) {
        self.pos += self.vel * dt;
    }
}

impl Position for Body {
    fn pos(&self) -> DVec2 {
        self.pos
    }
}

impl Affect for Body {
    type Subject = Self;

    fn effect_on(&self, other: &Self::Subject, g: f64, min_distance: f64) -> DVec2 {
        let displacement = self.pos - other.pos;
        let mag_sq = displacement.mag_sq();

        // Coincident bodies have no defined direction
        if mag_sq == 0.0 {
            return DVec2::zero();
        }

        let distance = mag_sq.sqrt().max(min_distance);

        // Divide first so large masses at small separations saturate instead of overflowing
        let magnitude = g * (other.mass / distance) * (self.mass / distance);

        saturate(displacement.normalized() * magnitude.clamp(-f64::MAX, f64::MAX))
    }
}

/// Clamps infinite components to the largest finite value.
fn saturate(v: DVec2) -> DVec2 {
    DVec2::new(v.x.clamp(-f64::MAX, f64::MAX), v.y.clamp(-f64::MAX, f64::MAX))
}
