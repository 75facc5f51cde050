//! Display bookkeeping that sits between the simulation and the renderer.
//!
//! Nothing here draws; the renderer reads these values once per frame after
//! the simulation has stepped.

use std::collections::VecDeque;

use ultraviolet::DVec2;

use crate::{
    physics::Body,
    simulation::Simulation,
};

/// Which body the camera follows.
///
/// `0` is the free view centred on the origin, `k > 0` follows body `k - 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub focus: usize,
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            focus: 0,
            scale: 1.0,
        }
    }
}

impl Camera {
    pub fn new(scale: f64) -> Self {
        Self { focus: 0, scale }
    }

    pub fn focus_next(&mut self, len: usize) {
        self.focus = (self.focus + 1) % (len + 1);
    }

    pub fn focus_prev(&mut self, len: usize) {
        self.focus = (self.focus + len) % (len + 1);
    }

    pub fn zoom_in(&mut self) {
        self.scale *= 2.0;
    }

    pub fn zoom_out(&mut self) {
        self.scale /= 2.0;
    }

    /// Index of the followed body, if any.
    pub fn focused(&self) -> Option<usize> {
        self.focus.checked_sub(1)
    }

    pub fn origin(&self, bodies: &[Body]) -> DVec2 {
        self.focused()
            .and_then(|i| bodies.get(i))
            .map_or(DVec2::zero(), |body| body.pos())
    }

    /// Maps a world position to screen coordinates around `center`.
    pub fn project(&self, pos: DVec2, origin: DVec2, center: DVec2) -> DVec2 {
        (pos - origin) * self.scale + center
    }
}

/// Signed multiplier applied to wall-clock frame time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeControl {
    pub speed: f64,
}

impl Default for TimeControl {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

impl TimeControl {
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }

    pub fn faster(&mut self) {
        self.speed *= 2.0;
    }

    pub fn slower(&mut self) {
        self.speed /= 2.0;
    }

    pub fn reverse(&mut self) {
        self.speed = -self.speed;
    }

    pub fn dt(&self, frame_seconds: f64) -> f64 {
        frame_seconds * self.speed
    }
}

/// Longest trail kept per body; longer requests are capped.
pub const MAX_TRAIL_LENGTH: usize = 100_000;

/// Recent positions of one body, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<DVec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record(&mut self, pos: DVec2) {
        if self.capacity == 0 {
            return;
        }

        if self.points.len() == self.capacity {
            self.points.pop_front();
        }

        self.points.push_back(pos);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points paired with an opacity in `(0, 1]` that rises towards the newest.
    pub fn faded(&self) -> impl Iterator<Item = (DVec2, f32)> + '_ {
        let len = self.points.len();

        self.points
            .iter()
            .enumerate()
            .map(move |(i, &pos)| (pos, (i + 1) as f32 / len as f32))
    }
}

/// One trail per body, indexed like the simulation.
///
/// Points are stored relative to the camera origin at the time they were
/// recorded, so a followed body's trail shows its path in that body's frame.
#[derive(Debug, Clone, Default)]
pub struct Trails {
    inner: Vec<Trail>,
    capacity: usize,
}

impl Trails {
    pub fn new(capacity: usize) -> Self {
        if capacity > MAX_TRAIL_LENGTH {
            log::warn!(
                "trail length {} capped at {}",
                capacity,
                MAX_TRAIL_LENGTH
            );
        }

        Self {
            inner: Vec::new(),
            capacity: capacity.min(MAX_TRAIL_LENGTH),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records every body's position relative to `origin`.
    pub fn record(&mut self, simulation: &Simulation, origin: DVec2) {
        let capacity = self.capacity;

        if self.inner.len() < simulation.len() {
            self.inner
                .resize_with(simulation.len(), || Trail::new(capacity));
        }

        for (trail, body) in self.inner.iter_mut().zip(simulation.bodies()) {
            trail.record(body.pos() - origin);
        }
    }

    pub fn clear(&mut self) {
        self.inner.iter_mut().for_each(Trail::clear);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trail> {
        self.inner.iter()
    }
}

/// Heads-up figures for the followed body.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub name: String,
    pub speed: f64,
    /// Distance from the reference body (the first one).
    pub altitude: f64,
}

impl Readout {
    pub fn of(camera: &Camera, simulation: &Simulation) -> Option<Self> {
        let body = simulation.body(camera.focused()?)?;
        let reference = simulation.body(0)?;

        Some(Self {
            name: body.name().to_string(),
            speed: body.speed(),
            altitude: body.distance_to(reference),
        })
    }

    pub fn speed_line(&self) -> String {
        format!("Speed : {:.2}", self.speed)
    }

    pub fn altitude_line(&self) -> String {
        format!("Altitude : {:.2}", self.altitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioConfig;
    use macroquad::color::WHITE;

    fn pair() -> Simulation {
        let mut simulation = Simulation::new();
        simulation.push(Body::new("a", 10.0, DVec2::zero(), DVec2::zero(), 1.0, WHITE).unwrap());
        simulation.push(
            Body::new("b", 1.0, DVec2::new(3.0, 4.0), DVec2::new(0.0, 2.0), 1.0, WHITE).unwrap(),
        );
        simulation
    }

    #[test]
    fn focus_wraps_through_free_view() {
        let mut camera = Camera::default();

        camera.focus_next(2);
        assert_eq!(camera.focused(), Some(0));
        camera.focus_next(2);
        assert_eq!(camera.focused(), Some(1));
        camera.focus_next(2);
        assert_eq!(camera.focused(), None);

        camera.focus_prev(2);
        assert_eq!(camera.focused(), Some(1));
    }

    #[test]
    fn focus_with_no_bodies_stays_free() {
        let mut camera = Camera::default();
        camera.focus_next(0);
        camera.focus_prev(0);
        assert_eq!(camera.focus, 0);
    }

    #[test]
    fn projection_follows_focus_and_scale() {
        let simulation = pair();
        let mut camera = Camera::default();
        let center = DVec2::new(960.0, 540.0);

        let origin = camera.origin(simulation.bodies());
        assert_eq!(camera.project(DVec2::new(3.0, 4.0), origin, center), DVec2::new(963.0, 544.0));

        camera.focus = 2;
        camera.zoom_in();
        let origin = camera.origin(simulation.bodies());
        assert_eq!(camera.project(DVec2::zero(), origin, center), DVec2::new(954.0, 532.0));

        camera.zoom_out();
        camera.zoom_out();
        assert_eq!(camera.scale, 0.5);
    }

    #[test]
    fn speed_controls() {
        let mut time = TimeControl::default();
        time.faster();
        time.faster();
        time.slower();
        time.reverse();

        assert_eq!(time.speed, -2.0);
        assert_eq!(time.dt(0.25), -0.5);

        time.speed = 0.0;
        assert_eq!(time.dt(1.0 / 120.0), 0.0);
    }

    #[test]
    fn trail_drops_oldest() {
        let mut trail = Trail::new(3);

        for x in 0..5 {
            trail.record(DVec2::new(x as f64, 0.0));
        }

        let points: Vec<_> = trail.faded().collect();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].0.x, 2.0);
        assert_eq!(points[2].0.x, 4.0);
        assert_eq!(points[2].1, 1.0);
        assert!(points[0].1 < points[1].1);
    }

    #[test]
    fn zero_capacity_trail_stays_empty() {
        let mut trail = Trail::new(0);
        trail.record(DVec2::zero());
        assert!(trail.is_empty());
    }

    #[test]
    fn huge_trail_length_is_lazy() {
        let scenario =
            ScenarioConfig::from_reader("trail_length: 18446744073709551615\nbodies: []".as_bytes())
                .unwrap();

        let mut trail = Trail::new(scenario.trail_length);
        trail.record(DVec2::new(1.0, 2.0));
        trail.record(DVec2::new(3.0, 4.0));

        assert_eq!(trail.len(), 2);
        assert_eq!(trail.capacity(), usize::MAX);
    }

    #[test]
    fn trails_cap_their_length() {
        let simulation = pair();
        let mut trails = Trails::new(usize::MAX);

        assert_eq!(trails.capacity(), MAX_TRAIL_LENGTH);

        trails.record(&simulation, DVec2::zero());
        assert!(trails.iter().all(|trail| trail.capacity() == MAX_TRAIL_LENGTH));
    }

    #[test]
    fn trails_follow_the_focused_frame() {
        let mut simulation = pair();
        let mut camera = Camera {
            focus: 2,
            scale: 1.0,
        };
        let mut trails = Trails::new(8);

        for _ in 0..3 {
            trails.record(&simulation, camera.origin(simulation.bodies()));
            simulation.step(0.1);
        }

        // The followed body sits still at the origin of its own frame
        let followed: Vec<_> = trails.iter().nth(1).unwrap().faded().collect();
        assert!(followed.iter().all(|(pos, _)| *pos == DVec2::zero()));

        // The other body is seen from the followed one
        let (first, _) = trails.iter().next().unwrap().faded().next().unwrap();
        assert_eq!(first, DVec2::new(-3.0, -4.0));

        camera.focus = 0;
        trails.clear();
        trails.record(&simulation, camera.origin(simulation.bodies()));
        let (free, _) = trails.iter().nth(1).unwrap().faded().next().unwrap();
        assert_eq!(free, simulation.bodies()[1].pos());
    }

    #[test]
    fn trails_track_every_body() {
        let simulation = pair();
        let mut trails = Trails::new(8);

        trails.record(&simulation, DVec2::zero());
        trails.record(&simulation, DVec2::zero());

        assert_eq!(trails.iter().count(), 2);
        assert!(trails.iter().all(|trail| trail.len() == 2));

        trails.clear();
        assert!(trails.iter().all(Trail::is_empty));
    }

    #[test]
    fn readout_reports_speed_and_altitude() {
        let simulation = pair();
        let mut camera = Camera::default();

        assert_eq!(Readout::of(&camera, &simulation), None);

        camera.focus = 2;
        let readout = Readout::of(&camera, &simulation).unwrap();

        assert_eq!(readout.name, "b");
        assert_eq!(readout.speed_line(), "Speed : 2.00");
        assert_eq!(readout.altitude_line(), "Altitude : 5.00");
    }
}
