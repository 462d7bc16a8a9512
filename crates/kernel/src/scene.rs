use crate::body::{Body, OrbitCenter};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Day the reference run starts from.
pub const DEFAULT_START_DAY: f64 = 365.0;
/// One simulated hour per rendered frame.
pub const DEFAULT_DAY_STEP: f64 = 1.0 / 24.0;

/// Errors from constructing a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("start day must be finite and non-negative, got {0}")]
    InvalidStartDay(f64),
    #[error("day step must be finite and positive, got {0}")]
    InvalidDayStep(f64),
}

/// Point-in-time view of one body, for logging and tooling output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub body: Body,
    pub position: Vec3,
    /// Self-rotation in degrees, unbounded.
    pub spin_deg: f64,
}

/// The simulated-day counter and the bodies' current positions.
///
/// Owned by the frame loop. Positions start at the seed table and are
/// recomputed from the kinematics model on every [`SceneState::advance`].
#[derive(Debug, Clone)]
pub struct SceneState {
    day: f64,
    day_step: f64,
    frame: u64,
    positions: [Vec3; 3],
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            day: DEFAULT_START_DAY,
            day_step: DEFAULT_DAY_STEP,
            frame: 0,
            positions: Body::ALL.map(|b| b.descriptor().seed_position),
        }
    }
}

impl SceneState {
    /// Create a scene at `start_day` that advances by `day_step` per frame.
    pub fn new(start_day: f64, day_step: f64) -> Result<Self, SceneError> {
        if !start_day.is_finite() || start_day < 0.0 {
            return Err(SceneError::InvalidStartDay(start_day));
        }
        if !day_step.is_finite() || day_step <= 0.0 {
            return Err(SceneError::InvalidDayStep(day_step));
        }
        Ok(Self {
            day: start_day,
            day_step,
            ..Self::default()
        })
    }

    /// Current simulated day.
    pub fn day(&self) -> f64 {
        self.day
    }

    pub fn day_step(&self) -> f64 {
        self.day_step
    }

    /// Number of times the scene has been advanced.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current position of `body`.
    pub fn position(&self, body: Body) -> Vec3 {
        self.positions[body.index()]
    }

    /// Advance the day by one step and recompute orbiting bodies in order.
    pub fn advance(&mut self) {
        self.day += self.day_step;
        self.frame += 1;
        for body in Body::ALL {
            let Some(orbit) = body.descriptor().orbit else {
                continue;
            };
            let center = match orbit.center {
                OrbitCenter::Origin => Vec3::ZERO,
                OrbitCenter::Body(parent) => self.positions[parent.index()],
            };
            self.positions[body.index()] =
                crate::kinematics::orbit_offset((orbit.angle)(self.day), orbit.radius) + center;
        }
        tracing::trace!(day = self.day, frame = self.frame, "scene advanced");
    }

    /// Snapshot of every body at the current day, in body order.
    pub fn snapshot(&self) -> [BodySnapshot; 3] {
        Body::ALL.map(|body| BodySnapshot {
            body,
            position: self.position(body),
            spin_deg: body.spin_angle(self.day),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn default_scene_uses_seed_positions() {
        let scene = SceneState::default();
        assert_eq!(scene.day(), DEFAULT_START_DAY);
        assert_eq!(scene.frame(), 0);
        assert_eq!(scene.position(Body::Sun), Vec3::ZERO);
        assert_eq!(scene.position(Body::Earth), Vec3::new(20.0, 0.0, 0.0));
        assert_eq!(scene.position(Body::Moon), Vec3::new(30.0, 0.0, 0.0));
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(matches!(
            SceneState::new(-1.0, DEFAULT_DAY_STEP),
            Err(SceneError::InvalidStartDay(_))
        ));
        assert!(matches!(
            SceneState::new(f64::NAN, DEFAULT_DAY_STEP),
            Err(SceneError::InvalidStartDay(_))
        ));
        assert!(matches!(
            SceneState::new(0.0, 0.0),
            Err(SceneError::InvalidDayStep(_))
        ));
        assert!(matches!(
            SceneState::new(0.0, f64::INFINITY),
            Err(SceneError::InvalidDayStep(_))
        ));
    }

    #[test]
    fn twenty_four_steps_make_a_day() {
        let mut scene = SceneState::new(0.0, DEFAULT_DAY_STEP).unwrap();
        let mut previous = scene.day();
        for _ in 0..24 {
            scene.advance();
            assert!((scene.day() - previous - DEFAULT_DAY_STEP).abs() < 1e-12);
            previous = scene.day();
        }
        assert!((scene.day() - 1.0).abs() < 1e-9);
        assert_eq!(scene.frame(), 24);
    }

    #[test]
    fn advance_recomputes_from_kinematics() {
        let mut scene = SceneState::new(10.0, 0.5).unwrap();
        scene.advance();
        let day = scene.day();
        let earth = kinematics::earth_position(day);
        assert_eq!(scene.position(Body::Sun), Vec3::ZERO);
        assert!(approx(scene.position(Body::Earth), earth));
        assert!(approx(
            scene.position(Body::Moon),
            kinematics::moon_position(day, earth)
        ));
    }

    #[test]
    fn moon_follows_current_earth() {
        let mut scene = SceneState::new(0.0, 1.3).unwrap();
        for _ in 0..500 {
            scene.advance();
            let earth = scene.position(Body::Earth);
            let moon = scene.position(Body::Moon);
            assert!((earth.length() - 20.0).abs() < 1e-3);
            assert!(((moon - earth).length() - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn snapshot_reports_spin() {
        let mut scene = SceneState::new(0.0, 1.0).unwrap();
        scene.advance();
        let snap = scene.snapshot();
        assert_eq!(snap[0].body, Body::Sun);
        assert_eq!(snap[1].spin_deg, 360.0);
        assert_eq!(snap[2].spin_deg, kinematics::moon_orbit(1.0));
    }
}
