use crate::kinematics;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One of the three bodies in the scene.
///
/// The discriminant doubles as the body's slot in per-body arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun = 0,
    Earth = 1,
    Moon = 2,
}

/// What a body circles around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitCenter {
    /// The world origin.
    Origin,
    /// Another body's current position.
    Body(Body),
}

/// Circular orbit in the XZ plane.
#[derive(Debug, Clone, Copy)]
pub struct Orbit {
    pub center: OrbitCenter,
    pub radius: f32,
    /// Angular position in degrees as a function of the simulated day.
    pub angle: fn(f64) -> f64,
}

/// Fixed, per-body constants.
#[derive(Debug, Clone, Copy)]
pub struct BodyDescriptor {
    pub name: &'static str,
    /// Where the body sits before the first scene update.
    pub seed_position: Vec3,
    pub scale: Vec3,
    /// Rotation about Z applied before spin, in degrees.
    pub axial_tilt_deg: f32,
    /// Self-rotation angle in degrees as a function of the simulated day.
    pub spin: fn(f64) -> f64,
    /// `None` for a body that stays at its seed position.
    pub orbit: Option<Orbit>,
}

// The seed positions (20 and 30 along X) and the live orbit radii (20 around
// the origin, 10 around the Earth) are independent constants.
static DESCRIPTORS: [BodyDescriptor; 3] = [
    BodyDescriptor {
        name: "Sun",
        seed_position: Vec3::ZERO,
        scale: Vec3::splat(4.0),
        axial_tilt_deg: 0.0,
        spin: kinematics::sun_spin,
        orbit: None,
    },
    BodyDescriptor {
        name: "Earth",
        seed_position: Vec3::new(20.0, 0.0, 0.0),
        scale: Vec3::splat(2.5),
        axial_tilt_deg: -23.4,
        spin: kinematics::earth_spin,
        orbit: Some(Orbit {
            center: OrbitCenter::Origin,
            radius: kinematics::EARTH_ORBIT_RADIUS,
            angle: kinematics::earth_orbit,
        }),
    },
    BodyDescriptor {
        name: "Moon",
        seed_position: Vec3::new(30.0, 0.0, 0.0),
        scale: Vec3::splat(1.5),
        axial_tilt_deg: 0.0,
        spin: kinematics::moon_spin,
        orbit: Some(Orbit {
            center: OrbitCenter::Body(Body::Earth),
            radius: kinematics::MOON_ORBIT_RADIUS,
            angle: kinematics::moon_orbit,
        }),
    },
];

impl Body {
    /// All bodies in update order. Orbit centres come before their satellites.
    pub const ALL: [Body; 3] = [Body::Sun, Body::Earth, Body::Moon];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn descriptor(self) -> &'static BodyDescriptor {
        &DESCRIPTORS[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Self-rotation angle in degrees at `day`.
    pub fn spin_angle(self, day: f64) -> f64 {
        (self.descriptor().spin)(day)
    }
}

/// Error from parsing a body name.
#[derive(Debug, thiserror::Error)]
#[error("unknown body {0:?}, expected one of: sun, earth, moon")]
pub struct UnknownBody(pub String);

impl std::str::FromStr for Body {
    type Err = UnknownBody;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Body::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownBody(s.to_string()))
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
