//! Orrery kernel: orbital kinematics and scene state driven by a simulated day counter.
//!
//! # Invariants
//! - Angle functions are pure: the same `day` always yields bit-identical output.
//! - Exactly three bodies exist, ordered Sun, Earth, Moon.
//! - An orbit centre is always updated before the bodies orbiting it.
//! - The simulated day only ever moves forward.

pub mod body;
pub mod kinematics;
pub mod scene;

pub use body::{Body, BodyDescriptor, Orbit, OrbitCenter, UnknownBody};
pub use scene::{BodySnapshot, DEFAULT_DAY_STEP, DEFAULT_START_DAY, SceneError, SceneState};

pub fn crate_info() -> &'static str {
    "orrery-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
