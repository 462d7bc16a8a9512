//! Angle and position functions of the simulated day.
//!
//! All angles are in degrees and unbounded; callers convert to radians.

use glam::Vec3;

/// Sidereal rotation period of the Sun, in days.
pub const SUN_SPIN_PERIOD: f64 = 27.0;
/// Orbital period of the Earth around the Sun, in days.
pub const EARTH_ORBIT_PERIOD: f64 = 365.0;
/// Rotation period of the Earth, in days.
pub const EARTH_SPIN_PERIOD: f64 = 1.0;
/// Orbital period of the Moon around the Earth, in days.
pub const MOON_ORBIT_PERIOD: f64 = 28.0;

/// Radius of the Earth's orbit used for the per-frame position update.
pub const EARTH_ORBIT_RADIUS: f32 = 20.0;
/// Radius of the Moon's orbit around the Earth used for the per-frame update.
pub const MOON_ORBIT_RADIUS: f32 = 10.0;

/// The Sun's self-rotation angle.
pub fn sun_spin(day: f64) -> f64 {
    day * 360.0 / SUN_SPIN_PERIOD
}

/// The Earth's angular position around the Sun.
pub fn earth_orbit(day: f64) -> f64 {
    day * 360.0 / EARTH_ORBIT_PERIOD
}

/// The Earth's self-rotation angle.
pub fn earth_spin(day: f64) -> f64 {
    day * 360.0 / EARTH_SPIN_PERIOD
}

/// The Moon's angular position around the Earth.
pub fn moon_orbit(day: f64) -> f64 {
    day * 360.0 / MOON_ORBIT_PERIOD
}

/// The Moon's self-rotation angle. Tidally locked: always equal to [`moon_orbit`].
pub fn moon_spin(day: f64) -> f64 {
    day * 360.0 / MOON_ORBIT_PERIOD
}

/// Offset from an orbit centre for a body at `angle_deg` on a circle of `radius`
/// in the XZ plane.
///
/// Angle zero lies on +X and the `-sin` on Z sends increasing angles toward -Z,
/// the same sense as a positive rotation about +Y.
pub fn orbit_offset(angle_deg: f64, radius: f32) -> Vec3 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    radius * Vec3::new(cos as f32, 0.0, -sin as f32)
}

/// Earth's position around the origin.
pub fn earth_position(day: f64) -> Vec3 {
    orbit_offset(earth_orbit(day), EARTH_ORBIT_RADIUS)
}

/// Moon's position around the Earth's current position.
pub fn moon_position(day: f64, earth: Vec3) -> Vec3 {
    orbit_offset(moon_orbit(day), MOON_ORBIT_RADIUS) + earth
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn angles_are_linear_in_day() {
        for day in [0.0, 0.5, 1.0, 27.0, 182.5, 365.0, 10_000.25] {
            assert!((sun_spin(day) - day * 360.0 / 27.0).abs() < 1e-9);
            assert!((earth_orbit(day) - day * 360.0 / 365.0).abs() < 1e-9);
            assert!((earth_spin(day) - day * 360.0).abs() < 1e-9);
            assert!((moon_orbit(day) - day * 360.0 / 28.0).abs() < 1e-9);
        }
        // slope check via two samples
        let slope = earth_orbit(11.0) - earth_orbit(10.0);
        assert!((slope - 360.0 / 365.0).abs() < 1e-9);
    }

    #[test]
    fn moon_is_tidally_locked() {
        for day in [0.0, 0.04, 3.5, 28.0, 400.125, 1.0e6] {
            assert_eq!(moon_spin(day), moon_orbit(day));
        }
    }

    #[test]
    fn angles_are_not_wrapped() {
        assert!((earth_spin(2.0) - 720.0).abs() < 1e-9);
        assert!(sun_spin(100.0) > 360.0);
    }

    #[test]
    fn angle_functions_are_repeatable() {
        let day = 123.456_789;
        assert_eq!(sun_spin(day).to_bits(), sun_spin(day).to_bits());
        assert_eq!(earth_orbit(day).to_bits(), earth_orbit(day).to_bits());
        assert_eq!(earth_spin(day).to_bits(), earth_spin(day).to_bits());
        assert_eq!(moon_orbit(day).to_bits(), moon_orbit(day).to_bits());
        assert_eq!(moon_spin(day).to_bits(), moon_spin(day).to_bits());
    }

    #[test]
    fn day_zero_positions() {
        let earth = earth_position(0.0);
        assert!(approx(earth, Vec3::new(20.0, 0.0, 0.0)));
        assert!(approx(moon_position(0.0, earth), Vec3::new(30.0, 0.0, 0.0)));
    }

    #[test]
    fn half_year_puts_earth_opposite() {
        let earth = earth_position(182.5);
        assert!(approx(earth, Vec3::new(-20.0, 0.0, 0.0)));
    }

    #[test]
    fn orbits_stay_on_their_circles() {
        let mut day = 0.0;
        while day < 800.0 {
            let earth = earth_position(day);
            let moon = moon_position(day, earth);
            assert_eq!(earth.y, 0.0);
            assert!((earth.length() - EARTH_ORBIT_RADIUS).abs() < EPS);
            let rel = moon - earth;
            assert_eq!(rel.y, 0.0);
            assert!((rel.length() - MOON_ORBIT_RADIUS).abs() < EPS);
            day += 3.7;
        }
    }

    #[test]
    fn quarter_orbit_heads_toward_negative_z() {
        let offset = orbit_offset(90.0, 1.0);
        assert!(approx(offset, Vec3::new(0.0, 0.0, -1.0)));
    }
}
