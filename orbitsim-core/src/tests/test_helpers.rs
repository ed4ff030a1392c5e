//! Test helper utilities for orbitsim tests

use crate::engine::{BodySpec, CentralMass, MassConvention, SimConstants};
use glam::DVec3;

/// Check if two floating point values are approximately equal within tolerance
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Relative comparison for values spanning many orders of magnitude
pub fn rel_eq(a: f64, b: f64, rel_tol: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= rel_tol * scale
}

/// Component-wise relative comparison of two vectors
pub fn approx_eq_vec(a: DVec3, b: DVec3, rel_tol: f64) -> bool {
    rel_eq(a.x, b.x, rel_tol) && rel_eq(a.y, b.y, rel_tol) && rel_eq(a.z, b.z, rel_tol)
}

/// Earth-like constants with the given time step
pub fn earth_constants(dt: f64) -> SimConstants {
    SimConstants {
        g: 6.674e-11,
        central: CentralMass {
            pos: DVec3::ZERO,
            mass: 5.972e24,
        },
        dt,
        convention: MassConvention::TestParticle,
    }
}

/// Unit constants (G = M = dt = 1) for hand-checkable arithmetic
pub fn unit_constants() -> SimConstants {
    SimConstants {
        g: 1.0,
        central: CentralMass {
            pos: DVec3::ZERO,
            mass: 1.0,
        },
        dt: 1.0,
        convention: MassConvention::TestParticle,
    }
}

/// A body spec at `position` with `velocity` and the stock mass
pub fn spec_at(name: &str, position: DVec3, velocity: DVec3) -> BodySpec {
    BodySpec {
        name: name.to_string(),
        position,
        velocity,
        ..BodySpec::default()
    }
}
