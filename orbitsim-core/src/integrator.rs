use crate::engine::{MassConvention, SimConstants};
use glam::DVec3;

/// Position and velocity after one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub position: DVec3,
    pub velocity: DVec3,
}

impl StepResult {
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Gravitational acceleration on a body of `mass` at `position`.
///
/// Zero when the body sits on the central position, or when the distance is
/// so small that the magnitude overflows.
pub fn acceleration(constants: &SimConstants, position: DVec3, mass: f64) -> DVec3 {
    let r_vec = position - constants.central.pos;
    let r_sq = r_vec.length_squared();
    if r_sq == 0.0 {
        return DVec3::ZERO;
    }

    let magnitude = match constants.convention {
        // F_g = G * M * m / r² divided by m: the body mass cancels, so it is
        // never multiplied in and cannot overflow the force
        MassConvention::TestParticle => constants.mu() / r_sq,
        MassConvention::TwoBody => constants.g * (constants.central.mass + mass) / r_sq,
    };

    let accel = r_vec.normalize_or_zero() * -magnitude;
    if accel.is_finite() {
        accel
    } else {
        DVec3::ZERO
    }
}

/// Advance one body by a single explicit Euler step of `constants.dt`
pub fn step(constants: &SimConstants, position: DVec3, velocity: DVec3, mass: f64) -> StepResult {
    let dt = constants.dt;
    let accel = acceleration(constants, position, mass);

    // Velocity first, then position with the updated velocity
    let velocity = velocity + accel * dt;
    let position = position + velocity * dt;

    StepResult { position, velocity }
}
