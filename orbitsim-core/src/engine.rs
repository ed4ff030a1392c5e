use crate::error::{ensure_finite, SimError, SimResult};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Gravitational constant in m^3 kg^-1 s^-2
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;

/// Mass of the default central body (Earth) in kg
pub const EARTH_MASS: f64 = 5.972e24;

/// Default fixed time step in seconds
pub const DEFAULT_DT: f64 = 200.0;

/// How the orbiting body's own mass enters the acceleration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassConvention {
    /// `a = (G * M * m / r²) / m`: the body mass cancels out
    #[default]
    TestParticle,
    /// Reduced two-body motion: `a = G * (M + m) / r²`
    TwoBody,
}

/// The fixed attractor every body falls toward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralMass {
    pub pos: DVec3,
    pub mass: f64,
}

impl Default for CentralMass {
    fn default() -> Self {
        Self {
            pos: DVec3::ZERO,
            mass: EARTH_MASS,
        }
    }
}

/// Constants fixed for the lifetime of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConstants {
    pub g: f64,
    pub central: CentralMass,
    pub dt: f64,
    pub convention: MassConvention,
}

impl SimConstants {
    /// Build and validate a set of constants
    pub fn new(g: f64, central: CentralMass, dt: f64, convention: MassConvention) -> SimResult<Self> {
        let constants = Self {
            g,
            central,
            dt,
            convention,
        };
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.g.is_finite() || self.g < 0.0 {
            return Err(SimError::InvalidConstants(format!(
                "gravitational constant must be finite and non-negative, got {}",
                self.g
            )));
        }
        if !self.central.mass.is_finite() || self.central.mass < 0.0 {
            return Err(SimError::InvalidConstants(format!(
                "central mass must be finite and non-negative, got {}",
                self.central.mass
            )));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidConstants(format!(
                "time step must be finite and positive, got {}",
                self.dt
            )));
        }
        ensure_finite("central position", self.central.pos)
    }

    /// `G * M`, the standard gravitational parameter of the central body
    pub fn mu(&self) -> f64 {
        self.g * self.central.mass
    }
}

impl Default for SimConstants {
    fn default() -> Self {
        Self {
            g: GRAVITATIONAL_CONSTANT,
            central: CentralMass::default(),
            dt: DEFAULT_DT,
            convention: MassConvention::default(),
        }
    }
}

/// Initial conditions for a body, as edited by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySpec {
    pub name: String,
    pub position: DVec3,
    pub velocity: DVec3,
    pub mass: f64,
    /// sRGB display colour
    pub color: [u8; 3],
}

impl Default for BodySpec {
    fn default() -> Self {
        Self {
            name: "body".to_string(),
            position: DVec3::new(7000.0 * 1000.0 * 3.0, 0.0, 0.0),
            velocity: DVec3::new(0.0, 0.0, 5000.0),
            mass: 1.0e6,
            color: [0xff, 0xcc, 0xcb],
        }
    }
}

impl BodySpec {
    pub fn validate(&self) -> SimResult<()> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(SimError::InvalidMass(self.mass));
        }
        ensure_finite("position", self.position)?;
        ensure_finite("velocity", self.velocity)
    }
}

/// A point mass orbiting the central body
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub pos: DVec3,
    pub vel: DVec3,
    pub mass: f64,
}

impl Body {
    /// Create a body, rejecting non-positive mass and non-finite vectors
    pub fn new(name: impl Into<String>, pos: DVec3, vel: DVec3, mass: f64) -> SimResult<Self> {
        let body = Self {
            name: name.into(),
            pos,
            vel,
            mass,
        };
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimError::InvalidMass(mass));
        }
        ensure_finite("position", pos)?;
        ensure_finite("velocity", vel)?;
        Ok(body)
    }

    pub fn from_spec(spec: &BodySpec) -> SimResult<Self> {
        Self::new(spec.name.clone(), spec.position, spec.velocity, spec.mass)
    }

    /// Distance from the central body
    pub fn altitude(&self, central: &CentralMass) -> f64 {
        self.pos.distance(central.pos)
    }

    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Specific orbital energy `v²/2 - mu/r`, useful for watching Euler drift
    pub fn specific_energy(&self, constants: &SimConstants) -> f64 {
        let r = self.altitude(&constants.central);
        let potential = if r > 0.0 { constants.mu() / r } else { 0.0 };
        0.5 * self.vel.length_squared() - potential
    }
}
