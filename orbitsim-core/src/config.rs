//! Scenario files: initial conditions and constants loaded from JSON.
//!
//! Every field is optional. A missing file section falls back to the stock
//! scene of one satellite-sized body on an eccentric orbit around an
//! Earth-mass centre.

use crate::engine::{
    BodySpec, CentralMass, MassConvention, SimConstants, DEFAULT_DT, EARTH_MASS,
    GRAVITATIONAL_CONSTANT,
};
use crate::error::{SimError, SimResult};
use crate::simulation::Simulation;
use crate::trail::{DEFAULT_TRAIL_LENGTH, MAX_TRAIL_LENGTH};
use glam::DVec3;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Metres to scene units
pub const DEFAULT_DISPLAY_SCALE: f64 = 1.0e-7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstantsConfig {
    pub g: f64,
    pub central_mass: f64,
    pub central_position: DVec3,
    pub dt: f64,
    pub mass_convention: MassConvention,
}

impl Default for ConstantsConfig {
    fn default() -> Self {
        Self {
            g: GRAVITATIONAL_CONSTANT,
            central_mass: EARTH_MASS,
            central_position: DVec3::ZERO,
            dt: DEFAULT_DT,
            mass_convention: MassConvention::TestParticle,
        }
    }
}

impl ConstantsConfig {
    pub fn build(&self) -> SimResult<SimConstants> {
        SimConstants::new(
            self.g,
            CentralMass {
                pos: self.central_position,
                mass: self.central_mass,
            },
            self.dt,
            self.mass_convention,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub constants: ConstantsConfig,
    pub bodies: Vec<BodySpec>,
    pub trail_length: usize,
    pub display_scale: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            constants: ConstantsConfig::default(),
            bodies: vec![BodySpec {
                name: "Sphere 1".to_string(),
                ..BodySpec::default()
            }],
            trail_length: DEFAULT_TRAIL_LENGTH,
            display_scale: DEFAULT_DISPLAY_SCALE,
        }
    }
}

impl ScenarioConfig {
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        info!(
            "loaded scenario {} with {} bodies",
            path.display(),
            config.bodies.len()
        );
        Ok(config)
    }

    pub fn from_json(text: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject display settings the viewer cannot draw with
    pub fn validate(&self) -> SimResult<()> {
        if self.trail_length > MAX_TRAIL_LENGTH {
            return Err(SimError::InvalidScenario(format!(
                "trail_length must be at most {}, got {}",
                MAX_TRAIL_LENGTH, self.trail_length
            )));
        }
        if !self.display_scale.is_finite() || self.display_scale <= 0.0 {
            return Err(SimError::InvalidScenario(format!(
                "display_scale must be finite and positive, got {}",
                self.display_scale
            )));
        }
        Ok(())
    }

    /// Build a paused simulation holding every configured body
    pub fn build_simulation(&self) -> SimResult<Simulation> {
        self.validate()?;
        let constants = self.constants.build()?;
        let mut sim = Simulation::new(constants)?.with_trail_length(self.trail_length);
        for spec in &self.bodies {
            sim.add_body(spec.clone())?;
        }
        Ok(sim)
    }
}

/// Map a physics position (metres) into scene units
pub fn to_scene(pos: DVec3, scale: f64) -> DVec3 {
    pos * scale
}
