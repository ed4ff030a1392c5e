//! The body collection driven by the render loop.
//!
//! [`Simulation`] owns every body, its editable initial conditions and its
//! trail. The integrator itself stays stateless; this type feeds each body's
//! latest state back into [`integrator::step`] once per tick and honours the
//! run/pause flag.

use crate::engine::{Body, BodySpec, SimConstants};
use crate::error::{SimError, SimResult};
use crate::integrator;
use crate::trail::{Trail, DEFAULT_TRAIL_LENGTH};
use log::{debug, warn};

/// Stable handle to a body, never reused within one simulation
pub type BodyId = u64;

/// A body together with the data the collection keeps about it
#[derive(Debug, Clone)]
pub struct BodySlot {
    pub id: BodyId,
    /// Initial conditions, applied on reset
    pub spec: BodySpec,
    pub body: Body,
    pub trail: Trail,
    /// Set once the body produced a non-finite state; it is no longer advanced
    pub stalled: bool,
}

/// What happened during one tick
#[derive(Debug, Default)]
pub struct TickReport {
    /// Number of bodies whose state was advanced
    pub advanced: usize,
    /// Bodies that stalled during this tick
    pub stalled: Vec<SimError>,
}

#[derive(Debug)]
pub struct Simulation {
    constants: SimConstants,
    slots: Vec<BodySlot>,
    next_id: BodyId,
    running: bool,
    ticks: u64,
    trail_length: usize,
}

impl Simulation {
    pub fn new(constants: SimConstants) -> SimResult<Self> {
        constants.validate()?;
        Ok(Self {
            constants,
            slots: Vec::new(),
            next_id: 0,
            running: false,
            ticks: 0,
            trail_length: DEFAULT_TRAIL_LENGTH,
        })
    }

    /// Set the trail capacity used for bodies added from now on
    pub fn with_trail_length(mut self, trail_length: usize) -> Self {
        self.trail_length = trail_length;
        self
    }

    pub fn constants(&self) -> &SimConstants {
        &self.constants
    }

    pub fn add_body(&mut self, spec: BodySpec) -> SimResult<BodyId> {
        let body = Body::from_spec(&spec)?;
        let id = self.next_id;
        self.next_id += 1;

        let mut trail = Trail::new(self.trail_length);
        trail.push(body.pos);

        debug!("added body {} '{}' with mass {}", id, body.name, body.mass);
        self.slots.push(BodySlot {
            id,
            spec,
            body,
            trail,
            stalled: false,
        });
        Ok(id)
    }

    pub fn remove_body(&mut self, id: BodyId) -> SimResult<Body> {
        let idx = self.index_of(id)?;
        let slot = self.slots.remove(idx);
        debug!("removed body {} '{}'", id, slot.body.name);
        Ok(slot.body)
    }

    pub fn body(&self, id: BodyId) -> Option<&BodySlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn bodies(&self) -> &[BodySlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Replace a body's initial conditions. The running state is untouched
    /// until the body is reset.
    pub fn update_spec(&mut self, id: BodyId, spec: BodySpec) -> SimResult<()> {
        spec.validate()?;
        let idx = self.index_of(id)?;
        self.slots[idx].spec = spec;
        Ok(())
    }

    /// Put one body back at its initial conditions
    pub fn reset_body(&mut self, id: BodyId) -> SimResult<()> {
        let idx = self.index_of(id)?;
        let slot = &mut self.slots[idx];
        slot.body = Body::from_spec(&slot.spec)?;
        slot.trail.clear();
        slot.trail.push(slot.body.pos);
        slot.stalled = false;
        debug!("reset body {} '{}'", id, slot.body.name);
        Ok(())
    }

    /// Reset every body, clear the tick counter and pause
    pub fn reset(&mut self) -> SimResult<()> {
        let ids: Vec<BodyId> = self.slots.iter().map(|s| s.id).collect();
        for id in ids {
            self.reset_body(id)?;
        }
        self.ticks = 0;
        self.running = false;
        Ok(())
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of steps taken since the last reset
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds since the last reset
    pub fn elapsed(&self) -> f64 {
        self.ticks as f64 * self.constants.dt
    }

    /// Advance every body once if the simulation is running
    pub fn tick(&mut self) -> TickReport {
        if !self.running {
            return TickReport::default();
        }
        self.step_once()
    }

    /// Advance every non-stalled body once, regardless of the run flag.
    ///
    /// A body whose next state is not finite keeps its previous state and is
    /// marked stalled.
    pub fn step_once(&mut self) -> TickReport {
        let mut report = TickReport::default();

        for slot in self.slots.iter_mut().filter(|s| !s.stalled) {
            let next = integrator::step(
                &self.constants,
                slot.body.pos,
                slot.body.vel,
                slot.body.mass,
            );

            if !next.is_finite() {
                warn!(
                    "body {} '{}' produced a non-finite state at tick {}",
                    slot.id, slot.body.name, self.ticks
                );
                slot.stalled = true;
                report.stalled.push(SimError::NonFiniteState {
                    name: slot.body.name.clone(),
                });
                continue;
            }

            slot.body.pos = next.position;
            slot.body.vel = next.velocity;
            slot.trail.push(next.position);
            report.advanced += 1;
        }

        self.ticks += 1;
        report
    }

    /// Run `steps` ticks back to back, ignoring the run flag
    pub fn run_for(&mut self, steps: u64) -> Vec<SimError> {
        let mut stalled = Vec::new();
        for _ in 0..steps {
            stalled.extend(self.step_once().stalled);
        }
        stalled
    }

    fn index_of(&self, id: BodyId) -> SimResult<usize> {
        self.slots
            .iter()
            .position(|s| s.id == id)
            .ok_or(SimError::UnknownBody(id))
    }
}
