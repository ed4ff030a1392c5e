//! Bounded position history drawn behind each body.

use glam::DVec3;
use std::collections::VecDeque;

pub const DEFAULT_TRAIL_LENGTH: usize = 512;

/// Longest trail a scenario may ask for
pub const MAX_TRAIL_LENGTH: usize = 1 << 20;

/// Fixed-capacity queue of past positions, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<DVec3>,
    capacity: usize,
}

impl Trail {
    /// The queue grows on demand; nothing is reserved up front.
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::new(),
            capacity,
        }
    }

    /// Append a point, dropping the oldest once full
    pub fn push(&mut self, point: DVec3) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
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

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn points(&self) -> impl Iterator<Item = &DVec3> + '_ {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<DVec3> {
        self.points.back().copied()
    }
}
