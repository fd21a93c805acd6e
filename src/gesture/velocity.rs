// SPDX-License-Identifier: MPL-2.0
//! Release velocity estimation.
//!
//! Uses the impulse strategy: each pair of samples contributes the kinetic
//! energy needed to change from the previous velocity to the current one,
//! which is less jittery than a plain first/last difference.

use iced_core::{Point, Vector};
use std::time::Duration;

/// Number of samples kept per axis.
const HISTORY_SIZE: usize = 20;

/// Samples older than this (relative to the newest) are ignored.
const HORIZON: Duration = Duration::from_millis(100);

/// A gap longer than this between samples means the pointer stopped.
const ASSUME_STOPPED: Duration = Duration::from_millis(40);

#[derive(Debug, Clone, Copy)]
struct Sample {
    time: Duration,
    value: f32,
}

/// Ring buffer of positions along one axis.
#[derive(Debug, Clone)]
pub struct AxisVelocity {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl Default for AxisVelocity {
    fn default() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }
}

impl AxisVelocity {
    pub fn add(&mut self, time: Duration, value: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time, value });
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Velocity in units per second, `0.0` with fewer than two usable samples.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        // Collected newest first; ages are negative milliseconds.
        let mut values = [0.0f32; HISTORY_SIZE];
        let mut ages = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut index = self.newest;
        let mut previous_time = newest.time;

        while let Some(sample) = self.samples[index] {
            let age = newest.time.saturating_sub(sample.time);
            let gap = previous_time.saturating_sub(sample.time);
            if age > HORIZON || gap > ASSUME_STOPPED {
                break;
            }
            previous_time = sample.time;
            values[count] = sample.value;
            ages[count] = -(age.as_secs_f32() * 1000.0);
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            index = (index + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&values[..count], &ages[..count]) * 1000.0
    }
}

/// Impulse velocity in units per millisecond; slices are ordered newest first.
fn impulse_velocity(values: &[f32], ages: &[f32]) -> f32 {
    let oldest = values.len() - 1;
    let mut work = 0.0f32;
    for i in (1..=oldest).rev() {
        let dt = ages[i - 1] - ages[i];
        if dt == 0.0 {
            continue;
        }
        let current = (values[i - 1] - values[i]) / dt;
        let previous = energy_to_velocity(work);
        work += (current - previous) * current.abs();
        if i == oldest {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

/// Two-axis velocity tracker for a single pointer.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    x: AxisVelocity,
    y: AxisVelocity,
}

impl VelocityTracker {
    pub fn add(&mut self, time: Duration, position: Point) {
        self.x.add(time, position.x);
        self.y.add(time, position.y);
    }

    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
    }

    /// Current velocity in pixels per second, each axis clamped to `max`.
    #[must_use]
    pub fn velocity(&self, max: f32) -> Vector {
        let clamp = |v: f32| {
            if v.is_finite() {
                v.clamp(-max, max)
            } else {
                0.0
            }
        };
        Vector::new(clamp(self.x.velocity()), clamp(self.y.velocity()))
    }
}
