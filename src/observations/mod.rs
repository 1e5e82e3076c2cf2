//! Sensor observations and per-source freshness tracking.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use glam::DVec3;

/// One batch of range returns from a single sensor.
#[derive(Debug, Clone)]
pub struct Observation {
    /// Sensor origin in the map frame (meters).
    pub origin: DVec3,
    /// Hit points in the map frame (meters).
    pub cloud: Vec<DVec3>,
    /// Sensor payload time, relative to the sensor epoch.
    pub timestamp: Duration,
}

impl Observation {
    pub fn new(origin: DVec3, cloud: Vec<DVec3>, timestamp: Duration) -> Self {
        Self {
            origin,
            cloud,
            timestamp,
        }
    }
}

/// Refresh interval for a minimum acceptable sensor rate.
///
/// A non-positive rate yields [`Duration::ZERO`], which downstream means
/// "freshness unconstrained".
pub fn compute_refresh_interval(rate_hz: f64) -> Duration {
    if rate_hz <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(1.0 / rate_hz)
}

/// Per-sensor-source observation buffer with a keep-alive window and a
/// minimum-refresh-rate currency check.
#[derive(Debug)]
pub struct ObservationBuffer {
    keep_alive: Duration,
    refresh_interval: Duration,
    last_updated: Option<Instant>,
    observations: VecDeque<Observation>,
}

impl ObservationBuffer {
    /// `keep_alive` bounds how long buffered observations are retained;
    /// `expected_rate_hz` sets the minimum acceptable update rate for
    /// [`is_current`](Self::is_current).
    pub fn new(keep_alive: Duration, expected_rate_hz: f64) -> Self {
        Self {
            keep_alive,
            refresh_interval: compute_refresh_interval(expected_rate_hz),
            last_updated: None,
            observations: VecDeque::new(),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Buffer an observation, stamping the arrival wall clock and pruning
    /// anything older than `keep_alive` relative to the newest payload
    /// timestamp.
    pub fn buffer_observation(&mut self, observation: Observation) {
        self.last_updated = Some(Instant::now());
        let newest = observation.timestamp;
        self.observations.push_back(observation);
        let cutoff = newest.saturating_sub(self.keep_alive);
        while let Some(front) = self.observations.front() {
            if front.timestamp < cutoff {
                self.observations.pop_front();
            } else {
                break;
            }
        }
    }

    /// Buffered observations, oldest first.
    pub fn observations(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Whether this source is being fed often enough.
    ///
    /// Deliberately not a function of the observations' own payload
    /// timestamps: the check is
    /// `now - time_of_last_buffer_observation_call < refresh_interval`,
    /// or unconditionally `true` for a zero refresh interval. "The map is
    /// being fed often enough" is decoupled from "the sensor data itself
    /// is recent" by contract.
    pub fn is_current(&self) -> bool {
        self.is_current_at(Instant::now())
    }

    fn is_current_at(&self, now: Instant) -> bool {
        if self.refresh_interval == Duration::ZERO {
            return true;
        }
        match self.last_updated {
            Some(last) => now.duration_since(last) < self.refresh_interval,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation_at(secs: u64) -> Observation {
        Observation::new(DVec3::ZERO, Vec::new(), Duration::from_secs(secs))
    }

    #[test]
    fn refresh_interval_edge_cases() {
        assert_eq!(compute_refresh_interval(-100.0), Duration::ZERO);
        assert_eq!(compute_refresh_interval(0.0), Duration::ZERO);
        assert_eq!(compute_refresh_interval(100.0), Duration::from_millis(10));
        assert_eq!(compute_refresh_interval(0.5), Duration::from_secs(2));
    }

    #[test]
    fn unconstrained_buffer_is_always_current() {
        let mut buffer = ObservationBuffer::new(Duration::from_secs(1), 0.0);
        assert!(buffer.is_current());
        // Even with only an epoch-zero payload timestamp buffered.
        buffer.buffer_observation(observation_at(0));
        assert!(buffer.is_current());
    }

    #[test]
    fn constrained_buffer_needs_an_update() {
        let buffer = ObservationBuffer::new(Duration::from_secs(1), 10.0);
        assert!(!buffer.is_current());
    }

    #[test]
    fn currency_follows_wall_clock_of_buffering() {
        let mut buffer = ObservationBuffer::new(Duration::from_secs(10), 10.0);
        buffer.buffer_observation(observation_at(0));
        let last = buffer.last_updated.unwrap();
        assert!(buffer.is_current_at(last + Duration::from_millis(50)));
        assert!(!buffer.is_current_at(last + Duration::from_millis(150)));
    }

    #[test]
    fn prunes_observations_older_than_keep_alive() {
        let mut buffer = ObservationBuffer::new(Duration::from_secs(5), 0.0);
        buffer.buffer_observation(observation_at(0));
        buffer.buffer_observation(observation_at(3));
        assert_eq!(buffer.len(), 2);
        buffer.buffer_observation(observation_at(9));
        // The epoch-0 and t=3 observations are older than keep_alive
        // relative to t=9.
        assert_eq!(buffer.len(), 1);
        assert_eq!(
            buffer.observations().next().unwrap().timestamp,
            Duration::from_secs(9)
        );
    }

    #[test]
    fn zero_keep_alive_retains_only_the_newest() {
        let mut buffer = ObservationBuffer::new(Duration::ZERO, 0.0);
        buffer.buffer_observation(observation_at(1));
        buffer.buffer_observation(observation_at(2));
        assert_eq!(buffer.len(), 1);
    }
}
