// src/clock.rs
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sampling::Sampler;
use crate::series::RollingSeries;

/// Simulation lifecycle flag. The only observable transitions are
/// Stopped -> Running (start), Running -> Stopped (stop or safety cutoff),
/// and the reset back to Stopped with cleared data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// Fixed-tick driver for the animated arrivals demo.
///
/// `advance` moves an elapsed-time accumulator forward; whenever the
/// accumulator reaches the scheduled next-event time, the completed
/// inter-arrival interval is recorded and the following event is scheduled
/// at an absolute time (previous event time plus a fresh exponential draw),
/// so repeated ticks cannot accumulate drift.
///
/// A tick that arrives after `stop` is a no-op: the host cancels its timer
/// on stop, and the run-state guard here makes a stale callback harmless.
#[derive(Debug)]
pub struct ArrivalClock {
    rate: f64,
    run_state: RunState,
    now: f64,
    last_event: f64,
    next_event: f64,
    intervals: RollingSeries<f64>,
}

impl ArrivalClock {
    pub fn new(rate: f64, capacity: usize) -> Self {
        Self {
            rate,
            run_state: RunState::Stopped,
            now: 0.0,
            last_event: 0.0,
            next_event: f64::INFINITY,
            intervals: RollingSeries::with_capacity(capacity),
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn elapsed(&self) -> f64 {
        self.now
    }

    /// Recorded inter-arrival intervals, oldest first.
    pub fn intervals(&self) -> &RollingSeries<f64> {
        &self.intervals
    }

    /// Update the rate and reschedule the pending event from the current
    /// time. Recorded history is kept; only an explicit reset clears it.
    pub fn set_rate(&mut self, rate: f64, sampler: &mut Sampler) {
        self.rate = rate;
        if self.run_state == RunState::Running {
            self.last_event = self.now;
            self.next_event = self.now + sampler.exponential(self.rate);
        }
    }

    pub fn start(&mut self, sampler: &mut Sampler) {
        if self.run_state == RunState::Running {
            return;
        }
        debug!(rate = self.rate, "arrival clock started");
        self.run_state = RunState::Running;
        self.last_event = self.now;
        self.next_event = self.now + sampler.exponential(self.rate);
    }

    pub fn stop(&mut self) {
        if self.run_state == RunState::Running {
            debug!("arrival clock stopped");
        }
        self.run_state = RunState::Stopped;
    }

    pub fn reset(&mut self) {
        debug!("arrival clock reset");
        self.run_state = RunState::Stopped;
        self.now = 0.0;
        self.last_event = 0.0;
        self.next_event = f64::INFINITY;
        self.intervals.clear();
    }

    /// Advance elapsed time by `dt` seconds, returning the inter-arrival
    /// intervals completed during this tick (possibly several for a large
    /// `dt`, none while stopped or with a degenerate rate).
    pub fn advance(&mut self, dt: f64, sampler: &mut Sampler) -> Vec<f64> {
        if self.run_state != RunState::Running || dt <= 0.0 {
            return Vec::new();
        }
        self.now += dt;

        let mut completed = Vec::new();
        while self.next_event <= self.now {
            let interval = self.next_event - self.last_event;
            self.intervals.push(interval);
            completed.push(interval);
            self.last_event = self.next_event;
            self.next_event = self.last_event + sampler.exponential(self.rate);
        }
        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::mean;

    #[test]
    fn stale_tick_after_stop_is_a_no_op() {
        let mut sampler = Sampler::new(Some(3));
        let mut clock = ArrivalClock::new(5.0, 100);
        clock.start(&mut sampler);
        clock.advance(10.0, &mut sampler);
        let recorded = clock.intervals().len();
        assert!(recorded > 0);

        clock.stop();
        let late = clock.advance(10.0, &mut sampler);
        assert!(late.is_empty());
        assert_eq!(clock.intervals().len(), recorded);
    }

    #[test]
    fn advance_before_start_records_nothing() {
        let mut sampler = Sampler::new(Some(3));
        let mut clock = ArrivalClock::new(5.0, 100);
        assert!(clock.advance(1.0, &mut sampler).is_empty());
        assert_eq!(clock.run_state(), RunState::Stopped);
    }

    #[test]
    fn intervals_are_exponential_with_the_configured_rate() {
        let mut sampler = Sampler::new(Some(17));
        let mut clock = ArrivalClock::new(4.0, 10_000);
        clock.start(&mut sampler);
        // Small fixed ticks, as a 20ms frame loop would deliver.
        for _ in 0..200_000 {
            clock.advance(0.02, &mut sampler);
        }
        let intervals = clock.intervals().as_vec();
        assert!(intervals.len() > 1_000);
        let m = mean(&intervals);
        assert!((m - 0.25).abs() < 0.25 * 0.05, "mean interval {m}");
    }

    #[test]
    fn scheduling_is_absolute_not_accumulated() {
        // Completed event times partition elapsed time exactly: the sum of
        // intervals equals the last event time, independent of tick size.
        let mut sampler = Sampler::new(Some(8));
        let mut clock = ArrivalClock::new(2.0, 100_000);
        clock.start(&mut sampler);
        for _ in 0..1_000 {
            clock.advance(0.173, &mut sampler);
        }
        let total: f64 = clock.intervals().as_vec().iter().sum();
        assert!(total <= clock.elapsed() + 1e-9);
        assert!(clock.elapsed() - total < 10.0, "pending gap should be short");
    }

    #[test]
    fn degenerate_rate_never_fires() {
        let mut sampler = Sampler::new(Some(4));
        let mut clock = ArrivalClock::new(0.0, 100);
        clock.start(&mut sampler);
        assert!(clock.advance(1_000.0, &mut sampler).is_empty());
        assert!(clock.intervals().is_empty());
    }

    #[test]
    fn reset_clears_history_and_stops() {
        let mut sampler = Sampler::new(Some(6));
        let mut clock = ArrivalClock::new(3.0, 100);
        clock.start(&mut sampler);
        clock.advance(20.0, &mut sampler);
        assert!(!clock.intervals().is_empty());

        clock.reset();
        assert_eq!(clock.run_state(), RunState::Stopped);
        assert!(clock.intervals().is_empty());
        assert_eq!(clock.elapsed(), 0.0);
    }
}
