// src/engine/split_merge.rs
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::RunState;
use crate::config::SplitMergeConfig;
use crate::dist::PoissonPmf;
use crate::histogram::{discrete_histogram, DiscreteHistogram, HistogramScale};
use crate::sampling::Sampler;
use crate::series::RollingSeries;
use crate::stats::mean;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmitterMode {
    Splitting,
    Merging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emitter {
    One,
    Two,
}

/// Position token for the animation collaborator; the engine attaches no
/// meaning to it beyond identifying which source emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmissionSource {
    Emitter1,
    Emitter2,
    Merged,
}

/// One burst of decorative particles: a source position and how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emission {
    pub source: EmissionSource,
    pub count: u32,
}

/// What happened during a single one-second tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickReport {
    pub second: u64,
    pub emissions: Vec<Emission>,
    /// Set when the particle-ceiling failsafe forced a reset this tick.
    pub forced_reset: bool,
}

/// Per-second timeline handed to the line-chart collaborator. Each dataset
/// is aligned to `labels`; `None` leaves a gap where that dataset was not
/// active (splitting vs merging ticks).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    pub labels: Vec<String>,
    pub emitter1: Vec<Option<u32>>,
    pub emitter2: Vec<Option<u32>>,
    pub merged: Vec<Option<u32>>,
}

/// Histogram payload for the current mode, empirical counts plus the
/// Poisson PMF overlay scaled to the window size. Both splitting histograms
/// share one 0..=max axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SplitMergeHistogram {
    Splitting {
        emitter1: DiscreteHistogram,
        emitter2: DiscreteHistogram,
    },
    Merging { merged: DiscreteHistogram },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmitterSummary {
    pub rate: f64,
    pub empirical_mean: f64,
    pub abs_error: f64,
}

/// Scalar summary line shown under the charts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum SplitMergeSummary {
    Splitting {
        emitter1: EmitterSummary,
        emitter2: EmitterSummary,
    },
    Merging(EmitterSummary),
}

/// Continuous-mode engine for the Poisson splitting/merging demo.
///
/// Owns all mutable simulation state; ticks are delivered by the command
/// layer once per whole second and run to completion, so no other mutation
/// can interleave with them.
#[derive(Debug)]
pub struct SplitMergeEngine {
    config: SplitMergeConfig,
    rate1: f64,
    rate2: f64,
    mode: EmitterMode,
    run_state: RunState,
    elapsed_seconds: u64,
    total1: u64,
    total2: u64,
    counts1: RollingSeries<u32>,
    counts2: RollingSeries<u32>,
    counts_merged: RollingSeries<u32>,
    timeline: Timeline,
    active_particles: u32,
    pmf: PoissonPmf,
}

impl SplitMergeEngine {
    pub fn new(config: SplitMergeConfig) -> Self {
        let capacity = config.histogram_capacity;
        Self {
            rate1: config.rate1,
            rate2: config.rate2,
            config,
            mode: EmitterMode::Splitting,
            run_state: RunState::Stopped,
            elapsed_seconds: 0,
            total1: 0,
            total2: 0,
            counts1: RollingSeries::with_capacity(capacity),
            counts2: RollingSeries::with_capacity(capacity),
            counts_merged: RollingSeries::with_capacity(capacity),
            timeline: Timeline::default(),
            active_particles: 0,
            pmf: PoissonPmf::new(),
        }
    }

    pub fn mode(&self) -> EmitterMode {
        self.mode
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn rates(&self) -> (f64, f64) {
        (self.rate1, self.rate2)
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn totals(&self) -> (u64, u64) {
        (self.total1, self.total2)
    }

    pub fn active_particles(&self) -> u32 {
        self.active_particles
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn start(&mut self) {
        if self.run_state == RunState::Stopped {
            debug!(rate1 = self.rate1, rate2 = self.rate2, "split/merge started");
            self.run_state = RunState::Running;
        }
    }

    pub fn stop(&mut self) {
        if self.run_state == RunState::Running {
            debug!("split/merge stopped");
        }
        self.run_state = RunState::Stopped;
    }

    /// Clear all accumulated series and counters and return to the stopped,
    /// splitting state. Rates keep their current slider values.
    pub fn reset(&mut self) {
        debug!("split/merge reset");
        self.run_state = RunState::Stopped;
        self.mode = EmitterMode::Splitting;
        self.elapsed_seconds = 0;
        self.total1 = 0;
        self.total2 = 0;
        self.counts1.clear();
        self.counts2.clear();
        self.counts_merged.clear();
        self.timeline = Timeline::default();
        self.active_particles = 0;
    }

    /// Change an emitter rate. While splitting this clears accumulated data
    /// (histograms built at the old rate would be misleading); while merged
    /// the rates are locked and the change is rejected.
    pub fn set_rate(&mut self, emitter: Emitter, rate: f64) -> Result<()> {
        if self.mode == EmitterMode::Merging {
            bail!("emitter rates are locked while merged; reset to splitting first");
        }
        if rate < 0.0 {
            bail!("emitter rate must be non-negative, got {rate}");
        }
        match emitter {
            Emitter::One => self.rate1 = rate,
            Emitter::Two => self.rate2 = rate,
        }
        let was_running = self.run_state;
        self.reset();
        self.run_state = was_running;
        Ok(())
    }

    /// Switch between splitting and merging. Leaving merging is a full
    /// reset back to the splitting state, as the demo's toggle button does.
    pub fn set_mode(&mut self, mode: EmitterMode) {
        if mode == self.mode {
            return;
        }
        match mode {
            EmitterMode::Merging => self.mode = EmitterMode::Merging,
            EmitterMode::Splitting => {
                let was_running = self.run_state;
                self.reset();
                self.run_state = was_running;
            }
        }
    }

    /// The animation layer reports retired particles so the failsafe
    /// counter tracks what is actually on screen.
    pub fn retire_particles(&mut self, count: u32) {
        self.active_particles = self.active_particles.saturating_sub(count);
    }

    /// Advance one whole second. Returns `None` while stopped, so a stale
    /// timer callback that fires after stop has no effect.
    pub fn tick(&mut self, sampler: &mut Sampler) -> Option<TickReport> {
        if self.run_state != RunState::Running {
            return None;
        }

        self.elapsed_seconds += 1;
        self.timeline
            .labels
            .push(format!("Sec {}", self.elapsed_seconds));

        let emissions = match self.mode {
            EmitterMode::Merging => {
                let count = sampler.poisson(self.rate1 + self.rate2);
                self.counts_merged.push(count);
                self.timeline.merged.push(Some(count));
                self.timeline.emitter1.push(None);
                self.timeline.emitter2.push(None);
                vec![Emission {
                    source: EmissionSource::Merged,
                    count,
                }]
            }
            EmitterMode::Splitting => {
                let count1 = sampler.poisson(self.rate1);
                let count2 = sampler.poisson(self.rate2);
                self.total1 += count1 as u64;
                self.total2 += count2 as u64;
                self.counts1.push(count1);
                self.counts2.push(count2);
                self.timeline.emitter1.push(Some(count1));
                self.timeline.emitter2.push(Some(count2));
                self.timeline.merged.push(None);
                vec![
                    Emission {
                        source: EmissionSource::Emitter1,
                        count: count1,
                    },
                    Emission {
                        source: EmissionSource::Emitter2,
                        count: count2,
                    },
                ]
            }
        };

        let second = self.elapsed_seconds;
        self.active_particles += emissions.iter().map(|e| e.count).sum::<u32>();

        let forced_reset = self.active_particles > self.config.particle_ceiling;
        if forced_reset {
            warn!(
                active = self.active_particles,
                ceiling = self.config.particle_ceiling,
                "particle ceiling exceeded, resetting simulation"
            );
            self.reset();
        }

        Some(TickReport {
            second,
            emissions,
            forced_reset,
        })
    }

    /// Histogram of the rolling per-second counts for the current mode,
    /// with the matching Poisson PMF overlay on the counts scale.
    pub fn histogram(&mut self) -> Option<SplitMergeHistogram> {
        match self.mode {
            EmitterMode::Splitting => {
                let max1 = self.counts1.iter().copied().max()?;
                let max2 = self.counts2.iter().copied().max().unwrap_or(0);
                let span = max1.max(max2);
                let data1 = self.counts1.as_vec();
                let data2 = self.counts2.as_vec();
                let rate1 = self.rate1;
                let rate2 = self.rate2;
                let pmf = &mut self.pmf;
                let emitter1 = discrete_histogram(&data1, Some(span), HistogramScale::Counts, |k| {
                    pmf.eval(rate1, k)
                })?;
                let emitter2 = discrete_histogram(&data2, Some(span), HistogramScale::Counts, |k| {
                    pmf.eval(rate2, k)
                })?;
                Some(SplitMergeHistogram::Splitting { emitter1, emitter2 })
            }
            EmitterMode::Merging => {
                let data = self.counts_merged.as_vec();
                let rate = self.rate1 + self.rate2;
                let pmf = &mut self.pmf;
                let merged =
                    discrete_histogram(&data, None, HistogramScale::Counts, |k| pmf.eval(rate, k))?;
                Some(SplitMergeHistogram::Merging { merged })
            }
        }
    }

    /// Empirical-vs-theoretical rate summary for the current mode.
    pub fn summary(&self) -> SplitMergeSummary {
        match self.mode {
            EmitterMode::Merging => {
                let counts: Vec<f64> = self
                    .timeline
                    .merged
                    .iter()
                    .flatten()
                    .map(|&c| c as f64)
                    .collect();
                let empirical = mean(&counts);
                let rate = self.rate1 + self.rate2;
                SplitMergeSummary::Merging(EmitterSummary {
                    rate,
                    empirical_mean: empirical,
                    abs_error: (empirical - rate).abs(),
                })
            }
            EmitterMode::Splitting => {
                let seconds = self.elapsed_seconds.max(1) as f64;
                let emp1 = if self.elapsed_seconds > 0 {
                    self.total1 as f64 / seconds
                } else {
                    0.0
                };
                let emp2 = if self.elapsed_seconds > 0 {
                    self.total2 as f64 / seconds
                } else {
                    0.0
                };
                SplitMergeSummary::Splitting {
                    emitter1: EmitterSummary {
                        rate: self.rate1,
                        empirical_mean: emp1,
                        abs_error: (emp1 - self.rate1).abs(),
                    },
                    emitter2: EmitterSummary {
                        rate: self.rate2,
                        empirical_mean: emp2,
                        abs_error: (emp2 - self.rate2).abs(),
                    },
                }
            }
        }
    }
}
