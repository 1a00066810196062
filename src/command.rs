// src/command.rs
use anyhow::Result;

use crate::config::IndependenceConfig;
use crate::engine::split_merge::{Emitter, EmitterMode};
use crate::state::LabState;

/// Which continuously-running demo a lifecycle command addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Emitters,
    Arrivals,
}

/// A UI gesture reduced to an explicit message against the simulation
/// context. The handler's reaction to each command is the testable unit,
/// independent of whatever transport delivered it.
pub trait Command {
    fn execute(&self, state: &mut LabState) -> Result<()>;
}

pub struct StartCommand(pub Demo);
impl Command for StartCommand {
    fn execute(&self, state: &mut LabState) -> Result<()> {
        match self.0 {
            Demo::Emitters => state.emitters.start(),
            Demo::Arrivals => state.arrivals.start(&mut state.sampler),
        }
        Ok(())
    }
}

pub struct StopCommand(pub Demo);
impl Command for StopCommand {
    fn execute(&self, state: &mut LabState) -> Result<()> {
        match self.0 {
            Demo::Emitters => state.emitters.stop(),
            Demo::Arrivals => state.arrivals.stop(),
        }
        Ok(())
    }
}

pub struct ResetCommand(pub Demo);
impl Command for ResetCommand {
    fn execute(&self, state: &mut LabState) -> Result<()> {
        match self.0 {
            Demo::Emitters => {
                state.emitters.reset();
                state.last_tick = None;
            }
            Demo::Arrivals => state.arrivals.reset(),
        }
        Ok(())
    }
}

/// One whole-second tick of the splitting/merging demo. Harmless while
/// stopped, so a timer callback that outlives a stop does nothing.
pub struct TickCommand;
impl Command for TickCommand {
    fn execute(&self, state: &mut LabState) -> Result<()> {
        state.last_tick = state.emitters.tick(&mut state.sampler);
        Ok(())
    }
}

/// Advance the animated arrivals demo by a frame interval, in seconds.
pub struct AdvanceCommand(pub f64);
impl Command for AdvanceCommand {
    fn execute(&self, state: &mut LabState) -> Result<()> {
        state.arrivals.advance(self.0, &mut state.sampler);
        Ok(())
    }
}

pub struct SetEmitterRateCommand {
    pub emitter: Emitter,
    pub rate: f64,
}
impl Command for SetEmitterRateCommand {
    fn execute(&self, state: &mut LabState) -> Result<()> {
        state.emitters.set_rate(self.emitter, self.rate)
    }
}

pub struct SetModeCommand(pub EmitterMode);
impl Command for SetModeCommand {
    fn execute(&self, state: &mut LabState) -> Result<()> {
        state.emitters.set_mode(self.0);
        Ok(())
    }
}

pub struct SetArrivalRateCommand(pub f64);
impl Command for SetArrivalRateCommand {
    fn execute(&self, state: &mut LabState) -> Result<()> {
        state.arrivals.set_rate(self.0, &mut state.sampler);
        Ok(())
    }
}

pub struct SetIndependenceCommand(pub IndependenceConfig);
impl Command for SetIndependenceCommand {
    fn execute(&self, state: &mut LabState) -> Result<()> {
        self.0.validate()?;
        state.independence = self.0;
        Ok(())
    }
}

pub struct RunIndependenceCommand;
impl Command for RunIndependenceCommand {
    fn execute(&self, state: &mut LabState) -> Result<()> {
        state.run_independence();
        Ok(())
    }
}

/// Update the convergence sliders and recompute. An out-of-range lambda is
/// clamped and surfaced as an inline message rather than a failure.
pub struct SetConvergenceCommand {
    pub n: u32,
    pub lambda: f64,
}
impl Command for SetConvergenceCommand {
    fn execute(&self, state: &mut LabState) -> Result<()> {
        state.convergence.n = self.n;
        state.convergence.lambda = self.lambda;
        state.run_convergence();
        Ok(())
    }
}
