// src/engine/mod.rs
pub mod convergence;
pub mod independence;
pub mod split_merge;

// Re-export commonly used types
pub use convergence::{run_convergence, ConvergenceResult};
pub use independence::{run_independence, IndependenceResult};
pub use split_merge::{
    Emission, EmissionSource, Emitter, EmitterMode, EmitterSummary, SplitMergeEngine,
    SplitMergeHistogram, SplitMergeSummary, TickReport, Timeline,
};
