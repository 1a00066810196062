// src/config/mod.rs
pub mod demo;

// Re-export commonly used types
pub use demo::{ConvergenceConfig, IndependenceConfig, SplitMergeConfig};
