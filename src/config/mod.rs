//! Configuration loading and management for the Salary Engine.
//!
//! Tax tables are statutory and live in code next to their formulas. This
//! module only covers the tunable parts of the engine: the net-to-gross
//! solver and the generic frequency converter.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/engine.yaml").unwrap();
//! println!("Max iterations: {}", config.solver().max_iterations);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, FrequencySettings, SolverSettings};
