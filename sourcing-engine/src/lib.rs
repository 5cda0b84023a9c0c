#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/**
 * The arithmetic of sourcing one request from one location.
 */
pub mod cost;

/**
 * Construction-time settings for the engine.
 */
mod config;
pub use config::{ConfigError, EngineConfig};

/**
 * The single-pass selection of the cheapest and convenient locations.
 */
mod engine;
pub use engine::AllocationEngine;

mod error;
pub use error::{Collaborator, EngineError};
