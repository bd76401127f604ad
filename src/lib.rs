// src/lib.rs

pub mod config;
pub mod context;
pub mod destinations;
pub mod error;
pub mod orchestrator;
pub mod panel;
pub mod render;
pub mod repl;
pub mod simulator;
pub mod transcript;
pub mod transport;

pub use error::{PlannerError, Result};
