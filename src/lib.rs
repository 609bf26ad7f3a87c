//! dasl-trading: DARL trading simulation client
//!
//! This library provides the pieces of one simulation run:
//! - Loading the price table and rule script into a request
//! - The DASL exchange format spoken by the simulation service
//! - The DaslSimulate HTTP client
//! - Flattening the simulated history into a CSV report
//! - Configuration, CLI and logging

pub mod cli;
pub mod config;
pub mod dasl;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod simulator;
pub mod telemetry;
