//! Integration tests for dasl-trading

mod common;
mod loader_test;
mod simulator_test;
