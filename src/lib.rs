//! encfacter library
//!
//! This module exposes the pipeline stages for the binary and for integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod output;
