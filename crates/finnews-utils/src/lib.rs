//! Shared utilities for finnews-rs
//!
//! This crate provides common functionality used across the finnews-rs
//! workspace, currently logging setup.

pub mod logging;

pub use logging::init_tracing;
