//! # SchoolReg Library
//!
//! This library exposes the SchoolReg modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod config;

// Re-export schoolreg_core for convenience
pub use schoolreg_core;
