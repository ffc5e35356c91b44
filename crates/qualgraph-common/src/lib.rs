//! Common types and utilities for the qualgraph type engine.
//!
//! This crate provides foundational pieces shared by the engine crates:
//! - String interning (`Atom`, `Interner`) for base-type and qualifier names
//! - Traversal limits and thresholds
//! - Tracing subscriber setup for debugging graph algorithms

// String interning for name deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Centralized limits and thresholds
pub mod limits;

// Opt-in tracing output
pub mod tracing_config;
pub use tracing_config::{LogFormat, LogSettings, init_tracing};
