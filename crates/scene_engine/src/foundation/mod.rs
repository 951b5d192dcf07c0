//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and 2D transform helpers
//! - Logging utilities

pub mod math;
pub mod logging;
