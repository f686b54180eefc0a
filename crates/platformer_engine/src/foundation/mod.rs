//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - 2D math types, transforms and the pseudo-angle key
//! - Logging setup

pub mod math;
pub mod logging;
