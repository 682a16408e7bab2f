//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and matrix classification helpers
//! - Handle-based arenas for documents and object graphs
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;
