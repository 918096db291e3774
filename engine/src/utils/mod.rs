//! Utility helpers shared across the engine

pub mod paths;
