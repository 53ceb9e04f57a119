//! Utility helpers shared across client UI modules.

pub mod advisor;
