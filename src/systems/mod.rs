//! Systems - the Motion Solver and per-material behaviors

pub mod behaviors;
pub mod physics;
