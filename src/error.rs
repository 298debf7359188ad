//! Error types for load-time failures and invariant checks
//!
//! Per-call simulation failures stay sentinel returns (`Option` / `bool`);
//! these types cover material bundles, configuration and validation.

use thiserror::Error;

use crate::core::vec2::IVec2;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to parse material bundle: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown material key: {0}")]
    UnknownMaterial(String),

    #[error("material key is reserved: {0}")]
    ReservedMaterial(String),

    #[error("duplicate definition for material {0}")]
    DuplicateMaterial(&'static str),

    #[error("missing definition for material {0}")]
    MissingMaterial(&'static str),

    #[error("material {material}: {field} = {value} is out of range")]
    InvalidProperty {
        material: &'static str,
        field: &'static str,
        value: f32,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("cell ({}, {}) references a dead or stale handle", .cell.x, .cell.y)]
    StaleHandle { cell: IVec2 },

    #[error("cell ({}, {}) references particle stored at ({}, {})", .cell.x, .cell.y, .stored.x, .stored.y)]
    PositionMismatch { cell: IVec2, stored: IVec2 },

    #[error("live particle in slot {slot} is not registered at ({}, {})", .pos.x, .pos.y)]
    Unregistered { slot: u32, pos: IVec2 },

    #[error("{occupied} occupied cells but {alive} live particles")]
    CountMismatch { occupied: usize, alive: usize },
}
