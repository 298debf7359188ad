//! Domain - material definitions, colors and the registry that binds them

pub mod color;
pub mod materials;
pub mod registry;
