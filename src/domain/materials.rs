//! Material Definitions - ids, state tiers and the built-in property table
//!
//! Ids are a closed enum; properties live in `MaterialDef` rows owned by the
//! registry. `Empty` is the reserved "no particle" sentinel and is never
//! stored in a live particle record.

use serde::{Deserialize, Serialize};

use super::color::Rgba;

pub type MaterialIndex = u8;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialId {
    Empty = 0,
    Brick = 1,
    Wood = 2,
    Sand = 3,
    Water = 4,
    Oil = 5,
    Steam = 6,
    Fire = 7,
}

impl MaterialId {
    pub const COUNT: usize = 8;

    pub const ALL: [MaterialId; MaterialId::COUNT] = [
        MaterialId::Empty,
        MaterialId::Brick,
        MaterialId::Wood,
        MaterialId::Sand,
        MaterialId::Water,
        MaterialId::Oil,
        MaterialId::Steam,
        MaterialId::Fire,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(id: MaterialIndex) -> Option<MaterialId> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn key(self) -> &'static str {
        match self {
            MaterialId::Empty => "empty",
            MaterialId::Brick => "brick",
            MaterialId::Wood => "wood",
            MaterialId::Sand => "sand",
            MaterialId::Water => "water",
            MaterialId::Oil => "oil",
            MaterialId::Steam => "steam",
            MaterialId::Fire => "fire",
        }
    }

    pub fn from_key(key: &str) -> Option<MaterialId> {
        Self::ALL.iter().copied().find(|m| m.key() == key)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MaterialId::Empty => "Empty",
            MaterialId::Brick => "Brick",
            MaterialId::Wood => "Wood",
            MaterialId::Sand => "Sand",
            MaterialId::Water => "Water",
            MaterialId::Oil => "Oil",
            MaterialId::Steam => "Steam",
            MaterialId::Fire => "Fire",
        }
    }

    #[inline]
    pub fn is_placeable(self) -> bool {
        self != MaterialId::Empty
    }
}

/// Physical state, ordered densest first. A mover may displace an occupant
/// only when its own tier is strictly lower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateTier {
    Solid = 0,
    Powder = 1,
    Liquid = 2,
    Gas = 3,
}

impl StateTier {
    /// Solids are never dispatched to the motion solver
    #[inline]
    pub fn is_movable(self) -> bool {
        self != StateTier::Solid
    }

    #[inline]
    pub fn can_displace(self, occupant: StateTier) -> bool {
        self < occupant
    }
}

/// Immutable per-material properties
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDef {
    #[serde(skip)]
    pub id: MaterialId,
    pub tier: StateTier,
    /// Negative mass falls "up" (buoyant)
    pub mass: f32,
    pub friction: f32,
    /// Degrees; >= 90 disables lateral spilling
    pub repose_angle: f32,
    pub flammable: bool,
    /// Per-tick chance of a random hop, gases only
    pub dispersion: f32,
    pub color: Rgba,
    /// Max alpha of the dark grain overlay rolled at spawn
    pub grain: u8,
}

impl MaterialDef {
    #[inline]
    pub fn spills(&self) -> bool {
        self.repose_angle < 90.0
    }
}

const fn def(
    id: MaterialId,
    tier: StateTier,
    mass: f32,
    friction: f32,
    repose_angle: f32,
    flammable: bool,
    dispersion: f32,
    color: Rgba,
    grain: u8,
) -> MaterialDef {
    MaterialDef { id, tier, mass, friction, repose_angle, flammable, dispersion, color, grain }
}

/// Built-in table, indexed by `MaterialId`
pub const BUILTIN_MATERIALS: [MaterialDef; MaterialId::COUNT] = [
    def(MaterialId::Empty, StateTier::Gas, 0.0, 1.0, 90.0, false, 0.0, Rgba::TRANSPARENT, 0),
    def(MaterialId::Brick, StateTier::Solid, 0.0, 0.0, 90.0, false, 0.0, Rgba::rgb(0xB0, 0x40, 0x30), 40),
    def(MaterialId::Wood, StateTier::Solid, 0.0, 0.0, 90.0, true, 0.0, Rgba::rgb(0x80, 0x50, 0x20), 30),
    def(MaterialId::Sand, StateTier::Powder, 0.4, 0.5, 45.0, false, 0.0, Rgba::rgb(0xFF, 0xE0, 0xA0), 48),
    def(MaterialId::Water, StateTier::Liquid, 1.0, 0.0, 0.0, false, 0.0, Rgba::rgb(0x00, 0x00, 0xFF), 0),
    def(MaterialId::Oil, StateTier::Liquid, 0.8, 0.2, 10.0, true, 0.0, Rgba::rgb(0x40, 0x30, 0x20), 16),
    def(MaterialId::Steam, StateTier::Gas, -0.3, 0.5, 0.0, false, 0.6, Rgba::rgb(0xD0, 0xD0, 0xE0), 20),
    def(MaterialId::Fire, StateTier::Gas, -0.5, 0.3, 30.0, false, 0.3, Rgba::rgb(0xFF, 0x60, 0x10), 0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_indexed_by_id() {
        for (idx, def) in BUILTIN_MATERIALS.iter().enumerate() {
            assert_eq!(def.id.index(), idx);
        }
    }

    #[test]
    fn tiers_are_ordered_densest_first() {
        assert!(StateTier::Solid.can_displace(StateTier::Powder));
        assert!(StateTier::Powder.can_displace(StateTier::Liquid));
        assert!(StateTier::Liquid.can_displace(StateTier::Gas));
        assert!(!StateTier::Liquid.can_displace(StateTier::Liquid));
        assert!(!StateTier::Gas.can_displace(StateTier::Powder));
    }

    #[test]
    fn keys_round_trip() {
        for id in MaterialId::ALL {
            assert_eq!(MaterialId::from_key(id.key()), Some(id));
            assert_eq!(MaterialId::from_index(id as u8), Some(id));
        }
        assert_eq!(MaterialId::from_key("lava"), None);
        assert_eq!(MaterialId::from_index(200), None);
    }
}
