use crate::core::vec2::{IVec2, Vec2};
use crate::domain::color::Rgba;
use crate::domain::materials::MaterialId;

/// Material-specific integer slots per particle
pub const PARTICLE_DATA_SLOTS: usize = 4;

/// Opaque reference to a pool slot. The generation changes every time the
/// slot is freed, so handles held across a despawn go stale instead of
/// aliasing the slot's next occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticleHandle {
    index: u32,
    generation: u32,
}

impl ParticleHandle {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub material: MaterialId,
    pub pos: IVec2,
    pub velocity: Vec2,
    /// Fractional displacement carried between ticks
    pub delta: Vec2,
    /// Cosmetic overlay composited at render time
    pub deco: Rgba,
    pub data: [i32; PARTICLE_DATA_SLOTS],
    pub alive: bool,
}

impl Particle {
    /// A freshly reset record at `pos`
    pub fn new(material: MaterialId, pos: IVec2) -> Self {
        Self {
            material,
            pos,
            velocity: Vec2::ZERO,
            delta: Vec2::ZERO,
            deco: Rgba::TRANSPARENT,
            data: [0; PARTICLE_DATA_SLOTS],
            alive: true,
        }
    }

    pub(crate) fn dead() -> Self {
        Self {
            alive: false,
            ..Self::new(MaterialId::Empty, IVec2::ZERO)
        }
    }
}
