//! Colors - RGBA values, alpha compositing and canvas packing
//!
//! Render hooks work in straight (non-premultiplied) RGBA; the pixel buffer
//! handed to the canvas is packed ABGR like the rest of the engine.

use serde::{Deserialize, Serialize};

/// Background for empty cells
pub const BG_COLOR: Rgba = Rgba::new(0x0A, 0x0A, 0x0A, 0xFF);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// `self*(1-a) + overlay*a` per channel, `a` = overlay alpha in [0,1].
    /// The base alpha is kept.
    pub fn composite(self, overlay: Rgba) -> Rgba {
        if overlay.a == 0 {
            return self;
        }
        let a = overlay.a as f32 / 255.0;
        let mix = |base: u8, over: u8| -> u8 {
            (base as f32 * (1.0 - a) + over as f32 * a).round().clamp(0.0, 255.0) as u8
        };
        Rgba {
            r: mix(self.r, overlay.r),
            g: mix(self.g, overlay.g),
            b: mix(self.b, overlay.b),
            a: self.a,
        }
    }

    /// Linear interpolation, `t` clamped to [0,1]
    pub fn lerp(self, to: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| -> u8 {
            (from as f32 + (to as f32 - from as f32) * t).round() as u8
        };
        Rgba {
            r: mix(self.r, to.r),
            g: mix(self.g, to.g),
            b: mix(self.b, to.b),
            a: mix(self.a, to.a),
        }
    }

    /// Move each channel toward white by `amount` in [0,1]
    pub fn lighten(self, amount: f32) -> Rgba {
        let white = Rgba::new(0xFF, 0xFF, 0xFF, self.a);
        self.lerp(white, amount)
    }

    /// Packed little-endian ABGR (canvas ImageData byte order)
    #[inline]
    pub fn to_abgr(self) -> u32 {
        ((self.a as u32) << 24) | ((self.b as u32) << 16) | ((self.g as u32) << 8) | (self.r as u32)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Rgba::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}
