use serde::{Deserialize, Serialize};

/// 2D vector for velocities and sub-cell offsets
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn dot(&self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0001 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::ZERO
        }
    }

    /// Polar angle in radians (screen coordinates, +y down)
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn from_polar(radius: f32, angle: f32) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    pub fn rotated(&self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    pub fn clamp_length(&self, max: f32) -> Self {
        let len = self.length();
        if len > max && len > 0.0 {
            *self * (max / len)
        } else {
            *self
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Whole-cell part, truncated toward zero
    #[inline]
    pub fn trunc_to_cell(&self) -> IVec2 {
        IVec2::new(self.x as i32, self.y as i32)
    }

    #[inline]
    pub fn round_to_cell(&self) -> IVec2 {
        IVec2::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl std::ops::MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

/// Integer cell coordinate / offset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IVec2 {
    pub x: i32,
    pub y: i32,
}

impl IVec2 {
    pub const ZERO: IVec2 = IVec2 { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl std::ops::Add for IVec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for IVec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// 8-connected neighbourhood, row by row
pub const NEIGHBORS_8: [IVec2; 8] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_keeps_sign_of_remainder() {
        assert_eq!(Vec2::new(1.7, -1.7).trunc_to_cell(), IVec2::new(1, -1));
        assert_eq!(Vec2::new(0.9, -0.9).trunc_to_cell(), IVec2::ZERO);
    }

    #[test]
    fn rotating_down_by_quarter_turn_points_sideways() {
        let down = Vec2::new(0.0, 1.0);
        let left = down.rotated(std::f32::consts::FRAC_PI_2);
        assert_eq!(left.round_to_cell(), IVec2::new(-1, 0));
        let diag = down.rotated(-std::f32::consts::FRAC_PI_4);
        assert_eq!(diag.round_to_cell(), IVec2::new(1, 1));
    }

    #[test]
    fn polar_round_trip_preserves_magnitude() {
        let v = Vec2::from_polar(2.5, Vec2::new(1.0, 1.0).angle());
        assert!((v.length() - 2.5).abs() < 1e-5);
        assert!((v.x - v.y).abs() < 1e-5);
    }

    #[test]
    fn clamp_length_caps_magnitude() {
        let v = Vec2::new(30.0, 40.0).clamp_length(5.0);
        assert!((v.length() - 5.0).abs() < 1e-4);
        assert_eq!(Vec2::new(1.0, 0.0).clamp_length(5.0), Vec2::new(1.0, 0.0));
    }
}
