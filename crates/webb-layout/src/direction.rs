//! Hex-grid direction vocabulary.
//!
//! The panel is tiled with flat-topped hexagons, so a strip runs along one of
//! six hex sides. Each side is a displacement vector determined by the hex
//! height alone:
//!
//! ```text
//!        UL ____ UR
//!          /    \
//!      L  <      >  R
//!          \____/
//!        DL      DR
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A real-valued point or displacement in panel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Origin of panel space.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new vector.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    /// Largest absolute component.
    pub fn max_abs(&self) -> f64 {
        self.x.abs().max(self.y.abs())
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;

    #[inline]
    fn div(self, divisor: f64) -> Self {
        Self {
            x: self.x / divisor,
            y: self.y / divisor,
        }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// One of the six hex-side directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    UpLeft,
    UpRight,
    Right,
    DownRight,
    DownLeft,
    Left,
}

impl Direction {
    /// All six directions, clockwise from up-left.
    pub const ALL: [Self; 6] = [
        Self::UpLeft,
        Self::UpRight,
        Self::Right,
        Self::DownRight,
        Self::DownLeft,
        Self::Left,
    ];

    /// The token used in path strings.
    pub const fn name(self) -> &'static str {
        match self {
            Self::UpLeft => "UL",
            Self::UpRight => "UR",
            Self::Right => "R",
            Self::DownRight => "DR",
            Self::DownLeft => "DL",
            Self::Left => "L",
        }
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Self::UpLeft => Self::DownRight,
            Self::UpRight => Self::DownLeft,
            Self::Right => Self::Left,
            Self::DownRight => Self::UpLeft,
            Self::DownLeft => Self::UpRight,
            Self::Left => Self::Right,
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.name() == name)
            .ok_or_else(|| Error::UnknownDirection {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Side vectors of one hexagon size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGeometry {
    up_right: Vec2,
    right: Vec2,
}

impl HexGeometry {
    /// Derive all six side vectors from the hex height.
    pub fn new(hex_height: f64) -> Self {
        let hex_side = hex_height * 30f64.to_radians().tan();
        Self {
            up_right: Vec2::new(hex_side / 2.0, hex_height / 2.0),
            right: Vec2::new(hex_side, 0.0),
        }
    }

    /// Displacement of one full hex side in `dir`.
    pub fn vector(&self, dir: Direction) -> Vec2 {
        let up_left = Vec2::new(-self.up_right.x, self.up_right.y);
        match dir {
            Direction::UpLeft => up_left,
            Direction::UpRight => self.up_right,
            Direction::Right => self.right,
            Direction::DownRight => -up_left,
            Direction::DownLeft => -self.up_right,
            Direction::Left => -self.right,
        }
    }

    /// Length of one hex side.
    pub fn side(&self) -> f64 {
        self.right.x
    }
}
