//! Fixed-point Cartesian and polar projection.
//!
//! The firmware works in 16-bit integers. Coordinates are normalized so the
//! largest absolute coordinate maps to `scale`, and angles use the same number
//! of units for one full turn, so radius and angle math share one scale.
//!
//! All values are truncated toward zero, matching the table the firmware was
//! tuned against.

use serde::Serialize;

use crate::builder::Layout;
use crate::direction::Vec2;
use crate::{Error, Result};

/// A quantized Cartesian point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FixedPoint {
    pub x: i16,
    pub y: i16,
}

/// A quantized polar point. `angle` counts `scale` units per turn,
/// counter-clockwise from the positive x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PolarPoint {
    pub radius: i16,
    pub angle: i16,
}

impl PolarPoint {
    /// Back to real-valued Cartesian coordinates in fixed-point units.
    pub fn to_cartesian(&self, scale: u16) -> Vec2 {
        let radians = f64::from(self.angle) / f64::from(scale) * std::f64::consts::TAU;
        Vec2::new(
            f64::from(self.radius) * radians.cos(),
            f64::from(self.radius) * radians.sin(),
        )
    }
}

/// Every LED in both forms, in combined-strip order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub scale: u16,
    /// Real-valued coordinate that was mapped to `scale`.
    pub max_abs: f64,
    pub cartesian: Vec<FixedPoint>,
    pub polar: Vec<PolarPoint>,
}

impl Projection {
    /// Smallest LED radius.
    pub fn radius_min(&self) -> i16 {
        self.polar.iter().map(|p| p.radius).min().unwrap_or(0)
    }

    /// Largest LED radius.
    pub fn radius_max(&self) -> i16 {
        self.polar.iter().map(|p| p.radius).max().unwrap_or(0)
    }
}

/// Project every LED of `layout` using the configured scale.
pub fn project(layout: &Layout) -> Result<Projection> {
    project_points(&layout.points, layout.config.scale)
}

/// Project `points` onto a `scale`-unit fixed-point grid.
pub fn project_points(points: &[Vec2], scale: u16) -> Result<Projection> {
    let max_abs = points.iter().map(Vec2::max_abs).fold(0.0, f64::max);
    if max_abs <= 0.0 || !max_abs.is_finite() {
        return Err(Error::EmptyLayout);
    }

    let cartesian = points
        .iter()
        .map(|p| {
            Ok(FixedPoint {
                x: normalize(p.x, max_abs, scale)?,
                y: normalize(p.y, max_abs, scale)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let polar = cartesian
        .iter()
        .map(|p| to_polar(*p, scale))
        .collect::<Result<Vec<_>>>()?;

    Ok(Projection {
        scale,
        max_abs,
        cartesian,
        polar,
    })
}

fn normalize(value: f64, max_abs: f64, scale: u16) -> Result<i16> {
    to_i16(value / max_abs * f64::from(scale), scale)
}

/// Polar form of a quantized point.
///
/// The angle is measured in degrees, wrapped into `[0, 360)`, then rescaled
/// so one turn is `scale` units.
pub fn to_polar(point: FixedPoint, scale: u16) -> Result<PolarPoint> {
    let x = f64::from(point.x);
    let y = f64::from(point.y);

    let radius = (x * x + y * y).sqrt();

    let mut degrees = y.atan2(x).to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    let units = (degrees * (f64::from(scale) / 360.0)).trunc();
    // A hair below zero can round up to a full turn.
    let units = if units >= f64::from(scale) { 0.0 } else { units };

    Ok(PolarPoint {
        radius: to_i16(radius, scale)?,
        angle: to_i16(units, scale)?,
    })
}

fn to_i16(value: f64, scale: u16) -> Result<i16> {
    let truncated = value.trunc();
    if truncated < f64::from(i16::MIN) || truncated > f64::from(i16::MAX) || truncated.is_nan() {
        return Err(Error::ScaleOverflow { value, scale });
    }
    Ok(truncated as i16)
}
