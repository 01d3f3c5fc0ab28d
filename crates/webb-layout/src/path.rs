//! Path mini-language.
//!
//! A path is a whitespace-separated list of tokens. Each token names a hex
//! side (`UL`, `UR`, `R`, `DR`, `DL`, `L`), optionally followed by an LED count
//! (`R14`). A leading `!` moves the cursor along that side without placing
//! LEDs.

use crate::adjacency::END_FLAG;
use crate::direction::{Direction, HexGeometry, Vec2};
use crate::{Error, Result};

/// One parsed token of a direction path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathToken {
    /// Move the cursor along a side, placing no LEDs.
    Skip(Direction),
    /// Place LEDs along a side; `None` means the default count.
    Emit(Direction, Option<usize>),
}

impl PathToken {
    /// Parse one token, with or without the `!` prefix.
    pub fn parse(token: &str) -> Result<Self> {
        match token.strip_prefix('!') {
            Some(rest) => {
                let (dir, count) = parse_segment(rest).map_err(|e| retag(e, token))?;
                if count.is_some() {
                    return Err(Error::Grammar {
                        token: token.to_string(),
                        reason: "a skip cannot carry an LED count",
                    });
                }
                Ok(Self::Skip(dir))
            }
            None => {
                let (dir, count) = parse_segment(token)?;
                Ok(Self::Emit(dir, count))
            }
        }
    }
}

/// Report grammar errors against the token as written, prefix included.
fn retag(err: Error, token: &str) -> Error {
    match err {
        Error::Grammar { reason, .. } => Error::Grammar {
            token: token.to_string(),
            reason,
        },
        other => other,
    }
}

/// Split `<DIRECTION><count>?` into its direction and optional count.
///
/// The direction is the leading run of uppercase letters; the rest of the
/// token must be digits.
pub fn parse_segment(token: &str) -> Result<(Direction, Option<usize>)> {
    let grammar = |reason| Error::Grammar {
        token: token.to_string(),
        reason,
    };

    let split = token
        .find(|c: char| !c.is_ascii_uppercase())
        .unwrap_or(token.len());
    let (name, digits) = token.split_at(split);

    if name.is_empty() {
        return Err(grammar("expected a direction name"));
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(grammar("trailing characters after the LED count"));
    }

    let count = if digits.is_empty() {
        None
    } else {
        let count: usize = digits
            .parse()
            .map_err(|_| grammar("LED count out of range"))?;
        if count == 0 {
            return Err(grammar("LED count must be at least 1"));
        }
        Some(count)
    };

    Ok((name.parse()?, count))
}

/// Sum the sides named in `path`.
///
/// `"UR UL R"` is the point reached by walking up-right, up-left, then right
/// from the origin. An empty path is the origin.
pub fn resolve_path(geometry: &HexGeometry, path: &str) -> Result<Vec2> {
    path.split_whitespace()
        .try_fold(Vec2::ZERO, |acc, name| {
            let dir: Direction = name.parse()?;
            Ok(acc + geometry.vector(dir))
        })
}

/// LEDs placed along one side, plus the full side vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub points: Vec<Vec2>,
    pub extent: Vec2,
}

/// Place `count` LEDs along the side described by `token`, starting at `base`.
///
/// The side is cut into `count` equal pieces and one LED sits in the middle of
/// each, so no LED lands on a hex vertex. The returned extent is the whole
/// side, for advancing the cursor.
///
/// Counts must lie in `1..END_FLAG`; a larger side could never be packed into
/// the adjacency table.
pub fn distribute(
    geometry: &HexGeometry,
    base: Vec2,
    token: &str,
    default_count: usize,
) -> Result<Distribution> {
    let (dir, count) = parse_segment(token)?;
    let count = count.unwrap_or(default_count);
    let reason = if count == 0 {
        "LED count must be at least 1"
    } else if count >= usize::from(END_FLAG) {
        "LED count out of range"
    } else {
        return Ok(distribute_along(geometry, base, dir, count));
    };
    Err(Error::Grammar {
        token: token.to_string(),
        reason,
    })
}

fn distribute_along(
    geometry: &HexGeometry,
    base: Vec2,
    dir: Direction,
    count: usize,
) -> Distribution {
    let extent = geometry.vector(dir);
    let stride = extent / count as f64;
    let points = (0..count)
        .map(|i| base + stride * (i as f64 + 0.5))
        .collect();
    Distribution { points, extent }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> HexGeometry {
        HexGeometry::new(178.3)
    }

    #[test]
    fn single_direction_path() {
        let geo = geometry();
        let p = resolve_path(&geo, "UR").unwrap();
        assert_eq!(p, geo.vector(Direction::UpRight));
    }

    #[test]
    fn path_sums_in_order() {
        let geo = geometry();
        let p = resolve_path(&geo, "UL  UL UR").unwrap();
        let expected = geo.vector(Direction::UpLeft)
            + geo.vector(Direction::UpLeft)
            + geo.vector(Direction::UpRight);
        assert_eq!(p, expected);
    }

    #[test]
    fn empty_path_is_origin() {
        assert_eq!(resolve_path(&geometry(), "").unwrap(), Vec2::ZERO);
    }

    #[test]
    fn unknown_direction_in_path() {
        let err = resolve_path(&geometry(), "UR Z").unwrap_err();
        assert!(matches!(err, Error::UnknownDirection { ref name } if name == "Z"));
    }

    #[test]
    fn parse_with_and_without_count() {
        assert_eq!(parse_segment("R").unwrap(), (Direction::Right, None));
        assert_eq!(parse_segment("DR14").unwrap(), (Direction::DownRight, Some(14)));
    }

    #[test]
    fn parse_rejects_malformed_tokens() {
        for token in ["", "4", "r", "R4x", "R-1", "R0"] {
            let err = parse_segment(token).unwrap_err();
            assert!(matches!(err, Error::Grammar { .. }), "{token:?} gave {err}");
        }
    }

    #[test]
    fn parse_unknown_letters() {
        let err = parse_segment("Z3").unwrap_err();
        assert!(matches!(err, Error::UnknownDirection { ref name } if name == "Z"));
    }

    #[test]
    fn skip_tokens() {
        assert_eq!(PathToken::parse("!DL").unwrap(), PathToken::Skip(Direction::DownLeft));
        assert_eq!(PathToken::parse("R3").unwrap(), PathToken::Emit(Direction::Right, Some(3)));

        let err = PathToken::parse("!DL3").unwrap_err();
        assert!(matches!(err, Error::Grammar { ref token, .. } if token == "!DL3"));
    }

    #[test]
    fn distribute_centres_points() {
        let geo = geometry();
        let base = Vec2::new(10.0, -5.0);
        let e = geo.vector(Direction::Right);

        let d = distribute(&geo, base, "R4", 13).unwrap();

        assert_eq!(d.extent, e);
        let expected: Vec<Vec2> = [0.5, 1.5, 2.5, 3.5]
            .iter()
            .map(|&k| base + e / 4.0 * k)
            .collect();
        assert_eq!(d.points, expected);
    }

    #[test]
    fn distribute_uses_default_count() {
        let d = distribute(&geometry(), Vec2::ZERO, "UL", 13).unwrap();
        assert_eq!(d.points.len(), 13);
    }

    #[test]
    fn distribute_never_touches_endpoints() {
        let geo = geometry();
        let d = distribute(&geo, Vec2::ZERO, "DL7", 13).unwrap();
        let half_stride = geo.side() / 7.0 / 2.0;

        let first = d.points.first().unwrap();
        let last = d.points.last().unwrap();
        assert!((first.distance(&Vec2::ZERO) - half_stride).abs() < 1e-9);
        assert!((last.distance(&d.extent) - half_stride).abs() < 1e-9);
    }

    #[test]
    fn distribute_rejects_bad_token() {
        let err = distribute(&geometry(), Vec2::ZERO, "R4x", 13).unwrap_err();
        assert!(err.to_string().contains("R4x"));
    }

    #[test]
    fn distribute_caps_the_count() {
        let geo = geometry();
        let err = distribute(&geo, Vec2::ZERO, "R1000000000", 13).unwrap_err();
        assert!(matches!(err, Error::Grammar { ref token, .. } if token == "R1000000000"));

        let limit = usize::from(END_FLAG);
        assert!(distribute(&geo, Vec2::ZERO, "L", limit).is_err());
        assert_eq!(distribute(&geo, Vec2::ZERO, "L", limit - 1).unwrap().points.len(), limit - 1);
    }
}
