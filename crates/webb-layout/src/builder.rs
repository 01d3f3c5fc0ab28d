//! Layout build context.
//!
//! A [`LayoutBuilder`] walks path strings with a cursor and appends the LEDs
//! they place to one combined strip. Every emitting token becomes a
//! [`SubSegment`] whose index range is taken from the builder's running LED
//! count, so ranges stay unique and contiguous across independent sequences
//! and strips.

use std::ops::Range;

use tracing::{debug, info};

use crate::config::LayoutConfig;
use crate::direction::{HexGeometry, Vec2};
use crate::path::{distribute, resolve_path, PathToken};
use crate::Result;

/// LEDs placed by one emitting token.
///
/// `begin` and `end` are both inclusive indices into the combined strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubSegment {
    pub begin: usize,
    pub end: usize,
}

impl SubSegment {
    /// Whether `index` lies inside this sub-segment.
    pub fn contains(&self, index: usize) -> bool {
        (self.begin..=self.end).contains(&index)
    }
}

/// One sequence call: a start path for the cursor and a direction path to walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceSpec {
    pub start: &'static str,
    pub path: &'static str,
}

impl SequenceSpec {
    pub const fn new(start: &'static str, path: &'static str) -> Self {
        Self { start, path }
    }
}

/// A named, wired run of LEDs within the combined strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    pub name: String,
    pub range: Range<usize>,
}

impl Strip {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// The finished, real-valued layout.
#[derive(Debug, Clone)]
pub struct Layout {
    pub config: LayoutConfig,
    /// Every LED in wiring order; the index is the LED id.
    pub points: Vec<Vec2>,
    pub strips: Vec<Strip>,
    /// Sub-segments in emission order.
    pub segments: Vec<SubSegment>,
}

impl Layout {
    /// Total number of LEDs.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Look up a strip by name.
    pub fn strip(&self, name: &str) -> Option<&Strip> {
        self.strips.iter().find(|s| s.name == name)
    }
}

/// Accumulates LEDs and sub-segments across sequence and strip calls.
#[derive(Debug)]
pub struct LayoutBuilder {
    config: LayoutConfig,
    geometry: HexGeometry,
    points: Vec<Vec2>,
    segments: Vec<SubSegment>,
    strips: Vec<Strip>,
    strip_start: usize,
}

impl LayoutBuilder {
    /// Create an empty builder after validating `config`.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            geometry: HexGeometry::new(config.hex_height),
            config,
            points: Vec::new(),
            segments: Vec::new(),
            strips: Vec::new(),
            strip_start: 0,
        })
    }

    pub fn geometry(&self) -> &HexGeometry {
        &self.geometry
    }

    /// Index the next placed LED will get.
    pub fn next_index(&self) -> usize {
        self.points.len()
    }

    pub fn segments(&self) -> &[SubSegment] {
        &self.segments
    }

    /// Walk `direction_path` from the point named by `start_path`.
    ///
    /// Emitting tokens use `default_count` LEDs unless they carry their own
    /// count. Returns the range of LED indices this call placed. On error the
    /// builder may hold a partial sequence and should be discarded.
    pub fn sequence(
        &mut self,
        start_path: &str,
        direction_path: &str,
        default_count: usize,
    ) -> Result<Range<usize>> {
        let first = self.next_index();
        let mut cursor = resolve_path(&self.geometry, start_path)?;

        for token in direction_path.split_whitespace() {
            match PathToken::parse(token)? {
                PathToken::Skip(dir) => {
                    cursor += self.geometry.vector(dir);
                }
                PathToken::Emit(..) => {
                    let placed = distribute(&self.geometry, cursor, token, default_count)?;
                    let segment = SubSegment {
                        begin: self.next_index(),
                        end: self.next_index() + placed.points.len() - 1,
                    };
                    debug!(
                        "segment {} {}: LEDs {}..={} from {}",
                        self.segments.len(),
                        token,
                        segment.begin,
                        segment.end,
                        cursor
                    );
                    self.points.extend(placed.points);
                    self.segments.push(segment);
                    cursor += placed.extent;
                }
            }
        }

        Ok(first..self.next_index())
    }

    /// Run `sequences` in order with the configured default count and close
    /// them off as a named strip.
    pub fn strip(&mut self, name: &str, sequences: &[SequenceSpec]) -> Result<&Strip> {
        let count = self.config.leds_per_segment;
        for spec in sequences {
            self.sequence(spec.start, spec.path, count)?;
        }
        Ok(self.close_strip(name))
    }

    /// Close everything placed since the previous strip as a named strip.
    pub fn close_strip(&mut self, name: &str) -> &Strip {
        let range = self.strip_start..self.next_index();
        self.strip_start = range.end;
        info!("strip {}: {} LEDs", name, range.len());
        self.strips.push(Strip {
            name: name.to_string(),
            range,
        });
        &self.strips[self.strips.len() - 1]
    }

    /// Finish the build. LEDs placed after the last strip form an unnamed
    /// trailing strip only if any exist.
    pub fn finish(mut self) -> Layout {
        if self.strip_start < self.next_index() {
            self.close_strip("unnamed");
        }
        info!(
            "layout built: {} LEDs in {} strips, {} segments",
            self.points.len(),
            self.strips.len(),
            self.segments.len()
        );
        Layout {
            config: self.config,
            points: self.points,
            strips: self.strips,
            segments: self.segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::Error;

    fn builder() -> LayoutBuilder {
        LayoutBuilder::new(LayoutConfig::default()).unwrap()
    }

    #[test]
    fn skip_then_emit() {
        let mut b = builder();
        let geo = *b.geometry();

        let range = b.sequence("", "!DL R3", 13).unwrap();
        let layout = b.finish();

        assert_eq!(range, 0..3);
        assert_eq!(layout.segments.len(), 1);

        let start = geo.vector(Direction::DownLeft);
        let stride = geo.vector(Direction::Right) / 3.0;
        for (i, p) in layout.points.iter().enumerate() {
            assert_eq!(*p, start + stride * (i as f64 + 0.5));
        }
    }

    #[test]
    fn cursor_advances_by_full_extent() {
        let mut b = builder();
        let geo = *b.geometry();
        b.sequence("", "R2 UR2", 13).unwrap();
        let layout = b.finish();

        // Second side starts at the far end of the first one.
        let expected = geo.vector(Direction::Right) + geo.vector(Direction::UpRight) / 2.0 * 0.5;
        assert_eq!(layout.points[2], expected);
    }

    #[test]
    fn indices_run_across_calls() {
        let mut b = builder();
        let first = b.sequence("UL", "R DR", 13).unwrap();
        let second = b.sequence("UR", "L4", 13).unwrap();

        assert_eq!(first, 0..26);
        assert_eq!(second, 26..30);
        let begins: Vec<usize> = b.segments().iter().map(|s| s.begin).collect();
        assert_eq!(begins, vec![0, 13, 26]);
        assert_eq!(b.segments()[2].end, 29);
    }

    #[test]
    fn strips_partition_points() {
        let mut b = builder();
        b.strip("a", &[SequenceSpec::new("", "R UR")]).unwrap();
        b.strip("b", &[SequenceSpec::new("L", "L5"), SequenceSpec::new("", "DL")])
            .unwrap();
        let layout = b.finish();

        assert_eq!(layout.strip("a").unwrap().range, 0..26);
        assert_eq!(layout.strip("b").unwrap().range, 26..44);
        assert_eq!(layout.len(), 44);
    }

    #[test]
    fn trailing_points_get_a_strip() {
        let mut b = builder();
        b.sequence("", "R", 4).unwrap();
        let layout = b.finish();
        assert_eq!(layout.strips.len(), 1);
        assert_eq!(layout.strips[0].range, 0..4);
    }

    #[test]
    fn unknown_direction_aborts() {
        let mut b = builder();
        let err = b.sequence("", "R Z", 13).unwrap_err();
        assert!(matches!(err, Error::UnknownDirection { ref name } if name == "Z"));
    }

    #[test]
    fn zero_default_count_rejected() {
        let mut b = builder();
        assert!(matches!(b.sequence("", "R", 0), Err(Error::Grammar { .. })));
    }

    #[test]
    fn oversized_count_rejected_before_placing() {
        let mut b = builder();
        let err = b.sequence("", "R2 DR1000000000", 13).unwrap_err();
        assert!(matches!(err, Error::Grammar { ref token, .. } if token == "DR1000000000"));
        assert_eq!(b.next_index(), 2);
    }
}
