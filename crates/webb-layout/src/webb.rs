//! The webb panel.
//!
//! Two strips wound around a hexagon of hexagons. The inner strip traces the
//! centre cell, the six cells around it and the spokes reaching out to the
//! outer ring; the outer strip runs around the rim, with 14 LEDs on the long
//! outer sides.

use crate::builder::{Layout, LayoutBuilder, SequenceSpec};
use crate::config::LayoutConfig;
use crate::Result;

pub const INNER: &str = "inner";
pub const OUTER: &str = "outer";

/// Sequences making up the inner strip, in wiring order.
pub const INNER_SEQUENCES: &[SequenceSpec] = &[
    SequenceSpec::new("UL", "R DR DL L UL UR"),
    SequenceSpec::new(
        "UL",
        "UL UR R DR !DL UR R DR DL !L R DR DL L !UL DR DL L UL !UR DL L UL UR !R L UL UR R",
    ),
    SequenceSpec::new("UL UL UR", "UL"),
    SequenceSpec::new("UR UR UL", "UR"),
    SequenceSpec::new("UR UR R", "UR"),
    SequenceSpec::new("R R UR", "R"),
    SequenceSpec::new("R R DR", "R"),
    SequenceSpec::new("DR DR R", "DR"),
    SequenceSpec::new("DR DR DL", "DR"),
    SequenceSpec::new("DL DL DR", "DL"),
    SequenceSpec::new("DL DL L", "DL"),
    SequenceSpec::new("L L DL", "L"),
    SequenceSpec::new("L L UL", "L"),
    SequenceSpec::new("UL UL L", "UL"),
];

/// The outer strip is a single sequence around the rim.
pub const OUTER_SEQUENCES: &[SequenceSpec] = &[SequenceSpec::new(
    "UL UL UR UL",
    "UR R14 DR R DR14 R DR14 DL DR DL14 DR DL14 L DL L14 \
     DL L14 UL L UL14 L UL14 UR UL UR14 UL UR14 R UR R14",
)];

/// Build the webb panel layout.
pub fn build(config: LayoutConfig) -> Result<Layout> {
    let mut builder = LayoutBuilder::new(config)?;
    builder.strip(INNER, INNER_SEQUENCES)?;
    builder.strip(OUTER, OUTER_SEQUENCES)?;
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_sizes() {
        let layout = build(LayoutConfig::default()).unwrap();
        assert_eq!(layout.strip(INNER).unwrap().len(), 546);
        assert_eq!(layout.strip(OUTER).unwrap().len(), 402);
        assert_eq!(layout.len(), 948);
        assert_eq!(layout.segments.len(), 72);
    }

    #[test]
    fn outer_starts_after_inner() {
        let layout = build(LayoutConfig::default()).unwrap();
        let inner = layout.strip(INNER).unwrap();
        let outer = layout.strip(OUTER).unwrap();
        assert_eq!(inner.range.end, outer.range.start);
    }
}
