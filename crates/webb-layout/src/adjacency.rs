//! Sub-segment adjacency.
//!
//! Strips are described independently, so which sides physically meet is only
//! known from geometry. For both ends of every sub-segment we look for LEDs of
//! other sub-segments within a small radius. A valid panel has one such
//! neighbor at a free strip end and two at a junction where three hex sides
//! meet; anything else means the path strings are wrong.
//!
//! Every neighbor must itself be the first or last LED of a sub-segment, and
//! it is recorded with the end it belongs to so animations know which way to
//! walk into it.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::builder::{Layout, SubSegment};
use crate::{Error, Result};

/// Flag ORed into a packed neighbor index that refers to a sub-segment end.
pub const END_FLAG: u16 = 0x4000;

/// Packed value of an unused neighbor slot.
pub const NO_NEIGHBOR: i32 = -1;

/// Most neighbors a sub-segment end may have.
pub const MAX_NEIGHBORS: usize = 2;

/// Columns of a packed adjacency row.
pub const ADJACENCY_COLUMNS: usize = 2 + 2 * MAX_NEIGHBORS;

/// Which end of a sub-segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Begin,
    End,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin => f.write_str("begin"),
            Self::End => f.write_str("end"),
        }
    }
}

/// An LED touching a sub-segment end, and which end of its own sub-segment it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Neighbor {
    pub index: usize,
    pub side: Side,
}

impl Neighbor {
    /// Packed form: the index, with [`END_FLAG`] set for end-side neighbors.
    pub fn packed(&self) -> i32 {
        let flag = match self.side {
            Side::Begin => 0,
            Side::End => i32::from(END_FLAG),
        };
        self.index as i32 | flag
    }

    /// Inverse of [`Neighbor::packed`].
    pub fn unpack(value: i32) -> Option<Self> {
        if value < 0 {
            return None;
        }
        let flag = i32::from(END_FLAG);
        let side = if value & flag != 0 { Side::End } else { Side::Begin };
        Some(Self {
            index: (value & !flag) as usize,
            side,
        })
    }
}

/// The one or two neighbors at one end of a sub-segment, in index order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Neighbors(Vec<Neighbor>);

impl Neighbors {
    pub fn as_slice(&self) -> &[Neighbor] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Both slots packed, the second one [`NO_NEIGHBOR`] at a free end.
    pub fn packed(&self) -> [i32; MAX_NEIGHBORS] {
        let mut slots = [NO_NEIGHBOR; MAX_NEIGHBORS];
        for (slot, neighbor) in slots.iter_mut().zip(&self.0) {
            *slot = neighbor.packed();
        }
        slots
    }
}

/// How one sub-segment connects to the rest of the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjacencyRecord {
    pub begin: usize,
    pub end: usize,
    pub begin_neighbors: Neighbors,
    pub end_neighbors: Neighbors,
}

impl AdjacencyRecord {
    /// `[begin, end, begin0, begin1, end0, end1]` as stored in the firmware table.
    pub fn to_row(&self) -> [i32; ADJACENCY_COLUMNS] {
        let [b0, b1] = self.begin_neighbors.packed();
        let [e0, e1] = self.end_neighbors.packed();
        [self.begin as i32, self.end as i32, b0, b1, e0, e1]
    }
}

/// Resolve adjacency for every sub-segment, using the configured threshold.
pub fn resolve(layout: &Layout) -> Result<Vec<AdjacencyRecord>> {
    resolve_with_threshold(layout, layout.config.proximity_threshold())
}

/// Resolve adjacency with an explicit neighbor search radius.
pub fn resolve_with_threshold(layout: &Layout, threshold: f64) -> Result<Vec<AdjacencyRecord>> {
    if let Some(last) = layout.points.len().checked_sub(1) {
        if last >= usize::from(END_FLAG) {
            return Err(Error::IndexOverflow {
                index: last,
                limit: END_FLAG,
            });
        }
    }

    let endpoints = endpoint_sides(&layout.segments);

    layout
        .segments
        .iter()
        .enumerate()
        .map(|(id, segment)| {
            let begin_neighbors =
                neighbors_of(layout, &endpoints, id, segment, Side::Begin, threshold)?;
            let end_neighbors =
                neighbors_of(layout, &endpoints, id, segment, Side::End, threshold)?;
            Ok(AdjacencyRecord {
                begin: segment.begin,
                end: segment.end,
                begin_neighbors,
                end_neighbors,
            })
        })
        .collect()
}

/// Map each sub-segment endpoint index to the end it is.
///
/// A one-LED sub-segment is both; it is recorded as an end.
fn endpoint_sides(segments: &[SubSegment]) -> HashMap<usize, Side> {
    let mut sides = HashMap::with_capacity(segments.len() * 2);
    for segment in segments {
        sides.entry(segment.begin).or_insert(Side::Begin);
    }
    for segment in segments {
        sides.insert(segment.end, Side::End);
    }
    sides
}

fn neighbors_of(
    layout: &Layout,
    endpoints: &HashMap<usize, Side>,
    id: usize,
    segment: &SubSegment,
    side: Side,
    threshold: f64,
) -> Result<Neighbors> {
    let origin_index = match side {
        Side::Begin => segment.begin,
        Side::End => segment.end,
    };
    let origin = layout.points[origin_index];

    let found: Vec<usize> = layout
        .points
        .iter()
        .enumerate()
        .filter(|(index, point)| !segment.contains(*index) && point.distance(&origin) < threshold)
        .map(|(index, _)| index)
        .collect();

    if found.is_empty() || found.len() > MAX_NEIGHBORS {
        return Err(Error::AdjacencyCount {
            segment: id,
            begin: segment.begin,
            end: segment.end,
            side,
            found: found.len(),
        });
    }

    let neighbors = found
        .into_iter()
        .map(|index| match endpoints.get(&index) {
            Some(&neighbor_side) => Ok(Neighbor {
                index,
                side: neighbor_side,
            }),
            None => Err(Error::AdjacencyIdentity {
                segment: id,
                side,
                index,
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "segment {} {}: {:?}",
        id,
        side,
        neighbors.iter().map(|n| n.index).collect::<Vec<_>>()
    );

    Ok(Neighbors(neighbors))
}
