//! Table emission.
//!
//! A [`LayoutTable`] holds exactly what the firmware needs. It can be written
//! as a C header or as JSON, and [`write_atomically`] makes sure a failed run
//! never leaves a half-written file behind.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::adjacency::{self, AdjacencyRecord, ADJACENCY_COLUMNS, END_FLAG, NO_NEIGHBOR};
use crate::builder::Layout;
use crate::projection::{self, FixedPoint, PolarPoint};
use crate::Result;

/// Name and LED count of one strip, as exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StripCount {
    pub name: String,
    pub leds: usize,
}

/// Everything the firmware lookup table contains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutTable {
    pub strips: Vec<StripCount>,
    pub total: usize,
    pub scale: u16,
    pub end_flag: u16,
    pub no_neighbor: i32,
    pub radius_min: i16,
    pub radius_max: i16,
    pub cartesian: Vec<FixedPoint>,
    pub polar: Vec<PolarPoint>,
    pub segments: Vec<[i32; ADJACENCY_COLUMNS]>,
}

impl LayoutTable {
    /// Resolve adjacency and projection for `layout`.
    ///
    /// Fails on the first inconsistency; no table exists for a bad layout.
    pub fn build(layout: &Layout) -> Result<Self> {
        let records = adjacency::resolve(layout)?;
        let projection = projection::project(layout)?;
        Ok(Self::from_parts(layout, &records, projection))
    }

    fn from_parts(
        layout: &Layout,
        records: &[AdjacencyRecord],
        projection: projection::Projection,
    ) -> Self {
        Self {
            strips: layout
                .strips
                .iter()
                .map(|s| StripCount {
                    name: s.name.clone(),
                    leds: s.len(),
                })
                .collect(),
            total: layout.len(),
            scale: projection.scale,
            end_flag: END_FLAG,
            no_neighbor: NO_NEIGHBOR,
            radius_min: projection.radius_min(),
            radius_max: projection.radius_max(),
            cartesian: projection.cartesian,
            polar: projection.polar,
            segments: records.iter().map(AdjacencyRecord::to_row).collect(),
        }
    }

    /// Write the table as a C header.
    pub fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "// GENERATED BY webb-layout - DO NOT MODIFY")?;
        writeln!(out)?;
        writeln!(out, "#pragma once")?;
        writeln!(out)?;
        writeln!(out, "#include <stdint.h>")?;
        writeln!(out)?;
        for strip in &self.strips {
            writeln!(
                out,
                "#define WEBB_LEDS_{} {}",
                strip.name.to_ascii_uppercase(),
                strip.leds
            )?;
        }
        writeln!(out, "#define WEBB_LEDS_TOTAL {}", self.total)?;
        writeln!(out, "#define WEBB_SEGMENTS {}", self.segments.len())?;
        writeln!(out, "#define WEBB_ADJ_END_FLAG {:#06x}", self.end_flag)?;
        writeln!(out, "#define WEBB_ADJ_NONE ({})", self.no_neighbor)?;
        writeln!(out, "#define WEBB_SCALE {}", self.scale)?;
        writeln!(out, "#define WEBB_RADIUS_MIN {}", self.radius_min)?;
        writeln!(out, "#define WEBB_RADIUS_MAX {}", self.radius_max)?;
        writeln!(out)?;

        write_rows(
            out,
            "g_WebbCartesian",
            self.cartesian.iter().map(|p| [i32::from(p.x), i32::from(p.y)]),
        )?;

        writeln!(
            out,
            "// Polar coordinates. Angle is from 0 to {} per turn.",
            self.scale
        )?;
        write_rows(
            out,
            "g_WebbPolar",
            self.polar
                .iter()
                .map(|p| [i32::from(p.radius), i32::from(p.angle)]),
        )?;

        writeln!(
            out,
            "// Segments: begin, end, begin neighbors, end neighbors. End-side neighbors carry WEBB_ADJ_END_FLAG."
        )?;
        write_rows(out, "g_WebbSegments", self.segments.iter().copied())?;

        Ok(())
    }

    /// Write the table as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

fn write_rows<W, I, const N: usize>(out: &mut W, name: &str, rows: I) -> io::Result<()>
where
    W: Write,
    I: ExactSizeIterator<Item = [i32; N]>,
{
    writeln!(out, "static const int16_t {}[{}][{}] = {{", name, rows.len(), N)?;
    for row in rows {
        let cells: Vec<String> = row.iter().map(i32::to_string).collect();
        writeln!(out, "  {{ {} }},", cells.join(", "))?;
    }
    writeln!(out, "}};")?;
    writeln!(out)
}

/// Write `path` through a temporary file in the same directory.
///
/// The target only appears once `write` has succeeded in full.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    write(&mut file)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    info!("wrote {}", path.display());
    Ok(())
}
