// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical layout of stacked table blocks.
//!
//! Each block asks for a height proportional to its row count. When the page has room every
//! block gets exactly what it asks for; otherwise heights shrink, honoring per-block minimums
//! where possible. Coordinates are normalized page units with `y` growing upwards, so blocks
//! are stacked from `y_top` downwards.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::data::DataTable;
use crate::geometry::{GeometryError, MAX_HEADER_FRAC, PageBox, validate_header_fraction};

/// What the planner needs to know about a block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockDemand {
    /// Number of body rows.
    pub row_count: usize,
    /// Fraction of the block height used by the header band.
    pub header_height_frac: f64,
    /// Absolute floor on the block's minimum height (e.g. room for a two-line header).
    ///
    /// Capped by the ideal height; ignored for empty blocks.
    pub min_height: f64,
}

impl BlockDemand {
    /// A demand for `row_count` rows with no extra height floor.
    pub fn new(row_count: usize, header_height_frac: f64) -> Self {
        Self {
            row_count,
            header_height_frac,
            min_height: 0.0,
        }
    }

    /// Sets the absolute height floor.
    pub fn with_min_height(mut self, min_height: f64) -> Self {
        self.min_height = min_height;
        self
    }

    fn minimum_height(&self, min_row_h: f64, ideal: f64) -> f64 {
        if self.row_count == 0 {
            return 0.0;
        }
        self.height_for_row(min_row_h)
            .max(self.min_height.max(0.0))
            .min(ideal)
    }

    fn body_share(&self) -> f64 {
        1.0 - self.header_height_frac.clamp(0.0, MAX_HEADER_FRAC)
    }

    /// Height needed for `row_count` rows of height `row_h`, plus the header band.
    pub fn height_for_row(&self, row_h: f64) -> f64 {
        if self.row_count == 0 {
            return 0.0;
        }
        self.row_count as f64 * row_h.max(0.0) / self.body_share()
    }
}

/// Vertical span and row sizing for [`plan_blocks`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BlockLayoutSpec {
    /// Top of the span (normalized, larger is higher).
    pub y_top: f64,
    /// Bottom of the span.
    pub y_bottom: f64,
    /// Preferred body row height.
    pub target_row_h: f64,
    /// Smallest acceptable body row height.
    pub min_row_h: f64,
    /// Vertical gap between consecutive blocks.
    pub gap: f64,
}

impl Default for BlockLayoutSpec {
    fn default() -> Self {
        Self {
            y_top: 0.9,
            y_bottom: 0.05,
            target_row_h: 0.022,
            min_row_h: 0.014,
            gap: 0.02,
        }
    }
}

/// Where one block landed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockPlacement {
    /// Bottom edge.
    pub y: f64,
    /// Total height (header and body).
    pub height: f64,
    /// Header band height.
    pub header_h: f64,
    /// Body height.
    pub body_h: f64,
    /// Height of one body row, `0` for empty blocks.
    pub row_h: f64,
}

impl BlockPlacement {
    /// Top edge.
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// The placement as a page box spanning `x..x + width`.
    pub fn page_box(&self, x: f64, width: f64) -> Result<PageBox, GeometryError> {
        PageBox::new(x, self.y, width, self.height.max(0.0))
    }
}

/// Plans heights and positions for `blocks`, stacked top-down.
///
/// - If the ideal heights fit, they are used unchanged.
/// - Otherwise heights shrink uniformly; if that pushes any block below its minimum, every
///   block gets its minimum plus a share of what is left proportional to its unmet demand.
/// - If even the minimums do not fit, minimums are scaled down uniformly. Heights are never
///   negative and the planner never fails.
///
/// Zero-row blocks get zero height but are still positioned, so callers can draw a
/// placeholder.
pub fn plan_blocks(blocks: &[BlockDemand], spec: &BlockLayoutSpec) -> Vec<BlockPlacement> {
    if blocks.is_empty() {
        return Vec::new();
    }
    let gap = spec.gap.max(0.0);
    let gaps = gap * (blocks.len() - 1) as f64;
    let available = ((spec.y_top - spec.y_bottom) - gaps).max(0.0);

    let ideal: Vec<f64> = blocks
        .iter()
        .map(|b| b.height_for_row(spec.target_row_h))
        .collect();
    let minimum: Vec<f64> = blocks
        .iter()
        .zip(&ideal)
        .map(|(b, &ideal)| b.minimum_height(spec.min_row_h, ideal))
        .collect();
    let total_ideal: f64 = ideal.iter().sum();

    let heights = if total_ideal <= available {
        ideal
    } else {
        shrink(&ideal, &minimum, total_ideal, available)
    };

    let mut top = spec.y_top;
    blocks
        .iter()
        .zip(heights)
        .map(|(block, height)| {
            let height = height.max(0.0);
            let y = top - height;
            top = y - gap;
            let header_h = if block.row_count == 0 {
                0.0
            } else {
                height * block.header_height_frac.clamp(0.0, MAX_HEADER_FRAC)
            };
            let body_h = height - header_h;
            let row_h = if block.row_count == 0 {
                0.0
            } else {
                body_h / block.row_count as f64
            };
            BlockPlacement {
                y,
                height,
                header_h,
                body_h,
                row_h,
            }
        })
        .collect()
}

fn shrink(ideal: &[f64], minimum: &[f64], total_ideal: f64, available: f64) -> Vec<f64> {
    let scale = available / total_ideal;
    let uniform: Vec<f64> = ideal.iter().map(|h| h * scale).collect();
    let below_minimum = uniform
        .iter()
        .zip(minimum)
        .any(|(h, m)| *h + 1e-12 < *m);
    if !below_minimum {
        return uniform;
    }

    let total_minimum: f64 = minimum.iter().sum();
    if total_minimum >= available {
        tracing::debug!(
            total_minimum,
            available,
            "block minimums exceed the available span; shrinking below minimums"
        );
        let scale = if total_minimum > 0.0 {
            available / total_minimum
        } else {
            0.0
        };
        return minimum.iter().map(|m| m * scale).collect();
    }

    let remaining = available - total_minimum;
    let demand: Vec<f64> = ideal.iter().zip(minimum).map(|(i, m)| i - m).collect();
    let total_demand: f64 = demand.iter().sum();
    minimum
        .iter()
        .zip(&demand)
        .map(|(m, d)| {
            if total_demand > 0.0 {
                m + remaining * d / total_demand
            } else {
                *m
            }
        })
        .collect()
}

/// One logical table section: a named table plus its header proportion.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    /// Section name (e.g. "Schools").
    pub name: String,
    /// Rows to draw.
    pub table: DataTable,
    /// Fraction of the block height used by the header band.
    pub header_height_frac: f64,
    /// Optional caption drawn under the table.
    pub footer: Option<String>,
}

impl Block {
    /// Creates a block with the default header fraction.
    pub fn new(name: impl Into<String>, table: DataTable) -> Self {
        Self {
            name: name.into(),
            table,
            header_height_frac: crate::table::DEFAULT_HEADER_HEIGHT_FRAC,
            footer: None,
        }
    }

    /// Sets the header fraction, rejecting values outside `0..=MAX_HEADER_FRAC`.
    pub fn with_header_height_frac(
        mut self,
        header_height_frac: f64,
    ) -> Result<Self, GeometryError> {
        self.header_height_frac = validate_header_fraction(header_height_frac)?;
        Ok(self)
    }

    /// Sets the footer caption.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// The planner's view of this block.
    pub fn demand(&self) -> BlockDemand {
        BlockDemand::new(self.table.row_count(), self.header_height_frac)
    }
}
