// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Suggested z-order conventions for layout-generated marks.
//!
//! Marks carry an explicit `z_index` for paint order. The table renderer and banner helpers
//! set these consistently so report builders don't have to hand-tune paint order.
//!
//! Renderers should sort by `(z_index, insertion order)` for a deterministic tie-break;
//! [`crate::Canvas::finish`] does exactly that.

/// Page background fills.
pub const PAGE_BACKGROUND: i32 = -100;

/// Table outer frame (background fill and border).
pub const TABLE_FRAME: i32 = 0;
/// Header background band.
pub const HEADER_BAND: i32 = 10;
/// Header labels.
pub const HEADER_LABELS: i32 = 20;
/// Rule separating the header from the body.
pub const HEADER_SEPARATOR: i32 = 30;
/// Zebra row backgrounds.
pub const ROW_STRIPES: i32 = 40;
/// Body cell text.
pub const CELL_TEXT: i32 = 50;
/// Vertical and horizontal grid lines.
pub const GRID_LINES: i32 = 60;
/// Table footer captions.
pub const FOOTER: i32 = 70;

/// Banner polygons.
pub const BANNER_SHAPE: i32 = 80;
/// Banner text.
pub const BANNER_TEXT: i32 = 90;
/// Page-level annotations (page numbers, placeholders).
pub const ANNOTATIONS: i32 = 100;
