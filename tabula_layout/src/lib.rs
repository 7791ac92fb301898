// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout and fitting for tabular reports.
//!
//! This crate turns typed tables into page marks:
//! - **Fitting** wraps, shrinks and truncates text into fixed boxes ([`fit_text`]).
//! - **Columns** get widths from sampled content ([`allocate_columns`]).
//! - **Blocks** of stacked tables share a page's vertical span ([`plan_blocks`]).
//! - **Tables** and **banners** compile into [`Mark`]s on a [`Canvas`].
//!
//! Everything is measured through [`tabula_text::TextMeasurer`], so the same layout can run
//! on exact shaping or on the width heuristic. Output is a flat, z-ordered display list; the
//! crate never rasterizes.
//!
//! ```
//! use tabula_layout::{FitOptions, Size, fit_text};
//! use tabula_text::{HeuristicTextMeasurer, TextStyle};
//!
//! let fitted = fit_text(
//!     &HeuristicTextMeasurer,
//!     "Basic awareness of potential water-related hazards",
//!     Size::new(120.0, 40.0),
//!     &TextStyle::default(),
//!     &FitOptions::new(14.0, 8.0).with_max_lines(2),
//! );
//! assert!(fitted.lines.len() <= 2);
//! ```

#![no_std]

extern crate alloc;

mod banner;
mod blocks;
mod canvas;
mod columns;
mod data;
mod fit;
#[cfg(not(feature = "std"))]
mod float;
mod geometry;
mod mark;
#[cfg(test)]
mod scenario_tests;
mod table;
pub mod z_order;

pub use banner::{
    BannerSpec, CornerMask, DEFAULT_ARC_POINTS, PolygonTextStyle, draw_text_in_polygon,
    polygon_path, rounded_rect_polygon,
};
pub use blocks::{
    Block, BlockDemand, BlockLayoutSpec, BlockPlacement, plan_blocks,
};
pub use canvas::Canvas;
pub use columns::{
    AllocationConstraints, ColumnSample, ColumnSpec, allocate_columns, normalize_fractions,
};
pub use data::{Align, CellValue, ColumnDef, ColumnKind, DataTable, DataTableError};
pub use fit::{
    ELLIPSIS, FitOptions, FittedText, Lines, MIN_FONT_SIZE, ellipsize, fit_text, wrap_words,
};
pub use geometry::{
    GeometryError, MAX_HEADER_FRAC, PageBox, PageSize, Size, TableGeometry,
    validate_header_fraction,
};
pub use mark::{
    Mark, MarkPayload, PathMark, RectMark, RuleMark, StrokeStyle, TextAnchor, TextBaseline,
    TextMark,
};
pub use table::{DEFAULT_HEADER_HEIGHT_FRAC, TableRenderer, TableSpec, TableStyle};

pub use tabula_text::{
    FontFamily, FontStyle, FontWeight, HeuristicTextMeasurer, MeasureMode, TextMeasurer,
    TextMetrics, TextStyle,
};
