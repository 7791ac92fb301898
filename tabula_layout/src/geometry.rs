// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page boxes and table geometry.
//!
//! Report builders place content in a normalized page space (`0..1` on both axes, origin at the
//! bottom-left corner). Drawing happens in pixel space with the origin at the top-left corner,
//! matching SVG and raster output. [`PageBox::to_rect`] converts between the two.

use kurbo::Rect;

/// A width/height pair in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Pixel dimensions of a page.
pub type PageSize = Size;

/// Largest accepted header fraction; keeps `1 - header_frac` away from zero so every table
/// keeps a body.
pub const MAX_HEADER_FRAC: f64 = 0.95;

/// Errors for geometry that callers must never construct.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A box was given a negative or non-finite width or height.
    #[error("invalid box dimensions {width}x{height}")]
    InvalidDimensions {
        /// The rejected width.
        width: f64,
        /// The rejected height.
        height: f64,
    },
    /// A header fraction outside `0..=MAX_HEADER_FRAC`.
    #[error("header height fraction {0} is outside 0..={max}", max = MAX_HEADER_FRAC)]
    InvalidHeaderFraction(f64),
}

/// A rectangle in normalized page coordinates.
///
/// `x, y` is the bottom-left corner. A zero-height box is valid and renders nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageBox {
    /// Left edge.
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    /// Width (`> 0`).
    pub width: f64,
    /// Height (`>= 0`).
    pub height: f64,
}

impl PageBox {
    /// Creates a box, rejecting negative or non-finite dimensions.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, GeometryError> {
        let valid = width.is_finite() && height.is_finite() && width > 0.0 && height >= 0.0;
        if !valid || !x.is_finite() || !y.is_finite() {
            return Err(GeometryError::InvalidDimensions { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Top edge (`y + height`).
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.height <= 0.0
    }

    /// Converts to a y-down pixel rectangle on a page of the given size.
    pub fn to_rect(&self, page: PageSize) -> Rect {
        let x0 = self.x * page.width;
        let x1 = self.right() * page.width;
        let y0 = (1.0 - self.top()) * page.height;
        let y1 = (1.0 - self.y) * page.height;
        Rect::new(x0, y0, x1, y1)
    }
}

/// Checks that `frac` is a usable header fraction (`0..=MAX_HEADER_FRAC`).
pub fn validate_header_fraction(frac: f64) -> Result<f64, GeometryError> {
    if (0.0..=MAX_HEADER_FRAC).contains(&frac) {
        Ok(frac)
    } else {
        Err(GeometryError::InvalidHeaderFraction(frac))
    }
}

/// Header/body/row heights derived from a box and a header fraction.
///
/// Computed fresh for each draw; never updated in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableGeometry {
    /// Header band height.
    pub header_h: f64,
    /// Body height (everything under the header).
    pub body_h: f64,
    /// Height of one body row, `0` when there are no rows.
    pub row_h: f64,
}

impl TableGeometry {
    /// Derives the geometry for `row_count` rows in a box of height `height`.
    ///
    /// The header fraction is clamped into `0..=MAX_HEADER_FRAC`, the same range the block
    /// planner sizes blocks with.
    pub fn new(height: f64, header_height_frac: f64, row_count: usize) -> Self {
        let height = height.max(0.0);
        let header_h = height * header_height_frac.clamp(0.0, MAX_HEADER_FRAC);
        let body_h = height - header_h;
        let row_h = if row_count == 0 {
            0.0
        } else {
            body_h / row_count as f64
        };
        Self {
            header_h,
            body_h,
            row_h,
        }
    }
}
