// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display marks emitted by layout.
//!
//! Layout never rasterizes. Tables and banners compile into a flat list of marks in pixel
//! coordinates (y-down), which a backend (SVG, raster, PDF) paints in `z_index` order.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Brush;
use peniko::color::palette::css;
use tabula_text::TextStyle;

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// `pos.x` is the left edge of the text.
    Start,
    /// `pos.x` is the horizontal center of the text.
    Middle,
    /// `pos.x` is the right edge of the text.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// `pos.y` is the vertical middle of the line box.
    Middle,
    /// `pos.y` is the alphabetic baseline.
    Alphabetic,
    /// `pos.y` is the top of the line box.
    Hanging,
}

/// Stroke paint plus width.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// An axis-aligned rectangle with optional fill and stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Geometry in pixels.
    pub rect: Rect,
    /// Fill paint, if any.
    pub fill: Option<Brush>,
    /// Outline, if any.
    pub stroke: Option<StrokeStyle>,
}

/// A straight stroked segment.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleMark {
    /// Start point.
    pub p0: Point,
    /// End point.
    pub p1: Point,
    /// Stroke.
    pub stroke: StrokeStyle,
}

/// A filled (and optionally stroked) path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Geometry in pixels.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Outline, if any.
    pub stroke: Option<StrokeStyle>,
}

/// A single line of unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position in pixels.
    pub pos: Point,
    /// Text content (one line).
    pub text: String,
    /// Font used for measurement and drawing.
    pub style: TextStyle,
    /// Fill paint.
    pub fill: Brush,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Optional clip outline; glyphs outside it are hidden.
    pub clip: Option<BezPath>,
}

/// Payload of a [`Mark`].
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// Rectangle.
    Rect(RectMark),
    /// Line segment.
    Rule(RuleMark),
    /// Arbitrary path.
    Path(PathMark),
    /// Text line.
    Text(TextMark),
}

impl MarkPayload {
    /// Returns the geometric bounds, or `None` for text (which needs measurement).
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Rule(r) => Some(Rect::from_points(r.p0, r.p1)),
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Text(_) => None,
        }
    }
}

/// A paintable mark with its paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Paint order; lower values paint first.
    pub z_index: i32,
    /// What to paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// A filled rectangle without outline.
    pub fn fill_rect(z_index: i32, rect: Rect, fill: impl Into<Brush>) -> Self {
        Self {
            z_index,
            payload: MarkPayload::Rect(RectMark {
                rect,
                fill: Some(fill.into()),
                stroke: None,
            }),
        }
    }

    /// A rectangle with optional fill and stroke.
    pub fn rect(
        z_index: i32,
        rect: Rect,
        fill: Option<Brush>,
        stroke: Option<StrokeStyle>,
    ) -> Self {
        Self {
            z_index,
            payload: MarkPayload::Rect(RectMark { rect, fill, stroke }),
        }
    }

    /// A horizontal rule from `x0` to `x1` at `y`.
    pub fn hrule(z_index: i32, y: f64, x0: f64, x1: f64, stroke: StrokeStyle) -> Self {
        Self::rule(z_index, Point::new(x0, y), Point::new(x1, y), stroke)
    }

    /// A vertical rule from `y0` to `y1` at `x`.
    pub fn vrule(z_index: i32, x: f64, y0: f64, y1: f64, stroke: StrokeStyle) -> Self {
        Self::rule(z_index, Point::new(x, y0), Point::new(x, y1), stroke)
    }

    /// A segment between two points.
    pub fn rule(z_index: i32, p0: Point, p1: Point, stroke: StrokeStyle) -> Self {
        Self {
            z_index,
            payload: MarkPayload::Rule(RuleMark { p0, p1, stroke }),
        }
    }

    /// A filled path.
    pub fn path(
        z_index: i32,
        path: BezPath,
        fill: impl Into<Brush>,
        stroke: Option<StrokeStyle>,
    ) -> Self {
        Self {
            z_index,
            payload: MarkPayload::Path(PathMark {
                path,
                fill: fill.into(),
                stroke,
            }),
        }
    }

    /// A text line.
    pub fn text(z_index: i32, text: TextMark) -> Self {
        Self {
            z_index,
            payload: MarkPayload::Text(text),
        }
    }
}
