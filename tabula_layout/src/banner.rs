// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rounded rectangles as explicit polygons, and text fitted inside them.
//!
//! Title banners are drawn as sampled polygons rather than native rounded rects so that the
//! same outline can serve as fill shape, stroke and text clip, with any subset of corners
//! rounded.

extern crate alloc;

use alloc::vec::Vec;

use core::f64::consts::{FRAC_PI_2, PI};

use kurbo::{BezPath, Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use tabula_text::{FontWeight, TextStyle};

use crate::canvas::Canvas;
use crate::fit::{FitOptions, FittedText, fit_text};
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::geometry::Size;
use crate::mark::{Mark, StrokeStyle, TextAnchor};
use crate::z_order;

/// Points sampled along each rounded corner unless told otherwise.
pub const DEFAULT_ARC_POINTS: usize = 32;

const COINCIDENT: f64 = 1e-9;

/// Which corners of a rectangle are rounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CornerMask {
    /// Top-left.
    pub top_left: bool,
    /// Top-right.
    pub top_right: bool,
    /// Bottom-right.
    pub bottom_right: bool,
    /// Bottom-left.
    pub bottom_left: bool,
}

impl CornerMask {
    /// Every corner rounded.
    pub const ALL: Self = Self {
        top_left: true,
        top_right: true,
        bottom_right: true,
        bottom_left: true,
    };

    /// A plain rectangle.
    pub const NONE: Self = Self {
        top_left: false,
        top_right: false,
        bottom_right: false,
        bottom_left: false,
    };

    /// Only the top corners, for tabs sitting on a table.
    pub const TOP: Self = Self {
        top_left: true,
        top_right: true,
        bottom_right: false,
        bottom_left: false,
    };
}

impl Default for CornerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Samples the outline of a rounded rectangle, clockwise on screen starting at the top-left
/// corner.
///
/// Coordinates are y-down. The radius is `corner_radius_ratio * height`, clamped to half the
/// width and half the height. Each rounded corner contributes `n_arc` points (at least two);
/// square corners contribute one. Consecutive coincident points are dropped, so the result
/// is a simple polygon. Degenerate sizes give an empty outline.
pub fn rounded_rect_polygon(
    center: Point,
    width: f64,
    height: f64,
    corner_radius_ratio: f64,
    corners: CornerMask,
    n_arc: usize,
) -> Vec<Point> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    let ratio = if corner_radius_ratio.is_finite() {
        corner_radius_ratio.max(0.0)
    } else {
        0.0
    };
    let r = (ratio * height).min(0.5 * width).min(0.5 * height);
    let n_arc = n_arc.max(2);
    let (hw, hh) = (0.5 * width, 0.5 * height);
    let (left, right) = (center.x - hw, center.x + hw);
    let (top, bottom) = (center.y - hh, center.y + hh);

    // (rounded, arc center, start angle, square corner)
    let quadrants = [
        (corners.top_left, Point::new(left + r, top + r), PI, Point::new(left, top)),
        (corners.top_right, Point::new(right - r, top + r), 1.5 * PI, Point::new(right, top)),
        (corners.bottom_right, Point::new(right - r, bottom - r), 0.0, Point::new(right, bottom)),
        (
            corners.bottom_left,
            Point::new(left + r, bottom - r),
            FRAC_PI_2,
            Point::new(left, bottom),
        ),
    ];

    let mut points: Vec<Point> = Vec::with_capacity(4 * n_arc);
    let mut push = |p: Point| {
        if points.last().is_none_or(|q| q.distance(p) > COINCIDENT) {
            points.push(p);
        }
    };
    for (rounded, c, start, square) in quadrants {
        if rounded && r > 0.0 {
            for i in 0..n_arc {
                let theta = start + FRAC_PI_2 * i as f64 / (n_arc - 1) as f64;
                push(Point::new(c.x + r * theta.cos(), c.y + r * theta.sin()));
            }
        } else {
            push(square);
        }
    }
    while points.len() > 1 && points[0].distance(points[points.len() - 1]) <= COINCIDENT {
        points.pop();
    }
    points
}

/// Closes a polygon into a path. Fewer than three points give an empty path.
pub fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if points.len() < 3 {
        return path;
    }
    path.move_to(points[0]);
    for &p in &points[1..] {
        path.line_to(p);
    }
    path.close_path();
    path
}

fn bounding_rect(points: &[Point]) -> Option<Rect> {
    let first = *points.first()?;
    Some(
        points
            .iter()
            .fold(Rect::from_points(first, first), |r, &p| r.union_pt(p)),
    )
}

/// Font, fit and paint for text placed inside a polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonTextStyle {
    /// Family and weight; the size comes from `fit`.
    pub text: TextStyle,
    /// Fitting options.
    pub fit: FitOptions,
    /// Text paint.
    pub fill: Brush,
    /// Inset on every side as a fraction of the polygon's height.
    pub padding_frac: f64,
    /// Whether glyphs are clipped to the polygon outline.
    pub clip: bool,
}

impl Default for PolygonTextStyle {
    fn default() -> Self {
        Self {
            text: TextStyle::default().with_weight(FontWeight::BOLD),
            fit: FitOptions::new(18.0, 8.0).with_max_lines(2),
            fill: css::WHITE.into(),
            padding_frac: 0.12,
            clip: true,
        }
    }
}

/// Fits `text` into the padded bounding box of `polygon` and draws it centered.
///
/// Returns the fit so callers can inspect truncation. An empty polygon draws nothing.
pub fn draw_text_in_polygon(
    canvas: &mut Canvas<'_>,
    polygon: &[Point],
    text: &str,
    style: &PolygonTextStyle,
) -> FittedText {
    let Some(bounds) = bounding_rect(polygon) else {
        return FittedText::empty(style.fit.start_font_size);
    };
    let pad = style.padding_frac.max(0.0) * bounds.height();
    let inner = Size::new(
        (bounds.width() - 2.0 * pad).max(0.0),
        (bounds.height() - 2.0 * pad).max(0.0),
    );
    let fitted = fit_text(canvas.measurer(), text, inner, &style.text, &style.fit);
    let clip = style.clip.then(|| polygon_path(polygon));
    canvas.extend(fitted.marks(
        bounds.center(),
        TextAnchor::Middle,
        &style.text,
        &style.fill,
        z_order::BANNER_TEXT,
        clip.as_ref(),
    ));
    fitted
}

/// A rounded title banner: shape plus centered text.
#[derive(Clone, Debug, PartialEq)]
pub struct BannerSpec {
    /// Corner radius as a fraction of the banner height.
    pub corner_radius_ratio: f64,
    /// Which corners are rounded.
    pub corners: CornerMask,
    /// Samples per rounded corner.
    pub arc_points: usize,
    /// Shape fill.
    pub fill: Brush,
    /// Shape outline.
    pub stroke: Option<StrokeStyle>,
    /// Text styling.
    pub text: PolygonTextStyle,
}

impl Default for BannerSpec {
    fn default() -> Self {
        Self {
            corner_radius_ratio: 0.25,
            corners: CornerMask::ALL,
            arc_points: DEFAULT_ARC_POINTS,
            fill: css::STEEL_BLUE.into(),
            stroke: None,
            text: PolygonTextStyle::default(),
        }
    }
}

impl BannerSpec {
    /// Sets the rounded corners.
    pub fn with_corners(mut self, corners: CornerMask) -> Self {
        self.corners = corners;
        self
    }

    /// Sets the fill.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the text styling.
    pub fn with_text(mut self, text: PolygonTextStyle) -> Self {
        self.text = text;
        self
    }

    /// Draws the banner filling `rect` (pixels) with `text` inside.
    pub fn draw(&self, canvas: &mut Canvas<'_>, rect: Rect, text: &str) -> FittedText {
        let polygon = rounded_rect_polygon(
            rect.center(),
            rect.width(),
            rect.height(),
            self.corner_radius_ratio,
            self.corners,
            self.arc_points,
        );
        if polygon.len() >= 3 {
            canvas.push(Mark::path(
                z_order::BANNER_SHAPE,
                polygon_path(&polygon),
                self.fill.clone(),
                self.stroke.clone(),
            ));
        }
        draw_text_in_polygon(canvas, &polygon, text, &self.text)
    }
}
