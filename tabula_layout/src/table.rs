// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering a [`DataTable`] into a page box.
//!
//! A table is a frame, a header band with one fitted label per column, zebra-striped body
//! rows and an optional footer caption. Every cell is fitted independently with
//! [`fit_text`], so long values wrap, shrink and finally truncate instead of spilling into
//! their neighbours.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use peniko::color::{AlphaColor, Srgb};
use tabula_text::{FontFamily, FontWeight, MeasureMode, TextMeasurer, TextMetrics, TextStyle};

use crate::canvas::Canvas;
use crate::columns::ColumnSpec;
use crate::data::{Align, DataTable};
use crate::fit::{FitOptions, FittedText, fit_text};
use crate::geometry::{PageBox, PageSize, Size, TableGeometry};
use crate::mark::{Mark, StrokeStyle, TextAnchor};
use crate::z_order;

/// Default fraction of the table height given to the header band.
pub const DEFAULT_HEADER_HEIGHT_FRAC: f64 = 0.12;

/// What to draw: the columns, the header share and an optional caption.
#[derive(Clone, Debug, PartialEq)]
pub struct TableSpec {
    /// Columns in display order. Fractions are normalized before drawing.
    pub columns: Vec<ColumnSpec>,
    /// Fraction of the box height used by the header band.
    pub header_height_frac: f64,
    /// Caption drawn under the body.
    pub footer: Option<String>,
    /// Pixels available under the box for the caption. `None` means "up to the page edge".
    pub footer_room_px: Option<f64>,
}

impl TableSpec {
    /// A spec with the default header fraction and no footer.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self {
            columns,
            header_height_frac: DEFAULT_HEADER_HEIGHT_FRAC,
            footer: None,
            footer_room_px: None,
        }
    }

    /// Sets the header fraction. Drawing clamps it into `0..=MAX_HEADER_FRAC`.
    ///
    /// [`MAX_HEADER_FRAC`]: crate::MAX_HEADER_FRAC
    pub fn with_header_height_frac(mut self, frac: f64) -> Self {
        self.header_height_frac = frac;
        self
    }

    /// Sets the footer caption.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Limits the room the caption may take under the box.
    pub fn with_footer_room_px(mut self, room: f64) -> Self {
        self.footer_room_px = Some(room);
        self
    }
}

/// Paint and font settings for tables.
#[derive(Clone, Debug, PartialEq)]
pub struct TableStyle {
    /// Font family for every run.
    pub font_family: FontFamily,
    /// Fill behind the whole table.
    pub frame_fill: Brush,
    /// Outline of the whole table.
    pub frame_stroke: StrokeStyle,
    /// Header band fill.
    pub header_fill: Brush,
    /// Header label paint.
    pub header_text: Brush,
    /// Fitting for header labels.
    pub header_fit: FitOptions,
    /// Rule between header and body.
    pub header_separator: StrokeStyle,
    /// Fill for every other body row.
    pub stripe_fill: Brush,
    /// Cell text paint.
    pub body_text: Brush,
    /// Fitting for body cells.
    pub body_fit: FitOptions,
    /// Row and column rules; `None` disables the grid.
    pub grid: Option<StrokeStyle>,
    /// Horizontal padding inside each cell, in pixels.
    pub padding_px: f64,
    /// Vertical padding inside each cell, in pixels.
    pub vertical_padding_px: f64,
    /// Footer caption paint.
    pub footer_text: Brush,
    /// Footer font size.
    pub footer_font_size: f64,
    /// Gap between the table edge and the caption.
    pub footer_gap_px: f64,
}

const HEADER_BLUE: AlphaColor<Srgb> = AlphaColor::from_rgb8(0x1f, 0x4e, 0x79);
const STRIPE_BLUE: AlphaColor<Srgb> = AlphaColor::from_rgb8(0xee, 0xf3, 0xf8);
const GRID_GRAY: AlphaColor<Srgb> = AlphaColor::from_rgb8(0xc8, 0xce, 0xd6);
const TEXT_DARK: AlphaColor<Srgb> = AlphaColor::from_rgb8(0x22, 0x22, 0x22);

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            font_family: FontFamily::SansSerif,
            frame_fill: css::WHITE.into(),
            frame_stroke: StrokeStyle::solid(GRID_GRAY, 1.0),
            header_fill: HEADER_BLUE.into(),
            header_text: css::WHITE.into(),
            header_fit: FitOptions::new(11.0, 6.0).with_max_lines(3),
            header_separator: StrokeStyle::solid(HEADER_BLUE, 1.5),
            stripe_fill: STRIPE_BLUE.into(),
            body_text: TEXT_DARK.into(),
            body_fit: FitOptions::new(10.0, 6.0).with_max_lines(2),
            grid: Some(StrokeStyle::solid(GRID_GRAY, 0.5)),
            padding_px: 4.0,
            vertical_padding_px: 1.0,
            footer_text: css::DIM_GRAY.into(),
            footer_font_size: 9.0,
            footer_gap_px: 3.0,
        }
    }
}

impl TableStyle {
    fn header_style(&self) -> TextStyle {
        TextStyle::new(self.header_fit.start_font_size)
            .with_family(self.font_family.clone())
            .with_weight(FontWeight::BOLD)
    }

    fn body_style(&self) -> TextStyle {
        TextStyle::new(self.body_fit.start_font_size).with_family(self.font_family.clone())
    }

    fn footer_style(&self) -> TextStyle {
        TextStyle::new(self.footer_font_size).with_family(self.font_family.clone())
    }
}

#[derive(Clone, Debug)]
struct CachedCell {
    source: String,
    bounds: Size,
    style: TextStyle,
    fit: FitOptions,
    fitted: FittedText,
}

/// What the cached fits were measured against.
///
/// The measurer itself has no identity to compare, so it is represented by its mode and the
/// metrics of a reference string in the body style.
#[derive(Clone, Copy, Debug, PartialEq)]
struct MeasureContext {
    page: PageSize,
    mode: MeasureMode,
    reference: TextMetrics,
}

impl MeasureContext {
    const REFERENCE: &'static str = "Mg 0123456789";

    fn of(canvas: &Canvas<'_>, body_style: &TextStyle) -> Self {
        let measurer = canvas.measurer();
        Self {
            page: canvas.size(),
            mode: measurer.mode(),
            reference: measurer.measure(Self::REFERENCE, body_style),
        }
    }
}

/// Draws tables, remembering fitted cells between draws.
///
/// The cache is keyed by `(column, row)` and revalidated against the cell's text, box size,
/// text style and fit options, so redrawing an unchanged table skips fitting entirely. A draw
/// on a canvas with a different page size or measurer starts from an empty cache. Report
/// builders call [`TableRenderer::clear_cache`] at every page break.
#[derive(Debug, Default)]
pub struct TableRenderer {
    cells: HashMap<(usize, usize), CachedCell>,
    context: Option<MeasureContext>,
    hits: usize,
}

/// Horizontal extent of one column in pixels.
#[derive(Clone, Copy, Debug)]
struct ColumnSpan {
    x0: f64,
    x1: f64,
}

impl ColumnSpan {
    fn anchor(&self, align: Align, padding: f64) -> (f64, TextAnchor) {
        match align {
            Align::Left => ((self.x0 + padding).min(self.x1), TextAnchor::Start),
            Align::Center => (0.5 * (self.x0 + self.x1), TextAnchor::Middle),
            Align::Right => ((self.x1 - padding).max(self.x0), TextAnchor::End),
        }
    }

    fn inner_width(&self, padding: f64) -> f64 {
        (self.x1 - self.x0 - 2.0 * padding).max(0.0)
    }
}

impl TableRenderer {
    /// Creates a renderer with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached cells.
    pub fn cached_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of cell fits served from the cache since creation.
    pub fn cache_hits(&self) -> usize {
        self.hits
    }

    /// Drops every cached cell.
    pub fn clear_cache(&mut self) {
        self.cells.clear();
        self.context = None;
    }

    /// Draws `table` into `page_box`.
    ///
    /// Nothing is drawn for an empty box. Columns whose key is not in the table render empty
    /// cells. Returns how many header labels and body cells still overflowed at the minimum
    /// font size.
    pub fn draw(
        &mut self,
        canvas: &mut Canvas<'_>,
        page_box: &PageBox,
        spec: &TableSpec,
        table: &DataTable,
        style: &TableStyle,
    ) -> usize {
        if page_box.is_empty() {
            return 0;
        }
        let body_style = style.body_style();
        let context = MeasureContext::of(canvas, &body_style);
        if self.context != Some(context) {
            if !self.cells.is_empty() {
                tracing::trace!(cells = self.cells.len(), "measure context changed; dropping fits");
            }
            self.cells.clear();
            self.context = Some(context);
        }
        let mut overflowing = 0;
        let measurer = canvas.measurer();
        let outer = canvas.to_rect(page_box);
        let footer = spec.footer.as_deref().filter(|s| !s.trim().is_empty());
        let (frame, footer_y) = match footer {
            Some(_) => place_footer(canvas, outer, spec, style),
            None => (outer, None),
        };

        let mut columns = spec.columns.clone();
        ColumnSpec::normalize(&mut columns);
        let spans = column_spans(&columns, frame);
        let geometry =
            TableGeometry::new(frame.height(), spec.header_height_frac, table.row_count());
        let header_bottom = frame.y0 + geometry.header_h;

        canvas.push(Mark::rect(
            z_order::TABLE_FRAME,
            frame,
            Some(style.frame_fill.clone()),
            Some(style.frame_stroke.clone()),
        ));
        if geometry.header_h > 0.0 {
            canvas.push(Mark::fill_rect(
                z_order::HEADER_BAND,
                Rect::new(frame.x0, frame.y0, frame.x1, header_bottom),
                style.header_fill.clone(),
            ));
        }

        let header_style = style.header_style();
        let header_h = (geometry.header_h - 2.0 * style.vertical_padding_px).max(0.0);
        let header_mid = frame.y0 + 0.5 * geometry.header_h;
        for (col, span) in columns.iter().zip(&spans) {
            let bounds = Size::new(span.inner_width(style.padding_px), header_h);
            let fitted = fit_text(measurer, &col.label, bounds, &header_style, &style.header_fit);
            overflowing += usize::from(!fitted.fits);
            let (x, anchor) = span.anchor(Align::Center, style.padding_px);
            canvas.extend(fitted.marks(
                Point::new(x, header_mid),
                anchor,
                &header_style,
                &style.header_text,
                z_order::HEADER_LABELS,
                None,
            ));
        }
        canvas.push(Mark::hrule(
            z_order::HEADER_SEPARATOR,
            header_bottom,
            frame.x0,
            frame.x1,
            style.header_separator.clone(),
        ));

        let source_columns: Vec<Option<usize>> = columns
            .iter()
            .map(|col| {
                let index = table.column_index(&col.key);
                if index.is_none() {
                    tracing::debug!(
                        key = %col.key,
                        "column not in table; rendering empty cells"
                    );
                }
                index
            })
            .collect();

        let cell_h = (geometry.row_h - 2.0 * style.vertical_padding_px).max(0.0);
        for row in 0..table.row_count() {
            let y0 = header_bottom + row as f64 * geometry.row_h;
            if row % 2 == 1 {
                canvas.push(Mark::fill_rect(
                    z_order::ROW_STRIPES,
                    Rect::new(frame.x0, y0, frame.x1, y0 + geometry.row_h),
                    style.stripe_fill.clone(),
                ));
            }
            let mid = y0 + 0.5 * geometry.row_h;
            for (i, (col, span)) in columns.iter().zip(&spans).enumerate() {
                let Some(source) = source_columns[i] else {
                    continue;
                };
                let text = table.display(row, source);
                if text.is_empty() {
                    continue;
                }
                let bounds = Size::new(span.inner_width(style.padding_px), cell_h);
                let fitted = self.fit_cell(measurer, (i, row), text, bounds, &body_style, style);
                overflowing += usize::from(!fitted.fits);
                let (x, anchor) = span.anchor(col.align, style.padding_px);
                canvas.extend(fitted.marks(
                    Point::new(x, mid),
                    anchor,
                    &body_style,
                    &style.body_text,
                    z_order::CELL_TEXT,
                    None,
                ));
            }
        }

        if let Some(grid) = &style.grid {
            for span in spans.iter().skip(1) {
                canvas.push(Mark::vrule(
                    z_order::GRID_LINES,
                    span.x0,
                    frame.y0,
                    frame.y1,
                    grid.clone(),
                ));
            }
            for row in 1..table.row_count() {
                let y = header_bottom + row as f64 * geometry.row_h;
                canvas.push(Mark::hrule(z_order::GRID_LINES, y, frame.x0, frame.x1, grid.clone()));
            }
        }

        if let (Some(text), Some(y)) = (footer, footer_y) {
            let footer_style = style.footer_style();
            let options = FitOptions::new(style.footer_font_size, style.footer_font_size)
                .with_max_lines(1)
                .with_autoshrink(false);
            let width = (frame.width() - 2.0 * style.padding_px).max(0.0);
            let bounds = Size::new(width, f64::INFINITY);
            let fitted = fit_text(measurer, text, bounds, &footer_style, &options);
            canvas.extend(fitted.marks(
                Point::new(frame.x0 + style.padding_px, y),
                TextAnchor::Start,
                &footer_style,
                &style.footer_text,
                z_order::FOOTER,
                None,
            ));
        }
        overflowing
    }

    fn fit_cell(
        &mut self,
        measurer: &dyn TextMeasurer,
        key: (usize, usize),
        text: String,
        bounds: Size,
        body_style: &TextStyle,
        style: &TableStyle,
    ) -> FittedText {
        if let Some(cached) = self.cells.get(&key) {
            if cached.source == text
                && cached.bounds == bounds
                && cached.style == *body_style
                && cached.fit == style.body_fit
            {
                self.hits += 1;
                return cached.fitted.clone();
            }
        }
        let fitted = fit_text(measurer, &text, bounds, body_style, &style.body_fit);
        if !fitted.fits {
            tracing::trace!(column = key.0, row = key.1, "cell text overflows at the floor size");
        }
        self.cells.insert(
            key,
            CachedCell {
                source: text,
                bounds,
                style: body_style.clone(),
                fit: style.body_fit,
                fitted: fitted.clone(),
            },
        );
        fitted
    }
}

/// Chooses where the caption goes, returning the table frame and the caption's center line.
fn place_footer(
    canvas: &Canvas<'_>,
    outer: Rect,
    spec: &TableSpec,
    style: &TableStyle,
) -> (Rect, Option<f64>) {
    let line_h = canvas
        .measurer()
        .measure("Mg", &style.footer_style())
        .line_height();
    let strip = line_h + style.footer_gap_px;
    let page_room = canvas.size().height - outer.y1;
    let room = spec.footer_room_px.map_or(page_room, |r| r.min(page_room));
    if room >= strip {
        return (outer, Some(outer.y1 + style.footer_gap_px + 0.5 * line_h));
    }
    let y1 = (outer.y1 - strip).max(outer.y0);
    let frame = Rect::new(outer.x0, outer.y0, outer.x1, y1);
    (frame, Some(y1 + style.footer_gap_px + 0.5 * line_h))
}

fn column_spans(columns: &[ColumnSpec], frame: Rect) -> Vec<ColumnSpan> {
    let width = frame.width();
    let mut x = frame.x0;
    columns
        .iter()
        .map(|col| {
            let x0 = x;
            x += col.width_frac * width;
            ColumnSpan { x0, x1: x.min(frame.x1) }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use tabula_text::HeuristicTextMeasurer;

    use super::*;
    use crate::data::{CellValue, ColumnDef};
    use crate::geometry::PageSize;
    use crate::mark::{MarkPayload, TextMark};

    fn table() -> DataTable {
        DataTable::new(
            vec![
                ColumnDef::text("name", "Name"),
                ColumnDef::numeric("count", "Count"),
            ],
            vec![
                vec!["Oak Park".into(), 12.0.into()],
                vec!["Elm".into(), CellValue::Number(f64::NAN)],
                vec!["Birch".into(), 3.0.into()],
            ],
        )
        .expect("valid table")
    }

    fn spec() -> TableSpec {
        TableSpec::new(vec![
            ColumnSpec::new("name", "Name", 0.5),
            ColumnSpec::new("count", "Count", 0.5).with_align(Align::Right),
        ])
    }

    fn texts(marks: &[Mark], z: i32) -> Vec<&TextMark> {
        marks
            .iter()
            .filter(|m| m.z_index == z)
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn draw(spec: &TableSpec, table: &DataTable, page_box: PageBox) -> Vec<Mark> {
        let mut canvas = Canvas::new(PageSize::new(400.0, 400.0), &HeuristicTextMeasurer);
        TableRenderer::new().draw(&mut canvas, &page_box, spec, table, &TableStyle::default());
        canvas.finish()
    }

    #[test]
    fn empty_box_draws_nothing() {
        let marks = draw(&spec(), &table(), PageBox::new(0.1, 0.5, 0.8, 0.0).expect("valid"));
        assert!(marks.is_empty());
    }

    #[test]
    fn cells_anchor_by_alignment_and_skip_nan() {
        let page_box = PageBox::new(0.0, 0.0, 1.0, 1.0).expect("valid");
        let marks = draw(&spec(), &table(), page_box);
        let cells = texts(&marks, z_order::CELL_TEXT);
        // Three names and two counts; the NaN count is blank.
        assert_eq!(cells.len(), 5);

        let oak = cells.iter().find(|t| t.text == "Oak Park").expect("name cell");
        assert_eq!(oak.anchor, TextAnchor::Start);
        assert!((oak.pos.x - 4.0).abs() < 1e-9);

        let twelve = cells.iter().find(|t| t.text == "12").expect("count cell");
        assert_eq!(twelve.anchor, TextAnchor::End);
        assert!((twelve.pos.x - 396.0).abs() < 1e-9);

        // Vertically centered in the first body row.
        let g = TableGeometry::new(400.0, DEFAULT_HEADER_HEIGHT_FRAC, 3);
        let mid = g.header_h + 0.5 * g.row_h;
        assert!((oak.pos.y - mid).abs() < 1e-9);
    }

    #[test]
    fn draw_order_follows_z_layers() {
        let page_box = PageBox::new(0.0, 0.0, 1.0, 1.0).expect("valid");
        let marks = draw(&spec(), &table(), page_box);
        let first = |z| marks.iter().position(|m| m.z_index == z).expect("layer present");
        assert!(first(z_order::TABLE_FRAME) < first(z_order::HEADER_BAND));
        assert!(first(z_order::HEADER_BAND) < first(z_order::HEADER_LABELS));
        assert!(first(z_order::HEADER_LABELS) < first(z_order::HEADER_SEPARATOR));
        assert!(first(z_order::HEADER_SEPARATOR) < first(z_order::ROW_STRIPES));
        assert!(first(z_order::ROW_STRIPES) < first(z_order::CELL_TEXT));
        assert!(first(z_order::CELL_TEXT) < first(z_order::GRID_LINES));

        // One stripe for three rows; one inner column rule plus two row rules.
        let count = |z| marks.iter().filter(|m| m.z_index == z).count();
        assert_eq!(count(z_order::ROW_STRIPES), 1);
        assert_eq!(count(z_order::GRID_LINES), 3);
    }

    #[test]
    fn unknown_column_renders_empty_cells() {
        let mut spec = spec();
        spec.columns.push(ColumnSpec::new("missing", "Missing", 0.25));
        let page_box = PageBox::new(0.0, 0.0, 1.0, 1.0).expect("valid");
        let marks = draw(&spec, &table(), page_box);
        assert_eq!(texts(&marks, z_order::CELL_TEXT).len(), 5);
        assert_eq!(texts(&marks, z_order::HEADER_LABELS).len(), 3);
    }

    #[test]
    fn footer_moves_inside_when_the_page_has_no_room() {
        let spec = spec().with_footer("Source: district survey");
        let below = draw(&spec, &table(), PageBox::new(0.0, 0.5, 1.0, 0.5).expect("valid"));
        let caption = texts(&below, z_order::FOOTER);
        assert_eq!(caption.len(), 1);
        assert!(caption[0].pos.y > 200.0);

        let flush = draw(&spec, &table(), PageBox::new(0.0, 0.0, 1.0, 1.0).expect("valid"));
        let caption = texts(&flush, z_order::FOOTER);
        assert!(caption[0].pos.y < 400.0);
        let MarkPayload::Rect(frame) = &flush[0].payload else {
            panic!("frame first");
        };
        assert!(frame.rect.y1 < caption[0].pos.y);
    }

    #[test]
    fn redraw_hits_the_cell_cache() {
        let page_box = PageBox::new(0.0, 0.0, 1.0, 1.0).expect("valid");
        let table = table();
        let style = TableStyle::default();
        let mut renderer = TableRenderer::new();

        let mut canvas = Canvas::new(PageSize::new(400.0, 400.0), &HeuristicTextMeasurer);
        renderer.draw(&mut canvas, &page_box, &spec(), &table, &style);
        assert_eq!(renderer.cached_cells(), 5);
        assert_eq!(renderer.cache_hits(), 0);

        let mut canvas = Canvas::new(PageSize::new(400.0, 400.0), &HeuristicTextMeasurer);
        renderer.draw(&mut canvas, &page_box, &spec(), &table, &style);
        assert_eq!(renderer.cache_hits(), 5);

        // A different cell size invalidates every entry.
        let mut canvas = Canvas::new(PageSize::new(300.0, 400.0), &HeuristicTextMeasurer);
        renderer.draw(&mut canvas, &page_box, &spec(), &table, &style);
        assert_eq!(renderer.cache_hits(), 5);

        // So does a different font family.
        let serif = TableStyle {
            font_family: FontFamily::Serif,
            ..TableStyle::default()
        };
        let mut canvas = Canvas::new(PageSize::new(300.0, 400.0), &HeuristicTextMeasurer);
        renderer.draw(&mut canvas, &page_box, &spec(), &table, &serif);
        assert_eq!(renderer.cache_hits(), 5);
    }

    /// Three times as wide as the heuristic estimate.
    struct WideMeasurer;

    impl TextMeasurer for WideMeasurer {
        fn try_measure(&self, text: &str, style: &TextStyle) -> Option<TextMetrics> {
            let m = HeuristicTextMeasurer.measure(text, style);
            Some(TextMetrics {
                advance_width: 3.0 * m.advance_width,
                ..m
            })
        }
    }

    fn cell_texts(marks: &[Mark]) -> Vec<(String, f64)> {
        texts(marks, z_order::CELL_TEXT)
            .into_iter()
            .map(|t| (t.text.clone(), t.style.font_size))
            .collect()
    }

    #[test]
    fn changing_the_measurer_refits_cells() {
        let table = DataTable::new(
            vec![ColumnDef::text("name", "Name")],
            vec![vec!["Riverside Community Learning Center".into()]],
        )
        .expect("valid table");
        let spec = TableSpec::new(vec![ColumnSpec::new("name", "Name", 1.0)]);
        let page_box = PageBox::new(0.0, 0.0, 1.0, 1.0).expect("valid");
        let style = TableStyle::default();
        let page = PageSize::new(200.0, 200.0);

        let mut renderer = TableRenderer::new();
        let mut canvas = Canvas::new(page, &HeuristicTextMeasurer);
        renderer.draw(&mut canvas, &page_box, &spec, &table, &style);
        let narrow = cell_texts(&canvas.finish());

        let mut canvas = Canvas::new(page, &WideMeasurer);
        renderer.draw(&mut canvas, &page_box, &spec, &table, &style);
        let reused = cell_texts(&canvas.finish());
        assert_eq!(renderer.cache_hits(), 0);

        let mut canvas = Canvas::new(page, &WideMeasurer);
        TableRenderer::new().draw(&mut canvas, &page_box, &spec, &table, &style);
        let fresh = cell_texts(&canvas.finish());

        assert_eq!(reused, fresh);
        assert_ne!(narrow, fresh);
    }

    #[test]
    fn draw_counts_overflowing_cells() {
        let table = DataTable::new(
            vec![ColumnDef::text("name", "Name")],
            vec![vec!["Oak".into()], vec!["Supercalifragilisticexpialidocious".into()]],
        )
        .expect("valid table");
        let spec = TableSpec::new(vec![ColumnSpec::new("name", "Name", 1.0)]);
        let page_box = PageBox::new(0.0, 0.0, 1.0, 1.0).expect("valid");
        let mut canvas = Canvas::new(PageSize::new(100.0, 400.0), &HeuristicTextMeasurer);
        let overflowing = TableRenderer::new().draw(
            &mut canvas,
            &page_box,
            &spec,
            &table,
            &TableStyle::default(),
        );
        assert_eq!(overflowing, 1);

        let mut canvas = Canvas::new(PageSize::new(400.0, 400.0), &HeuristicTextMeasurer);
        let overflowing = TableRenderer::new().draw(
            &mut canvas,
            &page_box,
            &spec,
            &table,
            &TableStyle::default(),
        );
        assert_eq!(overflowing, 0);
    }
}
