// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column width allocation.
//!
//! Text columns are sized by their content (header and a sample of the longest values), clamped
//! to a minimum and to a share of the table width. Numeric columns split what remains equally.
//! The result is a list of fractions of the table width that sums to `1.0`.
//!
//! Only the [`AllocationConstraints::sample_rows`] longest values (by character count) of a
//! text column are measured. A value that is shorter in characters but wider when rendered can
//! be missed, under-sizing the column. This is a known limitation kept for tractability on
//! large tables.

extern crate alloc;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use tabula_text::{FontWeight, TextMeasurer, TextStyle};

use crate::data::{Align, ColumnDef, ColumnKind, DataTable};

/// Content used to size one column.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnSample {
    /// Source field key.
    pub key: String,
    /// Header text.
    pub header_label: String,
    /// Text or numeric.
    pub kind: ColumnKind,
    /// Display strings of the column's cells (all or a subset).
    pub values: Vec<String>,
}

impl ColumnSample {
    /// Samples every column of `table`.
    pub fn from_table(table: &DataTable) -> Vec<Self> {
        table
            .columns()
            .iter()
            .enumerate()
            .map(|(i, def)| Self {
                key: def.key.clone(),
                header_label: def.label.clone(),
                kind: def.kind,
                values: table.column_strings(i),
            })
            .collect()
    }

    /// The `n` longest values by character count, longest first.
    fn longest_values(&self, n: usize) -> Vec<&str> {
        let mut values: Vec<&str> = self.values.iter().map(String::as_str).collect();
        values.sort_by_key(|v| core::cmp::Reverse(v.chars().count()));
        values.truncate(n);
        values
    }
}

/// Tunables for [`allocate_columns`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AllocationConstraints {
    /// Smallest width a text column may get, in pixels.
    pub min_text_col_px: f64,
    /// Smallest width a numeric column should get, in pixels.
    pub min_numeric_col_px: f64,
    /// Ceiling on the combined width of text columns, as a fraction of the table width.
    ///
    /// Ignored when the table has no numeric columns.
    pub max_text_total_frac: f64,
    /// Horizontal padding on each side of cell content, in pixels.
    pub padding_px: f64,
    /// How many of the longest values are measured per text column.
    pub sample_rows: usize,
    /// Font size used to measure body values.
    pub body_font_size: f64,
    /// Font size used to measure header labels (measured bold).
    pub header_font_size: f64,
}

impl Default for AllocationConstraints {
    fn default() -> Self {
        Self {
            min_text_col_px: 60.0,
            min_numeric_col_px: 40.0,
            max_text_total_frac: 0.6,
            padding_px: 4.0,
            sample_rows: 20,
            body_font_size: 10.0,
            header_font_size: 10.0,
        }
    }
}

/// Computes column widths as fractions of `box_width_px`.
///
/// Returns one fraction per column summing to `1.0`. A non-positive box width yields equal
/// shares; no columns yields an empty list.
pub fn allocate_columns(
    measurer: &dyn TextMeasurer,
    box_width_px: f64,
    columns: &[ColumnSample],
    constraints: &AllocationConstraints,
) -> Vec<f64> {
    let n = columns.len();
    if n == 0 {
        return Vec::new();
    }
    if !box_width_px.is_finite() || box_width_px <= 0.0 {
        return equal_shares(n);
    }

    let pad = constraints.padding_px.max(0.0);
    let min_text = constraints.min_text_col_px.max(0.0);
    let min_numeric = constraints.min_numeric_col_px.max(0.0);
    let body_style = TextStyle::new(constraints.body_font_size);
    let header_style = TextStyle::new(constraints.header_font_size).with_weight(FontWeight::BOLD);

    let numeric_count = columns
        .iter()
        .filter(|c| c.kind == ColumnKind::Numeric)
        .count();

    let mut widths = vec![0.0_f64; n];
    for (width, col) in widths.iter_mut().zip(columns) {
        if col.kind != ColumnKind::Text {
            continue;
        }
        let header_w = measurer.measure(&col.header_label, &header_style).advance_width;
        let value_w = col
            .longest_values(constraints.sample_rows)
            .into_iter()
            .map(|v| measurer.measure(v, &body_style).advance_width)
            .fold(0.0_f64, f64::max);
        *width = min_text.max(header_w.max(value_w) + 2.0 * pad);
    }

    let is_text = |i: usize| columns[i].kind == ColumnKind::Text;
    let text_total: f64 = (0..n).filter(|&i| is_text(i)).map(|i| widths[i]).sum();

    if numeric_count > 0 {
        let ceiling = constraints.max_text_total_frac.clamp(0.0, 1.0) * box_width_px;
        if text_total > ceiling && text_total > 0.0 {
            let scale = ceiling / text_total;
            for i in (0..n).filter(|&i| is_text(i)) {
                widths[i] *= scale;
            }
        }

        let mut text_total: f64 = (0..n).filter(|&i| is_text(i)).map(|i| widths[i]).sum();
        let mut remaining = box_width_px - text_total;
        let numeric_min_total = min_numeric * numeric_count as f64;
        if remaining < numeric_min_total {
            let need = numeric_min_total - remaining;
            let slack: Vec<f64> = (0..n)
                .map(|i| {
                    if is_text(i) {
                        (widths[i] - min_text).max(0.0)
                    } else {
                        0.0
                    }
                })
                .collect();
            let total_slack: f64 = slack.iter().sum();
            if total_slack > 0.0 {
                let take = need.min(total_slack);
                for i in (0..n).filter(|&i| is_text(i)) {
                    widths[i] -= take * slack[i] / total_slack;
                }
                text_total -= take;
                remaining = box_width_px - text_total;
            }
        }

        let each = (remaining / numeric_count as f64).max(min_numeric);
        for i in (0..n).filter(|&i| !is_text(i)) {
            widths[i] = each;
        }
    }

    normalize_fractions(&mut widths);
    widths
}

fn equal_shares(n: usize) -> Vec<f64> {
    vec![1.0 / n as f64; n]
}

/// Rescales `fracs` in place so they sum to `1.0`.
///
/// Negative or non-finite entries count as zero; an all-zero list becomes equal shares.
pub fn normalize_fractions(fracs: &mut [f64]) {
    if fracs.is_empty() {
        return;
    }
    for f in fracs.iter_mut() {
        if !f.is_finite() || *f < 0.0 {
            *f = 0.0;
        }
    }
    let total: f64 = fracs.iter().sum();
    if total > 0.0 {
        for f in fracs.iter_mut() {
            *f /= total;
        }
    } else {
        let share = 1.0 / fracs.len() as f64;
        fracs.fill(share);
    }
}

/// A column as drawn by the table renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnSpec {
    /// Source field key.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Fraction of the table width (`0..1`).
    pub width_frac: f64,
    /// Cell alignment.
    pub align: Align,
}

impl ColumnSpec {
    /// Creates a column spec.
    pub fn new(key: impl Into<String>, label: impl Into<String>, width_frac: f64) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            width_frac,
            align: Align::Left,
        }
    }

    /// Sets the alignment.
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Pairs column definitions with allocated fractions.
    ///
    /// Extra fractions are ignored; definitions without one get zero width before
    /// normalization.
    pub fn from_allocation(defs: &[ColumnDef], fracs: &[f64]) -> Vec<Self> {
        let mut specs: Vec<Self> = defs
            .iter()
            .enumerate()
            .map(|(i, def)| Self {
                key: def.key.clone(),
                label: def.label.clone(),
                width_frac: fracs.get(i).copied().unwrap_or(0.0),
                align: def.align,
            })
            .collect();
        Self::normalize(&mut specs);
        specs
    }

    /// Rescales the fractions of `specs` so they sum to `1.0`.
    pub fn normalize(specs: &mut [Self]) {
        let mut fracs: Vec<f64> = specs.iter().map(|s| s.width_frac).collect();
        normalize_fractions(&mut fracs);
        for (spec, frac) in specs.iter_mut().zip(fracs) {
            spec.width_frac = frac;
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use tabula_text::HeuristicTextMeasurer;

    use super::*;

    fn text_col(key: &str, values: &[&str]) -> ColumnSample {
        ColumnSample {
            key: key.to_string(),
            header_label: key.to_string(),
            kind: ColumnKind::Text,
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn numeric_col(key: &str) -> ColumnSample {
        ColumnSample {
            key: key.to_string(),
            header_label: key.to_string(),
            kind: ColumnKind::Numeric,
            values: vec!["1".to_string(), "250".to_string()],
        }
    }

    fn sum(xs: &[f64]) -> f64 {
        xs.iter().sum()
    }

    #[test]
    fn empty_and_degenerate_inputs() {
        let c = AllocationConstraints::default();
        assert!(allocate_columns(&HeuristicTextMeasurer, 500.0, &[], &c).is_empty());

        let cols = [text_col("a", &["x"]), numeric_col("b")];
        let fracs = allocate_columns(&HeuristicTextMeasurer, 0.0, &cols, &c);
        assert_eq!(fracs, [0.5, 0.5]);
        let fracs = allocate_columns(&HeuristicTextMeasurer, -10.0, &cols, &c);
        assert_eq!(fracs, [0.5, 0.5]);
    }

    #[test]
    fn text_columns_respect_their_minimum() {
        let c = AllocationConstraints::default();
        let cols = [text_col("a", &["x"]), numeric_col("b")];
        let fracs = allocate_columns(&HeuristicTextMeasurer, 400.0, &cols, &c);
        assert!(fracs[0] * 400.0 >= c.min_text_col_px - 1e-9);
        assert!((sum(&fracs) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn text_share_is_capped() {
        let long = "Lifeguard supervised open water swimming sessions";
        let c = AllocationConstraints::default();
        let cols = [
            text_col("a", &[long]),
            text_col("b", &[long]),
            numeric_col("n"),
        ];
        let fracs = allocate_columns(&HeuristicTextMeasurer, 400.0, &cols, &c);
        assert!(fracs[0] + fracs[1] <= c.max_text_total_frac + 1e-9);
        assert!((fracs[0] - fracs[1]).abs() < 1e-9);
    }

    #[test]
    fn numeric_minimum_steals_from_text_slack() {
        let c = AllocationConstraints {
            max_text_total_frac: 1.0,
            ..AllocationConstraints::default()
        };
        // Text ideal: 40 glyphs * 5.5 + 8 = 228px of a 260px table.
        let value = "abcdefghijklmnopqrstuvwxyzabcdefghijklmn";
        let cols = [text_col("t", &[value]), numeric_col("n")];
        let fracs = allocate_columns(&HeuristicTextMeasurer, 260.0, &cols, &c);
        let numeric_px = fracs[1] * 260.0;
        assert!((numeric_px - c.min_numeric_col_px).abs() < 1e-6, "{numeric_px}");
        assert!(fracs[0] * 260.0 >= c.min_text_col_px);
    }

    #[test]
    fn only_longest_values_are_sampled() {
        let c = AllocationConstraints {
            sample_rows: 1,
            min_text_col_px: 0.0,
            ..AllocationConstraints::default()
        };
        // "WWWW" is skipped because "iiiii" has more characters; with the heuristic both measure
        // by character count, so the sampled width is that of "iiiii".
        let cols = [text_col("t", &["iiiii", "WWWW"])];
        let sampled = cols[0].longest_values(1);
        assert_eq!(sampled, ["iiiii"]);
        let fracs = allocate_columns(&HeuristicTextMeasurer, 100.0, &cols, &c);
        assert_eq!(fracs, [1.0]);
    }

    #[test]
    fn only_text_columns_fill_the_width() {
        let c = AllocationConstraints::default();
        let cols = [text_col("a", &["short"]), text_col("b", &["a longer value"])];
        let fracs = allocate_columns(&HeuristicTextMeasurer, 900.0, &cols, &c);
        assert!((sum(&fracs) - 1.0).abs() < 1e-9);
        assert!(fracs[1] > fracs[0]);
    }

    #[test]
    fn normalize_handles_junk() {
        let mut fracs = [f64::NAN, -1.0, 0.0];
        normalize_fractions(&mut fracs);
        let third = 1.0 / 3.0;
        assert_eq!(fracs, [third, third, third]);

        let mut fracs = [2.0, 2.0];
        normalize_fractions(&mut fracs);
        assert_eq!(fracs, [0.5, 0.5]);
    }

    #[test]
    fn from_allocation_keeps_alignment() {
        let defs = [ColumnDef::text("name", "Name"), ColumnDef::numeric("n", "N")];
        let specs = ColumnSpec::from_allocation(&defs, &[0.3, 0.3]);
        assert_eq!(specs[1].align, Align::Right);
        assert!((specs[0].width_frac - 0.5).abs() < 1e-12);
    }
}
