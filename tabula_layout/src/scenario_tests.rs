// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end checks across allocator, planner, fitter and renderer.

extern crate std;

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;
use tabula_text::{HeuristicTextMeasurer, TextStyle};

use crate::{
    AllocationConstraints, BannerSpec, Block, BlockLayoutSpec, Canvas, CellValue, ColumnDef,
    ColumnSample, ColumnSpec, DataTable, ELLIPSIS, FitOptions, MarkPayload, PageSize, Size,
    TableRenderer, TableSpec, TableStyle, allocate_columns, fit_text, plan_blocks,
};

fn name_table(names: &[&str]) -> DataTable {
    let columns = vec![
        ColumnDef::text("name", "Name"),
        ColumnDef::numeric("count", "Count"),
        ColumnDef::numeric("pct", "Pct").with_decimals(1),
    ];
    let rows = names
        .iter()
        .enumerate()
        .map(|(i, n)| {
            vec![
                CellValue::from(*n),
                CellValue::from(i as f64 * 3.0),
                CellValue::from(12.5 + i as f64),
            ]
        })
        .collect();
    DataTable::new(columns, rows).expect("valid table")
}

const NAMES: [&str; 5] = [
    "Elms",
    "Oak Park Elementary",
    "Riverside Community Learning Center",
    "North Hills Middle School Annex Program",
    "Lakeview",
];

#[test]
fn name_count_pct_allocation_fills_800px() {
    assert!(NAMES.iter().all(|n| (4..=40).contains(&n.chars().count())));
    let table = name_table(&NAMES);
    let constraints = AllocationConstraints::default();
    let fracs = allocate_columns(
        &HeuristicTextMeasurer,
        800.0,
        &ColumnSample::from_table(&table),
        &constraints,
    );

    let px: Vec<f64> = fracs.iter().map(|f| f * 800.0).collect();
    assert!(px[0] >= constraints.min_text_col_px);
    assert!((px[1] - px[2]).abs() < 1e-9);
    assert!((px.iter().sum::<f64>() - 800.0).abs() < 1e-6);
}

#[test]
fn empty_block_is_positioned_below_its_neighbour() {
    let spec = BlockLayoutSpec {
        y_top: 0.9,
        y_bottom: 0.1,
        target_row_h: 0.02,
        ..BlockLayoutSpec::default()
    };
    let columns = vec![ColumnDef::text("name", "Name")];
    let rows = (0..10).map(|i| vec![CellValue::from(i.to_string())]).collect();
    let a = Block::new("A", DataTable::new(columns.clone(), rows).expect("valid"));
    let b = Block::new("B", DataTable::empty(columns).expect("valid"));

    let out = plan_blocks(&[a.demand(), b.demand()], &spec);
    let expected = 10.0 * 0.02 / (1.0 - a.header_height_frac);
    assert!((out[0].height - expected).abs() < 1e-12);
    assert_eq!(out[1].height, 0.0);
    assert!((out[1].top() - (out[0].y - spec.gap)).abs() < 1e-12);
}

#[test]
fn hazard_label_fits_in_two_lines() {
    let text = "Basic awareness of potential water-related hazards";
    let options = FitOptions::new(14.0, 8.0).with_max_lines(2);
    let fitted = fit_text(
        &HeuristicTextMeasurer,
        text,
        Size::new(120.0, 40.0),
        &TextStyle::default(),
        &options,
    );
    assert!(fitted.lines.len() <= 2);
    assert!((8.0..=14.0).contains(&fitted.font_size));
    if fitted.truncated {
        let last = fitted.lines.last().expect("a truncated fit keeps a line");
        assert!(last.ends_with(ELLIPSIS));
    }
    assert!(fitted.attempts <= options.max_attempts());
}

#[test]
fn composed_page_stays_inside_its_bounds() {
    let page = PageSize::new(816.0, 1056.0);
    let mut canvas = Canvas::new(page, &HeuristicTextMeasurer);
    BannerSpec::default().draw(&mut canvas, Rect::new(40.0, 20.0, 776.0, 80.0), "Summary");

    let blocks = [
        Block::new("Schools", name_table(&NAMES)).with_footer("Counts as of fall"),
        Block::new("Providers", name_table(&[])),
    ];
    let layout = BlockLayoutSpec::default();
    let demands: Vec<_> = blocks.iter().map(Block::demand).collect();
    let placements = plan_blocks(&demands, &layout);

    let mut renderer = TableRenderer::new();
    let style = TableStyle::default();
    for (block, placement) in blocks.iter().zip(&placements) {
        let page_box = placement.page_box(0.05, 0.9).expect("valid box");
        let fracs = allocate_columns(
            canvas.measurer(),
            page_box.width * page.width,
            &ColumnSample::from_table(&block.table),
            &AllocationConstraints::default(),
        );
        let mut spec = TableSpec::new(ColumnSpec::from_allocation(block.table.columns(), &fracs))
            .with_header_height_frac(block.header_height_frac)
            .with_footer_room_px(layout.gap * page.height);
        spec.footer = block.footer.clone();
        renderer.draw(&mut canvas, &page_box, &spec, &block.table, &style);
    }

    let marks = canvas.finish();
    let bounds = Rect::new(0.0, 0.0, page.width, page.height);
    let mut cell_text: Vec<String> = Vec::new();
    for mark in &marks {
        match &mark.payload {
            MarkPayload::Text(t) => {
                assert!(bounds.contains(t.pos), "{:?} off page", t.text);
                cell_text.push(t.text.clone());
            }
            payload => {
                let b = payload.bounds().expect("geometry has bounds");
                assert!(b.x0 >= -1e-9 && b.x1 <= page.width + 1e-9);
                assert!(b.y0 >= -1e-9 && b.y1 <= page.height + 1e-9);
            }
        }
    }
    assert!(cell_text.iter().any(|t| t == "Summary"));
    assert!(cell_text.iter().any(|t| t == "Counts as of fall"));
    assert!(cell_text.iter().all(|t| !t.contains("NaN")));
}
