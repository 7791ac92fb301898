// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The JSON report document: pages of titled sections, each a small table.
//!
//! ```json
//! { "pages": [ { "title": "District", "sections": [
//!     { "name": "Schools",
//!       "columns": [ { "key": "name", "label": "School" },
//!                    { "key": "n", "label": "Students", "kind": "numeric" } ],
//!       "rows": [ { "name": "Oak Park", "n": 412 } ] } ] } ] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tabula_layout::{Align, Block, CellValue, ColumnDef, ColumnKind, DataTable};

use crate::error::ReportError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct ReportDocument {
    pub(crate) pages: Vec<PageDocument>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct PageDocument {
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) subtitle: Option<String>,
    #[serde(default)]
    pub(crate) sections: Vec<SectionDocument>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct SectionDocument {
    pub(crate) name: String,
    pub(crate) columns: Vec<ColumnDocument>,
    #[serde(default)]
    pub(crate) rows: Vec<Map<String, Value>>,
    #[serde(default)]
    pub(crate) footer: Option<String>,
    #[serde(default)]
    pub(crate) header_height_frac: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct ColumnDocument {
    pub(crate) key: String,
    #[serde(default)]
    pub(crate) label: Option<String>,
    #[serde(default)]
    pub(crate) kind: ColumnKind,
    #[serde(default)]
    pub(crate) align: Option<Align>,
    #[serde(default)]
    pub(crate) decimals: Option<usize>,
}

impl ColumnDocument {
    fn to_def(&self) -> ColumnDef {
        let label = self.label.clone().unwrap_or_else(|| self.key.clone());
        let mut def = match self.kind {
            ColumnKind::Text => ColumnDef::text(self.key.clone(), label),
            ColumnKind::Numeric => ColumnDef::numeric(self.key.clone(), label),
        };
        if let Some(align) = self.align {
            def = def.with_align(align);
        }
        if let Some(decimals) = self.decimals {
            def = def.with_decimals(decimals);
        }
        def
    }
}

/// Converts one JSON value for a column of `kind`.
///
/// Numeric columns accept numbers and numeric strings; anything else in them becomes text so
/// the table's schema check reports it.
fn cell(kind: ColumnKind, value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::Number(n) => n.as_f64().map_or(CellValue::Missing, CellValue::Number),
        Value::String(s) if kind == ColumnKind::Numeric => match s.trim() {
            "" => CellValue::Missing,
            t => t
                .parse::<f64>()
                .map_or_else(|_| CellValue::Text(s.clone()), CellValue::Number),
        },
        Value::String(s) => CellValue::Text(s.clone()),
        Value::Bool(b) => CellValue::Text(if *b { "Yes" } else { "No" }.into()),
        other => CellValue::Text(other.to_string()),
    }
}

impl SectionDocument {
    fn to_block(&self, page: usize) -> Result<Block, ReportError> {
        let defs: Vec<ColumnDef> = self.columns.iter().map(ColumnDocument::to_def).collect();
        let rows = self
            .rows
            .iter()
            .map(|record| {
                defs.iter()
                    .map(|def| {
                        record
                            .get(&def.key)
                            .map_or(CellValue::Missing, |v| cell(def.kind, v))
                    })
                    .collect()
            })
            .collect();
        let table = DataTable::new(defs, rows).map_err(|source| ReportError::Data {
            page,
            section: self.name.clone(),
            source,
        })?;
        let mut block = Block::new(self.name.clone(), table);
        if let Some(frac) = self.header_height_frac {
            block = block
                .with_header_height_frac(frac)
                .map_err(|source| ReportError::Section {
                    page,
                    section: self.name.clone(),
                    source,
                })?;
        }
        if let Some(footer) = &self.footer {
            block = block.with_footer(footer.clone());
        }
        Ok(block)
    }
}

impl PageDocument {
    /// Validated blocks for this page. `page` is 1-based, for error messages.
    pub(crate) fn blocks(&self, page: usize) -> Result<Vec<Block>, ReportError> {
        self.sections.iter().map(|s| s.to_block(page)).collect()
    }
}

impl ReportDocument {
    pub(crate) fn from_json(path: &Path, text: &str) -> Result<Self, ReportError> {
        serde_json::from_str(text).map_err(|source| ReportError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn load(path: &Path) -> Result<Self, ReportError> {
        let text = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &text)
    }

    /// The built-in two-page sample.
    pub(crate) fn sample() -> Result<Self, ReportError> {
        Self::from_json(Path::new("<sample>"), SAMPLE)
    }
}

const SAMPLE: &str = include_str!("../data/sample.json");

#[cfg(test)]
mod tests {
    use tabula_layout::GeometryError;

    use super::*;

    const DOC: &str = r#"{
        "pages": [{
            "title": "Harbor District",
            "sections": [{
                "name": "Schools",
                "columns": [
                    { "key": "name", "label": "School" },
                    { "key": "students", "kind": "numeric" },
                    { "key": "pct", "label": "%", "kind": "numeric", "decimals": 1 }
                ],
                "rows": [
                    { "name": "Oak Park", "students": 412, "pct": "38.24" },
                    { "name": "Lakeview", "pct": null, "extra": true }
                ]
            }]
        }]
    }"#;

    #[test]
    fn sections_become_typed_blocks() {
        let doc = ReportDocument::from_json(Path::new("doc.json"), DOC).expect("valid doc");
        let blocks = doc.pages[0].blocks(1).expect("valid blocks");
        let table = &blocks[0].table;
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns()[1].label, "students");
        assert_eq!(table.columns()[1].align, Align::Right);
        assert_eq!(table.display(0, 1), "412");
        assert_eq!(table.display(0, 2), "38.2");
        assert_eq!(table.display(1, 1), "");
        assert_eq!(table.display(1, 2), "");
    }

    #[test]
    fn text_in_numeric_column_reports_the_section() {
        let doc = DOC.replace(r#""pct": "38.24""#, r#""pct": "high""#);
        let doc = ReportDocument::from_json(Path::new("doc.json"), &doc).expect("valid JSON");
        let err = doc.pages[0].blocks(1).expect_err("schema violation");
        assert!(matches!(
            err,
            ReportError::Data { page: 1, ref section, .. } if section == "Schools"
        ));
    }

    #[test]
    fn header_fraction_without_room_for_rows_is_rejected() {
        let doc = DOC.replace(
            r#""name": "Schools","#,
            r#""name": "Schools", "header_height_frac": 1.0,"#,
        );
        let doc = ReportDocument::from_json(Path::new("doc.json"), &doc).expect("valid JSON");
        let err = doc.pages[0].blocks(1).expect_err("header fills the block");
        assert!(matches!(
            err,
            ReportError::Section {
                page: 1,
                source: GeometryError::InvalidHeaderFraction(f),
                ..
            } if f == 1.0
        ));

        let doc = DOC.replace(
            r#""name": "Schools","#,
            r#""name": "Schools", "header_height_frac": 0.3,"#,
        );
        let doc = ReportDocument::from_json(Path::new("doc.json"), &doc).expect("valid JSON");
        let blocks = doc.pages[0].blocks(1).expect("valid fraction");
        assert_eq!(blocks[0].header_height_frac, 0.3);
    }

    #[test]
    fn sample_document_is_valid() {
        let doc = ReportDocument::sample().expect("sample parses");
        assert_eq!(doc.pages.len(), 2);
        for (i, page) in doc.pages.iter().enumerate() {
            page.blocks(i + 1).expect("sample sections are well formed");
        }
        assert_eq!(doc.pages[1].blocks(2).expect("valid")[0].table.row_count(), 0);
    }

    #[test]
    fn malformed_json_is_reported_with_its_path() {
        let err = ReportDocument::from_json(Path::new("bad.json"), "{ pages: ").expect_err("bad");
        assert!(matches!(err, ReportError::Json { .. }));
    }
}
