// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of a finished page.

use std::fmt::Write as _;

use peniko::Brush;
use tabula_layout::{
    FontStyle, Mark, MarkPayload, PageSize, PathMark, RectMark, RuleMark, StrokeStyle,
    TextAnchor, TextBaseline, TextMark,
};

/// Writes `marks` (already in paint order) as a standalone SVG document.
pub(crate) fn page_to_svg(size: PageSize, marks: &[Mark]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = size.width,
        h = size.height,
    );

    let mut clip_ids = 0_usize;
    for mark in marks {
        match &mark.payload {
            MarkPayload::Rect(r) => write_rect(&mut out, r),
            MarkPayload::Rule(r) => write_rule(&mut out, r),
            MarkPayload::Path(p) => write_path(&mut out, p),
            MarkPayload::Text(t) => {
                let clip = t.clip.as_ref().map(|path| {
                    clip_ids += 1;
                    let id = format!("clip{clip_ids}");
                    let _ = writeln!(
                        out,
                        r#"<clipPath id="{id}"><path d="{}"/></clipPath>"#,
                        path.to_svg()
                    );
                    id
                });
                write_text(&mut out, t, clip.as_deref());
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn write_rect(out: &mut String, r: &RectMark) {
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        r.rect.x0,
        r.rect.y0,
        r.rect.width(),
        r.rect.height(),
    );
    match &r.fill {
        Some(fill) => write_paint_attr(out, "fill", fill),
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &r.stroke {
        write_stroke(out, stroke);
    }
    out.push_str("/>\n");
}

fn write_rule(out: &mut String, r: &RuleMark) {
    let _ = write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
        r.p0.x, r.p0.y, r.p1.x, r.p1.y
    );
    write_stroke(out, &r.stroke);
    out.push_str("/>\n");
}

fn write_path(out: &mut String, p: &PathMark) {
    let _ = write!(out, r#"<path d="{}""#, p.path.to_svg());
    write_paint_attr(out, "fill", &p.fill);
    if let Some(stroke) = &p.stroke {
        write_stroke(out, stroke);
    }
    out.push_str("/>\n");
}

fn write_text(out: &mut String, t: &TextMark, clip: Option<&str>) {
    let baseline = match t.baseline {
        TextBaseline::Middle => "central",
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Hanging => "hanging",
    };
    let anchor = match t.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" dominant-baseline="{baseline}" text-anchor="{anchor}""#,
        t.pos.x,
        t.pos.y,
        escape_xml(t.style.font_family.as_css_family()),
        t.style.font_size,
        t.style.font_weight.0,
    );
    match t.style.font_style {
        FontStyle::Normal => {}
        FontStyle::Italic => out.push_str(r#" font-style="italic""#),
        FontStyle::Oblique => out.push_str(r#" font-style="oblique""#),
    }
    write_paint_attr(out, "fill", &t.fill);
    if let Some(id) = clip {
        let _ = write!(out, r#" clip-path="url(#{id})""#);
    }
    out.push('>');
    out.push_str(&escape_xml(&t.text));
    out.push_str("</text>\n");
}

fn write_stroke(out: &mut String, stroke: &StrokeStyle) {
    write_paint_attr(out, "stroke", &stroke.brush);
    let _ = write!(out, r#" stroke-width="{}""#, stroke.stroke_width);
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
