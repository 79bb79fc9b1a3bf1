//! CLI output formatting.
//!
//! Each display has a `format_*` function returning lines (pure, no I/O)
//! and a `print_*` wrapper that writes them to stdout. Layout follows a
//! two-level pattern: a header line with the headline numbers, then
//! indented context lines.

use std::path::Path;

use crate::profile::Profile;
use crate::report::RenderReport;

fn indent(line: impl AsRef<str>) -> String {
    format!("    {}", line.as_ref())
}

/// Summary of a finished build: page counts, slot outcomes, output path.
pub fn format_build_summary(report: &RenderReport, out: &Path, pdf_len: usize) -> Vec<String> {
    let s = report.summary();
    let mut lines = vec![format!(
        "Built {} pages ({} sheet{})",
        s.sheets * 2,
        s.sheets,
        if s.sheets == 1 { "" } else { "s" }
    )];
    lines.push(indent(format!("placed: {}", s.placed)));
    if s.placeholders > 0 {
        lines.push(indent(format!("placeholders: {}", s.placeholders)));
    }
    if s.blanks > 0 {
        lines.push(indent(format!("blank back slots: {}", s.blanks)));
    }
    lines.push(indent(format!(
        "{} ({} KB)",
        out.display(),
        pdf_len.div_ceil(1024)
    )));

    let misses: Vec<String> = report
        .placeholders()
        .map(|e| {
            indent(format!(
                "card {} → sheet {} {} slot {} (image did not decode)",
                e.card + 1,
                e.sheet,
                e.side,
                e.slot
            ))
        })
        .collect();
    if !misses.is_empty() {
        lines.push("Placeholders".to_string());
        lines.extend(misses);
    }
    lines
}

pub fn print_build_summary(report: &RenderReport, out: &Path, pdf_len: usize) {
    for line in format_build_summary(report, out, pdf_len) {
        println!("{line}");
    }
}

/// Geometry listing for one paper profile.
pub fn format_profile(profile: &Profile) -> Vec<String> {
    let (w_pt, h_pt) = profile.page_size_pt();
    vec![
        format!(
            "{} ({} × {} px @ {} PPI, {} × {} pt)",
            profile.paper, profile.page_w, profile.page_h, profile.ppi, w_pt, h_pt
        ),
        indent(format!(
            "grid: {} × {} slots of {} × {} px",
            profile.cols, profile.rows, profile.card_w, profile.card_h
        )),
        indent(format!(
            "origin: ({}, {}), pitch: ({}, {})",
            profile.grid_x, profile.grid_y, profile.gap_x, profile.gap_y
        )),
        indent(format!(
            "marks: inset {}, size {}, thickness {}",
            profile.reg_inset, profile.reg_size, profile.reg_thickness
        )),
    ]
}

pub fn print_profiles<'a>(profiles: impl IntoIterator<Item = &'a Profile>) {
    for profile in profiles {
        for line in format_profile(profile) {
            println!("{line}");
        }
    }
}
