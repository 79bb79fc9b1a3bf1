//! # proxysheet
//!
//! Print-and-cut sheet generator for card game proxies. Card images go in,
//! a single PDF comes out: cards tiled onto fixed-geometry pages with
//! Silhouette Type-1 registration marks, fronts and backs paginated so that
//! physically flipping the printed sheet lines every back up with its front,
//! at exact physical scale for the cutting machine.
//!
//! # Architecture: Layout → Render → Pack
//!
//! A build runs through three independent stages:
//!
//! ```text
//! 1. Layout   batch       →  slot assignments   (pure index math)
//! 2. Render   assignments →  page rasters       (marks + card art, per sheet)
//! 3. Pack     rasters     →  PDF bytes          (one JPEG per page, verbatim)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Testability**: pagination and mirroring are pure functions over
//!   indices, testable without decoding a single image.
//! - **Parallelism**: each sheet is a pure function of the batch and the
//!   profile, so sheets render concurrently and are reassembled by index.
//! - **Fidelity**: the packer embeds each page's JPEG bytes untouched, so
//!   print output is exactly what the renderer produced.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`profile`] | Validated geometry constants per paper size (page, grid, card, marks) |
//! | [`layout`] | Pagination and back-side column mirroring |
//! | [`render`] | Pixel-space drawing: registration marks, card decode/resize/bleed |
//! | [`compose`] | One side of one sheet: canvas + marks + slots + footer label |
//! | [`pdf`] | PDF assembly: DCTDecode image XObjects, exact MediaBox, footer text |
//! | [`report`] | Per-slot audit trail, JSON-serializable |
//! | [`types`] | Batch, options, and error types shared across stages |
//! | [`output`] | CLI output formatting for build summaries and profile listings |
//!
//! # Design Decisions
//!
//! ## Pixel Space Everywhere, Points Once
//!
//! All layout happens in pixels at a fixed 300 PPI; the only pixel-to-point
//! conversion is the MediaBox (`pt = px * 72 / ppi`). Working in one unit
//! system keeps the grid math integral and makes every coordinate in the
//! profile directly comparable to the cutter's own templates.
//!
//! ## JPEG Passthrough
//!
//! Each page raster is JPEG-encoded exactly once and embedded with a
//! `DCTDecode` filter. The PDF is a thin container around those bytes — no
//! second lossy generation, and file size stays proportional to page count.
//!
//! ## Failures Stay on the Page
//!
//! A card image that fails to decode never aborts a build. The slot gets an
//! opaque placeholder and the miss is recorded in the render report, because
//! a 200-card print run should not die on one corrupt download. Only
//! structural problems (empty batch, mismatched back list, PDF assembly)
//! are errors.

pub mod compose;
pub mod layout;
pub mod output;
pub mod pdf;
pub mod profile;
pub mod render;
pub mod report;
pub mod types;

use rayon::prelude::*;

use crate::compose::ComposedPage;
use crate::profile::{PaperSize, Profile};
use crate::report::{RenderReport, Side};
use crate::types::{BuildError, BuiltDocument, CardBatch, RenderOptions};

/// Build the complete print-and-cut document for a card batch.
///
/// Emits `2 * ceil(N / slots_per_page)` pages in strict alternation:
/// front of sheet 1, back of sheet 1, front of sheet 2, and so on. A back
/// page is emitted even when no card on the sheet has any back source.
pub fn build_document(
    batch: &CardBatch,
    paper: PaperSize,
    options: &RenderOptions,
) -> Result<BuiltDocument, BuildError> {
    if batch.is_empty() {
        return Err(BuildError::EmptyBatch);
    }
    if batch.backs.len() != batch.fronts.len() {
        return Err(BuildError::MismatchedBacks {
            fronts: batch.fronts.len(),
            backs: batch.backs.len(),
        });
    }
    let profile = Profile::new(paper)?;

    let sheets = layout::sheet_count(batch.len(), profile.slots_per_page());
    // Sheets are independent; rayon hands them to the pool and the indexed
    // collect restores front/back order regardless of completion order.
    let pages: Vec<ComposedPage> = (0..sheets)
        .into_par_iter()
        .flat_map_iter(|sheet| {
            let fronts = layout::front_assignments(batch, &profile, sheet);
            let backs = layout::back_assignments(batch, &profile, sheet);
            [
                compose::compose_page(&profile, options, sheet, Side::Front, &fronts),
                compose::compose_page(&profile, options, sheet, Side::Back, &backs),
            ]
        })
        .collect();

    let mut report = RenderReport::default();
    for page in &pages {
        report.extend(page.entries.clone());
    }

    let pdf = pdf::pack_document(&pages, &profile, options.quality)?;
    Ok(BuiltDocument { pdf, report })
}
