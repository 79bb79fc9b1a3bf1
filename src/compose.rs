//! Page compositing: one side of one sheet, as a raster.
//!
//! Assembly order is fixed: white canvas, registration marks, then every
//! slot assignment through the card renderer. The footer label is computed
//! here but left to the packer, which stamps it as vector text so it stays
//! sharp at any zoom.

use image::{Rgb, RgbImage};

use crate::layout::SlotAssignment;
use crate::profile::Profile;
use crate::render::card::{self, SlotOutcome};
use crate::render::marks;
use crate::report::{Side, SlotEntry};
use crate::types::RenderOptions;

const PAGE_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// One finished page raster with its footer label and slot audit trail.
#[derive(Debug)]
pub struct ComposedPage {
    pub raster: RgbImage,
    /// Footer text the packer stamps into the bottom margin.
    pub label: String,
    pub entries: Vec<SlotEntry>,
}

/// Render one side of sheet `sheet` (0-based).
pub fn compose_page(
    profile: &Profile,
    options: &RenderOptions,
    sheet: usize,
    side: Side,
    assignments: &[SlotAssignment<'_>],
) -> ComposedPage {
    let mut raster = RgbImage::from_pixel(profile.page_w, profile.page_h, PAGE_BACKGROUND);
    marks::draw(&mut raster, profile);

    let mut entries = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        let (x, y) = profile.slot_origin(assignment.slot);
        let outcome = match assignment.bytes {
            Some(bytes) => card::place(
                &mut raster,
                bytes,
                x,
                y,
                profile.card_w,
                profile.card_h,
                options.bleed,
            ),
            None => SlotOutcome::Blank,
        };
        entries.push(SlotEntry {
            sheet: sheet + 1,
            side,
            slot: assignment.slot,
            card: assignment.card_index,
            outcome,
        });
    }

    ComposedPage {
        raster,
        label: footer_label(sheet, side),
        entries,
    }
}

/// Footer text for one page. The sheet number is shared by both sides, so
/// "Page 3 front" and "Page 3 back" refer to the same physical sheet.
pub fn footer_label(sheet: usize, side: Side) -> String {
    format!(
        "proxysheet | Page {} {} | Print at 100% scale, no fit-to-page",
        sheet + 1,
        side
    )
}
