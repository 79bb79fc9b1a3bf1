//! Pagination and back-side mirroring.
//!
//! Splits a card batch into sheets of `slots_per_page` cards and decides
//! which grid slot each card lands in on the front and on the back of every
//! sheet. Pure index math over borrowed buffers; no raster state.
//!
//! ## Mirroring
//!
//! Backs are printed on a second pass after the sheet is physically flipped
//! on its short axis. The flip reverses columns but keeps rows, so the back
//! of the card in slot `(row, col)` must print in slot `(row, cols-1-col)`.
//! Applying the mapping twice yields the original slot.

use crate::profile::Profile;
use crate::types::CardBatch;

/// One card routed to one grid slot on a page.
///
/// `bytes` is `None` for a back slot with no back source; the slot stays
/// blank but is still reported.
#[derive(Debug, Clone, Copy)]
pub struct SlotAssignment<'a> {
    /// Index of the card within the whole batch.
    pub card_index: usize,
    /// Grid slot the image is placed in.
    pub slot: usize,
    pub bytes: Option<&'a [u8]>,
}

/// Number of sheets needed for `total` cards, `ceil(total / slots_per_page)`.
pub fn sheet_count(total: usize, slots_per_page: usize) -> usize {
    total.div_ceil(slots_per_page)
}

/// Back-side slot for the card occupying `slot` on the front.
pub fn mirrored_slot(slot: usize, cols: u32) -> usize {
    let cols = cols as usize;
    let row = slot / cols;
    let col = slot % cols;
    row * cols + (cols - 1 - col)
}

/// Cards on sheet `sheet`, in reading order, each in its own slot.
pub fn front_assignments<'a>(
    batch: &'a CardBatch,
    profile: &Profile,
    sheet: usize,
) -> Vec<SlotAssignment<'a>> {
    sheet_range(batch.len(), profile.slots_per_page(), sheet)
        .map(|(local, card_index)| SlotAssignment {
            card_index,
            slot: local,
            bytes: Some(batch.fronts[card_index].as_slice()),
        })
        .collect()
}

/// Backs for sheet `sheet`, column-mirrored, with the per-card back falling
/// back to the batch's generic back.
pub fn back_assignments<'a>(
    batch: &'a CardBatch,
    profile: &Profile,
    sheet: usize,
) -> Vec<SlotAssignment<'a>> {
    sheet_range(batch.len(), profile.slots_per_page(), sheet)
        .map(|(local, card_index)| {
            let bytes = batch.backs[card_index]
                .as_deref()
                .or(batch.generic_back.as_deref());
            SlotAssignment {
                card_index,
                slot: mirrored_slot(local, profile.cols),
                bytes,
            }
        })
        .collect()
}

/// `(local_slot, batch_index)` pairs for the cards on sheet `sheet`.
fn sheet_range(total: usize, per_page: usize, sheet: usize) -> impl Iterator<Item = (usize, usize)> {
    let start = sheet * per_page;
    let end = (start + per_page).min(total);
    (start..end).enumerate()
}
