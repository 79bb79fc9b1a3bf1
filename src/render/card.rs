//! Card slot placement: decode, resize, bleed, composite.
//!
//! Source art comes in as encoded bytes at whatever resolution the scan
//! provided; every card is resized to the exact slot size (Lanczos3) before
//! placement, so input resolution never affects the physical layout.
//!
//! A corrupt buffer never fails the build. The slot gets an opaque
//! placeholder at the nominal position instead, and the outcome tells the
//! caller so the miss ends up in the render report.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// Fill used when a present buffer does not decode. Dark enough to be an
/// obvious miss on the printed sheet without wasting ink.
const PLACEHOLDER_FILL: Rgb<u8> = Rgb([38, 38, 51]);

/// What ended up in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotOutcome {
    /// The source image was decoded and placed.
    Placed,
    /// The buffer failed to decode; a placeholder block was placed.
    Placeholder,
    /// No source for this slot; the page background shows through.
    Blank,
}

/// Place one card image onto `page` with its top-left corner at `(x, y)`.
///
/// With `bleed > 0` the image is resized to cover the slot plus `bleed`
/// pixels on every side and shifted up-left by `bleed`, spilling past the
/// slot boundary so the cut path never exposes a white sliver at rounded
/// corners. `overlay` clips at the page edges, so bleed on border slots is
/// safe even when the shifted origin leaves the canvas.
pub fn place(
    page: &mut RgbImage,
    bytes: &[u8],
    x: u32,
    y: u32,
    slot_w: u32,
    slot_h: u32,
    bleed: u32,
) -> SlotOutcome {
    let card = match image::load_from_memory(bytes) {
        Ok(img) => img.to_rgb8(),
        Err(_) => {
            let placeholder = RgbImage::from_pixel(slot_w, slot_h, PLACEHOLDER_FILL);
            imageops::overlay(page, &placeholder, i64::from(x), i64::from(y));
            return SlotOutcome::Placeholder;
        }
    };

    if bleed > 0 {
        let resized = imageops::resize(
            &card,
            slot_w + 2 * bleed,
            slot_h + 2 * bleed,
            FilterType::Lanczos3,
        );
        imageops::overlay(
            page,
            &resized,
            i64::from(x) - i64::from(bleed),
            i64::from(y) - i64::from(bleed),
        );
    } else {
        let resized = imageops::resize(&card, slot_w, slot_h, FilterType::Lanczos3);
        imageops::overlay(page, &resized, i64::from(x), i64::from(y));
    }
    SlotOutcome::Placed
}
