//! Silhouette Type-1 registration marks.
//!
//! Three fiducials, identical on every page so the cutter's optical scanner
//! can locate the grid on fronts and backs alike:
//!
//! - top-left: filled black square
//! - top-right: L of two bars, along the top edge and the right edge
//! - bottom-left: L of two bars, along the bottom edge and the left edge
//!
//! Both Ls open toward the page interior. All geometry comes from the
//! profile (inset, size, thickness); drawing is pure pixel fills and cannot
//! fail on a validated profile.

use image::{Rgb, RgbImage};

use crate::profile::Profile;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Fill an axis-aligned rectangle, clipped to the image bounds.
fn fill_rect(page: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x1 = (x + w).min(page.width());
    let y1 = (y + h).min(page.height());
    for py in y..y1 {
        for px in x..x1 {
            page.put_pixel(px, py, color);
        }
    }
}

/// Draw all three registration marks onto `page`.
pub fn draw(page: &mut RgbImage, profile: &Profile) {
    let i = profile.reg_inset;
    let s = profile.reg_size;
    let t = profile.reg_thickness;
    let w = profile.page_w;
    let h = profile.page_h;

    // Top-left: filled square.
    fill_rect(page, i, i, s, s, BLACK);

    // Top-right: bar along the top edge, bar along the right edge.
    let (tr_x, tr_y) = (w - i - s, i);
    fill_rect(page, tr_x, tr_y, s, t, BLACK);
    fill_rect(page, tr_x + s - t, tr_y, t, s, BLACK);

    // Bottom-left: bar along the bottom edge, bar along the left edge.
    let (bl_x, bl_y) = (i, h - i - s);
    fill_rect(page, bl_x, bl_y + s - t, s, t, BLACK);
    fill_rect(page, bl_x, bl_y, t, s, BLACK);
}
