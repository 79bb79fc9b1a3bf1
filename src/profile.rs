//! Layout profiles: the geometry constants for one output document.
//!
//! A [`Profile`] is a validated, immutable set of page/card/grid/registration
//! constants, all in pixel units at a fixed resolution. Every other module
//! derives its coordinates from here; nothing else hard-codes geometry.
//!
//! ## Units
//!
//! All profile fields are pixels at `ppi` pixels per inch. The PDF packer is
//! the only consumer of physical units and converts once via
//! [`Profile::page_size_pt`] (`pt = px * 72 / ppi`).
//!
//! ## The numbers
//!
//! The standard card is 63 × 88 mm, which at 300 PPI rounds to 744 × 1039 px.
//! The slot gap (754 × 1076) exceeds the card size, leaving inter-card
//! spacing for the cut path. Registration geometry (inset 112, size 188,
//! thickness 12) matches the Silhouette Type-1 three-point mark set.
//!
//! Paper selection is a closed enum — an unsupported size is unrepresentable
//! rather than a silently ignored string.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("{paper} grid exceeds page bounds on {axis}: needs {needed}px, page has {available}px")]
    GridExceedsPage {
        paper: PaperSize,
        axis: &'static str,
        needed: u32,
        available: u32,
    },
}

/// Supported paper sizes. All profiles are landscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    /// US letter, 11 × 8.5 in.
    Letter,
    /// ISO A4, 297 × 210 mm.
    A4,
}

impl PaperSize {
    pub const ALL: [PaperSize; 2] = [PaperSize::Letter, PaperSize::A4];
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaperSize::Letter => write!(f, "letter"),
            PaperSize::A4 => write!(f, "a4"),
        }
    }
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "letter" => Ok(PaperSize::Letter),
            "a4" => Ok(PaperSize::A4),
            other => Err(format!("unknown paper size '{other}' (expected: letter, a4)")),
        }
    }
}

/// Validated geometry constants for one document.
///
/// Construction is the only place configuration errors can surface; render
/// code may rely on every invariant holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub paper: PaperSize,
    /// Pixels per inch; fixed per profile, shared by page and card constants.
    pub ppi: u32,
    pub page_w: u32,
    pub page_h: u32,
    pub card_w: u32,
    pub card_h: u32,
    pub cols: u32,
    pub rows: u32,
    /// Top-left corner of slot 0.
    pub grid_x: u32,
    pub grid_y: u32,
    /// Distance between adjacent slot origins; exceeds card size to leave
    /// inter-card spacing.
    pub gap_x: u32,
    pub gap_y: u32,
    pub reg_inset: u32,
    pub reg_size: u32,
    pub reg_thickness: u32,
}

const PPI: u32 = 300;
const CARD_W: u32 = 744; // 63 mm at 300 PPI
const CARD_H: u32 = 1039; // 88 mm at 300 PPI

impl Profile {
    pub fn new(paper: PaperSize) -> Result<Self, ProfileError> {
        let profile = match paper {
            PaperSize::Letter => Profile {
                paper,
                ppi: PPI,
                page_w: 3300, // 11 in
                page_h: 2550, // 8.5 in
                card_w: CARD_W,
                card_h: CARD_H,
                cols: 4,
                rows: 2,
                grid_x: 150,
                grid_y: 224,
                gap_x: 754,
                gap_y: 1076,
                reg_inset: 112,
                reg_size: 188,
                reg_thickness: 12,
            },
            PaperSize::A4 => Profile {
                paper,
                ppi: PPI,
                page_w: 3508, // 297 mm
                page_h: 2480, // 210 mm
                card_w: CARD_W,
                card_h: CARD_H,
                cols: 4,
                rows: 2,
                // Same grid pitch as letter, centered on the narrower sheet.
                grid_x: 251,
                grid_y: 182,
                gap_x: 754,
                gap_y: 1076,
                reg_inset: 112,
                reg_size: 188,
                reg_thickness: 12,
            },
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check the grid-fits-page invariant. Called once at construction so a
    /// bad constant set fails before any card is rendered.
    fn validate(&self) -> Result<(), ProfileError> {
        let grid_w = self.grid_x + (self.cols - 1) * self.gap_x + self.card_w;
        if grid_w > self.page_w {
            return Err(ProfileError::GridExceedsPage {
                paper: self.paper,
                axis: "x",
                needed: grid_w,
                available: self.page_w,
            });
        }
        let grid_h = self.grid_y + (self.rows - 1) * self.gap_y + self.card_h;
        if grid_h > self.page_h {
            return Err(ProfileError::GridExceedsPage {
                paper: self.paper,
                axis: "y",
                needed: grid_h,
                available: self.page_h,
            });
        }
        Ok(())
    }

    pub fn slots_per_page(&self) -> usize {
        (self.cols * self.rows) as usize
    }

    /// Top-left pixel coordinate of slot `index`.
    ///
    /// `index` must be in `0..slots_per_page()`; an out-of-range index is a
    /// caller bug, not an input condition, and panics rather than clamping.
    pub fn slot_origin(&self, index: usize) -> (u32, u32) {
        assert!(
            index < self.slots_per_page(),
            "slot index {index} out of range for {} slots",
            self.slots_per_page()
        );
        let col = index as u32 % self.cols;
        let row = index as u32 / self.cols;
        (self.grid_x + col * self.gap_x, self.grid_y + row * self.gap_y)
    }

    /// Physical page size in PDF points (1/72 in).
    pub fn page_size_pt(&self) -> (f64, f64) {
        (
            f64::from(self.page_w) * 72.0 / f64::from(self.ppi),
            f64::from(self.page_h) * 72.0 / f64::from(self.ppi),
        )
    }
}
