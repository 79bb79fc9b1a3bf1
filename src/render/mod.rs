//! Pixel-space rendering: registration marks and card slot placement.

pub mod card;
pub mod marks;
