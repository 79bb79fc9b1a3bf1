//! Shared types used across the layout, render, and packing stages.

use thiserror::Error;

/// JPEG quality, clamped to the valid 1-100 range at construction.
///
/// Pages are rasterized once and JPEG-encoded once; this is the quality of
/// that single encode, and the encoded bytes land in the PDF untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Quality(value.clamp(1, 100))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality(90)
    }
}

/// Knobs for a single document build.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Pixels of bleed past each slot edge. Card art is upscaled to cover the
    /// slot plus this margin on all sides, hiding the white rounded-corner
    /// artifact after the cut. 0 disables bleed.
    pub bleed: u32,
    pub quality: Quality,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            bleed: 10,
            quality: Quality::default(),
        }
    }
}

/// One print job: ordered card fronts with their optional backs.
///
/// `fronts[i]` and `backs[i]` describe the same card. A `None` back falls
/// back to `generic_back`; if that is also absent the back slot stays blank.
/// Buffers are encoded image bytes (JPEG/PNG/WebP) and are never mutated.
#[derive(Debug, Clone, Default)]
pub struct CardBatch {
    pub fronts: Vec<Vec<u8>>,
    pub backs: Vec<Option<Vec<u8>>>,
    pub generic_back: Option<Vec<u8>>,
}

impl CardBatch {
    /// Batch with no per-card backs; every back slot uses the generic back
    /// (or stays blank).
    pub fn fronts_only(fronts: Vec<Vec<u8>>) -> Self {
        let backs = vec![None; fronts.len()];
        CardBatch {
            fronts,
            backs,
            generic_back: None,
        }
    }

    pub fn len(&self) -> usize {
        self.fronts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fronts.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("card batch is empty; at least one front image is required")]
    EmptyBatch,
    #[error("back list length ({backs}) does not match front list length ({fronts})")]
    MismatchedBacks { fronts: usize, backs: usize },
    #[error(transparent)]
    Profile(#[from] crate::profile::ProfileError),
    #[error("failed to encode page {page} as JPEG: {source}")]
    PageEncode {
        page: usize,
        source: image::ImageError,
    },
    #[error("failed to assemble PDF: {0}")]
    Pdf(#[from] lopdf::Error),
}

/// A finished build: the PDF bytes plus the per-slot render report.
#[derive(Debug)]
pub struct BuiltDocument {
    pub pdf: Vec<u8>,
    pub report: crate::report::RenderReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(100).value(), 100);
        assert_eq!(Quality::new(255).value(), 100);
    }

    #[test]
    fn default_quality_is_90() {
        assert_eq!(Quality::default().value(), 90);
    }

    #[test]
    fn fronts_only_pads_backs_to_length() {
        let batch = CardBatch::fronts_only(vec![vec![1], vec![2], vec![3]]);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.backs, vec![None, None, None]);
        assert!(batch.generic_back.is_none());
    }
}
