//! Per-slot render report.
//!
//! Every slot the controller assigns gets exactly one entry, so the report
//! doubles as an audit of the whole layout: which card went where, on which
//! sheet and side, and whether the art made it onto the page. Serialized to
//! JSON next to the PDF when the caller asks for it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::render::card::SlotOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Front,
    Back,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Front => write!(f, "front"),
            Side::Back => write!(f, "back"),
        }
    }
}

/// One slot on one side of one sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotEntry {
    /// 1-based sheet number; front and back of the same sheet share it.
    pub sheet: usize,
    pub side: Side,
    /// Grid slot the entry refers to (after mirroring, for backs).
    pub slot: usize,
    /// Index of the card in the input batch.
    pub card: usize,
    pub outcome: SlotOutcome,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderReport {
    pub entries: Vec<SlotEntry>,
}

/// Aggregate counts over a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub sheets: usize,
    pub placed: usize,
    pub placeholders: usize,
    pub blanks: usize,
}

impl RenderReport {
    pub fn push(&mut self, entry: SlotEntry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, entries: Vec<SlotEntry>) {
        self.entries.extend(entries);
    }

    pub fn summary(&self) -> Summary {
        let count = |o: SlotOutcome| self.entries.iter().filter(|e| e.outcome == o).count();
        Summary {
            sheets: self.entries.iter().map(|e| e.sheet).max().unwrap_or(0),
            placed: count(SlotOutcome::Placed),
            placeholders: count(SlotOutcome::Placeholder),
            blanks: count(SlotOutcome::Blank),
        }
    }

    /// Entries for cards whose art failed to decode.
    pub fn placeholders(&self) -> impl Iterator<Item = &SlotEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome == SlotOutcome::Placeholder)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}
