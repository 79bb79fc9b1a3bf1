//! End-to-end builds over synthetic card batches.

use image::{Rgb, RgbImage};
use lopdf::Document;
use proxysheet::build_document;
use proxysheet::profile::{PaperSize, Profile};
use proxysheet::render::card::SlotOutcome;
use proxysheet::report::Side;
use proxysheet::types::{CardBatch, Quality, RenderOptions};

/// Encode a small solid-color JPEG card.
fn test_card(color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(63, 88, Rgb(color));
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 80)
        .encode_image(&img)
        .unwrap();
    buf
}

fn fast_options() -> RenderOptions {
    RenderOptions {
        bleed: 10,
        quality: Quality::new(40),
    }
}

#[test]
fn seventeen_cards_produce_six_pages() {
    let fronts: Vec<Vec<u8>> = (0..17).map(|i| test_card([i as u8 * 10, 60, 60])).collect();
    let batch = CardBatch::fronts_only(fronts);

    let built = build_document(&batch, PaperSize::Letter, &fast_options()).unwrap();
    let doc = Document::load_mem(&built.pdf).unwrap();
    // ceil(17 / 8) = 3 sheets, front + back each.
    assert_eq!(doc.get_pages().len(), 6);

    let summary = built.report.summary();
    assert_eq!(summary.sheets, 3);
    assert_eq!(summary.placed, 17);
    assert_eq!(summary.blanks, 17);

    // The last sheet holds exactly one card, in slot 0.
    let last_front: Vec<_> = built
        .report
        .entries
        .iter()
        .filter(|e| e.sheet == 3 && e.side == Side::Front)
        .collect();
    assert_eq!(last_front.len(), 1);
    assert_eq!(last_front[0].slot, 0);
    assert_eq!(last_front[0].card, 16);
}

#[test]
fn pages_alternate_front_and_back_in_sheet_order() {
    let batch = CardBatch::fronts_only((0..9).map(|_| test_card([120, 60, 60])).collect());
    let built = build_document(&batch, PaperSize::Letter, &fast_options()).unwrap();

    // Entries arrive grouped per page in emission order; the sheet/side
    // sequence over the groups must alternate.
    let mut seen = Vec::new();
    for e in &built.report.entries {
        if seen.last() != Some(&(e.sheet, e.side)) {
            seen.push((e.sheet, e.side));
        }
    }
    assert_eq!(
        seen,
        vec![
            (1, Side::Front),
            (1, Side::Back),
            (2, Side::Front),
            (2, Side::Back),
        ]
    );
}

#[test]
fn back_slots_are_column_mirrored() {
    let mut batch = CardBatch::fronts_only((0..8).map(|_| test_card([90, 90, 30])).collect());
    batch.generic_back = Some(test_card([20, 20, 80]));

    let built = build_document(&batch, PaperSize::Letter, &fast_options()).unwrap();
    let backs: Vec<_> = built
        .report
        .entries
        .iter()
        .filter(|e| e.side == Side::Back)
        .collect();
    assert_eq!(backs.len(), 8);
    for entry in backs {
        let (row, col) = (entry.card / 4, entry.card % 4);
        assert_eq!(entry.slot, row * 4 + (3 - col));
        assert_eq!(entry.outcome, SlotOutcome::Placed);
    }
}

#[test]
fn corrupt_front_becomes_placeholder_not_an_error() {
    let batch = CardBatch::fronts_only(vec![
        test_card([60, 120, 60]),
        b"definitely not an image".to_vec(),
    ]);
    let built = build_document(&batch, PaperSize::Letter, &fast_options()).unwrap();

    let summary = built.report.summary();
    assert_eq!(summary.placed, 1);
    assert_eq!(summary.placeholders, 1);
    // The document still parses and carries both pages.
    let doc = Document::load_mem(&built.pdf).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}

#[test]
fn per_card_back_wins_over_generic_back() {
    let mut batch = CardBatch::fronts_only(vec![
        test_card([120, 60, 60]),
        test_card([60, 60, 120]),
    ]);
    batch.backs[0] = Some(test_card([10, 10, 10]));
    // No generic back: card 1's back slot stays blank.
    let built = build_document(&batch, PaperSize::Letter, &fast_options()).unwrap();

    let backs: Vec<_> = built
        .report
        .entries
        .iter()
        .filter(|e| e.side == Side::Back)
        .collect();
    assert_eq!(backs[0].outcome, SlotOutcome::Placed);
    assert_eq!(backs[1].outcome, SlotOutcome::Blank);
}

#[test]
fn a4_document_gets_a4_media_box() {
    let batch = CardBatch::fronts_only(vec![test_card([60, 60, 60])]);
    let built = build_document(&batch, PaperSize::A4, &fast_options()).unwrap();

    let profile = Profile::new(PaperSize::A4).unwrap();
    let (w_pt, h_pt) = profile.page_size_pt();

    let doc = Document::load_mem(&built.pdf).unwrap();
    let pages = doc.get_pages();
    let (_, &page_id) = pages.iter().next().unwrap();
    let page_dict = doc.get_object(page_id).unwrap().as_dict().unwrap();
    let parent = page_dict.get(b"Parent").unwrap().as_reference().unwrap();
    let media_box = doc
        .get_object(parent)
        .unwrap()
        .as_dict()
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap();
    assert!((f64::from(media_box[2].as_float().unwrap()) - w_pt).abs() < 0.01);
    assert!((f64::from(media_box[3].as_float().unwrap()) - h_pt).abs() < 0.01);
}

#[test]
fn report_serializes_for_the_companion_file() {
    let batch = CardBatch::fronts_only(vec![test_card([120, 120, 60])]);
    let built = build_document(&batch, PaperSize::Letter, &fast_options()).unwrap();

    let json = built.report.to_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["side"], "front");
    assert_eq!(parsed[0]["outcome"], "placed");
}
