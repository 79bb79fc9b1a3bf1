//! PDF packing: page rasters into a single print-ready document.
//!
//! Each page raster is JPEG-encoded exactly once and embedded as an image
//! XObject with a `DCTDecode` filter, so the bytes in the file are the
//! encoder's output verbatim. The XObject is drawn to fill the page's
//! MediaBox edge to edge; the physical size comes straight from the profile
//! (`pt = px * 72 / ppi`), which is what makes "print at 100% scale" land
//! the cut grid where the cutter expects it.
//!
//! The footer label rides on top as base-14 Helvetica text. No font file is
//! embedded; every PDF reader ships the base-14 set.

use image::codecs::jpeg::JpegEncoder;
use lopdf::content::{Content, Operation};
use lopdf::xref::XrefType;
use lopdf::{Document, Object, Stream, dictionary};

use crate::compose::ComposedPage;
use crate::profile::Profile;
use crate::types::{BuildError, Quality};

const FOOTER_FONT_SIZE: f32 = 8.0;
/// Average Helvetica glyph advance as a fraction of the font size. Close
/// enough for centering a short footer line without shipping metrics tables.
const FOOTER_GLYPH_WIDTH: f32 = 0.5;
/// Footer gray, 160/255 to match the raster palette's muted label tone.
const FOOTER_GRAY: f32 = 0.63;

/// Pack composed pages, in order, into a PDF byte stream.
pub fn pack_document(
    pages: &[ComposedPage],
    profile: &Profile,
    quality: Quality,
) -> Result<Vec<u8>, BuildError> {
    if pages.is_empty() {
        return Err(BuildError::EmptyBatch);
    }

    let (page_w_pt, page_h_pt) = profile.page_size_pt();
    let (page_w_pt, page_h_pt) = (page_w_pt as f32, page_h_pt as f32);

    let mut doc = Document::with_version("1.4");
    doc.reference_table.cross_reference_type = XrefType::CrossReferenceTable;

    let id_pages = doc.new_object_id();

    let id_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut kids = vec![];

    for (index, page) in pages.iter().enumerate() {
        let jpeg = encode_page(page, quality, index)?;

        let image_dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => page.raster.width() as i64,
            "Height" => page.raster.height() as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        };
        let id_image = doc.add_object(Stream::new(image_dict, jpeg).with_compression(false));

        let content = Content {
            operations: page_operations(&page.label, page_w_pt, page_h_pt, profile),
        };
        let id_content = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let id_resources = doc.add_object(dictionary! {
            "XObject" => dictionary! {
                "Im0" => id_image,
            },
            "Font" => dictionary! {
                "F1" => id_font,
            },
        });

        let id_page = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => id_pages,
            "Contents" => id_content,
            "Resources" => id_resources,
        });
        kids.push(id_page.into());
    }

    let page_count = kids.len() as i32;
    doc.set_object(
        id_pages,
        dictionary! {
            "Type" => "Pages",
            "Count" => page_count,
            "Kids" => kids,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                page_w_pt.into(),
                page_h_pt.into(),
            ],
        },
    );

    let id_catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => id_pages,
    });
    doc.trailer.set("Root", id_catalog);

    let id_info = doc.add_object(dictionary! {
        "Title" => Object::string_literal("proxysheet print-and-cut sheets"),
        "Producer" => Object::string_literal(concat!("proxysheet ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Info", id_info);
    doc.compress();

    let mut buffer = Vec::new();
    // save_to surfaces a bare io::Error; fold it into the lopdf error space.
    doc.save_to(&mut buffer).map_err(lopdf::Error::from)?;
    Ok(buffer)
}

/// Content stream for one page: the full-bleed page image, then the footer.
fn page_operations(
    label: &str,
    page_w_pt: f32,
    page_h_pt: f32,
    profile: &Profile,
) -> Vec<Operation> {
    // Image XObjects live in a unit square; scale to the full page.
    let mut ops = vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                page_w_pt.into(),
                0.into(),
                0.into(),
                page_h_pt.into(),
                0.into(),
                0.into(),
            ],
        ),
        Operation::new("Do", vec!["Im0".into()]),
        Operation::new("Q", vec![]),
    ];

    // Footer: centered in the bottom margin, below the card grid.
    let text_w = label.len() as f32 * FOOTER_FONT_SIZE * FOOTER_GLYPH_WIDTH;
    let x = (page_w_pt - text_w) / 2.0;
    let y = profile.reg_inset as f32 / 2.0 * 72.0 / profile.ppi as f32;
    ops.extend([
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), FOOTER_FONT_SIZE.into()]),
        Operation::new("g", vec![FOOTER_GRAY.into()]),
        Operation::new(
            "Tm",
            vec![1.into(), 0.into(), 0.into(), 1.into(), x.into(), y.into()],
        ),
        Operation::new("Tj", vec![Object::string_literal(label)]),
        Operation::new("ET", vec![]),
    ]);
    ops
}

fn encode_page(page: &ComposedPage, quality: Quality, index: usize) -> Result<Vec<u8>, BuildError> {
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality.value())
        .encode_image(&page.raster)
        .map_err(|source| BuildError::PageEncode {
            page: index + 1,
            source,
        })?;
    Ok(jpeg)
}
