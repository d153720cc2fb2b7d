//! Image-to-PDF assembly.
//!
//! Each input image becomes one page whose media box matches the image's
//! pixel dimensions (one pixel = one point). Pixels are normalized to 8-bit
//! RGB and embedded as a FlateDecode `DeviceRGB` image XObject, so the
//! output is independent of the source format's color mode.

use crate::error::PdfToolsError;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{Dictionary, Document, Object, Stream};
use std::io::Write;

/// Assemble decoded images into a single multi-page PDF, in input order.
pub fn images_to_pdf(images: &[Vec<u8>]) -> Result<Vec<u8>, PdfToolsError> {
    if images.is_empty() {
        return Err(PdfToolsError::Operation("no images supplied".into()));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::with_capacity(images.len());
    for (i, bytes) in images.iter().enumerate() {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| PdfToolsError::ImageDecode(format!("image {}: {}", i + 1, e)))?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(rgb.as_raw())
            .map_err(|e| PdfToolsError::Operation(format!("failed to compress image: {}", e)))?;
        let pixels = encoder
            .finish()
            .map_err(|e| PdfToolsError::Operation(format!("failed to compress image: {}", e)))?;

        page_ids.push(add_image_page(&mut doc, pages_id, width, height, pixels));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(page_ids.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PdfToolsError::Operation(format!("failed to save PDF: {}", e)))?;
    Ok(buffer)
}

/// Add one page drawing `pixels` (zlib-compressed raw RGB) at full size.
fn add_image_page(
    doc: &mut Document,
    pages_id: lopdf::ObjectId,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
) -> lopdf::ObjectId {
    let xobject = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(width as i64)),
        ("Height", Object::Integer(height as i64)),
        ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", Object::Name(b"FlateDecode".to_vec())),
    ]);
    let image_id = doc.add_object(Stream::new(xobject, pixels));

    // Scale the unit-square image to cover the page exactly.
    let content = format!("q\n{} 0 0 {} 0 0 cm\n/Im0 Do\nQ", width, height);
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut xobjects = Dictionary::new();
    xobjects.set("Im0", Object::Reference(image_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let page = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width as i64),
                Object::Integer(height as i64),
            ]),
        ),
        ("Resources", Object::Dictionary(resources)),
        ("Contents", Object::Reference(content_id)),
    ]);
    doc.add_object(page)
}
