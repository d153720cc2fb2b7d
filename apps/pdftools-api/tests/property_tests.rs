//! Property-based tests for the PDF tools API
//!
//! Covers identifier sanitization, extension derivation, and page-range
//! extraction using proptest.

use lopdf::{Dictionary, Document, Object, Stream};
use pdftools_api::store::{file_extension, sanitize_file_id};
use proptest::prelude::*;
use std::path::{Component, Path, PathBuf};

/// Artifact identifiers as the API itself generates them.
fn generated_file_id() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("merged"), Just("split"), Just("images")],
        "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
    )
        .prop_map(|(kind, uuid)| format!("{}_{}.pdf", kind, uuid))
}

/// Hostile identifiers with separators and parent components mixed in.
fn hostile_file_id() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9./]{1,40}",
        "(\\.\\./){1,5}[a-z]{1,10}",
        "/[a-z]{1,10}/[a-z]{1,10}",
        Just("..".to_string()),
        Just("../..".to_string()),
        Just("".to_string()),
    ]
}

/// Build a minimal PDF with `num_pages` pages.
fn sample_pdf(num_pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();
    for i in 0..num_pages {
        let content = format!("BT (Page-{}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
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
    doc.save_to(&mut buffer).unwrap();
    buffer
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ============================================================
    // Identifier sanitization
    // ============================================================

    #[test]
    fn generated_identifiers_survive_sanitization(id in generated_file_id()) {
        prop_assert_eq!(sanitize_file_id(&id), Some(id));
    }

    #[test]
    fn generated_identifiers_match_the_artifact_pattern(id in generated_file_id()) {
        let pattern = regex::Regex::new(
            r"^(merged|split|images)_[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\.pdf$"
        ).unwrap();
        prop_assert!(pattern.is_match(&id));
    }

    #[test]
    fn hostile_identifiers_dont_match_the_artifact_pattern(id in hostile_file_id()) {
        let pattern = regex::Regex::new(
            r"^(merged|split|images)_[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\.pdf$"
        ).unwrap();
        prop_assert!(!pattern.is_match(&id));
    }

    #[test]
    fn sanitized_identifiers_have_no_directory_components(id in hostile_file_id()) {
        if let Some(safe) = sanitize_file_id(&id) {
            prop_assert!(!safe.contains('/'));
            prop_assert!(safe != "..");
            prop_assert!(!safe.is_empty());
        }
    }

    #[test]
    fn sanitized_identifiers_never_escape_the_root(id in hostile_file_id()) {
        let root = PathBuf::from("/srv/pdftools/tmp");
        if let Some(safe) = sanitize_file_id(&id) {
            let joined = root.join(&safe);
            // Exactly one extra, normal component under the root.
            prop_assert_eq!(joined.parent(), Some(root.as_path()));
            let last = joined.components().last().unwrap();
            prop_assert!(matches!(last, Component::Normal(_)));
        }
    }

    #[test]
    fn sanitization_is_idempotent(id in hostile_file_id()) {
        if let Some(once) = sanitize_file_id(&id) {
            prop_assert_eq!(sanitize_file_id(&once), Some(once));
        }
    }

    // ============================================================
    // Extension derivation
    // ============================================================

    #[test]
    fn extension_is_always_lowercase(name in "[A-Za-z0-9_]{1,20}\\.[A-Za-z]{1,6}") {
        let ext = file_extension(&name).unwrap();
        prop_assert!(ext.chars().all(|c| c.is_ascii_lowercase()));
        prop_assert!(name.to_ascii_lowercase().ends_with(&ext));
    }

    #[test]
    fn extension_comes_from_the_last_dot(
        stem in "[a-z]{1,10}",
        middle in "[a-z]{1,5}",
        ext in "[a-z]{1,5}"
    ) {
        let name = format!("{}.{}.{}", stem, middle, ext);
        prop_assert_eq!(file_extension(&name), Some(ext));
    }

    #[test]
    fn names_without_a_dot_have_no_extension(name in "[a-z0-9_-]{1,30}") {
        prop_assert_eq!(file_extension(&name), None);
    }

    #[test]
    fn stored_name_shape_is_uuid_dot_ext(ext in "[a-z]{1,6}") {
        // The store names uploads "{uuid}.{ext}"; derived extension of that
        // name must round-trip.
        let stored = format!("123e4567-e89b-12d3-a456-426614174000.{}", ext);
        prop_assert_eq!(file_extension(&stored), Some(ext));
        prop_assert!(Path::new(&stored).file_name().is_some());
    }

    // ============================================================
    // Page-range extraction
    // ============================================================

    #[test]
    fn accepted_ranges_extract_exactly_their_pages(
        total in 1u32..8,
        seed in 1u32..8,
        len in 0u32..8
    ) {
        let start = (seed - 1) % total + 1;
        let end = (start + len).min(total);

        let pdf = sample_pdf(total);
        let out = pdftools_core::extract_range(&pdf, start, end).unwrap();
        let doc = Document::load_mem(&out).unwrap();
        prop_assert_eq!(doc.get_pages().len() as u32, end - start + 1);
    }

    #[test]
    fn ranges_past_the_end_are_rejected_naming_the_total(
        total in 1u32..8,
        over in 1u32..5
    ) {
        let pdf = sample_pdf(total);
        let err = pdftools_core::extract_range(&pdf, 1, total + over).unwrap_err();
        let expected = format!("{} pages", total);
        prop_assert!(err.to_string().contains(&expected));
    }

    #[test]
    fn inverted_ranges_are_rejected_naming_the_total(
        total in 2u32..8,
        seed in 2u32..8
    ) {
        // start in 2..=total, end one below it
        let start = (seed - 2) % (total - 1) + 2;

        let pdf = sample_pdf(total);
        let err = pdftools_core::extract_range(&pdf, start, start - 1).unwrap_err();
        let expected = format!("{} pages", total);
        prop_assert!(err.to_string().contains(&expected));
    }
}

// ============================================================
// Unit tests (non-property)
// ============================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_supported_image_extensions() {
        use pdftools_api::handlers::SUPPORTED_IMAGE_EXTENSIONS;
        for ext in ["png", "jpg", "jpeg", "webp", "bmp"] {
            assert!(SUPPORTED_IMAGE_EXTENSIONS.contains(&ext));
        }
        assert!(!SUPPORTED_IMAGE_EXTENSIONS.contains(&"gif"));
        assert!(!SUPPORTED_IMAGE_EXTENSIONS.contains(&"pdf"));
    }

    #[test]
    fn test_max_upload_size_constant() {
        assert_eq!(pdftools_api::MAX_UPLOAD_BYTES, 100 * 1024 * 1024);
    }

    #[test]
    fn test_traversal_examples() {
        assert_eq!(sanitize_file_id("../secret"), Some("secret".to_string()));
        assert_eq!(sanitize_file_id("..%2Fsecret"), Some("..%2Fsecret".to_string()));
        assert_eq!(sanitize_file_id(".."), None);
    }
}
