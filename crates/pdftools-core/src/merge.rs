//! PDF merge.
//!
//! Concatenates the pages of several documents into one, in input order.

use crate::error::PdfToolsError;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;

/// Merge documents into one; all pages of document `i` precede those of `i + 1`.
///
/// The first document is used as the base. Every further document has its
/// object IDs shifted past the base's `max_id` so the object tables can be
/// unioned without conflicts, then its page references are appended and the
/// base's page tree is rebuilt around the combined page list.
pub fn merge_documents(documents: Vec<Vec<u8>>) -> Result<Vec<u8>, PdfToolsError> {
    if documents.is_empty() {
        return Err(PdfToolsError::Operation("no documents to merge".into()));
    }

    if documents.len() == 1 {
        // Nothing to combine.
        return Ok(documents.into_iter().next().unwrap());
    }

    let mut sources = Vec::with_capacity(documents.len());
    for (i, bytes) in documents.iter().enumerate() {
        let doc = Document::load_mem(bytes)
            .map_err(|e| PdfToolsError::Parse(format!("document {}: {}", i + 1, e)))?;
        sources.push(doc);
    }

    let mut base = sources.remove(0);
    let mut next_free_id = base.max_id;
    let mut page_refs = collect_page_refs(&base);

    for source in sources {
        let offset = next_free_id;
        let source_pages = collect_page_refs(&source);

        let mut shifted = BTreeMap::new();
        for (id, object) in source.objects.into_iter() {
            shifted.insert((id.0 + offset, id.1), shift_refs(object, offset));
        }
        base.objects.extend(shifted);

        for (num, gen) in source_pages {
            page_refs.push((num + offset, gen));
        }

        next_free_id = (source.max_id + offset).max(next_free_id);
    }

    rebuild_page_tree(&mut base, page_refs)?;
    base.max_id = next_free_id;
    base.compress();

    let mut buffer = Vec::new();
    base.save_to(&mut buffer)
        .map_err(|e| PdfToolsError::Operation(format!("failed to save merged PDF: {}", e)))?;
    Ok(buffer)
}

fn collect_page_refs(doc: &Document) -> Vec<ObjectId> {
    // get_pages is keyed by page number, so values come back in page order.
    doc.get_pages().values().copied().collect()
}

/// Shift every object reference inside `obj` by `offset`, recursively.
fn shift_refs(obj: Object, offset: u32) -> Object {
    match obj {
        Object::Reference(id) => Object::Reference((id.0 + offset, id.1)),
        Object::Array(items) => {
            Object::Array(items.into_iter().map(|o| shift_refs(o, offset)).collect())
        }
        Object::Dictionary(mut dict) => {
            for (_, value) in dict.iter_mut() {
                *value = shift_refs(value.clone(), offset);
            }
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            for (_, value) in stream.dict.iter_mut() {
                *value = shift_refs(value.clone(), offset);
            }
            Object::Stream(stream)
        }
        other => other,
    }
}

/// Point the document's root page node at `page_refs` and fix its count.
fn rebuild_page_tree(doc: &mut Document, page_refs: Vec<ObjectId>) -> Result<(), PdfToolsError> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| PdfToolsError::Operation("trailer has no Root reference".into()))?;

    let pages_id = doc
        .objects
        .get(&catalog_id)
        .ok_or_else(|| PdfToolsError::Operation("catalog object missing".into()))?
        .as_dict()
        .map_err(|_| PdfToolsError::Operation("catalog is not a dictionary".into()))?
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|_| PdfToolsError::Operation("catalog has no Pages reference".into()))?;

    match doc.objects.get_mut(&pages_id) {
        Some(Object::Dictionary(pages_dict)) => {
            let kids: Vec<Object> = page_refs.iter().map(|&id| Object::Reference(id)).collect();
            pages_dict.set("Count", Object::Integer(kids.len() as i64));
            pages_dict.set("Kids", Object::Array(kids));
            Ok(())
        }
        _ => Err(PdfToolsError::Operation(
            "page tree root is not a dictionary".into(),
        )),
    }
}
