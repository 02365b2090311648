//! Concatenate several PDF documents into one.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use crate::error::{Result, SmithError};

use super::document::{PdfDocument, flattened_page};

fn type_name(object: &Object) -> &[u8] {
    object
        .as_dict()
        .and_then(|dict| dict.get(b"Type"))
        .and_then(Object::as_name)
        .unwrap_or(b"")
}

/// Merge `documents` in order.
///
/// Inherited page attributes are written onto each page before the input
/// page trees are discarded, and the pages are hung under one fresh root
/// `/Pages` node. The first catalog is kept; outlines are dropped.
pub fn merge_documents(documents: Vec<PdfDocument>) -> Result<PdfDocument> {
    if documents.is_empty() {
        return Err(SmithError::InvalidArgument(
            "at least one document is required to merge".to_string(),
        ));
    }

    let mut max_id = 1;
    let mut pages: Vec<(ObjectId, Dictionary)> = Vec::new();
    let mut catalog: Option<(ObjectId, Dictionary)> = None;
    let mut merged = Document::with_version("1.5");

    for document in documents {
        let mut doc = document.into_inner();
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        for page_id in doc.get_pages().into_values() {
            pages.push((page_id, flattened_page(&doc, page_id)?));
        }

        for (object_id, object) in doc.objects {
            let kind = type_name(&object).to_vec();
            match kind.as_slice() {
                b"Catalog" => {
                    if catalog.is_none() {
                        if let Ok(dict) = object.as_dict() {
                            catalog = Some((object_id, dict.clone()));
                        }
                    }
                }
                b"Pages" | b"Page" | b"Outlines" | b"Outline" => {}
                _ => {
                    merged.objects.insert(object_id, object);
                }
            }
        }
    }

    let (catalog_id, mut catalog) =
        catalog.ok_or_else(|| SmithError::Pdf("no catalog found in inputs".to_string()))?;
    let count = i64::try_from(pages.len())
        .map_err(|_| SmithError::Pdf("too many pages to merge".to_string()))?;

    merged.max_id = max_id;
    let pages_id = merged.new_object_id();
    let mut kids = Vec::with_capacity(pages.len());
    for (page_id, mut page) in pages {
        page.set("Parent", pages_id);
        merged.objects.insert(page_id, Object::Dictionary(page));
        kids.push(Object::Reference(page_id));
    }
    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    catalog.set("Pages", pages_id);
    catalog.remove(b"Outlines");
    merged.objects.insert(catalog_id, Object::Dictionary(catalog));
    merged.trailer.set("Root", catalog_id);
    merged.renumber_objects();

    Ok(PdfDocument::from_document(merged))
}
