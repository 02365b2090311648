//! Thin wrapper over the `lopdf` object model.

use std::collections::BTreeSet;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use crate::error::{Result, SmithError};

/// Clockwise rotations accepted by [`PdfDocument::rotate_pages`].
pub const VALID_ANGLES: [i64; 3] = [90, 180, 270];

// Guards against cyclic /Parent chains in malformed files.
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// A loaded PDF document.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    doc: Document,
}

impl PdfDocument {
    /// Load a PDF from disk.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SmithError::NotFound(format!(
                "file not found: {}",
                path.display()
            )));
        }
        let doc = Document::load(path)
            .map_err(|err| SmithError::Pdf(format!("load {}: {err}", path.display())))?;
        tracing::debug!(path = %path.display(), pages = doc.get_pages().len(), "loaded pdf");
        Ok(Self { doc })
    }

    pub const fn from_document(doc: Document) -> Self {
        Self { doc }
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Page object ids in page order.
    pub fn page_ids(&self) -> Vec<ObjectId> {
        self.doc.get_pages().into_values().collect()
    }

    /// Effective `/Rotate` of the page at 0-based `index`, following inheritance.
    pub fn rotation(&self, index: usize) -> Result<i64> {
        let page_id = self.page_id(index)?;
        Ok(self.rotation_of(page_id))
    }

    /// Effective `/MediaBox` of the page at 0-based `index`.
    pub fn media_box(&self, index: usize) -> Result<Vec<f32>> {
        let page_id = self.page_id(index)?;
        let Some(object) = inherited_attribute(&self.doc, page_id, b"MediaBox") else {
            return Err(SmithError::Pdf(format!("page {} has no MediaBox", index + 1)));
        };
        object
            .as_array()
            .and_then(|values| values.iter().map(Object::as_float).collect())
            .map_err(|err| SmithError::Pdf(format!("page {} MediaBox: {err}", index + 1)))
    }

    /// Rotate the pages at the given 0-based indices clockwise by `angle`.
    ///
    /// Returns the number of pages rotated.
    pub fn rotate_pages(&mut self, indices: &[usize], angle: i64) -> Result<usize> {
        if !VALID_ANGLES.contains(&angle) {
            return Err(SmithError::InvalidArgument(format!(
                "angle must be 90, 180, or 270. Got: {angle}"
            )));
        }

        let page_ids = self.page_ids();
        let mut rotated = 0;
        for &index in indices {
            let page_id = lookup(&page_ids, index)?;
            let current = self.rotation_of(page_id);
            let dict = self
                .doc
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
                .map_err(|err| SmithError::Pdf(format!("page {}: {err}", index + 1)))?;
            dict.set("Rotate", (current + angle).rem_euclid(360));
            rotated += 1;
        }
        Ok(rotated)
    }

    /// One single-page document per 0-based index, in the order given.
    ///
    /// Each output copies only the objects its page reaches, so the work
    /// grows with the selected pages rather than with the whole file.
    pub fn extract_pages(&self, indices: &[usize]) -> Result<Vec<(usize, Self)>> {
        let page_ids = self.page_ids();
        indices
            .iter()
            .map(|&index| Ok((index, self.extract_page_id(lookup(&page_ids, index)?)?)))
            .collect()
    }

    /// Drop unreachable objects and empty streams, then deflate every stream.
    pub fn compress(&mut self) {
        let pruned = self.doc.prune_objects();
        let emptied = self.doc.delete_zero_length_streams();
        self.doc.compress();
        tracing::debug!(
            pruned = pruned.len(),
            empty_streams = emptied.len(),
            "compressed pdf"
        );
    }

    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.doc
            .save(path)
            .map_err(|err| SmithError::Pdf(format!("save {}: {err}", path.display())))?;
        Ok(())
    }

    pub fn into_inner(self) -> Document {
        self.doc
    }

    fn page_id(&self, index: usize) -> Result<ObjectId> {
        lookup(&self.page_ids(), index)
    }

    fn rotation_of(&self, page_id: ObjectId) -> i64 {
        inherited_attribute(&self.doc, page_id, b"Rotate")
            .and_then(|object| object.as_i64().ok())
            .unwrap_or(0)
    }

    fn extract_page_id(&self, page_id: ObjectId) -> Result<Self> {
        let mut page = flattened_page(&self.doc, page_id)?;
        page.remove(b"Parent");

        let mut doc = Document::with_version(self.doc.version.clone());
        let mut visited = BTreeSet::from([page_id]);
        let mut pending = Vec::new();
        push_references(&Object::Dictionary(page.clone()), &mut pending);
        while let Some(id) = pending.pop() {
            if !visited.insert(id) {
                continue;
            }
            let Ok(object) = self.doc.get_object(id) else {
                continue;
            };
            if is_page_tree_node(object) {
                continue;
            }
            push_references(object, &mut pending);
            doc.objects.insert(id, object.clone());
        }

        doc.max_id = self.doc.max_id;
        let pages_id = doc.new_object_id();
        page.set("Parent", pages_id);
        doc.objects.insert(page_id, Object::Dictionary(page));
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1_i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.renumber_objects();
        Ok(Self::from_document(doc))
    }
}

fn lookup(page_ids: &[ObjectId], index: usize) -> Result<ObjectId> {
    page_ids.get(index).copied().ok_or_else(|| {
        SmithError::InvalidArgument(format!(
            "page {} is out of range (document has {} page(s))",
            index + 1,
            page_ids.len()
        ))
    })
}

/// Attributes a page may inherit from its ancestors in the page tree.
pub(crate) const INHERITABLE_ATTRIBUTES: [&[u8]; 4] =
    [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Look `key` up on the page, then on each `/Parent` in turn.
pub(crate) fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current = page_id;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let dict = doc.get_dictionary(current).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}

/// A copy of the page dictionary with every inherited attribute written
/// onto the page itself.
pub(crate) fn flattened_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = doc
        .get_dictionary(page_id)
        .map_err(|err| SmithError::Pdf(format!("read page {page_id:?}: {err}")))?
        .clone();
    for key in INHERITABLE_ATTRIBUTES {
        if page.has(key) {
            continue;
        }
        if let Some(value) = inherited_attribute(doc, page_id, key) {
            page.set(key.to_vec(), value.clone());
        }
    }
    Ok(page)
}

fn is_page_tree_node(object: &Object) -> bool {
    object
        .as_dict()
        .and_then(|dict| dict.get(b"Type"))
        .and_then(Object::as_name)
        .is_ok_and(|name| matches!(name, b"Page" | b"Pages" | b"Catalog"))
}

fn push_references(object: &Object, pending: &mut Vec<ObjectId>) {
    match object {
        Object::Reference(id) => pending.push(*id),
        Object::Array(items) => {
            for item in items {
                push_references(item, pending);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter() {
                push_references(value, pending);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter() {
                push_references(value, pending);
            }
        }
        _ => {}
    }
}
