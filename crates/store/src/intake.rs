use crate::context::{contextualize_evaluation, contextualize_profile};
use crate::error::Result;
use crate::file::{FileId, FileMeta, Payload, SourceFile};
use crate::registry::DataStore;
use crate::selection::Selection;
use hdf_report::{recognize, Document};
use std::path::Path;
use std::sync::Arc;

/// Options for loading one document from raw text. The persistence
/// fields are opaque pass-through metadata.
#[derive(Debug, Clone, Default)]
pub struct TextLoadOptions {
    /// The filename to denote this document with
    pub filename: String,

    /// The raw text to parse
    pub text: String,

    pub database_id: Option<u64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub tags: Vec<String>,
}

impl TextLoadOptions {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Parse raw text, build the contextualized tree, register it, and mark
/// the new file selected.
///
/// Fails without registering anything when the text matches neither
/// recognized document shape. Loading the same filename twice produces
/// two independent files with distinct ids; nothing deduplicates here.
pub fn load_text(
    store: &mut DataStore,
    selection: &mut Selection,
    options: TextLoadOptions,
) -> Result<FileId> {
    // Recognize before minting an id, so a parse failure leaves no trace
    let document = recognize(&options.text)?;

    let id = store.fresh_id();
    let meta = FileMeta {
        filename: options.filename,
        database_id: options.database_id,
        created_at: options.created_at,
        updated_at: options.updated_at,
        tags: options.tags,
    };

    match document {
        Document::Evaluation(report) => {
            let evaluation = contextualize_evaluation(id, report);
            store.insert(SourceFile {
                id,
                meta,
                payload: Payload::Evaluation(Arc::new(evaluation)),
            });
            selection.select_evaluations(&[id]);
        }
        Document::Profile(report) => {
            let profile = contextualize_profile(id, report);
            store.insert(SourceFile {
                id,
                meta,
                payload: Payload::Profile(Arc::new(profile)),
            });
            selection.select_profiles(&[id]);
        }
    }

    Ok(id)
}

/// Read a document from disk and load it. Reading the text is the only
/// suspend point; everything after is synchronous.
pub async fn load_file(
    store: &mut DataStore,
    selection: &mut Selection,
    path: impl AsRef<Path>,
) -> Result<FileId> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;
    let filename = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    load_text(store, selection, TextLoadOptions::new(filename, text))
}
