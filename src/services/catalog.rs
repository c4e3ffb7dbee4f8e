use std::collections::HashMap;

use crate::{
    db::DocumentStore,
    models::CatalogEntry,
    services::tfidf::{self, SparseVector, TfidfVectorizer},
};

/// Reserved document id never loaded as a catalog entry.
const METADATA_DOC_ID: &str = "metadata";

/// One immutable catalog generation: the entry table, the vectorizer fitted
/// over it and the feature matrix, built together and published together.
///
/// Invariant: `matrix[i]` is the feature row of `entries[i]` for every `i`,
/// and the slug index points into the same table. A snapshot is never
/// mutated after construction; reloads build a new one and swap the handle.
pub struct CatalogSnapshot {
    entries: Vec<CatalogEntry>,
    slug_index: HashMap<String, usize>,
    vectorizer: TfidfVectorizer,
    matrix: Vec<SparseVector>,
}

impl CatalogSnapshot {
    fn build(entries: Vec<CatalogEntry>, min_df: usize) -> Self {
        let mut slug_index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            // First occurrence wins for duplicate slugs.
            slug_index.entry(entry.slug.clone()).or_insert(i);
        }

        let features: Vec<&str> = entries.iter().map(|e| e.combined_features.as_str()).collect();
        let vectorizer = TfidfVectorizer::fit(&features, min_df);
        let matrix: Vec<SparseVector> = features.iter().map(|f| vectorizer.transform(f)).collect();

        Self {
            entries,
            slug_index,
            vectorizer,
            matrix,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_by_slug(&self, slug: &str) -> Option<&CatalogEntry> {
        self.slug_index.get(slug).map(|&i| &self.entries[i])
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vectorizer.vocabulary_len()
    }

    /// Project arbitrary text into this snapshot's vector space.
    pub fn query_vector(&self, text: &str) -> SparseVector {
        self.vectorizer.transform(text)
    }

    /// Cosine similarity of a query against every entry, in table order.
    pub fn similarities(&self, query: &SparseVector) -> Vec<f32> {
        self.matrix.iter().map(|row| tfidf::cosine(query, row)).collect()
    }
}

/// Load the full catalog collection and fit the model over it.
///
/// Returns `None` for every degenerate outcome: the store is unreachable,
/// the collection is empty, or no document survives parsing. Partial state
/// is never returned.
pub async fn load_catalog(
    store: &dyn DocumentStore,
    collection: &str,
    min_df: usize,
) -> Option<CatalogSnapshot> {
    let documents = match store.fetch_catalog(collection).await {
        Ok(documents) => documents,
        Err(e) => {
            tracing::warn!(collection = %collection, error = %e, "Catalog load failed, keeping empty state");
            return None;
        }
    };

    let mut entries = Vec::with_capacity(documents.len());
    for doc in documents {
        if doc.id == METADATA_DOC_ID {
            continue;
        }
        match serde_json::from_value::<CatalogEntry>(doc.data) {
            Ok(entry) if entry.combined_features.trim().is_empty() => {
                tracing::warn!(slug = %entry.slug, "Catalog entry has empty combined_features, skipping");
            }
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!(doc_id = %doc.id, error = %e, "Unparseable catalog document, skipping");
            }
        }
    }

    if entries.is_empty() {
        tracing::warn!(collection = %collection, "Catalog collection yielded no usable entries");
        return None;
    }

    let snapshot = CatalogSnapshot::build(entries, min_df);
    tracing::info!(
        collection = %collection,
        entries = snapshot.len(),
        vocabulary = snapshot.vocabulary_len(),
        "Catalog snapshot built"
    );

    Some(snapshot)
}
