use tracing::{debug, warn};

use crate::document::Document;
use crate::vector_store::{VectorStore, VectorStoreError};

/// Looks up the `top_k` documents closest to `query_vector`, most similar
/// first.
///
/// Matches whose metadata carries no string `content` are logged and left
/// out; the remaining matches keep the store's ranking. No matches at all is
/// an empty result, not an error.
pub async fn retrieve(
    store: &dyn VectorStore,
    query_vector: &[f32],
    top_k: usize,
) -> Result<Vec<Document>, VectorStoreError> {
    let matches = store.query(query_vector, top_k, true).await?;
    debug!(top_k, matches = matches.len(), "Vector store answered");

    let documents = matches
        .iter()
        .filter_map(|m| match m.content() {
            Ok(content) => Some(Document::new_with_id(m.id.clone(), content)),
            Err(e) => {
                warn!(id = %m.id, error = %e, "Skipping match with malformed metadata");
                None
            }
        })
        .collect();
    Ok(documents)
}
