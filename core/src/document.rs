/// A piece of text stored in, and retrieved from, the vector store.
///
/// The `content` is always the exact text that was embedded to produce the
/// vector stored under `id`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Document {
    id: String,
    content: String,
}

impl Document {
    /// Creates a document with a freshly generated UUID v4 as its id.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
        }
    }

    pub fn new_with_id(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assigns_distinct_ids() {
        let a = Document::new("hello world");
        let b = Document::new("hello world");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.content(), b.content());
    }

    #[test]
    fn new_with_id_keeps_caller_id() {
        let doc = Document::new_with_id("doc-1", "Go was created at Google in 2009.");
        assert_eq!(doc.id(), "doc-1");
        assert_eq!(doc.content(), "Go was created at Google in 2009.");
    }
}
