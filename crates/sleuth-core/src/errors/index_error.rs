/// Similarity index errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndexError {
    #[error("dimension mismatch for {id}: expected {expected}, got {actual}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("{ids} ids supplied for {vectors} vectors")]
    LengthMismatch { ids: usize, vectors: usize },

    #[error("duplicate id in index: {id}")]
    DuplicateId { id: String },

    #[error("non-finite value in embedding for {id}")]
    NonFiniteEmbedding { id: String },
}
