/// Graph construction and mutation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    #[error("edge {source_id} -> {target_id} references missing node {missing}")]
    DanglingEdge {
        source_id: String,
        target_id: String,
        missing: String,
    },

    #[error("row {row} is missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },

    #[error("node {id} has an empty embedding")]
    EmptyEmbedding { id: String },

    #[error("unknown node: {id}")]
    UnknownNode { id: String },
}

impl GraphError {
    /// Whether this error is fatal to graph construction.
    pub fn is_build_error(&self) -> bool {
        !matches!(self, GraphError::UnknownNode { .. })
    }
}
