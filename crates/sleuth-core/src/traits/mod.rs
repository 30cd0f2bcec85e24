mod embedding;
mod oracle;

pub use embedding::IEmbeddingProvider;
pub use oracle::IReasoningOracle;
