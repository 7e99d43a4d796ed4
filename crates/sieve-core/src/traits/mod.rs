mod embedding;
mod vector_index;

pub use embedding::IEmbeddingProvider;
pub use vector_index::IVectorIndex;
