//! # sieve-lexical
//!
//! Sparse keyword retrieval over a sample of the vector corpus.
//!
//! ## Architecture
//!
//! ```text
//! LexicalHandle (Building → Ready | Disabled)
//! ├── persist: bm25_index.json + bm25_documents.json (blake3-linked)
//! ├── builder: supervisor + worker thread, deadline, cancel flag
//! │   ├── sampler: neutral query per partition, text from metadata
//! │   └── tokenizer (rayon) + stopwords
//! └── LexicalIndex
//!     └── Bm25Index (bm25 crate embedder + scorer)
//! ```

pub mod bm25;
pub mod builder;
pub mod handle;
pub mod index;
pub mod persist;
pub mod sampler;
pub mod stopwords;
pub mod tokenizer;

pub use bm25::{Bm25Index, Bm25Params};
pub use handle::LexicalHandle;
pub use index::{IndexedDocument, LexicalIndex};
pub use stopwords::StopwordSet;
pub use tokenizer::Tokenizer;
