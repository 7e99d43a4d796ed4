//! # sieve-vector
//!
//! [`HttpVectorIndex`] implements `IVectorIndex` against a Pinecone-style REST
//! API: `POST /query` per namespace and `POST /describe_index_stats`.

pub mod client;
pub mod protocol;

pub use client::HttpVectorIndex;
