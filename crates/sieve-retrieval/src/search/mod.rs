//! Per-source candidate retrieval feeding fusion.

pub mod lexical_search;
pub mod vector_search;

pub use lexical_search::search_lexical;
pub use vector_search::{merge_hits, FanOutMode, FanOutResult, PartitionFanOut};
