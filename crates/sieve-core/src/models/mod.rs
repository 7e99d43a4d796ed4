mod degradation_event;
mod fused_result;
mod hit;
mod lexical_status;
mod namespace;
mod search_outcome;
mod vector_match;

pub use degradation_event::DegradationEvent;
pub use fused_result::FusedResult;
pub use hit::{Hit, LexicalHit, Metadata, Source, VectorHit};
pub use lexical_status::LexicalStatus;
pub use namespace::{NamespaceTable, TagEntry};
pub use search_outcome::{PartitionFailure, SearchOutcome};
pub use vector_match::{IndexStats, VectorMatch};
