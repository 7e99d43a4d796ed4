//! Corpus sampling through the vector service.
//!
//! The vector service is the only document store the engine can reach, so
//! the lexical corpus is whatever a neutral query vector pulls back from
//! each partition.

use serde_json::Value;
use sieve_core::constants::TEXT_METADATA_KEYS;
use sieve_core::errors::SieveResult;
use sieve_core::models::Metadata;
use sieve_core::traits::IVectorIndex;

/// A document pulled from one partition, text already trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledDocument {
    pub id: String,
    pub partition: String,
    pub text: String,
}

/// Constant vector used to sample a partition without query bias.
pub fn sample_vector(dimension: usize, value: f32) -> Vec<f32> {
    vec![value; dimension]
}

/// First non-empty string among the known text keys.
pub fn extract_text(metadata: &Metadata) -> Option<&str> {
    TEXT_METADATA_KEYS.iter().find_map(|key| match metadata.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    })
}

/// Sample up to `sample_size` documents from `partition`, keeping those whose
/// trimmed text is longer than `min_text_chars`.
pub fn sample_partition(
    index: &dyn IVectorIndex,
    partition: &str,
    query_vector: &[f32],
    sample_size: usize,
    min_text_chars: usize,
) -> SieveResult<Vec<SampledDocument>> {
    let matches = index.query(query_vector, sample_size, partition, true)?;
    Ok(matches
        .into_iter()
        .filter_map(|m| {
            let text = extract_text(&m.metadata)?.trim();
            (text.chars().count() > min_text_chars).then(|| SampledDocument {
                id: m.id,
                partition: partition.to_string(),
                text: text.to_string(),
            })
        })
        .collect())
}
