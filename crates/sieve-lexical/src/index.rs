//! Read-only lexical index: BM25 plus the documents it is aligned to.

use serde::{Deserialize, Serialize};
use sieve_core::models::LexicalHit;

use crate::bm25::{Bm25Index, Bm25Params};
use crate::tokenizer::Tokenizer;

/// One document of the lexical corpus. Position in the corpus is its BM25
/// document index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedDocument {
    pub id: String,
    pub partition: String,
    pub text: String,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LexicalIndex {
    bm25: Bm25Index,
    documents: Vec<IndexedDocument>,
    tokenizer: Tokenizer,
}

impl LexicalIndex {
    pub fn from_documents(
        documents: Vec<IndexedDocument>,
        params: Bm25Params,
        tokenizer: Tokenizer,
    ) -> Self {
        let corpus: Vec<Vec<String>> = documents.iter().map(|d| d.tokens.clone()).collect();
        Self {
            bm25: Bm25Index::build(&corpus, params),
            documents,
            tokenizer,
        }
    }

    /// Reassemble from persisted parts. Caller guarantees alignment.
    pub(crate) fn from_parts(
        bm25: Bm25Index,
        documents: Vec<IndexedDocument>,
        tokenizer: Tokenizer,
    ) -> Self {
        Self {
            bm25,
            documents,
            tokenizer,
        }
    }

    /// Top `top_k` documents with a positive BM25 score.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<LexicalHit> {
        let tokens = self.tokenizer.tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }
        self.bm25
            .top_n(&tokens, top_k)
            .into_iter()
            .filter_map(|(i, score)| {
                let doc = self.documents.get(i)?;
                Some(LexicalHit {
                    id: doc.id.clone(),
                    score,
                    partition: doc.partition.clone(),
                    text: doc.text.clone(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[IndexedDocument] {
        &self.documents
    }

    pub fn bm25(&self) -> &Bm25Index {
        &self.bm25
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stopwords::StopwordSet;

    fn doc(id: &str, partition: &str, text: &str, tok: &Tokenizer) -> IndexedDocument {
        IndexedDocument {
            id: id.into(),
            partition: partition.into(),
            text: text.into(),
            tokens: tok.tokenize(text),
        }
    }

    fn sample_index() -> LexicalIndex {
        let tok = Tokenizer::new(StopwordSet::english());
        let docs = vec![
            doc("mb-1", "microbrewery", "Microbrewery license fee schedule for small brewers", &tok),
            doc("fs-1", "food-safety", "Restaurant kitchen inspection checklist and permit rules", &tok),
            doc("zn-1", "zoning", "Zoning variance hearing notice for adjacent parcels", &tok),
        ];
        LexicalIndex::from_documents(docs, Bm25Params::default(), tok)
    }

    #[test]
    fn search_returns_aligned_document() {
        let idx = sample_index();
        let hits = idx.search("microbrewery license", 4);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "mb-1");
        assert_eq!(hits[0].partition, "microbrewery");
        assert!(hits[0].text.starts_with("Microbrewery"));
    }

    #[test]
    fn stopword_only_query_returns_nothing() {
        assert!(sample_index().search("the of and", 4).is_empty());
    }

    #[test]
    fn top_k_caps_results() {
        let idx = sample_index();
        let hits = idx.search("permit variance license", 2);
        assert_eq!(hits.len(), 2);
    }
}
