use serde::{Deserialize, Serialize};

use crate::constants::LEXICAL_TEXT_KEY;

/// Free-form document metadata as returned by the vector service.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Which retrieval path produced a hit.
///
/// Declaration order is fusion tie-break precedence: vector before lexical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Vector,
    Lexical,
}

/// A dense-similarity match from one partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorHit {
    pub id: String,
    pub score: f64,
    pub partition: String,
    pub metadata: Metadata,
}

/// A BM25 match from the lexical index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalHit {
    pub id: String,
    pub score: f64,
    pub partition: String,
    pub text: String,
}

/// A ranked candidate from either retrieval path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Hit {
    Vector(VectorHit),
    Lexical(LexicalHit),
}

impl Hit {
    pub fn id(&self) -> &str {
        match self {
            Hit::Vector(h) => &h.id,
            Hit::Lexical(h) => &h.id,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Hit::Vector(h) => h.score,
            Hit::Lexical(h) => h.score,
        }
    }

    pub fn partition(&self) -> &str {
        match self {
            Hit::Vector(h) => &h.partition,
            Hit::Lexical(h) => &h.partition,
        }
    }

    pub fn source(&self) -> Source {
        match self {
            Hit::Vector(_) => Source::Vector,
            Hit::Lexical(_) => Source::Lexical,
        }
    }

    /// Metadata view of the hit. Lexical hits expose their text under `text`.
    pub fn metadata(&self) -> Metadata {
        match self {
            Hit::Vector(h) => h.metadata.clone(),
            Hit::Lexical(h) => {
                let mut m = Metadata::new();
                m.insert(
                    LEXICAL_TEXT_KEY.to_string(),
                    serde_json::Value::String(h.text.clone()),
                );
                m
            }
        }
    }
}

impl From<VectorHit> for Hit {
    fn from(hit: VectorHit) -> Self {
        Hit::Vector(hit)
    }
}

impl From<LexicalHit> for Hit {
    fn from(hit: LexicalHit) -> Self {
        Hit::Lexical(hit)
    }
}
