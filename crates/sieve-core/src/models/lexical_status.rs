use serde::{Deserialize, Serialize};

/// Availability of the lexical index at the time a query ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LexicalStatus {
    /// Index built or loaded; lexical scores contributed.
    Ready,
    /// Index still building; results are vector-only.
    Building,
    /// Index unavailable for the life of the process.
    Disabled { reason: String },
}

impl LexicalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LexicalStatus::Ready => "ready",
            LexicalStatus::Building => "building",
            LexicalStatus::Disabled { .. } => "disabled",
        }
    }
}
