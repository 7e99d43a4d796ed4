//! Keyword-based routing from a query to semantic tags and physical partitions.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use sieve_core::constants::POLICY_INTENT_MARKERS;
use sieve_core::models::NamespaceTable;
use tracing::{debug, warn};

/// Words of two or more word characters.
static QUERY_WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b\w{2,}\b").ok());

const EXACT_MATCH_POINTS: i64 = 3;
const PARTIAL_MATCH_POINTS: i64 = 1;
const POLICY_BONUS_POINTS: i64 = 2;

/// Tags and partitions chosen for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingDecision {
    pub tags: Vec<String>,
    pub partitions: Vec<String>,
    /// No routed partition was available, so the first available one was used.
    pub fallback_used: bool,
}

#[derive(Debug, Clone)]
pub struct NamespaceRouter {
    table: NamespaceTable,
    /// Lowercased keywords per tag, aligned with `table.tags`.
    keywords: Vec<Vec<String>>,
}

fn query_words(query: &str) -> Vec<String> {
    match QUERY_WORD.as_ref() {
        Some(re) => re.find_iter(query).map(|m| m.as_str().to_string()).collect(),
        None => query
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|w| w.chars().count() >= 2)
            .map(str::to_string)
            .collect(),
    }
}

impl NamespaceRouter {
    pub fn new(table: NamespaceTable) -> Self {
        let keywords = table
            .tags
            .iter()
            .map(|t| {
                t.keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect()
            })
            .collect();
        Self { table, keywords }
    }

    pub fn table(&self) -> &NamespaceTable {
        &self.table
    }

    /// Score of every tag, in table order.
    pub fn score_tags(&self, query: &str) -> Vec<(String, i64)> {
        let query = query.to_lowercase();
        let words = query_words(&query);
        let policy_intent = POLICY_INTENT_MARKERS.iter().any(|m| query.contains(m));

        self.table
            .tags
            .iter()
            .zip(&self.keywords)
            .map(|(tag, keywords)| {
                let mut score = 0;
                for word in &words {
                    for keyword in keywords {
                        if word == keyword {
                            score += EXACT_MATCH_POINTS;
                        } else if keyword.contains(word.as_str()) || word.contains(keyword.as_str()) {
                            score += PARTIAL_MATCH_POINTS;
                        }
                    }
                }
                if policy_intent && tag.is_policy_broad() {
                    score += POLICY_BONUS_POINTS;
                }
                (tag.name.clone(), score)
            })
            .collect()
    }

    /// Between `min` and `max` tag names, best first. Out-of-range bounds
    /// are clamped: `min >= 1`, `max >= min`.
    pub fn select(&self, query: &str, min: usize, max: usize) -> Vec<String> {
        let min = min.max(1);
        let max = max.max(min);

        let mut scored = self.score_tags(query);
        // Stable: equal scores keep table order.
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        let mut selected: Vec<String> = scored
            .into_iter()
            .filter(|(_, s)| *s > 0)
            .map(|(name, _)| name)
            .take(max)
            .collect();

        if selected.len() < min {
            for name in self.table.tag_names() {
                if selected.len() >= min {
                    break;
                }
                if !selected.contains(&name) {
                    selected.push(name);
                }
            }
        }

        debug!(query = %query, tags = ?selected, "namespaces selected");
        selected
    }

    /// Physical partitions for the given tags, deduplicated in first-seen order.
    pub fn translate(&self, tags: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for tag in tags {
            for p in self.table.partitions_for(tag) {
                if !out.contains(&p) {
                    out.push(p);
                }
            }
        }
        out
    }

    /// Route, translate, and keep only partitions the backend reports.
    /// Falls back to the first available partition when none survive.
    pub fn relevant_partitions(
        &self,
        query: &str,
        min: usize,
        max: usize,
        available: &[String],
    ) -> RoutingDecision {
        let tags = self.select(query, min, max);
        let mut partitions: Vec<String> = self
            .translate(&tags)
            .into_iter()
            .filter(|p| available.contains(p))
            .collect();

        let mut fallback_used = false;
        if partitions.is_empty() {
            if let Some(first) = available.first() {
                warn!(
                    tags = ?tags,
                    fallback = %first,
                    "no routed partition is available, using emergency fallback"
                );
                partitions.push(first.clone());
                fallback_used = true;
            }
        }

        RoutingDecision {
            tags,
            partitions,
            fallback_used,
        }
    }
}
