//! Every fallback the engine takes: component, failure, fallback, timestamp,
//! recovery status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sieve_core::models::DegradationEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    Active,
    Recovered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Bounded record of degradation events.
#[derive(Debug, Clone)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
    max_events: usize,
}

impl DegradationTracker {
    pub fn with_capacity(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::degradation_triggered(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        self.events.push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
        if self.events.len() > self.max_events {
            let excess = self.events.len() - self.max_events;
            self.events.drain(..excess);
        }
    }

    /// Close every active degradation of `component`. Returns how many closed.
    pub fn mark_recovered(&mut self, component: &str) -> usize {
        let now = Utc::now();
        let mut closed = 0;
        for tracked in self
            .events
            .iter_mut()
            .filter(|t| t.event.component == component && t.recovery_status == RecoveryStatus::Active)
        {
            tracked.recovery_status = RecoveryStatus::Recovered;
            tracked.recovered_at = Some(now);
            closed += 1;
        }
        closed
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    pub fn active(&self) -> Vec<&TrackedDegradation> {
        self.events
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.events
            .iter()
            .any(|t| t.event.component == component && t.recovery_status == RecoveryStatus::Active)
    }

    pub fn count_for(&self, component: &str) -> usize {
        self.events
            .iter()
            .filter(|t| t.event.component == component)
            .count()
    }
}

impl Default for DegradationTracker {
    fn default() -> Self {
        Self::with_capacity(sieve_core::config::defaults::DEFAULT_QUERY_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_closes_only_matching_component() {
        let mut t = DegradationTracker::default();
        t.record(DegradationEvent::now("vector", "partition p timed out", "skip partition"));
        t.record(DegradationEvent::now("lexical", "empty corpus", "vector-only"));
        assert_eq!(t.mark_recovered("vector"), 1);
        assert!(!t.is_degraded("vector"));
        assert!(t.is_degraded("lexical"));
        assert_eq!(t.active().len(), 1);
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut t = DegradationTracker::with_capacity(2);
        for i in 0..3 {
            t.record(DegradationEvent::now("vector", format!("failure {i}"), "skip"));
        }
        assert_eq!(t.events().len(), 2);
        assert_eq!(t.events()[0].event.failure, "failure 1");
    }
}
