//! Process-wide accounting of LLM spend, keyed by agent type.
//!
//! The ledger is an explicit object shared by reference between agents; it
//! holds cumulative USD cost per agent type for the lifetime of the process.
//! Totals only ever grow. All access goes through the internal lock so
//! concurrent turns cannot lose updates.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Running total of LLM cost per agent type.
#[derive(Debug, Default)]
pub struct CostLedger {
    totals: Arc<RwLock<HashMap<String, f64>>>,
}

impl CostLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            totals: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Add `cost` (USD) to the running total for `agent_type`.
    pub async fn record(&self, agent_type: &str, cost: f64) {
        let mut totals = self.totals.write().await;
        *totals.entry(agent_type.to_string()).or_insert(0.0) += cost;
    }

    /// Cumulative cost for one agent type, 0.0 if never recorded.
    pub async fn total(&self, agent_type: &str) -> f64 {
        let totals = self.totals.read().await;
        totals.get(agent_type).copied().unwrap_or(0.0)
    }

    /// Copy of all totals, for logging and the CLI `/costs` command.
    pub async fn snapshot(&self) -> HashMap<String, f64> {
        let totals = self.totals.read().await;
        totals.clone()
    }
}

impl Clone for CostLedger {
    fn clone(&self) -> Self {
        Self {
            totals: Arc::clone(&self.totals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_accumulates() {
        let ledger = CostLedger::new();
        ledger.record("ShopAssistant", 0.5).await;
        ledger.record("ShopAssistant", 0.25).await;
        assert_eq!(ledger.total("ShopAssistant").await, 0.75);
    }

    #[tokio::test]
    async fn test_unknown_agent_is_zero() {
        let ledger = CostLedger::new();
        assert_eq!(ledger.total("nobody").await, 0.0);
    }

    #[tokio::test]
    async fn test_separate_agent_types() {
        let ledger = CostLedger::new();
        ledger.record("a", 1.0).await;
        ledger.record("b", 2.0).await;
        let snapshot = ledger.snapshot().await;
        assert_eq!(snapshot.get("a"), Some(&1.0));
        assert_eq!(snapshot.get("b"), Some(&2.0));
    }

    #[tokio::test]
    async fn test_concurrent_records_do_not_lose_updates() {
        let ledger = CostLedger::new();
        // 0.125 is exactly representable, so the expected sum is exact too.
        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let ledger = ledger.clone();
                tokio::spawn(async move {
                    ledger.record("ShopAssistant", 0.125).await;
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(ledger.total("ShopAssistant").await, 8.0);
    }
}
