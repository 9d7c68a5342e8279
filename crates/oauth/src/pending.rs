use std::time::{Duration, Instant};

use {dashmap::DashMap, tracing::debug};

/// Default lifetime of a pending authorization.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

#[derive(Debug)]
struct PendingFlow {
    verifier: String,
    created_at: Instant,
}

/// In-memory map of `state -> PKCE verifier` for authorizations in flight.
///
/// Entries are removed on first use or once they outlive the TTL, so
/// concurrent flows never overwrite each other's verifier.
#[derive(Debug)]
pub struct PendingFlows {
    flows: DashMap<String, PendingFlow>,
    ttl: Duration,
}

impl Default for PendingFlows {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl PendingFlows {
    pub fn new(ttl: Duration) -> Self {
        Self {
            flows: DashMap::new(),
            ttl,
        }
    }

    /// Record the verifier for `state`, dropping any expired entries first.
    pub fn insert(&self, state: impl Into<String>, verifier: impl Into<String>) {
        self.purge_expired();
        self.flows.insert(state.into(), PendingFlow {
            verifier: verifier.into(),
            created_at: Instant::now(),
        });
    }

    /// Remove and return the verifier for `state` if it is still live.
    pub fn take(&self, state: &str) -> Option<String> {
        let (_, flow) = self.flows.remove(state)?;
        if flow.created_at.elapsed() >= self.ttl {
            debug!(state, "pending authorization expired");
            return None;
        }
        Some(flow.verifier)
    }

    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.flows.retain(|_, flow| flow.created_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}
