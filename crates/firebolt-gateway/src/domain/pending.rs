//! Correlation table - the async-to-sync bridge for outbound calls.
//!
//! Maps correlation IDs to callers waiting on a response. Every map
//! operation is a single shard lock held for the lookup/insert/remove only;
//! nothing here is held across an `.await`.

use crate::domain::correlation::{CorrelationId, IdAllocator};
use crate::domain::error::{FireboltError, FireboltResult};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Terminal outcome of a call
pub type CallOutcome = FireboltResult<serde_json::Value>;

/// A call waiting for its response
struct PendingCall {
    /// Continuation for the caller
    sender: oneshot::Sender<CallOutcome>,
    /// When the call was registered
    created_at: Instant,
    /// Method name (for logging)
    method: String,
    /// Deadline relative to `created_at`
    timeout: Duration,
}

/// Statistics for the correlation table
#[derive(Debug, Default)]
pub struct PendingStats {
    /// Total calls registered
    pub total_registered: AtomicU64,
    /// Total calls resolved by a response
    pub total_resolved: AtomicU64,
    /// Total calls that hit their deadline
    pub total_timeouts: AtomicU64,
    /// Total calls removed without an outcome (send failure, caller gone)
    pub total_cancelled: AtomicU64,
    /// Total responses discarded as stale or unknown
    pub total_discarded: AtomicU64,
}

impl PendingStats {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Correlation table for outstanding calls.
///
/// Flow:
/// 1. Client calls `register()` and gets an id plus a oneshot receiver
/// 2. Client sends the request frame carrying that id
/// 3. Delivery path calls `resolve()` when the response frame arrives
/// 4. Client awaits the receiver, or calls `cancel()` when its deadline passes
pub struct CorrelationTable {
    /// Outstanding calls by id
    pending: DashMap<CorrelationId, PendingCall>,
    /// Id source
    ids: IdAllocator,
    /// Deadline used when the caller does not give one
    default_timeout: Duration,
    /// Statistics
    stats: Arc<PendingStats>,
}

impl CorrelationTable {
    pub fn new(default_timeout: Duration) -> Self {
        Self::with_allocator(default_timeout, IdAllocator::new())
    }

    /// Create a table drawing ids from a specific allocator
    pub fn with_allocator(default_timeout: Duration, ids: IdAllocator) -> Self {
        Self {
            pending: DashMap::new(),
            ids,
            default_timeout,
            stats: Arc::new(PendingStats::default()),
        }
    }

    /// Register a pending call and get a receiver for its outcome.
    ///
    /// The returned id is unique among outstanding calls: ids still in use
    /// after an allocator wrap are skipped.
    pub fn register(
        &self,
        method: &str,
        timeout: Option<Duration>,
    ) -> (CorrelationId, oneshot::Receiver<CallOutcome>) {
        let (tx, rx) = oneshot::channel();
        let call = PendingCall {
            sender: tx,
            created_at: Instant::now(),
            method: method.to_string(),
            timeout: timeout.unwrap_or(self.default_timeout),
        };

        let correlation_id = loop {
            let candidate = self.ids.next_id();
            match self.pending.entry(candidate) {
                Entry::Vacant(slot) => {
                    slot.insert(call);
                    break candidate;
                }
                // Still in flight from before a wrap
                Entry::Occupied(_) => continue,
            }
        };
        PendingStats::bump(&self.stats.total_registered);

        debug!(
            correlation_id = %correlation_id,
            method = method,
            "Registered pending call"
        );

        (correlation_id, rx)
    }

    /// Deliver a response to the call that issued `correlation_id`.
    ///
    /// Returns false when the id is unknown (never issued, already resolved,
    /// or timed out); the response is discarded and nothing else is touched.
    pub fn resolve(&self, correlation_id: CorrelationId, outcome: CallOutcome) -> bool {
        let Some((_, call)) = self.pending.remove(&correlation_id) else {
            PendingStats::bump(&self.stats.total_discarded);
            debug!(
                correlation_id = %correlation_id,
                "Discarding response for unknown or expired correlation ID"
            );
            return false;
        };

        let response_time = call.created_at.elapsed();
        match call.sender.send(outcome) {
            Ok(()) => {
                PendingStats::bump(&self.stats.total_resolved);
                debug!(
                    correlation_id = %correlation_id,
                    method = call.method,
                    response_time_ms = response_time.as_millis(),
                    "Resolved pending call"
                );
                true
            }
            Err(_) => {
                // Caller went away between its deadline and the cancel
                PendingStats::bump(&self.stats.total_discarded);
                debug!(
                    correlation_id = %correlation_id,
                    method = call.method,
                    "Pending call receiver dropped"
                );
                false
            }
        }
    }

    /// Time out a pending call.
    ///
    /// Removes the entry so a late response cannot resurrect it and delivers
    /// `Timeout` to the continuation. Returns false if the call was already gone.
    pub fn cancel(&self, correlation_id: &CorrelationId) -> bool {
        let Some((_, call)) = self.pending.remove(correlation_id) else {
            return false;
        };
        PendingStats::bump(&self.stats.total_timeouts);
        debug!(
            correlation_id = %correlation_id,
            method = call.method,
            "Pending call timed out"
        );
        let _ = call.sender.send(Err(FireboltError::Timeout));
        true
    }

    /// Remove a pending call without delivering any outcome.
    ///
    /// Used when the request never left (send failure) or the caller is gone.
    pub fn abandon(&self, correlation_id: &CorrelationId) -> bool {
        if self.pending.remove(correlation_id).is_some() {
            PendingStats::bump(&self.stats.total_cancelled);
            true
        } else {
            false
        }
    }

    /// Time out every call past its deadline.
    ///
    /// Returns the number of calls removed.
    pub fn remove_expired(&self) -> usize {
        let now = Instant::now();
        let expired: Vec<CorrelationId> = self
            .pending
            .iter()
            .filter(|entry| now.duration_since(entry.created_at) > entry.timeout)
            .map(|entry| *entry.key())
            .collect();

        let mut removed = 0;
        for id in expired {
            if let Some((_, call)) = self
                .pending
                .remove_if(&id, |_, call| now.duration_since(call.created_at) > call.timeout)
            {
                warn!(
                    correlation_id = %id,
                    method = call.method,
                    elapsed_ms = now.duration_since(call.created_at).as_millis(),
                    timeout_ms = call.timeout.as_millis(),
                    "Removing expired pending call"
                );
                PendingStats::bump(&self.stats.total_timeouts);
                let _ = call.sender.send(Err(FireboltError::Timeout));
                removed += 1;
            }
        }
        removed
    }

    /// Number of outstanding calls
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Check if a correlation ID is outstanding
    pub fn is_pending(&self, correlation_id: &CorrelationId) -> bool {
        self.pending.contains_key(correlation_id)
    }

    /// Deadline applied when a call gives none
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    pub fn stats(&self) -> &PendingStats {
        &self.stats
    }
}

/// Background task that times out abandoned calls
pub async fn cleanup_task(table: Arc<CorrelationTable>, interval: Duration) {
    let mut cleanup_interval = tokio::time::interval(interval);
    cleanup_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        cleanup_interval.tick().await;
        let removed = table.remove_expired();
        if removed > 0 {
            debug!(removed = removed, "Cleaned up expired pending calls");
        }
    }
}
