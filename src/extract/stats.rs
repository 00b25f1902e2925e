// src/extract/stats.rs
// =============================================================================
// Counters for one extraction attempt.
//
// These used to be the kind of thing people make global mutable state.
// Here they are a plain value owned by the orchestrator for the duration of
// a run, so two extractions (say, in tests) can never contaminate each other.
//
// The orchestrator resets the stats at the start of EVERY attempt, including
// the fallback attempt, so the numbers always describe only the strategy
// that actually produced the tree.
// =============================================================================

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ExtractionStats {
    /// Remote calls issued (one per request, both strategies)
    pub api_calls: u32,
    /// Distinct directory nodes encountered or created
    pub directories_seen: u32,
    /// Distinct file nodes encountered or created
    pub files_seen: u32,
    started: Instant,
}

impl ExtractionStats {
    /// Fresh counters with the clock starting now
    pub fn start() -> Self {
        ExtractionStats {
            api_calls: 0,
            directories_seen: 0,
            files_seen: 0,
            started: Instant::now(),
        }
    }

    /// Zeroes all counters and restarts the clock
    pub fn reset(&mut self) {
        *self = ExtractionStats::start();
    }

    /// Call this immediately before issuing a remote request
    pub fn record_call(&mut self) {
        self.api_calls += 1;
    }

    /// Wall-clock time since the current attempt began
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
