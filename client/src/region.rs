use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::render::{farewell_markup, ERROR_MARKUP, PROCESSING_MARKUP};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResult {
    pub markup: String,
    pub probability: f64,
    pub rendered_at: DateTime<Utc>,
}

/// What the result region currently shows. One variant at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RegionState {
    #[default]
    Empty,
    Processing,
    Result(RenderedResult),
    Error,
    Farewell,
}

impl RegionState {
    pub fn markup(&self) -> String {
        match self {
            RegionState::Empty => String::new(),
            RegionState::Processing => PROCESSING_MARKUP.to_string(),
            RegionState::Result(result) => result.markup.clone(),
            RegionState::Error => ERROR_MARKUP.to_string(),
            RegionState::Farewell => farewell_markup(),
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, RegionState::Empty)
    }
}

/// Which response may write the region when submissions overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Responses to anything but the latest submission are dropped.
    #[default]
    LatestSubmission,
    /// Whichever response resolves last wins.
    LastResponse,
}

#[derive(Debug, Default)]
struct Inner {
    state: RegionState,
    ticket: u64,
}

/// Shared handle to the page's result region.
#[derive(Debug, Clone, Default)]
pub struct ResultRegion {
    inner: Arc<Mutex<Inner>>,
}

impl ResultRegion {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock leaves a whole `RegionState` behind,
    // so the poisoned value is still usable.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> RegionState {
        self.lock().state.clone()
    }

    pub fn markup(&self) -> String {
        self.lock().state.markup()
    }

    /// Starts a submission: issues a new ticket and shows the processing
    /// placeholder in the same critical section.
    pub fn begin(&self) -> u64 {
        let mut inner = self.lock();
        inner.ticket += 1;
        inner.state = RegionState::Processing;
        inner.ticket
    }

    /// Writes the outcome of submission `ticket`. Returns false when the
    /// policy drops it because a newer ticket exists.
    pub fn settle(&self, ticket: u64, state: RegionState, policy: OverlapPolicy) -> bool {
        let mut inner = self.lock();
        if policy == OverlapPolicy::LatestSubmission && inner.ticket != ticket {
            return false;
        }
        inner.state = state;
        true
    }

    /// Replaces the content outside of any submission and invalidates
    /// responses still in flight.
    pub fn reset(&self, state: RegionState) {
        let mut inner = self.lock();
        inner.ticket += 1;
        inner.state = state;
    }
}
