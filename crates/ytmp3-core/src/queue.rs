//! Visual download queue: bounded active slots plus a pending stack.
//!
//! Tracks every concurrently running job for display. At most `max_active`
//! jobs occupy Active slots; the overflow goes to a Pending stack (newest
//! shown first) and is promoted oldest-first whenever an Active slot frees
//! up. Completion keeps the finished state on screen for a dwell period
//! before removal; an empty queue goes dormant after a grace delay.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::progress::DONE_PERCENT;

/// Default bound on simultaneously displayed (Active) jobs.
pub const MAX_ACTIVE: usize = 3;

/// Dwell and grace periods for the queue's visual lifecycle.
/// The two-phase completion delay (dwell, then removal transition) is an
/// observable contract: the success state must stay visible before removal.
#[derive(Debug, Clone, Copy)]
pub struct QueueTimings {
    /// How long a completed job stays visibly done before removal starts.
    pub done_dwell: Duration,
    /// Removal transition once the dwell has passed.
    pub remove_transition: Duration,
    /// How long an empty queue waits before going dormant.
    pub hide_grace: Duration,
}

impl Default for QueueTimings {
    fn default() -> Self {
        Self {
            done_dwell: Duration::from_millis(1500),
            remove_transition: Duration::from_millis(400),
            hide_grace: Duration::from_millis(1000),
        }
    }
}

/// Visual phase of one queue slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    Running,
    /// Finished, dwelling on screen.
    Done,
    /// Dwell over, removal transition in progress.
    Removing,
}

/// Identity shown for a queued job.
#[derive(Debug, Clone)]
pub struct QueueJob {
    pub id: String,
    pub title: String,
}

/// Read-only view of one slot, for rendering.
#[derive(Debug, Clone)]
pub struct SlotView {
    pub job: QueueJob,
    pub phase: SlotPhase,
    pub percent: f64,
    pub message: String,
}

/// Read-only view of the whole queue.
#[derive(Debug, Clone)]
pub struct QueueSnapshot {
    /// Active slots, oldest first.
    pub active: Vec<SlotView>,
    /// Pending slots in display order (newest first).
    pub pending: Vec<SlotView>,
    pub dormant: bool,
}

#[derive(Debug)]
struct Slot {
    job: QueueJob,
    phase: SlotPhase,
    percent: f64,
    message: String,
}

impl Slot {
    fn view(&self) -> SlotView {
        SlotView {
            job: self.job.clone(),
            phase: self.phase,
            percent: self.percent,
            message: self.message.clone(),
        }
    }
}

#[derive(Debug)]
struct Inner {
    active: Vec<Slot>,
    /// Arrival order: front = oldest = next to promote.
    pending: VecDeque<Slot>,
    max_active: usize,
    dormant: bool,
    /// Bumped on every add; a scheduled hide aborts if it changed.
    epoch: u64,
}

/// Shared handle to the queue state. Clone freely; all methods take `&self`.
#[derive(Debug, Clone)]
pub struct QueueManager {
    inner: Arc<Mutex<Inner>>,
    timings: QueueTimings,
}

impl QueueManager {
    pub fn new(max_active: usize, timings: QueueTimings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                active: Vec::new(),
                pending: VecDeque::new(),
                max_active: max_active.max(1),
                dormant: true,
                epoch: 0,
            })),
            timings,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(MAX_ACTIVE, QueueTimings::default())
    }

    /// Add a job: Active if a slot is free, else pushed to Pending.
    pub fn add(&self, job: QueueJob) {
        let mut inner = self.inner.lock().unwrap();
        inner.dormant = false;
        inner.epoch += 1;
        let slot = Slot {
            job,
            phase: SlotPhase::Running,
            percent: 0.0,
            message: String::new(),
        };
        if inner.active.len() < inner.max_active {
            inner.active.push(slot);
        } else {
            inner.pending.push_back(slot);
        }
    }

    /// Update a job's progress. No-op for unknown (already removed) ids, so
    /// a late poll tick can never resurrect a finished entry.
    pub fn update(&self, job_id: &str, percent: f64, message: &str) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(slot) = find_mut(&mut inner, job_id) {
            if slot.phase == SlotPhase::Running {
                slot.percent = percent;
                slot.message = message.to_string();
            }
        }
    }

    /// Complete a job: mark it done, dwell, run the removal transition, then
    /// remove it and promote the oldest pending job. Callers usually spawn
    /// this so the dwell does not block them.
    pub async fn complete(&self, job_id: &str) {
        {
            let mut inner = self.inner.lock().unwrap();
            let Some(slot) = find_mut(&mut inner, job_id) else {
                return;
            };
            slot.phase = SlotPhase::Done;
            slot.percent = DONE_PERCENT;
        }
        tokio::time::sleep(self.timings.done_dwell).await;
        {
            let mut inner = self.inner.lock().unwrap();
            if let Some(slot) = find_mut(&mut inner, job_id) {
                slot.phase = SlotPhase::Removing;
            }
        }
        tokio::time::sleep(self.timings.remove_transition).await;
        self.remove(job_id);
        self.hide_when_idle().await;
    }

    /// Remove a job immediately (used on error) and promote the head of
    /// Pending into the freed Active slot. Returns true if the job existed.
    pub fn remove(&self, job_id: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let removed = if let Some(i) = inner.active.iter().position(|s| s.job.id == job_id) {
            inner.active.remove(i);
            true
        } else if let Some(i) = inner.pending.iter().position(|s| s.job.id == job_id) {
            inner.pending.remove(i);
            true
        } else {
            false
        };
        // FIFO promotion: the longest-waiting pending job moves up.
        while inner.active.len() < inner.max_active {
            match inner.pending.pop_front() {
                Some(slot) => inner.active.push(slot),
                None => break,
            }
        }
        removed
    }

    /// If the queue is empty, go dormant after the grace delay — unless a
    /// new job arrives in the interim.
    pub async fn hide_when_idle(&self) {
        let epoch = {
            let inner = self.inner.lock().unwrap();
            if !inner.active.is_empty() || !inner.pending.is_empty() {
                return;
            }
            inner.epoch
        };
        tokio::time::sleep(self.timings.hide_grace).await;
        let mut inner = self.inner.lock().unwrap();
        if inner.epoch == epoch && inner.active.is_empty() && inner.pending.is_empty() {
            inner.dormant = true;
        }
    }

    /// Number of non-removed jobs (active + pending).
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.active.len() + inner.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        let inner = self.inner.lock().unwrap();
        QueueSnapshot {
            active: inner.active.iter().map(Slot::view).collect(),
            // Stack-ordered display: newest pending first.
            pending: inner.pending.iter().rev().map(Slot::view).collect(),
            dormant: inner.dormant,
        }
    }
}

fn find_mut<'a>(inner: &'a mut Inner, job_id: &str) -> Option<&'a mut Slot> {
    inner
        .active
        .iter_mut()
        .chain(inner.pending.iter_mut())
        .find(|s| s.job.id == job_id)
}
