//! Cancellable one-shot timers
//!
//! The quiz never owns a real clock. Frontends feed elapsed wall time into a
//! [`TimerQueue`], which hands back due [`TimerToken`]s in deadline order.
//! Every token carries the session epoch it was armed in, so a token that
//! survives a phase change is recognised as stale and dropped.

use std::time::Duration;

/// What a timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// One step of the per-problem countdown
    Countdown,
    /// End of the post-answer feedback pause
    Feedback,
}

/// Payload delivered when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    /// Session epoch at arm time
    pub epoch: u64,
}

impl TimerToken {
    pub fn countdown(epoch: u64) -> Self {
        Self {
            kind: TimerKind::Countdown,
            epoch,
        }
    }

    pub fn feedback(epoch: u64) -> Self {
        Self {
            kind: TimerKind::Feedback,
            epoch,
        }
    }
}

/// Handle for cancelling an armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Something that can run a token after a delay
pub trait Scheduler {
    /// Arm a one-shot timer
    fn after(&mut self, delay: Duration, token: TimerToken) -> TimerHandle;
    /// Disarm a timer. Cancelling an unknown or already-fired handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
    /// Disarm everything
    fn cancel_all(&mut self);
}

#[derive(Debug, Clone)]
struct Pending {
    handle: TimerHandle,
    deadline: Duration,
    token: TimerToken,
}

/// Virtual-clock scheduler
///
/// Deterministic: timers with equal deadlines fire in arm order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// Deadline of the next timer, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline. Callers loop on this so timers armed while handling a
    /// token can still fire within the same window.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerToken> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= until)
            .min_by_key(|(_, p)| (p.deadline, p.handle.0))
            .map(|(i, _)| i)?;
        let due = self.pending.remove(index);
        self.now = self.now.max(due.deadline);
        Some(due.token)
    }

    /// Move the clock forward to `until` (never backwards)
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Advance by `dt` and drain everything that came due
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerToken> {
        let until = self.now + dt;
        let mut due = Vec::new();
        while let Some(token) = self.pop_due(until) {
            due.push(token);
        }
        self.settle(until);
        due
    }
}

impl Scheduler for TimerQueue {
    fn after(&mut self, delay: Duration, token: TimerToken) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            deadline: self.now + delay,
            token,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|p| p.handle != handle);
    }

    fn cancel_all(&mut self) {
        self.pending.clear();
    }
}
