use std::time::Instant;

/// Handle returned by [`TimerQueue::schedule`]. Tokens are never reused,
/// so cancelling a stale token can not hit a newer timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    token: TimerToken,
    due: Instant,
    task: T,
}

/// Deadlines driven by the owner's event loop. Nothing fires by itself:
/// the loop calls [`TimerQueue::pop_due`] with the current time.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    next_token: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_token: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, task: T) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending.push(Scheduled { token, due, task });
        token
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.token != token);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|s| s.token == token)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|s| s.due).min()
    }

    /// Removes and returns the earliest timer due at or before `now`.
    /// Equal deadlines come out in scheduling order.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerToken, Instant, T)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= now)
            .min_by_key(|(_, s)| (s.due, s.token))
            .map(|(i, _)| i)?;
        let Scheduled { token, due, task } = self.pending.swap_remove(index);
        Some((token, due, task))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
