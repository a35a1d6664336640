// Turns pointer events plus timer deadlines into one committed action per gesture.
pub use self::timer::{TimerQueue, TimerToken};

use crate::config::TouchTimings;
use crate::geometry::{key_at, ResolvedKey, ResolvedLayout};
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

pub mod timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PressKind {
    Primary,
    LongPress,
}

/// A decision produced by the dispatcher. The session turns it into a
/// key event, text commit or command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GestureAction {
    pub key_id: usize,
    pub kind: PressKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GesturePhase {
    Idle,
    /// Down on a key without a long-press binding; release fires it.
    Down,
    LongPressPending,
    LongPressHandled,
    Repeating,
    /// The pointer left the key; the release will emit nothing.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerTask {
    LongPress,
    Repeat,
}

#[derive(Debug, Clone)]
struct Gesture {
    key: ResolvedKey,
    phase: GesturePhase,
    repeats: u32,
    timer: Option<TimerToken>,
}

#[derive(Debug, Clone)]
pub struct TouchDispatcher {
    timings: TouchTimings,
    timers: TimerQueue<TimerTask>,
    gesture: Option<Gesture>,
}

impl TouchDispatcher {
    pub fn new(timings: TouchTimings) -> Self {
        Self {
            timings,
            timers: TimerQueue::new(),
            gesture: None,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.gesture
            .as_ref()
            .map_or(GesturePhase::Idle, |g| g.phase)
    }

    /// Id of the key the current gesture started on.
    pub fn active_key(&self) -> Option<usize> {
        self.gesture.as_ref().map(|g| g.key.id)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Starts a gesture on the key under the point. Returns the key id, or
    /// `None` when the point hits no key (no gesture starts).
    pub fn press(&mut self, layout: &ResolvedLayout, x: f32, y: f32, now: Instant) -> Option<usize> {
        self.cancel();
        let key = key_at(layout, x, y)?.clone();

        // Keys without a long-press binding arm no timer at all.
        let (phase, timer) = if key.is_repeatable {
            let due = now + self.timings.repeat_start();
            (GesturePhase::Repeating, Some(self.timers.schedule(due, TimerTask::Repeat)))
        } else if key.has_long_press() {
            let due = now + self.timings.long_press();
            (
                GesturePhase::LongPressPending,
                Some(self.timers.schedule(due, TimerTask::LongPress)),
            )
        } else {
            (GesturePhase::Down, None)
        };

        debug!("Gesture down on key {} ({:?})", key.id, phase);
        let id = key.id;
        self.gesture = Some(Gesture {
            key,
            phase,
            repeats: 0,
            timer,
        });
        Some(id)
    }

    /// Leaving the original key's box cancels the gesture for good.
    pub fn move_to(&mut self, x: f32, y: f32) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        if gesture.phase == GesturePhase::Cancelled || gesture.key.contains(x, y) {
            return;
        }
        if let Some(token) = gesture.timer.take() {
            self.timers.cancel(token);
        }
        debug!("Gesture on key {} cancelled by move-off", gesture.key.id);
        gesture.phase = GesturePhase::Cancelled;
    }

    /// Fires every timer due at or before `now`, in deadline order. A held
    /// key repeats at most once per tick, however late the tick is.
    pub fn tick(&mut self, now: Instant) -> Vec<GestureAction> {
        let mut actions = Vec::new();
        while let Some((token, due, task)) = self.timers.pop_due(now) {
            let Some(gesture) = self.gesture.as_mut() else {
                continue;
            };
            if gesture.timer != Some(token) {
                continue;
            }
            gesture.timer = None;

            match task {
                TimerTask::LongPress => {
                    gesture.phase = GesturePhase::LongPressHandled;
                    actions.push(GestureAction {
                        key_id: gesture.key.id,
                        kind: PressKind::LongPress,
                    });
                }
                TimerTask::Repeat => {
                    gesture.repeats += 1;
                    actions.push(GestureAction {
                        key_id: gesture.key.id,
                        kind: PressKind::Primary,
                    });
                    let interval = self.timings.repeat_interval();
                    let next = (due + interval).max(now + interval);
                    gesture.timer = Some(self.timers.schedule(next, TimerTask::Repeat));
                }
            }
        }
        actions
    }

    /// Ends the gesture. Overdue timers fire first; the short press fires
    /// only if neither a long press nor a repeat already did.
    pub fn release(&mut self, now: Instant) -> Vec<GestureAction> {
        let mut actions = self.tick(now);
        let Some(gesture) = self.gesture.take() else {
            return actions;
        };
        if let Some(token) = gesture.timer {
            self.timers.cancel(token);
        }

        let suppressed = match gesture.phase {
            GesturePhase::Cancelled | GesturePhase::LongPressHandled => true,
            GesturePhase::Repeating => gesture.repeats > 0,
            _ => false,
        };
        if !suppressed {
            actions.push(GestureAction {
                key_id: gesture.key.id,
                kind: PressKind::Primary,
            });
        }
        actions
    }

    /// Drops the current gesture and all of its timers without firing anything.
    pub fn cancel(&mut self) {
        self.gesture = None;
        self.timers.cancel_all();
    }
}
