//! Delayed callbacks on a simulated millisecond clock
//!
//! The game never blocks or sleeps. Anything that happens "later" is a
//! [`Callback`] queued with [`Scheduler::after`] and fired when the clock is
//! advanced past its due time. A delay that runs past the end of the clock
//! parks its callback for good.

use serde::{Deserialize, Serialize};

/// Work the game can schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Callback {
    /// One step of the game loop
    Tick,
    /// Respawn the ball on the paddle after a lost life
    ReturnToIdle,
    /// Start a new round after a win or a loss
    Reset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Pending {
    due_ms: u64,
    /// Insertion order, breaks ties between equal due times
    seq: u64,
    callback: Callback,
}

/// Pending callbacks ordered by due time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queue `callback` to fire `delay_ms` from now
    pub fn after(&mut self, delay_ms: u64, callback: Callback) {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        self.pending.push(Pending {
            due_ms,
            seq: self.next_seq,
            callback,
        });
        self.next_seq += 1;
        log::trace!("scheduled {:?} at {}ms", callback, due_ms);
    }

    /// Drop every pending instance of `callback`, returns how many were dropped
    pub fn cancel(&mut self, callback: Callback) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.callback != callback);
        before - self.pending.len()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, callback: Callback) -> bool {
        self.pending.iter().any(|p| p.callback == callback)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the earliest callback due at or before `until_ms`
    ///
    /// The clock jumps to that callback's due time, so callbacks it schedules
    /// are timed from when it fired. Returns `None` once nothing else is due.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Callback> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= until_ms && p.due_ms != u64::MAX)
            .min_by_key(|(_, p)| (p.due_ms, p.seq))
            .map(|(i, _)| i)?;
        let pending = self.pending.swap_remove(index);
        self.now_ms = self.now_ms.max(pending.due_ms);
        Some(pending.callback)
    }

    /// Move the clock forward to `until_ms` (never backward)
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

/// Converts frame timestamps (fractional ms) into whole clock steps
///
/// The fractional part of each frame is carried into the next one, so the
/// simulated clock keeps pace with real time at any refresh rate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    carry: f64,
    max_frame_ms: u64,
}

impl FrameClock {
    /// `max_frame_ms` caps a single frame, e.g. after the tab was hidden
    pub fn new(max_frame_ms: u64) -> Self {
        Self {
            last_time: None,
            carry: 0.0,
            max_frame_ms,
        }
    }

    /// Whole milliseconds to advance for a frame stamped `time`
    pub fn elapsed_ms(&mut self, time: f64) -> u64 {
        let Some(last_time) = self.last_time.replace(time) else {
            return 0;
        };
        let frame = (time - last_time).clamp(0.0, self.max_frame_ms as f64);
        let total = frame + self.carry;
        let whole = total.floor();
        self.carry = total - whole;
        whole as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.after(2000, Callback::Reset);
        scheduler.after(12, Callback::Tick);
        scheduler.after(1000, Callback::ReturnToIdle);

        assert_eq!(scheduler.pop_due(5000), Some(Callback::Tick));
        assert_eq!(scheduler.now_ms(), 12);
        assert_eq!(scheduler.pop_due(5000), Some(Callback::ReturnToIdle));
        assert_eq!(scheduler.pop_due(5000), Some(Callback::Reset));
        assert_eq!(scheduler.now_ms(), 2000);
        assert_eq!(scheduler.pop_due(5000), None);
    }

    #[test]
    fn test_ties_fire_in_insertion_order() {
        let mut scheduler = Scheduler::new();
        scheduler.after(10, Callback::ReturnToIdle);
        scheduler.after(10, Callback::Tick);
        assert_eq!(scheduler.pop_due(10), Some(Callback::ReturnToIdle));
        assert_eq!(scheduler.pop_due(10), Some(Callback::Tick));
    }

    #[test]
    fn test_not_due_yet() {
        let mut scheduler = Scheduler::new();
        scheduler.after(12, Callback::Tick);
        assert_eq!(scheduler.pop_due(11), None);
        scheduler.advance_to(11);
        assert_eq!(scheduler.now_ms(), 11);
        assert!(scheduler.is_pending(Callback::Tick));
        assert_eq!(scheduler.pop_due(12), Some(Callback::Tick));
    }

    #[test]
    fn test_delay_is_relative_to_fire_time() {
        let mut scheduler = Scheduler::new();
        scheduler.after(12, Callback::Tick);
        assert_eq!(scheduler.pop_due(100), Some(Callback::Tick));
        scheduler.after(12, Callback::Tick);
        assert_eq!(scheduler.pop_due(23), None);
        assert_eq!(scheduler.pop_due(24), Some(Callback::Tick));
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        scheduler.after(12, Callback::Tick);
        scheduler.after(24, Callback::Tick);
        scheduler.after(1000, Callback::ReturnToIdle);

        assert_eq!(scheduler.cancel(Callback::Tick), 2);
        assert!(!scheduler.is_pending(Callback::Tick));
        assert_eq!(scheduler.len(), 1);

        scheduler.cancel_all();
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.pop_due(u64::MAX), None);
    }

    #[test]
    fn test_huge_delay_never_fires() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(12);
        scheduler.after(u64::MAX, Callback::Reset);
        scheduler.after(12, Callback::Tick);

        assert_eq!(scheduler.pop_due(u64::MAX), Some(Callback::Tick));
        assert_eq!(scheduler.pop_due(u64::MAX), None);
        assert!(scheduler.is_pending(Callback::Reset));
    }

    #[test]
    fn test_clock_never_goes_backward() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(500);
        scheduler.advance_to(100);
        assert_eq!(scheduler.now_ms(), 500);
    }

    #[test]
    fn test_frame_clock_keeps_fractions() {
        let mut clock = FrameClock::new(250);
        let total: u64 = (0..600)
            .map(|frame| clock.elapsed_ms(frame as f64 * 1000.0 / 60.0))
            .sum();
        // 599 frames of 16.67ms
        assert_eq!(total, 9983);

        let mut clock = FrameClock::new(250);
        let total: u64 = (0..1001)
            .map(|frame| clock.elapsed_ms(frame as f64 * 1000.0 / 144.0))
            .sum();
        // 1000 frames of 6.94ms
        assert_eq!(total, 6944);
    }

    #[test]
    fn test_frame_clock_first_frame_and_cap() {
        let mut clock = FrameClock::new(250);
        assert_eq!(clock.elapsed_ms(5000.0), 0);
        assert_eq!(clock.elapsed_ms(5016.5), 16);
        // A stalled tab is capped, the carried half millisecond survives
        assert_eq!(clock.elapsed_ms(9000.0), 250);
        assert_eq!(clock.elapsed_ms(9010.0), 10);
        // Timestamps going backward advance nothing
        assert_eq!(clock.elapsed_ms(8000.0), 0);
    }
}
