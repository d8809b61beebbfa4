//! Deferred tasks owned by a view.
//!
//! Views never touch a real timer. Each keeps a [`DeferredQueue`] keyed by
//! elapsed time since the view was mounted, and the host drives it through
//! [`ViewClock`]. Dropping the view drops the queue, which cancels every
//! task it still held.

use rand::Rng;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// Tasks ordered by due time, ties broken by scheduling order.
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    tasks: BTreeMap<(Duration, u64), T>,
    due_by_id: HashMap<u64, Duration>,
    next_seq: u64,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::new(),
            due_by_id: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire once elapsed time reaches `due`.
    pub fn schedule(&mut self, due: Duration, task: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.insert((due, seq), task);
        self.due_by_id.insert(seq, due);
        tracing::trace!(task = seq, due_ms = due.as_millis() as u64, "task scheduled");
        TaskId(seq)
    }

    /// Cancel one task, returning it if it had not fired yet.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let due = self.due_by_id.remove(&id.0)?;
        self.tasks.remove(&(due, id.0))
    }

    /// Cancel everything. Returns how many tasks were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        self.due_by_id.clear();
        if dropped > 0 {
            tracing::debug!(dropped, "pending tasks cancelled");
        }
        dropped
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.keys().next().map(|(due, _)| *due)
    }

    /// Remove and return every task due at or before `now`, in firing order.
    pub fn drain_due(&mut self, now: Duration) -> Vec<(Duration, T)> {
        let mut fired = Vec::new();
        while let Some(entry) = self.tasks.first_entry() {
            let (due, seq) = *entry.key();
            if due > now {
                break;
            }
            let task = entry.remove();
            self.due_by_id.remove(&seq);
            fired.push((due, task));
        }
        fired
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// A view with deferred work that a host runtime advances.
pub trait ViewClock {
    /// Elapsed time at which the next task fires, if any.
    fn next_due(&self) -> Option<Duration>;

    /// Fire every task due at or before `now`. Returns how many fired.
    fn advance(&mut self, now: Duration) -> usize;
}

/// Delays used by the simulated flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Counterpart follow-up after a conversation opens.
    pub chat_follow_up: Duration,
    /// Lower bound (inclusive) of a canned reply delay.
    pub reply_delay_min: Duration,
    /// Upper bound (exclusive) of a canned reply delay.
    pub reply_delay_max: Duration,
    /// Simulated offer after a helper dashboard mounts.
    pub offer_delay: Duration,
    /// Redirect after a booking is confirmed.
    pub booking_redirect: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            chat_follow_up: Duration::from_millis(3000),
            reply_delay_min: Duration::from_millis(1000),
            reply_delay_max: Duration::from_millis(3000),
            offer_delay: Duration::from_millis(3000),
            booking_redirect: Duration::from_millis(3000),
        }
    }
}

impl Timings {
    /// Draw a reply delay uniformly from `[reply_delay_min, reply_delay_max)`.
    ///
    /// An empty range yields the minimum.
    pub fn reply_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let min = self.reply_delay_min.as_millis() as u64;
        let max = self.reply_delay_max.as_millis() as u64;
        if max <= min {
            return self.reply_delay_min;
        }
        Duration::from_millis(rng.random_range(min..max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_drains_in_due_order_then_schedule_order() {
        let mut queue = DeferredQueue::new();
        queue.schedule(ms(300), "c");
        queue.schedule(ms(100), "a");
        queue.schedule(ms(300), "d");
        queue.schedule(ms(200), "b");

        let fired: Vec<_> = queue.drain_due(ms(300)).into_iter().map(|(_, t)| t).collect();
        assert_eq!(fired, vec!["a", "b", "c", "d"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_leaves_future_tasks() {
        let mut queue = DeferredQueue::new();
        queue.schedule(ms(100), 1);
        queue.schedule(ms(500), 2);

        assert_eq!(queue.drain_due(ms(99)).len(), 0);
        assert_eq!(queue.drain_due(ms(100)), vec![(ms(100), 1)]);
        assert_eq!(queue.next_due(), Some(ms(500)));
    }

    #[test]
    fn test_cancel_removes_single_task() {
        let mut queue = DeferredQueue::new();
        let a = queue.schedule(ms(100), "a");
        queue.schedule(ms(100), "b");

        assert_eq!(queue.cancel(a), Some("a"));
        assert_eq!(queue.cancel(a), None);
        assert_eq!(queue.drain_due(ms(100)), vec![(ms(100), "b")]);
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = DeferredQueue::new();
        queue.schedule(ms(1), ());
        queue.schedule(ms(2), ());
        assert_eq!(queue.cancel_all(), 2);
        assert_eq!(queue.next_due(), None);
    }

    #[test]
    fn test_reply_delay_within_bounds() {
        let timings = Timings::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let delay = timings.reply_delay(&mut rng);
            assert!(delay >= ms(1000) && delay < ms(3000), "{delay:?}");
        }
    }

    #[test]
    fn test_reply_delay_empty_range() {
        let timings = Timings {
            reply_delay_min: ms(50),
            reply_delay_max: ms(50),
            ..Timings::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(timings.reply_delay(&mut rng), ms(50));
    }
}
