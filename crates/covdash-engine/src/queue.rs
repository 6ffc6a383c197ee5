//! Cooperative delayed-task queue.
//!
//! An explicit min-heap keyed by fire time, with a monotonic enqueue counter
//! breaking ties FIFO. There are no timer threads and nothing blocks: tasks
//! only run when a caller drains due entries with [`TaskQueue::pop_due`], so
//! progress depends on the serving path polling.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use chrono::{DateTime, Duration, Utc};

/// Opaque handle to a scheduled task, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Entry<T> {
    fire_at: DateTime<Utc>,
    seq: u64,
    payload: T,
}

// Heap order: earliest fire time first, FIFO among equal times. BinaryHeap
// is a max-heap, so the comparison is reversed.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.fire_at, other.seq).cmp(&(self.fire_at, self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

/// Priority queue of delayed tasks, drained explicitly by polling.
///
/// Cancellation is tombstone-based: a cancelled entry stays in the heap and
/// is discarded when it surfaces at the top.
#[derive(Debug)]
pub struct TaskQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    live: HashSet<u64>,
    next_seq: u64,
}

impl<T> TaskQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashSet::new(),
            next_seq: 0,
        }
    }

    /// Schedule `payload` to fire at `fire_at`.
    pub fn schedule_at(&mut self, fire_at: DateTime<Utc>, payload: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            fire_at,
            seq,
            payload,
        });
        self.live.insert(seq);
        TaskId(seq)
    }

    /// Schedule `payload` to fire `delay_secs` after `now`.
    ///
    /// A negative delay puts the fire time in the past, making the task due
    /// on the next poll.
    pub fn schedule_after(&mut self, now: DateTime<Utc>, delay_secs: i64, payload: T) -> TaskId {
        self.schedule_at(now + Duration::seconds(delay_secs), payload)
    }

    /// Cancel a pending task.
    ///
    /// Best-effort: returns `false` (and changes nothing) when the task
    /// already fired or was already cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.live.remove(&id.0)
    }

    /// Remove and return the earliest task whose fire time is at or before
    /// `now`.
    ///
    /// Returns `None` when nothing is due; never waits for a future task.
    /// Callers loop to drain everything due, and may schedule new tasks
    /// between pops.
    pub fn pop_due(&mut self, now: DateTime<Utc>) -> Option<(TaskId, T)> {
        while let Some(head) = self.heap.peek() {
            if !self.live.contains(&head.seq) {
                self.heap.pop();
                continue;
            }
            if head.fire_at > now {
                return None;
            }
            let entry = self.heap.pop()?;
            self.live.remove(&entry.seq);
            return Some((TaskId(entry.seq), entry.payload));
        }
        None
    }

    /// Fire time of a pending task; `None` once it fired or was cancelled.
    #[must_use]
    pub fn fire_at(&self, id: TaskId) -> Option<DateTime<Utc>> {
        if !self.live.contains(&id.0) {
            return None;
        }
        self.heap
            .iter()
            .find(|entry| entry.seq == id.0)
            .map(|entry| entry.fire_at)
    }

    /// Whether the task is still waiting to fire.
    #[must_use]
    pub fn pending(&self, id: TaskId) -> bool {
        self.live.contains(&id.0)
    }

    /// Number of pending tasks (fired and cancelled ones excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 10, 28, 10, 0, 0).unwrap()
    }

    #[test]
    fn pops_in_fire_time_order() {
        let now = base();
        let mut queue = TaskQueue::new();
        queue.schedule_after(now, -30, "second");
        queue.schedule_after(now, -60, "first");
        queue.schedule_after(now, 0, "third");

        assert_eq!(queue.pop_due(now).unwrap().1, "first");
        assert_eq!(queue.pop_due(now).unwrap().1, "second");
        assert_eq!(queue.pop_due(now).unwrap().1, "third");
        assert!(queue.pop_due(now).is_none());
    }

    #[test]
    fn equal_fire_times_pop_fifo() {
        let now = base();
        let mut queue = TaskQueue::new();
        queue.schedule_at(now, "a");
        queue.schedule_at(now, "b");
        queue.schedule_at(now, "c");

        assert_eq!(queue.pop_due(now).unwrap().1, "a");
        assert_eq!(queue.pop_due(now).unwrap().1, "b");
        assert_eq!(queue.pop_due(now).unwrap().1, "c");
    }

    #[test]
    fn future_tasks_are_not_due() {
        let now = base();
        let mut queue = TaskQueue::new();
        let id = queue.schedule_after(now, 60, "later");

        assert!(queue.pop_due(now).is_none());
        assert!(queue.pending(id));
        assert_eq!(queue.pop_due(now + Duration::seconds(60)).unwrap().1, "later");
    }

    #[test]
    fn negative_delay_is_due_immediately() {
        let now = base();
        let mut queue = TaskQueue::new();
        queue.schedule_after(now, -3600, "overdue");
        assert_eq!(queue.pop_due(now).unwrap().1, "overdue");
    }

    #[test]
    fn cancelled_tasks_never_pop() {
        let now = base();
        let mut queue = TaskQueue::new();
        let id = queue.schedule_after(now, -1, "doomed");

        assert!(queue.cancel(id));
        assert!(!queue.pending(id));
        assert!(queue.pop_due(now).is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn cancel_after_fire_is_a_noop() {
        let now = base();
        let mut queue = TaskQueue::new();
        let id = queue.schedule_after(now, 0, "fired");

        assert!(queue.pop_due(now).is_some());
        assert!(!queue.cancel(id));
        assert!(!queue.cancel(id));
    }

    #[test]
    fn tasks_scheduled_between_pops_are_honoured() {
        let now = base();
        let mut queue = TaskQueue::new();
        queue.schedule_after(now, 0, 1);

        let mut fired = Vec::new();
        while let Some((_, n)) = queue.pop_due(now) {
            fired.push(n);
            if n == 1 {
                // An action re-arming itself lands back in the same queue.
                queue.schedule_after(now, -1, 2);
                queue.schedule_after(now, 3600, 3);
            }
        }

        assert_eq!(fired, vec![1, 2]);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn fire_at_reports_pending_tasks_only() {
        let now = base();
        let mut queue = TaskQueue::new();
        let id = queue.schedule_after(now, 120, "watched");

        assert_eq!(queue.fire_at(id), Some(now + Duration::seconds(120)));
        queue.cancel(id);
        assert_eq!(queue.fire_at(id), None);
    }
}
