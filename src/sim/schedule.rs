//! Scheduled one-shot events
//!
//! Delayed effects (death confirmation, bottle respawn, end-of-animation
//! win/lose) are queued here keyed by logical due time and polled once per
//! logic tick. Events due at the same time fire in insertion order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// What to do when an entry comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Scheduled {
    /// A dead roaming enemy may now be culled
    MarkRemovable { enemy_id: u32 },
    /// Put a collected bottle back on the field
    RespawnBottle { bottle_id: u32 },
    /// Character death animation finished
    CharacterDeathComplete,
    /// Boss death animation finished
    BossDeathComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due_ms: u64,
    seq: u64,
    event: Scheduled,
}

/// Min-queue of pending events for one World
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire once `now >= due_ms`
    pub fn push(&mut self, due_ms: u64, event: Scheduled) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { due_ms, seq, event }));
    }

    /// Remove and return every event due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Vec<Scheduled> {
        let mut due = Vec::new();
        while let Some(Reverse(entry)) = self.heap.peek() {
            if entry.due_ms > now_ms {
                break;
            }
            if let Some(Reverse(entry)) = self.heap.pop() {
                due.push(entry.event);
            }
        }
        due
    }

    /// Drop everything still pending
    pub fn cancel_all(&mut self) {
        if !self.heap.is_empty() {
            log::debug!("Cancelling {} scheduled events", self.heap.len());
        }
        self.heap.clear();
    }

    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(e)| e.due_ms)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut s = Schedule::new();
        s.push(300, Scheduled::BossDeathComplete);
        s.push(100, Scheduled::MarkRemovable { enemy_id: 1 });
        s.push(200, Scheduled::RespawnBottle { bottle_id: 2 });

        assert!(s.pop_due(50).is_empty());
        assert_eq!(s.pop_due(200), vec![
            Scheduled::MarkRemovable { enemy_id: 1 },
            Scheduled::RespawnBottle { bottle_id: 2 },
        ]);
        assert_eq!(s.next_due(), Some(300));
        assert_eq!(s.pop_due(1000), vec![Scheduled::BossDeathComplete]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_same_due_keeps_insertion_order() {
        let mut s = Schedule::new();
        s.push(10, Scheduled::MarkRemovable { enemy_id: 9 });
        s.push(10, Scheduled::MarkRemovable { enemy_id: 3 });
        assert_eq!(s.pop_due(10), vec![
            Scheduled::MarkRemovable { enemy_id: 9 },
            Scheduled::MarkRemovable { enemy_id: 3 },
        ]);
    }

    #[test]
    fn test_cancel_all() {
        let mut s = Schedule::new();
        s.push(10, Scheduled::CharacterDeathComplete);
        s.cancel_all();
        assert!(s.pop_due(u64::MAX).is_empty());
        assert_eq!(s.len(), 0);
    }
}
