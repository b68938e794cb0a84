use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use crate::containers::KeyedVec;
use crate::marrow_asserts::marrow_assert_moderate;
use crate::propagation::Priority;
use crate::propagation::PropagatorId;

/// The propagators scheduled for execution, one FIFO queue per [`Priority`].
///
/// The queue has set semantics: enqueueing an already scheduled propagator is a no-op.
#[derive(Debug, Clone)]
pub(crate) struct PropagatorQueue {
    queues: Vec<VecDeque<PropagatorId>>,
    is_enqueued: KeyedVec<PropagatorId, bool>,
    num_enqueued: usize,
    present_priorities: BinaryHeap<Reverse<u8>>,
}

impl Default for PropagatorQueue {
    fn default() -> Self {
        PropagatorQueue {
            queues: vec![VecDeque::new(); Priority::NUM_PRIORITIES],
            is_enqueued: KeyedVec::default(),
            num_enqueued: 0,
            present_priorities: BinaryHeap::new(),
        }
    }
}

impl PropagatorQueue {
    pub(crate) fn is_empty(&self) -> bool {
        self.num_enqueued == 0
    }

    pub(crate) fn enqueue_propagator(&mut self, propagator_id: PropagatorId, priority: Priority) {
        if self.is_propagator_enqueued(propagator_id) {
            return;
        }

        self.is_enqueued.accomodate(propagator_id, false);
        self.is_enqueued[propagator_id] = true;
        self.num_enqueued += 1;

        if self.queues[priority as usize].is_empty() {
            self.present_priorities.push(Reverse(priority as u8));
        }
        self.queues[priority as usize].push_back(propagator_id);
    }

    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let Reverse(top_priority) = *self.present_priorities.peek()?;
        let queue = &mut self.queues[top_priority as usize];
        marrow_assert_moderate!(!queue.is_empty());

        let propagator_id = queue.pop_front()?;
        if queue.is_empty() {
            let _ = self.present_priorities.pop();
        }

        self.is_enqueued[propagator_id] = false;
        self.num_enqueued -= 1;

        Some(propagator_id)
    }

    pub(crate) fn clear(&mut self) {
        for queue in self.queues.iter_mut() {
            queue.clear();
        }

        for is_propagator_enqueued in self.is_enqueued.iter_mut() {
            *is_propagator_enqueued = false;
        }

        self.present_priorities.clear();
        self.num_enqueued = 0;
    }

    pub(crate) fn is_propagator_enqueued(&self, propagator_id: PropagatorId) -> bool {
        self.is_enqueued
            .get(propagator_id)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::PropagatorQueue;
    use crate::propagation::Priority;
    use crate::propagation::PropagatorId;

    #[test]
    fn higher_priorities_are_popped_first() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(1), Priority::High);
        queue.enqueue_propagator(PropagatorId(0), Priority::Medium);
        queue.enqueue_propagator(PropagatorId(3), Priority::VeryLow);
        queue.enqueue_propagator(PropagatorId(4), Priority::Low);

        assert_eq!(Some(PropagatorId(1)), queue.pop());
        assert_eq!(Some(PropagatorId(0)), queue.pop());
        assert_eq!(Some(PropagatorId(4)), queue.pop());
        assert_eq!(Some(PropagatorId(3)), queue.pop());
        assert_eq!(None, queue.pop());
    }

    #[test]
    fn equal_priorities_are_popped_in_insertion_order() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(2), Priority::Low);
        queue.enqueue_propagator(PropagatorId(0), Priority::Low);
        queue.enqueue_propagator(PropagatorId(1), Priority::Low);

        assert_eq!(Some(PropagatorId(2)), queue.pop());
        assert_eq!(Some(PropagatorId(0)), queue.pop());
        assert_eq!(Some(PropagatorId(1)), queue.pop());
    }

    #[test]
    fn enqueueing_twice_schedules_once() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(0), Priority::High);
        queue.enqueue_propagator(PropagatorId(0), Priority::High);

        assert_eq!(Some(PropagatorId(0)), queue.pop());
        assert!(queue.is_empty());
        assert_eq!(None, queue.pop());

        queue.enqueue_propagator(PropagatorId(0), Priority::High);
        queue.clear();
        assert!(!queue.is_propagator_enqueued(PropagatorId(0)));
        assert!(queue.is_empty());
    }
}
