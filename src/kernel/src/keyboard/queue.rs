//! Interrupt-fed scancode queue.
//!
//! The keyboard interrupt handler is the only producer and the main loop the
//! only consumer. The handler never blocks: when the queue is full the byte is
//! dropped and counted.

use super::source::ScancodeSource;
use crate::config;
use core::sync::atomic::{AtomicUsize, Ordering};
use crossbeam_queue::ArrayQueue;
use spin::Once;

/// Queue filled by the keyboard interrupt handler.
pub static SCANCODE_QUEUE: Once<ScancodeQueue> = Once::new();

/// Creates the global queue. Idempotent.
pub fn init() -> &'static ScancodeQueue {
    SCANCODE_QUEUE.call_once(|| ScancodeQueue::new(config::SCANCODE_QUEUE_CAPACITY))
}

/// Called by the keyboard interrupt handler to add a scancode to the queue.
///
/// Bytes arriving before [`init`] are dropped.
pub fn add_scancode(scancode: u8) {
    if let Some(queue) = SCANCODE_QUEUE.get() {
        queue.push(scancode);
    }
}

/// Bounded single-producer/single-consumer scancode buffer.
pub struct ScancodeQueue {
    queue: ArrayQueue<u8>,
    dropped: AtomicUsize,
}

impl ScancodeQueue {
    /// A queue holding up to `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        ScancodeQueue {
            queue: ArrayQueue::new(capacity),
            dropped: AtomicUsize::new(0),
        }
    }

    /// Enqueues a byte, dropping it if the queue is full.
    pub fn push(&self, scancode: u8) {
        if self.queue.push(scancode).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Dequeues the oldest byte.
    pub fn pop(&self) -> Option<u8> {
        self.queue.pop()
    }

    /// Whether no byte is waiting.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Bytes lost to a full queue so far.
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Logs bytes dropped since `reported` was last updated.
    ///
    /// Returns how many were new. Must not be called from the interrupt
    /// handler, since logging takes the serial lock.
    pub fn report_drops(&self, reported: &mut usize) -> usize {
        let dropped = self.dropped();
        let new = dropped.wrapping_sub(*reported);
        if new != 0 {
            log::warn!("scancode queue full, {} dropped", new);
            *reported = dropped;
        }
        new
    }
}

impl ScancodeSource for &ScancodeQueue {
    fn next_scancode(&mut self) -> Option<u8> {
        self.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_preserves_order() {
        let queue = ScancodeQueue::new(4);
        queue.push(0xE0);
        queue.push(0x48);
        let mut source = &queue;
        assert_eq!(source.next_scancode(), Some(0xE0));
        assert_eq!(source.next_scancode(), Some(0x48));
        assert_eq!(source.next_scancode(), None);
    }

    #[test]
    fn test_queue_drops_when_full() {
        let queue = ScancodeQueue::new(2);
        queue.push(1);
        queue.push(2);
        queue.push(3);
        assert_eq!(queue.dropped(), 1);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_drops_are_reported_once() {
        let queue = ScancodeQueue::new(1);
        let mut reported = 0;
        assert_eq!(queue.report_drops(&mut reported), 0);

        for byte in 0..4 {
            queue.push(byte);
        }
        assert!(!queue.is_empty());
        assert_eq!(queue.report_drops(&mut reported), 3);
        assert_eq!(reported, 3);
        assert_eq!(queue.report_drops(&mut reported), 0);

        queue.pop();
        assert!(queue.is_empty());
        queue.push(9);
        queue.push(10);
        assert_eq!(queue.report_drops(&mut reported), 1);
    }

    #[test]
    fn test_global_queue_init_is_idempotent() {
        let first = init() as *const ScancodeQueue;
        let second = init() as *const ScancodeQueue;
        assert_eq!(first, second);
    }
}
