//! Producer and consumer ends of a split FIFO

use super::{Fifo, FifoStatus};

/// Write end of a split [`Fifo`]
///
/// Only one producer exists per borrow of the FIFO. It may be moved to
/// another context (thread or interrupt handler) while the [`Consumer`]
/// stays behind.
pub struct Producer<'a, T, const N: usize> {
    fifo: &'a Fifo<T, N>,
}

/// Read end of a split [`Fifo`]
pub struct Consumer<'a, T, const N: usize> {
    fifo: &'a Fifo<T, N>,
}

impl<'a, T: Copy, const N: usize> Producer<'a, T, N> {
    pub(super) fn new(fifo: &'a Fifo<T, N>) -> Self {
        Self { fifo }
    }

    /// Push a word; `false` when full (the word is not stored)
    pub fn try_push(&mut self, value: T) -> bool {
        // SAFETY: `split` hands out exactly one producer per `&mut Fifo`
        // borrow and `&mut self` serializes its use.
        unsafe { self.fifo.enqueue(value) }
    }

    /// Slot count
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Words currently stored
    pub fn len(&self) -> usize {
        self.fifo.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.fifo.is_empty()
    }

    /// True when a push would fail
    pub fn is_full(&self) -> bool {
        self.fifo.is_full()
    }

    /// True when free slots are at or below the near-full mark
    pub fn is_near_full(&self) -> bool {
        self.fifo.is_near_full()
    }

    /// Snapshot of the FIFO status
    pub fn status(&self) -> FifoStatus {
        self.fifo.status()
    }
}

impl<'a, T: Copy, const N: usize> Consumer<'a, T, N> {
    pub(super) fn new(fifo: &'a Fifo<T, N>) -> Self {
        Self { fifo }
    }

    /// Pop the oldest word; `None` when empty
    pub fn try_pop(&mut self) -> Option<T> {
        // SAFETY: `split` hands out exactly one consumer per `&mut Fifo`
        // borrow and `&mut self` serializes its use.
        unsafe { self.fifo.dequeue() }
    }

    /// Slot count
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Words currently stored
    pub fn len(&self) -> usize {
        self.fifo.len()
    }

    /// True when a pop would fail
    pub fn is_empty(&self) -> bool {
        self.fifo.is_empty()
    }

    /// True when every slot is taken
    pub fn is_full(&self) -> bool {
        self.fifo.is_full()
    }

    /// True when stored words are at or below the near-empty mark
    pub fn is_near_empty(&self) -> bool {
        self.fifo.is_near_empty()
    }

    /// Snapshot of the FIFO status
    pub fn status(&self) -> FifoStatus {
        self.fifo.status()
    }
}

impl<T, const N: usize> core::fmt::Debug for Producer<'_, T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Producer").field("fifo", self.fifo).finish()
    }
}

impl<T, const N: usize> core::fmt::Debug for Consumer<'_, T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Consumer").field("fifo", self.fifo).finish()
    }
}
