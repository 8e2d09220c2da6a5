//! Bounded single-producer/single-consumer word FIFO.
//!
//! [`Fifo`] is a fixed-capacity ring buffer whose capacity `N` is a power of
//! two. The read and write pointers run over `0..2N`, one bit wider than the
//! slot index, so a full FIFO and an empty one are told apart by the extra
//! wrap bit:
//!
//! - empty: `write == read`
//! - full: same slot index, different wrap bit
//! - length: `(write - read) mod 2N`
//!
//! Used from one context the FIFO is driven through `&mut self`. To hand the
//! two ends to different contexts (an interrupt handler ticking the engine
//! and the application draining it, or two threads), call [`Fifo::split`].
//! The write pointer is then stored only by the [`Producer`] and the read
//! pointer only by the [`Consumer`]; each side loads the other's pointer to
//! decide full/empty.

mod split;

pub use split::{Consumer, Producer};

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::driver::config::{FifoConfig, Word};
use crate::driver::error::{ConfigError, ConfigResult};
use crate::internal::constants::DEFAULT_FIFO_DEPTH;

/// Point-in-time view of a FIFO's fill level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoStatus {
    /// Words currently stored
    pub len: usize,
    /// Slot count
    pub capacity: usize,
    /// No free slot left
    pub full: bool,
    /// Nothing stored
    pub empty: bool,
    /// Free slots at or below the near-full mark
    pub near_full: bool,
    /// Stored words at or below the near-empty mark
    pub near_empty: bool,
}

/// Fixed-capacity SPSC ring buffer
///
/// # Type Parameters
/// * `T` - Element type (a protocol [`Word`](crate::Word) in this crate)
/// * `N` - Capacity, a non-zero power of two
pub struct Fifo<T, const N: usize> {
    slots: [UnsafeCell<MaybeUninit<T>>; N],
    write: AtomicUsize,
    read: AtomicUsize,
    config: FifoConfig,
}

// SAFETY: shared references only reach the pointer queries. Slot access goes
// through `&mut Fifo` or through the unique Producer/Consumer pair handed out
// by `split`, which confine each pointer to one writer.
unsafe impl<T: Send, const N: usize> Sync for Fifo<T, N> {}

impl<T: Copy, const N: usize> Fifo<T, N> {
    const INDEX_MASK: usize = N.wrapping_sub(1);
    const PTR_MASK: usize = (2 * N).wrapping_sub(1);

    /// Create an empty FIFO
    ///
    /// # Errors
    ///
    /// - [`ConfigError::CapacityNotPowerOfTwo`] if `N` is zero or not a power of two
    /// - [`ConfigError::ThresholdOutOfRange`] if a mark in `config` exceeds `N`
    pub const fn new(config: FifoConfig) -> ConfigResult<Self> {
        if !N.is_power_of_two() {
            return Err(ConfigError::CapacityNotPowerOfTwo);
        }
        if let Err(e) = config.validate(N) {
            return Err(e);
        }
        Ok(Self {
            slots: [const { UnsafeCell::new(MaybeUninit::uninit()) }; N],
            write: AtomicUsize::new(0),
            read: AtomicUsize::new(0),
            config,
        })
    }

    // =========================================================================
    // Pointer Arithmetic
    // =========================================================================

    #[inline(always)]
    const fn count(write: usize, read: usize) -> usize {
        write.wrapping_sub(read) & Self::PTR_MASK
    }

    #[inline(always)]
    const fn next(ptr: usize) -> usize {
        (ptr + 1) & Self::PTR_MASK
    }

    #[inline(always)]
    fn pointers(&self) -> (usize, usize) {
        (
            self.write.load(Ordering::Acquire),
            self.read.load(Ordering::Acquire),
        )
    }

    fn status_from(&self, write: usize, read: usize) -> FifoStatus {
        let len = Self::count(write, read);
        FifoStatus {
            len,
            capacity: N,
            full: len == N,
            empty: len == 0,
            near_full: N - len <= self.config.near_full,
            near_empty: len <= self.config.near_empty,
        }
    }

    // =========================================================================
    // Slot Access
    // =========================================================================

    /// Append at the write pointer
    ///
    /// # Safety
    ///
    /// The caller must be the only context pushing into this FIFO.
    unsafe fn enqueue(&self, value: T) -> bool {
        let write = self.write.load(Ordering::Relaxed);
        let read = self.read.load(Ordering::Acquire);
        if Self::count(write, read) == N {
            return false;
        }

        // SAFETY: the slot at `write` is outside the consumer's readable range
        // until the Release store below publishes it.
        unsafe {
            (*self.slots[write & Self::INDEX_MASK].get()).write(value);
        }
        self.write.store(Self::next(write), Ordering::Release);
        true
    }

    /// Take the word at the read pointer
    ///
    /// # Safety
    ///
    /// The caller must be the only context popping from this FIFO.
    unsafe fn dequeue(&self) -> Option<T> {
        let read = self.read.load(Ordering::Relaxed);
        let write = self.write.load(Ordering::Acquire);
        if write == read {
            return None;
        }

        // SAFETY: `read != write`, so the producer initialized this slot and
        // published it with Release; it will not reuse it until the store below.
        let value = unsafe { (*self.slots[read & Self::INDEX_MASK].get()).assume_init_read() };
        self.read.store(Self::next(read), Ordering::Release);
        Some(value)
    }

    // =========================================================================
    // Single-Context Operations
    // =========================================================================

    /// Push a word; `false` when full (the word is not stored)
    pub fn try_push(&mut self, value: T) -> bool {
        // SAFETY: `&mut self` excludes every other producer.
        unsafe { self.enqueue(value) }
    }

    /// Pop the oldest word; `None` when empty
    pub fn try_pop(&mut self) -> Option<T> {
        // SAFETY: `&mut self` excludes every other consumer.
        unsafe { self.dequeue() }
    }

    /// Discard all stored words
    pub fn clear(&mut self) {
        *self.write.get_mut() = 0;
        *self.read.get_mut() = 0;
    }

    /// Split into producer and consumer ends
    ///
    /// The FIFO stays borrowed for as long as either end lives.
    pub fn split(&mut self) -> (Producer<'_, T, N>, Consumer<'_, T, N>) {
        let fifo = &*self;
        (Producer::new(fifo), Consumer::new(fifo))
    }

    // =========================================================================
    // Status Queries
    // =========================================================================

    /// Slot count
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Threshold configuration
    #[inline(always)]
    pub const fn config(&self) -> &FifoConfig {
        &self.config
    }

    /// Words currently stored
    pub fn len(&self) -> usize {
        let (write, read) = self.pointers();
        Self::count(write, read)
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        let (write, read) = self.pointers();
        write == read
    }

    /// True when every slot is taken
    pub fn is_full(&self) -> bool {
        let (write, read) = self.pointers();
        (write & Self::INDEX_MASK) == (read & Self::INDEX_MASK) && write != read
    }

    /// True when free slots are at or below the near-full mark
    pub fn is_near_full(&self) -> bool {
        self.status().near_full
    }

    /// True when stored words are at or below the near-empty mark
    pub fn is_near_empty(&self) -> bool {
        self.status().near_empty
    }

    /// Consistent snapshot of all status flags
    pub fn status(&self) -> FifoStatus {
        let (write, read) = self.pointers();
        self.status_from(write, read)
    }
}

/// Word FIFO with the default depth (16 words)
pub type WordFifoDefault = Fifo<Word, DEFAULT_FIFO_DEPTH>;

/// Small word FIFO for memory-constrained systems
pub type WordFifoSmall = Fifo<Word, 4>;

/// Large word FIFO for long bursts
pub type WordFifoLarge = Fifo<Word, 64>;

impl<T, const N: usize> core::fmt::Debug for Fifo<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Fifo")
            .field("capacity", &N)
            .field("write", &self.write.load(Ordering::Relaxed))
            .field("read", &self.read.load(Ordering::Relaxed))
            .field("config", &self.config)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
