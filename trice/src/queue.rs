//! Word-granular event queue
//!
//! The queue stores trice words between the instrumented code (producers) and the frame
//! builder (the only consumer). Storage is a `heapless::spsc::Queue` embedded in the queue
//! object, so it can be placed into a static cell at startup and requires no allocation.
//!
//! [`EventQueue::split`] hands out one [`Producer`] and one [`Consumer`]. Both ends are
//! lock-free and may run in different execution contexts, e.g. the main loop pushing and the
//! UART interrupt popping. Producers at several interrupt priorities share the single
//! producer end through a [`SharedProducer`], which serializes pushes with an
//! `M: RawMutex`:
//! * _CriticalSectionRawMutex_ for producers running at several interrupt priorities.
//!   Each push is a critical section of a few instructions.
//! * _ThreadModeRawMutex_ if all producers run in thread mode.
//! * _NoopRawMutex_ if all producers run in one execution context.
//!
//! The consumer end never takes the lock.

use core::cell::RefCell;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use heapless::spsc;

use crate::config::ByteOrder;
use crate::frame::Payload;

/// Opaque 32-bit unit of queue storage
///
/// A word is either an (ID, data) trice pair or a continuation of a longer trice. The layout
/// is defined by the producer-side encoding; the stack copies words verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Word(u32);

impl Word {
    pub const ZERO: Word = Word(0);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn into_u32(self) -> u32 {
        self.0
    }

    pub const fn to_bytes(self, order: ByteOrder) -> Payload {
        match order {
            ByteOrder::Little => self.0.to_le_bytes(),
            ByteOrder::Big => self.0.to_be_bytes(),
        }
    }
}

impl From<u32> for Word {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Word> for u32 {
    fn from(value: Word) -> Self {
        value.into_u32()
    }
}

/// Fixed-capacity single-producer single-consumer queue of trice words
///
/// `N` is the storage size, the queue holds up to `N - 1` words. `N` must be greater than 1.
pub struct EventQueue<const N: usize> {
    words: spsc::Queue<Word, N>,
}

impl<const N: usize> EventQueue<N> {
    pub const fn new() -> Self {
        Self {
            words: spsc::Queue::new(),
        }
    }

    /// Splits the queue into its producer and consumer ends.
    pub fn split(&mut self) -> (Producer<'_, N>, Consumer<'_, N>) {
        let (producer, consumer) = self.words.split();
        (
            Producer {
                inner: producer,
                overflow_count: 0,
            },
            Consumer { inner: consumer },
        )
    }

    /// Maximum number of queued words
    pub const fn capacity(&self) -> usize {
        N - 1
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer end of an [`EventQueue`]
pub struct Producer<'a, const N: usize> {
    inner: spsc::Producer<'a, Word, N>,
    overflow_count: u32,
}

impl<'a, const N: usize> Producer<'a, N> {
    /// Appends a word, dropping it if the queue is full.
    ///
    /// Dropped words are only counted, see [`Producer::overflow_count`].
    pub fn push(&mut self, word: Word) {
        let _ = self.try_push(word);
    }

    /// Appends a word or returns it back if the queue is full.
    pub fn try_push(&mut self, word: Word) -> Result<(), Word> {
        let res = self.inner.enqueue(word);
        if res.is_err() {
            self.overflow_count = self.overflow_count.wrapping_add(1);
            trace!("event queue full, word dropped");
        }
        res
    }

    /// Number of words waiting for the consumer
    pub fn depth(&self) -> usize {
        self.inner.len()
    }

    /// Number of words dropped because the queue was full, wrapping at `u32::MAX`
    pub fn overflow_count(&self) -> u32 {
        self.overflow_count
    }

    /// Wraps the producer end for use from several contexts.
    pub fn into_shared<M: RawMutex>(self) -> SharedProducer<'a, M, N> {
        SharedProducer::new(self)
    }
}

/// Producer end shared by several producing contexts
///
/// Pushes are serialized with `M`. A `&SharedProducer` can be copied into every producing
/// context; with a `Sync` mutex type the shared producer can live in a static.
pub struct SharedProducer<'a, M: RawMutex, const N: usize> {
    producer: Mutex<M, RefCell<Producer<'a, N>>>,
}

impl<'a, M: RawMutex, const N: usize> SharedProducer<'a, M, N> {
    pub fn new(producer: Producer<'a, N>) -> Self {
        Self {
            producer: Mutex::new(RefCell::new(producer)),
        }
    }

    /// See [`Producer::push`].
    pub fn push(&self, word: Word) {
        self.with_producer(|producer| producer.push(word))
    }

    /// See [`Producer::try_push`].
    pub fn try_push(&self, word: Word) -> Result<(), Word> {
        self.with_producer(|producer| producer.try_push(word))
    }

    pub fn depth(&self) -> usize {
        self.with_producer(|producer| producer.depth())
    }

    pub fn overflow_count(&self) -> u32 {
        self.with_producer(|producer| producer.overflow_count())
    }

    fn with_producer<T>(&self, f: impl FnOnce(&mut Producer<'a, N>) -> T) -> T {
        self.producer.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

/// Consumer end of an [`EventQueue`]
///
/// There is exactly one consumer per split; the frame builder owns it.
pub struct Consumer<'a, const N: usize> {
    inner: spsc::Consumer<'a, Word, N>,
}

impl<'a, const N: usize> Consumer<'a, N> {
    /// Removes the oldest word.
    pub fn pop(&mut self) -> Option<Word> {
        self.inner.dequeue()
    }

    pub fn depth(&self) -> usize {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_fifo_order() {
        let mut queue = EventQueue::<8>::new();
        let (mut producer, mut consumer) = queue.split();

        for value in 0..5 {
            producer.push(Word::new(value));
        }
        assert_eq!(consumer.depth(), 5);

        for value in 0..5 {
            assert_eq!(consumer.pop(), Some(Word::new(value)));
        }
        assert_eq!(consumer.pop(), None);
        assert_eq!(producer.depth(), 0);
    }

    #[test]
    fn test_overflow_drops_newest() {
        let mut queue = EventQueue::<4>::new();
        assert_eq!(queue.capacity(), 3);
        let (mut producer, mut consumer) = queue.split();

        for value in 0..3 {
            assert_eq!(producer.try_push(Word::new(value)), Ok(()));
        }
        assert_eq!(producer.try_push(Word::new(3)), Err(Word::new(3)));
        producer.push(Word::new(4));
        assert_eq!(producer.depth(), 3);
        assert_eq!(producer.overflow_count(), 2);

        for value in 0..3 {
            assert_eq!(consumer.pop(), Some(Word::new(value)));
        }
        assert_eq!(consumer.pop(), None);

        // space is available again
        assert_eq!(producer.try_push(Word::new(5)), Ok(()));
        assert_eq!(consumer.pop(), Some(Word::new(5)));
    }

    #[test]
    fn test_wrap_around() {
        let mut queue = EventQueue::<4>::new();
        let (mut producer, mut consumer) = queue.split();

        // many times around the storage, every fill level
        for round in 0..100u32 {
            let count = round % 4;
            for value in 0..count {
                assert_eq!(producer.try_push(Word::new(round << 8 | value)), Ok(()));
            }
            assert_eq!(consumer.depth(), count as usize);
            for value in 0..count {
                assert_eq!(consumer.pop(), Some(Word::new(round << 8 | value)));
            }
            assert_eq!(consumer.pop(), None);
        }
        assert_eq!(producer.overflow_count(), 0);
    }

    #[test]
    fn test_interleaved_push_pop() {
        let mut queue = EventQueue::<4>::new();
        let (mut producer, mut consumer) = queue.split();

        for value in 0..10 {
            producer.push(Word::new(value));
            producer.push(Word::new(value + 100));
            assert_eq!(consumer.pop(), Some(Word::new(value)));
            assert_eq!(consumer.pop(), Some(Word::new(value + 100)));
        }
        assert_eq!(producer.overflow_count(), 0);
    }

    #[test]
    fn test_shared_producer() {
        let mut queue = EventQueue::<4>::new();
        let (producer, mut consumer) = queue.split();
        let shared = producer.into_shared::<NoopRawMutex>();

        let isr_a = |p: &SharedProducer<'_, NoopRawMutex, 4>| p.push(Word::new(0xa));
        let isr_b = |p: &SharedProducer<'_, NoopRawMutex, 4>| p.push(Word::new(0xb));
        isr_a(&shared);
        isr_b(&shared);
        isr_a(&shared);
        assert_eq!(shared.try_push(Word::new(0xc)), Err(Word::new(0xc)));
        assert_eq!(shared.depth(), 3);
        assert_eq!(shared.overflow_count(), 1);

        assert_eq!(consumer.pop(), Some(Word::new(0xa)));
        assert_eq!(consumer.pop(), Some(Word::new(0xb)));
        assert_eq!(consumer.pop(), Some(Word::new(0xa)));
        assert_eq!(consumer.pop(), None);
    }

    #[test]
    fn test_word_bytes() {
        let word = Word::new(0x0001_0002);
        assert_eq!(word.to_bytes(ByteOrder::Little), [0x02, 0x00, 0x01, 0x00]);
        assert_eq!(word.to_bytes(ByteOrder::Big), [0x00, 0x01, 0x00, 0x02]);
        assert_eq!(u32::from(word), 0x0001_0002);
    }
}
