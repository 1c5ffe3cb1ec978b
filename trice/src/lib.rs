//! # Trice
//!
//! This library moves compact binary trace events ("trices") from instrumented embedded code
//! to a serial line in no_std environments. It requires no dynamic memory allocation, never
//! blocks, and does O(1) work per call, so the transmit step can run inside the
//! "data register empty" interrupt handler.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐
//! │ Producers │ push(word)
//! └─────┬─────┘
//!       ▼
//! ┌────────────┐  pop  ┌──────────────┐ byte ┌──────────┐
//! │ EventQueue ├──────►│ FrameBuilder ├─────►│ TxPort   │
//! └────────────┘       └──────▲───────┘      └────┬─────┘
//!                             │ Transmitter       │
//!                             └─────── handle ◄───┘
//!                                  (register empty)
//! ```
//! Components:
//! * _EventQueue_ is a fixed-capacity queue of 32-bit trice words. It is split into a
//!   producer end and a consumer end; the producer end may be shared between contexts.
//! * _FrameBuilder_ owns the consumer. Whenever the current frame is exhausted, it pops one
//!   word and turns it into an 8-byte frame: start byte, two addresses, an exclusive-or
//!   checksum and the 4-byte payload. The frame is optionally encrypted with a block cipher.
//! * _Transmitter_ owns the frame builder and the serial port. Each call writes at most one
//!   byte and switches the "data register empty" interrupt on or off.
//! * _TxHandler_ is the entry point a board calls; it becomes a no-op when tracing is
//!   configured off.
//!
//! ## Concurrency model
//!
//! Words are transmitted in push order and every frame carries exactly one word. The
//! transmitter drains one frame byte by byte while producers keep pushing; the queue indices
//! are the only shared state. The queue is lock-free for one producer and one consumer.
//! Producers at several priorities share the producer end under a `RawMutex`, see the
//! [`queue`] module for the options.
//!
//! ## Limitations
//!
//! * Queue overflow drops the newest word. There is no back-pressure toward producers.
//! * There are no retransmissions. Receivers discard frames with a bad checksum.
//! * Pushing a word does not restart an idle transmitter by itself.
#![no_std]

pub use trice_driver::{frame, port};

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod builder;
pub mod cipher;
pub mod config;
pub mod queue;
pub mod transmit;
