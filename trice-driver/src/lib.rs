//! Trice driver interface
//!
//! The crate provides an interface between a serial device driver and the trice stack.
//! Limited scope facilitates compatibility across versions.
//! Driver crates should depend on this crate. Trice stack users should depend on
//! the `trice` crate instead.
//!
//! The crate defines two things:
//! * `frame` describes the 8-byte wire unit a receiver sees on the serial line
//! * `port` is the set of hardware primitives the transmitter drives: a "data register
//!   empty" test, a byte write and the enable/disable switch of the "data register empty"
//!   interrupt
//!
//! Unlike buffered serial drivers, the stack does not hand out byte slices. The driver's
//! interrupt handler calls the stack once per free data register slot, and the stack writes
//! at most one byte through the `TxPort` before returning. This keeps the handler O(1) and
//! removes the need for an intermediate byte queue.

#![no_std]

pub mod frame;
pub mod port;
