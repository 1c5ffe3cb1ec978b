//! Interrupt-driven transmit state machine

use crate::builder::FrameBuilder;
use crate::cipher::BlockCipher;
use crate::config::{Config, Tracing};
use crate::port::{TxPort, TxState};
use crate::queue::Consumer;

/// Serves the frame builder output to a serial port one byte per call
///
/// The transmitter is either _sending_ (the "data register empty" interrupt is enabled and
/// the caller's flag is `TxState::Sending`) or _idle_ (interrupt disabled, flag `Idle`).
/// Pushing a word does not wake an idle transmitter: the board either polls
/// [`Transmitter::handle`] cyclically or calls it after pushing.
pub struct Transmitter<'a, P: TxPort, const N: usize> {
    builder: FrameBuilder<'a, N>,
    port: P,
}

impl<'a, P: TxPort, const N: usize> Transmitter<'a, P, N> {
    pub fn new(builder: FrameBuilder<'a, N>, port: P) -> Self {
        Self { builder, port }
    }

    /// Transmit step. Call from the "data register empty" interrupt and cyclically.
    ///
    /// Does nothing while the data register is busy. Otherwise writes the next byte and
    /// keeps the interrupt enabled, or disables the interrupt and reports `Idle` if there is
    /// nothing to send.
    pub fn handle(&mut self, tx_state: &mut TxState) {
        if !self.port.is_tx_empty() {
            return;
        }

        match self.builder.next_byte() {
            Some(byte) => {
                self.port.write_byte(byte);
                *tx_state = TxState::Sending;
                self.port.enable_tx_empty_interrupt();
            }
            None => {
                self.port.disable_tx_empty_interrupt();
                if tx_state.is_sending() {
                    debug!("trace transmitter idle");
                }
                *tx_state = TxState::Idle;
            }
        }
    }

    pub fn is_frame_boundary(&self) -> bool {
        self.builder.is_frame_boundary()
    }

    pub fn builder(&self) -> &FrameBuilder<'a, N> {
        &self.builder
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

/// Transmit entry point honoring [`Config::tracing`]
///
/// With tracing off the handler is a no-op: it neither touches the port nor the flag, and
/// words pushed into the queue stay there.
pub enum TxHandler<'a, P: TxPort, const N: usize> {
    Enabled(Transmitter<'a, P, N>),
    Disabled,
}

impl<'a, P: TxPort, const N: usize> TxHandler<'a, P, N> {
    pub fn new(
        config: &Config,
        consumer: Consumer<'a, N>,
        port: P,
        cipher: Option<&'a dyn BlockCipher>,
    ) -> Self {
        match config.tracing {
            Tracing::On => {
                let builder = FrameBuilder::new(consumer, config, cipher);
                TxHandler::Enabled(Transmitter::new(builder, port))
            }
            Tracing::Off => {
                info!("tracing disabled");
                TxHandler::Disabled
            }
        }
    }

    /// See [`Transmitter::handle`].
    pub fn handle(&mut self, tx_state: &mut TxState) {
        if let TxHandler::Enabled(transmitter) = self {
            transmitter.handle(tx_state);
        }
    }

    pub fn transmitter(&self) -> Option<&Transmitter<'a, P, N>> {
        match self {
            TxHandler::Enabled(transmitter) => Some(transmitter),
            TxHandler::Disabled => None,
        }
    }
}
