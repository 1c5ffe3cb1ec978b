//! Hardware seam between a serial peripheral and the trice transmitter

/// Transmission activity flag shared with the hardware-facing caller
///
/// The transmitter sets `Sending` whenever it has just started a byte transmission and
/// `Idle` once there is nothing left to send. The numeric encoding matches the integer
/// flag C board support code expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TxState {
    #[default]
    Idle = 0,
    Sending = 1,
}

impl TxState {
    pub const fn is_sending(self) -> bool {
        matches!(self, TxState::Sending)
    }
}

impl From<TxState> for u8 {
    fn from(value: TxState) -> Self {
        value as u8
    }
}

/// Transmit side of a serial peripheral
///
/// All methods must be non-blocking: the transmitter calls them from the
/// "data register empty" interrupt handler.
pub trait TxPort {
    /// Returns true if the data register can accept a new byte.
    fn is_tx_empty(&self) -> bool;

    /// Writes a byte into the data register.
    ///
    /// Called only after `is_tx_empty` returned true.
    fn write_byte(&mut self, byte: u8);

    fn enable_tx_empty_interrupt(&mut self);

    fn disable_tx_empty_interrupt(&mut self);
}

impl<T: TxPort + ?Sized> TxPort for &mut T {
    fn is_tx_empty(&self) -> bool {
        T::is_tx_empty(self)
    }

    fn write_byte(&mut self, byte: u8) {
        T::write_byte(self, byte)
    }

    fn enable_tx_empty_interrupt(&mut self) {
        T::enable_tx_empty_interrupt(self)
    }

    fn disable_tx_empty_interrupt(&mut self) {
        T::disable_tx_empty_interrupt(self)
    }
}
