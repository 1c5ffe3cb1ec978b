use crate::frame::Header;

/// Order in which the bytes of a queue word appear in the frame payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteOrder {
    /// Least significant byte first, as a memory copy of the word on a little-endian MCU
    #[default]
    Little,
    /// Most significant byte first
    Big,
}

/// Run-time replacement for compiling the trace path out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tracing {
    #[default]
    On,
    /// The transmit handler becomes a no-op that never touches the port
    Off,
}

/// Transmit path configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub struct Config {
    /// Constant frame header bytes
    pub header: Header,
    /// Payload byte order of queue words
    pub byte_order: ByteOrder,
    pub tracing: Tracing,
}
