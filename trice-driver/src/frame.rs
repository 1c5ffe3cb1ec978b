//! Transport frame object

/// Header length: start byte, two addresses and the checksum
pub const HEADER_LENGTH: usize = 4;
/// Payload length: one queue word
pub const PAYLOAD_LENGTH: usize = 4;
pub const FRAME_LENGTH: usize = HEADER_LENGTH + PAYLOAD_LENGTH;

const START: usize = 0;
const LOCAL_ADDRESS: usize = 1;
const SERVER_ADDRESS: usize = 2;
const CHECKSUM: usize = 3;

pub type Payload = [u8; PAYLOAD_LENGTH];

/// Constant part of the frame header
///
/// The values are fixed for the lifetime of a link. Only the checksum byte, which follows
/// them on the wire, changes from frame to frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Header {
    /// Protocol marker the receiver synchronizes on
    pub start: u8,
    /// Address of the emitting device
    pub local_address: u8,
    /// Address of the displaying server
    pub server_address: u8,
}

impl Header {
    pub const DEFAULT_START: u8 = 0xeb;
    pub const DEFAULT_LOCAL_ADDRESS: u8 = 0x60;
    pub const DEFAULT_SERVER_ADDRESS: u8 = 0x60;

    pub const fn new(start: u8, local_address: u8, server_address: u8) -> Self {
        Self {
            start,
            local_address,
            server_address,
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_START,
            Self::DEFAULT_LOCAL_ADDRESS,
            Self::DEFAULT_SERVER_ADDRESS,
        )
    }
}

/// Exclusive-or of the header constants and the payload.
///
/// Placing the result into the checksum byte makes the exclusive-or of the whole frame zero.
pub const fn checksum(header: &Header, payload: &Payload) -> u8 {
    header.start
        ^ header.local_address
        ^ header.server_address
        ^ payload[0]
        ^ payload[1]
        ^ payload[2]
        ^ payload[3]
}

/// Plaintext wire frame
///
/// ```text
/// byte 0    start
/// byte 1    local address
/// byte 2    server address
/// byte 3    checksum
/// byte 4-7  payload
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame([u8; FRAME_LENGTH]);

impl Frame {
    /// Assembles a frame and computes its checksum.
    pub const fn new(header: Header, payload: Payload) -> Self {
        Self([
            header.start,
            header.local_address,
            header.server_address,
            checksum(&header, &payload),
            payload[0],
            payload[1],
            payload[2],
            payload[3],
        ])
    }

    /// Wraps raw plaintext bytes, e.g. taken from the line by a receiver.
    ///
    /// The checksum is not verified, see [`Frame::is_consistent`].
    pub const fn from_bytes(bytes: [u8; FRAME_LENGTH]) -> Self {
        Self(bytes)
    }

    pub const fn header(&self) -> Header {
        Header::new(
            self.0[START],
            self.0[LOCAL_ADDRESS],
            self.0[SERVER_ADDRESS],
        )
    }

    pub const fn checksum(&self) -> u8 {
        self.0[CHECKSUM]
    }

    pub fn payload(&self) -> Payload {
        let mut payload = [0; PAYLOAD_LENGTH];
        payload.copy_from_slice(&self.0[HEADER_LENGTH..]);
        payload
    }

    /// Returns true if the checksum byte matches the rest of the frame.
    pub fn is_consistent(&self) -> bool {
        self.0.iter().fold(0, |acc, byte| acc ^ byte) == 0
    }

    pub const fn into_bytes(self) -> [u8; FRAME_LENGTH] {
        self.0
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Frame> for [u8; FRAME_LENGTH] {
    fn from(value: Frame) -> Self {
        value.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: Header = Header::new(0xeb, 0x60, 0x60);

    #[test]
    fn test_layout() {
        let frame = Frame::new(HEADER, [0x02, 0x00, 0x01, 0x00]);
        assert_eq!(
            frame.into_bytes(),
            [0xeb, 0x60, 0x60, 0xeb ^ 0x02 ^ 0x01, 0x02, 0x00, 0x01, 0x00]
        );
        assert_eq!(frame.header(), HEADER);
        assert_eq!(frame.payload(), [0x02, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn test_checksum_cancels_frame() {
        for payload in [[0; 4], [0xff; 4], [0x12, 0x34, 0x56, 0x78], [0xeb, 0x60, 0x60, 0]] {
            let frame = Frame::new(Header::new(0x5a, 0x01, 0x7e), payload);
            assert!(frame.is_consistent());
            let xor = frame.as_ref().iter().fold(0u8, |acc, byte| acc ^ byte);
            assert_eq!(xor, 0);
        }
    }

    #[test]
    fn test_corrupted_byte_detected() {
        let frame = Frame::new(HEADER, [0x10, 0x20, 0x30, 0x40]);
        for i in 0..FRAME_LENGTH {
            let mut bytes = frame.into_bytes();
            bytes[i] ^= 0x04;
            assert!(!Frame::from_bytes(bytes).is_consistent());
        }
    }

    #[test]
    fn test_default_header() {
        let header = Header::default();
        assert_eq!(header.start, 0xeb);
        assert_eq!(header.local_address, 0x60);
        assert_eq!(header.server_address, 0x60);
    }
}
