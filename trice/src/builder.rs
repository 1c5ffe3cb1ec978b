//! Frame builder: one queue word in, one 8-byte wire frame out

use crate::cipher::BlockCipher;
use crate::config::{ByteOrder, Config};
use crate::frame::{FRAME_LENGTH, Frame, Header};
use crate::queue::Consumer;

/// Drains the event queue one word at a time into a statically sized frame buffer
///
/// The buffer holds wire bytes: plaintext frames, or ciphertext if a cipher is configured.
/// The read cursor starts past the end of the buffer, i.e. in the drained state.
pub struct FrameBuilder<'a, const N: usize> {
    consumer: Consumer<'a, N>,
    cipher: Option<&'a dyn BlockCipher>,
    header: Header,
    byte_order: ByteOrder,
    buffer: [u8; FRAME_LENGTH],
    cursor: usize,
}

impl<'a, const N: usize> FrameBuilder<'a, N> {
    /// Creates a builder. Frames are encrypted in place if `cipher` is set.
    pub fn new(
        consumer: Consumer<'a, N>,
        config: &Config,
        cipher: Option<&'a dyn BlockCipher>,
    ) -> Self {
        Self {
            consumer,
            cipher,
            header: config.header,
            byte_order: config.byte_order,
            buffer: [0; FRAME_LENGTH],
            cursor: FRAME_LENGTH,
        }
    }

    /// Returns the number of bytes left in the current frame, loading the next frame from the
    /// queue if the current one is exhausted.
    ///
    /// Returns 0 only if the frame is drained and the queue is empty. Never loads a frame
    /// while bytes of the current one are pending.
    pub fn remaining_or_refill(&mut self) -> usize {
        let remaining = FRAME_LENGTH - self.cursor;
        if remaining != 0 {
            return remaining;
        }

        let Some(word) = self.consumer.pop() else {
            return 0;
        };

        // The whole header is rewritten: the previous frame may have been encrypted in place
        let mut bytes = Frame::new(self.header, word.to_bytes(self.byte_order)).into_bytes();
        if let Some(cipher) = self.cipher {
            cipher.encrypt(&mut bytes);
        }
        self.buffer = bytes;
        self.cursor = 0;

        #[cfg(any(feature = "log", feature = "defmt"))]
        trace!("frame loaded, {} words queued", self.consumer.depth());
        FRAME_LENGTH
    }

    /// Takes the next wire byte, refilling the frame if needed.
    pub fn next_byte(&mut self) -> Option<u8> {
        if self.remaining_or_refill() == 0 {
            return None;
        }
        let byte = self.buffer[self.cursor];
        self.cursor += 1;
        Some(byte)
    }

    /// Returns true if no frame is partially transmitted.
    ///
    /// A board sharing the serial line with other streams may switch streams only on a frame
    /// boundary.
    pub fn is_frame_boundary(&self) -> bool {
        self.cursor == 0 || self.cursor == FRAME_LENGTH
    }

    /// Number of words waiting in the queue behind the current frame
    pub fn queued_words(&self) -> usize {
        self.consumer.depth()
    }
}
