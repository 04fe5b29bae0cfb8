use bytes::{Buf, BytesMut};

use crate::InvalidInput;

/// Size of the fixed part of an RTP header.
const FIXED_HEADER_LEN: usize = 12;

/// RTP packet with an encrypted (or already decrypted) payload.
///
/// The packet keeps the raw frame together with a separate payload buffer.
/// Only the header fields needed for SRTP processing are decoded.
#[derive(Clone)]
pub struct RtpPacket {
    ssrc: u32,
    sequence_number: u16,
    payload_offset: usize,
    raw: BytesMut,
    payload: BytesMut,
}

impl RtpPacket {
    /// Decode an RTP packet from a given frame.
    ///
    /// The method parses the fixed header, the CSRC list and the header
    /// extension (if any). Padding is left in the payload because it is
    /// covered by the encryption.
    pub fn decode(frame: &[u8]) -> Result<Self, InvalidInput> {
        let mut buffer = frame;

        if buffer.len() < FIXED_HEADER_LEN {
            return Err(InvalidInput::new());
        }

        let options = buffer.get_u16();
        let sequence_number = buffer.get_u16();
        let _timestamp = buffer.get_u32();
        let ssrc = buffer.get_u32();

        if (options >> 14) != 2 {
            return Err(InvalidInput::new());
        }

        let csrc_len = (((options >> 8) & 0xf) as usize) << 2;

        if buffer.len() < csrc_len {
            return Err(InvalidInput::new());
        }

        buffer.advance(csrc_len);

        if (options & 0x1000) != 0 {
            if buffer.len() < 4 {
                return Err(InvalidInput::new());
            }

            let _misc = buffer.get_u16();

            let extension_len = (buffer.get_u16() as usize) << 2;

            if buffer.len() < extension_len {
                return Err(InvalidInput::new());
            }

            buffer.advance(extension_len);
        }

        let payload_offset = frame.len() - buffer.len();

        let res = Self {
            ssrc,
            sequence_number,
            payload_offset,
            raw: BytesMut::from(frame),
            payload: BytesMut::from(buffer),
        };

        Ok(res)
    }

    /// Get the SSRC identifier.
    #[inline]
    pub fn ssrc(&self) -> u32 {
        self.ssrc
    }

    /// Get RTP sequence number.
    #[inline]
    pub fn sequence_number(&self) -> u16 {
        self.sequence_number
    }

    /// Get offset of the payload within the raw frame.
    #[inline]
    pub fn payload_offset(&self) -> usize {
        self.payload_offset
    }

    /// Get the payload.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get the payload for in-place modification.
    #[inline]
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.payload
    }

    /// Get the raw frame.
    #[inline]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Take the raw frame.
    #[inline]
    pub fn into_raw(self) -> BytesMut {
        self.raw
    }

    /// Remove a given number of trailing bytes from the payload.
    ///
    /// # Panics
    /// The method panics if the payload is shorter than `len`.
    pub(crate) fn truncate_payload(&mut self, len: usize) {
        let payload_len = self.payload.len();

        assert!(payload_len >= len);

        self.payload.truncate(payload_len - len);
    }

    /// Rebuild the raw frame from the original header and the current
    /// payload.
    pub(crate) fn sync_raw(&mut self) {
        self.raw.truncate(self.payload_offset);
        self.raw.extend_from_slice(&self.payload);
    }
}
