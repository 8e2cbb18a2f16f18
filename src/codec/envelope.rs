//! Envelope boundary recognition for byte streams.

use std::io;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use super::ENVELOPE_HEADER_LEN;

/// Envelope bytes besides the payload: the seven-byte header plus the
/// frame-end octet.
pub(super) const ENVELOPE_OVERHEAD: usize = ENVELOPE_HEADER_LEN + 1;

/// Splits whole frame envelopes off a byte stream without decoding them.
///
/// The codec reads only the envelope header: with fewer than seven bytes
/// buffered, or fewer than the header's declared payload length plus the
/// frame-end octet, it reports that more input is needed. Once a whole
/// envelope is buffered it is split off verbatim, ready for
/// [`decode_frame`](super::decode_frame).
///
/// A declared payload length above the configured cap is refused before
/// any buffering happens, bounding the memory one connection can demand.
#[derive(Clone, Copy, Debug)]
pub struct EnvelopeCodec {
    max_frame_size: usize,
}

impl EnvelopeCodec {
    /// Frame-size cap applied by [`EnvelopeCodec::new`]: the conventional
    /// client offer before tune negotiation replaces it.
    pub const DEFAULT_MAX_FRAME_SIZE: usize = 128 * 1024;

    /// Create a codec with the default frame-size cap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_frame_size: Self::DEFAULT_MAX_FRAME_SIZE,
        }
    }

    /// Create a codec refusing payloads longer than `max_frame_size`.
    #[must_use]
    pub const fn with_max_frame_size(max_frame_size: usize) -> Self {
        Self { max_frame_size }
    }
}

impl Default for EnvelopeCodec {
    fn default() -> Self { Self::new() }
}

impl Decoder for EnvelopeCodec {
    type Item = Bytes;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> io::Result<Option<Bytes>> {
        if src.len() < ENVELOPE_HEADER_LEN {
            return Ok(None);
        }
        let declared = u32::from_be_bytes([src[3], src[4], src[5], src[6]]);
        let payload_len = usize::try_from(declared)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "frame exceeds size cap"))?;
        if payload_len > self.max_frame_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "frame exceeds size cap",
            ));
        }
        let needed = ENVELOPE_OVERHEAD + payload_len;
        if src.len() < needed {
            src.reserve(needed - src.len());
            return Ok(None);
        }
        Ok(Some(src.split_to(needed).freeze()))
    }
}

/// The outbound direction appends already-enveloped bytes verbatim;
/// envelope construction lives in [`encode_frame`](super::encode_frame).
impl Encoder<Bytes> for EnvelopeCodec {
    type Error = io::Error;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> io::Result<()> {
        dst.reserve(item.remaining());
        dst.put(item);
        Ok(())
    }
}
