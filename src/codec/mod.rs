//! Wire codec for AMQP 0-9-1 frame envelopes.
//!
//! Two layers:
//!
//! - [`EnvelopeCodec`] recognises envelope *boundaries* in a byte stream.
//!   It never looks inside a payload; it only needs the fixed seven-byte
//!   envelope header to know how many bytes the next frame occupies, and
//!   it refuses frames above a configurable size cap.
//! - [`decode_frame`] converts one complete raw envelope into a typed
//!   [`Frame`](crate::frame::Frame), or fails with a [`DecodeError`].
//!   Decoding is deterministic and side-effect free; each envelope is
//!   decoded atomically once all of its bytes are available.
//!
//! [`encode_frame`] is the mirror image, used by outbound senders and by
//! tests that fabricate broker traffic.

mod decode;
mod encode;
mod envelope;
mod error;

pub use decode::decode_frame;
pub use encode::encode_frame;
pub use envelope::EnvelopeCodec;
pub use error::DecodeError;

/// Frame type octet for method frames.
pub const FRAME_METHOD: u8 = 1;
/// Frame type octet for content-header frames.
pub const FRAME_HEADER: u8 = 2;
/// Frame type octet for content-body frames.
pub const FRAME_BODY: u8 = 3;
/// Frame type octet for heartbeat frames.
pub const FRAME_HEARTBEAT: u8 = 8;

/// The octet terminating every frame envelope.
pub const FRAME_END: u8 = 0xCE;

/// Byte length of the envelope header: type octet, channel short,
/// payload-size long.
pub const ENVELOPE_HEADER_LEN: usize = 7;

/// The eight-byte greeting a client sends before any frame traffic.
pub const PROTOCOL_HEADER: [u8; 8] = *b"AMQP\x00\x00\x09\x01";
