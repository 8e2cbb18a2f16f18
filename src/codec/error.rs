//! Decode-error taxonomy for inbound frames.
//!
//! A decode error is fatal to the reader loop: AMQP framing has no
//! self-describing recovery point after a corrupt frame, so the variants
//! here exist for diagnostics, not for recovery decisions.

use thiserror::Error;

use crate::frame::ChannelId;

/// Errors produced while decoding a frame envelope or its payload.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The envelope or a payload field ended before its declared length.
    #[error("{context} truncated: needed {needed} bytes, have {have}")]
    Truncated {
        /// What was being read when the bytes ran out.
        context: &'static str,
        /// Bytes the field required.
        needed: usize,
        /// Bytes that were actually available.
        have: usize,
    },
    /// The frame type octet names no known frame type.
    #[error("unknown frame type {frame_type}")]
    UnknownFrameType {
        /// The offending type octet.
        frame_type: u8,
    },
    /// The final octet of the envelope is not the frame-end marker.
    #[error("missing frame-end octet: expected 0xce, found {found:#04x}")]
    BadFrameEnd {
        /// The octet found where 0xCE was required.
        found: u8,
    },
    /// The envelope's declared payload size disagrees with the bytes
    /// actually delivered for it.
    #[error("frame payload length mismatch: declared {declared}, found {actual}")]
    PayloadLengthMismatch {
        /// Payload size from the envelope header.
        declared: u32,
        /// Payload bytes actually present.
        actual: usize,
    },
    /// A heartbeat frame was addressed to a channel other than 0.
    #[error("heartbeat frame addressed to channel {channel}")]
    HeartbeatOnChannel {
        /// The non-zero channel the heartbeat named.
        channel: ChannelId,
    },
    /// A heartbeat frame carried payload bytes.
    #[error("heartbeat frame carries {len} payload bytes")]
    NonEmptyHeartbeat {
        /// Number of unexpected payload bytes.
        len: usize,
    },
    /// A content header carried a non-zero weight field.
    #[error("content header declares non-zero weight {weight}")]
    NonZeroWeight {
        /// The weight value found.
        weight: u16,
    },
    /// The property-flag word requested a continuation word, which the
    /// `basic` class never legitimately needs.
    #[error("content header requests a property-flag continuation word")]
    PropertyFlagContinuation,
    /// A short string field was not valid UTF-8.
    #[error("{context} is not valid utf-8")]
    InvalidShortString {
        /// The property the string belonged to.
        context: &'static str,
    },
    /// Bytes remained in a content-header payload after its property
    /// list ended.
    #[error("content header carries {len} bytes past its property list")]
    TrailingBytes {
        /// Number of leftover bytes.
        len: usize,
    },
}
