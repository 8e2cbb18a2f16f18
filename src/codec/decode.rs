//! Conversion of raw envelopes into typed frames.

use bytes::{Buf, Bytes};

use super::{
    ENVELOPE_HEADER_LEN,
    FRAME_BODY,
    FRAME_END,
    FRAME_HEADER,
    FRAME_HEARTBEAT,
    FRAME_METHOD,
    error::DecodeError,
};
use crate::frame::{
    BasicProperties,
    CONTROL_CHANNEL,
    ChannelId,
    ContentHeader,
    Frame,
    Method,
    Payload,
};

/// Decode one complete frame envelope into a typed [`Frame`].
///
/// `envelope` must hold exactly one envelope: the seven-byte header, the
/// declared number of payload bytes, and the frame-end octet; the shape
/// [`EnvelopeCodec`](super::EnvelopeCodec) produces.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the envelope is truncated, its declared
/// length disagrees with the bytes present, the frame-end octet is
/// missing, the frame type is unknown, or the payload is malformed for
/// its type.
pub fn decode_frame(mut envelope: Bytes) -> Result<Frame, DecodeError> {
    ensure_remaining(&envelope, ENVELOPE_HEADER_LEN + 1, "frame envelope")?;
    let frame_type = envelope.get_u8();
    let channel = ChannelId(envelope.get_u16());
    let declared = envelope.get_u32();

    let payload_len = envelope.remaining() - 1;
    let matches_declared = usize::try_from(declared).is_ok_and(|len| len == payload_len);
    if !matches_declared {
        return Err(DecodeError::PayloadLengthMismatch {
            declared,
            actual: payload_len,
        });
    }
    let frame_end = envelope[payload_len];
    if frame_end != FRAME_END {
        return Err(DecodeError::BadFrameEnd { found: frame_end });
    }
    let payload = envelope.split_to(payload_len);

    let payload = decode_payload(frame_type, channel, payload)?;
    Ok(Frame::new(channel, payload))
}

/// Decode a payload of the given frame type, atomically.
fn decode_payload(
    frame_type: u8,
    channel: ChannelId,
    mut payload: Bytes,
) -> Result<Payload, DecodeError> {
    match frame_type {
        FRAME_METHOD => {
            ensure_remaining(&payload, 4, "method payload")?;
            let class_id = payload.get_u16();
            let method_id = payload.get_u16();
            Ok(Payload::Method(Method::new(class_id, method_id, payload)))
        }
        FRAME_HEADER => decode_content_header(payload),
        FRAME_BODY => Ok(Payload::Body(payload)),
        FRAME_HEARTBEAT => {
            if channel != CONTROL_CHANNEL {
                return Err(DecodeError::HeartbeatOnChannel { channel });
            }
            if !payload.is_empty() {
                return Err(DecodeError::NonEmptyHeartbeat {
                    len: payload.len(),
                });
            }
            Ok(Payload::Heartbeat)
        }
        frame_type => Err(DecodeError::UnknownFrameType { frame_type }),
    }
}

// Property-flag bits of the `basic` class, most significant first. Bit 0
// is the continuation flag; bit 1 is unused.
pub(super) const FLAG_CONTENT_TYPE: u16 = 1 << 15;
pub(super) const FLAG_CONTENT_ENCODING: u16 = 1 << 14;
pub(super) const FLAG_HEADERS: u16 = 1 << 13;
pub(super) const FLAG_DELIVERY_MODE: u16 = 1 << 12;
pub(super) const FLAG_PRIORITY: u16 = 1 << 11;
pub(super) const FLAG_CORRELATION_ID: u16 = 1 << 10;
pub(super) const FLAG_REPLY_TO: u16 = 1 << 9;
pub(super) const FLAG_EXPIRATION: u16 = 1 << 8;
pub(super) const FLAG_MESSAGE_ID: u16 = 1 << 7;
pub(super) const FLAG_TIMESTAMP: u16 = 1 << 6;
pub(super) const FLAG_MESSAGE_TYPE: u16 = 1 << 5;
pub(super) const FLAG_USER_ID: u16 = 1 << 4;
pub(super) const FLAG_APP_ID: u16 = 1 << 3;
pub(super) const FLAG_CLUSTER_ID: u16 = 1 << 2;
const FLAG_CONTINUATION: u16 = 1;

fn decode_content_header(mut payload: Bytes) -> Result<Payload, DecodeError> {
    ensure_remaining(&payload, 14, "content header")?;
    let class_id = payload.get_u16();
    let weight = payload.get_u16();
    if weight != 0 {
        return Err(DecodeError::NonZeroWeight { weight });
    }
    let body_size = payload.get_u64();
    let flags = payload.get_u16();
    if flags & FLAG_CONTINUATION != 0 {
        return Err(DecodeError::PropertyFlagContinuation);
    }

    let mut properties = BasicProperties::default();
    if flags & FLAG_CONTENT_TYPE != 0 {
        properties.content_type = Some(get_shortstr(&mut payload, "content-type")?);
    }
    if flags & FLAG_CONTENT_ENCODING != 0 {
        properties.content_encoding = Some(get_shortstr(&mut payload, "content-encoding")?);
    }
    if flags & FLAG_HEADERS != 0 {
        properties.headers = Some(get_table(&mut payload)?);
    }
    if flags & FLAG_DELIVERY_MODE != 0 {
        properties.delivery_mode = Some(get_octet(&mut payload, "delivery-mode")?);
    }
    if flags & FLAG_PRIORITY != 0 {
        properties.priority = Some(get_octet(&mut payload, "priority")?);
    }
    if flags & FLAG_CORRELATION_ID != 0 {
        properties.correlation_id = Some(get_shortstr(&mut payload, "correlation-id")?);
    }
    if flags & FLAG_REPLY_TO != 0 {
        properties.reply_to = Some(get_shortstr(&mut payload, "reply-to")?);
    }
    if flags & FLAG_EXPIRATION != 0 {
        properties.expiration = Some(get_shortstr(&mut payload, "expiration")?);
    }
    if flags & FLAG_MESSAGE_ID != 0 {
        properties.message_id = Some(get_shortstr(&mut payload, "message-id")?);
    }
    if flags & FLAG_TIMESTAMP != 0 {
        ensure_remaining(&payload, 8, "timestamp")?;
        properties.timestamp = Some(payload.get_u64());
    }
    if flags & FLAG_MESSAGE_TYPE != 0 {
        properties.message_type = Some(get_shortstr(&mut payload, "type")?);
    }
    if flags & FLAG_USER_ID != 0 {
        properties.user_id = Some(get_shortstr(&mut payload, "user-id")?);
    }
    if flags & FLAG_APP_ID != 0 {
        properties.app_id = Some(get_shortstr(&mut payload, "app-id")?);
    }
    if flags & FLAG_CLUSTER_ID != 0 {
        properties.cluster_id = Some(get_shortstr(&mut payload, "cluster-id")?);
    }

    if !payload.is_empty() {
        return Err(DecodeError::TrailingBytes {
            len: payload.len(),
        });
    }
    Ok(Payload::Header(ContentHeader::new(
        class_id, body_size, properties,
    )))
}

fn ensure_remaining(buf: &Bytes, needed: usize, context: &'static str) -> Result<(), DecodeError> {
    if buf.remaining() < needed {
        return Err(DecodeError::Truncated {
            context,
            needed,
            have: buf.remaining(),
        });
    }
    Ok(())
}

fn get_octet(buf: &mut Bytes, context: &'static str) -> Result<u8, DecodeError> {
    ensure_remaining(buf, 1, context)?;
    Ok(buf.get_u8())
}

/// A length-prefixed string of at most 255 UTF-8 bytes.
fn get_shortstr(buf: &mut Bytes, context: &'static str) -> Result<String, DecodeError> {
    let len = usize::from(get_octet(buf, context)?);
    ensure_remaining(buf, len, context)?;
    let raw = buf.split_to(len);
    String::from_utf8(raw.to_vec()).map_err(|_| DecodeError::InvalidShortString { context })
}

/// A field table, captured as its undecoded content bytes.
fn get_table(buf: &mut Bytes) -> Result<Bytes, DecodeError> {
    ensure_remaining(buf, 4, "headers table")?;
    let declared = buf.get_u32();
    let len = usize::try_from(declared).unwrap_or(usize::MAX);
    ensure_remaining(buf, len, "headers table")?;
    Ok(buf.split_to(len))
}
