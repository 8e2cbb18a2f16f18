//! Conversion of typed frames back into wire envelopes.

use std::io;

use bytes::{BufMut, BytesMut};

use super::{
    FRAME_BODY,
    FRAME_END,
    FRAME_HEADER,
    FRAME_HEARTBEAT,
    FRAME_METHOD,
    decode::{
        FLAG_APP_ID,
        FLAG_CLUSTER_ID,
        FLAG_CONTENT_ENCODING,
        FLAG_CONTENT_TYPE,
        FLAG_CORRELATION_ID,
        FLAG_DELIVERY_MODE,
        FLAG_EXPIRATION,
        FLAG_HEADERS,
        FLAG_MESSAGE_ID,
        FLAG_MESSAGE_TYPE,
        FLAG_PRIORITY,
        FLAG_REPLY_TO,
        FLAG_TIMESTAMP,
        FLAG_USER_ID,
    },
    envelope::ENVELOPE_OVERHEAD,
};
use crate::frame::{BasicProperties, ContentHeader, Frame, Payload};

/// Encode a frame as one wire envelope, appending to `dst`.
///
/// # Errors
///
/// Returns `io::ErrorKind::InvalidInput` when the payload cannot be
/// represented on the wire: a payload larger than the four-byte size
/// field can describe, or a property string longer than 255 bytes.
pub fn encode_frame(frame: &Frame, dst: &mut BytesMut) -> io::Result<()> {
    let (frame_type, payload) = match frame.payload() {
        Payload::Method(method) => {
            let mut buf = BytesMut::with_capacity(4 + method.arguments().len());
            buf.put_u16(method.class_id());
            buf.put_u16(method.method_id());
            buf.put_slice(method.arguments());
            (FRAME_METHOD, buf)
        }
        Payload::Header(header) => (FRAME_HEADER, encode_content_header(header)?),
        Payload::Body(chunk) => (FRAME_BODY, BytesMut::from(chunk.as_ref())),
        Payload::Heartbeat => (FRAME_HEARTBEAT, BytesMut::new()),
    };

    let size = u32::try_from(payload.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "frame payload too large"))?;
    dst.reserve(ENVELOPE_OVERHEAD + payload.len());
    dst.put_u8(frame_type);
    dst.put_u16(frame.channel().into());
    dst.put_u32(size);
    dst.put_slice(&payload);
    dst.put_u8(FRAME_END);
    Ok(())
}

fn encode_content_header(header: &ContentHeader) -> io::Result<BytesMut> {
    let properties = header.properties();
    let mut buf = BytesMut::with_capacity(14);
    buf.put_u16(header.class_id());
    buf.put_u16(0); // weight, always zero
    buf.put_u64(header.body_size());
    buf.put_u16(property_flags(properties));
    encode_properties(properties, &mut buf)?;
    Ok(buf)
}

fn property_flags(properties: &BasicProperties) -> u16 {
    let mut flags = 0;
    let mut flag = |set: bool, bit: u16| {
        if set {
            flags |= bit;
        }
    };
    flag(properties.content_type.is_some(), FLAG_CONTENT_TYPE);
    flag(properties.content_encoding.is_some(), FLAG_CONTENT_ENCODING);
    flag(properties.headers.is_some(), FLAG_HEADERS);
    flag(properties.delivery_mode.is_some(), FLAG_DELIVERY_MODE);
    flag(properties.priority.is_some(), FLAG_PRIORITY);
    flag(properties.correlation_id.is_some(), FLAG_CORRELATION_ID);
    flag(properties.reply_to.is_some(), FLAG_REPLY_TO);
    flag(properties.expiration.is_some(), FLAG_EXPIRATION);
    flag(properties.message_id.is_some(), FLAG_MESSAGE_ID);
    flag(properties.timestamp.is_some(), FLAG_TIMESTAMP);
    flag(properties.message_type.is_some(), FLAG_MESSAGE_TYPE);
    flag(properties.user_id.is_some(), FLAG_USER_ID);
    flag(properties.app_id.is_some(), FLAG_APP_ID);
    flag(properties.cluster_id.is_some(), FLAG_CLUSTER_ID);
    flags
}

fn encode_properties(properties: &BasicProperties, buf: &mut BytesMut) -> io::Result<()> {
    put_opt_shortstr(buf, properties.content_type.as_deref())?;
    put_opt_shortstr(buf, properties.content_encoding.as_deref())?;
    if let Some(table) = &properties.headers {
        let len = u32::try_from(table.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "headers table too large"))?;
        buf.put_u32(len);
        buf.put_slice(table);
    }
    if let Some(mode) = properties.delivery_mode {
        buf.put_u8(mode);
    }
    if let Some(priority) = properties.priority {
        buf.put_u8(priority);
    }
    put_opt_shortstr(buf, properties.correlation_id.as_deref())?;
    put_opt_shortstr(buf, properties.reply_to.as_deref())?;
    put_opt_shortstr(buf, properties.expiration.as_deref())?;
    put_opt_shortstr(buf, properties.message_id.as_deref())?;
    if let Some(timestamp) = properties.timestamp {
        buf.put_u64(timestamp);
    }
    put_opt_shortstr(buf, properties.message_type.as_deref())?;
    put_opt_shortstr(buf, properties.user_id.as_deref())?;
    put_opt_shortstr(buf, properties.app_id.as_deref())?;
    put_opt_shortstr(buf, properties.cluster_id.as_deref())?;
    Ok(())
}

fn put_opt_shortstr(buf: &mut BytesMut, value: Option<&str>) -> io::Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    let len = u8::try_from(value.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "property string exceeds 255 bytes",
        )
    })?;
    buf.put_u8(len);
    buf.put_slice(value.as_bytes());
    Ok(())
}
