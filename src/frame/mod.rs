//! Wire data model for AMQP 0-9-1 client connections.
//!
//! A [`Frame`] is one discrete unit of the wire stream: a [`ChannelId`]
//! plus a typed [`Payload`]. Frames are transient: the reader loop hands
//! each one to the frameset assembler and never stores it. The unit that
//! survives past a single processing step is the [`Frameset`], the
//! reassembled application-visible delivery.

mod content;
mod frameset;
mod method;

use std::fmt;

use bytes::Bytes;

pub use content::{BasicProperties, ContentHeader};
pub use frameset::Frameset;
pub use method::Method;

/// Identifies a logical multiplexing lane over one connection.
///
/// Channel 0 is reserved for connection-level traffic; heartbeats are only
/// ever addressed to it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ChannelId(pub u16);

/// The connection-level channel.
pub const CONTROL_CHANNEL: ChannelId = ChannelId(0);

impl From<u16> for ChannelId {
    fn from(value: u16) -> Self { Self(value) }
}

impl From<ChannelId> for u16 {
    fn from(value: ChannelId) -> Self { value.0 }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// One decoded frame envelope: a channel number and a typed payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    channel: ChannelId,
    payload: Payload,
}

impl Frame {
    /// Construct a frame addressed to `channel`.
    #[must_use]
    pub const fn new(channel: ChannelId, payload: Payload) -> Self { Self { channel, payload } }

    /// Channel the frame is addressed to.
    #[must_use]
    pub const fn channel(&self) -> ChannelId { self.channel }

    /// Borrow the typed payload.
    #[must_use]
    pub const fn payload(&self) -> &Payload { &self.payload }

    /// Consume the frame, returning channel and payload.
    #[must_use]
    pub fn into_parts(self) -> (ChannelId, Payload) { (self.channel, self.payload) }
}

/// The closed set of payload variants a frame can carry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Payload {
    /// A protocol command with undecoded argument bytes.
    Method(Method),
    /// Declares the size and properties of a content body to follow.
    Header(ContentHeader),
    /// One fragment of a content body.
    Body(Bytes),
    /// Liveness signal; carries no data.
    Heartbeat,
}

impl Payload {
    /// Whether this payload is a heartbeat.
    #[must_use]
    pub const fn is_heartbeat(&self) -> bool { matches!(self, Self::Heartbeat) }
}

#[cfg(test)]
mod tests;
