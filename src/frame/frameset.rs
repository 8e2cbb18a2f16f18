//! The reassembled delivery unit handed to frame handlers.

use bytes::{Bytes, BytesMut};

use super::{ChannelId, ContentHeader, Method};

/// A semantically complete delivery: a method, its optional content
/// header, and the body fragments that arrived for it, in arrival order.
///
/// A frameset is immutable once constructed; the reader loop moves it
/// into the frame handler and retains nothing. Body fragments are only
/// non-empty when a content header is present, and their summed length
/// never exceeds the header's declared body size except when the sender
/// itself overran its declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frameset {
    channel: ChannelId,
    method: Method,
    header: Option<ContentHeader>,
    bodies: Vec<Bytes>,
}

impl Frameset {
    /// A delivery carrying no content: a bare method.
    #[must_use]
    pub const fn contentless(channel: ChannelId, method: Method) -> Self {
        Self {
            channel,
            method,
            header: None,
            bodies: Vec::new(),
        }
    }

    /// A delivery with content: method, header, and zero or more body
    /// fragments in arrival order.
    #[must_use]
    pub const fn with_content(
        channel: ChannelId,
        method: Method,
        header: ContentHeader,
        bodies: Vec<Bytes>,
    ) -> Self {
        Self {
            channel,
            method,
            header: Some(header),
            bodies,
        }
    }

    /// Channel the delivery arrived on.
    #[must_use]
    pub const fn channel(&self) -> ChannelId { self.channel }

    /// The command that opened the delivery.
    #[must_use]
    pub const fn method(&self) -> &Method { &self.method }

    /// Content header, if the method declared content and a header
    /// arrived before the delivery terminated.
    #[must_use]
    pub const fn header(&self) -> Option<&ContentHeader> { self.header.as_ref() }

    /// Body fragments in arrival order.
    #[must_use]
    pub fn bodies(&self) -> &[Bytes] { &self.bodies }

    /// Summed length of the body fragments.
    #[must_use]
    pub fn body_len(&self) -> usize { self.bodies.iter().map(Bytes::len).sum() }

    /// Concatenate the body fragments into one contiguous buffer.
    #[must_use]
    pub fn body(&self) -> Bytes {
        match self.bodies.as_slice() {
            [] => Bytes::new(),
            [single] => single.clone(),
            fragments => {
                let mut joined = BytesMut::with_capacity(self.body_len());
                for fragment in fragments {
                    joined.extend_from_slice(fragment);
                }
                joined.freeze()
            }
        }
    }
}
