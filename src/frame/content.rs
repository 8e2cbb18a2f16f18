//! Content-header frame payloads.

use bytes::Bytes;

/// Declares the total size and properties of the content body that
/// follows in subsequent body frames.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContentHeader {
    class_id: u16,
    body_size: u64,
    properties: BasicProperties,
}

impl ContentHeader {
    /// Construct a content header.
    #[must_use]
    pub const fn new(class_id: u16, body_size: u64, properties: BasicProperties) -> Self {
        Self {
            class_id,
            body_size,
            properties,
        }
    }

    /// Class the content belongs to.
    #[must_use]
    pub const fn class_id(&self) -> u16 { self.class_id }

    /// Total byte length of the body to follow. May be zero, in which
    /// case no body frames are sent at all.
    #[must_use]
    pub const fn body_size(&self) -> u64 { self.body_size }

    /// Named optional properties attached to the content.
    #[must_use]
    pub const fn properties(&self) -> &BasicProperties { &self.properties }
}

/// The optional property set of the `basic` content class.
///
/// Every field is independently optional; which fields are present on the
/// wire is governed by the header's property-flag word. The `headers`
/// field table is captured as its raw length-delimited bytes; table
/// entries are application data this layer has no business interpreting.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BasicProperties {
    /// MIME content type.
    pub content_type: Option<String>,
    /// MIME content encoding.
    pub content_encoding: Option<String>,
    /// Application header table, undecoded.
    pub headers: Option<Bytes>,
    /// 1 = non-persistent, 2 = persistent.
    pub delivery_mode: Option<u8>,
    /// Message priority, 0 to 9.
    pub priority: Option<u8>,
    /// Application correlation identifier.
    pub correlation_id: Option<String>,
    /// Address to reply to.
    pub reply_to: Option<String>,
    /// Message expiration specification.
    pub expiration: Option<String>,
    /// Application message identifier.
    pub message_id: Option<String>,
    /// Message timestamp, seconds since the epoch.
    pub timestamp: Option<u64>,
    /// Message type name.
    pub message_type: Option<String>,
    /// Creating user id.
    pub user_id: Option<String>,
    /// Creating application id.
    pub app_id: Option<String>,
    /// Reserved, retained for wire compatibility.
    pub cluster_id: Option<String>,
}

impl BasicProperties {
    /// Whether no property is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content_type.is_none()
            && self.content_encoding.is_none()
            && self.headers.is_none()
            && self.delivery_mode.is_none()
            && self.priority.is_none()
            && self.correlation_id.is_none()
            && self.reply_to.is_none()
            && self.expiration.is_none()
            && self.message_id.is_none()
            && self.timestamp.is_none()
            && self.message_type.is_none()
            && self.user_id.is_none()
            && self.app_id.is_none()
            && self.cluster_id.is_none()
    }
}
