//! Method frame payloads.
//!
//! A [`Method`] identifies a protocol command by its (class, method)
//! identifier pair. Argument bytes are carried undecoded: the method
//! catalogue, and with it argument parsing, lives above this crate.

use bytes::Bytes;

/// Class identifier of the `basic` class, the only class whose methods
/// carry content.
pub const CLASS_BASIC: u16 = 60;

const BASIC_PUBLISH: u16 = 40;
const BASIC_RETURN: u16 = 50;
const BASIC_DELIVER: u16 = 60;
const BASIC_GET_OK: u16 = 71;

/// A protocol command, with its argument bytes left undecoded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Method {
    class_id: u16,
    method_id: u16,
    arguments: Bytes,
}

impl Method {
    /// Construct a method payload from its identifier pair and raw
    /// argument bytes.
    #[must_use]
    pub const fn new(class_id: u16, method_id: u16, arguments: Bytes) -> Self {
        Self {
            class_id,
            method_id,
            arguments,
        }
    }

    /// Class identifier.
    #[must_use]
    pub const fn class_id(&self) -> u16 { self.class_id }

    /// Method identifier within the class.
    #[must_use]
    pub const fn method_id(&self) -> u16 { self.method_id }

    /// Undecoded argument bytes.
    #[must_use]
    pub const fn arguments(&self) -> &Bytes { &self.arguments }

    /// Whether this method announces content frames to follow.
    ///
    /// True exactly for the content-bearing `basic` class methods
    /// (publish, return, deliver, get-ok); false for everything else,
    /// such as acknowledgements, open/close confirmations, or get-empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytes::Bytes;
    /// use warren::frame::Method;
    ///
    /// let deliver = Method::new(60, 60, Bytes::new());
    /// assert!(deliver.declares_content());
    ///
    /// let channel_open_ok = Method::new(20, 11, Bytes::new());
    /// assert!(!channel_open_ok.declares_content());
    /// ```
    #[must_use]
    pub const fn declares_content(&self) -> bool {
        self.class_id == CLASS_BASIC
            && matches!(
                self.method_id,
                BASIC_PUBLISH | BASIC_RETURN | BASIC_DELIVER | BASIC_GET_OK
            )
    }
}
