//! Keyed per-channel assembly state.

use std::collections::HashMap;

use log::trace;

use super::channel::DeliveryState;
use crate::frame::{ChannelId, Frameset, Payload};

/// Converts per-channel payload sequences into frameset sequences.
///
/// One delivery state machine exists per channel, created lazily on the first
/// payload addressed to it and kept for the life of the connection
/// (channel teardown is a connection-level concern, not this type's).
/// State is mutated only through [`feed`](Self::feed), which the reader
/// loop calls from its single read-dispatch sequence, so no locking is
/// needed.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use warren::{
///     assembler::FramesetAssembler,
///     frame::{BasicProperties, ChannelId, ContentHeader, Method, Payload},
/// };
///
/// let mut assembler = FramesetAssembler::new();
/// let channel = ChannelId(1);
/// let deliver = Method::new(60, 60, Bytes::new());
/// let header = ContentHeader::new(60, 2, BasicProperties::default());
///
/// assert!(assembler.feed(channel, Payload::Method(deliver)).is_empty());
/// assert!(assembler.feed(channel, Payload::Header(header)).is_empty());
/// let done = assembler.feed(channel, Payload::Body(Bytes::from_static(b"hi")));
/// assert_eq!(done.len(), 1);
/// assert_eq!(done[0].body(), Bytes::from_static(b"hi"));
/// ```
#[derive(Debug, Default)]
pub struct FramesetAssembler {
    channels: HashMap<ChannelId, DeliveryState>,
}

impl FramesetAssembler {
    /// Create an assembler with no channel state.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Feed one payload addressed to `channel`.
    ///
    /// Returns the framesets the step completed, in emission order: none
    /// while a delivery is still accumulating, one when a delivery
    /// completes, and two when a payload interrupts an open delivery and
    /// itself completes immediately.
    ///
    /// Heartbeats are discarded here, before any channel state is
    /// created or consulted; they produce no frameset and cannot disturb
    /// an accumulation in progress.
    pub fn feed(&mut self, channel: ChannelId, payload: Payload) -> Vec<Frameset> {
        if payload.is_heartbeat() {
            trace!("discarding heartbeat");
            return Vec::new();
        }

        let state = self.channels.entry(channel).or_default();
        let mut emitted = Vec::new();
        let mut next = Some(payload);
        while let Some(current) = next.take() {
            let advance = state.advance(channel, current);
            emitted.extend(advance.emitted);
            next = advance.replay;
        }
        emitted
    }

    /// Number of channels with assembly state allocated.
    #[must_use]
    pub fn channel_count(&self) -> usize { self.channels.len() }

    /// Whether `channel` has a delivery in flight (a content-declaring
    /// method seen whose content has not yet completed).
    #[must_use]
    pub fn in_delivery(&self, channel: ChannelId) -> bool {
        self.channels
            .get(&channel)
            .is_some_and(|state| !state.is_idle())
    }
}
