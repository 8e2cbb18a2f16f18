//! The single-channel delivery state machine.

use bytes::Bytes;
use log::warn;

use crate::frame::{ChannelId, ContentHeader, Frameset, Method, Payload};

/// Assembly state of one channel.
///
/// The transition function is total over (state, payload-variant): every
/// combination has an explicit arm, including the stray-content cases the
/// protocol should never produce.
#[derive(Debug, Default)]
pub(super) enum DeliveryState {
    /// No delivery in progress.
    #[default]
    Idle,
    /// A content-declaring method arrived; its header has not.
    AwaitingHeader {
        method: Method,
    },
    /// Header received; body fragments are being collected.
    Accumulating {
        method: Method,
        header: ContentHeader,
        bodies: Vec<Bytes>,
        received: u64,
    },
}

/// Outcome of feeding one payload into a channel's state machine: at most
/// one emitted frameset, and at most one payload to re-process from the
/// resulting state.
pub(super) struct Advance {
    pub emitted: Option<Frameset>,
    pub replay: Option<Payload>,
}

impl Advance {
    const fn none() -> Self {
        Self {
            emitted: None,
            replay: None,
        }
    }

    const fn emit(frameset: Frameset) -> Self {
        Self {
            emitted: Some(frameset),
            replay: None,
        }
    }

    const fn interrupt(frameset: Frameset, replay: Payload) -> Self {
        Self {
            emitted: Some(frameset),
            replay: Some(replay),
        }
    }
}

impl DeliveryState {
    pub(super) const fn is_idle(&self) -> bool { matches!(self, Self::Idle) }

    /// Apply one payload, returning what (if anything) completed.
    pub(super) fn advance(&mut self, channel: ChannelId, payload: Payload) -> Advance {
        match (std::mem::take(self), payload) {
            // Heartbeats are filtered before channel dispatch; should one
            // arrive here anyway it leaves the state untouched.
            (state, Payload::Heartbeat) => {
                *self = state;
                Advance::none()
            }

            (Self::Idle, Payload::Method(method)) if method.declares_content() => {
                *self = Self::AwaitingHeader { method };
                Advance::none()
            }
            (Self::Idle, Payload::Method(method)) => {
                Advance::emit(Frameset::contentless(channel, method))
            }
            (Self::Idle, Payload::Header(header)) => {
                warn!(
                    "channel {channel}: dropping content header (class {}) with no method in flight",
                    header.class_id()
                );
                Advance::none()
            }
            (Self::Idle, Payload::Body(chunk)) => {
                warn!(
                    "channel {channel}: dropping {} stray body bytes with no delivery in flight",
                    chunk.len()
                );
                Advance::none()
            }

            (Self::AwaitingHeader { method }, Payload::Header(header))
                if header.body_size() == 0 =>
            {
                Advance::emit(Frameset::with_content(channel, method, header, Vec::new()))
            }
            (Self::AwaitingHeader { method }, Payload::Header(header)) => {
                *self = Self::Accumulating {
                    method,
                    header,
                    bodies: Vec::new(),
                    received: 0,
                };
                Advance::none()
            }
            // The header never arrived; emit the bare method and let the
            // interrupting payload start over from Idle.
            (Self::AwaitingHeader { method }, interloper @ (Payload::Method(_) | Payload::Body(_))) => {
                Advance::interrupt(Frameset::contentless(channel, method), interloper)
            }

            (
                Self::Accumulating {
                    method,
                    header,
                    mut bodies,
                    received,
                },
                Payload::Body(chunk),
            ) => {
                let received = received.saturating_add(chunk.len() as u64);
                bodies.push(chunk);
                if received >= header.body_size() {
                    if received > header.body_size() {
                        warn!(
                            "channel {channel}: body overran its declared size \
                             ({received} bytes received, {} declared)",
                            header.body_size()
                        );
                    }
                    Advance::emit(Frameset::with_content(channel, method, header, bodies))
                } else {
                    *self = Self::Accumulating {
                        method,
                        header,
                        bodies,
                        received,
                    };
                    Advance::none()
                }
            }
            // A non-body frame terminates accumulation early: emit what
            // arrived, then re-process the interloper from Idle.
            (
                Self::Accumulating {
                    method,
                    header,
                    bodies,
                    ..
                },
                interloper @ (Payload::Method(_) | Payload::Header(_)),
            ) => Advance::interrupt(
                Frameset::with_content(channel, method, header, bodies),
                interloper,
            ),
        }
    }
}
