//! The connection reader loop.
//!
//! [`ReaderLoop`] owns the read → decode → assemble → dispatch cycle for
//! one connection. Exactly one read request is outstanding against the
//! [`Transport`] at any time: the loop awaits one whole frame envelope,
//! decodes it, feeds the payload into the per-channel assembler, and
//! hands any completed framesets to the [`FrameHandler`] synchronously,
//! all before the next read is requested. Handler call N therefore
//! strictly precedes the read that produces handler call N + 1, and a
//! slow handler stalls reading for every channel multiplexed on the
//! connection.
//!
//! There is no cancellation primitive at this layer: dropping the loop
//! or closing the transport stops reading, and any partially accumulated
//! channel state is abandoned without emission.

mod handler;
mod transport;

use log::{debug, trace};
use thiserror::Error;

pub use handler::FrameHandler;
pub use transport::{StreamTransport, Transport};

use crate::{
    assembler::FramesetAssembler,
    codec::{self, DecodeError},
    frame::ChannelId,
};

/// Errors that stop the reader loop.
///
/// None of these are recoverable at this layer: AMQP framing has no
/// self-describing resynchronisation point after a corrupt frame, and
/// reconnection is a higher-level responsibility.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// An inbound frame failed to decode; the loop issues no further
    /// reads.
    #[error("failed to decode inbound frame: {0}")]
    Decode(#[from] DecodeError),
    /// The transport failed mid-read.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
    /// The peer closed the connection at a frame boundary.
    #[error("connection closed by peer")]
    Disconnected,
}

/// Drives reads against a transport and dispatches completed framesets.
pub struct ReaderLoop<T, H> {
    transport: T,
    handler: H,
    assembler: FramesetAssembler,
}

impl<T, H> ReaderLoop<T, H>
where
    T: Transport,
    H: FrameHandler,
{
    /// Create a loop reading from `transport` and delivering to
    /// `handler`. The per-channel assembly state lives as long as the
    /// loop, one connection's worth.
    pub fn new(transport: T, handler: H) -> Self {
        Self {
            transport,
            handler,
            assembler: FramesetAssembler::new(),
        }
    }

    /// Perform exactly one read → decode → dispatch step.
    ///
    /// Awaits the next frame envelope, decodes it, feeds the payload to
    /// the channel's assembler, and invokes the handler once per
    /// completed frameset before returning. One call consumes exactly
    /// one read request; a content header declaring a zero body size
    /// completes its delivery within the same step, so no body read is
    /// ever issued for it.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::Disconnected`] when the peer has closed at
    /// a frame boundary, [`ReaderError::Io`] on transport failure, and
    /// [`ReaderError::Decode`] on a malformed frame. After any error the
    /// loop must not be driven further.
    pub async fn run_once(&mut self) -> Result<(), ReaderError> {
        let Some(envelope) = self.transport.read_frame().await? else {
            return Err(ReaderError::Disconnected);
        };
        let frame = codec::decode_frame(envelope)?;
        let (channel, payload) = frame.into_parts();
        trace!("frame received: channel={channel}");
        for frameset in self.assembler.feed(channel, payload) {
            self.handler.on_frameset(frameset);
        }
        Ok(())
    }

    /// Drive the read cycle until the connection closes or a step fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`ReaderError`] a step produces; the loop never
    /// resumes silently after one.
    pub async fn run(&mut self) -> Result<(), ReaderError> {
        debug!("reader loop running");
        loop {
            if let Err(err) = self.run_once().await {
                debug!("reader loop stopping: {err}");
                return Err(err);
            }
        }
    }

    /// Whether `channel` has a delivery in flight.
    #[must_use]
    pub fn in_delivery(&self, channel: ChannelId) -> bool {
        self.assembler.in_delivery(channel)
    }

    /// Release the transport and handler, abandoning any partially
    /// accumulated channel state.
    #[must_use]
    pub fn into_parts(self) -> (T, H) { (self.transport, self.handler) }
}
