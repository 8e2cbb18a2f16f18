//! The byte-stream boundary the reader loop reads from.

use std::io;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;

use crate::codec::EnvelopeCodec;

/// A connection byte stream with single-outstanding-request reads.
///
/// At most one `read_frame` call is in flight at a time; the reader
/// loop guarantees this by construction, awaiting each read's full
/// processing before requesting the next.
#[async_trait]
pub trait Transport: Send {
    /// Await the next whole frame envelope.
    ///
    /// `Ok(Some(bytes))` delivers exactly the bytes of one envelope:
    /// seven-byte header, declared-length payload, frame-end octet.
    /// `Ok(None)` reports an orderly end of stream at a frame boundary.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` on transport failure, including an end of
    /// stream that cuts a frame in half.
    async fn read_frame(&mut self) -> io::Result<Option<Bytes>>;

    /// Write pre-encoded envelope bytes to the peer.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` when the write fails.
    async fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// [`Transport`] over any async byte stream.
///
/// Envelope boundaries are recognised by [`EnvelopeCodec`]; the stream
/// may deliver bytes in any fragmentation and each frame is still
/// surfaced whole, exactly once.
pub struct StreamTransport<S> {
    framed: Framed<S, EnvelopeCodec>,
}

impl<S> StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap `stream` with the default frame-size cap.
    pub fn new(stream: S) -> Self {
        Self {
            framed: Framed::new(stream, EnvelopeCodec::new()),
        }
    }

    /// Wrap `stream`, refusing frames whose payload exceeds
    /// `max_frame_size` bytes.
    pub fn with_max_frame_size(stream: S, max_frame_size: usize) -> Self {
        Self {
            framed: Framed::new(stream, EnvelopeCodec::with_max_frame_size(max_frame_size)),
        }
    }

    /// Release the underlying stream, discarding any buffered bytes.
    pub fn into_inner(self) -> S { self.framed.into_inner() }
}

#[async_trait]
impl<S> Transport for StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn read_frame(&mut self) -> io::Result<Option<Bytes>> {
        self.framed.next().await.transpose()
    }

    async fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.framed.send(Bytes::copy_from_slice(bytes)).await
    }
}
