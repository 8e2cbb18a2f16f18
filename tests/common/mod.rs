//! Shared utilities for integration tests.
//!
//! Provides a scripted transport that plays back pre-encoded broker
//! frames while counting read requests, a frameset spy that records what
//! the reader loop dispatched, and fixtures for the handful of methods
//! the scenarios use.

// Items in this shared module may not be used by all test binaries that import it.
#![allow(
    dead_code,
    reason = "shared test utilities are not used by all test binaries"
)]

use std::{
    collections::VecDeque,
    io,
    sync::{
        Arc,
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use warren::{
    codec::encode_frame,
    frame::{BasicProperties, ChannelId, ContentHeader, Frame, Frameset, Method, Payload},
    reader::Transport,
};

/// `channel.open-ok`: contentless.
pub fn channel_open_ok() -> Method { Method::new(20, 11, Bytes::new()) }

/// `connection.start`: contentless.
pub fn connection_start() -> Method { Method::new(10, 10, Bytes::new()) }

/// `basic.get-ok` for the given queue: declares content.
pub fn basic_get_ok(queue: &str) -> Method {
    Method::new(60, 71, Bytes::copy_from_slice(queue.as_bytes()))
}

/// `basic.deliver`: declares content.
pub fn basic_deliver() -> Method { Method::new(60, 60, Bytes::from_static(b"somekey")) }

/// A content header in the style the scenarios use.
pub fn content_header(class_id: u16, body_size: u64) -> ContentHeader {
    ContentHeader::new(
        class_id,
        body_size,
        BasicProperties {
            content_type: Some("text/flame".into()),
            ..BasicProperties::default()
        },
    )
}

/// Plays back a fixed sequence of envelopes, one per read request.
///
/// The broker side of each scenario is scripted up front with
/// [`ScriptedTransportBuilder`]; the transport then serves one envelope
/// per `read_frame` call and reports an orderly close when the script is
/// exhausted. Read requests are counted so tests can assert that the
/// loop issues exactly one per envelope and never speculates.
pub struct ScriptedTransport {
    script: VecDeque<Bytes>,
    reads_issued: Arc<AtomicUsize>,
}

impl ScriptedTransport {
    pub fn builder() -> ScriptedTransportBuilder {
        ScriptedTransportBuilder {
            script: VecDeque::new(),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn read_frame(&mut self) -> io::Result<Option<Bytes>> {
        self.reads_issued.fetch_add(1, Ordering::SeqCst);
        Ok(self.script.pop_front())
    }

    // The reader loop never writes; scripted scenarios discard outbound
    // bytes.
    async fn write(&mut self, _bytes: &[u8]) -> io::Result<()> { Ok(()) }
}

pub struct ScriptedTransportBuilder {
    script: VecDeque<Bytes>,
}

impl ScriptedTransportBuilder {
    /// Script the broker sending `payload` on `channel`.
    #[must_use]
    pub fn server_sends(mut self, channel: u16, payload: Payload) -> Self {
        let mut buf = BytesMut::new();
        encode_frame(&Frame::new(ChannelId(channel), payload), &mut buf)
            .expect("test frames encode");
        self.script.push_back(buf.freeze());
        self
    }

    /// Script the broker sending raw envelope bytes verbatim.
    #[must_use]
    pub fn server_sends_raw(mut self, bytes: Bytes) -> Self {
        self.script.push_back(bytes);
        self
    }

    /// Finish the script, returning the transport and its read counter.
    pub fn build(self) -> (ScriptedTransport, Arc<AtomicUsize>) {
        let reads_issued = Arc::new(AtomicUsize::new(0));
        let transport = ScriptedTransport {
            script: self.script,
            reads_issued: Arc::clone(&reads_issued),
        };
        (transport, reads_issued)
    }
}

/// Records every frameset the reader loop dispatches.
#[derive(Clone, Default)]
pub struct FramesetSpy {
    received: Arc<Mutex<Vec<Frameset>>>,
}

impl FramesetSpy {
    pub fn new() -> Self { Self::default() }

    /// A `FrameHandler` feeding this spy.
    pub fn handler(&self) -> impl FnMut(Frameset) + use<> {
        let received = Arc::clone(&self.received);
        move |frameset| received.lock().expect("spy lock").push(frameset)
    }

    pub fn received(&self) -> Vec<Frameset> {
        self.received.lock().expect("spy lock").clone()
    }

    pub fn last(&self) -> Option<Frameset> {
        self.received.lock().expect("spy lock").last().cloned()
    }

    pub fn count(&self) -> usize { self.received.lock().expect("spy lock").len() }
}
