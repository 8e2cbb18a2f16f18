//! Behavioural tests for the reader loop against a scripted broker.

mod common;

use bytes::Bytes;
use common::{
    FramesetSpy,
    ScriptedTransport,
    basic_deliver,
    basic_get_ok,
    channel_open_ok,
    connection_start,
    content_header,
};
use warren::{
    frame::{BasicProperties, ChannelId, ContentHeader, Frameset, Payload},
    reader::{ReaderError, ReaderLoop},
};

/// Heartbeats are consumed by the loop and never reach the handler.
#[tokio::test]
async fn skips_server_heartbeats() {
    let (transport, _reads) = ScriptedTransport::builder()
        .server_sends(0, Payload::Heartbeat)
        .server_sends(42, Payload::Method(channel_open_ok()))
        .build();
    let spy = FramesetSpy::new();
    let mut reader = ReaderLoop::new(transport, spy.handler());

    reader.run_once().await.expect("heartbeat step");
    reader.run_once().await.expect("method step");

    assert_eq!(
        spy.received(),
        vec![Frameset::contentless(ChannelId(42), channel_open_ok())]
    );
}

/// A contentless method is dispatched as soon as its frame arrives.
#[tokio::test]
async fn sends_decoded_contentless_frameset_to_frame_handler() {
    let (transport, _reads) = ScriptedTransport::builder()
        .server_sends(42, Payload::Method(connection_start()))
        .build();
    let spy = FramesetSpy::new();
    let mut reader = ReaderLoop::new(transport, spy.handler());

    reader.run_once().await.expect("method step");

    assert_eq!(
        spy.last(),
        Some(Frameset::contentless(ChannelId(42), connection_start()))
    );
}

/// An unrelated method mid-body terminates the delivery early: the
/// partial frameset is dispatched first, the interloper right after.
#[tokio::test]
async fn handles_content_terminated_by_non_content_frame() {
    let method = basic_get_ok("my.great.queue");
    let header = content_header(10, 999_999);
    let (transport, _reads) = ScriptedTransport::builder()
        .server_sends(42, Payload::Method(method.clone()))
        .server_sends(42, Payload::Header(header.clone()))
        .server_sends(42, Payload::Body(Bytes::from_static(b"aa")))
        .server_sends(42, Payload::Body(Bytes::from_static(b"bb")))
        .server_sends(42, Payload::Method(basic_deliver()))
        .build();
    let spy = FramesetSpy::new();
    let mut reader = ReaderLoop::new(transport, spy.handler());

    for _ in 0..5 {
        reader.run_once().await.expect("scripted step");
    }

    assert_eq!(spy.count(), 2);
    assert_eq!(
        spy.received()[0],
        Frameset::with_content(
            ChannelId(42),
            method,
            header,
            vec![Bytes::from_static(b"aa"), Bytes::from_static(b"bb")]
        )
    );
    // basic.deliver declares content, so its own delivery stays open.
    assert_eq!(spy.received()[1].method(), &basic_deliver());
    assert!(reader.in_delivery(ChannelId(42)));
}

/// Accumulation ends exactly when the declared byte count is reached.
#[tokio::test]
async fn handles_content_terminated_by_end_of_data_size() {
    let method = basic_get_ok("my.great.queue");
    let header = content_header(10, 4);
    let (transport, reads) = ScriptedTransport::builder()
        .server_sends(42, Payload::Method(method.clone()))
        .server_sends(42, Payload::Header(header.clone()))
        .server_sends(42, Payload::Body(Bytes::from_static(b"aa")))
        .server_sends(42, Payload::Body(Bytes::from_static(b"bb")))
        .build();
    let spy = FramesetSpy::new();
    let mut reader = ReaderLoop::new(transport, spy.handler());

    for _ in 0..4 {
        reader.run_once().await.expect("scripted step");
    }

    assert_eq!(
        spy.received(),
        vec![Frameset::with_content(
            ChannelId(42),
            method,
            header,
            vec![Bytes::from_static(b"aa"), Bytes::from_static(b"bb")]
        )]
    );
    // One read per envelope, nothing speculative.
    assert_eq!(reads.load(std::sync::atomic::Ordering::SeqCst), 4);
    assert!(!reader.in_delivery(ChannelId(42)));
}

/// A zero body size completes at the header frame; no body read happens.
#[tokio::test]
async fn delivery_with_zero_body_size_does_not_cause_body_frame_read() {
    let (transport, reads) = ScriptedTransport::builder()
        .server_sends(42, Payload::Method(basic_deliver()))
        .server_sends(
            42,
            Payload::Header(ContentHeader::new(60, 0, BasicProperties::default())),
        )
        .build();
    let spy = FramesetSpy::new();
    let mut reader = ReaderLoop::new(transport, spy.handler());

    reader.run_once().await.expect("deliver step");
    let before = reads.load(std::sync::atomic::Ordering::SeqCst);
    reader.run_once().await.expect("header step");
    let after = reads.load(std::sync::atomic::Ordering::SeqCst);

    // The header step consumed its own read and nothing more.
    assert_eq!(after, before + 1);
    assert_eq!(spy.count(), 1);
    assert!(!reader.in_delivery(ChannelId(42)));
}

/// The zero-body frameset still reaches the handler, header included.
#[tokio::test]
async fn delivery_with_zero_body_size_gets_sent_to_frame_handler() {
    let header = ContentHeader::new(60, 0, BasicProperties::default());
    let (transport, _reads) = ScriptedTransport::builder()
        .server_sends(42, Payload::Method(basic_deliver()))
        .server_sends(42, Payload::Header(header.clone()))
        .build();
    let spy = FramesetSpy::new();
    let mut reader = ReaderLoop::new(transport, spy.handler());

    reader.run_once().await.expect("deliver step");
    reader.run_once().await.expect("header step");

    assert_eq!(
        spy.last(),
        Some(Frameset::with_content(
            ChannelId(42),
            basic_deliver(),
            header,
            Vec::new()
        ))
    );
}

/// A malformed frame stops the loop before any further read.
#[tokio::test]
async fn decode_failure_is_fatal_to_the_loop() {
    // A method envelope whose frame-end octet is wrong.
    let (transport, reads) = ScriptedTransport::builder()
        .server_sends_raw(Bytes::from_static(
            b"\x01\x00\x2a\x00\x00\x00\x04\x00\x14\x00\x0b\xab",
        ))
        .server_sends(42, Payload::Method(channel_open_ok()))
        .build();
    let spy = FramesetSpy::new();
    let mut reader = ReaderLoop::new(transport, spy.handler());

    let err = reader.run().await.expect_err("corrupt frame must stop the loop");
    assert!(matches!(err, ReaderError::Decode(_)));
    assert_eq!(spy.count(), 0);
    // Only the corrupt frame was read; the loop never reached the
    // healthy one scripted after it.
    assert_eq!(reads.load(std::sync::atomic::Ordering::SeqCst), 1);
}

/// End of script surfaces as a disconnect and abandons partial state.
#[tokio::test]
async fn disconnect_abandons_partial_accumulation() {
    let (transport, _reads) = ScriptedTransport::builder()
        .server_sends(42, Payload::Method(basic_get_ok("q")))
        .server_sends(42, Payload::Header(content_header(10, 100)))
        .server_sends(42, Payload::Body(Bytes::from_static(b"partial")))
        .build();
    let spy = FramesetSpy::new();
    let mut reader = ReaderLoop::new(transport, spy.handler());

    let err = reader.run().await.expect_err("script runs out");
    assert!(matches!(err, ReaderError::Disconnected));
    // Nothing was complete, so nothing was delivered.
    assert_eq!(spy.count(), 0);
}

/// Framesets from interleaved channels come out in arrival order.
#[tokio::test]
async fn framesets_are_dispatched_in_arrival_order_across_channels() {
    let (transport, _reads) = ScriptedTransport::builder()
        .server_sends(1, Payload::Method(basic_deliver()))
        .server_sends(2, Payload::Method(channel_open_ok()))
        .server_sends(1, Payload::Header(content_header(60, 2)))
        .server_sends(3, Payload::Method(connection_start()))
        .server_sends(1, Payload::Body(Bytes::from_static(b"ok")))
        .build();
    let spy = FramesetSpy::new();
    let mut reader = ReaderLoop::new(transport, spy.handler());

    let err = reader.run().await.expect_err("script runs out");
    assert!(matches!(err, ReaderError::Disconnected));

    let channels: Vec<u16> = spy
        .received()
        .iter()
        .map(|frameset| frameset.channel().into())
        .collect();
    assert_eq!(channels, vec![2, 3, 1]);
    assert_eq!(spy.received()[2].body(), Bytes::from_static(b"ok"));
}
