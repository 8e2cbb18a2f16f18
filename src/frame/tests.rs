//! Unit tests for the wire data model.

use bytes::Bytes;
use rstest::rstest;

use crate::frame::{BasicProperties, ChannelId, ContentHeader, Frame, Frameset, Method, Payload};

fn method(class_id: u16, method_id: u16) -> Method {
    Method::new(class_id, method_id, Bytes::new())
}

#[rstest]
#[case::basic_publish(60, 40, true)]
#[case::basic_return(60, 50, true)]
#[case::basic_deliver(60, 60, true)]
#[case::basic_get_ok(60, 71, true)]
#[case::basic_get_empty(60, 72, false)]
#[case::basic_ack(60, 80, false)]
#[case::channel_open_ok(20, 11, false)]
#[case::connection_start(10, 10, false)]
fn declares_content_matches_the_basic_content_methods(
    #[case] class_id: u16,
    #[case] method_id: u16,
    #[case] expected: bool,
) {
    assert_eq!(method(class_id, method_id).declares_content(), expected);
}

#[test]
fn method_equality_includes_argument_bytes() {
    let a = Method::new(60, 60, Bytes::from_static(b"\x00tag"));
    let b = Method::new(60, 60, Bytes::from_static(b"\x00tag"));
    let c = Method::new(60, 60, Bytes::from_static(b"\x00other"));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn frame_exposes_channel_and_payload() {
    let frame = Frame::new(ChannelId(42), Payload::Heartbeat);
    assert_eq!(frame.channel(), ChannelId(42));
    assert!(frame.payload().is_heartbeat());

    let (channel, payload) = frame.into_parts();
    assert_eq!(channel, ChannelId(42));
    assert_eq!(payload, Payload::Heartbeat);
}

#[test]
fn contentless_frameset_has_no_header_and_no_bodies() {
    let frameset = Frameset::contentless(ChannelId(1), method(60, 80));
    assert!(frameset.header().is_none());
    assert!(frameset.bodies().is_empty());
    assert_eq!(frameset.body_len(), 0);
    assert_eq!(frameset.body(), Bytes::new());
}

#[test]
fn frameset_body_concatenates_fragments_in_order() {
    let header = ContentHeader::new(60, 4, BasicProperties::default());
    let frameset = Frameset::with_content(
        ChannelId(1),
        method(60, 60),
        header,
        vec![Bytes::from_static(b"aa"), Bytes::from_static(b"bb")],
    );
    assert_eq!(frameset.body_len(), 4);
    assert_eq!(frameset.body(), Bytes::from_static(b"aabb"));
}

#[test]
fn frameset_equality_covers_header_and_bodies() {
    let build = || {
        Frameset::with_content(
            ChannelId(7),
            method(60, 71),
            ContentHeader::new(
                60,
                2,
                BasicProperties {
                    content_type: Some("text/plain".into()),
                    ..BasicProperties::default()
                },
            ),
            vec![Bytes::from_static(b"ok")],
        )
    };
    assert_eq!(build(), build());
    assert_ne!(build(), Frameset::contentless(ChannelId(7), method(60, 71)));
}

#[test]
fn default_properties_are_empty() {
    assert!(BasicProperties::default().is_empty());
    let with_priority = BasicProperties {
        priority: Some(4),
        ..BasicProperties::default()
    };
    assert!(!with_priority.is_empty());
}
