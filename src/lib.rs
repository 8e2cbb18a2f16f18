//! Client-side framing and frameset reassembly for AMQP 0-9-1
//! connections.
//!
//! This crate turns the raw byte stream arriving from a broker into
//! discrete, semantically complete deliveries (framesets) and hands
//! them to a consumer one at a time, in arrival order. Content is split
//! across an unbounded number of independently-sized frames, so each
//! channel runs a small state machine that tracks accumulation and
//! terminates it when the declared byte count is reached, when the
//! declared count is zero, or when a non-body frame interrupts; server
//! heartbeats are discarded transparently without disturbing any
//! channel's state.
//!
//! Out of scope, by design: the method catalogue (argument bytes stay
//! undecoded), handshake and channel lifecycle, TLS and reconnection,
//! and everything downstream of the frame handler.

pub mod assembler;
pub mod codec;
pub mod frame;
pub mod reader;

pub use assembler::FramesetAssembler;
pub use frame::{
    BasicProperties,
    ChannelId,
    ContentHeader,
    Frame,
    Frameset,
    Method,
    Payload,
};
pub use reader::{FrameHandler, ReaderError, ReaderLoop, StreamTransport, Transport};
