//! Per-channel reassembly of frames into framesets.
//!
//! Content on the wire is declared once, as a method followed by a
//! header naming a total body size, but delivered across any number of
//! independently-sized body frames. Each channel therefore runs a small
//! state machine: `Idle` until a content-declaring method arrives,
//! `AwaitingHeader` until the content header follows, then
//! `Accumulating` body fragments until one of two termination conditions
//! fires:
//!
//! - the accumulated byte count reaches the header's declared body size
//!   (immediately, with no body frames at all, when the declared size is
//!   zero), or
//! - a non-body frame appears on the channel, which unambiguously moves
//!   the stream on: the partial delivery is emitted as-is and the
//!   interrupting payload is re-processed from `Idle`.
//!
//! [`FramesetAssembler`] keys one state machine per channel, created
//! lazily and kept for the life of the connection. Heartbeats are
//! discarded before any channel state is touched: they are transport
//! liveness noise and never interrupt an accumulation in progress.

mod channel;
mod state;

pub use state::FramesetAssembler;
