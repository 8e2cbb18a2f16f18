//! The sink that receives completed framesets.

use crate::frame::Frameset;

/// Receives completed framesets synchronously, in arrival order.
///
/// The reader loop calls [`on_frameset`](Self::on_frameset) once per
/// completed frameset, before issuing its next read; ownership of the
/// frameset transfers to the handler. The handler may block, and while
/// it does no further reads are issued for any channel on the
/// connection.
///
/// Any `FnMut(Frameset)` closure is a handler, which keeps dispatch
/// adapters and test spies to one line:
///
/// ```
/// use bytes::Bytes;
/// use warren::{
///     frame::{ChannelId, Frameset, Method},
///     reader::FrameHandler,
/// };
///
/// let mut seen = Vec::new();
/// let mut handler = |frameset: Frameset| seen.push(frameset);
/// handler.on_frameset(Frameset::contentless(
///     ChannelId(1),
///     Method::new(20, 11, Bytes::new()),
/// ));
/// drop(handler);
/// assert_eq!(seen.len(), 1);
/// ```
pub trait FrameHandler {
    /// Take ownership of one completed frameset.
    fn on_frameset(&mut self, frameset: Frameset);
}

impl<F: FnMut(Frameset)> FrameHandler for F {
    fn on_frameset(&mut self, frameset: Frameset) { self(frameset); }
}
