//! Reassembler output types: what gets handed to a sink, and what gets
//! reported when a partial frame is evicted instead.

use crate::header::MessageType;
use crate::payload::TypedPayload;
use crate::telemetry::EvictionReason;

/// One completed, fully reassembled sampling instance, ready for a sink.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompletedFrame {
    pub character_id: u8,
    pub sample_counter: u32,
    pub time_code_ms: u32,
    pub message_type: MessageType,
    pub payload: TypedPayload,
}

/// A partial frame evicted before completing; never carries a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Eviction {
    pub character_id: u8,
    pub sample_counter: u32,
    pub reason: EvictionReason,
}

/// A consumer of completed frames. Sinks have no return channel:
/// they cannot reject or throttle frames, matching the reassembler's
/// real-time delivery guarantee.
pub trait Sink {
    fn on_frame(&mut self, frame: CompletedFrame);
}

/// A [`Sink`] that just collects every frame it receives, for tests and
/// simple embeddings that poll afterwards instead of reacting inline.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub frames: Vec<CompletedFrame>,
}

impl Sink for CollectingSink {
    fn on_frame(&mut self, frame: CompletedFrame) {
        self.frames.push(frame);
    }
}
