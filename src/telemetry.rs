//! Telemetry channel: every recoverable error and eviction is reported here
//! rather than aborting the receive loop. The crate never
//! configures a logger itself — like `rtp`/`webrtc-util`, it only depends
//! on the `log` facade and lets the embedding application wire up a
//! subscriber.

use std::fmt;

/// Why a partial frame was evicted without completing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize)]
pub enum EvictionReason {
    /// Per-character LRU capacity (`K`) exceeded.
    LruCapacity,
    /// Sample counter fell outside the stale-sample window (`W`).
    StaleSample,
    /// Partial frame exceeded the wall-clock timeout (`T`).
    WallClockTimeout,
}

impl fmt::Display for EvictionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EvictionReason::LruCapacity => "lru-capacity",
            EvictionReason::StaleSample => "stale-sample",
            EvictionReason::WallClockTimeout => "wall-clock-timeout",
        };
        f.write_str(s)
    }
}

/// A non-fatal, locally-recovered condition worth surfacing to an observer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Telemetry {
    /// A datagram was discarded because its first 4 bytes weren't "MXTP".
    BadMagic,
    /// A datagram's type code wasn't two ASCII digits, or wasn't in the
    /// recognized set (includes deprecated codes 04/10/11).
    BadMessageType { code: u8 },
    /// A datagram or fragment was shorter than required.
    Truncated,
    /// `payload_size` didn't match available bytes; clamped in lenient mode.
    LengthMismatchClamped { declared: usize, available: usize },
    /// A payload's length wasn't a multiple of its item stride; the whole
    /// frame was dropped.
    MisalignedPayload,
    /// A time code payload wasn't 12 bytes matching `DD:DD:DD.DDD`; the
    /// frame was dropped.
    BadTimeCode,
    /// A single item's segment id was out of range; the item was dropped
    /// but the frame continued decoding.
    SegmentOutOfRange { segment_id: u32, max: u32 },
    /// A fragment conflicted with its partial frame's header; the partial
    /// was discarded and a fresh one seeded.
    InconsistentFragment { character_id: u8, sample_counter: u32 },
    /// A partial frame was evicted before completing.
    Incomplete {
        character_id: u8,
        sample_counter: u32,
        reason: EvictionReason,
    },
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Telemetry::BadMagic => write!(f, "bad magic"),
            Telemetry::BadMessageType { code } => write!(f, "bad message type {code}"),
            Telemetry::Truncated => write!(f, "truncated datagram"),
            Telemetry::LengthMismatchClamped { declared, available } => write!(
                f,
                "payload_size mismatch, declared={declared} available={available}, clamped"
            ),
            Telemetry::MisalignedPayload => write!(f, "misaligned payload, frame dropped"),
            Telemetry::BadTimeCode => write!(f, "malformed time code, frame dropped"),
            Telemetry::SegmentOutOfRange { segment_id, max } => {
                write!(f, "segment id {segment_id} out of range (max {max}), item dropped")
            }
            Telemetry::InconsistentFragment { character_id, sample_counter } => write!(
                f,
                "inconsistent fragment for character={character_id} sample={sample_counter}, partial reset"
            ),
            Telemetry::Incomplete { character_id, sample_counter, reason } => write!(
                f,
                "incomplete frame evicted: character={character_id} sample={sample_counter} reason={reason}"
            ),
        }
    }
}

/// Sink for telemetry events. The default implementation logs through the
/// `log` facade at a level matched to severity; callers that want
/// programmatic access (metrics, tests) can supply their own.
pub trait TelemetrySink {
    fn report(&mut self, event: Telemetry);
}

/// Logs every event through the `log` crate: per-item conditions at
/// `debug`, anything that drops a frame or fragment at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTelemetrySink;

impl TelemetrySink for LogTelemetrySink {
    fn report(&mut self, event: Telemetry) {
        match &event {
            Telemetry::SegmentOutOfRange { .. } => log::debug!("{event}"),
            Telemetry::Incomplete { .. } => log::debug!("{event}"),
            _ => log::warn!("{event}"),
        }
    }
}

/// Discards every event. Useful in tests and for callers that genuinely
/// don't want telemetry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTelemetrySink;

impl TelemetrySink for NullTelemetrySink {
    fn report(&mut self, _event: Telemetry) {}
}

/// Collects every event in-memory, for tests that want to assert on
/// telemetry without a logger.
#[derive(Debug, Default, Clone)]
pub struct RecordingTelemetrySink {
    pub events: Vec<Telemetry>,
}

impl TelemetrySink for RecordingTelemetrySink {
    fn report(&mut self, event: Telemetry) {
        self.events.push(event);
    }
}
