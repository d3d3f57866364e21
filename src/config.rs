//! Runtime configuration. All configuration lives on a value passed to the
//! reassembler at construction; there is no global mutable state anywhere
//! in this crate.

use crate::segment::PointIdMultiplier;

/// Configuration for a [`crate::reassembler::Reassembler`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReassemblerConfig {
    /// Stale-sample cutoff window: how many samples behind the newest a
    /// partial frame may fall before it's evicted.
    pub reassembly_window_samples: u32,
    /// Per-character LRU capacity for in-flight partial frames.
    pub reassembly_capacity_per_character: usize,
    /// Wall-clock eviction timeout, in milliseconds.
    pub reassembly_timeout_ms: u64,
    /// Clamp `payload_size` mismatches instead of rejecting them.
    pub lenient_length: bool,
    /// Multiplier used to compose/decompose point wire ids.
    pub point_id_multiplier: PointIdMultiplier,
    /// Reject (vs. skip) datagrams whose magic isn't "MXTP".
    pub strict_magic: bool,
}

impl Default for ReassemblerConfig {
    fn default() -> Self {
        Self {
            reassembly_window_samples: 64,
            reassembly_capacity_per_character: 8,
            reassembly_timeout_ms: 500,
            lenient_length: true,
            point_id_multiplier: PointIdMultiplier::TwoFiftySix,
            strict_magic: true,
        }
    }
}
