//! Frame reassembler: a state machine per `(character_id, sample_counter)`
//! key, bounded by a per-character LRU, a stale-sample window, and a
//! wall-clock timeout.

use std::collections::{BTreeMap, HashMap, VecDeque};

use bytes::{Bytes, BytesMut};

use crate::config::ReassemblerConfig;
use crate::frame::{CompletedFrame, Eviction};
use crate::header::{decode_datagram, Header};
use crate::payload::decode_payload;
use crate::telemetry::{EvictionReason, Telemetry, TelemetrySink};

type Key = (u8, u32);

struct PartialFrame {
    header: Header,
    fragments: BTreeMap<u8, Bytes>,
    last_seen: bool,
    highest_index: u8,
    first_seen_ms: u64,
}

impl PartialFrame {
    fn seed(header: Header, fragment_index: u8, payload: Bytes, now_ms: u64) -> Self {
        let mut fragments = BTreeMap::new();
        let last_seen = header.is_last;
        fragments.insert(fragment_index, payload);
        Self {
            header,
            fragments,
            last_seen,
            highest_index: fragment_index,
            first_seen_ms: now_ms,
        }
    }

    fn matches(&self, header: &Header) -> bool {
        self.header.msg_type_code == header.msg_type_code
            && self.header.body_segment_count == header.body_segment_count
            && self.header.prop_count == header.prop_count
            && self.header.finger_segment_count == header.finger_segment_count
    }

    fn insert(&mut self, header: &Header, fragment_index: u8, payload: Bytes) {
        self.last_seen |= header.is_last;
        self.highest_index = self.highest_index.max(fragment_index);
        self.fragments.insert(fragment_index, payload);
    }

    fn is_complete(&self) -> bool {
        self.last_seen && self.fragments.len() == self.highest_index as usize + 1
    }

    fn concat_payload(&self) -> Bytes {
        let mut buf = BytesMut::new();
        for (_, chunk) in self.fragments.iter() {
            buf.extend_from_slice(chunk);
        }
        buf.freeze()
    }
}

#[derive(Default)]
struct CharacterState {
    order: VecDeque<u32>,
}

/// Stateful, synchronous reassembler. Not reentrant; wrap under mutual
/// exclusion to share across threads.
pub struct Reassembler {
    config: ReassemblerConfig,
    partials: HashMap<Key, PartialFrame>,
    characters: HashMap<u8, CharacterState>,
}

impl Reassembler {
    pub fn new(config: ReassemblerConfig) -> Self {
        Self {
            config,
            partials: HashMap::new(),
            characters: HashMap::new(),
        }
    }

    /// Decodes one datagram and folds it into the reassembly table, returning
    /// zero or more newly-completed frames. Malformed datagrams are
    /// discarded with telemetry, never surfaced as an `Err` here — the
    /// reassembler's job is to keep going.
    pub fn push(&mut self, bytes: &[u8], now_ms: u64, telemetry: &mut dyn TelemetrySink) -> Vec<CompletedFrame> {
        let (header, payload) = match decode_datagram(bytes, self.config.lenient_length) {
            Ok(pair) => pair,
            Err(err) => {
                self.report_decode_error(&err, telemetry);
                return Vec::new();
            }
        };

        let message_type = match header.message_type() {
            Some(mt) => mt,
            None => {
                telemetry.report(Telemetry::BadMessageType { code: header.msg_type_code });
                return Vec::new();
            }
        };

        // Single-fragment fast path: skip the table entirely.
        if header.is_last && header.fragment_index == 0 {
            return match decode_payload(message_type, &header, &payload, telemetry) {
                Ok(typed) => vec![CompletedFrame {
                    character_id: header.character_id,
                    sample_counter: header.sample_counter,
                    time_code_ms: header.time_code_ms,
                    message_type,
                    payload: typed,
                }],
                Err(err) => {
                    Self::report_payload_decode_error(&err, telemetry);
                    Vec::new()
                }
            };
        }

        self.evict_stale_samples(header.character_id, header.sample_counter, telemetry);

        let key = (header.character_id, header.sample_counter);
        let fragment_index = header.fragment_index;

        let is_new_key = !self.partials.contains_key(&key);
        let is_conflicting = match self.partials.get(&key) {
            Some(existing) => !existing.matches(&header),
            None => false,
        };

        if is_conflicting {
            telemetry.report(Telemetry::InconsistentFragment {
                character_id: header.character_id,
                sample_counter: header.sample_counter,
            });
        }

        if is_new_key || is_conflicting {
            self.partials
                .insert(key, PartialFrame::seed(header, fragment_index, payload, now_ms));
            if is_new_key {
                self.track_key(header.character_id, header.sample_counter, telemetry);
            }
        } else if let Some(partial) = self.partials.get_mut(&key) {
            partial.insert(&header, fragment_index, payload);
        }

        match self.partials.get(&key) {
            Some(partial) if partial.is_complete() => {}
            _ => return Vec::new(),
        }

        let partial = self.partials.remove(&key).expect("just checked present");
        if let Some(state) = self.characters.get_mut(&header.character_id) {
            state.order.retain(|&s| s != header.sample_counter);
        }

        match decode_payload(message_type, &partial.header, &partial.concat_payload(), telemetry) {
            Ok(typed) => vec![CompletedFrame {
                character_id: header.character_id,
                sample_counter: header.sample_counter,
                time_code_ms: partial.header.time_code_ms,
                message_type,
                payload: typed,
            }],
            Err(err) => {
                Self::report_payload_decode_error(&err, telemetry);
                Vec::new()
            }
        }
    }

    /// Drives wall-clock eviction. Callers that don't need
    /// timeouts may omit calling this entirely.
    pub fn tick(&mut self, now_ms: u64, telemetry: &mut dyn TelemetrySink) -> Vec<Eviction> {
        let timeout = self.config.reassembly_timeout_ms;
        let expired: Vec<Key> = self
            .partials
            .iter()
            .filter(|(_, partial)| now_ms.saturating_sub(partial.first_seen_ms) >= timeout)
            .map(|(key, _)| *key)
            .collect();

        let mut evictions = Vec::with_capacity(expired.len());
        for key in expired {
            self.partials.remove(&key);
            if let Some(state) = self.characters.get_mut(&key.0) {
                state.order.retain(|&s| s != key.1);
            }
            let eviction = Eviction {
                character_id: key.0,
                sample_counter: key.1,
                reason: EvictionReason::WallClockTimeout,
            };
            telemetry.report(Telemetry::Incomplete {
                character_id: eviction.character_id,
                sample_counter: eviction.sample_counter,
                reason: eviction.reason,
            });
            evictions.push(eviction);
        }
        evictions
    }

    fn report_decode_error(&self, err: &crate::error::Error, telemetry: &mut dyn TelemetrySink) {
        use crate::error::Error;
        match err {
            Error::BadMagic => {
                if self.config.strict_magic {
                    telemetry.report(Telemetry::BadMagic);
                }
            }
            Error::Truncated { .. } => telemetry.report(Telemetry::Truncated),
            Error::LengthMismatch { declared, available } => {
                telemetry.report(Telemetry::LengthMismatchClamped {
                    declared: *declared,
                    available: *available,
                });
            }
            Error::BadMessageType(digits) => {
                telemetry.report(Telemetry::BadMessageType { code: digits[0] });
            }
            _ => {}
        }
    }

    /// Maps a `decode_payload` failure to its telemetry event. Unlike
    /// `report_decode_error` (header/datagram level), these conditions are
    /// never gated by config — a misaligned or malformed payload is always
    /// worth reporting.
    fn report_payload_decode_error(err: &crate::error::Error, telemetry: &mut dyn TelemetrySink) {
        use crate::error::Error;
        match err {
            Error::MisalignedPayload { .. } => telemetry.report(Telemetry::MisalignedPayload),
            Error::BadTimeCode => telemetry.report(Telemetry::BadTimeCode),
            Error::Truncated { .. } => telemetry.report(Telemetry::Truncated),
            _ => {}
        }
    }

    fn evict_stale_samples(&mut self, character_id: u8, sample_counter: u32, telemetry: &mut dyn TelemetrySink) {
        let window = self.config.reassembly_window_samples;
        let cutoff = sample_counter.saturating_sub(window);
        let state = match self.characters.get_mut(&character_id) {
            Some(state) => state,
            None => return,
        };
        let stale: Vec<u32> = state.order.iter().copied().filter(|&s| s < cutoff).collect();
        for s in stale {
            state.order.retain(|&x| x != s);
            if self.partials.remove(&(character_id, s)).is_some() {
                telemetry.report(Telemetry::Incomplete {
                    character_id,
                    sample_counter: s,
                    reason: EvictionReason::StaleSample,
                });
            }
        }
    }

    fn track_key(&mut self, character_id: u8, sample_counter: u32, telemetry: &mut dyn TelemetrySink) {
        let capacity = self.config.reassembly_capacity_per_character;
        let state = self.characters.entry(character_id).or_default();
        state.order.push_back(sample_counter);
        while state.order.len() > capacity {
            if let Some(evicted) = state.order.pop_front() {
                if self.partials.remove(&(character_id, evicted)).is_some() {
                    telemetry.report(Telemetry::Incomplete {
                        character_id,
                        sample_counter: evicted,
                        reason: EvictionReason::LruCapacity,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HEADER_LENGTH;
    use crate::payload::TypedPayload;
    use crate::telemetry::{NullTelemetrySink, RecordingTelemetrySink};

    fn datagram(
        msg_type: &str,
        sample_counter: u32,
        is_last: bool,
        fragment_index: u8,
        item_count: u8,
        character_id: u8,
        body_segment_count: u8,
        payload: &[u8],
    ) -> Vec<u8> {
        let mut v = Vec::with_capacity(HEADER_LENGTH + payload.len());
        v.extend_from_slice(b"MXTP");
        v.extend_from_slice(msg_type.as_bytes());
        v.extend_from_slice(&sample_counter.to_be_bytes());
        let counter_byte = (if is_last { 0x80 } else { 0 }) | (fragment_index & 0x7F);
        v.push(counter_byte);
        v.push(item_count);
        v.extend_from_slice(&0u32.to_be_bytes());
        v.push(character_id);
        v.push(body_segment_count);
        v.push(0);
        v.push(0);
        v.extend_from_slice(&[0, 0]);
        v.extend_from_slice(&(payload.len() as u16).to_be_bytes());
        v.extend_from_slice(payload);
        v
    }

    fn euler_item_bytes(segment_id: u32) -> Vec<u8> {
        let mut v = Vec::new();
        v.extend_from_slice(&segment_id.to_be_bytes());
        v.extend_from_slice(&[0u8; 24]);
        v
    }

    #[test]
    fn s1_single_fragment_fast_path() {
        let mut reassembler = Reassembler::new(ReassemblerConfig::default());
        let mut sink = NullTelemetrySink;
        let payload = euler_item_bytes(1);
        let dgram = datagram("01", 42, true, 0, 1, 0, 23, &payload);
        let frames = reassembler.push(&dgram, 0, &mut sink);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].sample_counter, 42);
        assert!(matches!(frames[0].payload, TypedPayload::Euler(_)));
        assert!(reassembler.partials.is_empty());
    }

    #[test]
    fn s2_two_fragment_reassembly() {
        let mut reassembler = Reassembler::new(ReassemblerConfig::default());
        let mut sink = NullTelemetrySink;

        let mut payload_a = Vec::new();
        for id in 1..=12u32 {
            payload_a.extend(euler_item_bytes(id));
        }
        let mut payload_b = Vec::new();
        for id in 13..=23u32 {
            payload_b.extend(euler_item_bytes(id));
        }

        let frag_a = datagram("02", 100, false, 0, 12, 0, 23, &fix_quat_stride(&payload_a));
        let frag_b = datagram("02", 100, true, 1, 11, 0, 23, &fix_quat_stride(&payload_b));

        assert!(reassembler.push(&frag_a, 0, &mut sink).is_empty());
        let frames = reassembler.push(&frag_b, 1, &mut sink);
        assert_eq!(frames.len(), 1);
        match &frames[0].payload {
            TypedPayload::Quaternion(items) => assert_eq!(items.len(), 23),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    // quaternion items are 32 bytes/item; pad each 28-byte euler-shaped item
    // with 4 extra zero bytes to exercise the two-fragment path without
    // hand-writing a second item encoder in this test module.
    fn fix_quat_stride(euler_shaped: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        for chunk in euler_shaped.chunks(28) {
            out.extend_from_slice(chunk);
            out.extend_from_slice(&[0u8; 4]);
        }
        out
    }

    #[test]
    fn s3_lost_tail_evicts_on_tick() {
        let mut reassembler = Reassembler::new(ReassemblerConfig::default());
        let mut sink = RecordingTelemetrySink::default();
        let payload = euler_item_bytes(1);
        let dgram = datagram("01", 5, false, 0, 1, 0, 23, &payload);
        assert!(reassembler.push(&dgram, 0, &mut sink).is_empty());

        let evictions = reassembler.tick(501, &mut sink);
        assert_eq!(evictions.len(), 1);
        assert_eq!(evictions[0].character_id, 0);
        assert_eq!(evictions[0].sample_counter, 5);
        assert!(reassembler.partials.is_empty());
    }

    #[test]
    fn s4_interleaved_characters_both_complete() {
        let mut reassembler = Reassembler::new(ReassemblerConfig::default());
        let mut sink = NullTelemetrySink;
        let payload = euler_item_bytes(1);

        let char0_a = datagram("01", 7, false, 0, 1, 0, 23, &payload);
        let char1_a = datagram("01", 7, false, 0, 1, 1, 23, &payload);
        let char0_b = datagram("01", 7, true, 1, 1, 0, 23, &payload);
        let char1_b = datagram("01", 7, true, 1, 1, 1, 23, &payload);

        assert!(reassembler.push(&char0_a, 0, &mut sink).is_empty());
        assert!(reassembler.push(&char1_a, 0, &mut sink).is_empty());
        let frames0 = reassembler.push(&char0_b, 0, &mut sink);
        let frames1 = reassembler.push(&char1_b, 0, &mut sink);
        assert_eq!(frames0.len(), 1);
        assert_eq!(frames1.len(), 1);
        assert_eq!(frames0[0].character_id, 0);
        assert_eq!(frames1[0].character_id, 1);
    }

    #[test]
    fn s5_unknown_message_type_skips_and_continues() {
        let mut reassembler = Reassembler::new(ReassemblerConfig::default());
        let mut sink = RecordingTelemetrySink::default();
        let unknown = datagram("99", 1, true, 0, 0, 0, 23, &[]);
        assert!(reassembler.push(&unknown, 0, &mut sink).is_empty());
        assert_eq!(sink.events.len(), 1);

        let payload = euler_item_bytes(1);
        let good = datagram("01", 2, true, 0, 1, 0, 23, &payload);
        let frames = reassembler.push(&good, 1, &mut sink);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn misaligned_single_fragment_payload_reports_telemetry() {
        let mut reassembler = Reassembler::new(ReassemblerConfig::default());
        let mut sink = RecordingTelemetrySink::default();
        // Euler items are 28 bytes; 10 bytes isn't a multiple of that.
        let bad = datagram("01", 1, true, 0, 1, 0, 23, &[0u8; 10]);
        assert!(reassembler.push(&bad, 0, &mut sink).is_empty());
        assert!(sink.events.iter().any(|e| matches!(e, Telemetry::MisalignedPayload)));
    }

    #[test]
    fn inconsistent_fragment_resets_partial() {
        let mut reassembler = Reassembler::new(ReassemblerConfig::default());
        let mut sink = RecordingTelemetrySink::default();
        let payload = euler_item_bytes(1);
        let first = datagram("01", 9, false, 0, 1, 0, 23, &payload);
        let conflicting = datagram("01", 9, false, 1, 1, 0, 20, &payload);
        assert!(reassembler.push(&first, 0, &mut sink).is_empty());
        assert!(reassembler.push(&conflicting, 0, &mut sink).is_empty());
        assert!(sink
            .events
            .iter()
            .any(|e| matches!(e, Telemetry::InconsistentFragment { .. })));
    }

    #[test]
    fn per_character_lru_evicts_oldest() {
        let config = ReassemblerConfig {
            reassembly_capacity_per_character: 2,
            ..ReassemblerConfig::default()
        };
        let mut reassembler = Reassembler::new(config);
        let mut sink = RecordingTelemetrySink::default();
        let payload = euler_item_bytes(1);

        for sample in 1..=3u32 {
            let dgram = datagram("01", sample, false, 0, 1, 0, 23, &payload);
            reassembler.push(&dgram, 0, &mut sink);
        }

        assert!(!reassembler.partials.contains_key(&(0, 1)));
        assert!(reassembler.partials.contains_key(&(0, 2)));
        assert!(reassembler.partials.contains_key(&(0, 3)));
        assert!(sink
            .events
            .iter()
            .any(|e| matches!(e, Telemetry::Incomplete { reason: EvictionReason::LruCapacity, .. })));
    }
}
