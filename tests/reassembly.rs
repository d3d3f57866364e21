//! End-to-end scenarios from the protocol's worked examples, driven purely
//! through the public API (`Reassembler::push`/`tick`).

use mvn_stream::header::HEADER_LENGTH;
use mvn_stream::payload::TypedPayload;
use mvn_stream::telemetry::RecordingTelemetrySink;
use mvn_stream::{NullTelemetrySink, ReassemblerConfig, Reassembler};

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
    v.extend_from_slice(&1000u32.to_be_bytes());
    v.push(character_id);
    v.push(body_segment_count);
    v.push(0);
    v.push(0);
    v.extend_from_slice(&[0, 0]);
    v.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    v.extend_from_slice(payload);
    v
}

#[test]
fn s1_minimal_euler_single_fragment() {
    let mut item = Vec::new();
    item.extend_from_slice(&1u32.to_be_bytes());
    item.extend_from_slice(&50.0f32.to_be_bytes());
    item.extend_from_slice(&0.0f32.to_be_bytes());
    item.extend_from_slice(&10.0f32.to_be_bytes());
    item.extend_from_slice(&0.0f32.to_be_bytes());
    item.extend_from_slice(&173.0f32.to_be_bytes());
    item.extend_from_slice(&0.0f32.to_be_bytes());

    let dgram = datagram("01", 42, true, 0, 1, 0, 23, &item);

    let mut reassembler = Reassembler::new(ReassemblerConfig::default());
    let mut sink = NullTelemetrySink;
    let frames = reassembler.push(&dgram, 0, &mut sink);

    assert_eq!(frames.len(), 1);
    let frame = &frames[0];
    assert_eq!(frame.character_id, 0);
    assert_eq!(frame.sample_counter, 42);
    assert_eq!(frame.time_code_ms, 1000);
    match &frame.payload {
        TypedPayload::Euler(items) => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].segment_id, 1);
            assert_eq!(items[0].position.x, 50.0);
            assert_eq!(items[0].euler_xyz.y, 173.0);
        }
        other => panic!("expected Euler payload, got {other:?}"),
    }
}

#[test]
fn s5_unknown_type_is_skipped_then_stream_continues() {
    let mut reassembler = Reassembler::new(ReassemblerConfig::default());
    let mut sink = RecordingTelemetrySink::default();

    let unknown = datagram("99", 1, true, 0, 0, 0, 23, &[]);
    assert!(reassembler.push(&unknown, 0, &mut sink).is_empty());
    assert_eq!(sink.events.len(), 1);

    let mut item = Vec::new();
    item.extend_from_slice(&1u32.to_be_bytes());
    item.extend_from_slice(&[0u8; 24]);
    let good = datagram("01", 2, true, 0, 1, 0, 23, &item);
    let frames = reassembler.push(&good, 1, &mut sink);
    assert_eq!(frames.len(), 1);
}

#[test]
fn s3_lost_tail_is_evicted_without_emitting_a_frame() {
    let mut reassembler = Reassembler::new(ReassemblerConfig::default());
    let mut sink = RecordingTelemetrySink::default();

    let mut item = Vec::new();
    item.extend_from_slice(&1u32.to_be_bytes());
    item.extend_from_slice(&[0u8; 24]);
    let first_fragment = datagram("01", 5, false, 0, 1, 0, 23, &item);

    assert!(reassembler.push(&first_fragment, 0, &mut sink).is_empty());
    let evictions = reassembler.tick(501, &mut sink);
    assert_eq!(evictions.len(), 1);
    assert_eq!(evictions[0].sample_counter, 5);
}
