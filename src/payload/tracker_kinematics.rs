//! Type 23: Tracker kinematics. 44 bytes/item. Only segments
//! equipped with a physical tracker appear; item order does not follow
//! segment index, but each item is still segment-addressed and subject to
//! the same range check as any other segment-keyed type.

use bytes::{BufMut, BytesMut};

use super::common::{decode_segment_items, Quat, Vec3};
use crate::error::Result;
use crate::header::Header;
use crate::telemetry::TelemetrySink;
use crate::wire::Cursor;

pub const STRIDE: usize = 44;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct TrackerKinematicsItem {
    pub segment_id: u32,
    pub quat: Quat,
    pub free_acceleration: Vec3,
    pub magnetic_field: Vec3,
}

pub fn decode(header: &Header, bytes: &[u8], telemetry: &mut dyn TelemetrySink) -> Result<Vec<TrackerKinematicsItem>> {
    decode_segment_items(
        header,
        bytes,
        STRIDE,
        |item: &TrackerKinematicsItem| item.segment_id,
        |c: &mut Cursor| {
            Ok(TrackerKinematicsItem {
                segment_id: c.read_u32_be()?,
                quat: Quat::decode(c)?,
                free_acceleration: Vec3::decode(c)?,
                magnetic_field: Vec3::decode(c)?,
            })
        },
        telemetry,
    )
}

pub fn encode(items: &[TrackerKinematicsItem]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(items.len() * STRIDE);
    for item in items {
        buf.put_u32(item.segment_id);
        item.quat.encode(&mut buf);
        item.free_acceleration.encode(&mut buf);
        item.magnetic_field.encode(&mut buf);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::RecordingTelemetrySink;

    fn header() -> Header {
        Header {
            msg_type_code: 23,
            sample_counter: 1,
            is_last: true,
            fragment_index: 0,
            item_count: 2,
            time_code_ms: 0,
            character_id: 0,
            body_segment_count: 23,
            prop_count: 0,
            finger_segment_count: 0,
            payload_size: (2 * STRIDE) as u16,
        }
    }

    #[test]
    fn item_order_need_not_follow_segment_index() {
        let items = vec![
            TrackerKinematicsItem {
                segment_id: 7,
                quat: Quat { re: 1.0, ..Default::default() },
                free_acceleration: Vec3::default(),
                magnetic_field: Vec3::default(),
            },
            TrackerKinematicsItem {
                segment_id: 2,
                quat: Quat { re: 1.0, ..Default::default() },
                free_acceleration: Vec3::default(),
                magnetic_field: Vec3::default(),
            },
        ];
        let bytes = encode(&items);
        let mut sink = RecordingTelemetrySink::default();
        let decoded = decode(&header(), &bytes, &mut sink).unwrap();
        assert_eq!(decoded, items);
        assert!(sink.events.is_empty());
    }
}
