//! Type 05: Unity3D pose. Y-up, left-handed, re-permuted segment order;
//! 32 bytes/item, same item shape as type 02. Pelvis and
//! props are global, everything else is local to its parent in the fixed
//! Unity3D hierarchy; fingers are not addressable under this order.

use bytes::{BufMut, BytesMut};

use super::common::{decode_segment_items, Quat, Vec3};
use crate::error::Result;
use crate::header::Header;
use crate::telemetry::TelemetrySink;
use crate::wire::Cursor;

pub const STRIDE: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Unity3dItem {
    pub segment_id: u32,
    pub position: Vec3,
    pub quat: Quat,
}

pub fn decode(header: &Header, bytes: &[u8], telemetry: &mut dyn TelemetrySink) -> Result<Vec<Unity3dItem>> {
    decode_segment_items(
        header,
        bytes,
        STRIDE,
        |item: &Unity3dItem| item.segment_id,
        |c: &mut Cursor| {
            Ok(Unity3dItem {
                segment_id: c.read_u32_be()?,
                position: Vec3::decode(c)?,
                quat: Quat::decode(c)?,
            })
        },
        telemetry,
    )
}

pub fn encode(items: &[Unity3dItem]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(items.len() * STRIDE);
    for item in items {
        buf.put_u32(item.segment_id);
        item.position.encode(&mut buf);
        item.quat.encode(&mut buf);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{body_name, SegmentOrder};
    use crate::telemetry::RecordingTelemetrySink;

    fn header() -> Header {
        Header {
            msg_type_code: 5,
            sample_counter: 1,
            is_last: true,
            fragment_index: 0,
            item_count: 23,
            time_code_ms: 0,
            character_id: 0,
            body_segment_count: 23,
            prop_count: 0,
            finger_segment_count: 0,
            payload_size: (23 * STRIDE) as u16,
        }
    }

    #[test]
    fn roundtrips_pelvis_first() {
        assert_eq!(body_name(SegmentOrder::Unity3d, 0), Some("Pelvis"));
        let items: Vec<Unity3dItem> = (1..=23)
            .map(|id| Unity3dItem {
                segment_id: id,
                position: Vec3::default(),
                quat: Quat { re: 1.0, ..Default::default() },
            })
            .collect();
        let bytes = encode(&items);
        let mut sink = RecordingTelemetrySink::default();
        assert_eq!(decode(&header(), &bytes, &mut sink).unwrap(), items);
        assert!(sink.events.is_empty());
    }

    #[test]
    fn misaligned_payload_is_rejected() {
        let mut sink = RecordingTelemetrySink::default();
        assert!(decode(&header(), &[0u8; 7], &mut sink).is_err());
    }
}
