//! Type 02: Quaternion pose. Z-up, right-handed. 32 bytes/item.

use bytes::{BufMut, BytesMut};

use super::common::{decode_segment_items, Quat, Vec3};
use crate::error::Result;
use crate::header::Header;
use crate::telemetry::TelemetrySink;
use crate::wire::Cursor;

pub const STRIDE: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct QuatItem {
    pub segment_id: u32,
    pub position: Vec3,
    pub quat: Quat,
}

pub fn decode(header: &Header, bytes: &[u8], telemetry: &mut dyn TelemetrySink) -> Result<Vec<QuatItem>> {
    decode_segment_items(
        header,
        bytes,
        STRIDE,
        |item: &QuatItem| item.segment_id,
        |c: &mut Cursor| {
            Ok(QuatItem {
                segment_id: c.read_u32_be()?,
                position: Vec3::decode(c)?,
                quat: Quat::decode(c)?,
            })
        },
        telemetry,
    )
}

pub fn encode(items: &[QuatItem]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(items.len() * STRIDE);
    for item in items {
        buf.put_u32(item.segment_id);
        item.position.encode(&mut buf);
        item.quat.encode(&mut buf);
    }
    buf
}
