//! Type 01: Euler pose. Y-up, right-handed. 28 bytes/item.

use bytes::{BufMut, BytesMut};

use super::common::{decode_segment_items, Vec3};
use crate::error::Result;
use crate::header::Header;
use crate::telemetry::TelemetrySink;
use crate::wire::Cursor;

pub const STRIDE: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct EulerItem {
    pub segment_id: u32,
    pub position: Vec3,
    pub euler_xyz: Vec3,
}

pub fn decode(header: &Header, bytes: &[u8], telemetry: &mut dyn TelemetrySink) -> Result<Vec<EulerItem>> {
    decode_segment_items(
        header,
        bytes,
        STRIDE,
        |item: &EulerItem| item.segment_id,
        |c: &mut Cursor| {
            Ok(EulerItem {
                segment_id: c.read_u32_be()?,
                position: Vec3::decode(c)?,
                euler_xyz: Vec3::decode(c)?,
            })
        },
        telemetry,
    )
}

pub fn encode(items: &[EulerItem]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(items.len() * STRIDE);
    for item in items {
        buf.put_u32(item.segment_id);
        item.position.encode(&mut buf);
        item.euler_xyz.encode(&mut buf);
    }
    buf
}
