//! Type 03: Points. Y-up, right-handed. 16 bytes/item.
//!
//! Items are keyed by a composite point id (segment id and local point id
//! folded together per [`crate::segment::point_wire_id`]), not a plain
//! segment id, so they bypass the segment-range check that segment-addressed
//! types use.

use bytes::{BufMut, BytesMut};

use super::common::{decode_fixed_items, Vec3};
use crate::error::Result;
use crate::wire::Cursor;

pub const STRIDE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PointItem {
    pub point_id: u32,
    pub position: Vec3,
}

pub fn decode(bytes: &[u8]) -> Result<Vec<PointItem>> {
    decode_fixed_items(bytes, STRIDE, |c: &mut Cursor| {
        Ok(PointItem {
            point_id: c.read_u32_be()?,
            position: Vec3::decode(c)?,
        })
    })
}

pub fn encode(items: &[PointItem]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(items.len() * STRIDE);
    for item in items {
        buf.put_u32(item.point_id);
        item.position.encode(&mut buf);
    }
    buf
}
