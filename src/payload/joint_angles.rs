//! Type 20: Joint angles. 20 bytes/item, keyed by a pair of
//! point ids rather than a segment id, so no segment-range check applies.

use bytes::{BufMut, BytesMut};

use super::common::{decode_fixed_items, Vec3};
use crate::error::Result;
use crate::wire::Cursor;

pub const STRIDE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct JointAngleItem {
    pub parent_point_id: u32,
    pub child_point_id: u32,
    pub rot_xyz_deg: Vec3,
}

pub fn decode(bytes: &[u8]) -> Result<Vec<JointAngleItem>> {
    decode_fixed_items(bytes, STRIDE, |c: &mut Cursor| {
        Ok(JointAngleItem {
            parent_point_id: c.read_u32_be()?,
            child_point_id: c.read_u32_be()?,
            rot_xyz_deg: Vec3::decode(c)?,
        })
    })
}

pub fn encode(items: &[JointAngleItem]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(items.len() * STRIDE);
    for item in items {
        buf.put_u32(item.parent_point_id);
        buf.put_u32(item.child_point_id);
        item.rot_xyz_deg.encode(&mut buf);
    }
    buf
}
