//! Type 21: Linear kinematics. 40 bytes/item.

use bytes::{BufMut, BytesMut};

use super::common::{decode_segment_items, Vec3};
use crate::error::Result;
use crate::header::Header;
use crate::telemetry::TelemetrySink;
use crate::wire::Cursor;

pub const STRIDE: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct LinearKinematicsItem {
    pub segment_id: u32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
}

pub fn decode(header: &Header, bytes: &[u8], telemetry: &mut dyn TelemetrySink) -> Result<Vec<LinearKinematicsItem>> {
    decode_segment_items(
        header,
        bytes,
        STRIDE,
        |item: &LinearKinematicsItem| item.segment_id,
        |c: &mut Cursor| {
            Ok(LinearKinematicsItem {
                segment_id: c.read_u32_be()?,
                position: Vec3::decode(c)?,
                velocity: Vec3::decode(c)?,
                acceleration: Vec3::decode(c)?,
            })
        },
        telemetry,
    )
}

pub fn encode(items: &[LinearKinematicsItem]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(items.len() * STRIDE);
    for item in items {
        buf.put_u32(item.segment_id);
        item.position.encode(&mut buf);
        item.velocity.encode(&mut buf);
        item.acceleration.encode(&mut buf);
    }
    buf
}
