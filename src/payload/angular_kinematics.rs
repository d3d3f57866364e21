//! Type 22: Angular kinematics. 44 bytes/item.

use bytes::{BufMut, BytesMut};

use super::common::{decode_segment_items, Quat, Vec3};
use crate::error::Result;
use crate::header::Header;
use crate::telemetry::TelemetrySink;
use crate::wire::Cursor;

pub const STRIDE: usize = 44;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct AngularKinematicsItem {
    pub segment_id: u32,
    pub quat: Quat,
    pub angular_velocity: Vec3,
    pub angular_acceleration: Vec3,
}

pub fn decode(header: &Header, bytes: &[u8], telemetry: &mut dyn TelemetrySink) -> Result<Vec<AngularKinematicsItem>> {
    decode_segment_items(
        header,
        bytes,
        STRIDE,
        |item: &AngularKinematicsItem| item.segment_id,
        |c: &mut Cursor| {
            Ok(AngularKinematicsItem {
                segment_id: c.read_u32_be()?,
                quat: Quat::decode(c)?,
                angular_velocity: Vec3::decode(c)?,
                angular_acceleration: Vec3::decode(c)?,
            })
        },
        telemetry,
    )
}

pub fn encode(items: &[AngularKinematicsItem]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(items.len() * STRIDE);
    for item in items {
        buf.put_u32(item.segment_id);
        item.quat.encode(&mut buf);
        item.angular_velocity.encode(&mut buf);
        item.angular_acceleration.encode(&mut buf);
    }
    buf
}
