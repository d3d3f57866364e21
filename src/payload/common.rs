//! Shared value types and per-item decode/encode helpers used across every
//! payload decoder.

use bytes::{BufMut, BytesMut};

use crate::error::{Error, Result};
use crate::header::Header;
use crate::segment::segment_id_in_range;
use crate::telemetry::{Telemetry, TelemetrySink};
use crate::wire::Cursor;

/// A 3-component vector: position (centimeters), velocity, acceleration, or
/// Euler angles (degrees) depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub(crate) fn decode(c: &mut Cursor) -> Result<Self> {
        Ok(Self {
            x: c.read_f32_be()?,
            y: c.read_f32_be()?,
            z: c.read_f32_be()?,
        })
    }

    pub(crate) fn encode(&self, buf: &mut BytesMut) {
        buf.put_f32(self.x);
        buf.put_f32(self.y);
        buf.put_f32(self.z);
    }
}

/// A normalized (but not sign-canonical) quaternion, wire order (re, i, j, k).
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct Quat {
    pub re: f32,
    pub i: f32,
    pub j: f32,
    pub k: f32,
}

impl Quat {
    pub(crate) fn decode(c: &mut Cursor) -> Result<Self> {
        Ok(Self {
            re: c.read_f32_be()?,
            i: c.read_f32_be()?,
            j: c.read_f32_be()?,
            k: c.read_f32_be()?,
        })
    }

    pub(crate) fn encode(&self, buf: &mut BytesMut) {
        buf.put_f32(self.re);
        buf.put_f32(self.i);
        buf.put_f32(self.j);
        buf.put_f32(self.k);
    }
}

/// Decodes a payload as a sequence of fixed-stride items, dropping (with
/// telemetry) any item whose `segment_id` falls outside the header's
/// declared counts. Used by every segment-addressed message type (01, 02,
/// 05, 21, 22, 23).
pub(crate) fn decode_segment_items<T>(
    header: &Header,
    bytes: &[u8],
    stride: usize,
    segment_id_of: impl Fn(&T) -> u32,
    decode_item: impl Fn(&mut Cursor) -> Result<T>,
    telemetry: &mut dyn TelemetrySink,
) -> Result<Vec<T>> {
    if stride == 0 || bytes.len() % stride != 0 {
        return Err(Error::MisalignedPayload {
            len: bytes.len(),
            stride,
        });
    }

    let count = bytes.len() / stride;
    let mut items = Vec::with_capacity(count);
    let mut cursor = Cursor::new(bytes);
    for _ in 0..count {
        let item = decode_item(&mut cursor)?;
        let id = segment_id_of(&item);
        let max = crate::segment::max_segment_id(
            header.body_segment_count,
            header.prop_count,
            header.finger_segment_count,
        );
        if segment_id_in_range(
            id,
            header.body_segment_count,
            header.prop_count,
            header.finger_segment_count,
        ) {
            items.push(item);
        } else {
            telemetry.report(Telemetry::SegmentOutOfRange { segment_id: id, max });
        }
    }
    Ok(items)
}

/// Decodes a payload as a sequence of fixed-stride items with no segment-id
/// validation (used by type 03 Points, keyed by point id instead, and type
/// 20 Joint angles, keyed by parent/child point ids).
pub(crate) fn decode_fixed_items<T>(
    bytes: &[u8],
    stride: usize,
    decode_item: impl Fn(&mut Cursor) -> Result<T>,
) -> Result<Vec<T>> {
    if stride == 0 || bytes.len() % stride != 0 {
        return Err(Error::MisalignedPayload {
            len: bytes.len(),
            stride,
        });
    }
    let count = bytes.len() / stride;
    let mut items = Vec::with_capacity(count);
    let mut cursor = Cursor::new(bytes);
    for _ in 0..count {
        items.push(decode_item(&mut cursor)?);
    }
    Ok(items)
}
