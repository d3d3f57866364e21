//! Type 13: Scale. Self-describing T-pose skeleton, transmitted as
//! independent "segments" and "points" sub-packets with no sequence
//! identifier beyond `sample_counter`. The core emits each packet's
//! contents as a delta; merging into a character-keyed table is a consumer
//! responsibility.

use bytes::{BufMut, BytesMut};

use super::common::Vec3;
use crate::error::Result;
use crate::wire::Cursor;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScaleSegment {
    pub name: String,
    pub origin: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ScalePointFlags(pub u32);

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScalePoint {
    pub segment_id: u16,
    pub point_id: u16,
    pub name: String,
    pub flags: ScalePointFlags,
    pub offset: Vec3,
}

/// One Scale sub-packet's contents. Exactly one of the two lists is
/// non-empty in any single fragment, but both fields are kept so a decoder
/// that sees both populated (malformed but harmless) doesn't need a
/// separate error variant.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ScalePayload {
    pub segments: Vec<ScaleSegment>,
    pub points: Vec<ScalePoint>,
}

pub fn decode(bytes: &[u8]) -> Result<ScalePayload> {
    let mut c = Cursor::new(bytes);

    let segment_count = c.read_u32_be()?;
    let mut segments = Vec::with_capacity(segment_count as usize);
    for _ in 0..segment_count {
        let name = c.read_lenprefixed_string()?;
        let origin = Vec3::decode(&mut c)?;
        segments.push(ScaleSegment { name, origin });
    }

    let point_count = c.read_u32_be()?;
    let mut points = Vec::with_capacity(point_count as usize);
    for _ in 0..point_count {
        let segment_id = c.read_u16_be()?;
        let point_id = c.read_u16_be()?;
        let name = c.read_lenprefixed_string()?;
        let flags = ScalePointFlags(c.read_u32_be()?);
        let offset = Vec3::decode(&mut c)?;
        points.push(ScalePoint {
            segment_id,
            point_id,
            name,
            flags,
            offset,
        });
    }

    Ok(ScalePayload { segments, points })
}

fn put_string(buf: &mut BytesMut, s: &str) {
    buf.put_i32(s.len() as i32);
    buf.put_slice(s.as_bytes());
}

pub fn encode_segments(segments: &[ScaleSegment]) -> BytesMut {
    let mut buf = BytesMut::new();
    buf.put_u32(segments.len() as u32);
    for segment in segments {
        put_string(&mut buf, &segment.name);
        segment.origin.encode(&mut buf);
    }
    buf.put_u32(0); // point_count
    buf
}

pub fn encode_points(points: &[ScalePoint]) -> BytesMut {
    let mut buf = BytesMut::new();
    buf.put_u32(0); // segment_count
    buf.put_u32(points.len() as u32);
    for point in points {
        buf.put_u16(point.segment_id);
        buf.put_u16(point.point_id);
        put_string(&mut buf, &point.name);
        buf.put_u32(point.flags.0);
        point.offset.encode(&mut buf);
    }
    buf
}
