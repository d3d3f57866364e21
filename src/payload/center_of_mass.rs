//! Type 24: Center of mass. Single 12-byte position, no item
//! count or segment id.

use bytes::BytesMut;

use super::common::Vec3;
use crate::error::{Error, Result};
use crate::wire::Cursor;

pub const LENGTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CenterOfMassPayload {
    pub position: Vec3,
}

pub fn decode(bytes: &[u8]) -> Result<CenterOfMassPayload> {
    if bytes.len() != LENGTH {
        return Err(Error::MisalignedPayload {
            len: bytes.len(),
            stride: LENGTH,
        });
    }
    let mut c = Cursor::new(bytes);
    Ok(CenterOfMassPayload {
        position: Vec3::decode(&mut c)?,
    })
}

pub fn encode(payload: &CenterOfMassPayload) -> BytesMut {
    let mut buf = BytesMut::with_capacity(LENGTH);
    payload.position.encode(&mut buf);
    buf
}
