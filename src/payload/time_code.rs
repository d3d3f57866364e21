//! Type 25: Time code. Exactly 12 ASCII bytes matching
//! `DD:DD:DD.DDD`, self-delimited by its fixed length rather than a stride
//! table.

use bytes::{BufMut, BytesMut};

use crate::error::{Error, Result};

pub const LENGTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TimeCode {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub millis: u16,
}

fn digit(b: u8) -> Option<u8> {
    if b.is_ascii_digit() {
        Some(b - b'0')
    } else {
        None
    }
}

fn two_digits(a: u8, b: u8) -> Option<u8> {
    Some(digit(a)? * 10 + digit(b)?)
}

pub fn decode(bytes: &[u8]) -> Result<TimeCode> {
    if bytes.len() != LENGTH {
        return Err(Error::BadTimeCode);
    }
    let ok_layout = bytes[2] == b':' && bytes[5] == b':' && bytes[8] == b'.';
    let parsed = ok_layout
        .then(|| {
            let hours = two_digits(bytes[0], bytes[1])?;
            let minutes = two_digits(bytes[3], bytes[4])?;
            let seconds = two_digits(bytes[6], bytes[7])?;
            let millis = digit(bytes[9])? as u16 * 100 + digit(bytes[10])? as u16 * 10 + digit(bytes[11])? as u16;
            Some(TimeCode { hours, minutes, seconds, millis })
        })
        .flatten();
    parsed.ok_or_else(|| Error::BadTimeCode)
}

pub fn encode(tc: &TimeCode) -> BytesMut {
    let s = format!(
        "{:02}:{:02}:{:02}.{:03}",
        tc.hours, tc.minutes, tc.seconds, tc.millis
    );
    let mut buf = BytesMut::with_capacity(LENGTH);
    buf.put_slice(s.as_bytes());
    buf
}
