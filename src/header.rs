//! 24-byte datagram header codec.

use bytes::{Bytes, BufMut, BytesMut};

use crate::error::{Error, Result};
use crate::wire::Cursor;

pub const HEADER_LENGTH: usize = 24;

/// Message types this crate understands. Deprecated codes 04,
/// 10, 11 are intentionally absent; an unrecognized or deprecated code
/// decodes fine at the header level but fails classification in
/// [`MessageType::from_code`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[non_exhaustive]
pub enum MessageType {
    EulerPose = 1,
    QuaternionPose = 2,
    Points = 3,
    Unity3DPose = 5,
    Meta = 12,
    Scale = 13,
    JointAngles = 20,
    LinearKinematics = 21,
    AngularKinematics = 22,
    TrackerKinematics = 23,
    CenterOfMass = 24,
    TimeCode = 25,
}

impl MessageType {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => MessageType::EulerPose,
            2 => MessageType::QuaternionPose,
            3 => MessageType::Points,
            5 => MessageType::Unity3DPose,
            12 => MessageType::Meta,
            13 => MessageType::Scale,
            20 => MessageType::JointAngles,
            21 => MessageType::LinearKinematics,
            22 => MessageType::AngularKinematics,
            23 => MessageType::TrackerKinematics,
            24 => MessageType::CenterOfMass,
            25 => MessageType::TimeCode,
            _ => return None,
        })
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// The fixed 24-byte header shared by every MXTP datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// The two ASCII-digit message type code, e.g. `01` for Euler pose.
    pub msg_type_code: u8,
    pub sample_counter: u32,
    /// High bit of the datagram-counter byte: final fragment of this
    /// sampling instance.
    pub is_last: bool,
    /// Low 7 bits of the datagram-counter byte.
    pub fragment_index: u8,
    /// Number of items carried in *this* fragment's payload.
    pub item_count: u8,
    pub time_code_ms: u32,
    pub character_id: u8,
    pub body_segment_count: u8,
    pub prop_count: u8,
    pub finger_segment_count: u8,
    /// Declared payload length, in bytes, of this fragment only.
    pub payload_size: u16,
}

impl Header {
    /// Decodes the 24-byte header from `buf`, without validating
    /// `payload_size` against `buf`'s remaining length — see
    /// [`Header::decode`] for the full datagram decode including that
    /// check.
    fn decode_fields(buf: &[u8]) -> Result<Header> {
        if buf.len() < HEADER_LENGTH {
            return Err(Error::Truncated {
                needed: HEADER_LENGTH,
                available: buf.len(),
            });
        }

        let mut c = Cursor::new(buf);
        let id_string = c.read_ascii(6)?;
        if &id_string[0..4] != b"MXTP" {
            return Err(Error::BadMagic);
        }
        let digits = [id_string[4], id_string[5]];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(Error::BadMessageType(digits));
        }
        let msg_type_code = (digits[0] - b'0') * 10 + (digits[1] - b'0');

        let sample_counter = c.read_u32_be()?;
        let datagram_counter = c.read_u8()?;
        let is_last = datagram_counter & 0x80 != 0;
        let fragment_index = datagram_counter & 0x7F;
        let item_count = c.read_u8()?;
        let time_code_ms = c.read_u32_be()?;
        let character_id = c.read_u8()?;
        let body_segment_count = c.read_u8()?;
        let prop_count = c.read_u8()?;
        let finger_segment_count = c.read_u8()?;
        let _reserved = c.read_u16_be()?;
        let payload_size = c.read_u16_be()?;

        Ok(Header {
            msg_type_code,
            sample_counter,
            is_last,
            fragment_index,
            item_count,
            time_code_ms,
            character_id,
            body_segment_count,
            prop_count,
            finger_segment_count,
            payload_size,
        })
    }

    /// Decodes the header out of a full datagram buffer (header + payload),
    /// validating `payload_size` against the bytes actually available after
    /// the header. In lenient mode a mismatch is tolerated by clamping
    /// `payload_size` to `min(declared, available)`; in strict mode it is
    /// an error.
    pub fn decode(buf: &[u8], lenient: bool) -> Result<Header> {
        let mut header = Self::decode_fields(buf)?;
        let available = buf.len() - HEADER_LENGTH;
        let declared = header.payload_size as usize;
        if declared != available {
            if lenient {
                header.payload_size = declared.min(available) as u16;
            } else {
                return Err(Error::LengthMismatch { declared, available });
            }
        }
        Ok(header)
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_LENGTH
    }

    /// Encodes the header fields back to wire bytes. `payload_size` is
    /// taken from `self.payload_size` as-is (callers are expected to have
    /// set it to the true payload length before encoding).
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(HEADER_LENGTH);
        buf.put_slice(b"MXTP");
        let tens = self.msg_type_code / 10;
        let ones = self.msg_type_code % 10;
        buf.put_u8(b'0' + tens);
        buf.put_u8(b'0' + ones);
        buf.put_u32(self.sample_counter);
        let datagram_counter =
            (if self.is_last { 0x80 } else { 0 }) | (self.fragment_index & 0x7F);
        buf.put_u8(datagram_counter);
        buf.put_u8(self.item_count);
        buf.put_u32(self.time_code_ms);
        buf.put_u8(self.character_id);
        buf.put_u8(self.body_segment_count);
        buf.put_u8(self.prop_count);
        buf.put_u8(self.finger_segment_count);
        buf.put_u16(0); // reserved
        buf.put_u16(self.payload_size);
        buf
    }

    /// The message type this header's code maps to, if recognized against
    /// the closed enumeration; deprecated codes 04/10/11 and anything else
    /// classify as `None`.
    pub fn message_type(&self) -> Option<MessageType> {
        MessageType::from_code(self.msg_type_code)
    }
}

/// Decodes a full datagram into its header and payload bytes. Stateless;
/// does not know about message types or reassembly.
pub fn decode_datagram(bytes: &[u8], lenient: bool) -> Result<(Header, Bytes)> {
    let header = Header::decode(bytes, lenient)?;
    let payload = Bytes::copy_from_slice(&bytes[HEADER_LENGTH..HEADER_LENGTH + header.payload_size as usize]);
    Ok((header, payload))
}
