use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the datagram codec and frame reassembler.
///
/// No variant here is meant to abort the receive loop: every error is
/// locally recovered by dropping the offending unit at the smallest scope
/// (item < frame < fragment < datagram) and is additionally surfaced
/// through [`crate::telemetry::Telemetry`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("buffer truncated: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("bad magic: expected \"MXTP\"")]
    BadMagic,

    #[error("bad message type code {0:?}")]
    BadMessageType([u8; 2]),

    #[error("header payload_size {declared} does not match available {available}")]
    LengthMismatch { declared: usize, available: usize },

    #[error("payload length {len} is not a multiple of item stride {stride}")]
    MisalignedPayload { len: usize, stride: usize },

    #[error("malformed time code string")]
    BadTimeCode,
}
