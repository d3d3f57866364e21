//! Datagram codec and frame reassembler for the MVN ("MXTP") motion-capture
//! streaming protocol.
//!
//! This crate covers exactly the hard part: decoding the wire format and
//! reassembling fragmented UDP datagrams into typed, per-sample frames. UDP
//! socket I/O, CLI argument parsing, output file writers, logging
//! configuration, and application lifecycle are left to the embedder; see
//! [`frame::Sink`] for the boundary.

#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod frame;
pub mod header;
pub mod payload;
pub mod reassembler;
pub mod segment;
pub mod telemetry;
pub mod wire;

pub use config::ReassemblerConfig;
pub use error::{Error, Result};
pub use frame::{CollectingSink, CompletedFrame, Eviction, Sink};
pub use header::{decode_datagram, Header, MessageType};
pub use payload::{decode_payload, TypedPayload};
pub use reassembler::Reassembler;
pub use telemetry::{EvictionReason, LogTelemetrySink, NullTelemetrySink, Telemetry, TelemetrySink};
