//! Type 12: Meta. Self-delimited: newline-separated
//! `tag:value` lines, no mandatory tags, duplicate keys resolved last-wins.

use std::collections::BTreeMap;

use bytes::{BufMut, BytesMut};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetaPayload {
    pub tags: BTreeMap<String, String>,
}

impl MetaPayload {
    pub fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str)
    }

    pub fn xmid(&self) -> Option<&str> {
        self.tags.get("xmid").map(String::as_str)
    }

    /// The `color` tag as a `RRGGBB` hex string, unparsed — callers that need
    /// the numeric value can parse it themselves.
    pub fn color(&self) -> Option<&str> {
        self.tags.get("color").map(String::as_str)
    }
}

pub fn decode(bytes: &[u8]) -> Result<MetaPayload> {
    let text = String::from_utf8_lossy(bytes);
    let mut tags = BTreeMap::new();
    for line in text.split('\n') {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        if let Some(colon) = line.find(':') {
            let (key, value) = line.split_at(colon);
            tags.insert(key.to_string(), value[1..].to_string());
        }
    }
    Ok(MetaPayload { tags })
}

pub fn encode(payload: &MetaPayload) -> BytesMut {
    let mut buf = BytesMut::new();
    for (key, value) in &payload.tags {
        buf.put_slice(key.as_bytes());
        buf.put_u8(b':');
        buf.put_slice(value.as_bytes());
        buf.put_u8(b'\n');
    }
    buf
}
