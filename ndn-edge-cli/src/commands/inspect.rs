//! Packet inspection command.

use anyhow::{anyhow, Context, Result};
use ndn_edge_common::data::Data;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Serialize)]
struct PacketSummary {
    name: String,
    content_size: usize,
    content_hex: String,
    content_type: Option<u8>,
    freshness_period_ms: Option<u64>,
    signature_type: u8,
    signature_size: usize,
    key_locator: Option<String>,
    nonce: Option<u32>,
    timestamp: Option<u64>,
}

pub fn run(packet: &Path, json: bool) -> Result<()> {
    let bytes = fs::read(packet)
        .with_context(|| format!("failed to read packet {}", packet.display()))?;
    let data = Data::decode_no_verify(&bytes)
        .map_err(|e| anyhow!("malformed packet: {e} (code {})", e.code()))?;

    let summary = PacketSummary {
        name: data.name.to_string(),
        content_size: data.content_size(),
        content_hex: hex::encode(data.content()),
        content_type: data.metainfo.content_type(),
        freshness_period_ms: data.metainfo.freshness_period(),
        signature_type: data.signature.signature_type(),
        signature_size: data.signature.value().len(),
        key_locator: data.signature.key_locator().map(|n| n.to_string()),
        nonce: data.signature.signature_info_nonce(),
        timestamp: data.signature.timestamp(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Name:        {}", summary.name);
    println!("Content:     {} bytes", summary.content_size);
    if !summary.content_hex.is_empty() {
        println!("  hex:       {}", summary.content_hex);
        if let Ok(text) = std::str::from_utf8(data.content()) {
            println!("  text:      {text}");
        }
    }
    if let Some(ct) = summary.content_type {
        println!("ContentType: {ct}");
    }
    if let Some(ms) = summary.freshness_period_ms {
        println!("Freshness:   {ms} ms");
    }
    println!("SigType:     {}", summary.signature_type);
    println!("SigSize:     {} bytes", summary.signature_size);
    if let Some(locator) = &summary.key_locator {
        println!("KeyLocator:  {locator}");
    }
    if let Some(nonce) = summary.nonce {
        println!("Nonce:       {nonce:#010x}");
    }
    if let Some(ts) = summary.timestamp {
        println!("Timestamp:   {ts}");
    }
    Ok(())
}
