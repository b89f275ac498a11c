//! Packet verification command.

use crate::SignKind;
use anyhow::{anyhow, Context, Result};
use ndn_edge_common::data::Data;
use ndn_edge_common::security::{EcdsaPubKey, HmacKey, SoftwareBackend};
use std::fs;
use std::path::Path;

pub fn run(packet: &Path, kind: SignKind, key_file: Option<&Path>, key_id: u32) -> Result<()> {
    let backend = SoftwareBackend::new();
    let bytes = fs::read(packet)
        .with_context(|| format!("failed to read packet {}", packet.display()))?;

    let data = match kind {
        SignKind::Digest => Data::decode_digest_verify(&bytes, &backend),
        SignKind::Hmac => {
            let path = key_file.ok_or_else(|| anyhow!("--key-file is required for hmac"))?;
            let raw = super::read_hex_key(path)?;
            let key = HmacKey::from_bytes(&raw, key_id).context("bad HMAC key material")?;
            Data::decode_hmac_verify(&bytes, &key, &backend)
        }
        SignKind::Ecdsa => {
            let path = key_file.ok_or_else(|| anyhow!("--key-file is required for ecdsa"))?;
            let raw = super::read_hex_key(path)?;
            let key = EcdsaPubKey::from_bytes(&raw, key_id).context("bad ECDSA key material")?;
            Data::decode_ecdsa_verify(&bytes, &key, &backend)
        }
    }
    .map_err(|e| anyhow!("verification failed: {e} (code {})", e.code()))?;

    println!("OK {}", data.name);
    Ok(())
}
