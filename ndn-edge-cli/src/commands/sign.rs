//! Data signing command.

use crate::SignKind;
use anyhow::{anyhow, Context, Result};
use log::debug;
use ndn_edge_common::data::Data;
use ndn_edge_common::name::Name;
use ndn_edge_common::security::{EcdsaPrvKey, HmacKey, SoftwareBackend};
use ndn_edge_common::tlv::Encoder;
use std::fs;
use std::path::Path;

/// Generous room for any packet this tool can produce.
const PACKET_BUFFER_SIZE: usize = 2048;

#[allow(clippy::too_many_arguments)]
pub fn run(
    name: &str,
    content: &str,
    kind: SignKind,
    key_file: Option<&Path>,
    key_id: u32,
    identity: &str,
    freshness: Option<u64>,
    out: Option<&Path>,
) -> Result<()> {
    let backend = SoftwareBackend::new();
    let name = Name::from_string(name).context("invalid packet name")?;
    let identity = Name::from_string(identity).context("invalid producer identity")?;

    let mut data = Data::new(name);
    data.set_content(content.as_bytes())
        .context("content does not fit the content buffer")?;
    if let Some(ms) = freshness {
        data.metainfo.set_freshness_period(ms);
    }

    let mut buffer = vec![0u8; PACKET_BUFFER_SIZE];
    let mut encoder = Encoder::new(&mut buffer);

    match kind {
        SignKind::Digest => {
            data.encode_digest_sign(&mut encoder, &backend)
                .context("digest signing failed")?;
        }
        SignKind::Hmac => {
            let path = key_file.ok_or_else(|| anyhow!("--key-file is required for hmac"))?;
            let raw = super::read_hex_key(path)?;
            let key = HmacKey::from_bytes(&raw, key_id).context("bad HMAC key material")?;
            data.encode_hmac_sign(&mut encoder, &identity, &key, &backend)
                .context("HMAC signing failed")?;
        }
        SignKind::Ecdsa => {
            let path = key_file.ok_or_else(|| anyhow!("--key-file is required for ecdsa"))?;
            let raw = super::read_hex_key(path)?;
            let key = EcdsaPrvKey::from_bytes(&raw, key_id).context("bad ECDSA key material")?;
            data.encode_ecdsa_sign(&mut encoder, &identity, &key, &backend)
                .context("ECDSA signing failed")?;
        }
    }

    let packet = encoder.output();
    debug!("encoded {} bytes", packet.len());
    match out {
        Some(path) => {
            fs::write(path, packet)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote {} bytes to {}", packet.len(), path.display());
        }
        None => println!("{}", hex::encode(packet)),
    }
    Ok(())
}
