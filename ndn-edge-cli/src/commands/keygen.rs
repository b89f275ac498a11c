//! Key generation command.

use crate::KeyKind;
use anyhow::{Context, Result};
use log::info;
use ndn_edge_common::security::{self, CryptoBackend, SoftwareBackend, AES_KEY_SIZE};
use std::fs;
use std::path::Path;

pub fn run(kind: KeyKind, key_id: u32, out: &Path) -> Result<()> {
    let backend = SoftwareBackend::new();
    let prefix = out.display();

    match kind {
        KeyKind::Ecdsa => {
            let (prv, pub_key) = backend
                .ecdsa_make_key(key_id)
                .context("ECDSA key generation failed")?;
            let sec_path = format!("{prefix}.sec");
            let pub_path = format!("{prefix}.pub");
            fs::write(&sec_path, hex::encode(prv.value()))
                .with_context(|| format!("failed to write {sec_path}"))?;
            fs::write(&pub_path, hex::encode(pub_key.value()))
                .with_context(|| format!("failed to write {pub_path}"))?;
            info!("wrote {sec_path} and {pub_path}");
            println!("ECDSA P-256 key pair (id={key_id}): {sec_path}, {pub_path}");
        }
        KeyKind::Hmac => {
            let mut entropy = [0u8; 32];
            backend
                .fill_random(&mut entropy)
                .context("entropy source failed")?;
            let key = security::hmac_make_key(&backend, key_id, &entropy, 16)
                .context("HMAC key derivation failed")?;
            let path = format!("{prefix}.key");
            fs::write(&path, hex::encode(key.value()))
                .with_context(|| format!("failed to write {path}"))?;
            println!("HMAC-SHA256 key (id={key_id}): {path}");
        }
        KeyKind::Aes => {
            let mut key = [0u8; AES_KEY_SIZE];
            backend
                .fill_random(&mut key)
                .context("entropy source failed")?;
            let path = format!("{prefix}.key");
            fs::write(&path, hex::encode(key))
                .with_context(|| format!("failed to write {path}"))?;
            println!("AES-128 key (id={key_id}): {path}");
        }
    }
    Ok(())
}
