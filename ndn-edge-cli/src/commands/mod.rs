pub mod inspect;
pub mod keygen;
pub mod sign;
pub mod verify;

use anyhow::{Context, Result};
use std::path::Path;

/// Reads a hex-encoded key file into raw bytes.
pub fn read_hex_key(path: &Path) -> Result<Vec<u8>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read key file {}", path.display()))?;
    hex::decode(text.trim()).with_context(|| format!("{} is not valid hex", path.display()))
}
