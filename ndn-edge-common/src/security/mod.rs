//! Pluggable cryptography: opaque key wrappers and the backend capability
//! trait the packet engine signs and verifies through.
//!
//! The backend is injected wherever a primitive is needed, so a hardware
//! implementation (on-die SHA, secure element ECDSA) can replace
//! [`software::SoftwareBackend`] without touching any caller.

mod software;

pub use software::SoftwareBackend;

use crate::error::Error;
use crate::Result;
use subtle::ConstantTimeEq;

pub const SHA256_HASH_SIZE: usize = 32;
pub const AES_BLOCK_SIZE: usize = 16;
pub const AES_KEY_SIZE: usize = 16;
pub const HMAC_KEY_BUFFER_SIZE: usize = 32;
pub const ECDSA_PRV_KEY_SIZE: usize = 32;
pub const ECDSA_PUB_KEY_SIZE: usize = 64;
pub const ECDSA_RAW_SIG_SIZE: usize = 64;
/// Worst-case size of a DER-encoded P-256 ECDSA signature.
pub const ECDSA_DER_SIG_MAX_SIZE: usize = 72;

/* ---------------------------------------------------------------- *
 * Key wrappers
 * ---------------------------------------------------------------- */

/// An HMAC-SHA256 key: up to 32 raw key bytes plus an application key id.
#[derive(Clone, Copy)]
pub struct HmacKey {
    key_id: u32,
    value: [u8; HMAC_KEY_BUFFER_SIZE],
    size: usize,
}

impl HmacKey {
    pub fn from_bytes(value: &[u8], key_id: u32) -> Result<Self> {
        if value.is_empty() || value.len() > HMAC_KEY_BUFFER_SIZE {
            return Err(Error::KeyImport);
        }
        let mut buf = [0u8; HMAC_KEY_BUFFER_SIZE];
        buf[..value.len()].copy_from_slice(value);
        Ok(Self {
            key_id,
            value: buf,
            size: value.len(),
        })
    }

    pub fn key_id(&self) -> u32 {
        self.key_id
    }

    pub fn value(&self) -> &[u8] {
        &self.value[..self.size]
    }
}

/// An AES-128 key.
#[derive(Clone, Copy)]
pub struct AesKey {
    key_id: u32,
    value: [u8; AES_KEY_SIZE],
}

impl AesKey {
    pub fn from_bytes(value: &[u8], key_id: u32) -> Result<Self> {
        let value: [u8; AES_KEY_SIZE] = value.try_into().map_err(|_| Error::KeyImport)?;
        Ok(Self { key_id, value })
    }

    pub fn key_id(&self) -> u32 {
        self.key_id
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

/// An ECDSA P-256 private key: the raw 32-byte scalar. The backend parses
/// it on use, so the bytes stay opaque to the codec.
#[derive(Clone, Copy)]
pub struct EcdsaPrvKey {
    key_id: u32,
    value: [u8; ECDSA_PRV_KEY_SIZE],
}

impl EcdsaPrvKey {
    pub fn from_bytes(value: &[u8], key_id: u32) -> Result<Self> {
        let value: [u8; ECDSA_PRV_KEY_SIZE] = value.try_into().map_err(|_| Error::KeyImport)?;
        Ok(Self { key_id, value })
    }

    pub fn key_id(&self) -> u32 {
        self.key_id
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

/// An ECDSA P-256 public key: the raw 64-byte uncompressed point (x ‖ y).
#[derive(Clone, Copy)]
pub struct EcdsaPubKey {
    key_id: u32,
    value: [u8; ECDSA_PUB_KEY_SIZE],
}

impl EcdsaPubKey {
    pub fn from_bytes(value: &[u8], key_id: u32) -> Result<Self> {
        let value: [u8; ECDSA_PUB_KEY_SIZE] = value.try_into().map_err(|_| Error::KeyImport)?;
        Ok(Self { key_id, value })
    }

    pub fn key_id(&self) -> u32 {
        self.key_id
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

/* ---------------------------------------------------------------- *
 * Backend capability trait
 * ---------------------------------------------------------------- */

/// The primitive operations a crypto backend must provide.
///
/// AES-CBC runs without padding: plaintext length must be a block multiple,
/// and the produced payload is the IV block followed by the ciphertext
/// (`plaintext_len + AES_BLOCK_SIZE` bytes in total). `aes_cbc_decrypt`
/// takes such a payload and returns the plaintext length.
pub trait CryptoBackend {
    fn sha256(&self, input: &[u8], output: &mut [u8; SHA256_HASH_SIZE]) -> Result<()>;

    fn hmac_sha256(
        &self,
        input: &[u8],
        key: &HmacKey,
        output: &mut [u8; SHA256_HASH_SIZE],
    ) -> Result<()>;

    /// Signs `input` with ECDSA P-256 over SHA-256, writing the DER-encoded
    /// signature into `output` and returning its length.
    fn ecdsa_sign(&self, input: &[u8], key: &EcdsaPrvKey, output: &mut [u8]) -> Result<usize>;

    /// Verifies a DER (or raw 64-byte) ECDSA signature over `input`.
    fn ecdsa_verify(&self, input: &[u8], sig_value: &[u8], key: &EcdsaPubKey) -> Result<()>;

    fn aes_cbc_encrypt(
        &self,
        plaintext: &[u8],
        iv: &[u8; AES_BLOCK_SIZE],
        key: &AesKey,
        output: &mut [u8],
    ) -> Result<usize>;

    fn aes_cbc_decrypt(
        &self,
        payload: &[u8],
        iv: &[u8; AES_BLOCK_SIZE],
        key: &AesKey,
        output: &mut [u8],
    ) -> Result<usize>;

    /// Fills `output` from the backend entropy source.
    fn fill_random(&self, output: &mut [u8]) -> Result<()>;

    /// HKDF-SHA256: expands `input` keyed with `seed` into `output`.
    fn hkdf(&self, input: &[u8], seed: &[u8], output: &mut [u8]) -> Result<()>;

    /// HMAC-based PRNG: deterministically expands `seed` under
    /// `personalization`, mixing in `additional`.
    fn hmac_prng(
        &self,
        personalization: &[u8],
        seed: &[u8],
        additional: &[u8],
        output: &mut [u8],
    ) -> Result<()>;

    /// Generates a fresh ECDSA P-256 key pair.
    fn ecdsa_make_key(&self, key_id: u32) -> Result<(EcdsaPrvKey, EcdsaPubKey)>;
}

/* ---------------------------------------------------------------- *
 * Derived sign/verify helpers
 * ---------------------------------------------------------------- */

/// Writes the SHA-256 digest of `input` into `output`, returning the number
/// of bytes used.
pub fn sha256_sign(
    backend: &dyn CryptoBackend,
    input: &[u8],
    output: &mut [u8],
) -> Result<usize> {
    if output.len() < SHA256_HASH_SIZE {
        return Err(Error::Oversize);
    }
    let mut digest = [0u8; SHA256_HASH_SIZE];
    backend.sha256(input, &mut digest)?;
    output[..SHA256_HASH_SIZE].copy_from_slice(&digest);
    Ok(SHA256_HASH_SIZE)
}

/// Verifies that `sig_value` is the SHA-256 digest of `input`.
pub fn sha256_verify(backend: &dyn CryptoBackend, input: &[u8], sig_value: &[u8]) -> Result<()> {
    if sig_value.len() != SHA256_HASH_SIZE {
        return Err(Error::WrongSigSize);
    }
    let mut digest = [0u8; SHA256_HASH_SIZE];
    backend.sha256(input, &mut digest)?;
    if bool::from(digest[..].ct_eq(sig_value)) {
        Ok(())
    } else {
        Err(Error::SigVerification)
    }
}

/// Writes the HMAC-SHA256 tag of `input` under `key` into `output`,
/// returning the number of bytes used.
pub fn hmac_sign(
    backend: &dyn CryptoBackend,
    input: &[u8],
    key: &HmacKey,
    output: &mut [u8],
) -> Result<usize> {
    if output.len() < SHA256_HASH_SIZE {
        return Err(Error::Oversize);
    }
    let mut tag = [0u8; SHA256_HASH_SIZE];
    backend.hmac_sha256(input, key, &mut tag)?;
    output[..SHA256_HASH_SIZE].copy_from_slice(&tag);
    Ok(SHA256_HASH_SIZE)
}

/// Verifies an HMAC-SHA256 tag in constant time.
pub fn hmac_verify(
    backend: &dyn CryptoBackend,
    input: &[u8],
    sig_value: &[u8],
    key: &HmacKey,
) -> Result<()> {
    if sig_value.len() != SHA256_HASH_SIZE {
        return Err(Error::WrongSigSize);
    }
    let mut tag = [0u8; SHA256_HASH_SIZE];
    backend.hmac_sha256(input, key, &mut tag)?;
    if bool::from(tag[..].ct_eq(sig_value)) {
        Ok(())
    } else {
        Err(Error::SigVerification)
    }
}

/// Derives a fresh HMAC key from `input` key material: a random salt of
/// `salt_size` bytes (capped at 32) feeds HKDF together with the input.
pub fn hmac_make_key(
    backend: &dyn CryptoBackend,
    key_id: u32,
    input: &[u8],
    salt_size: usize,
) -> Result<HmacKey> {
    let mut salt = [0u8; SHA256_HASH_SIZE];
    let take = salt_size.min(SHA256_HASH_SIZE);
    backend.fill_random(&mut salt[..take])?;
    let mut okm = [0u8; HMAC_KEY_BUFFER_SIZE];
    backend.hkdf(input, &salt[..take], &mut okm)?;
    HmacKey::from_bytes(&okm, key_id)
}
