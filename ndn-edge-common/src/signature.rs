//! Signature metadata and value: type, key locator, validity period,
//! nonce, timestamp, and the signature bytes themselves.
//!
//! Key digests are not supported as KeyLocator; a key locator is always a
//! name.

use crate::error::Error;
use crate::name::Name;
use crate::security::{ECDSA_DER_SIG_MAX_SIZE, ECDSA_RAW_SIG_SIZE, SHA256_HASH_SIZE};
use crate::tlv::{
    self, Decoder, Encoder, TLV_KEY_LOCATOR, TLV_NONCE, TLV_NOT_AFTER, TLV_NOT_BEFORE,
    TLV_SIGNATURE_INFO, TLV_SIGNATURE_TYPE, TLV_SIGNATURE_VALUE, TLV_SIGNED_INTEREST_TIMESTAMP,
    TLV_VALIDITY_PERIOD,
};
use crate::Result;

/// Maximum size of a stored signature value.
pub const SIGNATURE_BUFFER_SIZE: usize = 128;

/// Length of the ISO 8601 timestamps inside a validity period.
pub const VALIDITY_TIMESTAMP_SIZE: usize = 15;

pub const SIG_TYPE_DIGEST_SHA256: u8 = 0;
pub const SIG_TYPE_ECDSA_SHA256: u8 = 3;
pub const SIG_TYPE_HMAC_SHA256: u8 = 4;

/// Signature validity window, both ends as ISO 8601 strings
/// (`YYYYMMDDTHHMMSS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityPeriod {
    pub not_before: [u8; VALIDITY_TIMESTAMP_SIZE],
    pub not_after: [u8; VALIDITY_TIMESTAMP_SIZE],
}

/// The signature carried by a Data packet or signed Interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub(crate) sig_type: u8,
    pub(crate) sig_value: [u8; SIGNATURE_BUFFER_SIZE],
    pub(crate) sig_size: usize,
    pub(crate) key_locator_name: Name,
    validity_period: ValidityPeriod,
    signature_info_nonce: u32,
    timestamp: u64,
    pub(crate) enable_key_locator: bool,
    enable_validity_period: bool,
    enable_nonce: bool,
    enable_timestamp: bool,
}

impl Signature {
    /// Creates a digest-type signature with every optional field disabled.
    pub fn new() -> Self {
        Self {
            sig_type: SIG_TYPE_DIGEST_SHA256,
            sig_value: [0u8; SIGNATURE_BUFFER_SIZE],
            sig_size: SHA256_HASH_SIZE,
            key_locator_name: Name::new(),
            validity_period: ValidityPeriod {
                not_before: [0u8; VALIDITY_TIMESTAMP_SIZE],
                not_after: [0u8; VALIDITY_TIMESTAMP_SIZE],
            },
            signature_info_nonce: 0,
            timestamp: 0,
            enable_key_locator: false,
            enable_validity_period: false,
            enable_nonce: false,
            enable_timestamp: false,
        }
    }

    /// Sets the signature type and presets `sig_size` for it: 32 bytes for
    /// SHA-256 digest and HMAC, the DER maximum for ECDSA.
    pub fn set_signature_type(&mut self, sig_type: u8) -> Result<()> {
        self.sig_size = match sig_type {
            SIG_TYPE_DIGEST_SHA256 | SIG_TYPE_HMAC_SHA256 => SHA256_HASH_SIZE,
            SIG_TYPE_ECDSA_SHA256 => ECDSA_DER_SIG_MAX_SIZE,
            _ => return Err(Error::UnsupportedSignType),
        };
        self.sig_type = sig_type;
        Ok(())
    }

    pub fn signature_type(&self) -> u8 {
        self.sig_type
    }

    /// The current signature value.
    pub fn value(&self) -> &[u8] {
        &self.sig_value[..self.sig_size]
    }

    /// Sets the signature value by copy. The size must match the signature
    /// type: 32 bytes for SHA-256 digest and HMAC, raw 64 bytes for ECDSA.
    /// This is the only way a raw (non-DER) ECDSA value enters a signature.
    pub fn set_signature(&mut self, sig_value: &[u8]) -> Result<()> {
        if sig_value.len() > SIGNATURE_BUFFER_SIZE {
            return Err(Error::Oversize);
        }
        let expected = match self.sig_type {
            SIG_TYPE_DIGEST_SHA256 | SIG_TYPE_HMAC_SHA256 => SHA256_HASH_SIZE,
            SIG_TYPE_ECDSA_SHA256 => ECDSA_RAW_SIG_SIZE,
            _ => return Err(Error::UnsupportedSignType),
        };
        if sig_value.len() != expected {
            return Err(Error::WrongSigSize);
        }
        self.sig_value[..sig_value.len()].copy_from_slice(sig_value);
        self.sig_size = sig_value.len();
        Ok(())
    }

    /// Sets the key locator name by copy and enables it on the wire.
    pub fn set_key_locator(&mut self, key_name: &Name) {
        self.enable_key_locator = true;
        self.key_locator_name = *key_name;
    }

    pub fn key_locator(&self) -> Option<&Name> {
        self.enable_key_locator.then_some(&self.key_locator_name)
    }

    /// Sets the validity period from two 15-byte ISO 8601 timestamps.
    pub fn set_validity_period(
        &mut self,
        not_before: &[u8; VALIDITY_TIMESTAMP_SIZE],
        not_after: &[u8; VALIDITY_TIMESTAMP_SIZE],
    ) {
        self.enable_validity_period = true;
        self.validity_period.not_before = *not_before;
        self.validity_period.not_after = *not_after;
    }

    pub fn validity_period(&self) -> Option<&ValidityPeriod> {
        self.enable_validity_period
            .then_some(&self.validity_period)
    }

    /// Sets the signature info nonce, used when signing Interests.
    pub fn set_signature_info_nonce(&mut self, nonce: u32) {
        self.enable_nonce = true;
        self.signature_info_nonce = nonce;
    }

    pub fn signature_info_nonce(&self) -> Option<u32> {
        self.enable_nonce.then_some(self.signature_info_nonce)
    }

    /// Sets the signature timestamp, used when signing Interests.
    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.enable_timestamp = true;
        self.timestamp = timestamp;
    }

    pub fn timestamp(&self) -> Option<u64> {
        self.enable_timestamp.then_some(self.timestamp)
    }

    fn info_value_size(&self) -> usize {
        let mut size = tlv::probe_block_size(TLV_SIGNATURE_TYPE, 1);
        if self.enable_key_locator {
            size += tlv::probe_block_size(TLV_KEY_LOCATOR, self.key_locator_name.probe_block_size());
        }
        if self.enable_validity_period {
            let period_size = tlv::probe_block_size(TLV_NOT_BEFORE, VALIDITY_TIMESTAMP_SIZE)
                + tlv::probe_block_size(TLV_NOT_AFTER, VALIDITY_TIMESTAMP_SIZE);
            size += tlv::probe_block_size(TLV_VALIDITY_PERIOD, period_size);
        }
        if self.enable_nonce {
            size += tlv::probe_block_size(TLV_NONCE, 4);
        }
        if self.enable_timestamp {
            size += tlv::probe_block_size(
                TLV_SIGNED_INTEREST_TIMESTAMP,
                tlv::probe_uint_size(self.timestamp),
            );
        }
        size
    }

    /// Encoded size of the SignatureInfo TLV block.
    pub fn info_probe_block_size(&self) -> usize {
        tlv::probe_block_size(TLV_SIGNATURE_INFO, self.info_value_size())
    }

    /// Encoded size of the SignatureValue TLV block.
    pub fn value_probe_block_size(&self) -> usize {
        tlv::probe_block_size(TLV_SIGNATURE_VALUE, self.sig_size)
    }

    pub fn info_encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.append_type(TLV_SIGNATURE_INFO)?;
        encoder.append_length(self.info_value_size())?;

        encoder.append_type(TLV_SIGNATURE_TYPE)?;
        encoder.append_length(1)?;
        encoder.append_raw(&[self.sig_type])?;

        if self.enable_key_locator {
            encoder.append_type(TLV_KEY_LOCATOR)?;
            encoder.append_length(self.key_locator_name.probe_block_size())?;
            self.key_locator_name.encode(encoder)?;
        }
        if self.enable_validity_period {
            let period_size = tlv::probe_block_size(TLV_NOT_BEFORE, VALIDITY_TIMESTAMP_SIZE)
                + tlv::probe_block_size(TLV_NOT_AFTER, VALIDITY_TIMESTAMP_SIZE);
            encoder.append_type(TLV_VALIDITY_PERIOD)?;
            encoder.append_length(period_size)?;
            encoder.append_type(TLV_NOT_BEFORE)?;
            encoder.append_length(VALIDITY_TIMESTAMP_SIZE)?;
            encoder.append_raw(&self.validity_period.not_before)?;
            encoder.append_type(TLV_NOT_AFTER)?;
            encoder.append_length(VALIDITY_TIMESTAMP_SIZE)?;
            encoder.append_raw(&self.validity_period.not_after)?;
        }
        if self.enable_nonce {
            encoder.append_type(TLV_NONCE)?;
            encoder.append_length(4)?;
            encoder.append_raw(&self.signature_info_nonce.to_be_bytes())?;
        }
        if self.enable_timestamp {
            encoder.append_type(TLV_SIGNED_INTEREST_TIMESTAMP)?;
            encoder.append_length(tlv::probe_uint_size(self.timestamp))?;
            encoder.append_uint(self.timestamp)?;
        }
        Ok(())
    }

    pub fn info_decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let tlv_type = decoder.read_type()?;
        if tlv_type != TLV_SIGNATURE_INFO {
            return Err(Error::WrongTlvType);
        }
        let length = decoder.read_length()?;
        let end = decoder
            .offset()
            .checked_add(length)
            .ok_or(Error::Oversize)?;

        let mut signature = Signature::new();

        let field_type = decoder.read_type()?;
        if field_type != TLV_SIGNATURE_TYPE {
            return Err(Error::WrongTlvType);
        }
        let len = decoder.read_length()?;
        if len != 1 {
            return Err(Error::WrongTlvType);
        }
        let mut sig_type = [0u8; 1];
        decoder.read_raw(&mut sig_type)?;
        signature.set_signature_type(sig_type[0])?;

        while decoder.offset() < end {
            let field_type = decoder.read_type()?;
            match field_type {
                TLV_KEY_LOCATOR => {
                    let _len = decoder.read_length()?;
                    signature.key_locator_name = Name::decode(decoder)?;
                    signature.enable_key_locator = true;
                }
                TLV_VALIDITY_PERIOD => {
                    let _len = decoder.read_length()?;
                    let mut period = ValidityPeriod {
                        not_before: [0u8; VALIDITY_TIMESTAMP_SIZE],
                        not_after: [0u8; VALIDITY_TIMESTAMP_SIZE],
                    };
                    for (expected, target) in [
                        (TLV_NOT_BEFORE, &mut period.not_before),
                        (TLV_NOT_AFTER, &mut period.not_after),
                    ] {
                        let inner = decoder.read_type()?;
                        if inner != expected {
                            return Err(Error::WrongTlvType);
                        }
                        let inner_len = decoder.read_length()?;
                        if inner_len != VALIDITY_TIMESTAMP_SIZE {
                            return Err(Error::WrongTlvType);
                        }
                        decoder.read_raw(target)?;
                    }
                    signature.validity_period = period;
                    signature.enable_validity_period = true;
                }
                TLV_NONCE => {
                    let len = decoder.read_length()?;
                    if len != 4 {
                        return Err(Error::WrongTlvType);
                    }
                    let mut nonce = [0u8; 4];
                    decoder.read_raw(&mut nonce)?;
                    signature.signature_info_nonce = u32::from_be_bytes(nonce);
                    signature.enable_nonce = true;
                }
                TLV_SIGNED_INTEREST_TIMESTAMP => {
                    let len = decoder.read_length()?;
                    signature.timestamp = decoder.read_uint(len)?;
                    signature.enable_timestamp = true;
                }
                _ => return Err(Error::WrongTlvType),
            }
        }
        Ok(signature)
    }

    pub fn value_encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.append_type(TLV_SIGNATURE_VALUE)?;
        encoder.append_length(self.sig_size)?;
        encoder.append_raw(self.value())
    }

    pub fn value_decode(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
        let tlv_type = decoder.read_type()?;
        if tlv_type != TLV_SIGNATURE_VALUE {
            return Err(Error::WrongTlvType);
        }
        let length = decoder.read_length()?;
        if length > SIGNATURE_BUFFER_SIZE {
            return Err(Error::Oversize);
        }
        decoder.read_raw(&mut self.sig_value[..length])?;
        self.sig_size = length;
        Ok(())
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self::new()
    }
}
