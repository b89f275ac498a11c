//! Software crypto backend on the RustCrypto stack.

use super::{
    AesKey, CryptoBackend, EcdsaPrvKey, EcdsaPubKey, HmacKey, AES_BLOCK_SIZE, ECDSA_PUB_KEY_SIZE,
    SHA256_HASH_SIZE,
};
use crate::error::Error;
use crate::Result;

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;
use hmac::{Hmac, Mac};
use p256::ecdsa::signature::{RandomizedSigner, Verifier};
use p256::ecdsa::{Signature as EcdsaSignature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Default backend: SHA-256/HMAC via `sha2`/`hmac`, ECDSA P-256 via `p256`,
/// AES-128-CBC chained over raw `aes` blocks, entropy from the OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct SoftwareBackend;

impl SoftwareBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CryptoBackend for SoftwareBackend {
    fn sha256(&self, input: &[u8], output: &mut [u8; SHA256_HASH_SIZE]) -> Result<()> {
        output.copy_from_slice(&Sha256::digest(input));
        Ok(())
    }

    fn hmac_sha256(
        &self,
        input: &[u8],
        key: &HmacKey,
        output: &mut [u8; SHA256_HASH_SIZE],
    ) -> Result<()> {
        let mut mac =
            <HmacSha256 as Mac>::new_from_slice(key.value()).map_err(|_| Error::KeyImport)?;
        mac.update(input);
        output.copy_from_slice(&mac.finalize().into_bytes());
        Ok(())
    }

    fn ecdsa_sign(&self, input: &[u8], key: &EcdsaPrvKey, output: &mut [u8]) -> Result<usize> {
        let signing_key = SigningKey::from_slice(key.value()).map_err(|_| Error::KeyImport)?;
        let signature: EcdsaSignature = signing_key
            .try_sign_with_rng(&mut OsRng, input)
            .map_err(|_| Error::Signing)?;
        let der = signature.to_der();
        let bytes = der.as_bytes();
        if bytes.len() > output.len() {
            return Err(Error::Oversize);
        }
        output[..bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }

    fn ecdsa_verify(&self, input: &[u8], sig_value: &[u8], key: &EcdsaPubKey) -> Result<()> {
        let mut sec1 = [0u8; ECDSA_PUB_KEY_SIZE + 1];
        sec1[0] = 0x04;
        sec1[1..].copy_from_slice(key.value());
        let verifying_key =
            VerifyingKey::from_sec1_bytes(&sec1).map_err(|_| Error::KeyImport)?;
        let signature = if sig_value.len() == super::ECDSA_RAW_SIG_SIZE {
            EcdsaSignature::from_slice(sig_value).map_err(|_| Error::WrongSigSize)?
        } else {
            EcdsaSignature::from_der(sig_value).map_err(|_| Error::WrongSigSize)?
        };
        verifying_key
            .verify(input, &signature)
            .map_err(|_| Error::SigVerification)
    }

    fn aes_cbc_encrypt(
        &self,
        plaintext: &[u8],
        iv: &[u8; AES_BLOCK_SIZE],
        key: &AesKey,
        output: &mut [u8],
    ) -> Result<usize> {
        if plaintext.len() % AES_BLOCK_SIZE != 0 {
            return Err(Error::Cipher);
        }
        let total = plaintext.len() + AES_BLOCK_SIZE;
        if output.len() < total {
            return Err(Error::Oversize);
        }
        let cipher = Aes128::new(GenericArray::from_slice(key.value()));
        output[..AES_BLOCK_SIZE].copy_from_slice(iv);
        let mut chain = *iv;
        for (i, block) in plaintext.chunks_exact(AES_BLOCK_SIZE).enumerate() {
            let mut buf = [0u8; AES_BLOCK_SIZE];
            for (j, b) in buf.iter_mut().enumerate() {
                *b = block[j] ^ chain[j];
            }
            let mut ga = GenericArray::from(buf);
            cipher.encrypt_block(&mut ga);
            chain.copy_from_slice(&ga);
            let start = AES_BLOCK_SIZE * (i + 1);
            output[start..start + AES_BLOCK_SIZE].copy_from_slice(&ga);
        }
        Ok(total)
    }

    fn aes_cbc_decrypt(
        &self,
        payload: &[u8],
        iv: &[u8; AES_BLOCK_SIZE],
        key: &AesKey,
        output: &mut [u8],
    ) -> Result<usize> {
        if payload.len() < AES_BLOCK_SIZE || payload.len() % AES_BLOCK_SIZE != 0 {
            return Err(Error::Cipher);
        }
        // The leading block is the transported IV; chaining starts from the
        // caller-supplied IV.
        let body = &payload[AES_BLOCK_SIZE..];
        if output.len() < body.len() {
            return Err(Error::Oversize);
        }
        let cipher = Aes128::new(GenericArray::from_slice(key.value()));
        let mut chain = *iv;
        for (i, block) in body.chunks_exact(AES_BLOCK_SIZE).enumerate() {
            let mut ga = GenericArray::clone_from_slice(block);
            cipher.decrypt_block(&mut ga);
            for (j, b) in ga.iter_mut().enumerate() {
                *b ^= chain[j];
            }
            chain.copy_from_slice(block);
            let start = AES_BLOCK_SIZE * i;
            output[start..start + AES_BLOCK_SIZE].copy_from_slice(&ga);
        }
        Ok(body.len())
    }

    fn fill_random(&self, output: &mut [u8]) -> Result<()> {
        OsRng.try_fill_bytes(output).map_err(|_| Error::Rng)
    }

    fn hkdf(&self, input: &[u8], seed: &[u8], output: &mut [u8]) -> Result<()> {
        hkdf::Hkdf::<Sha256>::new(Some(seed), input)
            .expand(&[], output)
            .map_err(|_| Error::Oversize)
    }

    fn hmac_prng(
        &self,
        personalization: &[u8],
        seed: &[u8],
        additional: &[u8],
        output: &mut [u8],
    ) -> Result<()> {
        hkdf::Hkdf::<Sha256>::new(Some(personalization), seed)
            .expand(additional, output)
            .map_err(|_| Error::Oversize)
    }

    fn ecdsa_make_key(&self, key_id: u32) -> Result<(EcdsaPrvKey, EcdsaPubKey)> {
        let signing_key = SigningKey::random(&mut OsRng);
        let prv = EcdsaPrvKey::from_bytes(&signing_key.to_bytes(), key_id)?;
        let point = signing_key.verifying_key().to_encoded_point(false);
        // skip the 0x04 uncompressed-point marker
        let pub_key = EcdsaPubKey::from_bytes(&point.as_bytes()[1..], key_id)?;
        Ok((prv, pub_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_matches_known_vector() {
        let backend = SoftwareBackend::new();
        let mut digest = [0u8; 32];
        backend.sha256(b"abc", &mut digest).unwrap();
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn ecdsa_sign_verify_round_trip() {
        let backend = SoftwareBackend::new();
        let (prv, pub_key) = backend.ecdsa_make_key(1).unwrap();
        let mut sig = [0u8; 80];
        let len = backend.ecdsa_sign(b"message", &prv, &mut sig).unwrap();
        assert!(len <= super::super::ECDSA_DER_SIG_MAX_SIZE);
        backend.ecdsa_verify(b"message", &sig[..len], &pub_key).unwrap();
        assert_eq!(
            backend.ecdsa_verify(b"tampered", &sig[..len], &pub_key),
            Err(Error::SigVerification)
        );
    }

    #[test]
    fn aes_cbc_round_trip_prepends_iv() {
        let backend = SoftwareBackend::new();
        let key = AesKey::from_bytes(&[0x11; 16], 1).unwrap();
        let iv = [0x22u8; 16];
        let plaintext = *b"0123456789ABCDEF0123456789ABCDEF";

        let mut payload = [0u8; 48];
        let written = backend
            .aes_cbc_encrypt(&plaintext, &iv, &key, &mut payload)
            .unwrap();
        assert_eq!(written, plaintext.len() + AES_BLOCK_SIZE);
        assert_eq!(&payload[..AES_BLOCK_SIZE], &iv);
        assert_ne!(&payload[AES_BLOCK_SIZE..], &plaintext[..]);

        let mut recovered = [0u8; 32];
        let used = backend
            .aes_cbc_decrypt(&payload[..written], &iv, &key, &mut recovered)
            .unwrap();
        assert_eq!(used, plaintext.len());
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn aes_cbc_rejects_partial_blocks() {
        let backend = SoftwareBackend::new();
        let key = AesKey::from_bytes(&[0x11; 16], 1).unwrap();
        let iv = [0u8; 16];
        let mut out = [0u8; 64];
        assert_eq!(
            backend.aes_cbc_encrypt(&[0u8; 15], &iv, &key, &mut out),
            Err(Error::Cipher)
        );
        assert_eq!(
            backend.aes_cbc_decrypt(&[0u8; 8], &iv, &key, &mut out),
            Err(Error::Cipher)
        );
    }

    #[test]
    fn hkdf_and_prng_are_deterministic() {
        let backend = SoftwareBackend::new();
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        backend.hkdf(b"input", b"seed", &mut a).unwrap();
        backend.hkdf(b"input", b"seed", &mut b).unwrap();
        assert_eq!(a, b);
        backend.hkdf(b"input", b"other-seed", &mut b).unwrap();
        assert_ne!(a, b);

        backend.hmac_prng(b"pers", b"seed", b"add", &mut a).unwrap();
        backend.hmac_prng(b"pers", b"seed", b"add", &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fill_random_fills() {
        let backend = SoftwareBackend::new();
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        backend.fill_random(&mut a).unwrap();
        backend.fill_random(&mut b).unwrap();
        assert_ne!(a, b);
    }
}
