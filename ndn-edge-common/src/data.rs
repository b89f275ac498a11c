//! The Data packet engine: assembly, signing, parsing, verification.
//!
//! A Data TLV body is, byte for byte, `name ‖ metainfo ‖ content ‖
//! signature-info` followed by the signature value block. The signature is
//! always computed over exactly that span: from just after the outer
//! type+length to just before the signature value block.

use crate::error::Error;
use crate::metainfo::Metainfo;
use crate::name::{Name, NameComponent};
use crate::security::{
    self, AesKey, CryptoBackend, EcdsaPrvKey, EcdsaPubKey, HmacKey, AES_BLOCK_SIZE,
};
use crate::signature::{
    Signature, SIG_TYPE_DIGEST_SHA256, SIG_TYPE_ECDSA_SHA256, SIG_TYPE_HMAC_SHA256,
};
use crate::tlv::{
    self, Decoder, Encoder, TLV_AC_AES_IV, TLV_AC_ENCRYPTED_CONTENT, TLV_AC_ENCRYPTED_PAYLOAD,
    TLV_CONTENT, TLV_DATA, TLV_GENERIC_NAME_COMPONENT, TLV_SIGNATURE_INFO,
    TLV_LENGTH_FIELD_MAX_SIZE, TLV_TYPE_FIELD_MAX_SIZE,
};
use crate::Result;

/// Maximum size of a Data packet's content.
pub const CONTENT_BUFFER_SIZE: usize = 256;

/// An NDN Data packet with fixed-capacity storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    pub name: Name,
    pub metainfo: Metainfo,
    content_value: [u8; CONTENT_BUFFER_SIZE],
    content_size: usize,
    pub signature: Signature,
}

impl Data {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            metainfo: Metainfo::new(),
            content_value: [0u8; CONTENT_BUFFER_SIZE],
            content_size: 0,
            signature: Signature::new(),
        }
    }

    /// Sets the content by copy, failing with `Oversize` past capacity.
    pub fn set_content(&mut self, content: &[u8]) -> Result<()> {
        if content.len() > CONTENT_BUFFER_SIZE {
            return Err(Error::Oversize);
        }
        self.content_value[..content.len()].copy_from_slice(content);
        self.content_size = content.len();
        Ok(())
    }

    pub fn content(&self) -> &[u8] {
        &self.content_value[..self.content_size]
    }

    pub fn content_size(&self) -> usize {
        self.content_size
    }

    /// Builds the key locator `identity ‖ "KEY" ‖ BE32(key_id)` and installs
    /// it in a fresh signature of the given type.
    fn prepare_signature_info(
        &mut self,
        sig_type: u8,
        producer_identity: &Name,
        key_id: u32,
    ) -> Result<()> {
        let mut key_locator = *producer_identity;
        key_locator.append(NameComponent::from_string("KEY")?)?;
        key_locator.append(NameComponent::from_buffer(
            TLV_GENERIC_NAME_COMPONENT,
            &key_id.to_be_bytes(),
        )?)?;

        self.signature = Signature::new();
        self.signature.set_signature_type(sig_type)?;
        self.signature.set_key_locator(&key_locator);
        Ok(())
    }

    /// Encodes the signed span: name, metainfo, content, signature info.
    fn encode_unsigned_block(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.name.encode(encoder)?;
        self.metainfo.encode(encoder)?;
        encoder.append_type(TLV_CONTENT)?;
        encoder.append_length(self.content_size)?;
        encoder.append_raw(self.content())?;
        self.signature.info_encode(encoder)
    }

    fn unsigned_block_size(&self) -> usize {
        self.name.probe_block_size()
            + self.metainfo.probe_block_size()
            + tlv::probe_block_size(TLV_CONTENT, self.content_size)
            + self.signature.info_probe_block_size()
    }

    /// Encodes this Data signed with a plain SHA-256 digest.
    pub fn encode_digest_sign(
        &mut self,
        encoder: &mut Encoder<'_>,
        backend: &dyn CryptoBackend,
    ) -> Result<()> {
        self.signature = Signature::new();
        self.signature.set_signature_type(SIG_TYPE_DIGEST_SHA256)?;

        let body_size = self.unsigned_block_size() + self.signature.value_probe_block_size();
        encoder.append_type(TLV_DATA)?;
        encoder.append_length(body_size)?;

        let sign_start = encoder.offset();
        self.encode_unsigned_block(encoder)?;
        let sign_end = encoder.offset();

        let signature = &mut self.signature;
        let used = security::sha256_sign(
            backend,
            encoder.slice(sign_start, sign_end)?,
            &mut signature.sig_value,
        )?;
        signature.sig_size = used;
        signature.value_encode(encoder)
    }

    /// Encodes this Data signed with HMAC-SHA256 under `hmac_key`.
    pub fn encode_hmac_sign(
        &mut self,
        encoder: &mut Encoder<'_>,
        producer_identity: &Name,
        hmac_key: &HmacKey,
        backend: &dyn CryptoBackend,
    ) -> Result<()> {
        self.prepare_signature_info(SIG_TYPE_HMAC_SHA256, producer_identity, hmac_key.key_id())?;

        let body_size = self.unsigned_block_size() + self.signature.value_probe_block_size();
        encoder.append_type(TLV_DATA)?;
        encoder.append_length(body_size)?;

        let sign_start = encoder.offset();
        self.encode_unsigned_block(encoder)?;
        let sign_end = encoder.offset();

        let signature = &mut self.signature;
        let used = security::hmac_sign(
            backend,
            encoder.slice(sign_start, sign_end)?,
            hmac_key,
            &mut signature.sig_value,
        )?;
        signature.sig_size = used;
        signature.value_encode(encoder)
    }

    /// Encodes this Data signed with ECDSA P-256.
    ///
    /// The DER signature length is unknown until after signing, yet the
    /// outer length field precedes the body. So: reserve worst-case
    /// head-room, emit and sign the body, backpatch the correctly sized
    /// header right before it, then shift everything to the buffer front
    /// and append the signature value block.
    pub fn encode_ecdsa_sign(
        &mut self,
        encoder: &mut Encoder<'_>,
        producer_identity: &Name,
        prv_key: &EcdsaPrvKey,
        backend: &dyn CryptoBackend,
    ) -> Result<()> {
        self.prepare_signature_info(SIG_TYPE_ECDSA_SHA256, producer_identity, prv_key.key_id())?;

        let head_room = TLV_TYPE_FIELD_MAX_SIZE + TLV_LENGTH_FIELD_MAX_SIZE;
        encoder.move_forward(head_room)?;

        let sign_start = encoder.offset();
        self.encode_unsigned_block(encoder)?;
        let sign_end = encoder.offset();

        let signature = &mut self.signature;
        let sig_len = backend.ecdsa_sign(
            encoder.slice(sign_start, sign_end)?,
            prv_key,
            &mut signature.sig_value,
        )?;
        signature.sig_size = sig_len;

        let body_size = self.unsigned_block_size() + self.signature.value_probe_block_size();

        // Backpatch the header immediately before the signed span.
        let header_size = tlv::probe_var_size(TLV_DATA as u64)
            + tlv::probe_var_size(body_size as u64);
        let header_start = sign_start
            .checked_sub(header_size)
            .ok_or(Error::Oversize)?;
        encoder.seek(header_start)?;
        encoder.append_type(TLV_DATA)?;
        encoder.append_length(body_size)?;
        debug_assert_eq!(encoder.offset(), sign_start);

        // Discard the unused head-room and re-seat the cursor from the
        // shifted layout: header then unsigned block.
        encoder.shift_to_front(header_start, sign_end - header_start)?;
        encoder.seek(header_size + (sign_end - sign_start))?;

        self.signature.value_encode(encoder)
    }

    /// Parses a Data TLV, recording the signed span for the verify variants.
    fn decode_inner(decoder: &mut Decoder<'_>) -> Result<(Data, usize, usize)> {
        let tlv_type = decoder.read_type()?;
        if tlv_type != TLV_DATA {
            return Err(Error::WrongTlvType);
        }
        let _body_size = decoder.read_length()?;
        let sign_start = decoder.offset();

        let name = Name::decode(decoder)?;
        let mut data = Data::new(name);
        data.metainfo = Metainfo::decode(decoder)?;

        let tlv_type = decoder.read_type()?;
        match tlv_type {
            TLV_CONTENT => {
                let length = decoder.read_length()?;
                if length > CONTENT_BUFFER_SIZE {
                    return Err(Error::Oversize);
                }
                decoder.read_raw(&mut data.content_value[..length])?;
                data.content_size = length;
            }
            TLV_SIGNATURE_INFO => {
                // No content block; push the type back for the info decoder.
                data.content_size = 0;
                decoder.move_backward(tlv::probe_var_size(tlv_type as u64))?;
            }
            _ => return Err(Error::WrongTlvType),
        }

        data.signature = Signature::info_decode(decoder)?;
        let sign_end = decoder.offset();
        data.signature.value_decode(decoder)?;
        Ok((data, sign_start, sign_end))
    }

    /// Parses a Data packet without checking its signature.
    pub fn decode_no_verify(packet: &[u8]) -> Result<Data> {
        let mut decoder = Decoder::new(packet);
        let (data, _, _) = Self::decode_inner(&mut decoder)?;
        Ok(data)
    }

    /// Parses and verifies a digest-signed Data packet.
    pub fn decode_digest_verify(packet: &[u8], backend: &dyn CryptoBackend) -> Result<Data> {
        let mut decoder = Decoder::new(packet);
        let (data, sign_start, sign_end) = Self::decode_inner(&mut decoder)?;
        security::sha256_verify(backend, &packet[sign_start..sign_end], data.signature.value())?;
        Ok(data)
    }

    /// Parses and verifies an HMAC-signed Data packet under `hmac_key`.
    pub fn decode_hmac_verify(
        packet: &[u8],
        hmac_key: &HmacKey,
        backend: &dyn CryptoBackend,
    ) -> Result<Data> {
        let mut decoder = Decoder::new(packet);
        let (data, sign_start, sign_end) = Self::decode_inner(&mut decoder)?;
        security::hmac_verify(
            backend,
            &packet[sign_start..sign_end],
            data.signature.value(),
            hmac_key,
        )?;
        Ok(data)
    }

    /// Parses and verifies an ECDSA-signed Data packet under `pub_key`.
    pub fn decode_ecdsa_verify(
        packet: &[u8],
        pub_key: &EcdsaPubKey,
        backend: &dyn CryptoBackend,
    ) -> Result<Data> {
        let mut decoder = Decoder::new(packet);
        let (data, sign_start, sign_end) = Self::decode_inner(&mut decoder)?;
        backend.ecdsa_verify(
            &packet[sign_start..sign_end],
            data.signature.value(),
            pub_key,
        )?;
        Ok(data)
    }

    /// Encrypts `plaintext` under AES-128-CBC (no padding; the length must
    /// be a block multiple) and installs the access-control structure
    /// `EncryptedContent { key_id_name, AesIv, EncryptedPayload }` as this
    /// packet's content.
    pub fn set_encrypted_content(
        &mut self,
        plaintext: &[u8],
        key_id_name: &Name,
        aes_iv: &[u8; AES_BLOCK_SIZE],
        aes_key: &AesKey,
        backend: &dyn CryptoBackend,
    ) -> Result<()> {
        let payload_size = plaintext.len() + AES_BLOCK_SIZE;
        let v_size = key_id_name.probe_block_size()
            + tlv::probe_block_size(TLV_AC_AES_IV, AES_BLOCK_SIZE)
            + tlv::probe_block_size(TLV_AC_ENCRYPTED_PAYLOAD, payload_size);
        if v_size > CONTENT_BUFFER_SIZE {
            return Err(Error::Oversize);
        }

        let mut encoder = Encoder::new(&mut self.content_value);
        encoder.append_type(TLV_AC_ENCRYPTED_CONTENT)?;
        encoder.append_length(v_size)?;

        key_id_name.encode(&mut encoder)?;

        encoder.append_type(TLV_AC_AES_IV)?;
        encoder.append_length(AES_BLOCK_SIZE)?;
        encoder.append_raw(aes_iv)?;

        encoder.append_type(TLV_AC_ENCRYPTED_PAYLOAD)?;
        encoder.append_length(payload_size)?;
        let written = backend.aes_cbc_encrypt(plaintext, aes_iv, aes_key, encoder.tail_mut())?;
        // Commit the fresh ciphertext length, not any prior content size.
        encoder.move_forward(written)?;

        self.content_size = encoder.offset();
        Ok(())
    }

    /// Reverses [`Data::set_encrypted_content`]: decrypts the payload into
    /// `output` and returns the plaintext length, the key id name, and the
    /// IV carried on the wire.
    pub fn parse_encrypted_content(
        &self,
        aes_key: &AesKey,
        backend: &dyn CryptoBackend,
        output: &mut [u8],
    ) -> Result<(usize, Name, [u8; AES_BLOCK_SIZE])> {
        let mut decoder = Decoder::new(self.content());

        let tlv_type = decoder.read_type()?;
        if tlv_type != TLV_AC_ENCRYPTED_CONTENT {
            return Err(Error::WrongTlvType);
        }
        let _v_size = decoder.read_length()?;

        let key_id_name = Name::decode(&mut decoder)?;

        let tlv_type = decoder.read_type()?;
        if tlv_type != TLV_AC_AES_IV {
            return Err(Error::WrongTlvType);
        }
        let iv_len = decoder.read_length()?;
        if iv_len != AES_BLOCK_SIZE {
            return Err(Error::WrongTlvType);
        }
        let mut aes_iv = [0u8; AES_BLOCK_SIZE];
        decoder.read_raw(&mut aes_iv)?;

        let tlv_type = decoder.read_type()?;
        if tlv_type != TLV_AC_ENCRYPTED_PAYLOAD {
            return Err(Error::WrongTlvType);
        }
        let payload_size = decoder.read_length()?;
        let payload = decoder.read_slice(payload_size)?;

        let used = backend.aes_cbc_decrypt(payload, &aes_iv, aes_key, output)?;
        Ok((used, key_id_name, aes_iv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::SoftwareBackend;
    use crate::signature::SIGNATURE_BUFFER_SIZE;
    use crate::tlv::TLV_SIGNATURE_VALUE;

    fn sample_data(name: &str, content: &[u8]) -> Data {
        let mut data = Data::new(Name::from_string(name).unwrap());
        data.metainfo.set_freshness_period(10_000);
        data.set_content(content).unwrap();
        data
    }

    #[test]
    fn digest_sign_length_and_verify() {
        let backend = SoftwareBackend::new();
        let mut data = sample_data("/hello/world", b"Hi");

        let mut buf = [0u8; 512];
        let mut enc = Encoder::new(&mut buf);
        data.encode_digest_sign(&mut enc, &backend).unwrap();

        // Outer T+L plus the probed body size.
        let body_size = data.name.probe_block_size()
            + data.metainfo.probe_block_size()
            + tlv::probe_block_size(TLV_CONTENT, 2)
            + data.signature.info_probe_block_size()
            + data.signature.value_probe_block_size();
        assert_eq!(
            enc.offset(),
            tlv::probe_var_size(TLV_DATA as u64)
                + tlv::probe_var_size(body_size as u64)
                + body_size
        );

        let decoded = Data::decode_digest_verify(enc.output(), &backend).unwrap();
        assert_eq!(decoded.name, data.name);
        assert_eq!(decoded.content(), b"Hi");
        assert_eq!(decoded.metainfo.freshness_period(), Some(10_000));
    }

    #[test]
    fn digest_verify_rejects_tampered_content() {
        let backend = SoftwareBackend::new();
        let mut data = sample_data("/hello/world", b"Hi");

        let mut buf = [0u8; 512];
        let mut enc = Encoder::new(&mut buf);
        data.encode_digest_sign(&mut enc, &backend).unwrap();
        let len = enc.offset();

        let mut tampered = [0u8; 512];
        tampered[..len].copy_from_slice(enc.output());
        // flip a byte inside the name
        tampered[6] ^= 0x01;
        assert_eq!(
            Data::decode_digest_verify(&tampered[..len], &backend),
            Err(Error::SigVerification)
        );
    }

    #[test]
    fn hmac_sign_verify_and_wrong_key() {
        let backend = SoftwareBackend::new();
        let key1 = HmacKey::from_bytes(&[0x55; 32], 1).unwrap();
        let key2 = HmacKey::from_bytes(&[0x66; 32], 2).unwrap();
        let identity = Name::from_string("/producer").unwrap();

        let mut data = sample_data("/hello/world", b"payload");
        let mut buf = [0u8; 512];
        let mut enc = Encoder::new(&mut buf);
        data.encode_hmac_sign(&mut enc, &identity, &key1, &backend)
            .unwrap();

        let decoded = Data::decode_hmac_verify(enc.output(), &key1, &backend).unwrap();
        assert_eq!(decoded.content(), b"payload");
        // key locator is identity/KEY/<BE32 key id>
        let locator = decoded.signature.key_locator().unwrap();
        assert_eq!(locator.len(), 3);
        assert_eq!(locator.get(0).unwrap().value(), b"producer");
        assert_eq!(locator.get(1).unwrap().value(), b"KEY");
        assert_eq!(locator.get(2).unwrap().value(), &1u32.to_be_bytes());

        assert_eq!(
            Data::decode_hmac_verify(enc.output(), &key2, &backend),
            Err(Error::SigVerification)
        );
    }

    #[test]
    fn ecdsa_sign_backpatches_and_verifies() {
        let backend = SoftwareBackend::new();
        let (prv, pub_key) = backend.ecdsa_make_key(11).unwrap();
        let identity = Name::from_string("/producer").unwrap();

        // Two independent signatures; DER length may differ between runs,
        // and both must self-describe correctly and verify.
        for _ in 0..2 {
            let mut data = sample_data("/svc/reading/7", b"21.5C");
            let mut buf = [0u8; 512];
            let mut enc = Encoder::new(&mut buf);
            data.encode_ecdsa_sign(&mut enc, &identity, &prv, &backend)
                .unwrap();
            let len = enc.offset();

            // The outer length prefix covers the rest of the packet,
            // including the signature value TLV.
            let mut dec = Decoder::new(enc.output());
            assert_eq!(dec.read_type().unwrap(), TLV_DATA);
            let body = dec.read_length().unwrap();
            assert_eq!(dec.offset() + body, len);

            let decoded = Data::decode_ecdsa_verify(enc.output(), &pub_key, &backend).unwrap();
            assert_eq!(decoded.content(), b"21.5C");
            assert_eq!(decoded.signature.signature_type(), SIG_TYPE_ECDSA_SHA256);
        }
    }

    #[test]
    fn ecdsa_verify_rejects_tampered_signed_byte() {
        let backend = SoftwareBackend::new();
        let (prv, pub_key) = backend.ecdsa_make_key(11).unwrap();
        let identity = Name::from_string("/producer").unwrap();

        let mut data = sample_data("/svc/reading/7", b"21.5C");
        let mut buf = [0u8; 512];
        let mut enc = Encoder::new(&mut buf);
        data.encode_ecdsa_sign(&mut enc, &identity, &prv, &backend)
            .unwrap();
        let len = enc.offset();

        let mut tampered = [0u8; 512];
        tampered[..len].copy_from_slice(enc.output());
        tampered[8] ^= 0x01;
        assert!(Data::decode_ecdsa_verify(&tampered[..len], &pub_key, &backend).is_err());
    }

    #[test]
    fn decode_handles_absent_content() {
        // Hand-build a digest-signed packet with no Content block at all.
        let backend = SoftwareBackend::new();
        let name = Name::from_string("/no/content").unwrap();
        let metainfo = Metainfo::new();
        let mut signature = Signature::new();
        signature.set_signature_type(SIG_TYPE_DIGEST_SHA256).unwrap();

        let body_size = name.probe_block_size()
            + metainfo.probe_block_size()
            + signature.info_probe_block_size()
            + signature.value_probe_block_size();

        let mut buf = [0u8; 256];
        let mut enc = Encoder::new(&mut buf);
        enc.append_type(TLV_DATA).unwrap();
        enc.append_length(body_size).unwrap();
        let sign_start = enc.offset();
        name.encode(&mut enc).unwrap();
        metainfo.encode(&mut enc).unwrap();
        signature.info_encode(&mut enc).unwrap();
        let sign_end = enc.offset();
        let mut digest = [0u8; 32];
        backend
            .sha256(enc.slice(sign_start, sign_end).unwrap(), &mut digest)
            .unwrap();
        signature.set_signature(&digest).unwrap();
        signature.value_encode(&mut enc).unwrap();

        let decoded = Data::decode_digest_verify(enc.output(), &backend).unwrap();
        assert_eq!(decoded.content_size(), 0);
        assert_eq!(decoded.name, name);
    }

    #[test]
    fn decode_rejects_oversize_content() {
        // Packet whose Content block claims more than the content buffer.
        let mut buf = [0u8; 600];
        let mut enc = Encoder::new(&mut buf);
        let name = Name::from_string("/big").unwrap();
        enc.append_type(TLV_DATA).unwrap();
        enc.append_length(500).unwrap();
        name.encode(&mut enc).unwrap();
        Metainfo::new().encode(&mut enc).unwrap();
        enc.append_type(TLV_CONTENT).unwrap();
        enc.append_length(CONTENT_BUFFER_SIZE + 1).unwrap();
        enc.append_raw(&[0u8; CONTENT_BUFFER_SIZE + 1]).unwrap();

        assert_eq!(
            Data::decode_no_verify(enc.output()),
            Err(Error::Oversize)
        );
    }

    #[test]
    fn decode_rejects_unexpected_block() {
        let mut buf = [0u8; 64];
        let mut enc = Encoder::new(&mut buf);
        let name = Name::from_string("/x").unwrap();
        enc.append_type(TLV_DATA).unwrap();
        enc.append_length(20).unwrap();
        name.encode(&mut enc).unwrap();
        Metainfo::new().encode(&mut enc).unwrap();
        enc.append_type(TLV_SIGNATURE_VALUE).unwrap();
        enc.append_length(0).unwrap();

        assert_eq!(
            Data::decode_no_verify(enc.output()),
            Err(Error::WrongTlvType)
        );
    }

    #[test]
    fn encrypted_content_round_trip() {
        let backend = SoftwareBackend::new();
        let aes_key = AesKey::from_bytes(&[0x0F; 16], 3).unwrap();
        let key_id_name = Name::from_string("/access/key/3").unwrap();
        let iv = [0xA5u8; AES_BLOCK_SIZE];
        let plaintext = b"0123456789ABCDEF";

        let mut data = Data::new(Name::from_string("/enc").unwrap());
        data.set_encrypted_content(plaintext, &key_id_name, &iv, &aes_key, &backend)
            .unwrap();

        let mut recovered = [0u8; CONTENT_BUFFER_SIZE];
        let (used, parsed_key_id, parsed_iv) = data
            .parse_encrypted_content(&aes_key, &backend, &mut recovered)
            .unwrap();
        assert_eq!(used, plaintext.len());
        assert_eq!(&recovered[..used], plaintext);
        assert_eq!(parsed_key_id, key_id_name);
        assert_eq!(parsed_iv, iv);
    }

    #[test]
    fn encrypted_content_size_ignores_stale_state() {
        // content_size must come from the fresh ciphertext structure even
        // when the packet previously carried different content.
        let backend = SoftwareBackend::new();
        let aes_key = AesKey::from_bytes(&[0x0F; 16], 3).unwrap();
        let key_id_name = Name::from_string("/k").unwrap();
        let iv = [0u8; AES_BLOCK_SIZE];
        let plaintext = [0x42u8; 32];

        let mut data = Data::new(Name::from_string("/enc").unwrap());
        data.set_content(&[0u8; 200]).unwrap(); // stale size: 200

        data.set_encrypted_content(&plaintext, &key_id_name, &iv, &aes_key, &backend)
            .unwrap();

        let payload_size = plaintext.len() + AES_BLOCK_SIZE;
        let v_size = key_id_name.probe_block_size()
            + tlv::probe_block_size(TLV_AC_AES_IV, AES_BLOCK_SIZE)
            + tlv::probe_block_size(TLV_AC_ENCRYPTED_PAYLOAD, payload_size);
        assert_eq!(
            data.content_size(),
            tlv::probe_block_size(TLV_AC_ENCRYPTED_CONTENT, v_size)
        );

        let mut recovered = [0u8; CONTENT_BUFFER_SIZE];
        let (used, _, _) = data
            .parse_encrypted_content(&aes_key, &backend, &mut recovered)
            .unwrap();
        assert_eq!(&recovered[..used], &plaintext);
    }

    #[test]
    fn encrypted_content_rejects_oversize() {
        let backend = SoftwareBackend::new();
        let aes_key = AesKey::from_bytes(&[0x0F; 16], 3).unwrap();
        let key_id_name = Name::from_string("/k").unwrap();
        let iv = [0u8; AES_BLOCK_SIZE];
        let plaintext = [0u8; CONTENT_BUFFER_SIZE];

        let mut data = Data::new(Name::from_string("/enc").unwrap());
        assert_eq!(
            data.set_encrypted_content(&plaintext, &key_id_name, &iv, &aes_key, &backend),
            Err(Error::Oversize)
        );
    }

    #[test]
    fn signature_buffer_bounds_der_signature() {
        // The preset ECDSA sig_size must fit the stored value buffer.
        assert!(crate::security::ECDSA_DER_SIG_MAX_SIZE <= SIGNATURE_BUFFER_SIZE);
    }
}
