//! Data packet MetaInfo: content type, freshness period, final block id.

use crate::error::Error;
use crate::name::NameComponent;
use crate::tlv::{
    self, Decoder, Encoder, TLV_CONTENT_TYPE, TLV_FINAL_BLOCK_ID, TLV_FRESHNESS_PERIOD,
    TLV_META_INFO,
};
use crate::Result;

/// MetaInfo of a Data packet. Every field is optional on the wire; the
/// encoder always emits the (possibly empty) MetaInfo block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metainfo {
    content_type: u8,
    freshness_period: u64,
    final_block_id: NameComponent,
    enable_content_type: bool,
    enable_freshness_period: bool,
    enable_final_block_id: bool,
}

impl Metainfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_content_type(&mut self, content_type: u8) {
        self.enable_content_type = true;
        self.content_type = content_type;
    }

    pub fn content_type(&self) -> Option<u8> {
        self.enable_content_type.then_some(self.content_type)
    }

    /// Sets the freshness period in milliseconds.
    pub fn set_freshness_period(&mut self, freshness_period: u64) {
        self.enable_freshness_period = true;
        self.freshness_period = freshness_period;
    }

    pub fn freshness_period(&self) -> Option<u64> {
        self.enable_freshness_period
            .then_some(self.freshness_period)
    }

    pub fn set_final_block_id(&mut self, component: NameComponent) {
        self.enable_final_block_id = true;
        self.final_block_id = component;
    }

    pub fn final_block_id(&self) -> Option<&NameComponent> {
        self.enable_final_block_id.then_some(&self.final_block_id)
    }

    fn value_size(&self) -> usize {
        let mut size = 0;
        if self.enable_content_type {
            size += tlv::probe_block_size(
                TLV_CONTENT_TYPE,
                tlv::probe_uint_size(self.content_type as u64),
            );
        }
        if self.enable_freshness_period {
            size += tlv::probe_block_size(
                TLV_FRESHNESS_PERIOD,
                tlv::probe_uint_size(self.freshness_period),
            );
        }
        if self.enable_final_block_id {
            size += tlv::probe_block_size(TLV_FINAL_BLOCK_ID, self.final_block_id.probe_block_size());
        }
        size
    }

    /// Encoded size of the MetaInfo TLV block.
    pub fn probe_block_size(&self) -> usize {
        tlv::probe_block_size(TLV_META_INFO, self.value_size())
    }

    pub fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.append_type(TLV_META_INFO)?;
        encoder.append_length(self.value_size())?;
        if self.enable_content_type {
            encoder.append_type(TLV_CONTENT_TYPE)?;
            encoder.append_length(tlv::probe_uint_size(self.content_type as u64))?;
            encoder.append_uint(self.content_type as u64)?;
        }
        if self.enable_freshness_period {
            encoder.append_type(TLV_FRESHNESS_PERIOD)?;
            encoder.append_length(tlv::probe_uint_size(self.freshness_period))?;
            encoder.append_uint(self.freshness_period)?;
        }
        if self.enable_final_block_id {
            encoder.append_type(TLV_FINAL_BLOCK_ID)?;
            encoder.append_length(self.final_block_id.probe_block_size())?;
            self.final_block_id.encode(encoder)?;
        }
        Ok(())
    }

    /// Decodes a MetaInfo block. A missing block is tolerated: the peeked
    /// type is pushed back and an empty MetaInfo is returned.
    pub fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let mut metainfo = Metainfo::new();
        let tlv_type = decoder.read_type()?;
        if tlv_type != TLV_META_INFO {
            decoder.move_backward(tlv::probe_var_size(tlv_type as u64))?;
            return Ok(metainfo);
        }
        let length = decoder.read_length()?;
        let end = decoder
            .offset()
            .checked_add(length)
            .ok_or(Error::Oversize)?;
        while decoder.offset() < end {
            let field_type = decoder.read_type()?;
            match field_type {
                TLV_CONTENT_TYPE => {
                    let len = decoder.read_length()?;
                    metainfo.content_type = decoder.read_uint(len)? as u8;
                    metainfo.enable_content_type = true;
                }
                TLV_FRESHNESS_PERIOD => {
                    let len = decoder.read_length()?;
                    metainfo.freshness_period = decoder.read_uint(len)?;
                    metainfo.enable_freshness_period = true;
                }
                TLV_FINAL_BLOCK_ID => {
                    let _len = decoder.read_length()?;
                    metainfo.final_block_id = NameComponent::decode(decoder)?;
                    metainfo.enable_final_block_id = true;
                }
                _ => return Err(Error::WrongTlvType),
            }
        }
        Ok(metainfo)
    }
}
