//! NDN names: ordered, fixed-capacity sequences of typed components.

use crate::error::Error;
use crate::tlv::{self, Decoder, Encoder, TLV_GENERIC_NAME_COMPONENT, TLV_NAME};
use crate::Result;
use std::fmt;

/// Maximum number of components in a name.
pub const NAME_COMPONENTS_MAX: usize = 10;

/// Maximum length of a single name component value.
pub const NAME_COMPONENT_BUFFER_SIZE: usize = 36;

/// One name component: a TLV type plus a bounded byte string.
#[derive(Clone, Copy)]
pub struct NameComponent {
    component_type: u32,
    value: [u8; NAME_COMPONENT_BUFFER_SIZE],
    size: usize,
}

impl NameComponent {
    /// Creates a component with an explicit TLV type.
    pub fn from_buffer(component_type: u32, value: &[u8]) -> Result<Self> {
        if value.len() > NAME_COMPONENT_BUFFER_SIZE {
            return Err(Error::Oversize);
        }
        let mut buf = [0u8; NAME_COMPONENT_BUFFER_SIZE];
        buf[..value.len()].copy_from_slice(value);
        Ok(Self {
            component_type,
            value: buf,
            size: value.len(),
        })
    }

    /// Creates a `GenericNameComponent` from a string segment.
    pub fn from_string(s: &str) -> Result<Self> {
        Self::from_buffer(TLV_GENERIC_NAME_COMPONENT, s.as_bytes())
    }

    pub fn component_type(&self) -> u32 {
        self.component_type
    }

    pub fn value(&self) -> &[u8] {
        &self.value[..self.size]
    }

    /// Encoded size of this component's TLV block.
    pub fn probe_block_size(&self) -> usize {
        tlv::probe_block_size(self.component_type, self.size)
    }

    pub fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.append_type(self.component_type)?;
        encoder.append_length(self.size)?;
        encoder.append_raw(self.value())
    }

    pub fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let component_type = decoder.read_type()?;
        let length = decoder.read_length()?;
        if length > NAME_COMPONENT_BUFFER_SIZE {
            return Err(Error::Oversize);
        }
        let mut value = [0u8; NAME_COMPONENT_BUFFER_SIZE];
        decoder.read_raw(&mut value[..length])?;
        Ok(Self {
            component_type,
            value,
            size: length,
        })
    }
}

impl Default for NameComponent {
    fn default() -> Self {
        Self {
            component_type: TLV_GENERIC_NAME_COMPONENT,
            value: [0u8; NAME_COMPONENT_BUFFER_SIZE],
            size: 0,
        }
    }
}

impl PartialEq for NameComponent {
    fn eq(&self, other: &Self) -> bool {
        self.component_type == other.component_type && self.value() == other.value()
    }
}

impl Eq for NameComponent {}

impl fmt::Debug for NameComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameComponent({})", self)
    }
}

impl fmt::Display for NameComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Print printable ASCII characters directly, otherwise use hex
        let printable = self
            .value()
            .iter()
            .all(|&b| b.is_ascii_graphic() || b == b' ');

        if printable {
            write!(f, "{}", String::from_utf8_lossy(self.value()))
        } else {
            write!(f, "0x")?;
            for &b in self.value() {
                write!(f, "{:02x}", b)?;
            }
            Ok(())
        }
    }
}

/// An NDN name: at most [`NAME_COMPONENTS_MAX`] components, no heap.
#[derive(Clone, Copy)]
pub struct Name {
    components: [NameComponent; NAME_COMPONENTS_MAX],
    components_size: usize,
}

impl Name {
    /// Creates a new empty name.
    pub fn new() -> Self {
        Self {
            components: [NameComponent::default(); NAME_COMPONENTS_MAX],
            components_size: 0,
        }
    }

    /// Parses a name from its URI representation.
    ///
    /// The string must start with `/`; each `/…/` segment becomes one
    /// `GenericNameComponent`. Empty segments are dropped.
    pub fn from_string(s: &str) -> Result<Self> {
        if !s.starts_with('/') {
            return Err(Error::NameInvalidFormat);
        }
        let mut name = Name::new();
        for segment in s.split('/') {
            if segment.is_empty() {
                continue;
            }
            name.append(NameComponent::from_string(segment)?)?;
        }
        Ok(name)
    }

    /// Appends a component, failing with `Oversize` at capacity.
    pub fn append(&mut self, component: NameComponent) -> Result<()> {
        if self.components_size >= NAME_COMPONENTS_MAX {
            return Err(Error::Oversize);
        }
        self.components[self.components_size] = component;
        self.components_size += 1;
        Ok(())
    }

    /// Returns the number of components in the name.
    pub fn len(&self) -> usize {
        self.components_size
    }

    /// Returns true if the name has no components.
    pub fn is_empty(&self) -> bool {
        self.components_size == 0
    }

    /// The components of this name, in order.
    pub fn components(&self) -> &[NameComponent] {
        &self.components[..self.components_size]
    }

    /// Gets a component at the specified index.
    pub fn get(&self, index: usize) -> Option<&NameComponent> {
        self.components().get(index)
    }

    /// Encoded size of this name's TLV block.
    pub fn probe_block_size(&self) -> usize {
        let value_size: usize = self
            .components()
            .iter()
            .map(|c| c.probe_block_size())
            .sum();
        tlv::probe_block_size(TLV_NAME, value_size)
    }

    pub fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let value_size: usize = self
            .components()
            .iter()
            .map(|c| c.probe_block_size())
            .sum();
        encoder.append_type(TLV_NAME)?;
        encoder.append_length(value_size)?;
        for component in self.components() {
            component.encode(encoder)?;
        }
        Ok(())
    }

    pub fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let tlv_type = decoder.read_type()?;
        if tlv_type != TLV_NAME {
            return Err(Error::WrongTlvType);
        }
        let length = decoder.read_length()?;
        let end = decoder
            .offset()
            .checked_add(length)
            .ok_or(Error::Oversize)?;
        let mut name = Name::new();
        while decoder.offset() < end {
            if name.components_size >= NAME_COMPONENTS_MAX {
                return Err(Error::Oversize);
            }
            let component = NameComponent::decode(decoder)?;
            name.components[name.components_size] = component;
            name.components_size += 1;
        }
        Ok(name)
    }

    /// Decodes a name from a standalone TLV block.
    pub fn from_block(block: &[u8]) -> Result<Self> {
        let mut decoder = Decoder::new(block);
        Self::decode(&mut decoder)
    }

    /// Checks if this name is a proper or equal prefix of another name.
    ///
    /// This is a predicate, not an ordering; so is equality via `==`.
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        if self.components_size > other.components_size {
            return false;
        }
        self.components()
            .iter()
            .zip(other.components())
            .all(|(a, b)| a == b)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.components_size == other.components_size
            && self
                .components()
                .iter()
                .zip(other.components())
                .all(|(a, b)| a == b)
    }
}

impl Eq for Name {}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "/");
        }
        for component in self.components() {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}
