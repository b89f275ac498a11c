//! Common packet codec and security primitives for the ndn-edge implementation.
//!
//! This crate provides the TLV encoder/decoder, the name and signature models,
//! the signed Data packet engine, and the pluggable crypto backend shared by
//! the face and cli crates.

pub mod data;
pub mod error;
pub mod metainfo;
pub mod name;
pub mod security;
pub mod signature;
pub mod tlv;

/// Reexport of common types
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
