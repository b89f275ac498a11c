//! Application-facing NDN face plumbing.
//!
//! This crate defines the face and forwarder contracts and implements the
//! direct face: the in-process dispatcher that routes packets the local
//! forwarder hands upward to registered application callbacks.

pub mod direct;
pub mod forwarder;
pub mod metrics;

pub use direct::{DirectFace, PacketCallback};
pub use forwarder::{Face, FaceId, FaceState, FaceType, Forwarder, DEFAULT_COST};

/// Number of callback slots on a direct face.
pub const CB_TABLE_SIZE: usize = 8;
