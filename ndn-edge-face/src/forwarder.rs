//! Face and forwarder contracts.
//!
//! The forwarder itself (FIB, PIT, strategy) lives outside this crate; the
//! traits here are the seam between it and a face implementation. A face
//! calls [`Forwarder`] to inject packets and install routes; the forwarder
//! drives a face through [`Face`].

use ndn_edge_common::name::Name;
use ndn_edge_common::Result;
use std::fmt;

/// Unique identifier for a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceId(pub u16);

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FaceId({})", self.0)
    }
}

/// Face lifecycle: `Destroyed → Up ↔ Down`, any state may be destroyed.
/// The forwarder only calls [`Face::send`] on a face that is `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceState {
    Destroyed,
    Down,
    Up,
}

/// Face type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceType {
    /// Physical network interface.
    NetDevice,
    /// Internal app face.
    App,
}

/// Default route cost used when a face installs its own FIB entry.
pub const DEFAULT_COST: u8 = 1;

/// The forwarder operations a face consumes.
pub trait Forwarder {
    /// Pushes an outbound packet from `from` into the forwarder pipeline.
    fn face_receive(&mut self, from: FaceId, packet: &[u8]) -> Result<()>;

    /// Installs a FIB entry routing `prefix` to `face` at `cost`.
    fn fib_insert(&mut self, prefix: &Name, face: FaceId, cost: u8) -> Result<()>;
}

/// The face operations a forwarder consumes.
pub trait Face {
    fn face_id(&self) -> FaceId;
    fn state(&self) -> FaceState;
    fn face_type(&self) -> FaceType;

    /// Brings the face up so the forwarder may dispatch to it.
    fn up(&mut self) -> Result<()>;

    /// Takes the face down without releasing its resources.
    fn down(&mut self) -> Result<()>;

    /// Destroys the face, releasing all registered state.
    fn destroy(&mut self);

    /// Delivers a packet to this face. `name` is the packet's top-level
    /// name, already decoded by the forwarder.
    fn send(&mut self, name: Option<&Name>, packet: &[u8]) -> Result<()>;
}
