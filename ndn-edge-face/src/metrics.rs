//! Per-face dispatch counters.
//!
//! The core is single-threaded by contract, so these are plain integers
//! bumped on the owning thread.

/// Counters a direct face keeps about its own traffic.
#[derive(Debug, Default, Clone, Copy)]
pub struct FaceCounters {
    /// Interests expressed through this face.
    pub interests_expressed: u64,
    /// Prefixes registered through this face.
    pub prefixes_registered: u64,
    /// Data packets delivered to an `on_data` callback.
    pub data_dispatched: u64,
    /// Interest packets delivered to an `on_interest` callback.
    pub interests_dispatched: u64,
    /// Packets that matched no callback entry.
    pub dispatch_misses: u64,
}
