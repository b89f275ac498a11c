//! The direct face: in-process dispatch of Interest and Data packets to
//! application callbacks.
//!
//! The callback table is a fixed array scanned in insertion order; the
//! first matching entry wins, so registration order is the effective
//! priority. Data packets match an exact-name entry, Interests match a
//! registered prefix.

use crate::forwarder::{Face, FaceId, FaceState, FaceType, Forwarder, DEFAULT_COST};
use crate::metrics::FaceCounters;
use crate::CB_TABLE_SIZE;
use log::{debug, trace, warn};
use ndn_edge_common::name::Name;
use ndn_edge_common::tlv::{Decoder, TLV_DATA, TLV_INTEREST};
use ndn_edge_common::{Error, Result};

/// A callback invoked with the raw encoded packet bytes.
pub type PacketCallback = Box<dyn FnMut(&[u8])>;

struct CallbackEntry {
    name: Name,
    is_prefix: bool,
    on_data: Option<PacketCallback>,
    on_timeout: Option<PacketCallback>,
    on_interest: Option<PacketCallback>,
}

/// The in-process application face. A forwarder keeps at most one of these.
pub struct DirectFace {
    id: FaceId,
    state: FaceState,
    entries: [Option<CallbackEntry>; CB_TABLE_SIZE],
    counters: FaceCounters,
}

impl DirectFace {
    /// Constructs a direct face in the `Destroyed` state; call
    /// [`Face::up`] before handing it to the forwarder.
    pub fn new(id: FaceId) -> Self {
        Self {
            id,
            state: FaceState::Destroyed,
            entries: std::array::from_fn(|_| None),
            counters: FaceCounters::default(),
        }
    }

    pub fn counters(&self) -> &FaceCounters {
        &self.counters
    }

    fn free_slot(&mut self) -> Option<&mut Option<CallbackEntry>> {
        self.entries.iter_mut().find(|slot| slot.is_none())
    }

    /// Registers `on_data`/`on_timeout` for the exact name `interest_name`
    /// and injects the encoded Interest into the forwarder.
    pub fn express_interest(
        &mut self,
        forwarder: &mut dyn Forwarder,
        interest_name: &Name,
        interest: &[u8],
        on_data: PacketCallback,
        on_timeout: Option<PacketCallback>,
    ) -> Result<()> {
        let id = self.id;
        let slot = self.free_slot().ok_or(Error::AppFaceCbTableFull)?;
        *slot = Some(CallbackEntry {
            name: *interest_name,
            is_prefix: false,
            on_data: Some(on_data),
            on_timeout,
            on_interest: None,
        });
        self.counters.interests_expressed += 1;
        debug!("[{}] express interest {}", id, interest_name);
        forwarder.face_receive(id, interest)
    }

    /// Registers `on_interest` for `prefix_name` and installs the matching
    /// FIB route in the forwarder.
    pub fn register_prefix(
        &mut self,
        forwarder: &mut dyn Forwarder,
        prefix_name: &Name,
        on_interest: PacketCallback,
    ) -> Result<()> {
        let id = self.id;
        let slot = self.free_slot().ok_or(Error::AppFaceCbTableFull)?;
        *slot = Some(CallbackEntry {
            name: *prefix_name,
            is_prefix: true,
            on_data: None,
            on_timeout: None,
            on_interest: Some(on_interest),
        });
        self.counters.prefixes_registered += 1;
        debug!("[{}] register prefix {}", id, prefix_name);
        forwarder.fib_insert(prefix_name, id, DEFAULT_COST)
    }

    /// Frees the first callback slot whose name matches `name` exactly.
    /// Entries are never freed on delivery; completion and timeout cleanup
    /// is the application's job.
    pub fn release(&mut self, name: &Name) -> Result<()> {
        for slot in self.entries.iter_mut() {
            if slot.as_ref().is_some_and(|entry| entry.name == *name) {
                *slot = None;
                return Ok(());
            }
        }
        Err(Error::NoMatchedCallback)
    }

    /// Forwarder-driven timeout signal for a pending Interest: invokes the
    /// matching exact-name entry's `on_timeout` with the original Interest
    /// bytes. The slot stays allocated; see [`DirectFace::release`].
    pub fn notify_timeout(&mut self, name: &Name, interest: &[u8]) -> Result<()> {
        for slot in self.entries.iter_mut() {
            if let Some(entry) = slot.as_mut() {
                if !entry.is_prefix && entry.name == *name {
                    if let Some(callback) = entry.on_timeout.as_mut() {
                        callback(interest);
                    }
                    return Ok(());
                }
            }
        }
        Err(Error::NoMatchedCallback)
    }
}

impl Face for DirectFace {
    fn face_id(&self) -> FaceId {
        self.id
    }

    fn state(&self) -> FaceState {
        self.state
    }

    fn face_type(&self) -> FaceType {
        FaceType::App
    }

    fn up(&mut self) -> Result<()> {
        self.state = FaceState::Up;
        Ok(())
    }

    fn down(&mut self) -> Result<()> {
        self.state = FaceState::Down;
        Ok(())
    }

    fn destroy(&mut self) {
        for slot in self.entries.iter_mut() {
            *slot = None;
        }
        self.state = FaceState::Destroyed;
    }

    fn send(&mut self, name: Option<&Name>, packet: &[u8]) -> Result<()> {
        let mut decoder = Decoder::new(packet);
        let packet_type = decoder.read_type()?;
        let is_interest = match packet_type {
            TLV_INTEREST => true,
            TLV_DATA => false,
            _ => {
                // There is no fragmentation on a direct face.
                warn!("[{}] dropping packet with top-level type {}", self.id, packet_type);
                return Err(Error::WrongTlvType);
            }
        };

        // The forwarder decodes the name before dispatching to a face.
        let name = name.ok_or(Error::InvalidNameSize)?;

        for slot in self.entries.iter_mut() {
            let Some(entry) = slot.as_mut() else { continue };
            if entry.is_prefix != is_interest {
                continue;
            }
            if !is_interest && entry.name == *name {
                trace!("[{}] data {} -> on_data", self.id, name);
                if let Some(callback) = entry.on_data.as_mut() {
                    callback(packet);
                }
                self.counters.data_dispatched += 1;
                return Ok(());
            }
            if is_interest && entry.name.is_prefix_of(name) {
                trace!("[{}] interest {} -> on_interest", self.id, name);
                if let Some(callback) = entry.on_interest.as_mut() {
                    callback(packet);
                }
                self.counters.interests_dispatched += 1;
                return Ok(());
            }
        }
        self.counters.dispatch_misses += 1;
        debug!("[{}] no callback matched {}", self.id, name);
        Err(Error::NoMatchedCallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndn_edge_common::tlv::Encoder;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct MockForwarder {
        received: Vec<Vec<u8>>,
        fib: Vec<(String, FaceId, u8)>,
    }

    impl Forwarder for MockForwarder {
        fn face_receive(&mut self, _from: FaceId, packet: &[u8]) -> Result<()> {
            self.received.push(packet.to_vec());
            Ok(())
        }

        fn fib_insert(&mut self, prefix: &Name, face: FaceId, cost: u8) -> Result<()> {
            self.fib.push((prefix.to_string(), face, cost));
            Ok(())
        }
    }

    fn packet(top_level_type: u32) -> Vec<u8> {
        let mut buf = [0u8; 8];
        let mut enc = Encoder::new(&mut buf);
        enc.append_type(top_level_type).unwrap();
        enc.append_length(0).unwrap();
        enc.output().to_vec()
    }

    fn up_face() -> DirectFace {
        let mut face = DirectFace::new(FaceId(9));
        face.up().unwrap();
        face
    }

    #[test]
    fn express_interest_injects_into_forwarder() {
        let mut face = up_face();
        let mut forwarder = MockForwarder::default();
        let name = Name::from_string("/a/b").unwrap();
        let interest = packet(TLV_INTEREST);

        face.express_interest(&mut forwarder, &name, &interest, Box::new(|_| {}), None)
            .unwrap();
        assert_eq!(forwarder.received, vec![interest]);
        assert_eq!(face.counters().interests_expressed, 1);
    }

    #[test]
    fn register_prefix_installs_fib_route() {
        let mut face = up_face();
        let mut forwarder = MockForwarder::default();
        let prefix = Name::from_string("/svc").unwrap();

        face.register_prefix(&mut forwarder, &prefix, Box::new(|_| {}))
            .unwrap();
        assert_eq!(forwarder.fib, vec![("/svc".to_string(), FaceId(9), DEFAULT_COST)]);
    }

    #[test]
    fn data_dispatch_requires_exact_name() {
        let mut face = up_face();
        let mut forwarder = MockForwarder::default();
        let name = Name::from_string("/a/b").unwrap();
        let hits = Rc::new(Cell::new(0u32));
        let hits_cb = Rc::clone(&hits);

        face.express_interest(
            &mut forwarder,
            &name,
            &packet(TLV_INTEREST),
            Box::new(move |_| hits_cb.set(hits_cb.get() + 1)),
            None,
        )
        .unwrap();

        let data = packet(TLV_DATA);
        face.send(Some(&name), &data).unwrap();
        assert_eq!(hits.get(), 1);

        let other = Name::from_string("/a/c").unwrap();
        assert_eq!(
            face.send(Some(&other), &data),
            Err(Error::NoMatchedCallback)
        );
        // a longer name is not an exact match either
        let longer = Name::from_string("/a/b/c").unwrap();
        assert_eq!(
            face.send(Some(&longer), &data),
            Err(Error::NoMatchedCallback)
        );
        assert_eq!(face.counters().data_dispatched, 1);
        assert_eq!(face.counters().dispatch_misses, 2);
    }

    #[test]
    fn interest_dispatch_uses_prefix_match() {
        let mut face = up_face();
        let mut forwarder = MockForwarder::default();
        let prefix = Name::from_string("/svc").unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_cb = Rc::clone(&seen);

        face.register_prefix(
            &mut forwarder,
            &prefix,
            Box::new(move |bytes| seen_cb.borrow_mut().push(bytes.to_vec())),
        )
        .unwrap();

        let interest = packet(TLV_INTEREST);
        let deep = Name::from_string("/svc/op/1").unwrap();
        face.send(Some(&deep), &interest).unwrap();
        assert_eq!(seen.borrow().as_slice(), &[interest.clone()]);

        let unrelated = Name::from_string("/y").unwrap();
        assert_eq!(
            face.send(Some(&unrelated), &interest),
            Err(Error::NoMatchedCallback)
        );
    }

    #[test]
    fn data_never_matches_prefix_entries() {
        let mut face = up_face();
        let mut forwarder = MockForwarder::default();
        let prefix = Name::from_string("/svc").unwrap();
        face.register_prefix(&mut forwarder, &prefix, Box::new(|_| {}))
            .unwrap();

        // A Data packet with a name under the prefix does not dispatch.
        assert_eq!(
            face.send(Some(&prefix), &packet(TLV_DATA)),
            Err(Error::NoMatchedCallback)
        );
    }

    #[test]
    fn first_match_in_insertion_order_wins() {
        let mut face = up_face();
        let mut forwarder = MockForwarder::default();
        let first = Rc::new(Cell::new(0u32));
        let second = Rc::new(Cell::new(0u32));
        let first_cb = Rc::clone(&first);
        let second_cb = Rc::clone(&second);

        face.register_prefix(
            &mut forwarder,
            &Name::from_string("/svc").unwrap(),
            Box::new(move |_| first_cb.set(first_cb.get() + 1)),
        )
        .unwrap();
        face.register_prefix(
            &mut forwarder,
            &Name::from_string("/svc/op").unwrap(),
            Box::new(move |_| second_cb.set(second_cb.get() + 1)),
        )
        .unwrap();

        let name = Name::from_string("/svc/op/1").unwrap();
        face.send(Some(&name), &packet(TLV_INTEREST)).unwrap();
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
    }

    #[test]
    fn send_rejects_missing_name_and_unknown_type() {
        let mut face = up_face();
        assert_eq!(
            face.send(None, &packet(TLV_DATA)),
            Err(Error::InvalidNameSize)
        );
        let name = Name::from_string("/a").unwrap();
        assert_eq!(
            face.send(Some(&name), &packet(0x50)),
            Err(Error::WrongTlvType)
        );
    }

    #[test]
    fn table_fills_and_frees() {
        let mut face = up_face();
        let mut forwarder = MockForwarder::default();
        for i in 0..CB_TABLE_SIZE {
            let name = Name::from_string(&format!("/p/{i}")).unwrap();
            face.register_prefix(&mut forwarder, &name, Box::new(|_| {}))
                .unwrap();
        }
        let extra = Name::from_string("/p/full").unwrap();
        assert_eq!(
            face.register_prefix(&mut forwarder, &extra, Box::new(|_| {})),
            Err(Error::AppFaceCbTableFull)
        );

        // releasing a slot makes room again
        face.release(&Name::from_string("/p/3").unwrap()).unwrap();
        face.register_prefix(&mut forwarder, &extra, Box::new(|_| {}))
            .unwrap();
    }

    #[test]
    fn timeout_reaches_exact_entry() {
        let mut face = up_face();
        let mut forwarder = MockForwarder::default();
        let name = Name::from_string("/a/b").unwrap();
        let interest = packet(TLV_INTEREST);
        let timed_out = Rc::new(Cell::new(0u32));
        let timed_out_cb = Rc::clone(&timed_out);

        face.express_interest(
            &mut forwarder,
            &name,
            &interest,
            Box::new(|_| {}),
            Some(Box::new(move |_| timed_out_cb.set(timed_out_cb.get() + 1))),
        )
        .unwrap();

        face.notify_timeout(&name, &interest).unwrap();
        assert_eq!(timed_out.get(), 1);
        assert_eq!(
            face.notify_timeout(&Name::from_string("/nope").unwrap(), &interest),
            Err(Error::NoMatchedCallback)
        );
    }

    #[test]
    fn destroy_resets_slots_and_state() {
        let mut face = up_face();
        let mut forwarder = MockForwarder::default();
        for i in 0..CB_TABLE_SIZE {
            let name = Name::from_string(&format!("/p/{i}")).unwrap();
            face.register_prefix(&mut forwarder, &name, Box::new(|_| {}))
                .unwrap();
        }
        face.destroy();
        assert_eq!(face.state(), FaceState::Destroyed);

        face.up().unwrap();
        assert_eq!(face.state(), FaceState::Up);
        // every slot is free again
        for i in 0..CB_TABLE_SIZE {
            let name = Name::from_string(&format!("/q/{i}")).unwrap();
            face.register_prefix(&mut forwarder, &name, Box::new(|_| {}))
                .unwrap();
        }
    }

    #[test]
    fn state_machine_transitions() {
        let mut face = DirectFace::new(FaceId(3));
        assert_eq!(face.state(), FaceState::Destroyed);
        assert_eq!(face.face_id(), FaceId(3));
        assert_eq!(face.face_type(), FaceType::App);
        face.up().unwrap();
        assert_eq!(face.state(), FaceState::Up);
        face.down().unwrap();
        assert_eq!(face.state(), FaceState::Down);
        face.up().unwrap();
        face.destroy();
        assert_eq!(face.state(), FaceState::Destroyed);
    }
}
