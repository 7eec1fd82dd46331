use dashmap::{DashMap, DashSet};

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use ovbind_core::error::{OvError, Result};
use ovbind_core::{NativeAddr, ObjectKind, ParamValue};

/// First address handed out. Keeps zero and the low page unused.
const ADDR_BASE: usize = 0x1000;
/// Address stride; every address is 16-byte aligned.
const ADDR_STRIDE: usize = 0x10;

/// Native-side state behind one address.
#[derive(Debug)]
pub enum NativeEntry {
    Core,
    Network(NetworkEntry),
    Request(RequestEntry),
    Parameter(ParamValue),
}

impl NativeEntry {
    pub fn kind(&self) -> ObjectKind {
        match self {
            NativeEntry::Core => ObjectKind::Core,
            NativeEntry::Network(_) => ObjectKind::ExecutableNetwork,
            NativeEntry::Request(_) => ObjectKind::InferRequest,
            NativeEntry::Parameter(_) => ObjectKind::Parameter,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NetworkEntry {
    pub model: String,
    pub device: String,
}

#[derive(Debug)]
pub struct RequestEntry {
    pub network: NativeAddr,
    pub infer_count: AtomicU64,
}

impl RequestEntry {
    pub fn new(network: NativeAddr) -> Self {
        Self {
            network,
            infer_count: AtomicU64::new(0),
        }
    }
}

/// Handle registry:
/// - `addr -> NativeEntry`
/// - `network addr -> {live request addr...}`
///
/// Addresses come from a monotonic sequence and are never reused, so a stale
/// address always misses instead of aliasing a newer object.
///
/// Both limits are reserved before the entry becomes visible: the live-object
/// count through an atomic slot counter, the per-network request count under
/// the network's index guard.
pub struct HandleRegistry {
    objects: DashMap<NativeAddr, NativeEntry>,
    requests_by_network: DashMap<NativeAddr, DashSet<NativeAddr>>,
    seq: AtomicU64,
    live: AtomicUsize,
    max_live_objects: usize,
    max_requests_per_network: usize,
}

impl HandleRegistry {
    pub fn new(max_live_objects: usize, max_requests_per_network: usize) -> Self {
        Self {
            objects: DashMap::new(),
            requests_by_network: DashMap::new(),
            seq: AtomicU64::new(0),
            live: AtomicUsize::new(0),
            max_live_objects,
            max_requests_per_network,
        }
    }

    fn next_addr(&self) -> NativeAddr {
        let n = self.seq.fetch_add(1, Ordering::Relaxed) as usize;
        NativeAddr::new(ADDR_BASE + n * ADDR_STRIDE)
    }

    fn reserve_slot(&self) -> Result<()> {
        let max = self.max_live_objects;
        self.live
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| (n < max).then_some(n + 1))
            .map(|_| ())
            .map_err(|_| OvError::OutOfBounds(format!("live object limit reached ({max})")))
    }

    fn release_slot(&self) {
        self.live.fetch_sub(1, Ordering::AcqRel);
    }

    /// Count, allocate, and index a request while holding the network's entry guard.
    fn reserve_request(&self, network: NativeAddr) -> Result<NativeAddr> {
        let max = self.max_requests_per_network;
        let set = self
            .requests_by_network
            .entry(network)
            .or_insert_with(DashSet::new);
        if set.len() >= max {
            return Err(OvError::OutOfBounds(format!(
                "network {network} already has {max} live infer requests"
            )));
        }
        let addr = self.next_addr();
        set.insert(addr);
        Ok(addr)
    }

    pub fn insert(&self, entry: NativeEntry) -> Result<NativeAddr> {
        self.reserve_slot()?;
        let addr = match &entry {
            NativeEntry::Request(req) => match self.reserve_request(req.network) {
                Ok(addr) => addr,
                Err(e) => {
                    self.release_slot();
                    return Err(e);
                }
            },
            _ => self.next_addr(),
        };
        self.objects.insert(addr, entry);
        Ok(addr)
    }

    pub fn kind_of(&self, addr: NativeAddr) -> Option<ObjectKind> {
        self.objects.get(&addr).map(|r| r.value().kind())
    }

    /// Look up `addr`, require it to be `expected`, and run `f` on it.
    pub fn with<R>(
        &self,
        addr: NativeAddr,
        expected: ObjectKind,
        f: impl FnOnce(&NativeEntry) -> R,
    ) -> Result<R> {
        let entry = self.objects.get(&addr).ok_or(OvError::NotAllocated(addr))?;
        let found = entry.value().kind();
        if found != expected {
            return Err(OvError::KindMismatch {
                addr,
                expected,
                found,
            });
        }
        Ok(f(entry.value()))
    }

    /// Remove `addr` if it is a live object of `kind`. A mismatched kind leaves it live.
    pub fn remove(&self, kind: ObjectKind, addr: NativeAddr) -> Result<NativeEntry> {
        let found = self.kind_of(addr).ok_or(OvError::NotAllocated(addr))?;
        if found != kind {
            return Err(OvError::KindMismatch {
                addr,
                expected: kind,
                found,
            });
        }
        let (_, entry) = self
            .objects
            .remove_if(&addr, |_, e| e.kind() == kind)
            .ok_or(OvError::NotAllocated(addr))?;
        self.release_slot();

        if let NativeEntry::Request(req) = &entry {
            if let Some(set) = self.requests_by_network.get(&req.network) {
                set.remove(&addr);
            }
            // under the shard lock, so a concurrent insert is never dropped
            self.requests_by_network
                .remove_if(&req.network, |_, set| set.is_empty());
        }
        Ok(entry)
    }

    pub fn count_requests(&self, network: NativeAddr) -> usize {
        self.requests_by_network
            .get(&network)
            .map(|s| s.len())
            .unwrap_or(0)
    }

    pub fn count_kind(&self, kind: ObjectKind) -> usize {
        self.objects.iter().filter(|e| e.value().kind() == kind).count()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
