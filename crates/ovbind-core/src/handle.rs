//! Native addresses and kind-tagged handles.
//!
//! A [`NativeAddr`] is what crosses the native boundary: an address-sized
//! integer with no type. A [`Handle`] is the same integer tagged at the type
//! level with the kind of object it names, so a request handle cannot be
//! passed where a network handle is expected.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Opaque address-sized integer naming a native object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeAddr(usize);

impl NativeAddr {
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NativeAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Kinds of native objects reachable through the bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Core,
    ExecutableNetwork,
    InferRequest,
    Parameter,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 4] = [
        ObjectKind::Core,
        ObjectKind::ExecutableNetwork,
        ObjectKind::InferRequest,
        ObjectKind::Parameter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Core => "core",
            ObjectKind::ExecutableNetwork => "executable_network",
            ObjectKind::InferRequest => "infer_request",
            ObjectKind::Parameter => "parameter",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Type-level tag for a native object kind. Sealed: the set of kinds is closed.
pub trait HandleKind: sealed::Sealed + 'static {
    const KIND: ObjectKind;
}

macro_rules! handle_kind {
    ($(#[$meta:meta])* $name:ident => $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub enum $name {}

        impl sealed::Sealed for $name {}

        impl HandleKind for $name {
            const KIND: ObjectKind = $kind;
        }
    };
}

handle_kind!(
    /// Tag for engine core handles.
    CoreKind => ObjectKind::Core
);
handle_kind!(
    /// Tag for executable network handles.
    NetworkKind => ObjectKind::ExecutableNetwork
);
handle_kind!(
    /// Tag for infer request handles.
    RequestKind => ObjectKind::InferRequest
);
handle_kind!(
    /// Tag for metric/config parameter handles.
    ParameterKind => ObjectKind::Parameter
);

/// A native address tagged with the kind of object it names.
///
/// `Handle` is a plain identifier: copying it does not copy ownership. The
/// owning side lives in [`crate::object::NativeObject`].
pub struct Handle<K: HandleKind> {
    addr: NativeAddr,
    _kind: PhantomData<fn() -> K>,
}

impl<K: HandleKind> Handle<K> {
    /// Tag a raw address. Nothing is validated.
    pub const fn from_addr(addr: NativeAddr) -> Self {
        Self {
            addr,
            _kind: PhantomData,
        }
    }

    pub const fn addr(self) -> NativeAddr {
        self.addr
    }

    pub fn kind(self) -> ObjectKind {
        K::KIND
    }
}

impl<K: HandleKind> Clone for Handle<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: HandleKind> Copy for Handle<K> {}

impl<K: HandleKind> PartialEq for Handle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.addr == other.addr
    }
}

impl<K: HandleKind> Eq for Handle<K> {}

impl<K: HandleKind> Hash for Handle<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr.hash(state);
    }
}

impl<K: HandleKind> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle<{}>({})", K::KIND, self.addr)
    }
}
