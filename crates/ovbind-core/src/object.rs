//! Shared owning base for every wrapper.
//!
//! A [`NativeObject`] is the single caller-side owner of one native handle.
//! Wrappers compose it and implement [`NativeWrapper`] to pick up handle
//! access and deletion.
//!
//! Lifecycle is Live -> Deleted, one way. `delete` consumes the owner, so an
//! operation after delete does not compile. An owner that is dropped while
//! still live is deleted on drop; `into_raw` hands the handle back without
//! deleting it.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::handle::{Handle, HandleKind, NativeAddr};
use crate::native::NativeApi;

pub struct NativeObject<K: HandleKind> {
    handle: Handle<K>,
    api: Arc<dyn NativeApi>,
    live: bool,
}

impl<K: HandleKind> NativeObject<K> {
    /// Take ownership of `handle`. No native call, no validation.
    pub fn from_handle(api: Arc<dyn NativeApi>, handle: Handle<K>) -> Self {
        Self {
            handle,
            api,
            live: true,
        }
    }

    pub fn handle(&self) -> Handle<K> {
        self.handle
    }

    pub fn addr(&self) -> NativeAddr {
        self.handle.addr()
    }

    /// Native layer this object was created against.
    pub fn api(&self) -> &Arc<dyn NativeApi> {
        &self.api
    }

    /// Release the native object. The native layer's result is returned as is.
    pub fn delete(mut self) -> Result<()> {
        self.live = false;
        self.api.delete(K::KIND, self.handle.addr())
    }

    /// Give up ownership without releasing the native object.
    pub fn into_raw(mut self) -> Handle<K> {
        self.live = false;
        self.handle
    }
}

impl<K: HandleKind> Drop for NativeObject<K> {
    fn drop(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;
        if let Err(e) = self.api.delete(K::KIND, self.handle.addr()) {
            tracing::warn!(
                kind = %K::KIND,
                addr = %self.handle.addr(),
                status = e.status().as_str(),
                error = %e,
                "implicit delete on drop failed"
            );
        }
    }
}

impl<K: HandleKind> fmt::Debug for NativeObject<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeObject")
            .field("handle", &self.handle)
            .field("live", &self.live)
            .finish()
    }
}

/// Behavior shared by all handle wrappers.
pub trait NativeWrapper: Sized {
    type Kind: HandleKind;

    fn object(&self) -> &NativeObject<Self::Kind>;

    fn into_object(self) -> NativeObject<Self::Kind>;

    fn handle(&self) -> Handle<Self::Kind> {
        self.object().handle()
    }

    fn addr(&self) -> NativeAddr {
        self.object().addr()
    }

    /// Release the native object. Consumes the wrapper.
    fn delete(self) -> Result<()> {
        self.into_object().delete()
    }

    /// Give up ownership without releasing the native object.
    fn into_raw(self) -> Handle<Self::Kind> {
        self.into_object().into_raw()
    }
}
