//! The native seam.
//!
//! Everything on the far side of [`NativeApi`] is the native layer: it owns
//! the objects, validates handles (or does not), and reports failures. The
//! bindings call through this trait with raw [`NativeAddr`]s and never
//! interpret the values they get back.
//!
//! All calls are synchronous and block the calling thread until the native
//! layer returns.

use crate::error::{OvError, Result};
use crate::handle::{NativeAddr, ObjectKind};
use crate::parameter::ParamValue;

/// Entry points a native layer exposes to the bindings.
///
/// The first three are what an executable network needs. The rest have
/// default implementations reporting `NotImplemented`, so a layer (or a test
/// double) only provides what it supports.
pub trait NativeApi: Send + Sync {
    /// Create an infer request on a loaded network. Returns the request address.
    fn create_infer_request(&self, network: NativeAddr) -> Result<NativeAddr>;

    /// Query a network metric by name. Returns the parameter address.
    fn get_metric(&self, network: NativeAddr, name: &str) -> Result<NativeAddr>;

    /// Release a native object.
    fn delete(&self, kind: ObjectKind, addr: NativeAddr) -> Result<()>;

    /// Create an engine core.
    fn create_core(&self) -> Result<NativeAddr> {
        Err(OvError::NotImplemented("create_core"))
    }

    /// Load a model onto a device. Returns the executable network address.
    fn load_network(&self, _core: NativeAddr, _model: &str, _device: &str) -> Result<NativeAddr> {
        Err(OvError::NotImplemented("load_network"))
    }

    /// Run one synchronous inference on a request.
    fn infer(&self, _request: NativeAddr) -> Result<()> {
        Err(OvError::NotImplemented("infer"))
    }

    /// Read the value a parameter handle refers to.
    fn parameter_value(&self, _parameter: NativeAddr) -> Result<ParamValue> {
        Err(OvError::NotImplemented("parameter_value"))
    }
}
