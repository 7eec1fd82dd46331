//! Executable network binding.

use std::sync::Arc;

use crate::error::Result;
use crate::handle::{Handle, NetworkKind};
use crate::native::NativeApi;
use crate::object::{NativeObject, NativeWrapper};
use crate::parameter::Parameter;
use crate::request::InferRequest;

/// A model loaded onto a device, owned through its native handle.
#[derive(Debug)]
pub struct ExecutableNetwork {
    obj: NativeObject<NetworkKind>,
}

impl ExecutableNetwork {
    /// Wrap a handle returned by the native layer. The handle is trusted as is.
    pub fn from_handle(api: Arc<dyn NativeApi>, handle: Handle<NetworkKind>) -> Self {
        Self {
            obj: NativeObject::from_handle(api, handle),
        }
    }

    /// Create a new infer request on this network.
    ///
    /// The request shares this network's native layer and may outlive it.
    pub fn create_infer_request(&self) -> Result<InferRequest> {
        let api = self.obj.api();
        let addr = api.create_infer_request(self.obj.addr())?;
        Ok(InferRequest::from_handle(Arc::clone(api), Handle::from_addr(addr)))
    }

    /// Query a metric by name. The name is passed to the native layer untouched.
    pub fn get_metric(&self, name: &str) -> Result<Parameter> {
        let api = self.obj.api();
        let addr = api.get_metric(self.obj.addr(), name)?;
        Ok(Parameter::from_handle(Arc::clone(api), Handle::from_addr(addr)))
    }
}

impl NativeWrapper for ExecutableNetwork {
    type Kind = NetworkKind;

    fn object(&self) -> &NativeObject<NetworkKind> {
        &self.obj
    }

    fn into_object(self) -> NativeObject<NetworkKind> {
        self.obj
    }
}
