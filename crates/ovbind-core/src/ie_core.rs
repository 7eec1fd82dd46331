//! Engine core binding: the entry point that produces executable networks.

use std::sync::Arc;

use crate::error::Result;
use crate::handle::{CoreKind, Handle};
use crate::native::NativeApi;
use crate::network::ExecutableNetwork;
use crate::object::{NativeObject, NativeWrapper};

#[derive(Debug)]
pub struct Core {
    obj: NativeObject<CoreKind>,
}

impl Core {
    /// Ask the native layer for a fresh core.
    pub fn new(api: Arc<dyn NativeApi>) -> Result<Self> {
        let addr = api.create_core()?;
        Ok(Self::from_handle(api, Handle::from_addr(addr)))
    }

    pub fn from_handle(api: Arc<dyn NativeApi>, handle: Handle<CoreKind>) -> Self {
        Self {
            obj: NativeObject::from_handle(api, handle),
        }
    }

    /// Load `model` onto `device`.
    pub fn load_network(&self, model: &str, device: &str) -> Result<ExecutableNetwork> {
        let api = self.obj.api();
        let addr = api.load_network(self.obj.addr(), model, device)?;
        Ok(ExecutableNetwork::from_handle(
            Arc::clone(api),
            Handle::from_addr(addr),
        ))
    }
}

impl NativeWrapper for Core {
    type Kind = CoreKind;

    fn object(&self) -> &NativeObject<CoreKind> {
        &self.obj
    }

    fn into_object(self) -> NativeObject<CoreKind> {
        self.obj
    }
}
