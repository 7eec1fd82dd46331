//! Infer request binding.

use std::sync::Arc;

use crate::error::Result;
use crate::handle::{Handle, RequestKind};
use crate::native::NativeApi;
use crate::object::{NativeObject, NativeWrapper};

#[derive(Debug)]
pub struct InferRequest {
    obj: NativeObject<RequestKind>,
}

impl InferRequest {
    pub fn from_handle(api: Arc<dyn NativeApi>, handle: Handle<RequestKind>) -> Self {
        Self {
            obj: NativeObject::from_handle(api, handle),
        }
    }

    /// Run one synchronous inference. Blocks until the native layer returns.
    pub fn infer(&self) -> Result<()> {
        self.obj.api().infer(self.obj.addr())
    }
}

impl NativeWrapper for InferRequest {
    type Kind = RequestKind;

    fn object(&self) -> &NativeObject<RequestKind> {
        &self.obj
    }

    fn into_object(self) -> NativeObject<RequestKind> {
        self.obj
    }
}
