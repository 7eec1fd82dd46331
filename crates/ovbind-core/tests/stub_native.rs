//! Recording native double shared by binding contract tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::Mutex;

use ovbind_core::error::{OvError, Result};
use ovbind_core::{NativeAddr, NativeApi, ObjectKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateInferRequest(NativeAddr),
    GetMetric(NativeAddr, String),
    Delete(ObjectKind, NativeAddr),
}

/// Returns fixed addresses and records every call it sees.
pub struct StubNative {
    pub request_addr: NativeAddr,
    pub metric_addr: NativeAddr,
    pub fail_metric: bool,
    pub fail_delete: bool,
    calls: Mutex<Vec<Call>>,
}

impl StubNative {
    pub fn new(request_addr: usize, metric_addr: usize) -> Self {
        Self {
            request_addr: NativeAddr::new(request_addr),
            metric_addr: NativeAddr::new(metric_addr),
            fail_metric: false,
            fail_delete: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<(ObjectKind, NativeAddr)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Delete(k, a) => Some((k, a)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl NativeApi for StubNative {
    fn create_infer_request(&self, network: NativeAddr) -> Result<NativeAddr> {
        self.record(Call::CreateInferRequest(network));
        Ok(self.request_addr)
    }

    fn get_metric(&self, network: NativeAddr, name: &str) -> Result<NativeAddr> {
        self.record(Call::GetMetric(network, name.to_string()));
        if self.fail_metric {
            return Err(OvError::NotFound(format!("unsupported metric: {name}")));
        }
        Ok(self.metric_addr)
    }

    fn delete(&self, kind: ObjectKind, addr: NativeAddr) -> Result<()> {
        self.record(Call::Delete(kind, addr));
        if self.fail_delete {
            return Err(OvError::NotAllocated(addr));
        }
        Ok(())
    }
}
