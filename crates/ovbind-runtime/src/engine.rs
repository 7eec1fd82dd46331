//! Simulated native layer.
//!
//! `SimEngine` implements every [`NativeApi`] entry point over a
//! [`HandleRegistry`]. It does no model loading or compute: a network is a
//! model name bound to a configured device, and `infer` only counts. What it
//! does model faithfully is the handle contract: addresses are opaque, kinds
//! are checked, stale addresses are rejected, and requests outlive the
//! network they came from.

use std::collections::BTreeSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use ovbind_core::error::{OvError, Result};
use ovbind_core::{NativeAddr, NativeApi, ObjectKind, ParamValue};

use crate::config::{DeviceConfig, EngineConfig};
use crate::obs::EngineMetrics;
use crate::registry::{HandleRegistry, NativeEntry, NetworkEntry, RequestEntry};

pub const METRIC_SUPPORTED_METRICS: &str = "SUPPORTED_METRICS";
pub const METRIC_NETWORK_NAME: &str = "NETWORK_NAME";
pub const METRIC_DEVICE_NAME: &str = "DEVICE_NAME";
pub const METRIC_OPTIMAL_INFER_REQUESTS: &str = "OPTIMAL_NUMBER_OF_INFER_REQUESTS";

const BUILTIN_METRICS: [&str; 4] = [
    METRIC_DEVICE_NAME,
    METRIC_NETWORK_NAME,
    METRIC_OPTIMAL_INFER_REQUESTS,
    METRIC_SUPPORTED_METRICS,
];

pub struct SimEngine {
    cfg: EngineConfig,
    registry: HandleRegistry,
    metrics: Arc<EngineMetrics>,
}

impl SimEngine {
    /// Build an engine over an already validated config.
    pub fn new(cfg: EngineConfig) -> Self {
        Self {
            registry: HandleRegistry::new(
                cfg.engine.max_live_objects,
                cfg.engine.max_requests_per_network,
            ),
            metrics: Arc::new(EngineMetrics::default()),
            cfg,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> Arc<EngineMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Number of inferences run on a live request.
    pub fn infer_count(&self, request: NativeAddr) -> Result<u64> {
        self.request_entry(request, |r| r.infer_count.load(Ordering::Relaxed))
    }

    /// Count the call, and the failure if there is one.
    fn track<T>(&self, op: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
        self.metrics.native_calls.inc(&[("op", op)]);
        let res = f();
        if let Err(e) = &res {
            let status = e.status().as_str();
            self.metrics
                .native_errors
                .inc(&[("op", op), ("status", status)]);
            tracing::debug!(op, status, error = %e, "native call failed");
        }
        res
    }

    fn register(&self, entry: NativeEntry) -> Result<NativeAddr> {
        let kind = entry.kind();
        let addr = self.registry.insert(entry)?;
        self.metrics.live_objects.inc(&[("kind", kind.as_str())]);
        tracing::debug!(%kind, %addr, "native object created");
        Ok(addr)
    }

    fn network_entry(&self, addr: NativeAddr) -> Result<NetworkEntry> {
        self.registry
            .with(addr, ObjectKind::ExecutableNetwork, |e| match e {
                NativeEntry::Network(n) => Some(n.clone()),
                _ => None,
            })?
            .ok_or_else(|| OvError::Internal(format!("registry entry {addr} has no network state")))
    }

    fn request_entry<R>(&self, addr: NativeAddr, f: impl FnOnce(&RequestEntry) -> R) -> Result<R> {
        self.registry
            .with(addr, ObjectKind::InferRequest, |e| match e {
                NativeEntry::Request(r) => Some(f(r)),
                _ => None,
            })?
            .ok_or_else(|| OvError::Internal(format!("registry entry {addr} has no request state")))
    }

    fn device(&self, name: &str) -> Result<&DeviceConfig> {
        self.cfg
            .device(name)
            .ok_or_else(|| OvError::NotFound(format!("device {name} is not configured")))
    }

    fn supported_metrics(device: &DeviceConfig) -> Vec<String> {
        BUILTIN_METRICS
            .iter()
            .map(|s| s.to_string())
            .chain(device.metrics.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Resolve a metric for a network. Built-ins take precedence over device entries.
    fn resolve_metric(&self, net: &NetworkEntry, name: &str) -> Result<ParamValue> {
        let device = self.device(&net.device)?;
        let value = match name {
            METRIC_SUPPORTED_METRICS => ParamValue::List(
                Self::supported_metrics(device)
                    .into_iter()
                    .map(ParamValue::String)
                    .collect(),
            ),
            METRIC_NETWORK_NAME => ParamValue::String(net.model.clone()),
            METRIC_DEVICE_NAME => ParamValue::String(device.name.clone()),
            METRIC_OPTIMAL_INFER_REQUESTS => {
                ParamValue::Int(i64::try_from(device.optimal_infer_requests).unwrap_or(i64::MAX))
            }
            other => device
                .metrics
                .get(other)
                .cloned()
                .ok_or_else(|| OvError::NotFound(format!("unsupported metric: {other}")))?,
        };
        Ok(value)
    }
}

impl NativeApi for SimEngine {
    fn create_core(&self) -> Result<NativeAddr> {
        self.track("create_core", || self.register(NativeEntry::Core))
    }

    fn load_network(&self, core: NativeAddr, model: &str, device: &str) -> Result<NativeAddr> {
        self.track("load_network", || {
            self.registry.with(core, ObjectKind::Core, |_| ())?;
            if model.trim().is_empty() {
                return Err(OvError::General("model name must not be empty".into()));
            }
            let device = self.device(device)?;
            let addr = self.register(NativeEntry::Network(NetworkEntry {
                model: model.to_string(),
                device: device.name.clone(),
            }))?;
            tracing::info!(%addr, model, device = %device.name, "network loaded");
            Ok(addr)
        })
    }

    fn create_infer_request(&self, network: NativeAddr) -> Result<NativeAddr> {
        self.track("create_infer_request", || {
            self.network_entry(network)?;
            self.register(NativeEntry::Request(RequestEntry::new(network)))
        })
    }

    fn get_metric(&self, network: NativeAddr, name: &str) -> Result<NativeAddr> {
        self.track("get_metric", || {
            let net = self.network_entry(network)?;
            let value = self.resolve_metric(&net, name)?;
            self.register(NativeEntry::Parameter(value))
        })
    }

    fn infer(&self, request: NativeAddr) -> Result<()> {
        self.track("infer", || {
            let started = Instant::now();
            let n = self.request_entry(request, |r| {
                r.infer_count.fetch_add(1, Ordering::Relaxed) + 1
            })?;
            self.metrics.infer_duration.observe(&[], started.elapsed());
            tracing::trace!(%request, n, "infer done");
            Ok(())
        })
    }

    fn parameter_value(&self, parameter: NativeAddr) -> Result<ParamValue> {
        self.track("parameter_value", || {
            self.registry
                .with(parameter, ObjectKind::Parameter, |e| match e {
                    NativeEntry::Parameter(v) => Some(v.clone()),
                    _ => None,
                })?
                .ok_or_else(|| {
                    OvError::Internal(format!("registry entry {parameter} has no parameter value"))
                })
        })
    }

    fn delete(&self, kind: ObjectKind, addr: NativeAddr) -> Result<()> {
        self.track("delete", || {
            self.registry.remove(kind, addr)?;
            self.metrics.live_objects.dec(&[("kind", kind.as_str())]);
            if kind == ObjectKind::ExecutableNetwork {
                let orphans = self.registry.count_requests(addr);
                if orphans > 0 {
                    tracing::debug!(%addr, orphans, "network deleted with live infer requests");
                }
            }
            tracing::debug!(%kind, %addr, "native object deleted");
            Ok(())
        })
    }
}
