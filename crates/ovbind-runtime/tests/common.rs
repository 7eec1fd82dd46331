//! Shared engine fixture for runtime integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::Arc;

use ovbind_core::NativeApi;
use ovbind_runtime::{config, SimEngine};

pub const ENGINE_YAML: &str = r#"
version: 1
engine:
  max_live_objects: 32
  max_requests_per_network: 2
devices:
  - name: CPU
    optimal_infer_requests: 2
    metrics:
      FULL_DEVICE_NAME: "Simulated CPU"
      RANGE_FOR_ASYNC_INFER_REQUESTS: [1, 4, 1]
"#;

pub fn engine_from(yaml: &str) -> (Arc<SimEngine>, Arc<dyn NativeApi>) {
    let cfg = config::load_from_str(yaml).expect("fixture config must parse");
    let engine = Arc::new(SimEngine::new(cfg));
    let api: Arc<dyn NativeApi> = engine.clone();
    (engine, api)
}

pub fn engine() -> (Arc<SimEngine>, Arc<dyn NativeApi>) {
    engine_from(ENGINE_YAML)
}
