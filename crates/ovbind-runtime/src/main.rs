//! ovbind demo driver.
//!
//! Usage: `ovbind [config.yaml] [model] [device]`
//! - Loads and validates the engine config
//! - Core -> ExecutableNetwork -> InferRequest, one inference
//! - Logs every supported metric, then prints the engine counters

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use ovbind_core::error::Result;
use ovbind_core::{Core, NativeApi, NativeWrapper};
use ovbind_runtime::engine::METRIC_SUPPORTED_METRICS;
use ovbind_runtime::{config, SimEngine};

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "ovbind.yaml".to_string());
    let model = args.next().unwrap_or_else(|| "model".to_string());
    let device = args.next();

    match run(&path, &model, device.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(status = e.status().as_str(), error = %e, "ovbind failed");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str, model: &str, device: Option<&str>) -> Result<()> {
    let cfg = config::load_from_file(path)?;
    let device = match device {
        Some(d) => d.to_string(),
        None => cfg
            .devices
            .first()
            .map(|d| d.name.clone())
            .unwrap_or_default(),
    };

    let engine = Arc::new(SimEngine::new(cfg));
    let api: Arc<dyn NativeApi> = engine.clone();
    tracing::info!(%path, model, %device, "ovbind starting");

    let core = Core::new(api)?;
    let network = core.load_network(model, &device)?;
    let request = network.create_infer_request()?;
    request.infer()?;

    let supported = network.get_metric(METRIC_SUPPORTED_METRICS)?;
    let names = supported.value()?;
    supported.delete()?;

    let mut dump = serde_json::Map::new();
    for name in names.as_list().unwrap_or_default() {
        let Some(name) = name.as_str() else { continue };
        let param = network.get_metric(name)?;
        let value = param.value()?;
        tracing::info!(metric = name, %value, "metric");
        dump.insert(
            name.to_string(),
            serde_json::to_value(&value)
                .map_err(|e| ovbind_core::OvError::Internal(format!("metric dump failed: {e}")))?,
        );
        param.delete()?;
    }

    request.delete()?;
    network.delete()?;
    core.delete()?;

    println!(
        "{}",
        serde_json::to_string_pretty(&dump)
            .map_err(|e| ovbind_core::OvError::Internal(format!("metric dump failed: {e}")))?
    );
    print!("{}", engine.metrics().render());
    Ok(())
}
