mod sample;

use std::path::PathBuf;

use anyhow::Result;
use penumbra_engine::device::GpuInit;
use penumbra_engine::logging::{init_logging, LoggingConfig};
use penumbra_engine::window::{Runtime, RuntimeConfig};

use sample::ShadowSample;

/// Environment variable naming an OBJ model when no argument is given.
const MODEL_ENV: &str = "PENUMBRA_MODEL";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let model = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(MODEL_ENV))
        .map(PathBuf::from);

    let sample = ShadowSample::new(model.as_deref())?;

    Runtime::run(
        RuntimeConfig {
            title: sample::TITLE.to_string(),
            ..RuntimeConfig::default()
        },
        GpuInit::default(),
        sample,
    )
}
