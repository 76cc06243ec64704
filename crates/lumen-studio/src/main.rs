//! Lumen Studio: draws a textured triangle offscreen, optionally replaces it
//! with its depth preview, and presents the result.
//!
//! Keys: `D` toggles the depth view, `Escape` quits. `--help` lists options.

mod args;
mod config;
mod studio;
mod view;

use anyhow::Result;
use clap::Parser;
use lumen_engine::logging::init_logging;
use lumen_engine::window::Runtime;

use args::StudioArgs;
use config::StudioConfig;
use studio::Studio;

fn main() -> Result<()> {
    let config = StudioArgs::parse().apply(StudioConfig::default());
    init_logging(config.logging.clone());

    log::info!(
        "starting: mesh {:?} / {:?}, depth {:?} via {:?}",
        config.mesh_shading,
        config.mesh_transform,
        config.depth_source,
        config.depth_addressing
    );

    let runtime = config.runtime_config();
    let gpu_init = config.gpu.clone();
    Runtime::run(runtime, gpu_init, Studio::new(config))
}
