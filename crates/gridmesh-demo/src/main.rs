mod app;
mod args;
mod bindings;

use anyhow::Result;
use gridmesh_engine::logging::init_logging;
use gridmesh_engine::window::Runtime;

use crate::app::GridDemo;
use crate::args::DemoConfig;

fn main() -> Result<()> {
    let config = DemoConfig::parse();
    init_logging(config.logging.clone());

    log::info!(
        "starting gridmesh: {0}x{0} grid, vsync {1}",
        config.grid.size,
        if config.gpu.present_mode == gridmesh_engine::wgpu::PresentMode::Fifo { "on" } else { "off" }
    );

    let app = GridDemo::new(config.grid, config.rotate);
    Runtime::run(config.runtime, config.gpu, app)
}
