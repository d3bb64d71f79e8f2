//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use gridmesh_engine::device::GpuInit;
use gridmesh_engine::logging::LoggingConfig;
use gridmesh_engine::render::grid::GridConfig;
use gridmesh_engine::window::RuntimeConfig;
use gridmesh_mesh::MAX_GRID_SIZE;
use winit::dpi::LogicalSize;

/// gridmesh command line.
#[derive(Parser, Debug)]
#[command(
    name = "gridmesh",
    version,
    about = "Draws a randomly colored grid with a line overlay",
    long_about = "Draws a randomly colored grid with a line overlay.\n\n\
                  Keys: Esc quits, F1 toggles wireframe, F2 re-randomizes \
                  colors, F3 toggles rotation."
)]
pub struct ClapArgs {
    /// Cells per side of the grid.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(0..=MAX_GRID_SIZE as i64))]
    pub grid_size: u32,

    /// Image to map onto every cell.
    #[arg(long, value_name = "PATH")]
    pub texture: Option<PathBuf>,

    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Window title.
    #[arg(long, default_value = "gridmesh")]
    pub title: String,

    /// Disable vertical sync (may cause tearing).
    #[arg(long)]
    pub no_vsync: bool,

    /// Start with the grid drawn as outlines.
    #[arg(long)]
    pub wireframe: bool,

    /// Start with the grid rotated.
    #[arg(long)]
    pub rotate: bool,

    /// Log filter in env_logger syntax (overrides RUST_LOG).
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

/// Everything `main` needs to start the demo.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub runtime: RuntimeConfig,
    pub gpu: GpuInit,
    pub logging: LoggingConfig,
    pub grid: GridConfig,
    pub rotate: bool,
}

impl From<ClapArgs> for DemoConfig {
    fn from(args: ClapArgs) -> Self {
        Self {
            runtime: RuntimeConfig {
                title: args.title,
                initial_size: LogicalSize::new(args.width.max(1) as f64, args.height.max(1) as f64),
            },
            gpu: GpuInit::default().with_vsync(!args.no_vsync),
            logging: LoggingConfig {
                filter: args.log,
                ..LoggingConfig::default()
            },
            grid: GridConfig {
                size: args.grid_size,
                texture: args.texture,
                wireframe: args.wireframe,
            },
            rotate: args.rotate,
        }
    }
}

impl DemoConfig {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }
}
