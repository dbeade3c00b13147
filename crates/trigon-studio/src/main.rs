use clap::{Parser, ValueEnum};

use trigon_engine::config::{
    ClearColor, DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH, ShaderFailurePolicy, WindowConfig,
};
use trigon_engine::core::{self, AppConfig};
use trigon_engine::logging::{LoggingConfig, init_logging};

/// Opens a window and draws an orange triangle on a grey background.
#[derive(Debug, Parser)]
#[command(name = "trigon-studio", version)]
struct Args {
    /// Only clear the window every frame; no shaders, no triangle.
    #[arg(long)]
    clear_only: bool,

    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Window width in pixels.
    #[arg(
        long,
        default_value_t = DEFAULT_WIDTH,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    width: u32,

    /// Window height in pixels.
    #[arg(
        long,
        default_value_t = DEFAULT_HEIGHT,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    height: u32,

    /// What to do when a shader stage fails to compile or the program fails to link.
    #[arg(long, value_enum, default_value_t = OnShaderError::Continue)]
    on_shader_error: OnShaderError,

    /// Log filter, `env_logger` syntax. Overrides RUST_LOG.
    #[arg(long)]
    log: Option<String>,

    /// Present without waiting for vertical sync.
    #[arg(long)]
    no_vsync: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum OnShaderError {
    /// Log the diagnostics and keep rendering with the program as-is.
    Continue,
    /// Log the diagnostics and exit with a failure code.
    Halt,
}

impl From<OnShaderError> for ShaderFailurePolicy {
    fn from(value: OnShaderError) -> Self {
        match value {
            OnShaderError::Continue => ShaderFailurePolicy::Continue,
            OnShaderError::Halt => ShaderFailurePolicy::Halt,
        }
    }
}

impl Args {
    fn app_config(&self) -> AppConfig {
        AppConfig {
            window: WindowConfig {
                title: self.title.clone(),
                width: self.width,
                height: self.height,
                vsync: !self.no_vsync,
                ..WindowConfig::default()
            },
            clear: ClearColor::default(),
            triangle: !self.clear_only,
            shader_policy: self.on_shader_error.into(),
        }
    }
}

fn main() {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    let result = core::run(&args.app_config());
    match &result {
        Ok(stats) => {
            log::info!(
                "rendered {} frame(s) in {:.2}s ({:.1} fps)",
                stats.frames,
                stats.elapsed.as_secs_f64(),
                stats.fps()
            );
            log::info!("window closed, bye!");
        }
        Err(e) => log::error!("{} failure: {e:#}", core::failure_kind(e)),
    }

    std::process::exit(core::exit_code(&result));
}
