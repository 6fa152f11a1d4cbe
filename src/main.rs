//! mqtt-pointer
//!
//! Entry point: parse arguments, set up logging, run the pointer window.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use iced::Size;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

use mqtt_pointer::config::Config;
use mqtt_pointer::gui::surface::STATUS_BAR_HEIGHT;
use mqtt_pointer::gui::{FatalSlot, PointerApp};
use mqtt_pointer::transform::CANVAS_SIZE;

/// Command-line arguments for mqtt-pointer
#[derive(Parser, Debug)]
#[command(name = "mqtt-pointer")]
#[command(version, about = "Publish mouse coordinates to an MQTT broker", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "mqtt-pointer.toml")]
    pub config: String,

    /// Broker host
    #[arg(short, long, env = "MQTT_POINTER_BROKER")]
    pub broker: Option<String>,

    /// Broker port
    #[arg(short, long, env = "MQTT_POINTER_PORT")]
    pub port: Option<u16>,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "pretty")]
    pub log_format: String,

    /// Write logs to file (in addition to stdout)
    #[arg(long)]
    pub log_file: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Config comes first so its log level can seed the filter
    let (config, load_error) = if Path::new(&args.config).exists() {
        match Config::load(&args.config) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        }
    } else {
        (Config::default(), None)
    };
    let config = config.with_overrides(args.broker.clone(), args.port);

    let _log_guard = init_logging(&args, &config)?;

    info!("════════════════════════════════════════════════════════");
    info!("  mqtt-pointer v{}", env!("CARGO_PKG_VERSION"));
    info!("  Built: {}", env!("BUILD_DATE"));
    info!("  Commit: {}", env!("GIT_HASH"));
    info!("════════════════════════════════════════════════════════");

    match load_error {
        Some(e) => warn!("Failed to load config: {:#}, using defaults", e),
        None if !Path::new(&args.config).exists() => {
            info!("No config at {}, using defaults", args.config)
        }
        None => info!("Configuration loaded from {}", args.config),
    }

    if let Err(e) = config.validate() {
        eprintln!("{}", mqtt_pointer::utils::format_user_error(&e));
        return Err(e);
    }
    tracing::debug!("Config: {:?}", config);

    let fatal = FatalSlot::default();
    let broker_addr = format!("{}:{}", config.broker.host, config.broker.port);

    let boot_fatal = fatal.clone();
    iced::application(
        move || PointerApp::new(config.clone(), boot_fatal.clone()),
        PointerApp::update,
        PointerApp::view,
    )
    .title(PointerApp::title)
    .window_size(Size::new(
        CANVAS_SIZE as f32,
        CANVAS_SIZE as f32 + STATUS_BAR_HEIGHT,
    ))
    .antialiasing(true)
    .subscription(PointerApp::subscription)
    .run()
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))?;

    if let Some(reason) = fatal.lock().take() {
        let err = anyhow::anyhow!(reason).context(format!("Could not connect to broker {}", broker_addr));
        eprintln!("{}", mqtt_pointer::utils::format_user_error(&err));
        return Err(err);
    }

    info!("Window closed, shutting down");
    Ok(())
}

fn init_logging(args: &Args, config: &Config) -> Result<Option<WorkerGuard>> {
    let log_level = match args.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // rumqttc logs every packet at debug; keep it and the GUI stack quiet
        tracing_subscriber::EnvFilter::new(format!(
            "mqtt_pointer={level},rumqttc=warn,iced=warn,wgpu=warn,warn",
            level = log_level
        ))
    });

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    layers.push(match args.log_format.as_str() {
        "json" => fmt::layer().json().boxed(),
        "compact" => fmt::layer().compact().boxed(),
        _ => fmt::layer().pretty().boxed(),
    });

    // If log file is specified, write to both stdout and file
    let log_file = args
        .log_file
        .as_deref()
        .map(Path::new)
        .or(config.logging.file.as_deref());

    let guard = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);

            layers.push(if args.log_format == "json" {
                fmt::layer().json().with_writer(writer).with_ansi(false).boxed()
            } else {
                fmt::layer().with_writer(writer).with_ansi(false).boxed()
            });
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .init();

    if let Some(path) = log_file {
        info!("Logging to file: {}", path.display());
    }

    Ok(guard)
}
