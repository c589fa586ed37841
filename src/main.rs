use anyhow::{Context, Result};
use clap::Parser;
use image_uploader::app::ImageUploader;
use image_uploader::config::{AppConfig, ConfigOverrides};
use image_uploader::upload::UploadClient;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "image_uploader")]
#[command(about = "Stage images and upload them in one batch")]
#[command(version)]
struct Args {
    /// Base URL of the ingestion server
    #[arg(long, env = "IMAGE_UPLOADER_BASE_URL")]
    base_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, env = "IMAGE_UPLOADER_CONFIG")]
    config: Option<PathBuf>,

    /// Give up on an upload after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_uploader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = AppConfig::resolve(&ConfigOverrides {
        config_file: args.config,
        base_url: args.base_url,
        request_timeout_secs: args.timeout_secs,
    })
    .context("Failed to load configuration")?;
    let client = UploadClient::new(&config).context("Failed to build HTTP client")?;

    info!("Uploads will be sent to {}", config.upload_url());

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1120.0, 680.0])
            .with_min_inner_size([720.0, 560.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Image Uploader",
        options,
        Box::new(move |cc| Box::new(ImageUploader::new(cc, config, client))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the window: {}", e))
}
