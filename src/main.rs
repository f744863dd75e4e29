use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use copy_after_build::{AppConfig, BuildHooks, BuildManifest, CopyAfterBuildPlugin, PluginConfig};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("copy-after-build")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Copy emitted build files into <to>/<library> once the build is written")
        .arg(
            Arg::new("manifest")
                .long("manifest")
                .value_name("FILE")
                .help("JSON build manifest with output options and chunks")
                .required(true),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .value_name("DIR")
                .help("Destination root directory")
                .required(true),
        )
        .arg(
            Arg::new("verbose-errors")
                .long("verbose-errors")
                .help("Include the underlying cause in error lines")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Set the log level (trace, debug, info, warn, error)")
                .default_value("info"),
        )
        .get_matches();

    let config = create_app_config(&matches)?;

    initialize_logging(&config.log_level)?;

    run_application(config).await
}

/// Pure function to create application configuration from CLI arguments
fn create_app_config(matches: &clap::ArgMatches) -> Result<AppConfig> {
    let required = |name: &str| -> Result<String> {
        matches
            .get_one::<String>(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Missing --{} value", name))
    };

    let mut plugin = PluginConfig::new(required("to")?);
    plugin.verbose_errors = matches.get_flag("verbose-errors");

    Ok(AppConfig {
        manifest: PathBuf::from(required("manifest")?),
        plugin,
        log_level: required("log-level")?,
    })
}

/// Initialize structured logging with tracing
fn initialize_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Logs go to stderr so the copy report owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

/// Load the manifest, register the plugin and fire after-emit once
async fn run_application(config: AppConfig) -> Result<()> {
    info!("Configuration: {:#?}", config);

    let manifest = BuildManifest::load(&config.manifest).await?;
    info!(
        "Loaded build manifest with {} chunks",
        manifest.compilation.chunks.len()
    );

    let mut hooks = BuildHooks::new(manifest.options);
    CopyAfterBuildPlugin::new(config.plugin).apply(&mut hooks);

    hooks
        .call_after_emit(&manifest.compilation, || {
            info!("after-emit hooks completed");
        })
        .await;

    Ok(())
}
