//! saiserver entry point.
//!
//! Bootstraps the switch through the driver and serves the RPC surface
//! until interrupted or until the switch requests a shutdown.

use anyhow::Context as _;
use clap::Parser;
use log::{error, info, warn};
use sai_native::{MemoryDriver, MemoryDriverConfig};
use saiserver::codec::UnsupportedPolicy;
use saiserver::diag::run_diag_shell;
use saiserver::port_map::PortMap;
use saiserver::profile::ProfileMap;
use saiserver::{RpcServer, SaiRpc, ServerConfig, SwitchContext};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// SAI RPC server
#[derive(Parser, Debug)]
#[command(name = "saiserver")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file
    #[arg(short = 'c', long, default_value = "/etc/sonic/saiserver.toml")]
    config: PathBuf,

    /// SAI profile file (key=value per line)
    #[arg(short = 'p', long)]
    profile: Option<PathBuf>,

    /// Front panel port map file
    #[arg(long)]
    port_map: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,

    /// Listen address, overrides the configuration file
    #[arg(long)]
    listen: Option<String>,

    /// Listen port, overrides the configuration file
    #[arg(long)]
    port: Option<u16>,

    /// Reject unknown attribute ids instead of skipping them
    #[arg(long)]
    strict_attributes: bool,
}

impl Args {
    fn load_config(&self) -> anyhow::Result<ServerConfig> {
        let mut config = ServerConfig::load_or_default(&self.config)?;
        if let Some(listen) = &self.listen {
            config.server.listen = listen.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.strict_attributes {
            config.codec.unsupported_policy = UnsupportedPolicy::Strict;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    info!("====================================================================");
    info!("Starting saiserver");
    info!("====================================================================");

    match run(args).await {
        Ok(()) => {
            info!("====================================================================");
            info!("saiserver shutdown complete");
            info!("====================================================================");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("saiserver failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = args.load_config()?;
    info!("Listen address: {}", config.bind_address());
    info!("Unsupported attributes: {:?}", config.codec.unsupported_policy);

    let profile = match &args.profile {
        Some(path) => ProfileMap::load(path)
            .with_context(|| format!("loading profile {}", path.display()))?,
        None => ProfileMap::new(),
    };
    info!("Profile: {} entries", profile.len());

    let port_map = match &args.port_map {
        Some(path) => PortMap::load(path)
            .with_context(|| format!("loading port map {}", path.display()))?,
        None => PortMap::new(),
    };
    info!("Port map: {} ports", port_map.len());

    let driver = Arc::new(MemoryDriver::new(MemoryDriverConfig {
        front_ports: config.switch.front_port_count,
        ..Default::default()
    }));
    let context = SwitchContext::bootstrap(driver, &config, profile, port_map)
        .context("switch bootstrap")?;
    let shutdown = context.shutdown();
    let rpc = SaiRpc::new(Arc::new(context));

    if config.switch.diag_shell {
        tokio::spawn(run_diag_shell(
            rpc.clone(),
            config.diag_shell_start_delay(),
            config.diag_shell_interval(),
        ));
    }

    let server = RpcServer::bind(&config.bind_address(), rpc).await?;

    let signal_shutdown = shutdown.clone();
    let signal_handle = tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Received SIGINT, shutting down gracefully...");
                signal_shutdown.request();
            }
            Err(err) => error!("Failed to listen for ctrl-c: {}", err),
        }
    });

    server.run(shutdown).await?;
    signal_handle.abort();
    Ok(())
}
