mod runner;

use clap::Parser;
use scanner_core::config::{load_config, AppConfig, BackendKind};
use std::io::IsTerminal;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Scan nearby WiFi networks and print them as JSON, a table, or a web dashboard.
#[derive(Parser, Debug)]
#[command(name = "wifi-scan")]
#[command(version, about)]
pub struct Cli {
    /// Render a table instead of JSON
    #[arg(long, conflicts_with_all = ["watch", "web"])]
    pub table: bool,

    /// Re-scan and redraw the table until Ctrl-C
    #[arg(long, conflicts_with = "web")]
    pub watch: bool,

    /// Seconds between scans in watch mode
    #[arg(long, value_name = "SECS", requires = "watch", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Serve the browser dashboard
    #[arg(long)]
    pub web: bool,

    /// Port for the web server
    #[arg(long, requires = "web")]
    pub port: Option<u16>,

    /// Address for the web server to bind to
    #[arg(long, value_name = "ADDR", requires = "web")]
    pub bind: Option<IpAddr>,

    /// TOML configuration file (replaces the built-in defaults)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Scan backend: wpa_cli, iw, mock or wpa_dbus
    #[arg(long, value_name = "NAME")]
    pub backend: Option<BackendKind>,

    /// Wireless interface to scan on
    #[arg(long, value_name = "IFACE")]
    pub interface: Option<String>,

    /// Disable colored signal cells
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Command-line flags win over the configuration file.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(backend) = self.backend {
            config.scanner.backend = backend;
        }
        if let Some(interface) = &self.interface {
            config.scanner.interface = Some(interface.clone());
        }
        if let Some(secs) = self.interval {
            config.watch.interval = Duration::from_secs(secs);
        }
        if let Some(ip) = self.bind {
            config.web.bind_addr = SocketAddr::new(ip, config.web.bind_addr.port());
        }
        if let Some(port) = self.port {
            config.web.bind_addr.set_port(port);
        }
    }

    fn color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

#[tokio::main]
async fn main() {
    // 日志写到 stderr，保证 stdout 上只有 JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        eprintln!("{}", error_line(&e));
        std::process::exit(1);
    }
}

/// The single line printed to stderr before exiting with status 1.
fn error_line(e: &anyhow::Error) -> String {
    format!("Error: {}", e)
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    tracing::debug!("Effective configuration: {:?}", config);

    runner::run(runner::Mode::from_cli(cli), config, cli.color()).await
}
