use crate::Cli;
use scanner_core::{
    config::AppConfig,
    emit::write_json,
    factory::{create_frontend, create_scanner},
    normalize::scan_once,
    presentation::render_table,
    traits::WifiScanner,
    web_server::{self, AppState},
};
use std::future::Future;
use std::io::Write;
use std::sync::Arc;

/// 运行模式，由命令行参数决定
#[derive(Debug, Clone, Copy)]
pub enum Mode {
    Json,
    Table,
    Watch,
    Web,
}

impl Mode {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.web {
            Mode::Web
        } else if cli.watch {
            Mode::Watch
        } else if cli.table {
            Mode::Table
        } else {
            Mode::Json
        }
    }
}

pub async fn run(mode: Mode, config: AppConfig, color: bool) -> anyhow::Result<()> {
    let scanner = create_scanner(&config.scanner)?;

    match mode {
        Mode::Json => {
            let records = scan_once(scanner.as_ref(), config.scanner.timeout).await?;
            write_json(std::io::stdout().lock(), &records)?;
        }
        Mode::Table => {
            let records = scan_once(scanner.as_ref(), config.scanner.timeout).await?;
            print!("{}", render_table(&records, color));
        }
        Mode::Watch => run_watch(scanner, &config, color, web_server::shutdown_signal()).await?,
        Mode::Web => {
            let state = Arc::new(AppState {
                scanner,
                frontend: create_frontend(config.web.ui_dir.as_deref()),
                scan_timeout: config.scanner.timeout,
                refresh_interval_secs: config.web.refresh_interval.as_secs(),
            });
            println!("Starting web interface at http://{}", config.web.bind_addr);
            web_server::run_server(state, config.web.bind_addr).await?;
        }
    }
    Ok(())
}

/// Redraws the table every `watch.interval` until `shutdown` resolves. A
/// failed scan is shown in place of the table and the loop keeps going.
async fn run_watch<F>(scanner: Arc<dyn WifiScanner>, config: &AppConfig, color: bool, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(config.watch.interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {}
        }

        // 扫描本身也要和 Ctrl-C 竞争，卡住的扫描不能阻止退出
        let outcome = tokio::select! {
            _ = &mut shutdown => break,
            outcome = scan_once(scanner.as_ref(), config.scanner.timeout) => outcome,
        };

        let screen = match outcome {
            Ok(records) => render_table(&records, color),
            Err(e) => {
                tracing::warn!("Scan failed: {}", e);
                format!("Error: {}\n", e)
            }
        };
        // 清屏并把光标移回左上角
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "\x1b[2J\x1b[H{}", screen)?;
        writeln!(stdout, "\nRefreshing every {}s, press Ctrl-C to stop.", config.watch.interval.as_secs())?;
        stdout.flush()?;
    }

    println!("\nStopping scanner...");
    Ok(())
}
