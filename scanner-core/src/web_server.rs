use crate::emit::to_json;
use crate::normalize::scan_once;
use crate::traits::{UiAssetProvider, WifiScanner};
use crate::Error;
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;

// The shared state for our web server.
// By using `Arc<dyn Trait>`, we can inject any implementation
// that satisfies the trait bounds.
pub type WebServerState = State<Arc<AppState>>;

pub struct AppState {
    pub scanner: Arc<dyn WifiScanner>,
    pub frontend: Arc<dyn UiAssetProvider>,
    pub scan_timeout: Option<Duration>,
    pub refresh_interval_secs: u64,
}

/// Client settings handed to the browser dashboard.
#[derive(Debug, Serialize)]
struct Settings {
    refresh_interval_secs: u64,
}

/// Builds the application router: the JSON API plus the static UI as fallback.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/scan", get(api_scan_wifi))
        .route("/api/settings", get(api_settings))
        .fallback(serve_static_asset)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// How long shutdown waits for in-flight requests (a scan may hang) before
/// they are abandoned.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Starts the Axum web server and runs until Ctrl-C.
pub async fn run_server(state: Arc<AppState>, addr: SocketAddr) -> crate::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🌐 Web server listening on http://{}", listener.local_addr()?);

    serve_until(listener, router(state), shutdown_signal(), SHUTDOWN_GRACE).await?;

    tracing::info!("Web server stopped");
    Ok(())
}

/// Serves `app` until `shutdown` resolves, then gives in-flight requests
/// `grace` to finish.
pub async fn serve_until<F>(listener: TcpListener, app: Router, shutdown: F, grace: Duration) -> crate::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stopping_tx, stopping_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            let _ = stopping_tx.send(());
        })
        .into_future();

    tokio::select! {
        result = server => result?,
        _ = async {
            if stopping_rx.await.is_ok() {
                tokio::time::sleep(grace).await;
            } else {
                std::future::pending::<()>().await;
            }
        } => {
            tracing::warn!("Requests still running after {:?}, abandoning them", grace);
        }
    }
    Ok(())
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

// --- Route Handlers ---

/// Serves a static asset (e.g., CSS, JS) from the frontend provider.
async fn serve_static_asset(State(state): WebServerState, uri: Uri) -> Response {
    let path = match uri.path().trim_start_matches('/') {
        "" => "index.html",
        p => p,
    };

    match state.frontend.get_asset(path).await {
        Ok((data, mime)) => ([(header::CONTENT_TYPE, mime)], Body::from(data)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, format!("Asset not found: {}", path)).into_response(),
    }
}

/// API endpoint to scan for Wi-Fi networks.
async fn api_scan_wifi(State(state): WebServerState) -> Response {
    let body = scan_once(state.scanner.as_ref(), state.scan_timeout)
        .await
        .and_then(|networks| {
            tracing::debug!("Scan returned {} networks", networks.len());
            to_json(&networks)
        });

    match body {
        Ok(json) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            json,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Scan failed: {}", e);
            (
                error_status(&e),
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn api_settings(State(state): WebServerState) -> Json<Settings> {
    Json(Settings {
        refresh_interval_secs: state.refresh_interval_secs,
    })
}

fn error_status(e: &Error) -> StatusCode {
    match e {
        Error::NoInterface(_) => StatusCode::SERVICE_UNAVAILABLE,
        Error::ScanTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
