//! # HTTP API
//!
//! | Method | Path | |
//! |--------|------|---|
//! | GET | `/` | add-school form page |
//! | GET | `/showSchools` | school list page |
//! | GET | `/health` | liveness |
//! | POST | `/api/schools` | register a school (multipart form) |
//! | GET | `/api/schools` | list schools, newest first |
//! | GET | `/schoolImages/{file}` | stored images |

use std::net::AddrParseError;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header::CONTENT_TYPE, header::InvalidHeaderValue},
    routing::get,
};
use schoolreg_core::{IMAGE_DIR_NAME, Registry, RegistryError, SqliteStore};
use thiserror::Error;
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::config::{ServerConfig, StorageConfig};

pub mod error;
pub mod handlers;
pub mod pages;
pub mod types;

pub use error::ApiError;

/// Failures while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address: {0}")]
    Address(#[from] AddrParseError),

    #[error("invalid CORS origin: {0}")]
    CorsOrigin(#[from] InvalidHeaderValue),
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Mutex<Registry<SqliteStore>>>,
    pub images_dir: PathBuf,
}

impl AppState {
    pub fn new(registry: Registry<SqliteStore>) -> Self {
        let images_dir = registry.images().dir().to_path_buf();
        Self {
            registry: Arc::new(Mutex::new(registry)),
            images_dir,
        }
    }

    /// Open the database and image directory named by `storage`.
    pub fn open(storage: &StorageConfig) -> Result<Self, RegistryError> {
        let store = SqliteStore::open(&storage.database)?;
        let registry = Registry::new(store, storage.image_store())?;
        Ok(Self::new(registry))
    }
}

fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = match &config.cors_origin {
        Some(origin) => AllowOrigin::exact(HeaderValue::from_str(origin)?),
        None => AllowOrigin::from(Any),
    };
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60)))
}

pub fn create_router(state: AppState, config: &ServerConfig) -> Result<Router, ServerError> {
    let images = ServeDir::new(&state.images_dir);

    Ok(Router::new()
        .route("/", get(pages::add_school))
        .route("/showSchools", get(pages::show_schools))
        .route("/health", get(handlers::health))
        .route(
            "/api/schools",
            get(handlers::list_schools).post(handlers::create_school),
        )
        .nest_service(&format!("/{IMAGE_DIR_NAME}"), images)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Open storage, bind, and serve until Ctrl+C or SIGTERM.
pub async fn run_server(storage: &StorageConfig, config: &ServerConfig) -> Result<(), ServerError> {
    info!(
        database = %storage.database.display(),
        public_dir = %storage.public_dir.display(),
        "opening storage"
    );
    let state = AppState::open(storage)?;
    let app = create_router(state, config)?;

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "school registry listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
