use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};

use chrono::Duration;

use crate::config::{Config, DEFAULT_SEEN_TTL_SECS};
use crate::data::catalog::{builtin_catalog, CatalogError, RoomCatalog};
use crate::seen::SeenSeedCache;

pub mod api;
pub mod routes;

/// Shared, per-process server state. The catalog is read-only after startup.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<RoomCatalog>,
    pub seen: Mutex<SeenSeedCache>,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<RoomCatalog>) -> Self {
        let ttl = Some(config.seen_ttl_secs)
            .filter(|secs| *secs >= 0)
            .and_then(Duration::try_seconds)
            .unwrap_or_else(|| Duration::seconds(DEFAULT_SEEN_TTL_SECS));
        let seen = SeenSeedCache::new(ttl);
        Self {
            config,
            catalog,
            seen: Mutex::new(seen),
        }
    }

    /// Load the configured catalog file, or use the built-in catalog when none is set.
    pub fn from_config(config: Config) -> Result<Self, CatalogError> {
        let catalog = match config.catalog_path.as_deref() {
            Some(path) => RoomCatalog::load(path)?,
            None => builtin_catalog().clone(),
        };
        Ok(Self::new(config, Arc::new(catalog)))
    }
}

pub fn run_server(state: Arc<AppState>) -> std::io::Result<()> {
    let bind_addr = state.config.bind_addr.clone();
    let listener = TcpListener::bind(&bind_addr)?;
    log::info!(
        "atlantis-calc server listening on http://{bind_addr} ({} rooms)",
        state.catalog.len()
    );

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream, &state) {
                    log::warn!("request error: {err}");
                }
            }
            Err(err) => log::warn!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn handle_connection(stream: &mut TcpStream, state: &AppState) -> std::io::Result<()> {
    let mut buffer = [0_u8; 16_384];
    let bytes_read = stream.read(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buffer[..bytes_read]);
    let mut lines = request.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let body = request
        .split("\r\n\r\n")
        .nth(1)
        .or_else(|| request.split("\n\n").nth(1))
        .unwrap_or("");

    let response = routes::route_request(state, method, path, body);
    log::debug!("{method} {path} -> {}", response.status_code);
    stream.write_all(response.to_http_string().as_bytes())?;
    stream.flush()?;
    Ok(())
}
