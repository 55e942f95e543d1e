//! Preview server.
//!
//! A lightweight HTTP server over the build output, built on `tiny_http`:
//!
//! - Static file serving with content-type detection
//! - Automatic `index.html` resolution for directories
//! - `GET /api/search?q=...` answered by the in-memory query filter
//! - 404 responses using the rendered not-found page
//! - Graceful shutdown on Ctrl+C, port auto-retry on conflict
//!
//! The dataset is loaded once per process and the search index built from
//! it once; both live for the server's lifetime. Each search request is a
//! synchronous scan, so results always reflect the query that asked for
//! them.

use crate::{
    catalog::DataSource,
    config::SiteConfig,
    log,
    search::{SearchEntry, build_index, filter},
};
use anyhow::{Context, Result};
use std::{
    fs,
    io::Cursor,
    net::SocketAddr,
    path::Path,
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the preview server.
///
/// Blocks until Ctrl+C is received.
pub fn serve_site(config: &'static SiteConfig) -> Result<()> {
    let interface: std::net::IpAddr = config.serve.interface.parse()?;
    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    // One load per process; the dataset is immutable afterwards, so the
    // flattened index can be reused for every search request.
    let data = DataSource::from_config(config).load();
    let index = data.as_ref().map(build_index).unwrap_or_default();

    log!("serve"; "http://{}", addr);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, config, &index) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < max_retries => {
                continue;
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    max_retries,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// Resolution order:
/// 1. `/api/search` → query filter over the in-memory index
/// 2. Exact file match → serve file
/// 3. Directory with index.html → serve index.html
/// 4. Nothing found → 404 with the rendered not-found page
fn handle_request(request: Request, config: &SiteConfig, index: &[SearchEntry]) -> Result<()> {
    let url = request.url().to_string();
    let (raw_path, raw_query) = match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url.as_str(), None),
    };

    // Decode URL-encoded characters in the path (e.g. %20 → space)
    let path = urlencoding::decode(raw_path)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    if path == "/api/search" {
        let query = raw_query
            .and_then(|q| query_param(q, "q"))
            .unwrap_or_default();
        return serve_search(request, index, &query);
    }

    let request_path = path.trim_matches('/');
    if request_path.split('/').any(|segment| segment == "..") {
        return serve_not_found(request, config);
    }
    let local_path = config.build.output.join(request_path);

    if local_path.is_file() {
        return serve_file(request, &local_path);
    }

    if local_path.is_dir() {
        let index_path = local_path.join("index.html");
        if index_path.is_file() {
            return serve_file(request, &index_path);
        }
    }

    serve_not_found(request, config)
}

/// Extract and decode one parameter from a raw query string.
/// `+` is treated as a space, per form encoding.
fn query_param(raw_query: &str, name: &str) -> Option<String> {
    for pair in raw_query.split('&') {
        if let Some((key, value)) = pair.split_once('=')
            && key == name
        {
            let value = value.replace('+', " ");
            return Some(
                urlencoding::decode(&value)
                    .map(std::borrow::Cow::into_owned)
                    .unwrap_or(value),
            );
        }
    }
    None
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Run the query filter and answer with its JSON shape.
fn serve_search(request: Request, index: &[SearchEntry], query: &str) -> Result<()> {
    let matches = filter(index, query);
    let body = serde_json::to_string(&matches)
        .unwrap_or_else(|_| r#"{"results":[],"truncated":false}"#.to_string());

    let response = Response::from_string(body).with_header(
        Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap(),
    );
    request.respond(response)?;
    Ok(())
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = guess_content_type(path);

    let response = Response::from_data(content)
        .with_header(Header::from_bytes("Content-Type", content_type).unwrap());

    request.respond(response)?;
    Ok(())
}

/// Serve 404 using the rendered not-found page, falling back to plain text
/// if the build has not produced one.
fn serve_not_found(request: Request, config: &SiteConfig) -> Result<()> {
    let page = config.build.output.join("404.html");
    let response = match fs::read(&page) {
        Ok(content) => Response::new(
            StatusCode(404),
            vec![Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()],
            Cursor::new(content),
            None,
            None,
        ),
        Err(_) => Response::new(
            StatusCode(404),
            vec![Header::from_bytes("Content-Type", "text/plain").unwrap()],
            Cursor::new(b"404 Not Found".to_vec()),
            Some(13),
            None,
        ),
    };
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Tests
// ============================================================================
