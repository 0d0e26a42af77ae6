//! HTTP delivery for the compositor: one JSON-in, PNG-out endpoint.
//!
//! Built on `tiny_http` with a small worker pool. The surface is
//! intentionally minimal: `POST /api/generate-certificate` plus 404/405
//! fallbacks. Anything fancier belongs in front of this service.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use tiny_http::{Header, Method, Response, Server};
use tracing::{error, info, warn};

use crate::error::{Error, Result};
use crate::{CertificateRequest, Compositor};

/// The render endpoint path.
pub const RENDER_PATH: &str = "/api/generate-certificate";

/// Configuration for the HTTP surface
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address, e.g. "127.0.0.1:8087"
    pub bind_addr: String,
    /// Request worker threads
    pub worker_threads: usize,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_string(),
            worker_threads: num_cpus::get(),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// A bound but not yet running server.
pub struct CertServer<C> {
    server: Arc<Server>,
    config: ServerConfig,
    compositor: Arc<C>,
}

impl<C: Compositor + 'static> CertServer<C> {
    /// Bind the listen socket. Fails on an unparseable or busy address.
    pub fn bind(config: ServerConfig, compositor: Arc<C>) -> Result<Self> {
        if config.worker_threads == 0 {
            return Err(Error::Config("worker_threads must be at least 1".into()));
        }
        let server = Server::http(config.bind_addr.as_str())
            .map_err(|e| Error::Config(format!("failed to bind {}: {}", config.bind_addr, e)))?;
        Ok(Self {
            server: Arc::new(server),
            config,
            compositor,
        })
    }

    /// The address actually bound (useful with port 0).
    pub fn addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serve requests until the process exits. Blocks the calling thread.
    pub fn run(self) -> Result<()> {
        info!(
            addr = ?self.addr(),
            workers = self.config.worker_threads,
            "serving certificate endpoint"
        );

        let mut handles = Vec::with_capacity(self.config.worker_threads);
        for _ in 0..self.config.worker_threads {
            let server = self.server.clone();
            let compositor = self.compositor.clone();
            let max_body = self.config.max_body_bytes;
            handles.push(thread::spawn(move || {
                for request in server.incoming_requests() {
                    handle_request(request, compositor.as_ref(), max_body);
                }
            }));
        }
        for handle in handles {
            if handle.join().is_err() {
                return Err(Error::Config("server worker panicked".into()));
            }
        }
        Ok(())
    }
}

/// Bind and run in one call.
pub fn serve<C: Compositor + 'static>(config: ServerConfig, compositor: Arc<C>) -> Result<()> {
    CertServer::bind(config, compositor)?.run()
}

enum Reply {
    Png(Vec<u8>),
    Error(u16, String),
}

fn handle_request(mut request: tiny_http::Request, compositor: &dyn Compositor, max_body: usize) {
    let method = request.method().clone();
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or("").to_string();

    let reply = match (&method, path.as_str()) {
        (Method::Post, RENDER_PATH) => render_reply(&mut request, compositor, max_body),
        (_, RENDER_PATH) => Reply::Error(405, error_body("method not allowed")),
        _ => Reply::Error(404, error_body("not found")),
    };

    let outcome = match reply {
        Reply::Png(data) => request.respond(
            Response::from_data(data)
                .with_header(header("Content-Type", "image/png"))
                .with_header(header(
                    "Content-Disposition",
                    "attachment; filename=\"certificate.png\"",
                )),
        ),
        Reply::Error(status, body) => request.respond(
            Response::from_string(body)
                .with_status_code(status)
                .with_header(header("Content-Type", "application/json")),
        ),
    };
    if let Err(e) = outcome {
        warn!(%method, %url, "failed to write response: {}", e);
    }
}

fn render_reply(
    request: &mut tiny_http::Request,
    compositor: &dyn Compositor,
    max_body: usize,
) -> Reply {
    let mut body = String::new();
    let mut limited = request.as_reader().take(max_body as u64 + 1);
    if let Err(e) = limited.read_to_string(&mut body) {
        warn!("failed to read request body: {}", e);
        return Reply::Error(400, error_body("unreadable request body"));
    }
    if body.len() > max_body {
        return Reply::Error(413, error_body("request body too large"));
    }

    let parsed: CertificateRequest = match serde_json::from_str(&body) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("malformed request body: {}", e);
            return Reply::Error(400, error_body("malformed JSON body"));
        }
    };

    match compositor.render(&parsed) {
        Ok(image) => {
            info!(
                width = image.width,
                height = image.height,
                bytes = image.png_data.len(),
                "certificate rendered"
            );
            Reply::Png(image.png_data)
        }
        Err(e) => {
            let status = status_for(&e);
            if status >= 500 {
                // Operators get the detail; clients get a generic failure.
                error!("render failed: {}", e);
                Reply::Error(status, error_body("certificate rendering failed"))
            } else {
                Reply::Error(status, error_body(&e.to_string()))
            }
        }
    }
}

/// HTTP status for a render error.
pub fn status_for(error: &Error) -> u16 {
    match error {
        Error::Validation(_) => 400,
        Error::TemplateMissing(_) | Error::FontLoad(_) | Error::Render(_) | Error::Config(_) => 500,
    }
}

fn error_body(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

fn header(name: &str, value: &str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap()
}
