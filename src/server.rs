//! HTTP collaborator: a thin axum front over the generation core
//!
//! One route, `GET /new_captcha`, mirroring the library entry point. The core
//! stays stateless, so the router carries no shared state and every request is
//! an independent generation.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::info;
use serde::Deserialize;
use serde_json::json;

use crate::error::Error;
use crate::package::{Challenge, ReturnMode};

/// Listener configuration, passed in explicitly rather than read from
/// process-wide state.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8000,
        }
    }
}

/// Query parameters of `GET /new_captcha`, with the same defaults as the
/// library's typical embedding use
#[derive(Debug, Deserialize)]
pub struct CaptchaParams {
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
    #[serde(default = "default_noise_level")]
    pub noise_level: u8,
    #[serde(default = "default_return_mode")]
    pub return_mode: String,
}

fn default_grid_size() -> u32 {
    6
}

fn default_noise_level() -> u8 {
    3
}

fn default_return_mode() -> String {
    "http".to_string()
}

/// Wraps the core error so handlers can use `?`; parameter errors map to 400,
/// render errors to 500.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Error::RenderError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

async fn new_captcha(Query(params): Query<CaptchaParams>) -> Result<Response, ApiError> {
    let mode: ReturnMode = params.return_mode.parse()?;
    if mode == ReturnMode::Direct {
        return Err(Error::InvalidParameter(
            "return mode \"return\" is only available to embedding callers".to_string(),
        )
        .into());
    }
    match crate::generate_captcha(params.grid_size, params.noise_level, mode)? {
        Challenge::Transport(body) => Ok(Json(body).into_response()),
        Challenge::Direct { .. } => Err(Error::RenderError(
            "packager returned an unencoded challenge for transport mode".to_string(),
        )
        .into()),
    }
}

/// Build the application router
pub fn router() -> Router {
    Router::new().route("/new_captcha", get(new_captcha))
}

/// Bind the listener and serve until the process is stopped
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let addr = SocketAddr::new(config.addr, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, router()).await
}
