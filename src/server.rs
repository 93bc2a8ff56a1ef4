//! HTTP front end.
//!
//! | Route | |
//! |-------|-|
//! | `GET /?mode=example_paragraph\|own_paragraph` | empty form |
//! | `POST /resolve` | urlencoded form, answers form + results (400 on bad input) |
//! | `GET /health` | `ok` |
//!
//! Resolution is CPU-bound and runs on the blocking pool.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use crate::config::Config;
use crate::coref::CorefParams;
use crate::form::{FormInput, Mode};
use crate::handler::Demo;
use crate::model::ModelStore;
use crate::page::{render_page, FormState};
use crate::{Error, Result};

/// Shared state for all routes.
#[derive(Debug, Clone)]
pub struct AppState {
    demo: Arc<Demo>,
    defaults: CorefParams,
}

impl AppState {
    /// State around a handler, with initial slider values `defaults`.
    #[must_use]
    pub fn new(demo: Demo, defaults: CorefParams) -> Self {
        Self {
            demo: Arc::new(demo),
            defaults,
        }
    }

    /// State for `config`, drawing models from `store`.
    #[must_use]
    pub fn from_config(config: &Config, store: Arc<ModelStore>) -> Self {
        Self::new(Demo::new(store, config.model), config.defaults)
    }
}

/// An [`Error`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ServerError(Error);

impl From<Error> for ServerError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if self.0.is_client_error() {
            return (StatusCode::BAD_REQUEST, self.0.to_string()).into_response();
        }
        log::error!("[Server] {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred".to_string(),
        )
            .into_response()
    }
}

/// Build the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/resolve", post(submit))
        .route("/health", get(health))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct IndexQuery {
    mode: Option<Mode>,
}

async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let form = FormState::new(query.mode.unwrap_or_default(), state.defaults);
    Html(render_page(&form, None))
}

async fn submit(
    State(state): State<AppState>,
    form: std::result::Result<Form<FormInput>, FormRejection>,
) -> std::result::Result<Html<String>, ServerError> {
    let Form(input) = form.map_err(|e| Error::invalid_input(e.body_text()))?;
    let submission = input.validate(&state.defaults)?;
    let demo = Arc::clone(&state.demo);
    let job = submission.clone();
    let rendering = tokio::task::spawn_blocking(move || demo.submit(&job))
        .await
        .map_err(|e| Error::inference(format!("resolution task failed: {e}")))??;
    let form = FormState::from_submission(&submission);
    Ok(Html(render_page(&form, Some(&rendering))))
}

async fn health() -> &'static str {
    "ok"
}

/// Serve until Ctrl-C.
///
/// # Errors
///
/// `Error::Io` if the address cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    log::info!("[Server] Listening on http://{local}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("[Server] Stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("[Server] Shutdown signal received"),
        Err(e) => {
            log::warn!("[Server] Cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    }
}
