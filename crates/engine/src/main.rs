//! CivicSim oracle proxy - main entry point.
//!
//! Serves `POST /api/chat` and `POST /api/judge` on behalf of the simulation,
//! keeping the upstream API key on the server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use civicsim_engine::api;
use civicsim_engine::infrastructure::correlation::CORRELATION_HEADER;
use civicsim_engine::infrastructure::gemini::{GeminiClient, API_KEY_VAR};
use civicsim_engine::infrastructure::settings::{GeminiSettings, ServerSettings};
use civicsim_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may be run from `crates/engine`).
    civicsim_engine::load_dotenv_from_repo_root();
    civicsim_engine::init_tracing();

    tracing::info!("Starting CivicSim oracle proxy");

    let server = ServerSettings::from_env();
    let gemini = GeminiSettings::from_env();

    let key_preview = gemini.key_preview();
    let model = gemini.model.clone();
    let llm = Arc::new(GeminiClient::new(gemini));

    if llm.has_credential() {
        tracing::info!(key = %key_preview, model = %model, "Upstream credential loaded");
    } else {
        tracing::warn!(
            "{} is not set; /api/chat and /api/judge will answer 500",
            API_KEY_VAR
        );
    }

    let app = Arc::new(App::new(llm));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(server.cors_allowed_origins.as_deref()) {
        tracing::info!("CORS enabled");
        router = router.layer(cors);
    }

    let addr: SocketAddr = format!("{}:{}", server.host, server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins.map(str::trim).filter(|s| !s.is_empty())?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        // Browser clients send JSON bodies and a correlation header, both of which preflight.
        .allow_headers([
            HeaderName::from_static(CORRELATION_HEADER),
            axum::http::header::CONTENT_TYPE,
        ]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
