/*
 * Responsibility
 * - tracing / panic hook 初期化
 * - Config読み込み → 依存生成 (validator, mapper, store) → Router 組み立て
 * - Middleware の適用 (auth for /api, security headers, CORS, http)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api::{self, handlers::health::health},
    config::{Config, ConfigError},
    middleware,
    repos::{CourseStore, InMemoryCourseStore},
    services::{auth::build_token_validator, authority_mapper::AuthorityMapper},
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,course_gateway=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: fail fast. Production: default behavior, server keeps running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState, ConfigError> {
    let auth = build_token_validator(config)?;
    let mapper = AuthorityMapper::new(config.auth_claim_diagnostics);

    let store: Arc<dyn CourseStore> = if config.seed_demo_course {
        Arc::new(InMemoryCourseStore::with_demo_course())
    } else {
        Arc::new(InMemoryCourseStore::new())
    };

    tracing::info!(
        issuer = %config.auth_issuer,
        algorithm = ?config.access_jwt_algorithm,
        audience = config.auth_audience.as_deref().unwrap_or("-"),
        store = store.backend_name(),
        claim_diagnostics = config.auth_claim_diagnostics,
        "dependencies ready"
    );

    Ok(AppState::new(auth, mapper, store))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let api = middleware::auth::access::apply(api::routes(), state.clone());

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}
