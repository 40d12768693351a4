use std::{env, net::SocketAddr, sync::Arc};

#[macro_use]
extern crate lazy_static;

use axum::{
    extract::DefaultBodyLimit,
    http::header::CONTENT_TYPE,
    http::Method,
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use crate::{
    app::{cli::Cli, env::Envy},
    pipeline::{remote::service::RemotePipeline, ImageGenerationService},
};

mod app;
mod catalog;
mod generation;
mod pipeline;
mod ui;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<dyn ImageGenerationService>,
    pub envy: Arc<Envy>,
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("omnigen_web=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    let pipeline = RemotePipeline::from_pretrained(
        &envy.pipeline_url,
        envy.model_checkpoint(),
        envy.pipeline_api_key.clone(),
    );
    tracing::info!(checkpoint = pipeline.checkpoint(), "pipeline ready");

    let addr = SocketAddr::new(cli.bind_ip(), envy.port());

    let state = AppState {
        pipeline: Arc::new(pipeline),
        envy: Arc::new(envy),
    };

    tracing::info!(share = cli.share, "listening on http://{}", addr);

    axum::Server::bind(&addr)
        .serve(router(state).into_make_service())
        .await
        .unwrap();
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET]);
    let body_limit = DefaultBodyLimit::max(state.envy.max_upload_bytes());

    Router::new()
        .route("/", get(app::controller::get_root))
        // generation
        .route("/generate", post(generation::controller::generate_image))
        .route(
            "/api/generate",
            post(generation::controller::generate_image_json),
        )
        // catalog
        .route("/examples", get(catalog::controller::get_examples))
        .route("/examples/:index", post(catalog::controller::run_example))
        // layers
        .layer(cors)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
