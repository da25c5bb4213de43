//! Note Store Service — standalone binary serving plain-text notes over HTTP.
//!
//! Each note is a `{name}.txt` file in the configured cache directory.
//! Start with: note-store-service -h 127.0.0.1 -p 3000 -c ./cache

mod config;
mod docs;
mod routes;
mod store;
mod submission;
mod upload_form;

use axum::Router;
use axum::routing::get;
use clap::Parser;
use config::Config;
use routes::AppState;
use std::sync::Arc;
use store::NoteStore;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = tower_http::cors::CorsLayer::permissive();

    Router::new()
        .route("/", get(routes::hello))
        .route("/notes", get(routes::list_notes))
        .route(
            "/notes/:name",
            get(routes::get_note)
                .put(routes::update_note)
                .delete(routes::delete_note),
        )
        .route("/write", axum::routing::post(routes::write_note))
        .route("/UploadForm.html", get(upload_form::upload_form))
        .merge(docs::swagger_ui())
        .with_state(state)
        .layer(cors)
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    log::info!("Opening note cache at: {}", config.cache_dir.display());
    let store = NoteStore::open(&config.cache_dir)
        .await
        .expect("Failed to open cache directory");

    let addr = config.bind_addr();
    let state = Arc::new(AppState { store, config });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");
    log::info!("Server is working on http://{}", addr);

    axum::serve(listener, app(state))
        .await
        .expect("Server error");
}
