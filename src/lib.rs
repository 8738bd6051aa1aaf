// src/lib.rs

use axum::{Router, routing::get};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use handlers::graphql::{AppSchema, build_schema};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub schema: AppSchema,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let schema = build_schema(db.clone());
        Self { db, schema }
    }
}

pub mod entities {
    pub mod prelude;
    pub mod exchanges;
    pub mod exchange_logs;
    pub mod sync_status;
}

pub mod services {
    pub mod coinapi;
    pub mod coinmarketcap;
    pub mod exchange;
    pub mod price_backfill;
    pub mod sync_status;
    pub mod volume;
}

pub mod config;
pub mod handlers;
pub mod jobs;
pub mod models;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/graphql",
            get(handlers::graphql::graphiql).post(handlers::graphql::graphql_handler),
        )
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
