#![deny(missing_docs)]

//! # Todos Web Library
//!
//! Route handlers, models and the OpenAPI document of the todos service.

use actix_web::web;

/// Server configuration.
pub mod config;

/// Todo route handlers.
pub mod handlers;

/// Resource models.
pub mod models;

/// OpenAPI document and its endpoints.
pub mod openapi;

/// Logging setup and request logging middleware.
pub mod telemetry;

pub use config::ServerConfig;
pub use openapi::ApiDoc;

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::list_todos)
        .service(handlers::create_todo)
        .service(handlers::replace_todo)
        .service(handlers::delete_todos)
        .service(openapi::api_docs_json)
        .service(openapi::api_docs_yaml);
}
