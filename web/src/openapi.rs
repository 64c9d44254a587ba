//! # OpenAPI Document
//!
//! The API contract, generated from the handler annotations and served at
//! `/api-docs` (JSON) and `/api-docs.yaml`.

use actix_web::{get, HttpResponse, Responder};
use utoipa::OpenApi;

use crate::models::{NewTodo, Todo};

/// OpenAPI documentation for the todos service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todos API",
        version = "0.1.0",
        description = "A minimal OpenAPI-documented REST service for todo items."
    ),
    paths(
        crate::handlers::list_todos,
        crate::handlers::create_todo,
        crate::handlers::replace_todo,
        crate::handlers::delete_todos,
    ),
    components(schemas(Todo, NewTodo)),
    tags(
        (name = "todos", description = "Todo item operations")
    )
)]
pub struct ApiDoc;

/// Serves the document as JSON.
#[get("/api-docs")]
pub async fn api_docs_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serves the document as YAML.
#[get("/api-docs.yaml")]
pub async fn api_docs_yaml() -> HttpResponse {
    match serde_yaml::to_string(&ApiDoc::openapi()) {
        Ok(yaml) => HttpResponse::Ok()
            .content_type("application/yaml")
            .body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "failed to render OpenAPI document as YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}
