//! # Todo Handlers
//!
//! Stub handlers for the `/todos/` collection. Nothing is persisted: the
//! list is always empty, and writes echo their input back.

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;

use crate::models::{NewTodo, Todo};

/// Lists all todos.
#[utoipa::path(
    get,
    path = "/todos/",
    tag = "todos",
    responses(
        (status = 200, description = "All todos", body = [Todo])
    )
)]
#[get("/todos/")]
pub async fn list_todos() -> impl Responder {
    HttpResponse::Ok().json(Vec::<Todo>::new())
}

/// Creates a todo.
#[utoipa::path(
    post,
    path = "/todos/",
    tag = "todos",
    request_body = NewTodo,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Malformed request body")
    )
)]
#[post("/todos/")]
pub async fn create_todo(body: web::Json<NewTodo>) -> impl Responder {
    let todo = body.into_inner().into_todo(Uuid::new_v4());
    tracing::debug!(id = %todo.id, "created todo");
    HttpResponse::Created().json(todo)
}

/// Replaces a todo.
#[utoipa::path(
    put,
    path = "/todos/",
    tag = "todos",
    request_body = Todo,
    responses(
        (status = 200, description = "Todo replaced", body = Todo),
        (status = 400, description = "Malformed request body")
    )
)]
#[put("/todos/")]
pub async fn replace_todo(body: web::Json<Todo>) -> impl Responder {
    HttpResponse::Ok().json(body.into_inner())
}

/// Deletes todos.
#[utoipa::path(
    delete,
    path = "/todos/",
    tag = "todos",
    responses(
        (status = 204, description = "Todos deleted")
    )
)]
#[delete("/todos/")]
pub async fn delete_todos() -> impl Responder {
    HttpResponse::NoContent().finish()
}
