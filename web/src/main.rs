#![deny(missing_docs)]

//! # Todos Web Binary
//!
//! Entry point for the Actix Web server.

use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer};
use clap::Parser;
use std::net::TcpListener;
use todos_web::telemetry::{self, log_request};
use todos_web::{configure, ServerConfig};

fn build_server(listener: TcpListener) -> std::io::Result<actix_web::dev::Server> {
    Ok(
        HttpServer::new(|| App::new().wrap(from_fn(log_request)).configure(configure))
            .listen(listener)?
            .run(),
    )
}

async fn run(config: ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(&config.bind)?;
    let addr = listener.local_addr()?;
    let server = build_server(listener)?;

    tracing::info!("App running on http://{}", addr);
    tracing::info!(
        "OpenAPI documentation available at http://{}/api-docs",
        addr
    );

    if config.oneshot {
        let handle = server.handle();
        actix_web::rt::spawn(server);
        handle.stop(true).await;
        return Ok(());
    }

    server.await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::parse();
    telemetry::init(config.log_format);
    run(config).await
}
