//! # Server Configuration
//!
//! Command-line flags with environment fallbacks.

use clap::Parser;

use crate::telemetry::LogFormat;

/// Settings of the todos server.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about = "Todos REST service")]
pub struct ServerConfig {
    /// Address to listen on.
    #[clap(long, env = "TODOS_BIND", default_value = "127.0.0.1:3030")]
    pub bind: String,

    /// Log output format.
    #[clap(long, env = "TODOS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Stop right after startup (smoke tests).
    #[clap(long, env = "TODOS_ONESHOT")]
    pub oneshot: bool,
}
