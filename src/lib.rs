pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
mod error_conversions;
#[cfg(feature = "server")]
pub mod gateway;
pub mod models;
pub mod repository;
pub mod services;

/// Opens the remote session and serves relay requests until the socket fails.
///
/// Login happens once, before the gateway binds; a rejected login never
/// opens the socket.
#[cfg(feature = "server")]
pub fn run(
    server_config: models::config::ServerConfig,
    credentials: domain::session::Credentials,
) -> std::io::Result<()> {
    use std::time::Duration;

    use crate::repository::RemoteRepository;

    let timeout = Duration::from_secs(server_config.request_timeout_secs);

    let repo = RemoteRepository::connect(&credentials, &server_config.client_ip, timeout)
        .map_err(|e| std::io::Error::other(format!("Failed to open remote session: {e}")))?;

    log::info!("Connected to {}", repo.session().endpoint());

    let context = zmq::Context::new();
    let socket = context
        .socket(zmq::REP)
        .map_err(|e| std::io::Error::other(format!("Cannot create zmq socket: {e}")))?;
    socket.bind(&server_config.gateway_bind).map_err(|e| {
        std::io::Error::other(format!(
            "Cannot bind gateway to {}: {e}",
            server_config.gateway_bind
        ))
    })?;

    log::info!("Gateway listening on {}", server_config.gateway_bind);

    gateway::serve(&socket, &repo, server_config.report_format)
        .map_err(|e| std::io::Error::other(format!("Gateway stopped: {e}")))
}
