//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::domain::report::ReportFormat;

#[derive(Clone, Debug, Deserialize)]
/// Settings for the relay gateway and the remote client.
///
/// Credentials are never part of the configuration: they only arrive as process
/// arguments.
pub struct ServerConfig {
    /// ZeroMQ endpoint the gateway binds its REP socket to.
    #[serde(default = "default_gateway_bind")]
    pub gateway_bind: String,
    /// Timeout applied by the HTTP client to each remote call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub report_format: ReportFormat,
    /// Address announced in the security token.
    #[serde(default)]
    pub client_ip: String,
}

fn default_gateway_bind() -> String {
    "tcp://127.0.0.1:25333".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}
