//! gRPC server configuration and lifecycle management
//!
//! Handles binding, serving and graceful shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use hirelog_domain::ApplicationRepository;
use thiserror::Error;
use tonic::transport::Server;
use tracing::info;

use crate::proto::applications_server::ApplicationsServer;
use crate::service::ApplicationsServiceImpl;

/// Port served when none is configured
pub const DEFAULT_PORT: u16 = 9000;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server listen address
    pub addr: String,

    /// Server port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(addr: impl Into<String>, port: u16) -> Self {
        Self {
            addr: addr.into(),
            port,
        }
    }

    /// Get the full server address
    pub fn full_address(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }

    /// Parse the full address into a socket address
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let address = self.full_address();
        address
            .parse()
            .map_err(|source| ServerError::InvalidAddress { address, source })
    }
}

/// Errors raised while starting or running the server
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured address is not a socket address
    #[error("Invalid listen address {address}: {source}")]
    InvalidAddress {
        /// Address as configured
        address: String,
        /// Parser error
        #[source]
        source: std::net::AddrParseError,
    },

    /// Binding or serving failed
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}

/// Start the gRPC server and serve until `shutdown` resolves
///
/// # Errors
/// Returns error if the address is invalid or the server fails to bind
pub async fn start_server<R, F>(
    config: ServerConfig,
    repository: Arc<R>,
    shutdown: F,
) -> Result<(), ServerError>
where
    R: ApplicationRepository + Send + Sync + 'static,
    F: Future<Output = ()> + Send,
{
    let addr = config.socket_addr()?;

    let service = ApplicationsServiceImpl::new(repository);
    let service_server = ApplicationsServer::new(service);

    info!(%addr, "Hirelog gRPC server starting");

    Server::builder()
        .add_service(service_server)
        .serve_with_shutdown(addr, shutdown)
        .await?;

    info!(%addr, "Hirelog gRPC server stopped");
    Ok(())
}
