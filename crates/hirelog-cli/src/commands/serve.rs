//! Serve command implementation.

use crate::cli::ServeArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::Formatter;
use hirelog_domain::ApplicationRepository;
use hirelog_grpc::{start_server, ServerConfig};
use hirelog_store::ApplicationStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Execute the serve command.
pub async fn execute_serve(args: ServeArgs, config: &AppConfig, formatter: &Formatter) -> Result<()> {
    let store = Arc::new(ApplicationStore::from_snapshot(args.snapshot.as_deref())?);
    let server = server_config(&args, config);

    println!(
        "{}",
        formatter.info(&format!(
            "Serving {} application(s) on {}",
            store.count()?,
            server.full_address()
        ))
    );

    start_server(server, store, shutdown_signal()).await?;
    Ok(())
}

/// Apply command-line overrides to the configured listen address.
pub fn server_config(args: &ServeArgs, config: &AppConfig) -> ServerConfig {
    let mut server = config.server_config();
    if let Some(addr) = &args.addr {
        server.addr = addr.clone();
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    server
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Could not listen for Ctrl-C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let config = AppConfig::default();

        let args = ServeArgs {
            snapshot: None,
            addr: None,
            port: None,
        };
        assert_eq!(server_config(&args, &config).full_address(), "127.0.0.1:9000");

        let args = ServeArgs {
            snapshot: None,
            addr: Some("0.0.0.0".to_string()),
            port: Some(9100),
        };
        assert_eq!(server_config(&args, &config).full_address(), "0.0.0.0:9100");
    }
}
