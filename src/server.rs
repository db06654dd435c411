//! TCP acceptor: binds the listener and hands connections out in pairs.

use crate::config::ServerConfig;
use crate::coordinator::SessionCoordinator;
use derive_more::{Display, Error};
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, instrument, warn};

/// Fatal transport errors.
#[derive(Debug, Display, Error)]
pub enum ServerError {
    /// The listening socket could not be bound.
    #[display("Failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Accepting a connection failed.
    #[display("Failed to accept connection: {}", _0)]
    Accept(std::io::Error),
}

/// Accepts players two at a time and starts a game for each pair.
#[derive(Debug)]
pub struct Acceptor {
    listener: TcpListener,
    coordinator: SessionCoordinator,
}

impl Acceptor {
    /// Binds to the configured host and port.
    #[instrument(skip(config), fields(host = %config.host(), port = *config.port()))]
    pub async fn bind(config: &ServerConfig) -> Result<Self, ServerError> {
        let addr = format!("{}:{}", config.host(), config.port());
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        if let Ok(local) = listener.local_addr() {
            info!(%local, "Server listening");
        }

        Ok(Self {
            listener,
            coordinator: SessionCoordinator::new(config),
        })
    }

    /// Returns the bound address.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts pairs forever. The first connection of each pair plays X.
    #[instrument(skip(self))]
    pub async fn run(self) -> Result<(), ServerError> {
        loop {
            let x = self.accept("X").await?;
            let o = self.accept("O").await?;
            let paired = self.coordinator.pair(x, o);
            info!(session_id = %paired.session().id(), "Game started");
        }
    }

    async fn accept(&self, mark: &str) -> Result<TcpStream, ServerError> {
        let (stream, peer) = self.listener.accept().await.map_err(ServerError::Accept)?;
        if let Err(e) = stream.set_nodelay(true) {
            warn!(error = %e, "Failed to set TCP_NODELAY");
        }
        info!(%peer, "Player {} connected", mark);
        Ok(stream)
    }
}
