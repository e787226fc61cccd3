//! TCP session server.
//!
//! Accept loop with one task per connection. A bind failure is the only
//! fatal error in the whole system; accept errors are logged and the loop
//! continues. Shutdown is cooperative through a watch channel: the accept
//! loop stops, and every open session observes the same signal and closes.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::adapters::tcp::session::handle_connection;
use crate::application::{IntentClassifier, SlotExtractor};

pub struct TheaterServer {
    listener: TcpListener,
    classifier: Arc<IntentClassifier>,
    extractor: Arc<SlotExtractor>,
}

impl TheaterServer {
    /// Binds the listening socket.
    pub async fn bind(
        addr: SocketAddr,
        classifier: Arc<IntentClassifier>,
        extractor: Arc<SlotExtractor>,
    ) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "listening");
        Ok(Self {
            listener,
            classifier,
            extractor,
        })
    }

    /// Actual bound address; useful when binding port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop until `shutdown` fires.
    pub async fn serve(&self, mut shutdown: watch::Receiver<()>) {
        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    tracing::info!("shutdown signal received, draining");
                    break;
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            tracing::info!(%peer, "connection accepted");
                            tokio::spawn(handle_connection(
                                stream,
                                peer,
                                Arc::clone(&self.classifier),
                                Arc::clone(&self.extractor),
                                shutdown.clone(),
                            ));
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "accept failed");
                        }
                    }
                }
            }
        }
    }
}
